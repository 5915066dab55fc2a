//! Header markup and the browser script the animation runs as on the site.
//!
//! The page layout belongs to the site theme. This module only renders the
//! fragment the animation needs, an element carrying the title class and the
//! cursor element, followed by the `<script>` tag:
//!
//! ```html
//! <header lang="ru">
//!   <a class="site-name" href="https://powersl1d3.github.io">$&gt;swift build blog_</a>
//!   <span id="console" class="console-underscore">_</span>
//!   <p class="description">…</p>
//! </header>
//! <script src="/static/console-underscore.js"></script>
//! ```
//!
//! The script is `static/console-underscore.js`, embedded at compile time with
//! the configured timings and target names substituted in.

use crate::config::SiteConfig;
use maud::{Markup, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarkupError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const SCRIPT_TEMPLATE: &str = include_str!("../static/console-underscore.js");

/// File name used when `script_src` is not a site-relative path.
const SCRIPT_FILE: &str = "console-underscore.js";

pub fn render_header(config: &SiteConfig) -> Markup {
    let site = &config.site;
    let targets = &config.targets;
    html! {
        header lang=(site.language) {
            a class=(targets.title_class) href=(site.url) { (site.name) }
            span id=(targets.cursor_id) class=(targets.cursor_class) { "_" }
            @if !site.description.is_empty() {
                p.description { (site.description) }
            }
        }
        (render_script_tag(&targets.script_src))
    }
}

pub fn render_script_tag(src: &str) -> Markup {
    html! {
        script src=(src) {}
    }
}

/// The browser script with this config's values filled in.
///
/// Strings are inserted as JSON literals so quotes in class names cannot
/// break out of the script. Substitution is a single pass over the template;
/// inserted values are never scanned for placeholders.
pub fn script_asset(config: &SiteConfig) -> Result<String, MarkupError> {
    let animation = &config.animation;
    let targets = &config.targets;
    let hidden = format!("{} {}", targets.cursor_class, targets.hidden_class);
    let replacements = [
        ("__MINIMUM_LENGTH__", animation.minimum_length.to_string()),
        ("__TYPING_SPEED__", animation.typing_speed_ms.to_string()),
        ("__TYPING_INTERVAL__", animation.typing_interval_ms.to_string()),
        ("__CURSOR_BLINK__", animation.cursor_blink_ms.to_string()),
        ("__VISIBLE_CLASS__", serde_json::to_string(&targets.cursor_class)?),
        ("__HIDDEN_CLASS__", serde_json::to_string(&hidden)?),
        ("__TITLE_CLASS__", serde_json::to_string(&targets.title_class)?),
        ("__CURSOR_ID__", serde_json::to_string(&targets.cursor_id)?),
    ];
    Ok(substitute(SCRIPT_TEMPLATE, &replacements))
}

fn substitute(template: &str, replacements: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("__") {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match replacements.iter().find(|(p, _)| tail.starts_with(p)) {
            Some((placeholder, value)) => {
                out.push_str(value);
                rest = &tail[placeholder.len()..];
            }
            None => {
                out.push_str("__");
                rest = &tail[2..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Where the script lands under an output directory, derived from
/// `script_src` when it is a plain site-relative path.
pub fn script_output_path(script_src: &str) -> PathBuf {
    let relative = script_src.trim_start_matches('/');
    let plain = !relative.is_empty()
        && !script_src.contains("://")
        && relative.split('/').all(|part| !part.is_empty() && part != "..");
    if plain {
        PathBuf::from(relative)
    } else {
        PathBuf::from(SCRIPT_FILE)
    }
}

/// Write `header.html` and the script into `output_dir`. Returns the written
/// paths in that order.
pub fn write_assets(config: &SiteConfig, output_dir: &Path) -> Result<Vec<PathBuf>, MarkupError> {
    let header_path = output_dir.join("header.html");
    let script_path = output_dir.join(script_output_path(&config.targets.script_src));

    fs::create_dir_all(output_dir)?;
    fs::write(&header_path, render_header(config).into_string())?;
    if let Some(parent) = script_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&script_path, script_asset(config)?)?;
    log::debug!(
        "wrote {} and {}",
        header_path.display(),
        script_path.display()
    );
    Ok(vec![header_path, script_path])
}
