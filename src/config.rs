//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the base layer; a user file only needs the keys it wants to override.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! name = "$>swift build blog_"          # Title text that gets animated
//! url = "https://powersl1d3.github.io"  # Title link target
//! description = "Блог про iOS разработку и не только"
//! language = "ru"
//!
//! [animation]
//! minimum_length = 5          # Prefix length where the retract phase stops
//! typing_speed_ms = 240       # One character per tick
//! typing_interval_ms = 3000   # Pause at each end
//! cursor_blink_ms = 400       # Cursor on/off period
//!
//! [targets]
//! title_class = "site-name"
//! cursor_id = "console"
//! cursor_class = "console-underscore"
//! hidden_class = "hidden"
//! script_src = "/static/console-underscore.js"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::animator::{AnimationError, Bounds};
use crate::document::Selector;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Blog metadata rendered into the header.
    pub site: SiteMetadata,
    /// Typing and blinking timings.
    pub animation: AnimationConfig,
    /// Element names the animation looks up and mutates.
    pub targets: TargetsConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        let bounds = Bounds {
            minimum_length: self.animation.minimum_length,
            text_len: self.site.name.chars().count(),
        };
        bounds.validate().map_err(|e| match e {
            AnimationError::Configuration(msg) => {
                ConfigError::Validation(format!("animation.{msg}"))
            }
            other => ConfigError::Validation(other.to_string()),
        })?;
        for (key, value) in [
            ("animation.typing_speed_ms", self.animation.typing_speed_ms),
            ("animation.typing_interval_ms", self.animation.typing_interval_ms),
            ("animation.cursor_blink_ms", self.animation.cursor_blink_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::Validation(format!("{key} must be positive")));
            }
        }
        for (key, value) in [
            ("targets.title_class", &self.targets.title_class),
            ("targets.cursor_id", &self.targets.cursor_id),
            ("targets.cursor_class", &self.targets.cursor_class),
            ("targets.hidden_class", &self.targets.hidden_class),
        ] {
            if value.is_empty() || value.contains(char::is_whitespace) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a single non-empty name"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMetadata {
    pub name: String,
    pub url: String,
    pub description: String,
    /// BCP 47 language tag for the header's `lang` attribute.
    pub language: String,
}

impl Default for SiteMetadata {
    fn default() -> Self {
        Self {
            name: "$>swift build blog_".to_string(),
            url: "https://powersl1d3.github.io".to_string(),
            description: "Блог про iOS разработку и не только".to_string(),
            language: "ru".to_string(),
        }
    }
}

/// Typing and blinking timings, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// Prefix length at which the title pauses before growing again.
    pub minimum_length: usize,
    /// Period of the reveal/retract tick.
    pub typing_speed_ms: u64,
    /// How long the title rests at each boundary.
    pub typing_interval_ms: u64,
    /// Period of the cursor toggle.
    pub cursor_blink_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            minimum_length: 5,
            typing_speed_ms: 240,
            typing_interval_ms: 3000,
            cursor_blink_ms: 400,
        }
    }
}

impl AnimationConfig {
    pub fn typing_speed(&self) -> Duration {
        Duration::from_millis(self.typing_speed_ms)
    }

    pub fn typing_interval(&self) -> Duration {
        Duration::from_millis(self.typing_interval_ms)
    }

    pub fn cursor_blink(&self) -> Duration {
        Duration::from_millis(self.cursor_blink_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetsConfig {
    /// Class of the element whose text is animated.
    pub title_class: String,
    /// Id of the blinking cursor element.
    pub cursor_id: String,
    /// Base class of the cursor element.
    pub cursor_class: String,
    /// Class appended to the cursor while it is off.
    pub hidden_class: String,
    /// URL of the browser script in the generated markup.
    pub script_src: String,
}

impl Default for TargetsConfig {
    fn default() -> Self {
        Self {
            title_class: "site-name".to_string(),
            cursor_id: "console".to_string(),
            cursor_class: "console-underscore".to_string(),
            hidden_class: "hidden".to_string(),
            script_src: "/static/console-underscore.js".to_string(),
        }
    }
}

impl TargetsConfig {
    pub fn title(&self) -> Selector {
        Selector::class(&self.title_class)
    }

    pub fn cursor(&self) -> Selector {
        Selector::id(&self.cursor_id)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock defaults do not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given file, falling back to stock defaults when it
/// does not exist.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(path)?;
    if overlay.is_none() {
        log::debug!("no config at {}, using stock defaults", path.display());
    }
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# console-underscore configuration
# =================================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Title text. This is what gets typed out and retracted.
name = "$>swift build blog_"

# Where the title links to.
url = "https://powersl1d3.github.io"

# Tagline rendered under the title (empty to omit).
description = "Блог про iOS разработку и не только"

# Language tag for the header's lang attribute.
language = "ru"

# ---------------------------------------------------------------------------
# Animation
# ---------------------------------------------------------------------------
[animation]
# Prefix length (in characters) where the title pauses between cycles.
# Must be at least 1 and shorter than site.name.
minimum_length = 5

# Milliseconds between typed or erased characters.
typing_speed_ms = 240

# Milliseconds the title rests when fully shown and when at minimum_length.
typing_interval_ms = 3000

# Milliseconds between cursor on/off toggles.
cursor_blink_ms = 400

# ---------------------------------------------------------------------------
# Targets
# ---------------------------------------------------------------------------
[targets]
# Class of the element holding the title text.
title_class = "site-name"

# Id and base class of the cursor element.
cursor_id = "console"
cursor_class = "console-underscore"

# Class appended to the cursor while it is hidden.
hidden_class = "hidden"

# URL the header's <script> tag points at.
script_src = "/static/console-underscore.js"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_matches_site() {
        let config = SiteConfig::default();
        assert_eq!(config.site.name, "$>swift build blog_");
        assert_eq!(config.site.language, "ru");
    }

    #[test]
    fn default_animation_timings() {
        let config = AnimationConfig::default();
        assert_eq!(config.minimum_length, 5);
        assert_eq!(config.typing_speed(), Duration::from_millis(240));
        assert_eq!(config.typing_interval(), Duration::from_millis(3000));
        assert_eq!(config.cursor_blink(), Duration::from_millis(400));
    }

    #[test]
    fn default_targets_selectors() {
        let targets = TargetsConfig::default();
        assert_eq!(targets.title(), Selector::class("site-name"));
        assert_eq!(targets.cursor(), Selector::id("console"));
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[animation]
typing_speed_ms = 100
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.animation.typing_speed_ms, 100);
        assert_eq!(config.animation.typing_interval_ms, 3000);
        assert_eq!(config.targets.cursor_id, "console");
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config.animation, AnimationConfig::default());
        assert_eq!(config.targets, TargetsConfig::default());
        assert_eq!(config.site.name, SiteMetadata::default().name);
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config.animation, AnimationConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[site]
name = "hello world"

[animation]
minimum_length = 3
cursor_blink_ms = 50
"#,
        )
        .unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.site.name, "hello world");
        assert_eq!(config.site.url, "https://powersl1d3.github.io");
        assert_eq!(config.animation.minimum_length, 3);
        assert_eq!(config.animation.cursor_blink_ms, 50);
        assert_eq!(config.animation.typing_speed_ms, 240);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[animation\nbroken").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[animation]\ntyping_speed_ms = 0\n").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("typing_speed_ms"));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("speed = 240").unwrap();
        let overlay: toml::Value = toml::from_str("speed = 10").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("speed").unwrap().as_integer(), Some(10));
    }

    #[test]
    fn merge_toml_preserves_base_keys() {
        let base: toml::Value = toml::from_str(
            r#"
[animation]
typing_speed_ms = 240
cursor_blink_ms = 400
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str("[animation]\ncursor_blink_ms = 50").unwrap();
        let merged = merge_toml(base, overlay);
        let animation = merged.get("animation").unwrap();
        assert_eq!(
            animation.get("typing_speed_ms").unwrap().as_integer(),
            Some(240)
        );
        assert_eq!(
            animation.get("cursor_blink_ms").unwrap().as_integer(),
            Some(50)
        );
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[animation]\nspeed = 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[deploy]\ntarget = \"github\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_zero_minimum() {
        let mut config = SiteConfig::default();
        config.animation.minimum_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_minimum_not_shorter_than_name() {
        let mut config = SiteConfig::default();
        config.site.name = "abcde".into();
        config.animation.minimum_length = 5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("animation.minimum_length (5)"));

        config.site.name = "abcdef".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_counts_name_in_characters() {
        let mut config = SiteConfig::default();
        // Six characters, twelve bytes.
        config.site.name = "привет".into();
        config.animation.minimum_length = 6;
        assert!(config.validate().is_err());
        config.animation.minimum_length = 5;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_config_rejects_title_shorter_than_minimum() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[site]\nname = \"abc\"\n\n[animation]\nminimum_length = 5\n").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("shorter than the title"));
    }

    #[test]
    fn validate_zero_blink() {
        let mut config = SiteConfig::default();
        config.animation.cursor_blink_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cursor_blink_ms"));
    }

    #[test]
    fn validate_class_with_spaces() {
        let mut config = SiteConfig::default();
        config.targets.hidden_class = "is hidden".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_empty_name() {
        let mut config = SiteConfig::default();
        config.site.name = "  ".into();
        assert!(config.validate().is_err());
    }
}
