//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.
//!
//! ## Trace
//!
//! ```text
//!      10ms  title   "a"
//!      20ms  title   "ab"
//!      50ms  title   "abcde"
//!      50ms  dwell   at 5
//!     150ms  resume  forward → 6
//!     400ms  cursor  hidden
//! ```
//!
//! ## Check
//!
//! ```text
//! Title
//!     "$>swift build blog_" (19 characters)
//! Animation
//!     cycle: 5 → 20 → 5
//!     tick 240ms, dwell 3000ms, cursor 400ms
//! Targets
//!     title .site-name, cursor #console
//! ```

use crate::animation::{Event, EventKind};
use crate::animator::Step;
use crate::config::SiteConfig;

// ============================================================================
// Trace
// ============================================================================

fn format_time(at_ms: u64) -> String {
    format!("{:>7}ms", at_ms)
}

fn format_step(step: Step) -> &'static str {
    match step {
        Step::Forward => "forward",
        Step::Backward => "backward",
    }
}

/// One line per event, in firing order.
pub fn format_trace(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .map(|event| {
            let detail = match &event.kind {
                EventKind::Title { text } => format!("title   {text:?}"),
                EventKind::DwellStart { letter_count } => format!("dwell   at {letter_count}"),
                EventKind::DwellEnd { step, letter_count } => {
                    format!("resume  {} → {letter_count}", format_step(*step))
                }
                EventKind::Cursor { visible } => {
                    format!("cursor  {}", if *visible { "visible" } else { "hidden" })
                }
            };
            format!("{}  {}", format_time(event.at_ms), detail)
        })
        .collect()
}

pub fn print_trace(events: &[Event]) {
    for line in format_trace(events) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Summary of a validated config and the title it will animate.
pub fn format_check(config: &SiteConfig) -> Vec<String> {
    let animation = &config.animation;
    let targets = &config.targets;
    let len = config.site.name.chars().count();
    vec![
        "Title".to_string(),
        format!("    {:?} ({} characters)", config.site.name, len),
        "Animation".to_string(),
        format!(
            "    cycle: {min} → {upper} → {min}",
            min = animation.minimum_length,
            upper = len + 1
        ),
        format!(
            "    tick {}ms, dwell {}ms, cursor {}ms",
            animation.typing_speed_ms, animation.typing_interval_ms, animation.cursor_blink_ms
        ),
        "Targets".to_string(),
        format!(
            "    title {}, cursor {}",
            targets.title(),
            targets.cursor()
        ),
    ]
}

pub fn print_check(config: &SiteConfig) {
    for line in format_check(config) {
        println!("{}", line);
    }
}
