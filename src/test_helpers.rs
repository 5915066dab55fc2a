//! Shared test utilities: fixture documents, fast timings, and extractors
//! over [`Event`] logs.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut animation = start(header("abcdef"), fast_config(5));
//! let events = animation.advance(ms(50));
//! assert_eq!(titles(&events), [(10, "a"), (20, "ab"), (30, "abc"), (40, "abcd"), (50, "abcde")]);
//! ```

use std::time::Duration;

use crate::animation::{Animation, Event, EventKind};
use crate::animator::Step;
use crate::config::{AnimationConfig, TargetsConfig};
use crate::document::{MemoryDocument, Selector};

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Ticks every 10ms, dwells for 100ms, cursor every 400ms.
pub fn fast_config(minimum_length: usize) -> AnimationConfig {
    timings(minimum_length, 10, 100, 400)
}

/// Tick period, dwell, and blink period in milliseconds.
pub fn timings(minimum_length: usize, speed: u64, interval: u64, blink: u64) -> AnimationConfig {
    AnimationConfig {
        minimum_length,
        typing_speed_ms: speed,
        typing_interval_ms: interval,
        cursor_blink_ms: blink,
    }
}

/// The site header with default target names and the given title.
pub fn header(title: &str) -> MemoryDocument {
    let targets = TargetsConfig::default();
    MemoryDocument::header(
        &targets.title_class,
        title,
        &targets.cursor_id,
        &targets.cursor_class,
    )
}

/// Start an animation with default targets. Panics on error.
pub fn start(doc: MemoryDocument, config: AnimationConfig) -> Animation<MemoryDocument> {
    Animation::start(doc, &config, &TargetsConfig::default())
        .unwrap_or_else(|e| panic!("animation failed to start: {e}"))
}

// =========================================================================
// Document lookups
// =========================================================================

pub fn title_text(doc: &MemoryDocument) -> &str {
    &doc.find(&Selector::class("site-name"))
        .expect("title element")
        .text
}

pub fn cursor_visible(doc: &MemoryDocument) -> bool {
    let cursor = doc.find(&Selector::id("console")).expect("cursor element");
    !cursor.class_name.split_whitespace().any(|c| c == "hidden")
}

// =========================================================================
// Event extractors
// =========================================================================

/// `(time, text)` for every title render.
pub fn titles(events: &[Event]) -> Vec<(u64, &str)> {
    events
        .iter()
        .filter_map(|e| match &e.kind {
            EventKind::Title { text } => Some((e.at_ms, text.as_str())),
            _ => None,
        })
        .collect()
}

/// `(time, visible)` for every cursor toggle.
pub fn cursor_log(events: &[Event]) -> Vec<(u64, bool)> {
    events
        .iter()
        .filter_map(|e| match e.kind {
            EventKind::Cursor { visible } => Some((e.at_ms, visible)),
            _ => None,
        })
        .collect()
}

/// `(time, letter_count)` for every dwell start.
pub fn dwell_starts(events: &[Event]) -> Vec<(u64, usize)> {
    events
        .iter()
        .filter_map(|e| match e.kind {
            EventKind::DwellStart { letter_count } => Some((e.at_ms, letter_count)),
            _ => None,
        })
        .collect()
}

/// `(time, step, letter_count)` for every dwell end.
pub fn dwell_ends(events: &[Event]) -> Vec<(u64, Step, usize)> {
    events
        .iter()
        .filter_map(|e| match e.kind {
            EventKind::DwellEnd { step, letter_count } => Some((e.at_ms, step, letter_count)),
            _ => None,
        })
        .collect()
}
