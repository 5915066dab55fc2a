//! # console-underscore
//!
//! The title animation of a small blog: the site name is typed out one
//! character at a time, rests, is erased back to a short prefix, rests again,
//! and repeats forever. A console cursor next to it blinks on its own timer.
//!
//! ```text
//! $>s_   $>swift build blog_   $>swi_   $>swift build blog    …
//! ```
//!
//! # Architecture
//!
//! The animation is two state machines driven by timers, written so none of
//! it depends on a browser:
//!
//! ```text
//! animator  (pure tick/resume)  ─┐
//! cursor    (pure toggle)       ─┼─▶ animation ──▶ Document
//! timer     (virtual clock)     ─┘                  ├── MemoryDocument  (tests, `trace`)
//!                                                   ├── TerminalDocument (`play`)
//!                                                   └── browser DOM via markup::script_asset
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`animator`] | Reveal/retract state machine: `tick`, `resume`, `TitleAnimator` |
//! | [`cursor`] | Blinking cursor state |
//! | [`timer`] | Deterministic interval/timeout queue with cancellable handles |
//! | [`document`] | `Document` trait, `Selector`, in-memory document |
//! | [`animation`] | Runs both state machines against a document; `start`, `advance`, `stop` |
//! | [`terminal`] | Terminal document and real-time playback |
//! | [`markup`] | Header fragment and browser script, rendered with Maud |
//! | [`config`] | `config.toml` loading, merging, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Virtual Time
//!
//! Timers never run by themselves. Whoever owns an [`animation::Animation`]
//! moves its clock forward, so the whole animation can be replayed tick by
//! tick in a test, or traced for minutes of virtual time in microseconds. The
//! terminal player is just a loop that sleeps until the next due timer.
//!
//! ## Explicit Stop
//!
//! The animation keeps handles to both repeating timers and to the pending
//! dwell timeout. [`animation::Animation::stop`] clears all three, so a stopped
//! animation never mutates its document again. The generated browser script
//! exposes the same operation as `window.stopTitleAnimation()`.
//!
//! ## Degenerate Titles Are Errors
//!
//! When `minimum_length` is not shorter than the title, the lower and upper
//! boundaries overlap and the title would never retract. Starting such an
//! animation fails with a configuration error instead of guessing, and so
//! does loading a `config.toml` that pairs such a title with its minimum.

pub mod animation;
pub mod animator;
pub mod config;
pub mod cursor;
pub mod document;
pub mod markup;
pub mod output;
pub mod terminal;
pub mod timer;

#[cfg(test)]
mod scenarios;
#[cfg(test)]
pub(crate) mod test_helpers;
