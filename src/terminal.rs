//! Real-time playback on a terminal line.
//!
//! [`TerminalDocument`] holds the title text and the cursor class and
//! redraws a single line whenever either changes:
//!
//! ```text
//! $>swift bu_
//! ```
//!
//! [`play`] sleeps until the next timer is due, then lets the animation catch
//! up to the wall clock. Late wake-ups fire every missed tick in order.

use crate::animation::Animation;
use crate::document::{Document, Selector};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// A two-element document rendered as one terminal line.
pub struct TerminalDocument<W: Write> {
    out: W,
    title_selector: Selector,
    cursor_selector: Selector,
    hidden_class: String,
    title: String,
    cursor_class: String,
    error: Option<io::Error>,
}

impl<W: Write> TerminalDocument<W> {
    pub fn new(
        out: W,
        title_selector: Selector,
        title: &str,
        cursor_selector: Selector,
        cursor_class: &str,
        hidden_class: &str,
    ) -> Self {
        Self {
            out,
            title_selector,
            cursor_selector,
            hidden_class: hidden_class.to_string(),
            title: title.to_string(),
            cursor_class: cursor_class.to_string(),
            error: None,
        }
    }

    /// The line as it is currently drawn, without control sequences.
    ///
    /// Control characters in the title are dropped so they cannot move the
    /// terminal cursor off the line.
    pub fn line(&self) -> String {
        let hidden = self
            .cursor_class
            .split_whitespace()
            .any(|c| c == self.hidden_class);
        let mut line: String = self.title.chars().filter(|c| !c.is_control()).collect();
        line.push(if hidden { ' ' } else { '_' });
        line
    }

    /// Draw the current line, replacing whatever the line held.
    pub fn redraw(&mut self) {
        if self.error.is_some() {
            return;
        }
        let line = self.line();
        // CR + erase-line keeps the animation on a single row.
        let result = write!(self.out, "\r\x1b[2K{line}").and_then(|_| self.out.flush());
        if let Err(e) = result {
            log::warn!("terminal write failed: {e}");
            self.error = Some(e);
        }
    }

    /// First write error seen, if any. Drawing stops after it.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn is_title(&self, selector: &Selector) -> bool {
        *selector == self.title_selector
    }

    fn is_cursor(&self, selector: &Selector) -> bool {
        *selector == self.cursor_selector
    }
}

impl<W: Write> Document for TerminalDocument<W> {
    fn text_content(&self, selector: &Selector) -> Option<String> {
        if self.is_title(selector) {
            Some(self.title.clone())
        } else if self.is_cursor(selector) {
            Some("_".to_string())
        } else {
            None
        }
    }

    fn set_text_content(&mut self, selector: &Selector, text: &str) {
        if self.is_title(selector) {
            self.title = text.to_string();
            self.redraw();
        }
    }

    fn set_class_name(&mut self, selector: &Selector, class_name: &str) {
        if self.is_cursor(selector) {
            self.cursor_class = class_name.to_string();
            self.redraw();
        }
    }
}

/// Play in real time for `duration`, or forever when `None`.
///
/// Returns the first terminal write error, which also ends playback.
pub fn play<W: Write>(
    animation: &mut Animation<TerminalDocument<W>>,
    duration: Option<Duration>,
) -> io::Result<()> {
    let started = Instant::now();
    let offset = animation.now();
    let end = duration.map(|d| offset + d);
    while let Some(next) = animation.next_due() {
        match end {
            Some(end) if next > end => {
                animation.run_until(end);
                break;
            }
            _ => {}
        }
        let target = started + (next - offset);
        let now = Instant::now();
        if target > now {
            std::thread::sleep(target - now);
        }
        let mut catch_up = offset + started.elapsed();
        if let Some(end) = end {
            catch_up = catch_up.min(end);
        }
        let events = animation.run_until(catch_up);
        log::trace!("{} events at {:?}", events.len(), animation.now());
        if let Some(e) = animation.document_mut().take_error() {
            animation.stop();
            return Err(e);
        }
    }
    animation.stop();
    Ok(())
}
