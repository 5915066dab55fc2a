//! Runs the title animator and the cursor blinker against a [`Document`].
//!
//! ```text
//!  Timers ── TypingTick ──▶ TitleAnimator ──▶ set_text_content(title)
//!     │  └── DwellEnd ────▶ TitleAnimator (resume)
//!     └───── CursorTick ──▶ CursorBlinker ──▶ set_class_name(cursor)
//! ```
//!
//! Time is virtual: the owner calls [`Animation::advance`] (tests, traces) or
//! [`Animation::run_until`] from a real-time loop ([`crate::terminal`]).
//! Every call returns the [`Event`]s it produced so hosts and tests can check
//! the two timers independently.

use crate::animator::{AnimationError, Step, TickOutcome, TitleAnimator, TypingState};
use crate::config::{AnimationConfig, TargetsConfig};
use crate::cursor::CursorBlinker;
use crate::document::{Document, Selector};
use crate::timer::{TimerId, Timers};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Job {
    TypingTick,
    DwellEnd(Step),
    CursorTick,
}

/// Something observable the animation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    /// Virtual time since start, in milliseconds.
    pub at_ms: u64,
    #[serde(flatten)]
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventKind {
    /// The title now shows this prefix.
    Title { text: String },
    /// A boundary was reached; the title is frozen until `DwellEnd`.
    DwellStart { letter_count: usize },
    DwellEnd { step: Step, letter_count: usize },
    /// The cursor changed state.
    Cursor { visible: bool },
}

#[derive(Debug)]
struct Handles {
    typing: TimerId,
    cursor: TimerId,
    dwell: Option<TimerId>,
}

/// A running title animation bound to one document.
#[derive(Debug)]
pub struct Animation<D> {
    document: D,
    title: Selector,
    cursor_target: Selector,
    animator: TitleAnimator,
    cursor: CursorBlinker,
    typing_interval: Duration,
    timers: Timers<Job>,
    handles: Option<Handles>,
}

impl<D: Document> Animation<D> {
    /// Capture the title text and arm both timers.
    ///
    /// Fails if either target element is missing, if any period is zero, or
    /// if `minimum_length` is not shorter than the title.
    pub fn start(
        document: D,
        config: &AnimationConfig,
        targets: &TargetsConfig,
    ) -> Result<Self, AnimationError> {
        for (key, value) in [
            ("typing_speed_ms", config.typing_speed_ms),
            ("typing_interval_ms", config.typing_interval_ms),
            ("cursor_blink_ms", config.cursor_blink_ms),
        ] {
            if value == 0 {
                return Err(AnimationError::Configuration(format!(
                    "{key} must be positive"
                )));
            }
        }

        let title = targets.title();
        let cursor_target = targets.cursor();
        let text = document
            .text_content(&title)
            .ok_or_else(|| AnimationError::TargetMissing(title.to_string()))?;
        if !document.contains(&cursor_target) {
            return Err(AnimationError::TargetMissing(cursor_target.to_string()));
        }

        let animator = TitleAnimator::new(text, config.minimum_length)?;
        let mut timers = Timers::new();
        let typing = timers.set_interval(config.typing_speed(), Job::TypingTick);
        let cursor = timers.set_interval(config.cursor_blink(), Job::CursorTick);
        log::debug!(
            "animating {:?} ({} chars) every {:?}, cursor every {:?}",
            animator.text(),
            animator.bounds().text_len,
            config.typing_speed(),
            config.cursor_blink()
        );

        Ok(Self {
            document,
            title,
            cursor_target,
            animator,
            cursor: CursorBlinker::new(&targets.cursor_class, &targets.hidden_class),
            typing_interval: config.typing_interval(),
            timers,
            handles: Some(Handles {
                typing,
                cursor,
                dwell: None,
            }),
        })
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }

    pub fn state(&self) -> TypingState {
        self.animator.state()
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor.is_visible()
    }

    /// Virtual time since start.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// When the next timer fires, or `None` once stopped.
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.next_due()
    }

    pub fn is_running(&self) -> bool {
        self.handles.is_some()
    }

    pub fn has_pending_dwell(&self) -> bool {
        self.handles.as_ref().is_some_and(|h| h.dwell.is_some())
    }

    /// Advance virtual time by `elapsed`, firing everything that comes due.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Event> {
        let deadline = self.timers.now() + elapsed;
        self.run_until(deadline)
    }

    /// Fire every timer due at or before `deadline` and move the clock there.
    pub fn run_until(&mut self, deadline: Duration) -> Vec<Event> {
        let mut events = Vec::new();
        while let Some(fired) = self.timers.pop_due(deadline) {
            let at_ms = fired.at.as_millis() as u64;
            match fired.tag {
                Job::TypingTick => self.on_typing_tick(at_ms, &mut events),
                Job::DwellEnd(step) => {
                    if let Some(handles) = self.handles.as_mut() {
                        handles.dwell = None;
                    }
                    self.animator.end_dwell(step);
                    log::trace!("dwell over, now {:?}", self.animator.state());
                    events.push(Event {
                        at_ms,
                        kind: EventKind::DwellEnd {
                            step,
                            letter_count: self.animator.state().letter_count,
                        },
                    });
                }
                Job::CursorTick => {
                    let class_name = self.cursor.toggle();
                    self.document.set_class_name(&self.cursor_target, class_name);
                    events.push(Event {
                        at_ms,
                        kind: EventKind::Cursor {
                            visible: self.cursor.is_visible(),
                        },
                    });
                }
            }
        }
        self.timers.advance_to(deadline);
        events
    }

    fn on_typing_tick(&mut self, at_ms: u64, events: &mut Vec<Event>) {
        match self.animator.tick() {
            TickOutcome::Idle => {}
            TickOutcome::Render { len } => events.push(self.render(at_ms, len)),
            TickOutcome::Dwell { render, resume } => {
                if let Some(len) = render {
                    events.push(self.render(at_ms, len));
                }
                let letter_count = self.animator.state().letter_count;
                events.push(Event {
                    at_ms,
                    kind: EventKind::DwellStart { letter_count },
                });
                let dwell = self
                    .timers
                    .set_timeout(self.typing_interval, Job::DwellEnd(resume));
                if let Some(handles) = self.handles.as_mut() {
                    // A tick cannot dwell while another dwell is pending.
                    debug_assert!(handles.dwell.is_none());
                    handles.dwell = Some(dwell);
                }
                log::trace!("dwell at {letter_count}, resuming {resume:?}");
            }
        }
    }

    fn render(&mut self, at_ms: u64, len: usize) -> Event {
        let text = self.animator.prefix(len).to_string();
        self.document.set_text_content(&self.title, &text);
        Event {
            at_ms,
            kind: EventKind::Title { text },
        }
    }

    /// Clear both intervals and any pending dwell. Idempotent.
    pub fn stop(&mut self) {
        if let Some(handles) = self.handles.take() {
            self.timers.clear(handles.typing);
            self.timers.clear(handles.cursor);
            if let Some(dwell) = handles.dwell {
                self.timers.clear(dwell);
            }
            log::debug!("animation stopped at {:?}", self.timers.now());
        }
    }
}
