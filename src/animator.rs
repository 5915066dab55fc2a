//! Reveal/retract state machine for the site title.
//!
//! The title grows one character per tick until it is fully shown, dwells,
//! shrinks back down to the minimum prefix, dwells again, and repeats forever:
//!
//! ```text
//! letter_count: 1 2 3 4 [5 dwell] 6 … len [len+1 dwell] len … 6 [5 dwell] 6 …
//! ```
//!
//! Everything here is pure. [`tick`] and [`resume`] are plain functions over
//! [`TypingState`], so tests drive them synchronously without any timers.
//! Scheduling the dwell timeout is the caller's job (see [`crate::animation`]).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Target element not found: {0}")]
    TargetMissing(String),
}

/// Direction the reveal length moves on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Forward,
    Backward,
}

impl Step {
    fn apply(self, count: usize) -> usize {
        match self {
            Step::Forward => count + 1,
            Step::Backward => count.saturating_sub(1),
        }
    }
}

/// The two dwell boundaries for a given text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Prefix length at which the lower dwell happens.
    pub minimum_length: usize,
    /// Length of the full text in characters.
    pub text_len: usize,
}

impl Bounds {
    /// Check that the two boundaries are distinct and reachable.
    ///
    /// A minimum of zero would let the retract phase render an empty title,
    /// and a minimum at or above the text length makes both boundary checks
    /// match overlapping counts, so the text would never retract.
    pub fn validate(&self) -> Result<(), AnimationError> {
        if self.minimum_length == 0 {
            return Err(AnimationError::Configuration(
                "minimum_length must be at least 1".into(),
            ));
        }
        if self.minimum_length >= self.text_len {
            return Err(AnimationError::Configuration(format!(
                "minimum_length ({}) must be shorter than the title ({} characters)",
                self.minimum_length, self.text_len
            )));
        }
        Ok(())
    }

    /// One past the full length: reaching it means "fully shown, now wait".
    pub fn upper(&self) -> usize {
        self.text_len + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct TypingState {
    pub letter_count: usize,
    pub step: Step,
    pub waiting: bool,
}

impl Default for TypingState {
    fn default() -> Self {
        Self {
            letter_count: 1,
            step: Step::Forward,
            waiting: false,
        }
    }
}

/// What a single tick asks the host to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A dwell is in progress; nothing changes.
    Idle,
    /// Show the first `len` characters.
    Render { len: usize },
    /// A boundary was hit. Optionally render, then call [`resume`] with
    /// `resume` once the dwell has elapsed.
    Dwell { render: Option<usize>, resume: Step },
}

/// Advance the state machine by one tick.
pub fn tick(state: TypingState, bounds: Bounds) -> (TypingState, TickOutcome) {
    if state.waiting {
        return (state, TickOutcome::Idle);
    }

    if state.letter_count == bounds.minimum_length {
        let next = TypingState {
            waiting: true,
            ..state
        };
        return (
            next,
            TickOutcome::Dwell {
                render: Some(state.letter_count),
                resume: Step::Forward,
            },
        );
    }

    if state.letter_count == bounds.upper() {
        // The full text from the previous tick stays on screen.
        let next = TypingState {
            waiting: true,
            ..state
        };
        return (
            next,
            TickOutcome::Dwell {
                render: None,
                resume: Step::Backward,
            },
        );
    }

    let next = TypingState {
        letter_count: state.step.apply(state.letter_count),
        ..state
    };
    (
        next,
        TickOutcome::Render {
            len: state.letter_count,
        },
    )
}

/// Finish a dwell: take the new direction and move one step along it.
pub fn resume(state: TypingState, step: Step) -> TypingState {
    TypingState {
        letter_count: step.apply(state.letter_count),
        step,
        waiting: false,
    }
}

/// Return the first `len` characters of `text`, clamped to its length.
pub fn prefix(text: &str, len: usize) -> &str {
    match text.char_indices().nth(len) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}

/// A title text bound to its own [`TypingState`].
#[derive(Debug, Clone)]
pub struct TitleAnimator {
    text: String,
    bounds: Bounds,
    state: TypingState,
}

impl TitleAnimator {
    pub fn new(text: impl Into<String>, minimum_length: usize) -> Result<Self, AnimationError> {
        let text = text.into();
        let bounds = Bounds {
            minimum_length,
            text_len: text.chars().count(),
        };
        bounds.validate()?;
        Ok(Self {
            text,
            bounds,
            state: TypingState::default(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn state(&self) -> TypingState {
        self.state
    }

    pub fn prefix(&self, len: usize) -> &str {
        prefix(&self.text, len)
    }

    pub fn tick(&mut self) -> TickOutcome {
        let (state, outcome) = tick(self.state, self.bounds);
        self.state = state;
        outcome
    }

    pub fn end_dwell(&mut self, step: Step) {
        self.state = resume(self.state, step);
    }
}
