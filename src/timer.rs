//! Virtual-time timer queue.
//!
//! A deterministic stand-in for `setInterval`/`setTimeout`: nothing runs on
//! its own, the owner pulls due timers with [`Timers::pop_due`] and the clock
//! only moves when it does. Real-time hosts (see [`crate::terminal`]) sleep
//! until [`Timers::next_due`] and then pull.
//!
//! ## Ordering
//!
//! Timers fire by due time. Timers due at the same instant fire in the order
//! they were armed; a repeating timer counts as re-armed at the moment it
//! last fired. So a timeout armed at t=50 for t=150 fires before an interval
//! tick re-armed at t=140 for t=150.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Handle returned when a timer is armed; pass it to [`Timers::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// A timer that came due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    pub at: Duration,
    pub tag: T,
}

#[derive(Debug)]
struct Armed<T> {
    id: TimerId,
    period: Option<Duration>,
    tag: T,
}

type Slot = (Duration, u64);

#[derive(Debug)]
pub struct Timers<T> {
    now: Duration,
    next_id: u64,
    next_seq: u64,
    queue: BTreeMap<Slot, Armed<T>>,
    slots: HashMap<TimerId, Slot>,
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            next_seq: 0,
            queue: BTreeMap::new(),
            slots: HashMap::new(),
        }
    }
}

impl<T: Clone> Timers<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Arm a repeating timer whose first tick is one `period` from now.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero; such a timer would fire forever without
    /// the clock moving.
    pub fn set_interval(&mut self, period: Duration, tag: T) -> TimerId {
        assert!(!period.is_zero(), "interval period must be non-zero");
        self.arm(self.now + period, Some(period), tag)
    }

    /// Arm a one-shot timer due `delay` from now.
    pub fn set_timeout(&mut self, delay: Duration, tag: T) -> TimerId {
        self.arm(self.now + delay, None, tag)
    }

    /// Disarm a timer. Returns `false` if it already fired or was cleared.
    pub fn clear(&mut self, id: TimerId) -> bool {
        match self.slots.remove(&id) {
            Some(slot) => {
                self.queue.remove(&slot);
                log::trace!("cleared timer {:?}", id);
                true
            }
            None => false,
        }
    }

    /// Due time of the earliest armed timer.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(due, _)| *due)
    }

    /// Fire the earliest timer due at or before `deadline`.
    ///
    /// The clock moves to the timer's due time. Repeating timers are re-armed
    /// one period later; one-shot timers are forgotten.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<Fired<T>> {
        let slot = *self.queue.keys().next()?;
        if slot.0 > deadline {
            return None;
        }
        let armed = self.queue.remove(&slot)?;
        self.slots.remove(&armed.id);
        self.now = self.now.max(slot.0);

        let fired = Fired {
            at: slot.0,
            tag: armed.tag.clone(),
        };
        if let Some(period) = armed.period {
            let next = (slot.0 + period, self.bump_seq());
            self.slots.insert(armed.id, next);
            self.queue.insert(next, armed);
        }
        Some(fired)
    }

    /// Move the clock forward without firing anything. Never moves it back.
    pub fn advance_to(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }

    fn arm(&mut self, due: Duration, period: Option<Duration>, tag: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let slot = (due, self.bump_seq());
        self.slots.insert(id, slot);
        self.queue.insert(slot, Armed { id, period, tag });
        log::trace!("armed timer {:?} due at {:?}", id, due);
        id
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}
