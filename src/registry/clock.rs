//! The registry's notion of "now".
//!
//! Deletion guards and the status view compare timestamps against the
//! current instant at call time; the clock seam lets tests move that
//! instant around instead of waiting for it.

use std::{cell::Cell, rc::Rc};

use chrono::{DateTime, Utc};

/// A source of the current instant.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test can hold one handle while the
/// registry holds another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    instant: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    /// Creates a clock frozen at `instant`.
    #[must_use]
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self {
            instant: Rc::new(Cell::new(instant)),
        }
    }

    /// Moves the clock to `instant`, in any direction.
    pub fn set(&self, instant: DateTime<Utc>) {
        self.instant.set(instant);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant.get()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::{Clock, ManualClock};

    #[test]
    fn clones_share_the_instant() {
        let clock = ManualClock::new("2024-06-01T09:00:00Z".parse().unwrap());
        let handle = clock.clone();

        handle.set("2024-06-01T13:00:00Z".parse().unwrap());

        assert_eq!(
            clock.now(),
            "2024-06-01T13:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }
}
