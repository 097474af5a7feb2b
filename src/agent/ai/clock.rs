// Time budget plumbing for the search
//
// The search never owns a clock. It polls a `TimeLeft` probe at the entry of
// every recursive call and gives up with `Timeout` once the remaining time
// drops below the agent's threshold.

use std::time::{Duration, Instant};

/// Zero-argument probe reporting the milliseconds left in the current turn.
///
/// Must be monotonically non-increasing and free of side effects visible to
/// the search. Closures returning `f64` qualify.
pub trait TimeLeft {
    fn millis_left(&self) -> f64;
}

impl<F> TimeLeft for F
where
    F: Fn() -> f64,
{
    fn millis_left(&self) -> f64 {
        self()
    }
}

/// Wall-clock deadline measured from the moment it was created.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    budget: Duration,
}

impl Deadline {
    pub fn after(budget: Duration) -> Self {
        Self {
            start: Instant::now(),
            budget,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::after(Duration::from_millis(ms))
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl TimeLeft for Deadline {
    /// Goes negative once the budget is overrun.
    fn millis_left(&self) -> f64 {
        self.budget.as_secs_f64() * 1000.0 - self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// Raised when the remaining time falls below the threshold.
///
/// Travels up through every active search frame as an `Err` and is only
/// handled by the depth driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("search deadline reached")]
pub struct Timeout;
