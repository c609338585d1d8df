/*!
 * Simulation Clocks
 * Injectable time source for creation and completion timestamps
 *
 * The engine advances the clock by one unit after every executed cycle, so a
 * logical clock measures turnaround and waiting time in cycles. The wall clock
 * ignores advances and reports real elapsed milliseconds instead.
 */

use super::types::Timestamp;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Time source capability
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    /// Current reading
    fn now(&self) -> Timestamp;

    /// Notify the clock that `units` CPU units have been executed
    fn advance(&self, units: u64);
}

/// Deterministic clock driven by executed cycles
#[derive(Debug, Default)]
pub struct LogicalClock {
    ticks: AtomicU64,
}

impl LogicalClock {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    #[inline]
    #[must_use]
    pub fn starting_at(ticks: Timestamp) -> Self {
        Self {
            ticks: AtomicU64::new(ticks),
        }
    }

    /// Jump to an arbitrary reading
    #[inline]
    pub fn set(&self, ticks: Timestamp) {
        self.ticks.store(ticks, Ordering::SeqCst);
    }
}

impl Clock for LogicalClock {
    #[inline]
    fn now(&self) -> Timestamp {
        self.ticks.load(Ordering::SeqCst)
    }

    #[inline]
    fn advance(&self, units: u64) {
        self.ticks.fetch_add(units, Ordering::SeqCst);
    }
}

/// Wall clock in milliseconds since construction
#[derive(Debug)]
pub struct WallClock {
    origin: Instant,
}

impl WallClock {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn now(&self) -> Timestamp {
        self.origin.elapsed().as_millis() as Timestamp
    }

    fn advance(&self, _units: u64) {}
}
