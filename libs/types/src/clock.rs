//! Entry-priority clocks
//!
//! The book stamps each accepted order with a monotonically increasing
//! priority. The clock is injected so tests can build deterministic arrival
//! orderings without depending on wall time.

use chrono::Utc;

/// Source of entry priorities
pub trait PriorityClock {
    /// Next priority; never less than any value returned before
    fn next_priority(&mut self) -> u64;
}

/// Deterministic counter
#[derive(Debug, Clone)]
pub struct LogicalClock {
    next: u64,
}

impl LogicalClock {
    /// Create a clock whose first tick is `start`
    pub fn starting_at(start: u64) -> Self {
        Self { next: start }
    }

    /// Peek at the value the next tick will return
    pub fn peek(&self) -> u64 {
        self.next
    }
}

impl Default for LogicalClock {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl PriorityClock for LogicalClock {
    fn next_priority(&mut self) -> u64 {
        let priority = self.next;
        // Saturated ticks tie, and ties keep arrival order in a level
        self.next = self.next.saturating_add(1);
        priority
    }
}

/// Wall clock in Unix nanos
///
/// Two orders stamped within the same nanosecond (or across a backwards clock
/// step) still get strictly increasing priorities.
#[derive(Debug, Clone, Default)]
pub struct WallClock {
    last: u64,
}

impl WallClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PriorityClock for WallClock {
    fn next_priority(&mut self) -> u64 {
        let now = Utc::now()
            .timestamp_nanos_opt()
            .and_then(|nanos| u64::try_from(nanos).ok())
            .unwrap_or(0);
        self.last = now.max(self.last.saturating_add(1));
        self.last
    }
}

impl<C: PriorityClock + ?Sized> PriorityClock for Box<C> {
    fn next_priority(&mut self) -> u64 {
        (**self).next_priority()
    }
}
