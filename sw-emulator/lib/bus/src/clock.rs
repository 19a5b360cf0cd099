/*++

Licensed under the Apache-2.0 license.

File Name:

    clock.rs

Abstract:

    File contains Clock and Timer types. The clock counts simulated cycles;
    peripherals hold a Timer clone and read the current cycle from it when
    they are polled, catching up however many cycles have elapsed since
    their last poll.

--*/

use std::cell::Cell;
use std::rc::Rc;

struct ClockImpl {
    now: Cell<u64>,
}

/// Simulated clock, owned by the bus owner (typically the hardware model).
#[derive(Clone)]
pub struct Clock {
    clock: Rc<ClockImpl>,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    /// Constructs a new Clock with the cycle counter set to 0.
    pub fn new() -> Self {
        Self {
            clock: Rc::new(ClockImpl { now: Cell::new(0) }),
        }
    }

    /// Returns the number of simulated clock cycles that have elapsed since
    /// simulation start.
    #[inline]
    pub fn now(&self) -> u64 {
        self.clock.now.get()
    }

    /// Advance the clock by `cycles`.
    pub fn increment(&self, cycles: u64) {
        self.clock.now.set(self.clock.now.get().wrapping_add(cycles));
    }

    /// Constructs a `Timer` associated with this clock.
    pub fn timer(&self) -> Timer {
        Timer {
            clock: Rc::clone(&self.clock),
        }
    }
}

/// Read-only view of a [`Clock`], held by peripherals.
#[derive(Clone)]
pub struct Timer {
    clock: Rc<ClockImpl>,
}

impl Timer {
    /// Returns the current time: the number of clock cycles that have elapsed
    /// since simulation start.
    #[inline]
    pub fn now(&self) -> u64 {
        self.clock.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment() {
        let clock = Clock::new();
        assert_eq!(clock.now(), 0);
        clock.increment(1);
        clock.increment(41);
        assert_eq!(clock.now(), 42);
    }

    #[test]
    fn test_timer_tracks_clock() {
        let clock = Clock::new();
        let timer = clock.timer();
        clock.increment(100);
        assert_eq!(timer.now(), 100);
        let clone = clock.clone();
        clone.increment(1);
        assert_eq!(timer.now(), 101);
    }
}
