//! Time management for the simulation
//!
//! The simulation operates in discrete ticks; one tick stands for one second
//! of device time. This module provides deterministic time advancement for
//! the fleet and the hour-based schedule derived from a device's on-time.

use serde::{Deserialize, Serialize};

/// Ticks per simulated hour (one tick = one second)
pub const TICKS_PER_HOUR: u64 = 3600;

/// Length of the automatic filtering cycle, in hours
pub const FILTER_CYCLE_HOURS: u64 = 12;

/// Hours at the start of each cycle during which filtering runs
pub const FILTER_WINDOW_HOURS: u64 = 2;

/// Whether the filtering window is open after `ticks_since_power_on` ticks
///
/// Filtering runs for the first two hours of every twelve-hour cycle,
/// measured from the last power-on.
///
/// # Example
/// ```
/// use spa_simulator_core_rs::core::is_filtering_window;
///
/// assert!(is_filtering_window(0));
/// assert!(!is_filtering_window(2 * 3600));
/// assert!(is_filtering_window(12 * 3600));
/// ```
pub fn is_filtering_window(ticks_since_power_on: u64) -> bool {
    (ticks_since_power_on / TICKS_PER_HOUR) % FILTER_CYCLE_HOURS < FILTER_WINDOW_HOURS
}

/// Counts fleet-level ticks
///
/// The counter advances once per fleet advance, independent of how many
/// devices were powered during that advance.
///
/// # Example
/// ```
/// use spa_simulator_core_rs::TimeManager;
///
/// let mut time = TimeManager::new();
/// assert_eq!(time.current_tick(), 0);
///
/// time.advance_tick();
/// assert_eq!(time.current_tick(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeManager {
    /// Total ticks elapsed since the fleet was initialized
    current_tick: u64,
}

impl TimeManager {
    /// Create a new TimeManager at tick 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance time by one tick
    pub fn advance_tick(&mut self) {
        self.current_tick += 1;
    }

    /// Get the current tick (total ticks since start)
    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filtering_window_edges() {
        assert!(is_filtering_window(TICKS_PER_HOUR * 2 - 1));
        assert!(!is_filtering_window(TICKS_PER_HOUR * 2));
        assert!(!is_filtering_window(TICKS_PER_HOUR * 12 - 1));
        assert!(is_filtering_window(TICKS_PER_HOUR * 12));
        assert!(is_filtering_window(TICKS_PER_HOUR * 25));
    }
}
