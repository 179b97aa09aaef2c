//! Round configuration.
//!
//! `GameConfig` fixes the shape and pacing of a round: how many pairs are
//! dealt, how long the countdown runs, when the low-time warning fires and
//! how the timers are paced. Hosts supply it once; every round started by a
//! `FlipMachine` uses the same values.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::ConfigError;

/// Pairs dealt per round.
pub const DEFAULT_PAIR_COUNT: usize = 8;
/// Countdown start, in ticks.
pub const DEFAULT_STARTING_TIME: i64 = 100;
/// `time_remaining` value that triggers the low-time warning.
pub const DEFAULT_LOW_TIME_THRESHOLD: i64 = 30;
/// How long a mismatched pair stays face up.
pub const DEFAULT_MISMATCH_DELAY_MS: u64 = 500;
/// Countdown cadence.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;
/// Cards per row.
pub const DEFAULT_GRID_WIDTH: usize = 4;

/// Round configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of distinct pairs in play.
    pub pair_count: usize,

    /// Countdown start value.
    pub starting_time: i64,

    /// The low-time notification fires when the countdown reaches this value.
    pub low_time_threshold: i64,

    /// Mismatch reveal delay in milliseconds.
    pub mismatch_delay_ms: u64,

    /// Interval between countdown ticks in milliseconds.
    pub tick_interval_ms: u64,

    /// Cards per grid row (keyboard navigation and layout).
    pub grid_width: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pair_count: DEFAULT_PAIR_COUNT,
            starting_time: DEFAULT_STARTING_TIME,
            low_time_threshold: DEFAULT_LOW_TIME_THRESHOLD,
            mismatch_delay_ms: DEFAULT_MISMATCH_DELAY_MS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            grid_width: DEFAULT_GRID_WIDTH,
        }
    }
}

impl GameConfig {
    /// Set the number of pairs.
    #[must_use]
    pub fn with_pair_count(mut self, pairs: usize) -> Self {
        self.pair_count = pairs;
        self
    }

    /// Set the countdown start.
    #[must_use]
    pub fn with_starting_time(mut self, ticks: i64) -> Self {
        self.starting_time = ticks;
        self
    }

    /// Set the low-time warning threshold.
    #[must_use]
    pub fn with_low_time_threshold(mut self, ticks: i64) -> Self {
        self.low_time_threshold = ticks;
        self
    }

    /// Set the mismatch reveal delay.
    #[must_use]
    pub fn with_mismatch_delay_ms(mut self, ms: u64) -> Self {
        self.mismatch_delay_ms = ms;
        self
    }

    /// Set the tick cadence.
    #[must_use]
    pub fn with_tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// Set the grid width.
    #[must_use]
    pub fn with_grid_width(mut self, width: usize) -> Self {
        self.grid_width = width;
        self
    }

    /// Total cards dealt per round.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.pair_count * 2
    }

    #[must_use]
    pub fn mismatch_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_delay_ms)
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Reject configurations no round could be played with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pair_count == 0 {
            return Err(ConfigError::ZeroPairs);
        }
        Ok(())
    }
}
