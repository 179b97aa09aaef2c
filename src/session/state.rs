//! Per-round session state.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::GameConfig;

/// Outcome state of a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    #[default]
    Playing,
    /// Every pair was found.
    Won,
    /// The countdown ran out.
    TimedOut,
}

impl SessionStatus {
    /// Has the round ended?
    #[must_use]
    pub const fn is_finished(self) -> bool {
        !matches!(self, SessionStatus::Playing)
    }
}

/// Where the flip state machine currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlipPhase {
    /// No card selected.
    Idle,
    /// First card of a pair attempt is face up.
    OneSelected,
    /// A mismatched pair is showing; input is rejected.
    Locked,
    Won,
    TimedOut,
}

/// Mutable state of one round.
///
/// Created fresh by `FlipMachine::start_round` and dropped on reset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    /// First pick of the current pair attempt.
    pub selected: Option<CardId>,

    /// True while a mismatched pair is shown before auto-hide.
    pub input_locked: bool,

    /// Pairs matched so far.
    pub pairs_found: u32,

    /// Countdown value. Drops below zero exactly once, on timeout.
    pub time_remaining: i64,

    pub status: SessionStatus,

    /// Ticks processed this round.
    pub ticks_elapsed: u32,

    /// Has the low-time warning been sent?
    pub low_time_announced: bool,
}

impl GameSession {
    /// Initial session for a round.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            selected: None,
            input_locked: false,
            pairs_found: 0,
            time_remaining: config.starting_time,
            status: SessionStatus::Playing,
            ticks_elapsed: 0,
            low_time_announced: false,
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.status == SessionStatus::Playing
    }

    /// Would an activation be considered at all?
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        self.is_playing() && !self.input_locked
    }

    /// Current phase, derived from the fields.
    #[must_use]
    pub fn phase(&self) -> FlipPhase {
        match self.status {
            SessionStatus::Won => FlipPhase::Won,
            SessionStatus::TimedOut => FlipPhase::TimedOut,
            SessionStatus::Playing if self.input_locked => FlipPhase::Locked,
            SessionStatus::Playing if self.selected.is_some() => FlipPhase::OneSelected,
            SessionStatus::Playing => FlipPhase::Idle,
        }
    }
}
