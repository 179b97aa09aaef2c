//! Rounds: the flip state machine, its session state and timers.
//!
//! ## States
//!
//! - `Idle`: no card selected
//! - `OneSelected`: first card face up, waiting for the second pick
//! - `Locked`: a mismatched pair is showing until the hide task fires
//! - `Won` / `TimedOut`: the round is over; only a reset does anything
//!
//! ## Timers
//!
//! The countdown tick and the mismatch auto-hide are tasks on a virtual
//! clock owned by the machine. Hosts call `FlipMachine::advance` with real
//! elapsed time (or `tick` directly); starting a round or resetting cancels
//! the previous round's tasks so orphaned timers cannot keep counting down.

mod machine;
mod notification;
mod scheduler;
mod state;

pub use machine::{FlipMachine, FlipOutcome, IgnoreReason};
pub use notification::{Notification, NotificationSink};
pub use scheduler::{Scheduler, TaskHandle, TaskKind};
pub use state::{FlipPhase, GameSession, SessionStatus};
