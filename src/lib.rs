//! # memory-match
//!
//! A memory-matching card game engine: a grid of face-down cards is
//! revealed two at a time, matching pairs stay up, and a countdown ends the
//! round if the player is too slow.
//!
//! ## Design Principles
//!
//! 1. **Single Mutator**: `FlipMachine` is the only thing that changes card
//!    visibility or session state. Renderers read the deck; input sources
//!    call `activate`.
//!
//! 2. **Explicit Timers**: The countdown and the mismatch auto-hide are
//!    scheduled tasks with handles, cancelled on reset, driven by a virtual
//!    clock the host advances.
//!
//! 3. **Deterministic Deals**: Decks are shuffled with a seedable ChaCha8
//!    generator, so a seed reproduces a round.
//!
//! ## Modules
//!
//! - `core`: RNG, round configuration, errors
//! - `cards`: Faces, cards, palettes
//! - `deck`: Decks and the deck builder
//! - `session`: The flip state machine, session state, scheduler, notifications
//! - `nav`: Keyboard focus traversal over the grid
//! - `settings`: Config file and CLI resolution
//! - `tui`: Terminal front end (feature `tui`)

pub mod cards;
pub mod core;
pub mod deck;
pub mod nav;
pub mod session;
pub mod settings;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export commonly used types
pub use crate::core::{ConfigError, ConfigFileError, GameConfig, GameRng, GameRngState};

pub use crate::cards::{Card, CardId, FaceValue, Palette, PaletteRegistry, Visibility};

pub use crate::deck::{build_deck, Deck};

pub use crate::session::{
    FlipMachine, FlipOutcome, FlipPhase, GameSession, IgnoreReason, Notification,
    NotificationSink, SessionStatus, TaskHandle, TaskKind,
};

pub use crate::nav::{Direction, GridNavigator};
