//! Card system: faces, cards, palettes.
//!
//! ## Key Types
//!
//! - `CardId`: Position of a card in the deal
//! - `FaceValue`: Hidden identity compared for matches
//! - `Visibility`: Hidden, revealed or matched
//! - `Card`: One dealt card
//! - `Palette` / `PaletteRegistry`: Named pools of faces to deal from

pub mod card;
pub mod palette;

pub use card::{Card, CardId, FaceValue, Visibility};
pub use palette::{Palette, PaletteRegistry, BUILTIN_PALETTES, DEFAULT_PALETTE};
