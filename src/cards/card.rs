//! Cards: identity, hidden face and visibility.
//!
//! A card's face is its hidden identity (a colour name in the built-in
//! palettes). Visibility is the only state that changes during a round and
//! only the flip state machine changes it.

use serde::{Deserialize, Serialize};

/// Position of a card in the deal. Stable for the whole round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Index of this card in the deck.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for CardId {
    fn from(index: usize) -> Self {
        Self(index as u32)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The hidden identity of a card.
///
/// Only equality is meaningful; two cards match when their faces are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaceValue(String);

impl FaceValue {
    /// Create a face value. Surrounding whitespace is dropped.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FaceValue {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for FaceValue {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl std::fmt::Display for FaceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a card is currently shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    /// Face down.
    #[default]
    Hidden,
    /// Face up as part of the current pair attempt.
    Revealed,
    /// Face up for the rest of the round.
    Matched,
}

impl Visibility {
    /// Is the face showing?
    #[must_use]
    pub const fn is_face_up(self) -> bool {
        !matches!(self, Visibility::Hidden)
    }
}

/// A dealt card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Position in the deal.
    pub id: CardId,

    /// Hidden identity.
    pub face: FaceValue,

    /// Current visibility.
    pub visibility: Visibility,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub fn new(id: CardId, face: FaceValue) -> Self {
        Self {
            id,
            face,
            visibility: Visibility::Hidden,
        }
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.visibility == Visibility::Matched
    }

    /// Do these two cards form a pair?
    #[must_use]
    pub fn matches(&self, other: &Card) -> bool {
        self.face == other.face
    }
}
