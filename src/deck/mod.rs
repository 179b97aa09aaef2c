//! Decks and the deck builder.
//!
//! A `Deck` is the ordered deal for one round. Every face in it appears on
//! exactly two cards; `Deck::from_faces` checks this for hand-built decks and
//! `build_deck` produces it by construction.

mod builder;

pub use builder::build_deck;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, FaceValue, Visibility};
use crate::core::ConfigError;

/// The ordered deal for one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build a deck from faces in deal order, checking the pair invariant.
    ///
    /// ```
    /// use memory_match::deck::Deck;
    ///
    /// let deck = Deck::from_faces(["A", "B", "A", "B"]).unwrap();
    /// assert_eq!(deck.pair_count(), 2);
    ///
    /// assert!(Deck::from_faces(["A", "B", "A"]).is_err());
    /// ```
    pub fn from_faces<I, F>(faces: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = F>,
        F: Into<FaceValue>,
    {
        let cards: Vec<Card> = faces
            .into_iter()
            .enumerate()
            .map(|(i, face)| Card::new(CardId::from(i), face.into()))
            .collect();

        if cards.is_empty() {
            return Err(ConfigError::ZeroPairs);
        }

        let deck = Self { cards };
        for (face, count) in deck.face_counts() {
            if count != 2 {
                return Err(ConfigError::InvalidDeck(format!(
                    "face `{face}` appears {count} times"
                )));
            }
        }
        Ok(deck)
    }

    /// Wrap already-validated cards. Card IDs must equal their positions.
    pub(crate) fn from_cards(cards: Vec<Card>) -> Self {
        debug_assert!(cards.iter().enumerate().all(|(i, c)| c.id.index() == i));
        Self { cards }
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of pairs dealt.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    /// Get a card by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id.index())
    }

    pub(crate) fn set_visibility(&mut self, id: CardId, visibility: Visibility) {
        if let Some(card) = self.get_mut(id) {
            card.visibility = visibility;
        }
    }

    /// All cards in deal order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Iterate over cards in deal order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Faces in deal order.
    pub fn faces(&self) -> impl Iterator<Item = &FaceValue> {
        self.cards.iter().map(|c| &c.face)
    }

    /// Multiplicity of each face.
    #[must_use]
    pub fn face_counts(&self) -> FxHashMap<&FaceValue, usize> {
        let mut counts: FxHashMap<&FaceValue, usize> = FxHashMap::default();
        for card in &self.cards {
            *counts.entry(&card.face).or_insert(0) += 1;
        }
        counts
    }

    /// Number of cards with the given visibility.
    #[must_use]
    pub fn count_visibility(&self, visibility: Visibility) -> usize {
        self.cards.iter().filter(|c| c.visibility == visibility).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_faces_assigns_positions() {
        let deck = Deck::from_faces(["A", "B", "A", "B"]).unwrap();
        assert_eq!(deck.len(), 4);
        for (i, card) in deck.iter().enumerate() {
            assert_eq!(card.id.index(), i);
            assert_eq!(card.visibility, Visibility::Hidden);
        }
        assert_eq!(deck.get(CardId::new(2)).unwrap().face, FaceValue::new("A"));
        assert!(deck.get(CardId::new(4)).is_none());
    }

    #[test]
    fn test_from_faces_rejects_singleton() {
        let err = Deck::from_faces(["A", "B", "A"]).unwrap_err();
        assert_eq!(err, ConfigError::InvalidDeck("face `B` appears 1 times".to_string()));
    }

    #[test]
    fn test_from_faces_rejects_triple() {
        assert!(matches!(
            Deck::from_faces(["A", "A", "A", "B", "B", "A"]),
            Err(ConfigError::InvalidDeck(_))
        ));
        assert!(Deck::from_faces(["A", "A", "A", "A"]).is_err());
    }

    #[test]
    fn test_from_faces_rejects_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(Deck::from_faces(empty), Err(ConfigError::ZeroPairs));
    }

    #[test]
    fn test_set_visibility() {
        let mut deck = Deck::from_faces(["A", "A"]).unwrap();
        deck.set_visibility(CardId::new(1), Visibility::Matched);
        deck.set_visibility(CardId::new(9), Visibility::Matched);
        assert_eq!(deck.count_visibility(Visibility::Matched), 1);
        assert_eq!(deck.count_visibility(Visibility::Hidden), 1);
    }
}
