//! Deck construction.

use log::debug;

use super::Deck;
use crate::cards::{Card, CardId, FaceValue, Palette};
use crate::core::{ConfigError, GameRng};

/// Deal a deck of `pair_count` pairs from `palette`.
///
/// 1. Shuffle the palette's distinct faces and keep the first `pair_count`.
/// 2. Duplicate the chosen faces.
/// 3. Shuffle the doubled list so pairs are interleaved.
///
/// Fails with `PaletteTooSmall` when the palette cannot supply enough
/// distinct faces, and with `ZeroPairs` for an empty round.
///
/// ```
/// use memory_match::cards::PaletteRegistry;
/// use memory_match::core::GameRng;
/// use memory_match::deck::build_deck;
///
/// let registry = PaletteRegistry::builtin();
/// let palette = registry.get("GREENS").unwrap();
/// let deck = build_deck(palette, 8, &mut GameRng::new(42)).unwrap();
///
/// assert_eq!(deck.len(), 16);
/// assert!(deck.face_counts().values().all(|&n| n == 2));
/// ```
pub fn build_deck(
    palette: &Palette,
    pair_count: usize,
    rng: &mut GameRng,
) -> Result<Deck, ConfigError> {
    if pair_count == 0 {
        return Err(ConfigError::ZeroPairs);
    }
    if palette.len() < pair_count {
        return Err(ConfigError::PaletteTooSmall {
            palette: palette.name.clone(),
            needed: pair_count,
            available: palette.len(),
        });
    }

    let mut pool: Vec<FaceValue> = palette.faces.clone();
    rng.shuffle(&mut pool);
    pool.truncate(pair_count);

    let mut faces = Vec::with_capacity(pair_count * 2);
    faces.extend_from_slice(&pool);
    faces.extend(pool);
    rng.shuffle(&mut faces);

    debug!(
        "Dealt {} cards from palette {} (seed {})",
        faces.len(),
        palette.name,
        rng.seed()
    );

    let cards = faces
        .into_iter()
        .enumerate()
        .map(|(i, face)| Card::new(CardId::from(i), face))
        .collect();
    Ok(Deck::from_cards(cards))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette(faces: &[&str]) -> Palette {
        Palette::new("test", faces.iter().copied())
    }

    #[test]
    fn test_build_deck_shape() {
        let p = palette(&["A", "B", "C", "D", "E"]);
        let deck = build_deck(&p, 3, &mut GameRng::new(1)).unwrap();

        assert_eq!(deck.len(), 6);
        assert_eq!(deck.pair_count(), 3);
        let counts = deck.face_counts();
        assert_eq!(counts.len(), 3);
        assert!(counts.values().all(|&n| n == 2));
        assert!(counts.keys().all(|face| p.faces.contains(face)));
    }

    #[test]
    fn test_build_deck_uses_whole_palette_when_exact() {
        let p = palette(&["A", "B"]);
        let deck = build_deck(&p, 2, &mut GameRng::new(9)).unwrap();
        let counts = deck.face_counts();
        assert_eq!(counts[&FaceValue::new("A")], 2);
        assert_eq!(counts[&FaceValue::new("B")], 2);
    }

    #[test]
    fn test_build_deck_palette_too_small() {
        let p = palette(&["A", "B", "A"]);
        let err = build_deck(&p, 3, &mut GameRng::new(1)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::PaletteTooSmall {
                palette: "TEST".to_string(),
                needed: 3,
                available: 2,
            }
        );
    }

    #[test]
    fn test_build_deck_zero_pairs() {
        let p = palette(&["A"]);
        assert_eq!(build_deck(&p, 0, &mut GameRng::new(1)), Err(ConfigError::ZeroPairs));
    }

    #[test]
    fn test_build_deck_deterministic() {
        let p = palette(&["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"]);
        let d1 = build_deck(&p, 8, &mut GameRng::new(77)).unwrap();
        let d2 = build_deck(&p, 8, &mut GameRng::new(77)).unwrap();
        assert_eq!(d1, d2);
    }
}
