//! Deck building tests.
//!
//! These tests verify the shape and randomness of dealt decks:
//! - Every chosen face appears exactly twice
//! - Seeds reproduce deals
//! - The shuffle is uniform over permutations

use memory_match::cards::{FaceValue, Palette, PaletteRegistry};
use memory_match::core::{ConfigError, GameRng};
use memory_match::deck::{build_deck, Deck};
use proptest::prelude::*;
use rustc_hash::FxHashMap;

fn numbered_palette(size: usize) -> Palette {
    Palette::new("NUMBERS", (0..size).map(|i| format!("Face{i}")))
}

proptest! {
    /// Property: a deck of N pairs has 2N cards, each chosen face twice.
    #[test]
    fn deck_faces_come_in_pairs(
        palette_size in 1usize..40,
        pairs in 1usize..40,
        seed in any::<u64>(),
    ) {
        prop_assume!(pairs <= palette_size);
        let palette = numbered_palette(palette_size);
        let deck = build_deck(&palette, pairs, &mut GameRng::new(seed)).unwrap();

        prop_assert_eq!(deck.len(), 2 * pairs);
        prop_assert_eq!(deck.pair_count(), pairs);
        let counts = deck.face_counts();
        prop_assert_eq!(counts.len(), pairs);
        prop_assert!(counts.values().all(|&n| n == 2));
        prop_assert!(deck.faces().all(|f| palette.faces.contains(f)));
    }

    /// Property: card IDs are dense and in deal order.
    #[test]
    fn card_ids_are_positions(seed in any::<u64>()) {
        let palette = numbered_palette(12);
        let deck = build_deck(&palette, 8, &mut GameRng::new(seed)).unwrap();
        for (i, card) in deck.iter().enumerate() {
            prop_assert_eq!(card.id.index(), i);
            prop_assert!(!card.visibility.is_face_up());
        }
    }

    /// Property: too-small palettes are rejected, never padded.
    #[test]
    fn small_palettes_rejected(palette_size in 0usize..8, extra in 1usize..8) {
        let palette = numbered_palette(palette_size);
        let pairs = palette_size + extra;
        let err = build_deck(&palette, pairs, &mut GameRng::new(1)).unwrap_err();
        prop_assert_eq!(
            err,
            ConfigError::PaletteTooSmall {
                palette: "NUMBERS".to_string(),
                needed: pairs,
                available: palette_size,
            }
        );
    }
}

#[test]
fn test_same_seed_same_deal() {
    let registry = PaletteRegistry::builtin();
    let palette = registry.get("COLORBLIND1").unwrap();

    let a = build_deck(palette, 8, &mut GameRng::new(2024)).unwrap();
    let b = build_deck(palette, 8, &mut GameRng::new(2024)).unwrap();
    let c = build_deck(palette, 8, &mut GameRng::new(2025)).unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_every_builtin_palette_deals() {
    let registry = PaletteRegistry::builtin();
    let mut rng = GameRng::new(7);
    for name in registry.names() {
        let palette = registry.get(name).unwrap();
        let deck = build_deck(palette, 8, &mut rng).unwrap();
        assert_eq!(deck.len(), 16, "{name}");
    }
}

#[test]
fn test_all_faces_used_when_palette_is_exact() {
    let palette = numbered_palette(8);
    let deck = build_deck(&palette, 8, &mut GameRng::new(3)).unwrap();
    for face in &palette.faces {
        assert_eq!(deck.face_counts().get(face), Some(&2));
    }
}

/// Each of the 6 orderings of three items should come up about equally often.
#[test]
fn test_shuffle_is_uniform() {
    const TRIALS: usize = 60_000;
    let mut rng = GameRng::new(99);
    let mut counts: FxHashMap<[u8; 3], usize> = FxHashMap::default();

    for _ in 0..TRIALS {
        let mut items = [0u8, 1, 2];
        rng.shuffle(&mut items);
        *counts.entry(items).or_default() += 1;
    }

    assert_eq!(counts.len(), 6);
    let expected = TRIALS / 6;
    let tolerance = expected / 20;
    for (perm, &n) in &counts {
        assert!(
            n.abs_diff(expected) <= tolerance,
            "{perm:?} came up {n} times, expected about {expected}"
        );
    }
}

/// Every face lands in every position about equally often.
#[test]
fn test_deal_positions_are_uniform() {
    const TRIALS: usize = 20_000;
    let palette = numbered_palette(2);
    let first = FaceValue::from("Face0");
    let mut rng = GameRng::new(5);
    let mut hits = [0usize; 4];

    for _ in 0..TRIALS {
        let deck = build_deck(&palette, 2, &mut rng).unwrap();
        for (i, card) in deck.iter().enumerate() {
            if card.face == first {
                hits[i] += 1;
            }
        }
    }

    // Face0 fills 2 of 4 slots per deal
    let expected = TRIALS / 2;
    for (i, &n) in hits.iter().enumerate() {
        assert!(
            n.abs_diff(expected) <= expected / 20,
            "slot {i}: {n} hits, expected about {expected}"
        );
    }
}

#[test]
fn test_from_faces_validation() {
    assert!(Deck::from_faces(["A", "B", "B", "A"]).is_ok());
    assert_eq!(
        Deck::from_faces(Vec::<&str>::new()).unwrap_err(),
        ConfigError::ZeroPairs
    );
    assert!(matches!(
        Deck::from_faces(["A", "A", "A", "B"]),
        Err(ConfigError::InvalidDeck(_))
    ));
}

#[test]
fn test_deck_serializes() {
    let deck = Deck::from_faces(["Red", "Blue", "Red", "Blue"]).unwrap();
    let json = serde_json::to_string(&deck).unwrap();
    let back: Deck = serde_json::from_str(&json).unwrap();
    assert_eq!(back, deck);
}
