//! Named palettes of face values.
//!
//! A palette is the pool a round's faces are drawn from. The built-in
//! palettes are CSS colour names; two of them are chosen to be
//! distinguishable with common forms of colour blindness. User palettes
//! smaller than the pair count are rejected by the deck builder rather than
//! dealt short.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::FaceValue;
use crate::core::ConfigError;

/// Palette selected when nothing else is configured.
pub const DEFAULT_PALETTE: &str = "COLORBLIND1";

/// A named set of face values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Registry key (upper case).
    pub name: String,

    /// Faces in declaration order, without duplicates.
    pub faces: Vec<FaceValue>,
}

impl Palette {
    /// Create a palette. Duplicate faces keep their first occurrence.
    pub fn new<I, F>(name: impl Into<String>, faces: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FaceValue>,
    {
        let mut unique: Vec<FaceValue> = Vec::new();
        for face in faces {
            let face = face.into();
            if !unique.contains(&face) {
                unique.push(face);
            }
        }
        Self {
            name: normalize(&name.into()),
            faces: unique,
        }
    }

    /// Number of distinct faces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Can a round with `pair_count` pairs be dealt from this palette?
    #[must_use]
    pub fn supports(&self, pair_count: usize) -> bool {
        pair_count > 0 && self.len() >= pair_count
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Palette lookup by name, remembering registration order.
///
/// ## Example
///
/// ```
/// use memory_match::cards::{Palette, PaletteRegistry};
///
/// let mut registry = PaletteRegistry::builtin();
/// registry.register(Palette::new("mine", ["Red", "Blue"]));
///
/// assert_eq!(registry.get("MINE").unwrap().len(), 2);
/// assert!(registry.get("greens").is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct PaletteRegistry {
    palettes: FxHashMap<String, Palette>,
    order: Vec<String>,
}

impl PaletteRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in palette.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for (name, faces) in BUILTIN_PALETTES {
            registry.register(Palette::new(*name, faces.iter().copied()));
        }
        registry
    }

    /// Register a palette, replacing any palette of the same name.
    pub fn register(&mut self, palette: Palette) {
        if !self.palettes.contains_key(&palette.name) {
            self.order.push(palette.name.clone());
        }
        self.palettes.insert(palette.name.clone(), palette);
    }

    /// Look up a palette (case-insensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Palette> {
        self.palettes.get(&normalize(name))
    }

    /// Look up a palette, failing with `UnknownPalette`.
    pub fn require(&self, name: &str) -> Result<&Palette, ConfigError> {
        self.get(name)
            .ok_or_else(|| ConfigError::UnknownPalette(name.to_string()))
    }

    /// Palette names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Names of palettes large enough for `pair_count` pairs.
    #[must_use]
    pub fn playable(&self, pair_count: usize) -> Vec<&str> {
        self.order
            .iter()
            .filter(|name| self.palettes[name.as_str()].supports(pair_count))
            .map(String::as_str)
            .collect()
    }

    /// The playable palette after `current`, wrapping around.
    ///
    /// `step` of -1 walks backwards.
    #[must_use]
    pub fn cycle(&self, current: &str, pair_count: usize, step: isize) -> Option<&str> {
        let playable = self.playable(pair_count);
        if playable.is_empty() {
            return None;
        }
        let len = playable.len() as isize;
        let key = normalize(current);
        let next = match playable.iter().position(|name| *name == key) {
            Some(pos) => (pos as isize + step).rem_euclid(len),
            None => 0,
        };
        Some(playable[next as usize])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}

/// Built-in palettes: name and CSS colour names.
pub const BUILTIN_PALETTES: &[(&str, &[&str])] = &[
    (
        "COLORBLIND1",
        &["DeepPink", "Black", "GoldenRod", "Teal", "HotPink", "DeepSkyBlue", "Olive", "SpringGreen"],
    ),
    (
        "COLORBLIND2",
        &["Black", "Orange", "DodgerBlue", "MediumSeaGreen", "SteelBlue", "Chocolate", "Orchid", "Yellow"],
    ),
    (
        "GREENS",
        &[
            "AntiqueWhite", "DarkSlateGray", "PowderBlue", "CadetBlue", "GreenYellow", "Chartreuse",
            "LawnGreen", "Aquamarine", "Lime", "LimeGreen", "PaleGreen", "DarkKhaki", "LightGreen",
            "MediumSpringGreen", "SpringGreen", "MediumSeaGreen", "SeaGreen", "ForestGreen", "Green",
            "DarkGreen", "Olive", "YellowGreen", "OliveDrab", "DarkOliveGreen", "MediumAquaMarine",
            "DarkSeaGreen",
        ],
    ),
    (
        "BLUES",
        &[
            "LightSlateGray", "SlateGray", "LightSeaGreen", "DarkCyan", "Teal", "MediumAquaMarine",
            "Aqua", "Cyan", "PaleTurquoise", "Turquoise", "MediumTurquoise", "DarkTurquoise",
            "SteelBlue", "LightBlue", "LightSkyBlue", "SkyBlue", "CornflowerBlue", "DeepSkyBlue",
            "DodgerBlue", "RoyalBlue", "Blue", "MediumBlue", "DarkBlue", "Navy", "MidnightBlue",
        ],
    ),
    (
        "BROWNS",
        &[
            "Cornsilk", "BlanchedAlmond", "Bisque", "NavajoWhite", "Wheat", "BurlyWood", "Tan",
            "DarkGoldenRod", "Peru", "SaddleBrown", "Sienna",
        ],
    ),
    (
        "WHITES",
        &[
            "LightCyan", "Snow", "MintCream", "Azure", "AliceBlue", "GhostWhite", "WhiteSmoke",
            "SeaShell", "Beige", "OldLace", "FloralWhite", "Ivory", "Linen",
        ],
    ),
    (
        "GREYS",
        &["Gainsboro", "Silver", "DarkGray", "DimGray", "Gray", "Black", "#707070", "#999999"],
    ),
    (
        "PINKS",
        &[
            "LavenderBlush", "MistyRose", "Pink", "LightPink", "HotPink", "DeepPink",
            "PaleVioletRed", "MediumVioletRed",
        ],
    ),
    (
        "PURPLES",
        &[
            "RosyBrown", "Lavender", "Thistle", "Plum", "Orchid", "Violet", "LightSteelBlue",
            "Fuchsia", "Magenta", "MediumOrchid", "DarkOrchid", "DarkViolet", "BlueViolet",
            "DarkMagenta", "Purple", "MediumPurple", "MediumSlateBlue", "SlateBlue",
            "DarkSlateBlue", "RebeccaPurple", "Indigo",
        ],
    ),
    (
        "REDS",
        &["Brown", "Maroon", "Salmon", "LightCoral", "IndianRed", "Crimson", "Red", "FireBrick", "DarkRed"],
    ),
    (
        "ORANGES",
        &[
            "AntiqueWhite", "PeachPuff", "SandyBrown", "Chocolate", "Moccasin", "DarkSalmon",
            "LightSalmon", "Orange", "DarkOrange", "Coral", "Tomato", "OrangeRed",
        ],
    ),
    (
        "YELLOWS",
        &[
            "Gold", "Yellow", "LightYellow", "LemonChiffon", "LightGoldenRodYellow", "PapayaWhip",
            "GoldenRod", "PaleGoldenRod", "Khaki", "DarkKhaki",
        ],
    ),
];
