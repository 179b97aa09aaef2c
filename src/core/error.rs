//! Error types.
//!
//! The flip state machine never fails: anomalous input is a no-op. Errors
//! only arise when a round is configured (deck construction, palette lookup)
//! or when the config file is read.

use thiserror::Error;

/// A round could not be configured.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A round needs at least one pair.
    #[error("pair count must be at least 1")]
    ZeroPairs,

    /// The palette has fewer distinct faces than pairs requested.
    #[error("palette `{palette}` has {available} distinct faces but {needed} pairs are required")]
    PaletteTooSmall {
        palette: String,
        needed: usize,
        available: usize,
    },

    /// No palette is registered under this name.
    #[error("unknown palette `{0}`")]
    UnknownPalette(String),

    /// A hand-built deck breaks the pair invariant.
    #[error("invalid deck: {0}")]
    InvalidDeck(String),
}

/// The config file could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_too_small_message() {
        let err = ConfigError::PaletteTooSmall {
            palette: "GREYS".to_string(),
            needed: 8,
            available: 5,
        };
        assert_eq!(
            err.to_string(),
            "palette `GREYS` has 5 distinct faces but 8 pairs are required"
        );
    }

    #[test]
    fn test_parse_error_converts() {
        let parse = toml::from_str::<toml::Table>("not = [valid").unwrap_err();
        let err: ConfigFileError = parse.into();
        assert!(err.to_string().starts_with("config parse error"));
    }
}
