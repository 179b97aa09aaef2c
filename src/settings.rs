//! # Settings
//!
//! Host-side settings with a clear override hierarchy:
//! defaults → config file → CLI flags.
//!
//! Settings live at `~/.memory-match/config.toml`. If missing on first run,
//! a commented-out default is generated so players can discover all options.
//! Round shape and pacing (`GameConfig`) is fixed and not read from here.

use log::{debug, info, warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cards::{Palette, PaletteRegistry, DEFAULT_PALETTE};
use crate::core::{ConfigError, ConfigFileError, GameConfig};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MatchConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub palettes: Vec<PaletteEntry>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_palette: Option<String>,
    pub seed: Option<u64>,
    pub log_level: Option<String>,
}

/// A user-defined palette.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaletteEntry {
    pub name: String,
    pub faces: Vec<String>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Palette selected for the first round.
    pub palette: String,
    /// Deal seed; `None` draws one from entropy.
    pub seed: Option<u64>,
    pub log_level: LevelFilter,
    /// Built-in palettes plus user palettes (user wins on name clash).
    pub palettes: PaletteRegistry,
    pub game: GameConfig,
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.memory-match/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".memory-match").join("config.toml"))
}

/// Load settings from `~/.memory-match/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MatchConfig::default()`.
pub fn load_config() -> Result<MatchConfig, ConfigFileError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(MatchConfig::default());
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(MatchConfig::default());
    }

    load_config_from(&path)
}

/// Load settings from an explicit path. The file must exist.
pub fn load_config_from(path: &Path) -> Result<MatchConfig, ConfigFileError> {
    let contents = fs::read_to_string(path)?;
    let config: MatchConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# memory-match configuration
# All settings are optional. Override hierarchy: defaults -> this file -> CLI flags.

# [general]
# default_palette = "COLORBLIND1"   # any built-in or user palette name
# seed = 42                         # fixed deal seed; random when absent
# log_level = "debug"               # off, error, warn, info, debug, trace

# Built-in palettes: COLORBLIND1, COLORBLIND2, GREENS, BLUES, BROWNS, WHITES,
# GREYS, PINKS, PURPLES, REDS, ORANGES, YELLOWS

# [[palettes]]
# name = "PRIMARY"
# faces = ["Red", "Blue", "Yellow", "Green", "Orange", "Purple", "Black", "White"]
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final settings by collapsing: defaults → config file → CLI.
///
/// Fails if the selected palette is unknown or too small for a round.
pub fn resolve(
    config: &MatchConfig,
    cli_palette: Option<&str>,
    cli_seed: Option<u64>,
) -> Result<ResolvedConfig, ConfigError> {
    let game = GameConfig::default();
    game.validate()?;

    let mut palettes = PaletteRegistry::builtin();
    for entry in &config.palettes {
        palettes.register(Palette::new(entry.name.as_str(), entry.faces.iter().map(String::as_str)));
    }

    // Palette: CLI → config → default
    let requested = cli_palette
        .map(str::to_string)
        .or_else(|| config.general.default_palette.clone())
        .unwrap_or_else(|| DEFAULT_PALETTE.to_string());

    let selected = palettes.require(&requested)?;
    if !selected.supports(game.pair_count) {
        return Err(ConfigError::PaletteTooSmall {
            palette: selected.name.clone(),
            needed: game.pair_count,
            available: selected.len(),
        });
    }
    let palette = selected.name.clone();

    let log_level = match config.general.log_level.as_deref() {
        None => LevelFilter::Debug,
        Some(level) => level.parse().unwrap_or_else(|_| {
            warn!("Unknown log level `{}`, using debug", level);
            LevelFilter::Debug
        }),
    };

    Ok(ResolvedConfig {
        palette,
        seed: cli_seed.or(config.general.seed),
        log_level,
        palettes,
        game,
    })
}
