//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Name of the extra-data slot biome hashes are stored in.
pub const DEFAULT_EXTRA_DATA_SLOT: &str = "BiomesAPI.biomeHash";

/// File name of the persisted config inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Biome registry and boundary tracking settings.
    pub biomes: BiomesConfig,
    /// Grass/foliage colour lookup settings.
    pub color: ColorConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// What to do when one end of a movement has biome data and the other does not.
///
/// This usually happens while the chunk being entered is still loading.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum MissingBiomePolicy {
    /// Log a warning and skip the boundary check for this movement.
    #[default]
    Warn,
    /// Treat the mismatch as an error.
    Strict,
}

/// Biome registry configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BiomesConfig {
    /// Name of the host extra-data slot holding biome hashes.
    pub extra_data_slot: String,
    /// Behaviour when biome presence differs across a movement.
    pub missing_biome_policy: MissingBiomePolicy,
    /// Show the current biome in the debug metrics overlay.
    pub metrics_overlay: bool,
}

/// Colour lookup table configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorConfig {
    /// PNG lookup table for grass colours. `None` uses the built-in gradient.
    pub grass_lut: Option<PathBuf>,
    /// PNG lookup table for foliage colours. `None` uses the built-in gradient.
    pub foliage_lut: Option<PathBuf>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Directory for JSON log files.
    pub log_dir: Option<PathBuf>,
    /// Write JSON log files to `log_dir`.
    pub file_logging: bool,
}

// --- Default implementations ---

impl Default for BiomesConfig {
    fn default() -> Self {
        Self {
            extra_data_slot: DEFAULT_EXTRA_DATA_SLOT.to_string(),
            missing_biome_policy: MissingBiomePolicy::Warn,
            metrics_overlay: true,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
            file_logging: cfg!(debug_assertions),
        }
    }
}

// --- Load / Save ---

impl Config {
    /// Default configuration directory (`<platform config dir>/biomes`).
    ///
    /// Falls back to the current directory when the platform has no config dir.
    pub fn default_dir() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("biomes"))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Loads `config.ron` from `config_dir`, writing the defaults there first
    /// if the file does not exist yet.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
                path: config_path.clone(),
                source,
            })?;
        let config = ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: config_path.clone(),
            source,
        })?;
        log::info!("Loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Writes this config to `config_dir/config.ron`, creating the directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path,
            source,
        })
    }
}
