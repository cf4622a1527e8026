//! Configuration system for the biomes module.
//!
//! Settings persist to disk as RON files. Supports CLI overrides via clap and
//! forward/backward compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BiomesConfig, CONFIG_FILE_NAME, ColorConfig, Config, DEFAULT_EXTRA_DATA_SLOT, DebugConfig,
    MissingBiomePolicy,
};
pub use error::ConfigError;
