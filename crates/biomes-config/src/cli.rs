//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, MissingBiomePolicy};

/// Biomes demo command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "biomes", about = "Biome registry demo")]
pub struct CliArgs {
    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fail instead of warning when biome data is missing on one side of a move.
    #[arg(long)]
    pub strict: bool,

    /// PNG lookup table for grass colours.
    #[arg(long)]
    pub grass_lut: Option<PathBuf>,

    /// PNG lookup table for foliage colours.
    #[arg(long)]
    pub foliage_lut: Option<PathBuf>,

    /// Number of simulated movement steps.
    #[arg(long, default_value_t = 64)]
    pub steps: u32,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if args.strict {
            self.biomes.missing_biome_policy = MissingBiomePolicy::Strict;
        }
        if let Some(ref path) = args.grass_lut {
            self.color.grass_lut = Some(path.clone());
        }
        if let Some(ref path) = args.foliage_lut {
            self.color.foliage_lut = Some(path.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs::parse_from([
            "biomes",
            "--log-level",
            "trace",
            "--strict",
            "--grass-lut",
            "grass.png",
        ]);
        config.apply_cli_overrides(&args);
        assert_eq!(config.debug.log_level, "trace");
        assert_eq!(
            config.biomes.missing_biome_policy,
            MissingBiomePolicy::Strict
        );
        assert_eq!(config.color.grass_lut, Some(PathBuf::from("grass.png")));
        // Non-overridden fields retain defaults
        assert_eq!(config.color.foliage_lut, None);
        assert_eq!(args.steps, 64);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        let args = CliArgs::parse_from(["biomes"]);
        config.apply_cli_overrides(&args);
        assert_eq!(config, original);
    }
}
