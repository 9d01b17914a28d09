//! Command-line argument parsing for the Vantage LOD runtime.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Vantage command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "vantage", about = "Predictive LOD optimizer runtime")]
pub struct CliArgs {
    /// Per-frame polygon budget.
    #[arg(long)]
    pub budget: Option<f32>,

    /// LOD benefit bias.
    #[arg(long)]
    pub lod_bias: Option<f32>,

    /// Number of objects in the synthetic scene.
    #[arg(long)]
    pub objects: Option<u32>,

    /// RNG seed for object placement.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of frames to simulate.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(budget) = args.budget {
            self.lod.frame_budget = budget;
        }
        if let Some(bias) = args.lod_bias {
            self.lod.lod_bias = bias;
        }
        if let Some(objects) = args.objects {
            self.scene.object_count = objects;
        }
        if let Some(seed) = args.seed {
            self.scene.seed = seed;
        }
        if let Some(frames) = args.frames {
            self.scene.frame_count = frames;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            budget: Some(80_000.0),
            lod_bias: None,
            objects: Some(32),
            seed: None,
            frames: None,
            log_level: None,
            config: None,
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.lod.frame_budget, 80_000.0);
        assert_eq!(config.scene.object_count, 32);
        // Non-overridden fields retain defaults
        assert_eq!(config.lod.lod_bias, 1.0);
        assert_eq!(config.scene.seed, 42);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        let args = CliArgs {
            budget: None,
            lod_bias: None,
            objects: None,
            seed: None,
            frames: None,
            log_level: None,
            config: None,
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config, original);
    }
}
