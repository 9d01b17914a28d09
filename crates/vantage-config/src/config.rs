//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// LOD optimizer settings.
    pub lod: LodConfig,
    /// Synthetic scene settings.
    pub scene: SceneConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// LOD optimizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LodConfig {
    /// Per-frame polygon budget the optimizer targets.
    pub frame_budget: f32,
    /// Benefit bias (higher = objects favor more detail for the same budget).
    pub lod_bias: f32,
    /// Vertical field of view used for screen-area projection, in degrees.
    pub fov_y_degrees: f32,
    /// Aspect ratio used for screen-area projection.
    pub aspect: f32,
}

/// Settings for the synthetic demo scene.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Number of multi-LOD objects to place.
    pub object_count: u32,
    /// RNG seed for reproducible object placement.
    pub seed: u64,
    /// Half-extent of the cube the objects are scattered in, in meters.
    pub world_extent_m: f32,
    /// Number of frames to simulate.
    pub frame_count: u32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log per-frame LOD histograms in addition to pass totals.
    pub log_lod_histogram: bool,
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            frame_budget: 200_000.0,
            lod_bias: 1.0,
            fov_y_degrees: 60.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            object_count: 500,
            seed: 42,
            world_extent_m: 400.0,
            frame_count: 120,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_lod_histogram: false,
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(|source| {
                ConfigError::Read {
                    path: config_path.clone(),
                    source,
                }
            })?;
            let config: Config = ron::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: config_path.clone(),
                source,
            })?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents =
            std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
                path: config_path.clone(),
                source,
            })?;
        let new_config: Config = ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: config_path.clone(),
            source,
        })?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
