//! Game data structures and RON loading.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::error::ConfigError;
use crate::difficulty::DifficultyConfig;
use crate::pool::ITEM_POOL_TAG;

/// Location of the tuning file, relative to the working directory.
pub const GAME_DATA_PATH: &str = "assets/data/game_data.ron";

fn default_spawn_probability() -> f32 {
    0.9
}

fn default_size_range() -> (f32, f32) {
    (1.0, 1.0)
}

fn default_color() -> (f32, f32, f32) {
    (1.0, 1.0, 1.0)
}

/// One weighted visual choice for an obstacle or a collectible.
#[derive(Debug, Clone, Deserialize)]
pub struct SpawnableVariant {
    pub name: String,
    /// Image path under `assets/`. Without one the sprite is a flat square.
    #[serde(default)]
    pub image: Option<String>,
    /// Tint, or the fill colour when there is no image.
    #[serde(default = "default_color")]
    pub color: (f32, f32, f32),
    /// Relative weight in [0, 1].
    #[serde(default = "default_spawn_probability")]
    pub spawn_probability: f32,
    /// Uniform scale range (min, max).
    #[serde(default = "default_size_range")]
    pub size_range: (f32, f32),
}

impl SpawnableVariant {
    pub fn new(name: &str, color: (f32, f32, f32), spawn_probability: f32) -> Self {
        Self {
            name: name.to_string(),
            image: None,
            color,
            spawn_probability,
            size_range: default_size_range(),
        }
    }

    pub fn with_size_range(mut self, min: f32, max: f32) -> Self {
        self.size_range = (min, max);
        self
    }
}

/// Spatial tuning for the layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Inset applied to every edge of the visible area.
    pub spawn_area_padding: f32,
    /// Max random offset from a cell centre. Clamped to the padding.
    pub max_position_offset: f32,
    /// Max random Z rotation in degrees.
    pub max_rotation_offset: f32,
    /// Click radius of an unscaled item.
    pub hit_radius: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spawn_area_padding: 1.0,
            max_position_offset: 0.5,
            max_rotation_offset: 15.0,
            hit_radius: 0.4,
        }
    }
}

/// Pool created at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct PoolDefinition {
    pub tag: String,
    pub initial_capacity: usize,
}

/// All tuning data, loaded from `assets/data/game_data.ron`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameData {
    pub difficulty: DifficultyConfig,
    pub layout: LayoutConfig,
    /// Grass, moss, mushrooms.
    pub obstacle_variants: Vec<SpawnableVariant>,
    /// Flowers.
    pub collectible_variants: Vec<SpawnableVariant>,
    pub pools: Vec<PoolDefinition>,
    /// Fixed layout seed. Random when absent.
    pub seed: Option<u64>,
}

impl Default for GameData {
    fn default() -> Self {
        Self {
            difficulty: DifficultyConfig::default(),
            layout: LayoutConfig::default(),
            obstacle_variants: vec![
                SpawnableVariant::new("grass", (0.25, 0.55, 0.2), 0.9).with_size_range(0.9, 1.2),
                SpawnableVariant::new("moss", (0.3, 0.45, 0.25), 0.6).with_size_range(0.8, 1.1),
                SpawnableVariant::new("shroom", (0.6, 0.4, 0.3), 0.15).with_size_range(0.7, 0.9),
            ],
            collectible_variants: vec![
                SpawnableVariant::new("daisy", (1.0, 1.0, 0.9), 0.9).with_size_range(0.5, 0.7),
                SpawnableVariant::new("tulip", (0.95, 0.3, 0.35), 0.7).with_size_range(0.5, 0.7),
                SpawnableVariant::new("bluebell", (0.45, 0.5, 0.95), 0.5).with_size_range(0.4, 0.6),
            ],
            pools: vec![PoolDefinition {
                tag: ITEM_POOL_TAG.to_string(),
                initial_capacity: 400,
            }],
            seed: None,
        }
    }
}

impl GameData {
    /// Read, parse and validate a game data file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;
        Self::from_ron(&contents, &path.display().to_string())
    }

    /// Parse and validate game data from RON source.
    pub fn from_ron(contents: &str, path: &str) -> Result<Self, ConfigError> {
        let data: GameData = ron::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.to_string(),
            details: e.to_string(),
        })?;
        data.validate()?;
        Ok(data)
    }

    /// Reject values that would make layout generation meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.difficulty;
        let l = &self.layout;
        let tuning = [
            ("base_time_duration", d.base_time_duration),
            ("time_decay_per_level", d.time_decay_per_level),
            ("min_time_duration", d.min_time_duration),
            ("base_grid_cell_size", d.base_grid_cell_size),
            ("min_grid_cell_size", d.min_grid_cell_size),
            ("density_step", d.density_step),
            ("spawn_area_padding", l.spawn_area_padding),
            ("max_position_offset", l.max_position_offset),
            ("max_rotation_offset", l.max_rotation_offset),
            ("hit_radius", l.hit_radius),
        ];
        if let Some((name, value)) = tuning.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::Invalid(format!("{} must be finite, got {}", name, value)));
        }

        if !(d.base_grid_cell_size > 0.0 && d.min_grid_cell_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "grid cell sizes must be positive (base {}, min {})",
                d.base_grid_cell_size, d.min_grid_cell_size
            )));
        }
        if d.min_time_duration < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_time_duration must not be negative, got {}",
                d.min_time_duration
            )));
        }

        if !(0.0..=180.0).contains(&l.max_rotation_offset) {
            return Err(ConfigError::Invalid(format!(
                "max_rotation_offset must be within [0, 180] degrees, got {}",
                l.max_rotation_offset
            )));
        }
        if l.spawn_area_padding < 0.0 || l.max_position_offset < 0.0 || l.hit_radius <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "layout distances out of range (padding {}, offset {}, hit radius {})",
                l.spawn_area_padding, l.max_position_offset, l.hit_radius
            )));
        }

        for (role, variants) in [
            ("obstacle", &self.obstacle_variants),
            ("collectible", &self.collectible_variants),
        ] {
            if variants.is_empty() {
                return Err(ConfigError::Invalid(format!("no {} variants defined", role)));
            }
            for variant in variants {
                if !(0.0..=1.0).contains(&variant.spawn_probability) {
                    return Err(ConfigError::Invalid(format!(
                        "{} variant '{}' has spawn probability {} outside [0, 1]",
                        role, variant.name, variant.spawn_probability
                    )));
                }
                let (min, max) = variant.size_range;
                if !(min > 0.0 && min <= max && max.is_finite()) {
                    return Err(ConfigError::Invalid(format!(
                        "{} variant '{}' has invalid size range ({}, {})",
                        role, variant.name, min, max
                    )));
                }
            }
        }

        Ok(())
    }

    /// Initial capacity configured for a pool tag, if any.
    pub fn pool_capacity(&self, tag: &str) -> Option<usize> {
        self.pools
            .iter()
            .find(|pool| pool.tag == tag)
            .map(|pool| pool.initial_capacity)
    }
}
