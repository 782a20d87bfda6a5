//! Configuration for the tile engine
//!
//! Everything the engine and its rendering collaborators need is passed in
//! through a [`TileConfig`] value: where the tile cache lives, how cached
//! bitmaps are named, the colors used to draw the grid and how many
//! background workers read the cache. Configurations can be built in code or
//! loaded from JSON.

use crate::core::constants::DEFAULT_IMAGE_EXTENSION;
use crate::{Result, TileError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const DARK_GRAY: Color = Color::new(0.662_745_1, 0.662_745_1, 0.662_745_1, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Converts to 8-bit RGBA, clamping out-of-range components.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [c(self.r), c(self.g), c(self.b), c(self.a)]
    }
}

/// Colors and line widths handed to whatever draws tiles and their grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileStyle {
    pub region_grid_color: Color,
    pub chunk_grid_color: Color,
    pub empty_chunk_background_color: Color,
    pub empty_color: Color,
    pub grid_line_width: f64,
}

impl Default for TileStyle {
    fn default() -> Self {
        Self {
            region_grid_color: Color::BLACK,
            chunk_grid_color: Color::DARK_GRAY,
            empty_chunk_background_color: Color::BLACK,
            empty_color: Color::new(0.2, 0.2, 0.2, 1.0),
            grid_line_width: 0.5,
        }
    }
}

/// Background cache reader settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Number of worker threads reading the cache
    pub workers: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self { workers: 4 }
    }
}

impl LoaderConfig {
    pub fn low_resource() -> Self {
        Self { workers: 1 }
    }

    pub fn high_performance() -> Self {
        Self { workers: 16 }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileConfig {
    /// Root of the tile cache. `None` runs the engine without a cache: every
    /// tile loads instantly as an empty placeholder.
    pub cache_dir: Option<PathBuf>,
    /// Extension of cached bitmaps, without the dot
    pub image_extension: String,
    pub style: TileStyle,
    pub loader: LoaderConfig,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            image_extension: DEFAULT_IMAGE_EXTENSION.to_string(),
            style: TileStyle::default(),
            loader: LoaderConfig::default(),
        }
    }
}

impl TileConfig {
    /// Configuration reading tiles from `cache_dir`.
    pub fn with_cache_dir(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: Some(cache_dir.into()),
            ..Self::default()
        }
    }

    /// The cache root, if one is configured.
    pub fn cache_root(&self) -> Option<&Path> {
        self.cache_dir.as_deref()
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: TileConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        log::debug!("loaded tile configuration from {}", path.as_ref().display());
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.image_extension.is_empty() || self.image_extension.contains(|c| matches!(c, '.' | '/' | '\\')) {
            return Err(TileError::Config(format!(
                "invalid image extension {:?}",
                self.image_extension
            )));
        }
        if self.loader.workers == 0 {
            return Err(TileError::Config("loader needs at least one worker".into()));
        }
        if !(self.style.grid_line_width.is_finite() && self.style.grid_line_width >= 0.0) {
            return Err(TileError::Config(format!(
                "invalid grid line width {}",
                self.style.grid_line_width
            )));
        }
        Ok(())
    }
}
