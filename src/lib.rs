//! # regionmap
//!
//! Tile state engine for an interactive, pannable world map viewer.
//!
//! The world is split into regions of 32×32 chunks (512×512 blocks). Each
//! region is shown as one [`Tile`], whose rendered bitmap is cached on disk
//! per zoom tier. This crate owns the lifecycle of those tiles: coordinate
//! conversions, viewport culling, lazy cache loading and the per-chunk
//! selection ("mark") state used for batch operations.

pub mod core;
#[cfg(feature = "debug")]
pub mod debug;
pub mod prelude;
pub mod spatial;
pub mod tiles;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{Color, LoaderConfig, TileConfig, TileStyle},
    geo::Point,
    viewport::Viewport,
    zoom::zoom_level,
};

pub use crate::spatial::culling::{Culling, ViewBounds};

pub use crate::tiles::{
    cache::CacheLayout,
    image::TileImage,
    loader::{LoadOutcome, LoadRequest, RequestStatus, TileLoader},
    marks::{MarkLevel, MarkState},
    tile::{LoadPlan, LoadStatus, Tile},
};

pub use crate::traits::ViewportProvider;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, TileError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum TileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tile loader has shut down")]
    LoaderClosed,

    #[error("Worker error: {0}")]
    Worker(String),
}
