//! Prelude module for common regionmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use regionmap::prelude::*;`

pub use crate::core::{
    config::{Color, LoaderConfig, TileConfig, TileStyle},
    constants::{
        CHUNKS_PER_REGION, CHUNK_SIZE_IN_BLOCKS, REGION_SIZE_IN_BLOCKS, REGION_SIZE_IN_CHUNKS,
    },
    geo::Point,
    viewport::Viewport,
    zoom::zoom_level,
};

pub use crate::spatial::culling::Culling;

pub use crate::tiles::{
    cache::CacheLayout,
    image::TileImage,
    loader::{LoadOutcome, LoadRequest, RequestStatus, TileLoader},
    marks::{MarkLevel, MarkState},
    tile::{LoadPlan, LoadStatus, Tile},
};

#[cfg(feature = "tokio-runtime")]
pub use crate::tiles::loader::load_async;

pub use crate::traits::ViewportProvider;

pub use crate::{Result, TileError};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
