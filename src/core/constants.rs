//! World grid constants shared by every part of the engine.
//! Keeping them in a single place makes the unit ratios easy to audit.

/// Side length of a chunk, in blocks.
pub const CHUNK_SIZE_IN_BLOCKS: i32 = 16;

/// Side length of a region, in chunks.
pub const REGION_SIZE_IN_CHUNKS: i32 = 32;

/// Side length of a region (and therefore of a tile), in blocks.
pub const REGION_SIZE_IN_BLOCKS: i32 = CHUNK_SIZE_IN_BLOCKS * REGION_SIZE_IN_CHUNKS;

/// Number of chunks contained in one region.
pub const CHUNKS_PER_REGION: usize = (REGION_SIZE_IN_CHUNKS * REGION_SIZE_IN_CHUNKS) as usize;

/// File extension of cached tile bitmaps.
pub const DEFAULT_IMAGE_EXTENSION: &str = "png";

/// Upper bound of the zoom bucketing loop (2^31).
pub const MAX_ZOOM_BUCKET: u32 = 1 << 31;
