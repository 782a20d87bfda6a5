pub mod cache;
pub mod image;
pub mod loader;
pub mod marks;
pub mod tile;

// Re-exports for convenience
pub use cache::{read_cached_image, CacheLayout};
pub use self::image::TileImage;
#[cfg(feature = "tokio-runtime")]
pub use loader::load_async;
pub use loader::{LoadOutcome, LoadRequest, RequestStatus, TileLoader};
pub use marks::{MarkLevel, MarkState};
pub use tile::{LoadPlan, LoadStatus, Tile};
