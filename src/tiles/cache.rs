use crate::core::config::TileConfig;
use crate::core::geo::Point;
use crate::tiles::image::TileImage;
use crate::Result;
use std::path::{Path, PathBuf};

/// Naming scheme of the on-disk tile cache.
///
/// One bitmap per region and zoom tier:
/// `<root>/<zoom>/r.<regionX>.<regionZ>.<ext>`. The tier directories are
/// written by the renderer; this side only reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLayout {
    root: PathBuf,
    extension: String,
}

impl CacheLayout {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    /// Layout of the configured cache, or `None` when no cache is set up.
    pub fn from_config(config: &TileConfig) -> Option<Self> {
        config
            .cache_root()
            .map(|root| Self::new(root, config.image_extension.clone()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding every tile of one zoom tier.
    pub fn zoom_dir(&self, zoom: u32) -> PathBuf {
        self.root.join(zoom.to_string())
    }

    pub fn file_name(&self, region: Point) -> String {
        format!("r.{}.{}.{}", region.x, region.z, self.extension)
    }

    /// Path of the cached bitmap for `region` at tier `zoom`.
    pub fn tile_path(&self, region: Point, zoom: u32) -> PathBuf {
        self.zoom_dir(zoom).join(self.file_name(region))
    }

    pub fn is_cached(&self, region: Point, zoom: u32) -> bool {
        self.tile_path(region, zoom).is_file()
    }
}

/// Reads and decodes one cached tile bitmap.
///
/// A missing file surfaces as [`crate::TileError::Io`], a corrupt one as
/// [`crate::TileError::Decode`]; nothing is kept from a failed read.
pub fn read_cached_image(path: &Path) -> Result<TileImage> {
    let bytes = std::fs::read(path)?;
    TileImage::decode(&bytes)
}
