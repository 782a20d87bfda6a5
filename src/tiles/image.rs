use crate::Result;
use image::RgbaImage;

/// Owned bitmap of a rendered region or of its mark overlay.
///
/// A tile holds its images by value; dropping the tile's handle frees the
/// pixels, so there is nothing to cancel or release by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileImage {
    pixels: RgbaImage,
}

impl TileImage {
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// Decodes a bitmap, guessing the format from its contents.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes)?;
        Ok(Self::new(decoded.to_rgba8()))
    }

    /// A fully transparent bitmap of the given size.
    pub fn blank(width: u32, height: u32) -> Self {
        Self::new(RgbaImage::new(width, height))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_rgba(self) -> RgbaImage {
        self.pixels
    }
}

impl From<RgbaImage> for TileImage {
    fn from(pixels: RgbaImage) -> Self {
        Self::new(pixels)
    }
}
