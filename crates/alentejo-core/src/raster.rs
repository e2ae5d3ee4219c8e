//! Decoded RGBA8 rasters

use crate::{AlentejoError, Result};
use std::path::Path;

/// A 2D grid of RGBA8 pixels, row-major from the top-left corner.
///
/// Width and height are always non-zero; every constructor rejects empty
/// rasters with [`AlentejoError::InvalidImage`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterImage {
    /// Create a raster filled with a single color
    pub fn new(width: u32, height: u32, fill: [u8; 4]) -> Result<Self> {
        check_dimensions(width, height)?;
        let data = fill
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap raw RGBA8 bytes (4 bytes per pixel, row-major)
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(AlentejoError::InvalidImage(format!(
                "expected {} bytes for {}x{} RGBA, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Decode an encoded image (PNG, JPEG, ...) held in memory
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AlentejoError::InvalidImage(format!("Failed to decode image: {}", e)))?;
        Self::from_dynamic(img)
    }

    /// Load and decode an image file
    pub fn open(path: &Path) -> Result<Self> {
        let img = image::open(path).map_err(|e| {
            AlentejoError::InvalidImage(format!(
                "Failed to load image '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_dynamic(img)
    }

    fn from_dynamic(img: image::DynamicImage) -> Result<Self> {
        let rgba = img.into_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(width, height, rgba.into_raw())
    }

    /// Encode as PNG
    pub fn save_png(&self, path: &Path) -> Result<()> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| AlentejoError::ImageError("Failed to create image buffer".to_string()))?;
        img.save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| AlentejoError::ImageError(format!("Failed to save PNG: {}", e)))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// RGBA of the pixel at `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Overwrite the pixel at `(x, y)`. Panics when out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    /// Raw RGBA8 bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Iterate pixels in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data.chunks_exact(4).map(|p| [p[0], p[1], p[2], p[3]])
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) outside {}x{} raster",
            x,
            y,
            self.width,
            self.height
        );
        (y as usize * self.width as usize + x as usize) * 4
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(AlentejoError::InvalidImage(format!(
            "zero-dimension raster ({}x{})",
            width, height
        )));
    }
    Ok(())
}
