//! Heightmap decoding into normalized height fields

use alentejo_core::{AlentejoError, RasterImage, Result};

/// Row-major scalar heights in [0, 1], one per source pixel
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    heights: Vec<f32>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl HeightField {
    /// Read the red channel of every pixel, normalized by 255.
    ///
    /// Grayscale heightmaps carry the same value in every channel, so red
    /// is as good as luminance and avoids weighting.
    pub fn sample(image: &RasterImage) -> Result<Self> {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(AlentejoError::InvalidImage(format!(
                "heightmap has zero dimension ({}x{})",
                width, height
            )));
        }

        let heights = image.pixels().map(|p| p[0] as f32 / 255.0).collect();
        Ok(Self {
            heights,
            width,
            height,
        })
    }

    /// Create a height field from raw values (for testing and synthetic maps)
    pub fn from_raw(heights: Vec<f32>, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(AlentejoError::InvalidImage(format!(
                "height field has zero dimension ({}x{})",
                width, height
            )));
        }
        if heights.len() != width as usize * height as usize {
            return Err(AlentejoError::InvalidImage(format!(
                "expected {} heights for {}x{}, got {}",
                width as usize * height as usize,
                width,
                height,
                heights.len()
            )));
        }
        Ok(Self {
            heights,
            width,
            height,
        })
    }

    /// Height at pixel `(x, y)`. Panics when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> f32 {
        assert!(x < self.width && y < self.height);
        self.heights[y as usize * self.width as usize + x as usize]
    }

    /// Height at `(x, y)` with both coordinates clamped into the field.
    /// Returns the value and whether clamping was needed.
    pub fn get_clamped(&self, x: u64, y: u64) -> (f32, bool) {
        let cx = x.min(self.width as u64 - 1);
        let cy = y.min(self.height as u64 - 1);
        let clamped = cx != x || cy != y;
        (self.get(cx as u32, cy as u32), clamped)
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Lowest and highest values in the field
    pub fn range(&self) -> (f32, f32) {
        self.heights
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &h| (lo.min(h), hi.max(h)))
    }

    pub fn mean(&self) -> f32 {
        self.heights.iter().sum::<f32>() / self.heights.len() as f32
    }

    /// Render the field back out as an opaque grayscale raster
    pub fn to_preview(&self) -> Result<RasterImage> {
        let data = self
            .heights
            .iter()
            .flat_map(|&h| {
                let v = (h.clamp(0.0, 1.0) * 255.0).round() as u8;
                [v, v, v, 255]
            })
            .collect();
        RasterImage::from_rgba(self.width, self.height, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_image_gives_zero_field() {
        let img = RasterImage::new(5, 3, [0, 0, 0, 255]).unwrap();
        let field = HeightField::sample(&img).unwrap();
        assert_eq!(field.len(), 15);
        assert_eq!(field.range(), (0.0, 0.0));
    }

    #[test]
    fn white_image_gives_unit_field() {
        let img = RasterImage::new(4, 4, [255, 255, 255, 255]).unwrap();
        let field = HeightField::sample(&img).unwrap();
        assert_eq!(field.range(), (1.0, 1.0));
    }

    #[test]
    fn values_stay_in_unit_range_and_follow_red() {
        let data: Vec<u8> = (0..=255u8).flat_map(|v| [v, 255 - v, 7, 255]).collect();
        let img = RasterImage::from_rgba(16, 16, data).unwrap();
        let field = HeightField::sample(&img).unwrap();

        let (lo, hi) = field.range();
        assert!(lo >= 0.0 && hi <= 1.0);
        assert_eq!(field.get(0, 0), 0.0);
        assert_eq!(field.get(15, 15), 1.0);
        assert!((field.get(3, 2) - 35.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn field_is_indexed_row_major() {
        let mut img = RasterImage::new(3, 2, [0, 0, 0, 255]).unwrap();
        img.set_pixel(2, 1, [255, 0, 0, 255]);
        let field = HeightField::sample(&img).unwrap();
        assert_eq!(field.get(2, 1), 1.0);
        assert_eq!(field.get(1, 1), 0.0);
    }

    #[test]
    fn raw_field_rejects_bad_shapes() {
        assert!(matches!(
            HeightField::from_raw(vec![], 0, 0),
            Err(AlentejoError::InvalidImage(_))
        ));
        assert!(HeightField::from_raw(vec![0.0; 5], 2, 2).is_err());
    }

    #[test]
    fn clamped_lookup_reports_out_of_range_reads() {
        let field = HeightField::from_raw(vec![0.0, 0.25, 0.5, 1.0], 2, 2).unwrap();
        assert_eq!(field.get_clamped(1, 1), (1.0, false));
        assert_eq!(field.get_clamped(9, 0), (0.25, true));
        assert_eq!(field.get_clamped(0, 9), (0.5, true));
    }

    #[test]
    fn preview_roundtrips_through_sampling() {
        let field = HeightField::from_raw(vec![0.0, 1.0, 0.2, 0.6], 2, 2).unwrap();
        let again = HeightField::sample(&field.to_preview().unwrap()).unwrap();
        for y in 0..2 {
            for x in 0..2 {
                assert!((field.get(x, y) - again.get(x, y)).abs() < 1.0 / 255.0);
            }
        }
    }
}
