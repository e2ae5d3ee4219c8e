//! Heightmap inspection command

use alentejo_core::RasterImage;
use alentejo_terrain::HeightField;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(image: &Path, output: Option<&Path>) -> Result<()> {
    let raster = RasterImage::open(image)
        .with_context(|| format!("Failed to load heightmap {}", image.display()))?;
    let field = HeightField::sample(&raster).context("Failed to sample heightmap")?;
    let (lo, hi) = field.range();

    println!("Heightmap: {}", image.display());
    println!("Size:      {}x{} ({} samples)", field.width, field.height, field.len());
    println!("Range:     {:.4} .. {:.4}", lo, hi);
    println!("Mean:      {:.4}", field.mean());

    if let Some(path) = output {
        field
            .to_preview()?
            .save_png(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Preview written to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_round_trips_through_png() {
        let dir = std::env::temp_dir().join(format!("alentejo_hf_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let source = dir.join("map.png");
        let preview = dir.join("preview.png");

        let mut img = RasterImage::new(3, 3, [0, 0, 0, 255]).unwrap();
        img.set_pixel(1, 1, [255, 40, 40, 255]);
        img.save_png(&source).unwrap();

        run(&source, Some(&preview)).unwrap();

        let out = RasterImage::open(&preview).unwrap();
        assert_eq!((out.width(), out.height()), (3, 3));
        // Only the red channel counts; the preview is grayscale
        assert_eq!(out.pixel(1, 1), [255, 255, 255, 255]);
        assert_eq!(out.pixel(0, 0), [0, 0, 0, 255]);

        std::fs::remove_dir_all(&dir).ok();
    }
}
