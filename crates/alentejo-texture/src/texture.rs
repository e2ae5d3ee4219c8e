//! Renderer-facing texture objects

use crate::params::TextureParams;
use crate::synth;
use alentejo_core::{ContentHash, RasterImage, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How texture coordinates outside [0, 1] are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    #[default]
    Repeat,
    ClampToEdge,
    MirroredRepeat,
}

impl WrapMode {
    /// Fold a texture coordinate into [0, 1]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            WrapMode::Repeat => t - t.floor(),
            WrapMode::ClampToEdge => t.clamp(0.0, 1.0),
            WrapMode::MirroredRepeat => {
                let period = t.rem_euclid(2.0);
                if period > 1.0 {
                    2.0 - period
                } else {
                    period
                }
            }
        }
    }
}

/// A raster plus the sampling metadata a renderer needs.
///
/// `version` increases every time the image is replaced so renderers can
/// re-upload lazily.
#[derive(Debug, Clone)]
pub struct Texture {
    image: RasterImage,
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
    version: u64,
    hash: ContentHash,
}

impl Texture {
    /// Wrap an image with `Repeat` on both axes
    pub fn repeating(image: RasterImage) -> Self {
        let hash = ContentHash::of_raster(&image);
        Self {
            image,
            wrap_s: WrapMode::Repeat,
            wrap_t: WrapMode::Repeat,
            version: 1,
            hash,
        }
    }

    pub fn image(&self) -> &RasterImage {
        &self.image
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn hash(&self) -> ContentHash {
        self.hash
    }

    /// Swap in a new image. Returns true if the pixels actually changed.
    pub fn replace_image(&mut self, image: RasterImage) -> bool {
        let hash = ContentHash::of_raster(&image);
        let changed = hash != self.hash;
        self.image = image;
        self.hash = hash;
        self.version += 1;
        changed
    }

    /// Nearest-neighbour lookup honoring the wrap modes
    pub fn sample_nearest(&self, u: f32, v: f32) -> [u8; 4] {
        let w = self.image.width();
        let h = self.image.height();
        let x = ((self.wrap_s.apply(u) * w as f32) as u32).min(w - 1);
        let y = ((self.wrap_t.apply(v) * h as f32) as u32).min(h - 1);
        self.image.pixel(x, y)
    }
}

/// Synthesize a texture and wrap it for rendering
pub fn generate_texture<R: Rng>(params: &TextureParams, rng: &mut R) -> Result<Texture> {
    Ok(Texture::repeating(synth::generate(params, rng)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn repeat_wraps_into_unit_range() {
        assert!((WrapMode::Repeat.apply(1.25) - 0.25).abs() < 1e-6);
        assert!((WrapMode::Repeat.apply(-0.25) - 0.75).abs() < 1e-6);
        assert_eq!(WrapMode::ClampToEdge.apply(3.0), 1.0);
        assert!((WrapMode::MirroredRepeat.apply(1.25) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn synthesized_textures_repeat_on_both_axes() {
        let params = TextureParams::ground().with_size(16);
        let tex = generate_texture(&params, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(tex.wrap_s, WrapMode::Repeat);
        assert_eq!(tex.wrap_t, WrapMode::Repeat);
        assert_eq!(tex.version(), 1);
    }

    #[test]
    fn sampling_past_the_edge_wraps_around() {
        let mut img = RasterImage::new(4, 4, [0, 0, 0, 255]).unwrap();
        img.set_pixel(0, 0, [255, 0, 0, 255]);
        let tex = Texture::repeating(img);
        assert_eq!(tex.sample_nearest(1.05, 2.05), [255, 0, 0, 255]);
        assert_eq!(tex.sample_nearest(0.5, 0.5), [0, 0, 0, 255]);
    }

    #[test]
    fn replacing_the_image_bumps_the_version() {
        let params = TextureParams::ground().with_size(32);
        let mut tex = generate_texture(&params, &mut StdRng::seed_from_u64(1)).unwrap();
        let before = tex.hash();

        let next = synth::generate(&params, &mut StdRng::seed_from_u64(2)).unwrap();
        assert!(tex.replace_image(next.clone()));
        assert_eq!(tex.version(), 2);
        assert_ne!(tex.hash(), before);

        assert!(!tex.replace_image(next));
        assert_eq!(tex.version(), 3);
    }
}
