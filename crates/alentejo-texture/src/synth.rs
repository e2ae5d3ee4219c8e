//! Procedural texture synthesis
//!
//! Both kinds start from a background fill and stamp `point_count` shapes at
//! uniformly random positions. Later shapes simply draw over earlier ones,
//! and edge seams are left as drawn; tiling is the consumer's wrap mode.

use crate::canvas::Canvas;
use crate::params::{TextureParams, TextureStyle};
use alentejo_core::{Color, RasterImage, Result};
use rand::Rng;

/// Peak opacity at the center of a star halo
const GLOW_PEAK: f32 = 0.6;

/// Synthesize a texture, drawing all randomness from `rng`.
///
/// Pass a seeded generator (e.g. `StdRng::seed_from_u64`) for reproducible
/// output; see [`generate_with_entropy`] for the unseeded variant.
pub fn generate<R: Rng>(params: &TextureParams, rng: &mut R) -> Result<RasterImage> {
    params.validate()?;
    let size = params.size;

    let image = match &params.style {
        TextureStyle::Ground { base, palette } => {
            let mut canvas = Canvas::new(size, size, *base)?;
            for _ in 0..params.point_count {
                let color = palette[rng.random_range(0..palette.len())];
                let (x, y) = random_point(rng, size);
                let radius = random_radius(rng, params);
                canvas.fill_circle(x, y, radius, color);
            }
            canvas.into_image()
        }
        TextureStyle::Sky {
            top,
            bottom,
            star,
            glow,
        } => {
            let mut canvas = Canvas::new(size, size, *top)?;
            canvas.vertical_gradient(*top, *bottom);
            for _ in 0..params.point_count {
                let (x, y) = random_point(rng, size);
                let radius = random_radius(rng, params);
                stamp_star(&mut canvas, x, y, radius, *star, *glow);
            }
            canvas.into_image()
        }
    };

    tracing::debug!(
        kind = ?params.kind(),
        size,
        points = params.point_count,
        "synthesized texture"
    );
    Ok(image)
}

/// Synthesize a texture using the thread-local entropy-seeded generator.
/// Every call produces a different image.
pub fn generate_with_entropy(params: &TextureParams) -> Result<RasterImage> {
    generate(params, &mut rand::rng())
}

fn stamp_star(canvas: &mut Canvas, x: f32, y: f32, radius: f32, color: Color, glow: f32) {
    canvas.glow(x, y, radius * glow, color, GLOW_PEAK);
    canvas.fill_circle(x, y, radius, color);
}

fn random_point<R: Rng>(rng: &mut R, size: u32) -> (f32, f32) {
    let extent = size as f32;
    (rng.random::<f32>() * extent, rng.random::<f32>() * extent)
}

fn random_radius<R: Rng>(rng: &mut R, params: &TextureParams) -> f32 {
    params.min_radius + rng.random::<f32>() * (params.max_radius - params.min_radius)
}
