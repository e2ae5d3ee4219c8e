//! Texture synthesis command

use super::make_rng;
use crate::config::AlentejoConfig;
use alentejo_core::ContentHash;
use alentejo_texture::{generate, TextureKind, TextureParams};
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct TextureArgs {
    pub kind: String,
    pub size: Option<u32>,
    pub points: Option<u32>,
    pub seed: Option<u64>,
    pub output: PathBuf,
}

pub fn run(config: &AlentejoConfig, args: TextureArgs) -> Result<()> {
    let kind: TextureKind = args.kind.parse()?;
    let params = resolve_params(config, kind, args.size, args.points);

    let mut rng = make_rng(args.seed.or(config.seed));
    let image = generate(&params, &mut rng).context("Failed to synthesize texture")?;
    image
        .save_png(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "Wrote {:?} texture {}x{} ({} points) to {}",
        kind,
        image.width(),
        image.height(),
        params.point_count,
        args.output.display()
    );
    println!("Hash: {}", ContentHash::of_raster(&image));
    Ok(())
}

/// Config-file parameters for `kind`, with command-line overrides on top
fn resolve_params(
    config: &AlentejoConfig,
    kind: TextureKind,
    size: Option<u32>,
    points: Option<u32>,
) -> TextureParams {
    let mut params = match kind {
        TextureKind::Ground => config.ground.clone(),
        TextureKind::Sky => config.sky.clone(),
    };
    if let Some(size) = size {
        params.size = size;
    }
    if let Some(points) = points {
        params.point_count = points;
    }
    params
}
