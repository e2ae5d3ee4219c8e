//! Terrain build command

use super::make_rng;
use crate::config::AlentejoConfig;
use alentejo_core::RasterImage;
use alentejo_terrain::{SampleMapping, Terrain, TerrainConfig};
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::path::PathBuf;

pub struct TerrainArgs {
    pub heightmap: PathBuf,
    pub segments: Option<u32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub scale: Option<f32>,
    pub mapping: Option<String>,
    pub seed: Option<u64>,
    pub texture_out: Option<PathBuf>,
    pub format: String,
}

/// Summary of a built terrain
#[derive(Debug, Serialize)]
pub struct TerrainReport {
    pub heightmap: String,
    pub heightmap_size: [u32; 2],
    pub segments: u32,
    pub vertices: usize,
    pub indices: usize,
    pub vertex_buffer_bytes: usize,
    pub elevation_min: f32,
    pub elevation_max: f32,
    pub bounds_min: [f32; 3],
    pub bounds_max: [f32; 3],
    pub clamped_samples: usize,
    pub degenerate_normals: usize,
    pub non_unit_normals: usize,
    pub texture_hash: String,
}

pub fn run(config: &AlentejoConfig, args: TerrainArgs) -> Result<()> {
    if args.format != "text" && args.format != "json" {
        bail!("unknown format '{}'; valid values: text, json", args.format);
    }

    let terrain_config = resolve_config(&config.terrain, &args)?;
    let heightmap = RasterImage::open(&args.heightmap)
        .with_context(|| format!("Failed to load heightmap {}", args.heightmap.display()))?;

    tracing::info!(
        segments = terrain_config.segments,
        heightmap_width = heightmap.width(),
        heightmap_height = heightmap.height(),
        "building terrain"
    );

    let mut rng = make_rng(args.seed.or(config.seed));
    let terrain = Terrain::build(&terrain_config, &heightmap, &config.ground, &mut rng)
        .context("Failed to build terrain")?;

    if let Some(path) = &args.texture_out {
        terrain
            .texture()
            .image()
            .save_png(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    let report = build_report(&args, &heightmap, &terrain);
    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_text(&report),
    }
    if let Some(path) = &args.texture_out {
        println!("Ground texture written to {}", path.display());
    }
    Ok(())
}

fn resolve_config(base: &TerrainConfig, args: &TerrainArgs) -> Result<TerrainConfig> {
    let mut config = base.clone();
    if let Some(segments) = args.segments {
        config.segments = segments;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(scale) = args.scale {
        config.height_scale = scale;
    }
    if let Some(mapping) = &args.mapping {
        config.mapping = mapping.parse::<SampleMapping>()?;
    }
    Ok(config)
}

fn build_report(args: &TerrainArgs, heightmap: &RasterImage, terrain: &Terrain) -> TerrainReport {
    let mesh = terrain.mesh();
    let renderable = terrain.renderable();
    let (elevation_min, elevation_max) = mesh.elevation_range();
    let (bounds_min, bounds_max) = terrain.bounds();
    let non_unit_normals = mesh
        .normals()
        .iter()
        .filter(|n| (n.length() - 1.0).abs() > 1e-3)
        .count();

    TerrainReport {
        heightmap: args.heightmap.display().to_string(),
        heightmap_size: [heightmap.width(), heightmap.height()],
        segments: mesh.segments,
        vertices: mesh.vertex_count(),
        indices: renderable.index_count() as usize,
        vertex_buffer_bytes: renderable.vertex_bytes().len(),
        elevation_min,
        elevation_max,
        bounds_min,
        bounds_max,
        clamped_samples: terrain.stats().clamped,
        degenerate_normals: terrain.stats().degenerate,
        non_unit_normals,
        texture_hash: terrain.texture().hash().to_prefixed_hex(),
    }
}

fn print_text(report: &TerrainReport) {
    println!(
        "Heightmap: {} ({}x{})",
        report.heightmap, report.heightmap_size[0], report.heightmap_size[1]
    );
    println!("Segments:  {}", report.segments);
    println!("Vertices:  {} ({} bytes)", report.vertices, report.vertex_buffer_bytes);
    println!("Indices:   {}", report.indices);
    println!("Elevation: {:.3} .. {:.3}", report.elevation_min, report.elevation_max);
    println!(
        "Bounds:    [{:.2}, {:.2}, {:.2}] .. [{:.2}, {:.2}, {:.2}]",
        report.bounds_min[0],
        report.bounds_min[1],
        report.bounds_min[2],
        report.bounds_max[0],
        report.bounds_max[1],
        report.bounds_max[2]
    );
    if report.clamped_samples > 0 {
        println!(
            "Clamped:   {} vertices sampled past the heightmap edge",
            report.clamped_samples
        );
    }
    println!(
        "Normals:   {} degenerate, {} not unit length",
        report.degenerate_normals, report.non_unit_normals
    );
    println!("Texture:   {}", report.texture_hash);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> TerrainArgs {
        TerrainArgs {
            heightmap: PathBuf::from("map.png"),
            segments: None,
            width: None,
            height: None,
            scale: None,
            mapping: None,
            seed: None,
            texture_out: None,
            format: "text".to_string(),
        }
    }

    #[test]
    fn cli_flags_override_config() {
        let mut a = args();
        a.segments = Some(8);
        a.scale = Some(2.5);
        a.mapping = Some("linear".to_string());

        let config = resolve_config(&TerrainConfig::default(), &a).unwrap();
        assert_eq!(config.segments, 8);
        assert_eq!(config.height_scale, 2.5);
        assert_eq!(config.mapping, SampleMapping::Linear);
        assert_eq!(config.width, 255.0);
    }

    #[test]
    fn unknown_mapping_rejected() {
        let mut a = args();
        a.mapping = Some("bilinear".to_string());
        assert!(resolve_config(&TerrainConfig::default(), &a).is_err());
    }

    #[test]
    fn report_reflects_the_built_terrain() {
        let mut img = RasterImage::new(3, 3, [0, 0, 0, 255]).unwrap();
        img.set_pixel(1, 1, [255, 255, 255, 255]);
        let config = TerrainConfig {
            width: 30.0,
            height: 30.0,
            segments: 3,
            ..TerrainConfig::default()
        };
        let ground = alentejo_texture::TextureParams::ground().with_size(16);
        let terrain = Terrain::build(&config, &img, &ground, &mut make_rng(Some(1))).unwrap();

        let report = build_report(&args(), &img, &terrain);
        assert_eq!(report.vertices, 16);
        assert_eq!(report.indices, 54);
        // position + normal + uv, 8 floats per vertex
        assert_eq!(report.vertex_buffer_bytes, 16 * 32);
        assert_eq!(report.elevation_max, 30.0);
        assert_eq!(report.non_unit_normals, 0);
        assert!(report.texture_hash.starts_with("sha256:"));
    }
}
