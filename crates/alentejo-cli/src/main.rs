//! Alentejo CLI - Headless texture and terrain generation

mod commands;
mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{heightfield, terrain, texture};
use config::AlentejoConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "alentejo")]
#[command(about = "Procedural textures and heightmap terrains", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./alentejo.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log pipeline diagnostics at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize a ground or sky texture and write it as PNG
    Texture {
        /// Texture kind (ground or sky)
        #[arg(long, default_value = "ground")]
        kind: String,

        /// Edge length in pixels
        #[arg(long)]
        size: Option<u32>,

        /// Number of dots or stars
        #[arg(long)]
        points: Option<u32>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Output image path
        #[arg(short, long, default_value = "texture.png")]
        output: PathBuf,
    },

    /// Build a displaced terrain from a heightmap and report on it
    Terrain {
        /// Grayscale heightmap image
        heightmap: PathBuf,

        /// Cells per grid edge
        #[arg(long)]
        segments: Option<u32>,

        /// World-space X extent
        #[arg(long)]
        width: Option<f32>,

        /// World-space Z extent
        #[arg(long)]
        height: Option<f32>,

        /// Elevation of a pure-white pixel
        #[arg(long)]
        scale: Option<f32>,

        /// Vertex-to-pixel mapping (grid or linear)
        #[arg(long)]
        mapping: Option<String>,

        /// Seed for the ground texture
        #[arg(long)]
        seed: Option<u64>,

        /// Also write the ground texture to this path
        #[arg(long)]
        texture_out: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Decode a heightmap and report its height field statistics
    Heightfield {
        /// Grayscale heightmap image
        image: PathBuf,

        /// Write a grayscale preview of the decoded field
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = AlentejoConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Commands::Texture {
            kind,
            size,
            points,
            seed,
            output,
        } => texture::run(
            &config,
            texture::TextureArgs {
                kind,
                size,
                points,
                seed,
                output,
            },
        ),
        Commands::Terrain {
            heightmap,
            segments,
            width,
            height,
            scale,
            mapping,
            seed,
            texture_out,
            format,
        } => terrain::run(
            &config,
            terrain::TerrainArgs {
                heightmap,
                segments,
                width,
                height,
                scale,
                mapping,
                seed,
                texture_out,
                format,
            },
        ),
        Commands::Heightfield { image, output } => heightfield::run(&image, output.as_deref()),
    }
}
