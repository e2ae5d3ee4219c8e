//! Alentejo Texture - Procedural texture synthesis
//!
//! Generates square ground-cover and night-sky rasters from randomized
//! drawing primitives, with no external assets. All randomness comes from a
//! caller-supplied `rand::Rng`, so seeded generators give reproducible output.

pub mod canvas;
pub mod params;
pub mod synth;
pub mod texture;

pub use params::{TextureKind, TextureParams, TextureStyle, DEFAULT_SIZE};
pub use synth::{generate, generate_with_entropy};
pub use texture::{generate_texture, Texture, WrapMode};
