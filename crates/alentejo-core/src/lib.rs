//! Alentejo Core - Foundational types for the Alentejo terrain pipeline
//!
//! This crate provides the types every other Alentejo crate depends on:
//! - `RasterImage` - Decoded RGBA8 pixel grids
//! - `ContentHash` - SHA-256 based content hashing
//! - `Transform`, `Vec3`, `Color` - Spatial and color types
//! - Error types and Result alias

mod error;
mod hash;
mod raster;
mod types;

pub use error::{AlentejoError, Result};
pub use hash::ContentHash;
pub use raster::RasterImage;
pub use types::{Color, Transform, Vec3};
