//! Alentejo Terrain - Heightmap-displaced terrain meshes
//!
//! Turns a grayscale heightmap into a textured terrain in five steps: build
//! a flat grid, sample the heightmap into a normalized height field, displace
//! grid elevations, recompute smooth normals, and attach a synthesized ground
//! texture. Outputs raw vertex data (positions, normals, UVs, indices) and
//! leaves GPU upload to the renderer.

pub mod displace;
pub mod grid;
pub mod heightmap;
pub mod normals;
pub mod renderable;
pub mod terrain;

pub use displace::{displace, DisplaceStats, SampleMapping};
pub use grid::GridMesh;
pub use heightmap::HeightField;
pub use normals::{recompute_normals, vertex_normals};
pub use renderable::{RenderableMesh, Vertex};
pub use terrain::{build_terrain, BuildStats, Terrain, TerrainConfig};
