//! Terrain configuration and assembly

use crate::displace::{displace, SampleMapping};
use crate::grid::GridMesh;
use crate::heightmap::HeightField;
use crate::normals::recompute_normals;
use crate::renderable::{RenderableMesh, Vertex};
use alentejo_core::{RasterImage, Result, Transform, Vec3};
use alentejo_texture::{generate, Texture, TextureParams};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Lays the XY grid flat: local +Z (elevation) becomes world +Y
const ORIENTATION_DEGREES: Vec3 = Vec3::new(-90.0, 0.0, 0.0);

/// Geometry parameters for a heightmap terrain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// World-space X extent
    pub width: f32,
    /// World-space Z extent
    pub height: f32,
    /// Cells per grid edge (vertices per edge = segments + 1)
    pub segments: u32,
    /// Elevation of a pure-white heightmap pixel
    pub height_scale: f32,
    /// How vertices are matched to heightmap pixels
    pub mapping: SampleMapping,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 255.0,
            height: 255.0,
            segments: 504,
            height_scale: 30.0,
            mapping: SampleMapping::Grid,
        }
    }
}

/// Diagnostics gathered while building a terrain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Vertices whose heightmap pixel had to be clamped into range
    pub clamped: usize,
    /// Vertices whose normal fell back to the up axis
    pub degenerate: usize,
}

/// A displaced, textured, horizontally oriented terrain mesh
#[derive(Debug, Clone)]
pub struct Terrain {
    mesh: GridMesh,
    stats: BuildStats,
    texture: Texture,
    texture_params: TextureParams,
    transform: Transform,
}

impl Terrain {
    /// Run the full pipeline: flat grid, heightmap sampling, displacement,
    /// normal recomputation, ground texture synthesis, then orientation.
    ///
    /// Fails before touching any geometry if the heightmap is unusable.
    pub fn build<R: Rng>(
        config: &TerrainConfig,
        heightmap: &RasterImage,
        texture_params: &TextureParams,
        rng: &mut R,
    ) -> Result<Self> {
        let field = HeightField::sample(heightmap)?;
        let mut mesh = GridMesh::flat(config.width, config.height, config.segments)?;

        let stats = displace(&mut mesh, &field, config.height_scale, config.mapping)?;
        let degenerate = recompute_normals(&mut mesh);
        let texture = Texture::repeating(generate(texture_params, rng)?);

        tracing::debug!(
            vertices = mesh.vertex_count(),
            indices = mesh.indices().len(),
            clamped = stats.clamped,
            degenerate,
            "built terrain"
        );

        Ok(Self {
            mesh,
            stats: BuildStats {
                clamped: stats.clamped,
                degenerate,
            },
            texture,
            texture_params: texture_params.clone(),
            transform: Transform::IDENTITY.with_rotation(ORIENTATION_DEGREES),
        })
    }

    pub fn mesh(&self) -> &GridMesh {
        &self.mesh
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn texture_params(&self) -> &TextureParams {
        &self.texture_params
    }

    /// Synthesize a fresh ground texture and swap it in. Geometry is untouched.
    /// Returns true if the new image differs from the old one.
    pub fn regenerate_texture<R: Rng>(&mut self, rng: &mut R) -> Result<bool> {
        let image = generate(&self.texture_params, rng)?;
        Ok(self.texture.replace_image(image))
    }

    /// Interleaved vertex data plus borrowed indices and texture
    pub fn renderable(&self) -> RenderableMesh<'_> {
        let vertices = self
            .mesh
            .positions()
            .iter()
            .zip(self.mesh.normals())
            .zip(self.mesh.uvs())
            .map(|((p, n), uv)| Vertex {
                position: p.to_array(),
                normal: n.to_array(),
                uv: *uv,
            })
            .collect();

        RenderableMesh {
            vertices,
            indices: self.mesh.indices(),
            transform: self.transform,
            texture: &self.texture,
        }
    }

    /// World-space elevation at `(x, z)`, bilinearly interpolated between
    /// the surrounding grid vertices. `None` outside the terrain footprint.
    pub fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        let segments = self.mesh.segments as f32;
        let cell_w = self.mesh.width / segments;
        let cell_h = self.mesh.height / segments;

        // World +Z runs along local -Y, i.e. down the grid rows
        let fx = (x + self.mesh.width / 2.0) / cell_w;
        let fy = (z + self.mesh.height / 2.0) / cell_h;
        if !(0.0..=segments).contains(&fx) || !(0.0..=segments).contains(&fy) {
            return None;
        }

        let last = self.mesh.segments - 1;
        let c0 = (fx.floor() as u32).min(last);
        let r0 = (fy.floor() as u32).min(last);
        let tx = fx - c0 as f32;
        let ty = fy - r0 as f32;

        let h00 = self.mesh.elevation_at(c0, r0);
        let h10 = self.mesh.elevation_at(c0 + 1, r0);
        let h01 = self.mesh.elevation_at(c0, r0 + 1);
        let h11 = self.mesh.elevation_at(c0 + 1, r0 + 1);

        let h0 = h00 * (1.0 - tx) + h10 * tx;
        let h1 = h01 * (1.0 - tx) + h11 * tx;
        Some(h0 * (1.0 - ty) + h1 * ty)
    }

    /// World-space AABB as (min, max)
    pub fn bounds(&self) -> ([f32; 3], [f32; 3]) {
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for p in self.mesh.positions() {
            let w = self.transform.transform_point(*p).to_array();
            for i in 0..3 {
                min[i] = min[i].min(w[i]);
                max[i] = max[i].max(w[i]);
            }
        }
        (min, max)
    }
}

/// Build a terrain with the default ground texture, drawing texture
/// randomness from the system entropy source.
pub fn build_terrain(
    width: f32,
    height: f32,
    segments: u32,
    heightmap: &RasterImage,
    height_scale: f32,
) -> Result<Terrain> {
    let config = TerrainConfig {
        width,
        height,
        segments,
        height_scale,
        ..TerrainConfig::default()
    };
    Terrain::build(&config, heightmap, &TextureParams::ground(), &mut rand::rng())
}
