//! Renderer-facing mesh output

use alentejo_core::{Transform, Vec3};
use alentejo_texture::Texture;
use bytemuck::{Pod, Zeroable};

/// An interleaved vertex ready for upload as a raw vertex buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Geometry, orientation and surface texture of one drawable mesh.
///
/// Positions and normals are in the mesh's local space; `transform` places
/// them in the world.
pub struct RenderableMesh<'a> {
    pub vertices: Vec<Vertex>,
    pub indices: &'a [u32],
    pub transform: Transform,
    pub texture: &'a Texture,
}

impl RenderableMesh<'_> {
    /// Vertex buffer contents
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer contents (`u32` indices)
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.indices)
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Vertex positions after applying `transform`
    pub fn world_positions(&self) -> Vec<Vec3> {
        self.vertices
            .iter()
            .map(|v| self.transform.transform_point(Vec3::from_array(v.position)))
            .collect()
    }

    /// Vertex normals rotated into world space
    pub fn world_normals(&self) -> Vec<Vec3> {
        self.vertices
            .iter()
            .map(|v| self.transform.transform_direction(Vec3::from_array(v.normal)))
            .collect()
    }
}
