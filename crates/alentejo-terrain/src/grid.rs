//! Flat grid meshes
//!
//! The grid lies in the local XY plane, centered on the origin, with +Z as
//! its normal. Vertices run row by row from the top edge (+Y) downwards and
//! left to right within a row, which matches the top-to-bottom row order
//! of image data.

use alentejo_core::{AlentejoError, Result, Vec3};

/// A regular `(segments + 1) x (segments + 1)` vertex grid with two
/// triangles per cell.
///
/// The index buffer and the planar XY layout are fixed at construction;
/// only elevations (local Z) and normals change afterwards.
#[derive(Debug, Clone)]
pub struct GridMesh {
    /// Extent along local X
    pub width: f32,
    /// Extent along local Y
    pub height: f32,
    /// Number of cells per edge
    pub segments: u32,
    pub(crate) positions: Vec<Vec3>,
    pub(crate) normals: Vec<Vec3>,
    uvs: Vec<[f32; 2]>,
    indices: Vec<u32>,
}

impl GridMesh {
    /// Build a flat grid with every vertex at elevation zero
    pub fn flat(width: f32, height: f32, segments: u32) -> Result<Self> {
        if segments == 0 {
            return Err(AlentejoError::invalid_parameter(
                "segments",
                "must be at least 1",
            ));
        }
        for (name, extent) in [("width", width), ("height", height)] {
            if !extent.is_finite() || extent <= 0.0 {
                return Err(AlentejoError::invalid_parameter(
                    name,
                    format!("must be a positive finite extent, got {}", extent),
                ));
            }
        }
        let columns = segments as u64 + 1;
        if columns * columns > u32::MAX as u64 {
            return Err(AlentejoError::invalid_parameter(
                "segments",
                format!("{} segments overflow a 32-bit index buffer", segments),
            ));
        }

        let verts_per_edge = segments + 1;
        let vert_count = (verts_per_edge * verts_per_edge) as usize;
        let cell_w = width / segments as f32;
        let cell_h = height / segments as f32;

        let mut positions = Vec::with_capacity(vert_count);
        let mut uvs = Vec::with_capacity(vert_count);

        for iy in 0..verts_per_edge {
            let y = height / 2.0 - iy as f32 * cell_h;
            for ix in 0..verts_per_edge {
                let x = ix as f32 * cell_w - width / 2.0;
                positions.push(Vec3::new(x, y, 0.0));
                uvs.push([
                    ix as f32 / segments as f32,
                    1.0 - iy as f32 / segments as f32,
                ]);
            }
        }

        // Two triangles per cell, CCW when viewed from +Z
        let index_count = segments as usize * segments as usize * 6;
        let mut indices = Vec::with_capacity(index_count);

        for iy in 0..segments {
            for ix in 0..segments {
                let a = iy * verts_per_edge + ix;
                let b = a + verts_per_edge;
                let c = b + 1;
                let d = a + 1;

                indices.extend_from_slice(&[a, b, d]);
                indices.extend_from_slice(&[b, c, d]);
            }
        }

        Ok(Self {
            width,
            height,
            segments,
            positions,
            normals: vec![Vec3::Z; vert_count],
            uvs,
            indices,
        })
    }

    /// Vertices per row (and per column)
    pub fn columns(&self) -> u32 {
        self.segments + 1
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// `(column, row)` of vertex `i`
    pub fn grid_coords(&self, i: usize) -> (u32, u32) {
        let columns = self.columns() as usize;
        ((i % columns) as u32, (i / columns) as u32)
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn uvs(&self) -> &[[f32; 2]] {
        &self.uvs
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Local-Z elevation of vertex `i`
    pub fn elevation(&self, i: usize) -> f32 {
        self.positions[i].z
    }

    /// Elevation of the vertex at `(column, row)`
    pub fn elevation_at(&self, column: u32, row: u32) -> f32 {
        self.elevation(row as usize * self.columns() as usize + column as usize)
    }

    /// Put every vertex back on the plane and restore flat normals
    pub fn reset_elevation(&mut self) {
        for p in &mut self.positions {
            p.z = 0.0;
        }
        for n in &mut self.normals {
            *n = Vec3::Z;
        }
    }

    /// Lowest and highest elevation
    pub fn elevation_range(&self) -> (f32, f32) {
        self.positions
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.z), hi.max(p.z)))
    }
}
