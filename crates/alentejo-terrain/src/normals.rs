//! Per-vertex normal recomputation

use crate::grid::GridMesh;
use alentejo_core::Vec3;

/// Area-weighted smooth normals for an indexed triangle list.
///
/// Each face normal is the cross product of its two edges from the first
/// corner, in index order, so counter-clockwise faces point towards the
/// viewer. Face normals are summed into their three corners and the sums
/// normalized. A vertex whose sum vanishes (it only touches zero-area
/// triangles, or none at all) gets `up` instead.
///
/// Returns the normals and the number of vertices that fell back to `up`.
pub fn vertex_normals(positions: &[Vec3], indices: &[u32], up: Vec3) -> (Vec<Vec3>, usize) {
    let mut sums = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let (ia, ib, ic) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let (a, b, c) = (positions[ia], positions[ib], positions[ic]);
        let face = (b - a).cross(&(c - a));
        sums[ia] += face;
        sums[ib] += face;
        sums[ic] += face;
    }

    let mut degenerate = 0;
    let normals = sums
        .into_iter()
        .map(|n| {
            let unit = n.normalized_or(Vec3::ZERO);
            if unit == Vec3::ZERO {
                degenerate += 1;
                up
            } else {
                unit
            }
        })
        .collect();

    (normals, degenerate)
}

/// Recompute `mesh`'s normals from its current positions.
///
/// Must run after displacement has finished for every vertex, since each
/// face normal depends on all three of its corners. Returns the number of
/// vertices that fell back to the grid's local up axis.
pub fn recompute_normals(mesh: &mut GridMesh) -> usize {
    let (normals, degenerate) = vertex_normals(&mesh.positions, mesh.indices(), Vec3::Z);
    mesh.normals = normals;

    if degenerate > 0 {
        tracing::debug!(degenerate, "vertices defaulted to the up normal");
    }
    degenerate
}
