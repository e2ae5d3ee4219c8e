//! Heightmap displacement of grid elevations

use crate::grid::GridMesh;
use crate::heightmap::HeightField;
use alentejo_core::{AlentejoError, Result};
use serde::{Deserialize, Serialize};

/// How a grid vertex picks its heightmap pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleMapping {
    /// The vertex's own `(column, row)` in the grid
    #[default]
    Grid,
    /// `(i mod field_width, i / field_width)` for vertex index `i`, i.e. the
    /// vertex buffer read as if it had the field's row width
    Linear,
}

impl std::str::FromStr for SampleMapping {
    type Err = AlentejoError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "grid" => Ok(SampleMapping::Grid),
            "linear" => Ok(SampleMapping::Linear),
            other => Err(AlentejoError::invalid_parameter(
                "mapping",
                format!("unknown mapping '{}'; valid values: grid, linear", other),
            )),
        }
    }
}

/// Outcome of one displacement pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplaceStats {
    /// Vertices written
    pub displaced: usize,
    /// Vertices whose pixel coordinate fell outside the field and was clamped
    pub clamped: usize,
}

/// Set each vertex's local-Z elevation to `field * height_scale`.
///
/// Elevations are overwritten, not accumulated, so repeating the call with
/// the same inputs yields the same mesh. Pixel coordinates that fall outside
/// the field (grid and heightmap resolutions differ) are clamped to the
/// nearest edge pixel.
pub fn displace(
    mesh: &mut GridMesh,
    field: &HeightField,
    height_scale: f32,
    mapping: SampleMapping,
) -> Result<DisplaceStats> {
    if !height_scale.is_finite() {
        return Err(AlentejoError::invalid_parameter(
            "height_scale",
            format!("must be finite, got {}", height_scale),
        ));
    }

    let columns = mesh.columns() as u64;
    let field_width = field.width as u64;
    let mut stats = DisplaceStats::default();

    for (i, p) in mesh.positions.iter_mut().enumerate() {
        let i = i as u64;
        let (px, py) = match mapping {
            SampleMapping::Grid => (i % columns, i / columns),
            SampleMapping::Linear => (i % field_width, i / field_width),
        };
        let (h, clamped) = field.get_clamped(px, py);
        p.z = h * height_scale;
        stats.displaced += 1;
        if clamped {
            stats.clamped += 1;
        }
    }

    if stats.clamped > 0 {
        tracing::warn!(
            grid = mesh.columns(),
            field_width = field.width,
            field_height = field.height,
            clamped = stats.clamped,
            "grid and heightmap resolutions differ; clamped out-of-range samples"
        );
    }
    tracing::debug!(displaced = stats.displaced, height_scale, "displaced grid");
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center_peak() -> HeightField {
        HeightField::from_raw(
            vec![
                0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0,
            ],
            3,
            3,
        )
        .unwrap()
    }

    fn ramp(width: u32, height: u32) -> HeightField {
        let n = (width * height) as usize;
        let values = (0..n).map(|i| i as f32 / (n - 1) as f32).collect();
        HeightField::from_raw(values, width, height).unwrap()
    }

    #[test]
    fn center_peak_on_three_segment_grid() {
        let mut grid = GridMesh::flat(30.0, 30.0, 3).unwrap();
        let stats = displace(&mut grid, &center_peak(), 30.0, SampleMapping::Grid).unwrap();

        assert_eq!(stats.displaced, 16);
        assert_eq!(grid.elevation_at(1, 1), 30.0);
        for (c, r) in [(0, 0), (3, 0), (0, 3), (3, 3)] {
            assert_eq!(grid.elevation_at(c, r), 0.0, "corner ({}, {})", c, r);
        }
        // Column 3 and row 3 have no pixel of their own
        assert_eq!(stats.clamped, 7);
    }

    #[test]
    fn zero_scale_keeps_the_grid_flat() {
        let mut grid = GridMesh::flat(10.0, 10.0, 4).unwrap();
        let before: Vec<_> = grid.positions().to_vec();
        displace(&mut grid, &ramp(5, 5), 0.0, SampleMapping::Grid).unwrap();
        assert_eq!(grid.positions(), before.as_slice());
    }

    #[test]
    fn doubling_scale_doubles_elevation() {
        let field = ramp(5, 5);
        let mut a = GridMesh::flat(10.0, 10.0, 4).unwrap();
        let mut b = a.clone();
        displace(&mut a, &field, 7.5, SampleMapping::Grid).unwrap();
        displace(&mut b, &field, 15.0, SampleMapping::Grid).unwrap();

        for i in 0..a.vertex_count() {
            assert!((b.elevation(i) - 2.0 * a.elevation(i)).abs() < 1e-5);
        }
    }

    #[test]
    fn displacement_overwrites_instead_of_accumulating() {
        let field = ramp(5, 5);
        let mut grid = GridMesh::flat(10.0, 10.0, 4).unwrap();
        displace(&mut grid, &field, 3.0, SampleMapping::Grid).unwrap();
        let once = grid.positions().to_vec();
        displace(&mut grid, &field, 3.0, SampleMapping::Grid).unwrap();
        assert_eq!(grid.positions(), once.as_slice());

        grid.reset_elevation();
        displace(&mut grid, &field, 3.0, SampleMapping::Grid).unwrap();
        assert_eq!(grid.positions(), once.as_slice());
    }

    #[test]
    fn planar_layout_and_indices_unchanged() {
        let mut grid = GridMesh::flat(8.0, 8.0, 4).unwrap();
        let flat = grid.clone();
        displace(&mut grid, &ramp(5, 5), 12.0, SampleMapping::Grid).unwrap();

        assert_eq!(grid.indices(), flat.indices());
        for (p, q) in grid.positions().iter().zip(flat.positions()) {
            assert_eq!((p.x, p.y), (q.x, q.y));
        }
    }

    #[test]
    fn matching_resolutions_need_no_clamping() {
        let mut grid = GridMesh::flat(4.0, 4.0, 4).unwrap();
        let field = ramp(5, 5);
        let stats = displace(&mut grid, &field, 1.0, SampleMapping::Grid).unwrap();
        assert_eq!(stats.clamped, 0);
        // With equal row widths both mappings agree
        let mut linear = GridMesh::flat(4.0, 4.0, 4).unwrap();
        displace(&mut linear, &field, 1.0, SampleMapping::Linear).unwrap();
        assert_eq!(grid.positions(), linear.positions());
    }

    #[test]
    fn linear_mapping_clamps_past_the_last_row() {
        // 16 vertices read through a 3-wide field: rows 3..5 do not exist
        let mut grid = GridMesh::flat(30.0, 30.0, 3).unwrap();
        let stats = displace(&mut grid, &center_peak(), 30.0, SampleMapping::Linear).unwrap();

        assert_eq!(stats.clamped, 7);
        assert_eq!(grid.elevation(4), 30.0);
        assert!(grid.positions().iter().all(|p| p.z.is_finite()));
    }

    #[test]
    fn small_field_on_large_grid_stays_finite() {
        let mut grid = GridMesh::flat(255.0, 255.0, 64).unwrap();
        let field = ramp(3, 2);
        let stats = displace(&mut grid, &field, 30.0, SampleMapping::Grid).unwrap();
        assert!(stats.clamped > 0);
        let (lo, hi) = grid.elevation_range();
        assert!(lo >= 0.0 && hi <= 30.0);
    }

    #[test]
    fn non_finite_scale_rejected() {
        let mut grid = GridMesh::flat(1.0, 1.0, 2).unwrap();
        assert!(displace(&mut grid, &ramp(3, 3), f32::INFINITY, SampleMapping::Grid).is_err());
    }

    #[test]
    fn mapping_parses() {
        assert_eq!("grid".parse::<SampleMapping>().unwrap(), SampleMapping::Grid);
        assert_eq!("linear".parse::<SampleMapping>().unwrap(), SampleMapping::Linear);
        assert!("nearest".parse::<SampleMapping>().is_err());
    }
}
