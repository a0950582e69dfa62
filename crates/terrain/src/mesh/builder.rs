//! Height grid to triangle mesh conversion.

use glam::Vec3;

use crate::error::{Result, TerrainError};
use crate::grid::HeightGrid;
use crate::mesh::color::Rgba;

/// Renderable and collidable terrain surface.
///
/// `positions[i]` is grid point `(i % (W + 1), i / (W + 1))`; every six
/// `indices` form the two triangles of one grid quad; `colors` runs parallel
/// to `positions`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TerrainMesh {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub colors: Vec<Rgba>,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

impl TerrainMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Bounds of every vertex position, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Aabb> {
        let first = *self.positions.first()?;
        let (min, max) = self
            .positions
            .iter()
            .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p)));
        Some(Aabb { min, max })
    }

    /// Per-vertex normals averaged from the faces around each vertex,
    /// weighted by face area.
    pub fn smooth_normals(&self) -> Vec<Vec3> {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];

        for triangle in self.indices.chunks_exact(3) {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
            let face = (self.positions[b] - self.positions[a])
                .cross(self.positions[c] - self.positions[a]);
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }

        normals
            .into_iter()
            .map(|n| {
                let n = n.normalize_or_zero();
                if n == Vec3::ZERO { Vec3::Y } else { n }
            })
            .collect()
    }
}

/// Builds vertex positions and triangle indices for a regular quad grid.
#[derive(Debug, Clone, Copy)]
pub struct TerrainMeshBuilder {
    cell_size: f32,
}

impl Default for TerrainMeshBuilder {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl TerrainMeshBuilder {
    pub fn new(cell_size: f32) -> Self {
        Self { cell_size }
    }

    /// One vertex per grid point at `(x * cell, height, y * cell)`.
    pub fn positions(&self, grid: &HeightGrid) -> Vec<Vec3> {
        let columns = grid.columns();
        grid.heights()
            .iter()
            .enumerate()
            .map(|(i, &height)| {
                let x = i % columns;
                let y = i / columns;
                Vec3::new(x as f32 * self.cell_size, height, y as f32 * self.cell_size)
            })
            .collect()
    }

    /// Two triangles per quad, skipping quads whose corner sits on the last
    /// column so no face wraps to the next row.
    pub fn indices(&self, grid: &HeightGrid) -> Result<Vec<u32>> {
        let columns = grid.columns();
        let vertices = columns * grid.rows();
        if vertices > u32::MAX as usize {
            return Err(TerrainError::MeshTooLarge { vertices });
        }

        let row = columns as u32;
        let mut indices = Vec::with_capacity(grid.x_size() * grid.y_size() * 6);
        for i in 0..(columns * grid.y_size()) as u32 {
            if i % row == grid.x_size() as u32 {
                continue;
            }
            indices.extend_from_slice(&[i, i + row, i + 1, i + row, i + row + 1, i + 1]);
        }
        Ok(indices)
    }

    /// Positions and indices; colors are left empty.
    pub fn build(&self, grid: &HeightGrid) -> Result<TerrainMesh> {
        Ok(TerrainMesh {
            indices: self.indices(grid)?,
            positions: self.positions(grid),
            colors: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_quad() {
        let mut grid = HeightGrid::zeroed(1, 1).unwrap();
        grid.set(1, 1, 3.0);
        let mesh = TerrainMeshBuilder::new(2.0).build(&grid).unwrap();

        assert_eq!(
            mesh.positions,
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 2.0),
                Vec3::new(2.0, 3.0, 2.0),
            ]
        );
        assert_eq!(mesh.indices, vec![0, 2, 1, 2, 3, 1]);
    }

    #[test]
    fn test_counts() {
        let grid = HeightGrid::zeroed(7, 4).unwrap();
        let mesh = TerrainMeshBuilder::default().build(&grid).unwrap();
        assert_eq!(mesh.vertex_count(), 8 * 5);
        assert_eq!(mesh.indices.len(), 7 * 4 * 6);
        assert_eq!(mesh.triangle_count(), 7 * 4 * 2);
    }

    #[test]
    fn test_vertex_index_matches_grid_point() {
        let mut grid = HeightGrid::zeroed(5, 3).unwrap();
        grid.set(4, 2, 9.0);
        let positions = TerrainMeshBuilder::new(10.0).positions(&grid);
        assert_eq!(positions[2 * 6 + 4], Vec3::new(40.0, 9.0, 20.0));
    }

    #[test]
    fn test_no_triangle_wraps_rows() {
        let grid = HeightGrid::zeroed(4, 3).unwrap();
        let indices = TerrainMeshBuilder::default().indices(&grid).unwrap();
        let columns = 5u32;

        for triangle in indices.chunks_exact(3) {
            let xs: Vec<u32> = triangle.iter().map(|i| i % columns).collect();
            let spread = xs.iter().max().unwrap() - xs.iter().min().unwrap();
            assert!(spread <= 1, "triangle {triangle:?} wraps");
            assert!(triangle.iter().all(|&i| i < 5 * 4));
        }
    }

    #[test]
    fn test_flat_grid_normals_point_up() {
        let grid = HeightGrid::filled(3, 3, 2.0).unwrap();
        let mesh = TerrainMeshBuilder::new(1.5).build(&grid).unwrap();
        for normal in mesh.smooth_normals() {
            assert!((normal - Vec3::Y).length() < 1e-6, "{normal:?}");
        }
    }

    #[test]
    fn test_sloped_normals_lean_downhill() {
        // Height rises with x, so normals tip toward -x.
        let mut grid = HeightGrid::zeroed(4, 4).unwrap();
        for y in 0..5 {
            for x in 0..5 {
                grid.set(x, y, x as f32);
            }
        }
        let mesh = TerrainMeshBuilder::default().build(&grid).unwrap();
        let normals = mesh.smooth_normals();
        let center = normals[2 * 5 + 2];
        assert!(center.x < -0.5);
        assert!(center.y > 0.5);
        assert!(center.z.abs() < 1e-6);
    }

    #[test]
    fn test_bounds() {
        let mut grid = HeightGrid::zeroed(2, 3).unwrap();
        grid.set(1, 1, -4.0);
        grid.set(1, 2, 6.0);
        let mesh = TerrainMeshBuilder::new(2.0).build(&grid).unwrap();
        let bounds = mesh.bounds().unwrap();
        assert_eq!(bounds.min, Vec3::new(0.0, -4.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(4.0, 6.0, 6.0));
        assert_eq!(bounds.size(), Vec3::new(4.0, 10.0, 6.0));
        assert_eq!(bounds.center(), Vec3::new(2.0, 1.0, 3.0));
        assert!(TerrainMesh::default().bounds().is_none());
    }
}
