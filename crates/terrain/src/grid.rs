//! Flat height grid storage.

use crate::error::{Result, TerrainError};

/// Elevation samples for a `x_size` x `y_size` cell terrain.
///
/// A grid of extents (W, H) holds (W+1)(H+1) points stored row-major in one
/// buffer: the point (x, y) lives at `y * (W + 1) + x`, which is also the index
/// of the mesh vertex built from it.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightGrid {
    x_size: usize,
    y_size: usize,
    heights: Vec<f32>,
}

impl HeightGrid {
    /// Creates a grid of the given extents with every point at zero.
    pub fn zeroed(x_size: usize, y_size: usize) -> Result<Self> {
        if x_size == 0 || y_size == 0 {
            return Err(TerrainError::InvalidExtent { x_size, y_size });
        }
        Ok(Self {
            x_size,
            y_size,
            heights: vec![0.0; (x_size + 1) * (y_size + 1)],
        })
    }

    /// Creates a grid of the given extents with every point set to `value`.
    pub fn filled(x_size: usize, y_size: usize, value: f32) -> Result<Self> {
        let mut grid = Self::zeroed(x_size, y_size)?;
        grid.heights.fill(value);
        Ok(grid)
    }

    /// Number of cells along x (W).
    pub fn x_size(&self) -> usize {
        self.x_size
    }

    /// Number of cells along y (H).
    pub fn y_size(&self) -> usize {
        self.y_size
    }

    /// Points per row, W + 1.
    pub fn columns(&self) -> usize {
        self.x_size + 1
    }

    /// Number of rows, H + 1.
    pub fn rows(&self) -> usize {
        self.y_size + 1
    }

    /// Whether (x, y) lies on the outermost ring of points.
    pub fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x == self.x_size || y == self.y_size
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.columns() && y < self.rows(),
            "point ({x}, {y}) outside {}x{} grid",
            self.columns(),
            self.rows()
        );
        y * self.columns() + x
    }

    /// Height at (x, y). Panics when the point is outside the grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.heights[self.index(x, y)]
    }

    /// Height at (x, y), or `None` outside the grid.
    pub fn try_get(&self, x: usize, y: usize) -> Option<f32> {
        (x < self.columns() && y < self.rows()).then(|| self.heights[y * self.columns() + x])
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, height: f32) {
        let i = self.index(x, y);
        self.heights[i] = height;
    }

    /// Adds another grid of the same extents point by point.
    ///
    /// Panics when the extents differ.
    pub fn add_assign(&mut self, other: &HeightGrid) {
        assert_eq!(
            (self.x_size, self.y_size),
            (other.x_size, other.y_size),
            "grid extents differ"
        );
        for (h, o) in self.heights.iter_mut().zip(&other.heights) {
            *h += o;
        }
    }

    /// Row-major height data.
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Smallest and largest height in the grid.
    pub fn min_max(&self) -> (f32, f32) {
        self.heights
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let grid = HeightGrid::zeroed(4, 2).unwrap();
        assert_eq!(grid.columns(), 5);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.heights().len(), 15);
    }

    #[test]
    fn test_zero_extent_rejected() {
        assert_eq!(
            HeightGrid::zeroed(0, 5),
            Err(TerrainError::InvalidExtent {
                x_size: 0,
                y_size: 5
            })
        );
    }

    #[test]
    fn test_row_major_layout() {
        let mut grid = HeightGrid::zeroed(3, 3).unwrap();
        grid.set(2, 1, 7.0);
        assert_eq!(grid.heights()[1 * 4 + 2], 7.0);
        assert_eq!(grid.get(2, 1), 7.0);
    }

    #[test]
    fn test_try_get_out_of_bounds() {
        let grid = HeightGrid::zeroed(3, 3).unwrap();
        assert_eq!(grid.try_get(3, 3), Some(0.0));
        assert_eq!(grid.try_get(4, 0), None);
        assert_eq!(grid.try_get(0, 4), None);
    }

    #[test]
    #[should_panic]
    fn test_get_does_not_wrap_rows() {
        let grid = HeightGrid::zeroed(3, 3).unwrap();
        // Would alias (0, 1) in the flat buffer.
        grid.get(4, 0);
    }

    #[test]
    fn test_border_detection() {
        let grid = HeightGrid::zeroed(4, 4).unwrap();
        assert!(grid.is_border(0, 2));
        assert!(grid.is_border(4, 2));
        assert!(grid.is_border(2, 4));
        assert!(!grid.is_border(1, 3));
    }

    #[test]
    fn test_add_assign_and_min_max() {
        let mut a = HeightGrid::filled(2, 2, 1.0).unwrap();
        let mut b = HeightGrid::zeroed(2, 2).unwrap();
        b.set(1, 1, 4.0);
        a.add_assign(&b);
        assert_eq!(a.get(1, 1), 5.0);
        assert_eq!(a.min_max(), (1.0, 5.0));
    }
}
