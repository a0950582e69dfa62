//! Configuration types for terrain generation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};
use crate::mesh::ColorGradient;

/// Axis-aligned rectangle of grid points, `(x1, y1)` inclusive to `(x2, y2)`
/// exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,
}

impl Rect {
    pub const fn new(x1: usize, y1: usize, x2: usize, y2: usize) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// The whole grid of `columns` x `rows` points.
    pub const fn covering(columns: usize, rows: usize) -> Self {
        Self::new(0, 0, columns, rows)
    }

    pub fn width(&self) -> usize {
        self.x2.saturating_sub(self.x1)
    }

    pub fn height(&self) -> usize {
        self.y2.saturating_sub(self.y1)
    }

    /// Checks that the rectangle is non-empty and fits a `columns` x `rows` grid.
    pub fn validate_within(&self, columns: usize, rows: usize) -> Result<()> {
        if self.x1 >= self.x2 || self.y1 >= self.y2 || self.x2 > columns || self.y2 > rows {
            return Err(TerrainError::InvalidRect {
                rect: *self,
                columns,
                rows,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})-({}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

/// Half-open range `[min, max)` for interior heights of a random field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// `min == max` is allowed and yields a constant field.
    pub fn validate(&self) -> Result<()> {
        if !(self.max - self.min).is_finite() || self.min > self.max {
            return Err(TerrainError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::new(0.0, 100.0)
    }
}

/// How the blur estimates the neighbourhood of a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMode {
    /// Local 2x2 differences taken from the heights. Inside the grid the
    /// estimate is the difference of the values at the window's two corners;
    /// cells near an edge blend their own raw local value instead. Values are
    /// updated in place, so the lower corner is read after it was blended.
    #[default]
    PassThrough,
    /// True box sum over the window clipped to the grid.
    Clamp,
}

/// Divisor applied to the neighbourhood estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Fixed divisor regardless of the window size.
    Fixed(f32),
    /// Number of cells in the window, clipped to the grid under
    /// [`EdgeMode::Clamp`].
    WindowArea,
}

impl Normalization {
    /// The historical 3x3 kernel divisor.
    pub const KERNEL_3X3: Self = Self::Fixed(9.0);
}

impl Default for Normalization {
    fn default() -> Self {
        Self::KERNEL_3X3
    }
}

/// Parameters for one iterated box-blur run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlurPass {
    /// Number of blur iterations; each feeds the next.
    pub iterations: usize,
    /// Window reach in cells.
    pub window: usize,
    /// Centered window when true, trailing by one cell when false.
    pub symmetric: bool,
    /// Weight of the neighbourhood estimate in the blend, in [0, 1].
    pub coefficient: f32,
    #[serde(default)]
    pub edges: EdgeMode,
    #[serde(default)]
    pub normalization: Normalization,
}

impl BlurPass {
    /// Local-difference estimate with raw edge values and the fixed 3x3
    /// divisor. This is what the terrain has always been shaped by.
    pub fn new(iterations: usize, window: usize, symmetric: bool, coefficient: f32) -> Self {
        Self {
            iterations,
            window,
            symmetric,
            coefficient,
            edges: EdgeMode::default(),
            normalization: Normalization::default(),
        }
    }

    /// A real box average: clipped windows divided by their cell count.
    pub fn box_average(
        iterations: usize,
        window: usize,
        symmetric: bool,
        coefficient: f32,
    ) -> Self {
        Self {
            edges: EdgeMode::Clamp,
            normalization: Normalization::WindowArea,
            ..Self::new(iterations, window, symmetric, coefficient)
        }
    }

    /// Fine jitter pass: 200 iterations, window 3, symmetric, 0.035.
    pub fn fine() -> Self {
        Self::new(200, 3, true, 0.035)
    }

    /// Broad hill pass: 200 iterations, window 50, trailing, 0.015.
    pub fn coarse() -> Self {
        Self::new(200, 50, false, 0.015)
    }

    pub fn with_edges(mut self, edges: EdgeMode) -> Self {
        self.edges = edges;
        self
    }

    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Distance from the cell to the exclusive lower corner of its window.
    pub(crate) fn lower_reach(&self) -> usize {
        if self.symmetric {
            self.window + 1
        } else {
            self.window
        }
    }

    /// Checks the pass against a grid of extents `x_size` x `y_size`.
    pub fn validate(&self, x_size: usize, y_size: usize) -> Result<()> {
        if self.window == 0 {
            return Err(TerrainError::ZeroWindow);
        }
        let extent = x_size.min(y_size);
        if self.window >= extent {
            return Err(TerrainError::WindowTooLarge {
                window: self.window,
                extent,
            });
        }
        if !(0.0..=1.0).contains(&self.coefficient) {
            return Err(TerrainError::InvalidCoefficient(self.coefficient));
        }
        if let Normalization::Fixed(divisor) = self.normalization {
            if !divisor.is_finite() || divisor <= 0.0 {
                return Err(TerrainError::InvalidDivisor(divisor));
            }
        }
        Ok(())
    }
}

/// Full configuration of one terrain generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Cells along x (W).
    pub x_size: usize,
    /// Cells along y (H).
    pub y_size: usize,
    /// World-space side length of one cell.
    pub cell_size: f32,
    /// Range of interior heights in the raw random fields.
    pub height_range: ValueRange,
    /// Blur applied to the full-size detail field.
    pub fine_pass: BlurPass,
    /// Blur applied to the field that is cropped and stretched.
    pub coarse_pass: BlurPass,
    /// Region of the coarse field stretched over the whole map.
    pub coarse_crop: Rect,
    /// Height-to-color mapping.
    pub gradient: ColorGradient,
    /// Seed for reproducible output. `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            x_size: 255,
            y_size: 255,
            cell_size: 1.0,
            height_range: ValueRange::default(),
            fine_pass: BlurPass::fine(),
            coarse_pass: BlurPass::coarse(),
            coarse_crop: Rect::new(50, 50, 71, 71),
            gradient: ColorGradient::default(),
            seed: None,
        }
    }
}

impl TerrainConfig {
    /// Smaller map with larger cells.
    pub fn flat_shape() -> Self {
        Self {
            x_size: 100,
            y_size: 100,
            cell_size: 10.0,
            ..Self::default()
        }
    }

    /// Sets the grid extents.
    pub fn with_size(mut self, x_size: usize, y_size: usize) -> Self {
        self.x_size = x_size;
        self.y_size = y_size;
        self
    }

    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_height_range(mut self, min: f32, max: f32) -> Self {
        self.height_range = ValueRange::new(min, max);
        self
    }

    pub fn with_fine_pass(mut self, pass: BlurPass) -> Self {
        self.fine_pass = pass;
        self
    }

    pub fn with_coarse_pass(mut self, pass: BlurPass) -> Self {
        self.coarse_pass = pass;
        self
    }

    pub fn with_coarse_crop(mut self, crop: Rect) -> Self {
        self.coarse_crop = crop;
        self
    }

    pub fn with_gradient(mut self, gradient: ColorGradient) -> Self {
        self.gradient = gradient;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Points per row, W + 1.
    pub fn columns(&self) -> usize {
        self.x_size + 1
    }

    /// Number of rows, H + 1.
    pub fn rows(&self) -> usize {
        self.y_size + 1
    }

    /// Runs every configuration check up front, before anything is allocated.
    pub fn validate(&self) -> Result<()> {
        if self.x_size == 0 || self.y_size == 0 {
            return Err(TerrainError::InvalidExtent {
                x_size: self.x_size,
                y_size: self.y_size,
            });
        }
        let vertices = self.columns().saturating_mul(self.rows());
        if vertices > u32::MAX as usize {
            return Err(TerrainError::MeshTooLarge { vertices });
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(TerrainError::InvalidCellSize(self.cell_size));
        }
        self.height_range.validate()?;
        self.fine_pass.validate(self.x_size, self.y_size)?;
        self.coarse_pass.validate(self.x_size, self.y_size)?;
        self.coarse_crop.validate_within(self.columns(), self.rows())?;
        Ok(())
    }
}
