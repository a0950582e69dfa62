//! Iterated box blur.
//!
//! Every iteration estimates a neighbourhood value for each interior cell and
//! blends it with the cell's current height:
//!
//! ```text
//! h' = (estimate / divisor) * coefficient + h * (1 - coefficient)
//! ```
//!
//! The window of cell (x, y) reaches `window` cells past it and `lower_reach`
//! cells before it, where `lower_reach` is `window + 1` for symmetric passes
//! and `window` otherwise.
//!
//! Two estimators are available, selected by [`EdgeMode`]:
//!
//! - `PassThrough` builds the local value `L = h + h_left + h_up - h_diag` for
//!   every point. A cell whose window fits inside the grid takes
//!   `L[x + window][y + window] - L[x - lower_reach][y - lower_reach]`; any
//!   other cell takes its own raw `L`. Cells are visited column by column and
//!   each blended height is written back into `L`, so the lower corner is
//!   always read after it has been blended.
//! - `Clamp` sums the window `x - lower_reach + 1 ..= x + window` clipped to
//!   the grid from a summed-area table, so the result is a real box sum.

use std::time::Instant;

use tracing::debug;

use crate::config::{BlurPass, EdgeMode, Normalization};
use crate::error::Result;
use crate::grid::HeightGrid;

/// Working buffers kept between iterations and passes.
///
/// `sums` is a summed-area table stored with one row and column of zero
/// padding, so `sums[(y + 1) * stride + (x + 1)]` is the sum of every point
/// in `0..=x` x `0..=y`. It accumulates in `f64` in a fixed row-major order.
/// `local` holds the per-point local values, row-major with `columns` points
/// per row.
#[derive(Debug, Clone, Default)]
pub struct BlurScratch {
    sums: Vec<f64>,
    stride: usize,
    local: Vec<f32>,
    columns: usize,
}

impl BlurScratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scratch pre-sized for grids of the given extents.
    pub fn for_grid(x_size: usize, y_size: usize) -> Self {
        Self {
            sums: Vec::with_capacity((x_size + 2) * (y_size + 2)),
            stride: 0,
            local: Vec::with_capacity((x_size + 1) * (y_size + 1)),
            columns: 0,
        }
    }

    /// Rebuilds the summed-area table from `grid`, reusing the allocation
    /// when it fits.
    pub fn build(&mut self, grid: &HeightGrid) {
        let columns = grid.columns();
        let rows = grid.rows();
        self.stride = columns + 1;
        self.sums.clear();
        self.sums.resize(self.stride * (rows + 1), 0.0);

        for y in 0..rows {
            for x in 0..columns {
                let above = self.sums[y * self.stride + x + 1];
                let left = self.sums[(y + 1) * self.stride + x];
                let diagonal = self.sums[y * self.stride + x];
                self.sums[(y + 1) * self.stride + x + 1] =
                    grid.get(x, y) as f64 + above + left - diagonal;
            }
        }
    }

    /// Sum of every point in `0..=x` x `0..=y`.
    #[inline]
    pub fn prefix(&self, x: usize, y: usize) -> f64 {
        self.sums[(y + 1) * self.stride + x + 1]
    }

    /// Sum over the inclusive rectangle `x0..=x1` x `y0..=y1`.
    #[inline]
    pub fn rect_sum(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> f64 {
        let s = self.stride;
        self.sums[(y1 + 1) * s + x1 + 1] - self.sums[(y1 + 1) * s + x0]
            - self.sums[y0 * s + x1 + 1]
            + self.sums[y0 * s + x0]
    }

    /// Rebuilds the local values `h + h_left + h_up - h_diag`, with points
    /// outside the grid counting as zero.
    pub fn build_local(&mut self, grid: &HeightGrid) {
        let columns = grid.columns();
        let rows = grid.rows();
        self.columns = columns;
        self.local.clear();
        self.local.resize(columns * rows, 0.0);

        for x in 0..columns {
            for y in 0..rows {
                let left = if x > 0 { grid.get(x - 1, y) } else { 0.0 };
                let up = if y > 0 { grid.get(x, y - 1) } else { 0.0 };
                let diagonal = if x > 0 && y > 0 {
                    grid.get(x - 1, y - 1)
                } else {
                    0.0
                };
                self.local[y * columns + x] = grid.get(x, y) + left + up - diagonal;
            }
        }
    }

    #[inline]
    pub fn local(&self, x: usize, y: usize) -> f32 {
        self.local[y * self.columns + x]
    }

    #[inline]
    fn set_local(&mut self, x: usize, y: usize, value: f32) {
        self.local[y * self.columns + x] = value;
    }
}

/// Smooths a height grid in place with one configured [`BlurPass`].
#[derive(Debug, Clone, Copy)]
pub struct BoxBlurFilter {
    pass: BlurPass,
}

impl BoxBlurFilter {
    pub fn new(pass: BlurPass) -> Self {
        Self { pass }
    }

    pub fn pass(&self) -> &BlurPass {
        &self.pass
    }

    /// Runs every iteration of the pass over `grid`.
    ///
    /// Fails before touching the grid when the window does not fit it.
    pub fn apply(&self, grid: &mut HeightGrid, scratch: &mut BlurScratch) -> Result<()> {
        self.pass.validate(grid.x_size(), grid.y_size())?;

        let started = Instant::now();
        for _ in 0..self.pass.iterations {
            match self.pass.edges {
                EdgeMode::PassThrough => self.iterate_local(grid, scratch),
                EdgeMode::Clamp => self.iterate_clamped(grid, scratch),
            }
        }

        debug!(
            iterations = self.pass.iterations,
            window = self.pass.window,
            symmetric = self.pass.symmetric,
            edges = ?self.pass.edges,
            "Blurred {}x{} grid in {}ms",
            grid.x_size(),
            grid.y_size(),
            started.elapsed().as_millis()
        );
        Ok(())
    }

    /// Side of the unclipped window.
    fn side(&self) -> usize {
        self.pass.window + self.pass.lower_reach()
    }

    /// One local-difference iteration. Only interior cells are written.
    fn iterate_local(&self, grid: &mut HeightGrid, scratch: &mut BlurScratch) {
        scratch.build_local(grid);

        let x_size = grid.x_size();
        let y_size = grid.y_size();
        let reach = self.pass.window;
        let lower = self.pass.lower_reach();
        let coefficient = self.pass.coefficient;
        let divisor = match self.pass.normalization {
            Normalization::Fixed(divisor) => divisor,
            Normalization::WindowArea => (self.side() * self.side()) as f32,
        };

        for x in 1..x_size {
            for y in 1..y_size {
                let inside =
                    x > lower && y > lower && x + reach < x_size && y + reach < y_size;
                let estimate = if inside {
                    scratch.local(x + reach, y + reach) - scratch.local(x - lower, y - lower)
                } else {
                    scratch.local(x, y)
                };
                let blended =
                    (estimate / divisor) * coefficient + grid.get(x, y) * (1.0 - coefficient);
                scratch.set_local(x, y, blended);
                grid.set(x, y, blended);
            }
        }
    }

    /// One clipped box-sum iteration. Only interior cells are written.
    fn iterate_clamped(&self, grid: &mut HeightGrid, scratch: &mut BlurScratch) {
        scratch.build(grid);

        let x_size = grid.x_size();
        let y_size = grid.y_size();
        let reach = self.pass.window;
        let lower = self.pass.lower_reach();
        let coefficient = self.pass.coefficient as f64;

        for y in 1..y_size {
            for x in 1..x_size {
                let x0 = (x + 1).saturating_sub(lower);
                let y0 = (y + 1).saturating_sub(lower);
                let x1 = (x + reach).min(x_size);
                let y1 = (y + reach).min(y_size);
                let sum = scratch.rect_sum(x0, y0, x1, y1);
                let divisor = match self.pass.normalization {
                    Normalization::Fixed(divisor) => divisor as f64,
                    Normalization::WindowArea => ((x1 - x0 + 1) * (y1 - y0 + 1)) as f64,
                };
                let current = grid.get(x, y) as f64;
                grid.set(
                    x,
                    y,
                    (sum / divisor * coefficient + current * (1.0 - coefficient)) as f32,
                );
            }
        }
    }
}
