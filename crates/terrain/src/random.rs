//! Random height field synthesis.

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::config::ValueRange;
use crate::error::Result;
use crate::grid::HeightGrid;

/// Source of uniformly distributed floats.
///
/// Every [`rand::Rng`] is a source; tests can also supply fixed sequences.
pub trait RandomSource {
    /// Returns a value in `[min, max)`, or `min` when the range is empty.
    fn next_in_range(&mut self, min: f32, max: f32) -> f32;

    /// Fills `out` with successive draws from `[min, max)`.
    fn fill_range(&mut self, min: f32, max: f32, out: &mut [f32]) {
        for value in out {
            *value = self.next_in_range(min, max);
        }
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_in_range(&mut self, min: f32, max: f32) -> f32 {
        if min < max { self.gen_range(min..max) } else { min }
    }

    fn fill_range(&mut self, min: f32, max: f32, out: &mut [f32]) {
        if min < max {
            let uniform = Uniform::new(min, max);
            for value in out {
                *value = uniform.sample(self);
            }
        } else {
            out.fill(min);
        }
    }
}

/// Produces raw height fields: zero on the border, uniform noise inside.
#[derive(Debug, Clone, Copy)]
pub struct RandomFieldGenerator {
    range: ValueRange,
}

impl Default for RandomFieldGenerator {
    fn default() -> Self {
        Self::new(ValueRange::default())
    }
}

impl RandomFieldGenerator {
    pub fn new(range: ValueRange) -> Self {
        Self { range }
    }

    /// Generates a field for a `x_size` x `y_size` cell grid.
    ///
    /// Draws exactly one value per interior point, column by column.
    pub fn generate(
        &self,
        x_size: usize,
        y_size: usize,
        rng: &mut impl RandomSource,
    ) -> Result<HeightGrid> {
        self.range.validate()?;
        let mut grid = HeightGrid::zeroed(x_size, y_size)?;

        let mut draws = vec![0.0; (x_size - 1) * (y_size - 1)];
        rng.fill_range(self.range.min, self.range.max, &mut draws);

        let interior = (1..x_size).flat_map(|x| (1..y_size).map(move |y| (x, y)));
        for ((x, y), height) in interior.zip(draws) {
            grid.set(x, y, height);
        }

        Ok(grid)
    }
}
