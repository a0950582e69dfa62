//! Two-scale height field composition.

use tracing::debug;

use crate::config::TerrainConfig;
use crate::error::Result;
use crate::filters::{BlurScratch, BoxBlurFilter, Resampler};
use crate::grid::HeightGrid;
use crate::random::{RandomFieldGenerator, RandomSource};

/// Builds the final height grid from a fine detail field and one stretched
/// region of a coarse field.
///
/// 1. Field A: random noise blurred by the fine pass.
/// 2. Field B: random noise blurred by the coarse pass.
/// 3. The coarse crop of B is stretched bilinearly over the whole grid.
/// 4. The result is A plus the stretched B, point by point.
///
/// A is generated before B, so a seeded source yields the same terrain
/// every time.
#[derive(Debug, Clone, Copy)]
pub struct TerrainCompositor<'a> {
    config: &'a TerrainConfig,
}

impl<'a> TerrainCompositor<'a> {
    pub fn new(config: &'a TerrainConfig) -> Self {
        Self { config }
    }

    pub fn compose(&self, rng: &mut impl RandomSource) -> Result<HeightGrid> {
        let config = self.config;
        config.validate()?;

        let (x_size, y_size) = (config.x_size, config.y_size);
        let fields = RandomFieldGenerator::new(config.height_range);
        let mut scratch = BlurScratch::for_grid(x_size, y_size);

        let mut fine = fields.generate(x_size, y_size, rng)?;
        BoxBlurFilter::new(config.fine_pass).apply(&mut fine, &mut scratch)?;

        let mut coarse = fields.generate(x_size, y_size, rng)?;
        BoxBlurFilter::new(config.coarse_pass).apply(&mut coarse, &mut scratch)?;

        let mut heights = HeightGrid::zeroed(x_size, y_size)?;
        Resampler::to_full(config.coarse_crop, &heights).apply(&coarse, &mut heights)?;
        heights.add_assign(&fine);

        let (min, max) = heights.min_max();
        debug!("Composed {x_size}x{y_size} height grid, elevation {min:.2}..{max:.2}");
        Ok(heights)
    }
}
