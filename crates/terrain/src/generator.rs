//! End-to-end terrain generation: heights, mesh and colors.

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::compositor::TerrainCompositor;
use crate::config::TerrainConfig;
use crate::error::Result;
use crate::grid::HeightGrid;
use crate::mesh::{ColorMapper, TerrainMesh, TerrainMeshBuilder};
use crate::random::RandomSource;

/// Generates colored terrain meshes from a validated configuration.
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    config: TerrainConfig,
}

impl TerrainGenerator {
    /// Validates `config`; no generator exists for an invalid one.
    pub fn new(config: TerrainConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// The composed height grid without building a mesh.
    pub fn generate_heights(&self, rng: &mut impl RandomSource) -> Result<HeightGrid> {
        TerrainCompositor::new(&self.config).compose(rng)
    }

    /// Builds the colored mesh for an existing height grid.
    pub fn mesh_from_heights(&self, heights: &HeightGrid) -> Result<TerrainMesh> {
        let mut mesh = TerrainMeshBuilder::new(self.config.cell_size).build(heights)?;
        mesh.colors = ColorMapper::new(&self.config.gradient).map(&mesh.positions);
        Ok(mesh)
    }

    pub fn generate(&self, rng: &mut impl RandomSource) -> Result<TerrainMesh> {
        let started = Instant::now();
        let heights = self.generate_heights(rng)?;
        let mesh = self.mesh_from_heights(&heights)?;

        info!(
            x_size = self.config.x_size,
            y_size = self.config.y_size,
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Generated terrain"
        );
        Ok(mesh)
    }
}

/// Generates a mesh for `config`, seeded from `config.seed` when present.
pub fn generate(config: &TerrainConfig) -> Result<TerrainMesh> {
    let generator = TerrainGenerator::new(config.clone())?;
    match config.seed {
        Some(seed) => generator.generate(&mut StdRng::seed_from_u64(seed)),
        None => generator.generate(&mut rand::thread_rng()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BlurPass, Rect};
    use crate::error::TerrainError;

    fn small_config() -> TerrainConfig {
        TerrainConfig::default()
            .with_size(16, 12)
            .with_cell_size(2.0)
            .with_fine_pass(BlurPass::new(10, 1, true, 0.035))
            .with_coarse_pass(BlurPass::new(10, 4, false, 0.015))
            .with_coarse_crop(Rect::new(3, 3, 9, 9))
    }

    #[test]
    fn test_invalid_config_rejected_up_front() {
        let result = TerrainGenerator::new(small_config().with_size(0, 12));
        assert!(matches!(result, Err(TerrainError::InvalidExtent { .. })));
    }

    #[test]
    fn test_mesh_shape() {
        let generator = TerrainGenerator::new(small_config()).unwrap();
        let mesh = generator.generate(&mut StdRng::seed_from_u64(1)).unwrap();

        assert_eq!(mesh.vertex_count(), 17 * 13);
        assert_eq!(mesh.indices.len(), 16 * 12 * 6);
        assert_eq!(mesh.colors.len(), mesh.vertex_count());
        assert_eq!(mesh.positions[17 * 13 - 1].x, 32.0);
        assert_eq!(mesh.positions[17 * 13 - 1].z, 24.0);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let config = small_config().with_seed(99);
        assert_eq!(generate(&config).unwrap(), generate(&config).unwrap());

        let other = generate(&small_config().with_seed(100)).unwrap();
        assert_ne!(generate(&config).unwrap().positions, other.positions);
    }

    #[test]
    fn test_heights_feed_mesh_elevation() {
        let generator = TerrainGenerator::new(small_config()).unwrap();
        let heights = generator
            .generate_heights(&mut StdRng::seed_from_u64(5))
            .unwrap();
        let mesh = generator.mesh_from_heights(&heights).unwrap();

        for (position, &height) in mesh.positions.iter().zip(heights.heights()) {
            assert_eq!(position.y, height);
        }
    }

    #[test]
    fn test_default_config_generates_finite_terrain() {
        let mesh = generate(&TerrainConfig::default().with_seed(12345)).unwrap();

        assert_eq!(mesh.vertex_count(), 256 * 256);
        assert!(
            mesh.positions
                .iter()
                .all(|p| p.y.is_finite() && p.y.abs() <= 200.0)
        );
        assert!(
            mesh.colors
                .iter()
                .flatten()
                .all(|c| (0.0..=1.0).contains(c))
        );
    }
}
