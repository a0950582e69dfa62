//! Procedural terrain generation.
//!
//! Two random height fields are smoothed at different scales, a region of the
//! coarse one is stretched over the whole map and added to the fine one, and
//! the result is turned into a colored triangle mesh.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use terrain::prelude::*;
//!
//! let config = TerrainConfig::default().with_seed(12345);
//! let mesh = terrain::generate(&config)?;
//!
//! // Or drive the pipeline with your own random source.
//! let generator = TerrainGenerator::new(TerrainConfig::flat_shape())?;
//! let heights = generator.generate_heights(&mut rand::thread_rng())?;
//! let mesh = generator.mesh_from_heights(&heights)?;
//! ```

pub mod compositor;
pub mod config;
pub mod error;
pub mod filters;
pub mod generator;
pub mod grid;
pub mod mesh;
pub mod random;

pub use config::TerrainConfig;
pub use error::{Result, TerrainError};
pub use generator::{TerrainGenerator, generate};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::compositor::TerrainCompositor;
    pub use crate::config::{BlurPass, EdgeMode, Normalization, Rect, TerrainConfig, ValueRange};
    pub use crate::error::{Result, TerrainError};
    pub use crate::filters::{BlurScratch, BoxBlurFilter, Resampler};
    pub use crate::generator::{TerrainGenerator, generate};
    pub use crate::grid::HeightGrid;
    pub use crate::mesh::{
        Aabb, ColorGradient, ColorMapper, Gradient, GradientStop, MeshConsumer, Rgba,
        TerrainMesh, TerrainMeshBuilder, publish,
    };
    pub use crate::random::{RandomFieldGenerator, RandomSource};
}
