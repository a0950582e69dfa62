//! Error types for terrain generation.

use thiserror::Error;

use crate::config::Rect;

/// Configuration problems detected before any grid is allocated.
///
/// Generation is deterministic given its inputs, so none of these are
/// retryable: the caller has to change the configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TerrainError {
    #[error("Grid extents must be positive, got {x_size}x{y_size}")]
    InvalidExtent { x_size: usize, y_size: usize },

    #[error("Blur window must be at least 1")]
    ZeroWindow,

    #[error("Blur window {window} must be smaller than the grid extent {extent}")]
    WindowTooLarge { window: usize, extent: usize },

    #[error("Rectangle {rect} is empty or exceeds a {columns}x{rows} grid")]
    InvalidRect {
        rect: Rect,
        columns: usize,
        rows: usize,
    },

    #[error("Invalid value range [{min}, {max})")]
    InvalidRange { min: f32, max: f32 },

    #[error("Blend coefficient must be within [0, 1], got {0}")]
    InvalidCoefficient(f32),

    #[error("Window divisor must be positive and finite, got {0}")]
    InvalidDivisor(f32),

    #[error("{vertices} vertices exceed the 32-bit index range")]
    MeshTooLarge { vertices: usize },

    #[error("Cell size must be positive and finite, got {0}")]
    InvalidCellSize(f32),
}

pub type Result<T> = std::result::Result<T, TerrainError>;
