//! Mesh derivation from a finished height grid.
//!
//! - [`TerrainMeshBuilder`]: vertex positions and quad-grid triangles
//! - [`ColorMapper`]: per-vertex colors from normalized elevation
//! - [`MeshConsumer`]: the renderer/collider the mesh is handed to

pub mod builder;
pub mod color;
pub mod consumer;

pub use builder::{Aabb, TerrainMesh, TerrainMeshBuilder};
pub use color::{ColorGradient, ColorMapper, Gradient, GradientStop, Rgba, blend_colors};
pub use consumer::{MeshConsumer, publish};
