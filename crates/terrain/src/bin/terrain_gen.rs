//! Generates one terrain and reports what a renderer would receive.
//!
//! Run with:
//! ```
//! cargo run -p terrain --bin terrain-gen -- [config.json] [--flat] [--seed N]
//! ```
//!
//! Without a config file the default 255x255 terrain is generated; `--flat`
//! starts from the 100x100 preset with 10-unit cells instead.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use glam::Vec3;
use terrain::mesh::{Aabb, MeshConsumer, TerrainMesh, publish};
use terrain::{TerrainConfig, generate};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON terrain configuration; missing fields take their defaults
    config: Option<PathBuf>,

    /// Use the 100x100 preset with 10-unit cells
    #[arg(long, conflicts_with = "config")]
    flat: bool,

    /// Seed for reproducible output, overriding the config file
    #[arg(long)]
    seed: Option<u64>,
}

/// Stands in for a render mesh plus collider.
#[derive(Default)]
struct SummaryConsumer {
    mesh: TerrainMesh,
    material: String,
    bounds: Option<Aabb>,
    normals: Vec<Vec3>,
}

impl MeshConsumer for SummaryConsumer {
    type Material = String;

    fn replace_mesh(&mut self, mesh: TerrainMesh, material: &Self::Material) {
        self.mesh = mesh;
        self.material = material.clone();
    }

    fn recalculate_bounds_and_normals(&mut self) {
        self.bounds = self.mesh.bounds();
        self.normals = self.mesh.smooth_normals();
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None if args.flat => TerrainConfig::flat_shape(),
        None => TerrainConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mesh = generate(&config)?;

    let mut consumer = SummaryConsumer::default();
    publish(&mut consumer, mesh, &"terrain".to_string());

    tracing::info!("Terrain ready ({})", consumer.material);
    tracing::info!("  Vertices: {}", consumer.mesh.vertex_count());
    tracing::info!("  Triangles: {}", consumer.mesh.triangle_count());
    tracing::info!("  Normals: {}", consumer.normals.len());
    if let Some(bounds) = consumer.bounds {
        tracing::info!("  Bounds: {} .. {}", bounds.min, bounds.max);
        tracing::info!("  Center: {}", bounds.center());
        tracing::info!("  Relief: {:.2}", bounds.size().y);
    }

    Ok(())
}
