//! Hand-off of finished meshes to a renderer or physics engine.

use crate::mesh::TerrainMesh;

/// Receiver of generated terrain, typically a render mesh paired with a
/// collider.
///
/// The consumer owns the mesh once handed over and is responsible for
/// dropping or replacing it on the next generation.
pub trait MeshConsumer {
    /// Physics material attached to the collider.
    type Material;

    /// Replaces whatever surface the consumer holds with `mesh`.
    fn replace_mesh(&mut self, mesh: TerrainMesh, material: &Self::Material);

    /// Recomputes bounds and smooth normals from the current triangles.
    fn recalculate_bounds_and_normals(&mut self);
}

/// Hands `mesh` to `consumer` and asks it to refresh derived data.
pub fn publish<C: MeshConsumer + ?Sized>(
    consumer: &mut C,
    mesh: TerrainMesh,
    material: &C::Material,
) {
    consumer.replace_mesh(mesh, material);
    consumer.recalculate_bounds_and_normals();
}
