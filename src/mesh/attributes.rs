//! Custom vertex attributes written by material assignment.

use bevy::mesh::MeshVertexAttribute;
use bevy::render::render_resource::VertexFormat;

/// Vertex attribute holding the material slot index of the polygon the
/// vertex belongs to.
///
/// Written by [`MeshMaterialSlotExt`](super::MeshMaterialSlotExt) on
/// un-indexed meshes, so every vertex belongs to exactly one triangle and
/// carries that triangle's slot.
///
/// # Example
/// ```ignore
/// // Triangle 0 uses slot 2, triangle 1 uses slot 0.
/// let slots: Vec<u32> = vec![2, 2, 2, 0, 0, 0];
/// mesh.insert_attribute(ATTRIBUTE_MATERIAL_SLOT, slots);
/// ```
pub const ATTRIBUTE_MATERIAL_SLOT: MeshVertexAttribute =
    MeshVertexAttribute::new("MaterialSlot", 988540930, VertexFormat::Uint32);
