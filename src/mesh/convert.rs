//! Conversion between Bevy meshes and [`PolyMesh`].

use bevy::math::Vec2;
use bevy::mesh::{Mesh, MeshVertexAttribute, PrimitiveTopology, VertexAttributeValues};

use super::attributes::ATTRIBUTE_MATERIAL_SLOT;
use super::error::MeshError;
use super::poly::{PolyMesh, UvLayer};

/// Name given to the layer read from [`Mesh::ATTRIBUTE_UV_0`].
pub const UV_CHANNEL_1: &str = "UVChannel_1";

/// Name given to the layer read from [`Mesh::ATTRIBUTE_UV_1`].
pub const UV_CHANNEL_2: &str = "UVChannel_2";

impl PolyMesh {
    /// Read a triangle-list Bevy mesh.
    ///
    /// Every triangle becomes a three-loop polygon. `ATTRIBUTE_UV_0` and
    /// `ATTRIBUTE_UV_1`, when present, become the layers [`UV_CHANNEL_1`] and
    /// [`UV_CHANNEL_2`]. The result has no material slots.
    pub fn from_bevy_mesh(name: impl Into<String>, mesh: &Mesh) -> Result<Self, MeshError> {
        let topology = mesh.primitive_topology();
        if topology != PrimitiveTopology::TriangleList {
            return Err(MeshError::UnsupportedTopology { topology });
        }

        let vertex_count = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .map(|a| a.len())
            .ok_or(MeshError::MissingPositions)?;

        let corners: Vec<usize> = match mesh.indices() {
            Some(indices) => indices.iter().collect(),
            None => (0..vertex_count).collect(),
        };

        if corners.len() % 3 != 0 {
            return Err(MeshError::IncompleteTriangles {
                count: corners.len(),
            });
        }

        if let Some(&index) = corners.iter().find(|&&i| i >= vertex_count) {
            return Err(MeshError::IndexOutOfRange {
                attribute: "Vertex_Position",
                index,
                len: vertex_count,
            });
        }

        let mut uv_layers = Vec::new();
        for (attribute, layer_name) in [
            (Mesh::ATTRIBUTE_UV_0, UV_CHANNEL_1),
            (Mesh::ATTRIBUTE_UV_1, UV_CHANNEL_2),
        ] {
            if let Some(uvs) = read_loop_uvs(mesh, attribute, &corners)? {
                uv_layers.push(UvLayer::new(layer_name, uvs));
            }
        }

        let loop_totals = vec![3; corners.len() / 3];
        PolyMesh::from_parts(name.into(), &loop_totals, uv_layers, Vec::new())
    }
}

/// Gather one UV per corner from a `Float32x2` attribute.
fn read_loop_uvs(
    mesh: &Mesh,
    attribute: MeshVertexAttribute,
    corners: &[usize],
) -> Result<Option<Vec<Vec2>>, MeshError> {
    let Some(values) = mesh.attribute(attribute.id) else {
        return Ok(None);
    };

    let VertexAttributeValues::Float32x2(uvs) = values else {
        return Err(MeshError::UnsupportedAttributeFormat {
            attribute: attribute.name,
        });
    };

    corners
        .iter()
        .map(|&i| {
            uvs.get(i)
                .map(|&uv| Vec2::from(uv))
                .ok_or(MeshError::IndexOutOfRange {
                    attribute: attribute.name,
                    index: i,
                    len: uvs.len(),
                })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Extension trait for writing polygon material slots back onto Bevy meshes.
pub trait MeshMaterialSlotExt: Sized {
    /// Write [`ATTRIBUTE_MATERIAL_SLOT`] from a [`PolyMesh`] produced by
    /// [`PolyMesh::from_bevy_mesh`] on this mesh.
    ///
    /// Indexed meshes are un-indexed first so that no vertex is shared
    /// between polygons.
    fn with_polygon_material_slots(self, polygons: &PolyMesh) -> Result<Self, MeshError>;
}

impl MeshMaterialSlotExt for Mesh {
    fn with_polygon_material_slots(mut self, polygons: &PolyMesh) -> Result<Self, MeshError> {
        let topology = self.primitive_topology();
        if topology != PrimitiveTopology::TriangleList {
            return Err(MeshError::UnsupportedTopology { topology });
        }

        self.duplicate_vertices();

        let vertex_count = self
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .map(|a| a.len())
            .ok_or(MeshError::MissingPositions)?;

        if vertex_count != polygons.loop_count() {
            return Err(MeshError::LoopCountMismatch {
                expected: polygons.loop_count(),
                found: vertex_count,
            });
        }

        let slots: Vec<u32> = polygons
            .polygons()
            .iter()
            .flat_map(|p| std::iter::repeat_n(p.material_index, p.loop_total))
            .collect();

        self.insert_attribute(ATTRIBUTE_MATERIAL_SLOT, slots);
        Ok(self)
    }
}
