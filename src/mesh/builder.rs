//! Builder for polygon meshes.

use bevy::math::Vec2;

use super::error::MeshError;
use super::poly::{PolyMesh, UvLayer};

/// Builder for creating [`PolyMesh`] values.
///
/// # Example
/// ```
/// use bevy::math::vec2;
/// use bevy_udim_id::mesh::PolyMeshBuilder;
///
/// let mesh = PolyMeshBuilder::new("Ground")
///     .with_uv_layer("UVChannel_2")
///     .with_polygon([vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(1.0, 1.0), vec2(0.0, 1.0)])
///     .with_polygon([vec2(1.0, 0.0), vec2(2.0, 0.0), vec2(2.0, 1.0)])
///     .build()
///     .unwrap();
///
/// assert_eq!(mesh.polygon_count(), 2);
/// assert_eq!(mesh.loop_count(), 7);
/// ```
#[derive(Clone, Debug)]
pub struct PolyMeshBuilder {
    name: String,
    loop_totals: Vec<usize>,
    uv_layers: Vec<(String, Vec<Vec2>)>,
    material_slots: Vec<String>,
    selected: bool,
}

impl PolyMeshBuilder {
    /// Create a new empty builder. Meshes start out selected.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            loop_totals: Vec::new(),
            uv_layers: Vec::new(),
            material_slots: Vec::new(),
            selected: true,
        }
    }

    /// Declare a UV layer.
    ///
    /// Polygons added afterwards write their corners into it. Declaring a
    /// layer after polygons were added leaves it short unless it is filled
    /// with [`with_layer_uvs`](Self::with_layer_uvs).
    pub fn with_uv_layer(mut self, name: impl Into<String>) -> Self {
        self.uv_layers.push((name.into(), Vec::new()));
        self
    }

    /// Add a polygon whose corners are written to every declared UV layer.
    pub fn with_polygon(mut self, corners: impl IntoIterator<Item = impl Into<Vec2>>) -> Self {
        self.push_polygon(corners);
        self
    }

    /// Add a polygon (mutable version for loops).
    pub fn push_polygon(&mut self, corners: impl IntoIterator<Item = impl Into<Vec2>>) {
        let corners: Vec<Vec2> = corners.into_iter().map(Into::into).collect();
        for (_, uvs) in &mut self.uv_layers {
            uvs.extend_from_slice(&corners);
        }
        self.loop_totals.push(corners.len());
    }

    /// Replace (or add) a whole UV layer, one coordinate per loop.
    pub fn with_layer_uvs(mut self, name: impl Into<String>, uvs: Vec<Vec2>) -> Self {
        let name = name.into();
        match self.uv_layers.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = uvs,
            None => self.uv_layers.push((name, uvs)),
        }
        self
    }

    /// Append a material slot.
    pub fn with_material_slot(mut self, name: impl Into<String>) -> Self {
        self.material_slots.push(name.into());
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Get the current polygon count.
    pub fn polygon_count(&self) -> usize {
        self.loop_totals.len()
    }

    /// Build the mesh, checking polygon and UV layer consistency.
    pub fn build(self) -> Result<PolyMesh, MeshError> {
        let uv_layers = self
            .uv_layers
            .into_iter()
            .map(|(name, uvs)| UvLayer::new(name, uvs))
            .collect();

        let mut mesh =
            PolyMesh::from_parts(self.name, &self.loop_totals, uv_layers, self.material_slots)?;
        mesh.selected = self.selected;
        Ok(mesh)
    }
}
