//! Polygon mesh with named UV layers and material slots.

use bevy::math::Vec2;

use super::error::MeshError;

/// One polygon: a contiguous run of loops plus its material slot index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Polygon {
    /// First loop of this polygon.
    pub loop_start: usize,
    /// Number of loops (corners), always at least one.
    pub loop_total: usize,
    /// Index into the mesh's material slot list.
    pub material_index: u32,
}

impl Polygon {
    #[inline]
    pub fn loops(&self) -> std::ops::Range<usize> {
        self.loop_start..self.loop_start + self.loop_total
    }
}

/// A named per-loop UV attribute.
#[derive(Clone, Debug, PartialEq)]
pub struct UvLayer {
    name: String,
    uvs: Vec<Vec2>,
}

impl UvLayer {
    pub fn new(name: impl Into<String>, uvs: Vec<Vec2>) -> Self {
        Self {
            name: name.into(),
            uvs,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// One coordinate per loop.
    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    /// Arithmetic mean of the polygon's loop coordinates.
    ///
    /// Returns `None` if the polygon has no loops or its loops lie outside
    /// this layer.
    pub fn centroid(&self, polygon: &Polygon) -> Option<Vec2> {
        if polygon.loop_total == 0 {
            return None;
        }
        let uvs = self.uvs.get(polygon.loops())?;
        let sum: Vec2 = uvs.iter().copied().sum();
        Some(sum / polygon.loop_total as f32)
    }
}

/// A polygon mesh as seen by material assignment.
///
/// The mesh owns its topology, UV layers and material slot list. Material
/// indices only change through [`PolyMesh::commit`], which applies a whole
/// [`MeshEdit`] at once.
#[derive(Clone, Debug, PartialEq)]
pub struct PolyMesh {
    name: String,
    polygons: Vec<Polygon>,
    loop_count: usize,
    uv_layers: Vec<UvLayer>,
    material_slots: Vec<String>,
    /// Whether batch runs should process this mesh.
    pub selected: bool,
}

impl PolyMesh {
    /// Assemble a mesh from per-polygon loop counts and per-loop UV layers.
    pub(crate) fn from_parts(
        name: String,
        loop_totals: &[usize],
        uv_layers: Vec<UvLayer>,
        material_slots: Vec<String>,
    ) -> Result<Self, MeshError> {
        let mut polygons = Vec::with_capacity(loop_totals.len());
        let mut loop_start = 0;
        for (polygon, &loop_total) in loop_totals.iter().enumerate() {
            if loop_total == 0 {
                return Err(MeshError::EmptyPolygon { polygon });
            }
            polygons.push(Polygon {
                loop_start,
                loop_total,
                material_index: 0,
            });
            loop_start += loop_total;
        }
        let loop_count = loop_start;

        for (i, layer) in uv_layers.iter().enumerate() {
            if uv_layers[..i].iter().any(|other| other.name == layer.name) {
                return Err(MeshError::DuplicateUvLayer {
                    name: layer.name.clone(),
                });
            }
            if layer.uvs.len() != loop_count {
                return Err(MeshError::UvCountMismatch {
                    name: layer.name.clone(),
                    expected: loop_count,
                    found: layer.uvs.len(),
                });
            }
        }

        Ok(Self {
            name,
            polygons,
            loop_count,
            uv_layers,
            material_slots,
            selected: true,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    pub fn loop_count(&self) -> usize {
        self.loop_count
    }

    pub fn uv_layers(&self) -> &[UvLayer] {
        &self.uv_layers
    }

    pub fn uv_layer(&self, name: &str) -> Option<&UvLayer> {
        self.uv_layers.iter().find(|layer| layer.name == name)
    }

    /// Centroid of `polygon` in the UV layer called `layer`.
    ///
    /// Returns `None` if the layer or polygon does not exist.
    pub fn polygon_centroid(&self, layer: &str, polygon: usize) -> Option<Vec2> {
        let layer = self.uv_layer(layer)?;
        let polygon = self.polygons.get(polygon)?;
        layer.centroid(polygon)
    }

    pub fn material_slots(&self) -> &[String] {
        &self.material_slots
    }

    /// Index of the slot holding material `name`.
    pub fn slot_index(&self, name: &str) -> Option<u32> {
        self.material_slots
            .iter()
            .position(|slot| slot == name)
            .map(|i| i as u32)
    }

    /// Material slot index of every polygon, in polygon order.
    pub fn material_indices(&self) -> Vec<u32> {
        self.polygons.iter().map(|p| p.material_index).collect()
    }

    /// Start staging changes against this mesh.
    pub fn begin_edit(&self) -> MeshEdit {
        MeshEdit {
            base_slot_count: self.material_slots.len(),
            ..Default::default()
        }
    }

    /// Apply a staged edit.
    ///
    /// The edit is validated first; on error nothing is applied. Returns the
    /// number of polygons whose index was written.
    pub fn commit(&mut self, edit: MeshEdit) -> Result<usize, MeshError> {
        let slot_count = self.material_slots.len() + edit.new_slots.len();

        for &(polygon, slot) in &edit.material_indices {
            if polygon >= self.polygons.len() {
                return Err(MeshError::PolygonOutOfRange {
                    polygon,
                    count: self.polygons.len(),
                });
            }
            if slot as usize >= slot_count {
                return Err(MeshError::SlotOutOfRange {
                    slot,
                    count: slot_count,
                });
            }
        }

        self.material_slots.extend(edit.new_slots);
        for &(polygon, slot) in &edit.material_indices {
            self.polygons[polygon].material_index = slot;
        }

        Ok(edit.material_indices.len())
    }
}

/// Staged changes to a [`PolyMesh`]: appended material slots and polygon
/// material indices.
///
/// Nothing is visible on the mesh until [`PolyMesh::commit`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MeshEdit {
    base_slot_count: usize,
    new_slots: Vec<String>,
    material_indices: Vec<(usize, u32)>,
}

impl MeshEdit {
    /// Slot index of `name`, looking at the mesh's slots and staged appends.
    pub fn slot_index(&self, mesh: &PolyMesh, name: &str) -> Option<u32> {
        mesh.slot_index(name).or_else(|| {
            self.new_slots
                .iter()
                .position(|slot| slot == name)
                .map(|i| (self.base_slot_count + i) as u32)
        })
    }

    /// Stage a new slot for `name` and return the index it will have.
    pub fn append_slot(&mut self, name: impl Into<String>) -> u32 {
        self.new_slots.push(name.into());
        (self.base_slot_count + self.new_slots.len() - 1) as u32
    }

    /// Stage a material index for `polygon`.
    pub fn set_material_index(&mut self, polygon: usize, slot: u32) {
        self.material_indices.push((polygon, slot));
    }

    pub fn new_slots(&self) -> &[String] {
        &self.new_slots
    }

    pub fn staged_polygons(&self) -> usize {
        self.material_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.new_slots.is_empty() && self.material_indices.is_empty()
    }
}
