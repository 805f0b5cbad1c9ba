//! Structured diagnostics for tile loading and material assignment.
//!
//! Every item the batch skips produces a [`SkipRecord`]. Records are logged
//! as they are created and collected into [`MeshReport`]s and a
//! [`BatchReport`] so callers can inspect them instead of scraping logs.

use std::path::PathBuf;

use bevy::log::warn;
use thiserror::Error;

use crate::palette::MaterialKey;

/// Why an item was skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The mesh has no UV layer with the required name. The whole mesh is
    /// left untouched.
    #[error("UV channel '{channel}' not found")]
    MissingUvChannel { channel: String },

    /// The polygon's centroid falls in a UDIM with no loaded tile.
    #[error("no tile loaded for UDIM {udim}")]
    UnresolvedTile { udim: i32 },

    /// The classified material does not exist and creation is disabled.
    #[error("material '{name}' does not exist")]
    MissingMaterial { name: String },

    /// The classified material is not in the mesh's slot list.
    #[error("material '{name}' is not assigned to a slot")]
    MissingMaterialSlot { name: String },

    /// A tile file matched the naming convention but could not be loaded.
    #[error("failed to load tile '{}': {message}", path.display())]
    TileLoadFailure { path: PathBuf, message: String },
}

/// One skipped mesh, polygon or tile file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkipRecord {
    /// Mesh the record belongs to; `None` for tile loading.
    pub mesh: Option<String>,
    /// Polygon index; `None` when the whole mesh or a tile file was skipped.
    pub polygon: Option<usize>,
    pub reason: SkipReason,
}

impl SkipRecord {
    pub fn mesh(mesh: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            mesh: Some(mesh.into()),
            polygon: None,
            reason,
        }
    }

    pub fn polygon(mesh: impl Into<String>, polygon: usize, reason: SkipReason) -> Self {
        Self {
            mesh: Some(mesh.into()),
            polygon: Some(polygon),
            reason,
        }
    }

    pub fn tile(reason: SkipReason) -> Self {
        Self {
            mesh: None,
            polygon: None,
            reason,
        }
    }

    /// Emit the record as a warning.
    pub fn log(&self) {
        warn!("{}", self);
    }
}

impl std::fmt::Display for SkipRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.mesh, self.polygon) {
            (Some(mesh), Some(polygon)) => {
                write!(f, "skipped polygon {polygon} of '{mesh}': {}", self.reason)
            }
            (Some(mesh), None) => write!(f, "skipped mesh '{mesh}': {}", self.reason),
            _ => write!(f, "skipped: {}", self.reason),
        }
    }
}

/// Outcome of assigning materials to one mesh.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MeshReport {
    pub mesh: String,
    /// Polygons that received a material index.
    pub assigned: usize,
    /// Assigned polygons per key, indexed by [`MaterialKey::index`].
    pub key_counts: [usize; MaterialKey::COUNT],
    /// Materials created in the library during this mesh's pass.
    pub created_materials: Vec<String>,
    pub skips: Vec<SkipRecord>,
}

impl MeshReport {
    pub fn new(mesh: impl Into<String>) -> Self {
        Self {
            mesh: mesh.into(),
            ..Default::default()
        }
    }

    /// Number of polygons classified as `key`.
    pub fn count(&self, key: MaterialKey) -> usize {
        self.key_counts[key.index()]
    }

    /// True when the mesh was skipped entirely.
    pub fn mesh_skipped(&self) -> bool {
        self.skips.iter().any(|s| s.polygon.is_none())
    }

    pub(crate) fn skip(&mut self, record: SkipRecord) {
        record.log();
        self.skips.push(record);
    }
}

/// Outcome of a whole batch run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub meshes: Vec<MeshReport>,
}

impl BatchReport {
    /// All skip records across meshes, in processing order.
    pub fn skips(&self) -> impl Iterator<Item = &SkipRecord> {
        self.meshes.iter().flat_map(|m| m.skips.iter())
    }

    /// Total polygons that received a material index.
    pub fn assigned(&self) -> usize {
        self.meshes.iter().map(|m| m.assigned).sum()
    }

    pub fn mesh(&self, name: &str) -> Option<&MeshReport> {
        self.meshes.iter().find(|m| m.mesh == name)
    }
}
