//! Mesh construction, conversion and commit errors.

use bevy::mesh::PrimitiveTopology;
use thiserror::Error;

/// Errors that can occur when building, converting or editing a mesh.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("Polygon {polygon} has no loops")]
    EmptyPolygon { polygon: usize },

    #[error("UV layer '{name}' has {found} coordinates, expected one per loop ({expected})")]
    UvCountMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("UV layer '{name}' is declared more than once")]
    DuplicateUvLayer { name: String },

    #[error("Unsupported primitive topology {topology:?}, expected a triangle list")]
    UnsupportedTopology { topology: PrimitiveTopology },

    #[error("Mesh has no vertex positions")]
    MissingPositions,

    #[error("Index count {count} is not a multiple of 3")]
    IncompleteTriangles { count: usize },

    #[error("Vertex index {index} out of range for attribute '{attribute}' with {len} values")]
    IndexOutOfRange {
        attribute: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Attribute '{attribute}' has an unsupported format")]
    UnsupportedAttributeFormat { attribute: &'static str },

    #[error("Mesh has {found} vertices after un-indexing, expected {expected} from the polygon loops")]
    LoopCountMismatch { expected: usize, found: usize },

    #[error("Polygon {polygon} out of range ({count} polygons)")]
    PolygonOutOfRange { polygon: usize, count: usize },

    #[error("Material slot {slot} out of range ({count} slots)")]
    SlotOutOfRange { slot: u32, count: usize },
}
