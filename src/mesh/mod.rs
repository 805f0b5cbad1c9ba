//! Mesh data as seen by material assignment.
//!
//! [`PolyMesh`] is an explicit, caller-owned polygon mesh: polygons made of
//! loops, named per-loop UV layers, a material slot list and one material
//! index per polygon. Changes are staged in a [`MeshEdit`] and applied with
//! [`PolyMesh::commit`].
//!
//! Bevy meshes can be read with [`PolyMesh::from_bevy_mesh`], and the
//! resulting slot indices written back as the [`ATTRIBUTE_MATERIAL_SLOT`]
//! vertex attribute through [`MeshMaterialSlotExt`].

mod attributes;
mod builder;
mod convert;
mod error;
mod poly;

pub use attributes::ATTRIBUTE_MATERIAL_SLOT;
pub use builder::PolyMeshBuilder;
pub use convert::{MeshMaterialSlotExt, UV_CHANNEL_1, UV_CHANNEL_2};
pub use error::MeshError;
pub use poly::{MeshEdit, PolyMesh, Polygon, UvLayer};
