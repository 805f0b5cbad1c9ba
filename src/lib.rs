//! # bevy_udim_id
//!
//! Assign materials to mesh polygons by sampling UDIM-tiled color-ID
//! textures.
//!
//! For every polygon, the centroid of its UV coordinates selects a UDIM tile
//! and a pixel in it. The pixel color is classified as red, green, blue or
//! none of them, and the polygon is pointed at the material mapped to that
//! class.
//!
//! ## Features
//!
//! - UDIM tile resolution from UV coordinates and file names
//! - Folder loading of `<udim>_<anything>.png|jpg|bmp` tiles
//! - Configurable material table and UV channel
//! - Staged per-mesh edits, committed once per mesh
//! - Structured reports for everything that was skipped
//! - A Bevy plugin that processes marked [`Mesh3d`](bevy::prelude::Mesh3d) entities
//!
//! ## Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_udim_id::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(UdimMaterialPlugin::new("assets/id_maps"))
//!         .add_systems(Startup, setup)
//!         .run();
//! }
//!
//! fn setup(mut commands: Commands, asset_server: Res<AssetServer>) {
//!     // The mesh needs a second UV channel laid out over the UDIM tiles
//!     commands.spawn((
//!         Mesh3d(asset_server.load("terrain.glb#Mesh0/Primitive0")),
//!         AssignUdimMaterials,
//!     ));
//! }
//! ```
//!
//! Without Bevy's ECS, use [`BatchDriver`](batch::BatchDriver) directly on
//! [`PolyMesh`](mesh::PolyMesh) values.

pub mod batch;
pub mod classify;
pub mod material;
pub mod mesh;
pub mod palette;
mod plugin;
pub mod report;
pub mod tile;
pub mod udim;

pub mod prelude {
    pub use crate::batch::{BatchDriver, BatchError, BatchOptions};
    pub use crate::classify::{CLASSIFY_THRESHOLD, classify};
    pub use crate::material::{
        AssignUdimMaterials, MaterialDef, MaterialLibrary, TileLoadReport, UdimAssignment,
        UdimMaterialSystems, UdimSettings,
    };
    pub use crate::mesh::{
        ATTRIBUTE_MATERIAL_SLOT, MeshEdit, MeshMaterialSlotExt, PolyMesh, PolyMeshBuilder,
        UV_CHANNEL_1, UV_CHANNEL_2,
    };
    pub use crate::palette::{MaterialKey, MaterialTable};
    pub use crate::plugin::UdimMaterialPlugin;
    pub use crate::report::{BatchReport, MeshReport, SkipReason, SkipRecord};
    pub use crate::tile::{TextureTile, TileRegistry};
    pub use crate::udim::{udim_from_filename, udim_from_uv};
}
