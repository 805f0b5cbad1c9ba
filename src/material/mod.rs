//! Materials known to a batch run, and the Bevy systems that assign them.
//!
//! [`MaterialLibrary`] is the set of materials meshes may reference by name.
//! The systems in this module load the [`TileRegistry`](crate::tile::TileRegistry)
//! at startup and process entities marked with [`AssignUdimMaterials`].

mod library;
mod systems;

pub use library::{DEFAULT_BASE_COLOR, MaterialDef, MaterialLibrary};
pub use systems::{
    AssignUdimMaterials, TileLoadReport, UdimAssignment, UdimMaterialSystems, UdimSettings,
    assign_pending_meshes, load_tile_registry,
};
