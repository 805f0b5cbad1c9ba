//! Plugin for UDIM material assignment.
use std::path::PathBuf;

use bevy::prelude::*;

use crate::batch::BatchOptions;
use crate::material::{
    MaterialLibrary, TileLoadReport, UdimMaterialSystems, UdimSettings, assign_pending_meshes,
    load_tile_registry,
};
use crate::palette::{MaterialKey, MaterialTable};
use crate::tile::TileRegistry;

/// Plugin that adds UDIM material assignment to Bevy.
///
/// This plugin registers:
/// - [`UdimSettings`], [`TileRegistry`], [`TileLoadReport`] and
///   [`MaterialLibrary`] resources
/// - A startup system that loads tiles from [`tile_dir`](Self::tile_dir)
/// - An update system that processes entities marked with
///   [`AssignUdimMaterials`](crate::material::AssignUdimMaterials)
///
/// # Example
/// ```ignore
/// use bevy::prelude::*;
/// use bevy_udim_id::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(UdimMaterialPlugin::new("assets/id_maps"))
///     .run();
/// ```
#[derive(Clone, Debug, Default)]
pub struct UdimMaterialPlugin {
    pub tile_dir: Option<PathBuf>,
    pub table: MaterialTable,
    pub options: BatchOptions,
}

impl UdimMaterialPlugin {
    pub fn new(tile_dir: impl Into<PathBuf>) -> Self {
        Self {
            tile_dir: Some(tile_dir.into()),
            ..Default::default()
        }
    }

    pub fn with_table(mut self, table: MaterialTable) -> Self {
        self.table = table;
        self
    }

    pub fn with_options(mut self, options: BatchOptions) -> Self {
        self.options = options;
        self
    }
}

impl Plugin for UdimMaterialPlugin {
    fn build(&self, app: &mut App) {
        if let Err(e) = self.table.validate() {
            warn!("{}; marked meshes will not be assigned", e);
        }

        app.register_type::<MaterialKey>()
            .register_type::<MaterialTable>()
            .register_type::<BatchOptions>()
            .insert_resource(UdimSettings {
                tile_dir: self.tile_dir.clone(),
                table: self.table.clone(),
                options: self.options.clone(),
            })
            .init_resource::<TileRegistry>()
            .init_resource::<TileLoadReport>()
            .init_resource::<MaterialLibrary>()
            .add_systems(Startup, load_tile_registry.in_set(UdimMaterialSystems))
            .add_systems(Update, assign_pending_meshes.in_set(UdimMaterialSystems));
    }
}
