//! Systems for loading UDIM tiles and assigning materials to Bevy meshes.

use std::path::PathBuf;

use bevy::prelude::*;

use super::library::MaterialLibrary;
use crate::batch::{BatchDriver, BatchOptions};
use crate::mesh::{MeshMaterialSlotExt, PolyMesh};
use crate::palette::MaterialTable;
use crate::report::{MeshReport, SkipRecord};
use crate::tile::{TileLoadOutcome, TileRegistry};

/// System set for UDIM material systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct UdimMaterialSystems;

/// Runtime settings used by the systems.
#[derive(Resource, Clone, Debug, Default)]
pub struct UdimSettings {
    /// Folder scanned for tiles at startup. `None` leaves the registry as is.
    pub tile_dir: Option<PathBuf>,
    pub table: MaterialTable,
    pub options: BatchOptions,
}

/// Tile files from the last folder scan that matched the naming convention
/// but could not be loaded.
#[derive(Resource, Clone, Debug, Default)]
pub struct TileLoadReport {
    pub failures: Vec<SkipRecord>,
}

/// Marker component for entities whose mesh should get material slots.
///
/// Removed once the mesh has been processed, or when the material table in
/// [`UdimSettings`] is invalid.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct AssignUdimMaterials;

/// Result of assigning materials to an entity's mesh.
#[derive(Component, Clone, Debug)]
pub struct UdimAssignment {
    /// Material slot list; `ATTRIBUTE_MATERIAL_SLOT` values index into it.
    pub slots: Vec<String>,
    pub report: MeshReport,
}

/// Startup system that fills the [`TileRegistry`] from the configured folder
/// and records failed files in [`TileLoadReport`].
pub fn load_tile_registry(
    settings: Res<UdimSettings>,
    mut registry: ResMut<TileRegistry>,
    mut report: ResMut<TileLoadReport>,
) {
    let Some(dir) = &settings.tile_dir else {
        debug!("No tile folder configured");
        return;
    };

    match TileRegistry::load_dir(dir) {
        Ok(TileLoadOutcome {
            registry: loaded,
            failures,
        }) => {
            *registry = loaded;
            report.failures = failures;
        }
        Err(e) => warn!("{}", e),
    }
}

/// System that assigns materials to every mesh marked with
/// [`AssignUdimMaterials`].
///
/// Meshes whose asset is not loaded yet keep their marker and are retried on
/// the next update. With an invalid material table nothing can be assigned,
/// so every pending marker is dropped without a [`UdimAssignment`].
pub fn assign_pending_meshes(
    mut commands: Commands,
    pending: Query<(Entity, &Mesh3d, Option<&Name>), With<AssignUdimMaterials>>,
    mut meshes: ResMut<Assets<Mesh>>,
    registry: Res<TileRegistry>,
    settings: Res<UdimSettings>,
    mut library: ResMut<MaterialLibrary>,
) {
    if pending.is_empty() {
        return;
    }

    let driver = match BatchDriver::new(&registry, &settings.table, settings.options.clone()) {
        Ok(driver) => driver,
        Err(e) => {
            error!(
                "Cannot assign UDIM materials to {} meshes: {}",
                pending.iter().count(),
                e
            );
            for (entity, ..) in &pending {
                commands.entity(entity).remove::<AssignUdimMaterials>();
            }
            return;
        }
    };

    for (entity, mesh3d, name) in &pending {
        let Some(mesh) = meshes.get(&mesh3d.0) else {
            continue;
        };

        let name = name.map_or_else(|| entity.to_string(), |n| n.as_str().to_string());

        let mut poly = match PolyMesh::from_bevy_mesh(name.as_str(), mesh) {
            Ok(poly) => poly,
            Err(e) => {
                warn!("Cannot read mesh '{}': {}", name, e);
                commands.entity(entity).remove::<AssignUdimMaterials>();
                continue;
            }
        };

        let report = driver.assign_mesh(&mut poly, &mut library);

        if !report.mesh_skipped() {
            match mesh.clone().with_polygon_material_slots(&poly) {
                Ok(updated) => {
                    if let Some(target) = meshes.get_mut(&mesh3d.0) {
                        *target = updated;
                    }
                }
                Err(e) => warn!("Cannot write material slots to '{}': {}", name, e),
            }
        }

        commands
            .entity(entity)
            .remove::<AssignUdimMaterials>()
            .insert(UdimAssignment {
                slots: poly.material_slots().to_vec(),
                report,
            });
    }
}
