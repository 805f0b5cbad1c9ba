//! Batch material assignment.
//!
//! For every selected mesh and every polygon: take the polygon's centroid in
//! the configured UV channel, find the UDIM tile under it, sample the tile,
//! classify the color and point the polygon at the slot holding the mapped
//! material. Per-mesh changes are staged in a [`MeshEdit`] and committed once
//! the whole mesh has been classified.

use bevy::log::{debug, error, info};
use bevy::math::Vec2;
use bevy::prelude::Reflect;
use thiserror::Error;

use crate::classify::classify;
use crate::material::MaterialLibrary;
use crate::mesh::{MeshEdit, PolyMesh, UV_CHANNEL_2};
use crate::palette::{MaterialKey, MaterialTable, MaterialTableError};
use crate::report::{BatchReport, MeshReport, SkipReason, SkipRecord};
use crate::tile::TileRegistry;
use crate::udim::udim_from_uv;

/// Errors that prevent a batch from starting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatchError {
    #[error("Invalid material table: {0}")]
    InvalidTable(#[from] MaterialTableError),
}

/// Settings for a batch run.
#[derive(Clone, Debug, PartialEq, Eq, Reflect)]
pub struct BatchOptions {
    /// UV layer sampled for every polygon. Meshes without it are skipped.
    ///
    /// Default: `"UVChannel_2"`
    pub uv_channel: String,

    /// Create materials missing from the library.
    ///
    /// When `false`, polygons whose material does not exist are skipped.
    /// Default: `true`
    pub create_missing_materials: bool,

    /// Append materials missing from a mesh's slot list.
    ///
    /// When `false`, polygons whose material has no slot are skipped.
    /// Default: `true`
    pub append_missing_slots: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            uv_channel: UV_CHANNEL_2.to_string(),
            create_missing_materials: true,
            append_missing_slots: true,
        }
    }
}

impl BatchOptions {
    pub fn with_uv_channel(mut self, channel: impl Into<String>) -> Self {
        self.uv_channel = channel.into();
        self
    }

    pub fn with_create_missing_materials(mut self, create: bool) -> Self {
        self.create_missing_materials = create;
        self
    }

    pub fn with_append_missing_slots(mut self, append: bool) -> Self {
        self.append_missing_slots = append;
        self
    }
}

/// Runs material assignment against a tile registry and material table.
///
/// The driver holds no state between meshes, so running it twice over
/// unchanged inputs produces the same indices.
///
/// # Example
/// ```
/// use bevy::math::vec2;
/// use bevy_udim_id::prelude::*;
///
/// let tiles = TileRegistry::new().with_tile(1001, TextureTile::filled(8, 8, [0.0, 0.0, 1.0, 1.0]));
/// let table = MaterialTable::default();
/// let driver = BatchDriver::new(&tiles, &table, BatchOptions::default()).unwrap();
///
/// let mut meshes = vec![PolyMeshBuilder::new("Quad")
///     .with_uv_layer("UVChannel_2")
///     .with_polygon([vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(1.0, 1.0), vec2(0.0, 1.0)])
///     .build()
///     .unwrap()];
/// let mut library = MaterialLibrary::new();
///
/// let report = driver.run(&mut meshes, &mut library);
/// assert_eq!(report.assigned(), 1);
/// assert_eq!(meshes[0].material_slots(), ["id55_sand_01".to_string()]);
/// ```
#[derive(Clone, Debug)]
pub struct BatchDriver<'a> {
    tiles: &'a TileRegistry,
    table: &'a MaterialTable,
    options: BatchOptions,
}

impl<'a> BatchDriver<'a> {
    /// Create a driver. Fails if the material table is invalid.
    pub fn new(
        tiles: &'a TileRegistry,
        table: &'a MaterialTable,
        options: BatchOptions,
    ) -> Result<Self, BatchError> {
        table.validate()?;
        Ok(Self {
            tiles,
            table,
            options,
        })
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Classify the color under `uv`.
    pub fn classify_uv(&self, uv: Vec2) -> Result<MaterialKey, SkipReason> {
        let udim = udim_from_uv(uv);
        let tile = self
            .tiles
            .get(udim)
            .ok_or(SkipReason::UnresolvedTile { udim })?;
        Ok(classify(tile.sample(uv)))
    }

    /// Assign materials to every selected mesh, in order.
    ///
    /// Each mesh is committed before the next one starts.
    pub fn run(&self, meshes: &mut [PolyMesh], library: &mut MaterialLibrary) -> BatchReport {
        let mut report = BatchReport::default();

        for mesh in meshes.iter_mut() {
            if !mesh.selected {
                debug!("Skipping unselected mesh '{}'", mesh.name());
                continue;
            }
            report.meshes.push(self.assign_mesh(mesh, library));
        }

        info!(
            "Assigned {} polygons across {} meshes ({} skipped)",
            report.assigned(),
            report.meshes.len(),
            report.skips().count()
        );

        report
    }

    /// Assign materials to one mesh, regardless of its selection flag.
    pub fn assign_mesh(&self, mesh: &mut PolyMesh, library: &mut MaterialLibrary) -> MeshReport {
        let mesh_name = mesh.name().to_string();
        let mut report = MeshReport::new(mesh_name.as_str());

        let Some(edit) = self.stage_mesh(mesh, library, &mut report) else {
            return report;
        };

        match mesh.commit(edit) {
            Ok(assigned) => report.assigned = assigned,
            Err(e) => error!("Failed to commit '{}': {}", mesh_name, e),
        }

        debug!(
            "'{}': {} assigned, {} skipped",
            mesh_name,
            report.assigned,
            report.skips.len()
        );

        report
    }

    /// Classify every polygon of `mesh` into a staged edit.
    ///
    /// Returns `None` when the whole mesh is skipped.
    fn stage_mesh(
        &self,
        mesh: &PolyMesh,
        library: &mut MaterialLibrary,
        report: &mut MeshReport,
    ) -> Option<MeshEdit> {
        let channel = &self.options.uv_channel;
        let Some(layer) = mesh.uv_layer(channel) else {
            report.skip(SkipRecord::mesh(
                mesh.name(),
                SkipReason::MissingUvChannel {
                    channel: channel.clone(),
                },
            ));
            return None;
        };

        let mut edit = mesh.begin_edit();

        for (index, polygon) in mesh.polygons().iter().enumerate() {
            // Polygons owned by the mesh always have loops in every layer.
            let Some(uv) = layer.centroid(polygon) else {
                continue;
            };
            let key = match self.classify_uv(uv) {
                Ok(key) => key,
                Err(reason) => {
                    report.skip(SkipRecord::polygon(mesh.name(), index, reason));
                    continue;
                }
            };

            let name = self.table.name(key);

            if !library.contains(name) {
                if !self.options.create_missing_materials {
                    report.skip(SkipRecord::polygon(
                        mesh.name(),
                        index,
                        SkipReason::MissingMaterial {
                            name: name.to_string(),
                        },
                    ));
                    continue;
                }
                library.ensure(name);
                report.created_materials.push(name.to_string());
            }

            let slot = match edit.slot_index(mesh, name) {
                Some(slot) => slot,
                None if self.options.append_missing_slots => edit.append_slot(name),
                None => {
                    report.skip(SkipRecord::polygon(
                        mesh.name(),
                        index,
                        SkipReason::MissingMaterialSlot {
                            name: name.to_string(),
                        },
                    ));
                    continue;
                }
            };

            edit.set_material_index(index, slot);
            report.key_counts[key.index()] += 1;
        }

        Some(edit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::MaterialDef;
    use crate::mesh::PolyMeshBuilder;
    use crate::tile::TextureTile;
    use bevy::math::vec2;

    const RED: [f32; 4] = [0.9, 0.1, 0.1, 1.0];
    const GREEN: [f32; 4] = [0.1, 0.9, 0.1, 1.0];
    const BLUE: [f32; 4] = [0.1, 0.1, 0.9, 1.0];
    const GRAY: [f32; 4] = [0.5, 0.5, 0.5, 1.0];

    fn unit_quad(offset: Vec2) -> [Vec2; 4] {
        [
            offset + vec2(0.0, 0.0),
            offset + vec2(1.0, 0.0),
            offset + vec2(1.0, 1.0),
            offset + vec2(0.0, 1.0),
        ]
    }

    /// Small square around `center`.
    fn patch(center: Vec2) -> [Vec2; 4] {
        let d = 0.05;
        [
            center + vec2(-d, -d),
            center + vec2(d, -d),
            center + vec2(d, d),
            center + vec2(-d, d),
        ]
    }

    /// UDIM 1001: left half red, right half green. UDIM 1002: gray.
    fn registry() -> TileRegistry {
        let split = TextureTile::new(2, 1, vec![RED, GREEN]).unwrap();
        TileRegistry::new()
            .with_tile(1001, split)
            .with_tile(1002, TextureTile::filled(4, 4, GRAY))
    }

    fn driver<'a>(tiles: &'a TileRegistry, table: &'a MaterialTable) -> BatchDriver<'a> {
        BatchDriver::new(tiles, table, BatchOptions::default()).unwrap()
    }

    #[test]
    fn test_single_blue_quad() {
        let tiles = TileRegistry::new().with_tile(1001, TextureTile::filled(16, 16, BLUE));
        let table = MaterialTable::default();
        let mut mesh = PolyMeshBuilder::new("Quad")
            .with_uv_layer(UV_CHANNEL_2)
            .with_polygon(unit_quad(Vec2::ZERO))
            .build()
            .unwrap();
        let mut library = MaterialLibrary::new();

        let report = driver(&tiles, &table).assign_mesh(&mut mesh, &mut library);

        assert_eq!(report.assigned, 1);
        assert_eq!(report.count(MaterialKey::Blue), 1);
        assert!(report.skips.is_empty());
        let blue_slot = mesh.slot_index("id55_sand_01").unwrap();
        assert_eq!(mesh.material_indices(), vec![blue_slot]);
        assert!(library.contains("id55_sand_01"));
        assert_eq!(report.created_materials, vec!["id55_sand_01".to_string()]);
    }

    #[test]
    fn test_mixed_mesh() {
        let tiles = registry();
        let table = MaterialTable::default();
        let mut mesh = PolyMeshBuilder::new("Terrain")
            .with_uv_layer(UV_CHANNEL_2)
            .with_polygon(patch(vec2(0.25, 0.5)))
            .with_polygon(patch(vec2(0.75, 0.5)))
            .with_polygon(patch(vec2(1.5, 0.5)))
            .with_polygon(patch(vec2(0.3, 0.5)))
            .build()
            .unwrap();
        let mut library = MaterialLibrary::new();

        let report = driver(&tiles, &table).assign_mesh(&mut mesh, &mut library);

        assert_eq!(report.assigned, 4);
        assert_eq!(report.count(MaterialKey::Red), 2);
        assert_eq!(report.count(MaterialKey::Green), 1);
        assert_eq!(report.count(MaterialKey::Default), 1);
        // Slots are appended in order of first use.
        assert_eq!(
            mesh.material_slots(),
            [
                "id231_stn_03".to_string(),
                "id100_r_land_02".to_string(),
                "id165_wild_grass_5".to_string()
            ]
        );
        assert_eq!(mesh.material_indices(), vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_existing_slots_are_reused() {
        let tiles = registry();
        let table = MaterialTable::default();
        let mut mesh = PolyMeshBuilder::new("Terrain")
            .with_uv_layer(UV_CHANNEL_2)
            .with_polygon(patch(vec2(0.75, 0.5)))
            .with_material_slot("unrelated")
            .with_material_slot("id100_r_land_02")
            .build()
            .unwrap();
        let mut library = MaterialLibrary::new().with_material(MaterialDef::new("id100_r_land_02"));

        let report = driver(&tiles, &table).assign_mesh(&mut mesh, &mut library);

        assert!(report.created_materials.is_empty());
        assert_eq!(mesh.material_slots().len(), 2);
        assert_eq!(mesh.material_indices(), vec![1]);
    }

    #[test]
    fn test_missing_uv_channel_skips_mesh() {
        let tiles = registry();
        let table = MaterialTable::default();
        let mut mesh = PolyMeshBuilder::new("NoUv2")
            .with_uv_layer("UVChannel_1")
            .with_polygon(patch(vec2(0.25, 0.5)))
            .build()
            .unwrap();
        let before = mesh.clone();
        let mut library = MaterialLibrary::new();

        let report = driver(&tiles, &table).assign_mesh(&mut mesh, &mut library);

        assert_eq!(report.assigned, 0);
        assert!(report.mesh_skipped());
        assert_eq!(
            report.skips,
            vec![SkipRecord::mesh(
                "NoUv2",
                SkipReason::MissingUvChannel {
                    channel: "UVChannel_2".into()
                }
            )]
        );
        assert_eq!(mesh, before);
        assert!(library.is_empty());
    }

    #[test]
    fn test_unresolved_tile_skips_polygon() {
        let tiles = registry();
        let table = MaterialTable::default();
        let mut mesh = PolyMeshBuilder::new("Wide")
            .with_uv_layer(UV_CHANNEL_2)
            .with_polygon(patch(vec2(0.25, 0.5)))
            .with_polygon(patch(vec2(4.5, 0.5)))
            .build()
            .unwrap();
        let mut library = MaterialLibrary::new();

        let report = driver(&tiles, &table).assign_mesh(&mut mesh, &mut library);

        assert_eq!(report.assigned, 1);
        assert_eq!(
            report.skips,
            vec![SkipRecord::polygon(
                "Wide",
                1,
                SkipReason::UnresolvedTile { udim: 1005 }
            )]
        );
        // The skipped polygon keeps its previous index.
        assert_eq!(mesh.material_indices(), vec![0, 0]);
    }

    #[test]
    fn test_missing_material_without_creation() {
        let tiles = registry();
        let table = MaterialTable::default();
        let options = BatchOptions::default().with_create_missing_materials(false);
        let driver = BatchDriver::new(&tiles, &table, options).unwrap();
        let mut mesh = PolyMeshBuilder::new("Terrain")
            .with_uv_layer(UV_CHANNEL_2)
            .with_polygon(patch(vec2(0.25, 0.5)))
            .with_polygon(patch(vec2(0.75, 0.5)))
            .build()
            .unwrap();
        let mut library = MaterialLibrary::new().with_material(MaterialDef::new("id231_stn_03"));

        let report = driver.assign_mesh(&mut mesh, &mut library);

        assert_eq!(report.assigned, 1);
        assert_eq!(library.len(), 1);
        assert_eq!(
            report.skips[0].reason,
            SkipReason::MissingMaterial {
                name: "id100_r_land_02".into()
            }
        );
    }

    #[test]
    fn test_missing_slot_without_append() {
        let tiles = registry();
        let table = MaterialTable::default();
        let options = BatchOptions::default().with_append_missing_slots(false);
        let driver = BatchDriver::new(&tiles, &table, options).unwrap();
        let mut mesh = PolyMeshBuilder::new("Terrain")
            .with_uv_layer(UV_CHANNEL_2)
            .with_polygon(patch(vec2(0.25, 0.5)))
            .with_polygon(patch(vec2(0.75, 0.5)))
            .with_material_slot("id100_r_land_02")
            .build()
            .unwrap();
        let mut library = MaterialLibrary::new();

        let report = driver.assign_mesh(&mut mesh, &mut library);

        assert_eq!(report.assigned, 1);
        assert_eq!(mesh.material_slots().len(), 1);
        assert_eq!(
            report.skips,
            vec![SkipRecord::polygon(
                "Terrain",
                0,
                SkipReason::MissingMaterialSlot {
                    name: "id231_stn_03".into()
                }
            )]
        );
    }

    #[test]
    fn test_custom_uv_channel_and_table() {
        let tiles = registry();
        let table = MaterialTable::default().with_green("moss");
        let options = BatchOptions::default().with_uv_channel("ids");
        let driver = BatchDriver::new(&tiles, &table, options).unwrap();
        let mut mesh = PolyMeshBuilder::new("Terrain")
            .with_uv_layer("ids")
            .with_polygon(patch(vec2(0.75, 0.5)))
            .build()
            .unwrap();
        let mut library = MaterialLibrary::new();

        driver.assign_mesh(&mut mesh, &mut library);

        assert_eq!(mesh.material_slots(), ["moss".to_string()]);
    }

    #[test]
    fn test_invalid_table_is_rejected() {
        let tiles = registry();
        let table = MaterialTable::default().with_red("");

        assert!(matches!(
            BatchDriver::new(&tiles, &table, BatchOptions::default()),
            Err(BatchError::InvalidTable(_))
        ));
    }

    #[test]
    fn test_run_only_selected() {
        let tiles = registry();
        let table = MaterialTable::default();
        let build = |name: &str, selected: bool| {
            PolyMeshBuilder::new(name)
                .with_uv_layer(UV_CHANNEL_2)
                .with_polygon(patch(vec2(0.25, 0.5)))
                .selected(selected)
                .build()
                .unwrap()
        };
        let mut meshes = vec![build("a", true), build("b", false), build("c", true)];
        let mut library = MaterialLibrary::new();

        let report = driver(&tiles, &table).run(&mut meshes, &mut library);

        assert_eq!(report.meshes.len(), 2);
        assert!(report.mesh("b").is_none());
        assert_eq!(meshes[0].material_slots().len(), 1);
        assert!(meshes[1].material_slots().is_empty());
        assert_eq!(meshes[2].material_slots().len(), 1);
        // Created once, reused by the second mesh.
        assert_eq!(library.len(), 1);
        assert_eq!(report.mesh("c").unwrap().created_materials.len(), 0);
    }

    #[test]
    fn test_run_continues_after_skipped_mesh() {
        let tiles = registry();
        let table = MaterialTable::default();
        let with_channel = |name: &str| {
            PolyMeshBuilder::new(name)
                .with_uv_layer(UV_CHANNEL_2)
                .with_polygon(patch(vec2(0.75, 0.5)))
                .build()
                .unwrap()
        };
        let without_channel = PolyMeshBuilder::new("b")
            .with_uv_layer("UVChannel_1")
            .with_polygon(patch(vec2(0.75, 0.5)))
            .with_material_slot("existing")
            .build()
            .unwrap();
        let mut meshes = vec![with_channel("a"), without_channel.clone(), with_channel("c")];
        let mut library = MaterialLibrary::new();

        let report = driver(&tiles, &table).run(&mut meshes, &mut library);

        assert_eq!(report.meshes.len(), 3);
        assert_eq!(report.assigned(), 2);
        assert_eq!(meshes[0].material_slots(), ["id100_r_land_02".to_string()]);
        assert_eq!(meshes[1], without_channel);
        assert_eq!(meshes[2].material_slots(), ["id100_r_land_02".to_string()]);

        let skips: Vec<_> = report.skips().collect();
        assert_eq!(
            skips,
            vec![&SkipRecord::mesh(
                "b",
                SkipReason::MissingUvChannel {
                    channel: "UVChannel_2".into()
                }
            )]
        );
    }

    #[test]
    fn test_run_is_idempotent() {
        let tiles = registry();
        let table = MaterialTable::default();
        let mut meshes = vec![
            PolyMeshBuilder::new("Terrain")
                .with_uv_layer(UV_CHANNEL_2)
                .with_polygon(patch(vec2(0.25, 0.5)))
                .with_polygon(patch(vec2(1.5, 0.5)))
                .with_polygon(patch(vec2(0.75, 0.5)))
                .with_polygon(patch(vec2(7.5, 3.5)))
                .build()
                .unwrap(),
        ];
        let mut library = MaterialLibrary::new();
        let driver = driver(&tiles, &table);

        let first_report = driver.run(&mut meshes, &mut library);
        let first = meshes.clone();
        let second_report = driver.run(&mut meshes, &mut library);

        assert_eq!(meshes, first);
        assert_eq!(first_report.assigned(), second_report.assigned());
        assert_eq!(
            first_report.skips().collect::<Vec<_>>(),
            second_report.skips().collect::<Vec<_>>()
        );
    }
}
