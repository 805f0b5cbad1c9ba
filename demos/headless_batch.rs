//! Headless example that assigns materials to a grid of quads.
//!
//! Usage: `cargo run --example headless_batch -- <tile folder>`
//!
//! The folder should contain color-ID tiles named `<udim>_<anything>.png`.
//! The grid spans UDIMs 1001 to 1004 in its second UV channel.

use bevy::asset::RenderAssetUsages;
use bevy::log::LogPlugin;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use bevy_udim_id::prelude::*;

const CELLS: u32 = 8;
const TILES_U: f32 = 4.0;

fn main() {
    let tile_dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "assets/id_maps".to_string());

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()))
        .insert_resource(Assets::<Mesh>::default())
        .add_plugins(UdimMaterialPlugin::new(tile_dir))
        .add_systems(Startup, spawn_grid)
        .add_systems(PostUpdate, print_assignments);

    app.update();
    app.update();
}

fn spawn_grid(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    commands.spawn((
        Mesh3d(meshes.add(create_grid())),
        Name::new("Grid"),
        AssignUdimMaterials,
    ));
}

fn print_assignments(assignments: Query<&UdimAssignment, Added<UdimAssignment>>) {
    for assignment in &assignments {
        let report = &assignment.report;
        info!("{}: {} polygons assigned", report.mesh, report.assigned);
        for key in MaterialKey::ALL {
            info!("  {:>7}: {}", key, report.count(key));
        }
        for skip in &report.skips {
            info!("  {}", skip);
        }
        info!("Slots: {:?}", assignment.slots);
    }
}

/// A flat grid whose second UV channel stretches across several tiles.
fn create_grid() -> Mesh {
    let mut positions = Vec::new();
    let mut uv0 = Vec::new();
    let mut uv1 = Vec::new();
    let mut indices = Vec::new();

    for y in 0..=CELLS {
        for x in 0..=CELLS {
            let u = x as f32 / CELLS as f32;
            let v = y as f32 / CELLS as f32;
            positions.push([u, 0.0, v]);
            uv0.push([u, v]);
            uv1.push([u * TILES_U, v]);
        }
    }

    let row = CELLS + 1;
    for y in 0..CELLS {
        for x in 0..CELLS {
            let i = y * row + x;
            indices.extend_from_slice(&[i, i + 1, i + row, i + 1, i + row + 1, i + row]);
        }
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uv0);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_1, uv1);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}
