use bevy::math::bounding::Aabb3d;
use bevy::prelude::*;

use crate::{
    game::session::RoomSession,
    puzzle::{BoxId, CODE_LENGTH, LEVER_COUNT, PuzzleKind, TableId},
    visual::props::{BoxProp, Hitbox, KeypadLamp, KeypadPanel, LeverHandle, Obstacle, PickTarget},
};

use super::scene::{BOX_HALF, TABLE_SIZE, palette, table_center};

const LEVER_WIDTH: f32 = 0.1;
const LEVER_LENGTH: f32 = 1.0;
const LEVER_BASE_SIZE: Vec3 = Vec3::new(0.1, 0.08, 0.16);
/// Levers hang just off the right wall
const LEVER_X: f32 = 4.9;

/// Floor spots boxes start from, in box id order
const BOX_ORIGINS_XZ: [Vec2; 6] = [
    Vec2::new(2.5, -3.0),
    Vec2::new(2.0, -3.0),
    Vec2::new(1.0, -3.0),
    Vec2::new(0.5, -3.0),
    Vec2::new(-0.8, -3.0),
    Vec2::new(-1.4, -3.0),
];

/// Keypad panel on the back wall, right of the door
const KEYPAD_CENTER: Vec3 = Vec3::new(2.6, 1.4, -4.87);
const KEYPAD_PANEL_SIZE: Vec3 = Vec3::new(0.9, 1.2, 0.06);
const KEY_SIZE: Vec3 = Vec3::new(0.2, 0.2, 0.06);
const KEY_PITCH: f32 = 0.25;
const LAMP_SIZE: f32 = 0.12;

/// Phone-style layout; `None` leaves a gap
const KEY_ROWS: [[Option<u8>; 3]; 4] = [
    [Some(1), Some(2), Some(3)],
    [Some(4), Some(5), Some(6)],
    [Some(7), Some(8), Some(9)],
    [None, Some(0), None],
];

/// Pivot of lever `index` (bottom of the stick, on its base)
pub fn lever_pivot(index: usize) -> Vec3 {
    Vec3::new(LEVER_X, 0.6 + index as f32 * 0.7, -0.6 + index as f32 * 0.9)
}

pub fn box_origin(id: BoxId) -> Vec3 {
    let xz = BOX_ORIGINS_XZ[id.index() % BOX_ORIGINS_XZ.len()];
    Vec3::new(xz.x, BOX_HALF, xz.y)
}

/// Centre of a keypad key, laid out in a 3x4 grid on the panel
pub fn key_position(row: usize, col: usize) -> Vec3 {
    Vec3::new(
        KEYPAD_CENTER.x + (col as f32 - 1.0) * KEY_PITCH,
        KEYPAD_CENTER.y + 0.35 - row as f32 * KEY_PITCH,
        KEYPAD_CENTER.z + (KEYPAD_PANEL_SIZE.z + KEY_SIZE.z) * 0.5,
    )
}

/// Spawn the props of every puzzle wired to the door
pub fn setup_props(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    session: Res<RoomSession>,
) {
    let state = session.state();

    if state.is_enabled(PuzzleKind::Levers) {
        spawn_levers(&mut commands, &mut meshes, &mut materials);
    }
    if state.is_enabled(PuzzleKind::Tables) {
        spawn_tables_and_boxes(&mut commands, &mut meshes, &mut materials);
    }
    if state.is_enabled(PuzzleKind::Keypad) {
        spawn_keypad(&mut commands, &mut meshes, &mut materials);
    }

    info!("Props spawned for {:?}", state.enabled());
}

fn spawn_levers(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let lever_material = materials.add(StandardMaterial::from(palette::LEVER));
    let base_material = materials.add(StandardMaterial::from(palette::LEVER_BASE));
    let base_mesh = meshes.add(Cuboid::from_size(LEVER_BASE_SIZE));
    let stick_mesh = meshes.add(Cuboid::new(LEVER_WIDTH, LEVER_LENGTH, LEVER_WIDTH));

    for index in 0..LEVER_COUNT {
        let pivot = lever_pivot(index);

        commands.spawn((
            Mesh3d(base_mesh.clone()),
            MeshMaterial3d(base_material.clone()),
            Transform::from_translation(pivot),
        ));

        // The stick hangs off a pivot so it rotates about its bottom end.
        // The hitbox covers the stick in both positions.
        commands
            .spawn((
                Transform::from_translation(pivot),
                Visibility::default(),
                LeverHandle { index, angle: 0.0 },
                PickTarget::Lever(index),
                Hitbox {
                    offset: Vec3::new(0.0, LEVER_LENGTH * 0.45, 0.0),
                    half_size: Vec3::new(0.15, LEVER_LENGTH * 0.5, 0.4),
                },
                Name::new(format!("Lever {}", index)),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Mesh3d(stick_mesh.clone()),
                    MeshMaterial3d(lever_material.clone()),
                    Transform::from_xyz(0.0, LEVER_LENGTH * 0.5, 0.0),
                ));
            });
    }
}

fn spawn_tables_and_boxes(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let table_mesh = meshes.add(Cuboid::from_size(TABLE_SIZE));
    for table in TableId::all() {
        let center = table_center(table.index());
        commands.spawn((
            Mesh3d(table_mesh.clone()),
            MeshMaterial3d(materials.add(StandardMaterial::from(palette::TABLES[table.index()]))),
            Transform::from_translation(center),
            PickTarget::Table(table),
            Hitbox::centered(TABLE_SIZE * 0.5),
            Obstacle(Aabb3d::new(center, TABLE_SIZE * 0.5)),
            Name::new(format!("Table {}", table)),
        ));
    }

    let box_mesh = meshes.add(Cuboid::from_length(BOX_HALF * 2.0));
    let box_materials = palette::BOXES.map(|color| materials.add(StandardMaterial::from(color)));
    for id in BoxId::all() {
        let origin = box_origin(id);
        commands.spawn((
            Mesh3d(box_mesh.clone()),
            MeshMaterial3d(box_materials[id.color().0].clone()),
            Transform::from_translation(origin),
            BoxProp { id, origin },
            PickTarget::Box(id),
            Hitbox::centered(Vec3::splat(BOX_HALF)),
            Name::new(format!("Box {}", id)),
        ));
    }
}

fn spawn_keypad(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::from_size(KEYPAD_PANEL_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial::from(palette::KEYPAD_NEUTRAL))),
        Transform::from_translation(KEYPAD_CENTER),
        KeypadPanel,
        Obstacle(Aabb3d::new(KEYPAD_CENTER, KEYPAD_PANEL_SIZE * 0.5)),
        Name::new("Keypad"),
    ));

    let key_mesh = meshes.add(Cuboid::from_size(KEY_SIZE));
    let key_material = materials.add(StandardMaterial::from(palette::KEYPAD_KEY));
    for (row, keys) in KEY_ROWS.iter().enumerate() {
        for (col, key) in keys.iter().enumerate() {
            let Some(digit) = *key else {
                continue;
            };
            commands.spawn((
                Mesh3d(key_mesh.clone()),
                MeshMaterial3d(key_material.clone()),
                Transform::from_translation(key_position(row, col)),
                PickTarget::KeypadKey(digit),
                Hitbox::centered(KEY_SIZE * 0.5),
                Name::new(format!("Key {}", digit)),
            ));
        }
    }

    // Lamps need their own materials so each can light independently
    let lamp_mesh = meshes.add(Cuboid::from_length(LAMP_SIZE));
    for index in 0..CODE_LENGTH {
        let x = KEYPAD_CENTER.x + (index as f32 - 1.5) * (LAMP_SIZE + 0.06);
        commands.spawn((
            Mesh3d(lamp_mesh.clone()),
            MeshMaterial3d(materials.add(StandardMaterial::from(palette::LAMP_OFF))),
            Transform::from_xyz(
                x,
                KEYPAD_CENTER.y + KEYPAD_PANEL_SIZE.y * 0.5 + 0.15,
                KEYPAD_CENTER.z,
            ),
            KeypadLamp { index },
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visual::setup::scene::{ROOM_HALF_SIZE, WALL_HEIGHT};

    #[test]
    fn test_levers_hang_inside_the_room() {
        for index in 0..LEVER_COUNT {
            let pivot = lever_pivot(index);
            assert!(pivot.x < ROOM_HALF_SIZE);
            assert!(pivot.y + LEVER_LENGTH * 0.5 < WALL_HEIGHT);
        }
    }

    #[test]
    fn test_box_origins_are_distinct_and_on_the_floor() {
        let origins: Vec<Vec3> = BoxId::all().map(box_origin).collect();
        for (i, a) in origins.iter().enumerate() {
            assert_eq!(a.y, BOX_HALF);
            for b in &origins[i + 1..] {
                assert!(a.distance(*b) >= BOX_HALF * 2.0);
            }
        }
    }

    #[test]
    fn test_keys_do_not_overlap() {
        let a = key_position(0, 0);
        let b = key_position(0, 1);
        let c = key_position(1, 0);
        assert!(b.x - a.x > KEY_SIZE.x);
        assert!(a.y - c.y > KEY_SIZE.y);
        // keys sit proud of the panel
        assert!(a.z > KEYPAD_CENTER.z);
    }
}
