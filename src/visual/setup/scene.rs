use bevy::math::bounding::Aabb3d;
use bevy::prelude::*;

use crate::{
    game::config::RoomConfig,
    puzzle::TABLE_CAPACITY,
    visual::props::{DoorProp, Hitbox, Obstacle, PickTarget},
};

/// Walls sit this far from the centre on X and Z
pub const ROOM_HALF_SIZE: f32 = 5.0;
pub const WALL_HEIGHT: f32 = 3.0;
pub const WALL_THICKNESS: f32 = 0.2;
const FLOOR_SIZE: f32 = 20.0;

pub const DOOR_SIZE: Vec3 = Vec3::new(2.0, 2.5, 0.2);
pub const DOOR_POSITION: Vec3 = Vec3::new(0.0, 1.25, -4.9);

/// Half the edge of a puzzle box
pub const BOX_HALF: f32 = 0.15;
/// Extra height of a box while carried
pub const HOLD_LIFT: f32 = 0.25;

pub const TABLE_SIZE: Vec3 = Vec3::new(0.8, 1.0, 1.4);
/// Tables line the left wall
pub const TABLE_X: f32 = -4.6;
pub const TABLE_Z: [f32; 3] = [-1.6, 0.0, 1.6];

/// Slots sit nudged away from the wall, one towards each end of the table
const SLOT_WALL_OFFSET: f32 = 0.2;
const SLOT_Z_OFFSETS: [f32; TABLE_CAPACITY] = [-0.2, 0.2];

pub mod palette {
    use bevy::prelude::Color;

    pub const BACKGROUND: Color = Color::srgb(0.125, 0.137, 0.165);
    pub const FLOOR: Color = Color::srgb(0.2, 0.2, 0.2);
    pub const WALL: Color = Color::srgb(0.533, 0.533, 0.533);

    pub const DOOR_LOCKED: Color = Color::srgb(0.0, 1.0, 0.0);
    pub const DOOR_UNLOCKED: Color = Color::srgb(0.0, 0.0, 1.0);

    pub const LEVER: Color = Color::srgb(1.0, 0.0, 0.0);
    pub const LEVER_BASE: Color = Color::srgb(0.333, 0.333, 0.333);

    /// Orange, purple, green
    pub const TABLES: [Color; 3] = [
        Color::srgb(1.0, 0.647, 0.0),
        Color::srgb(0.502, 0.0, 0.502),
        Color::srgb(0.0, 1.0, 0.0),
    ];
    /// Red, yellow, blue (indexed by colour tag)
    pub const BOXES: [Color; 3] = [
        Color::srgb(1.0, 0.0, 0.0),
        Color::srgb(1.0, 1.0, 0.0),
        Color::srgb(0.0, 0.0, 1.0),
    ];

    pub const KEYPAD_NEUTRAL: Color = Color::srgb(0.267, 0.267, 0.267);
    pub const KEYPAD_ERROR: Color = Color::srgb(0.8, 0.12, 0.12);
    pub const KEYPAD_OPEN: Color = Color::srgb(0.12, 0.8, 0.24);
    pub const KEYPAD_KEY: Color = Color::srgb(0.867, 0.867, 0.867);
    pub const LAMP_OFF: Color = Color::srgb(0.133, 0.133, 0.133);
    pub const LAMP_ON: Color = Color::srgb(1.0, 0.78, 0.16);
}

/// Resting spot of a box in a table slot
pub fn slot_position(table_center: Vec3, slot: usize) -> Vec3 {
    let z = SLOT_Z_OFFSETS.get(slot).copied().unwrap_or(0.0);
    Vec3::new(
        table_center.x + SLOT_WALL_OFFSET,
        table_center.y + TABLE_SIZE.y * 0.5 + BOX_HALF,
        table_center.z + z,
    )
}

pub fn table_center(index: usize) -> Vec3 {
    Vec3::new(TABLE_X, TABLE_SIZE.y * 0.5, TABLE_Z[index % TABLE_Z.len()])
}

/// Walls, floor, door and lights
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    config: Res<RoomConfig>,
) {
    commands.insert_resource(ClearColor(palette::BACKGROUND));

    commands.spawn((
        PointLight {
            intensity: 2_000_000.0,
            range: 30.0,
            ..default()
        },
        Transform::from_xyz(0.0, WALL_HEIGHT - 0.2, 0.0),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 3_000.0,
            ..default()
        },
        Transform::from_xyz(5.0, 10.0, 7.5).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Floor
    let floor_material = materials.add(StandardMaterial {
        base_color_texture: config.textures.floor.clone().map(|path| asset_server.load(path)),
        ..StandardMaterial::from(palette::FLOOR)
    });
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(FLOOR_SIZE, FLOOR_SIZE))),
        MeshMaterial3d(floor_material),
        Transform::default(),
        Name::new("Floor"),
    ));

    // Walls
    let wall_material = materials.add(StandardMaterial {
        base_color_texture: config.textures.walls.clone().map(|path| asset_server.load(path)),
        ..StandardMaterial::from(palette::WALL)
    });
    let side = ROOM_HALF_SIZE * 2.0;
    let across_x = Vec3::new(side, WALL_HEIGHT, WALL_THICKNESS);
    let across_z = Vec3::new(WALL_THICKNESS, WALL_HEIGHT, side);
    let walls = [
        ("Back wall", Vec3::new(0.0, 0.0, -ROOM_HALF_SIZE), across_x),
        ("Front wall", Vec3::new(0.0, 0.0, ROOM_HALF_SIZE), across_x),
        ("Left wall", Vec3::new(-ROOM_HALF_SIZE, 0.0, 0.0), across_z),
        ("Right wall", Vec3::new(ROOM_HALF_SIZE, 0.0, 0.0), across_z),
    ];
    for (name, base, size) in walls {
        let center = base + Vec3::Y * WALL_HEIGHT * 0.5;
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::from_size(size))),
            MeshMaterial3d(wall_material.clone()),
            Transform::from_translation(center),
            Obstacle(Aabb3d::new(center, size * 0.5)),
            Name::new(name),
        ));
    }

    // Door gets its own material so it can be recoloured
    let door_material = materials.add(StandardMaterial::from(palette::DOOR_LOCKED));
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::from_size(DOOR_SIZE))),
        MeshMaterial3d(door_material),
        Transform::from_translation(DOOR_POSITION),
        DoorProp,
        PickTarget::Door,
        Hitbox::centered(DOOR_SIZE * 0.5),
        Name::new("Door"),
    ));

    info!("Room built: {}x{} walls, door at {:?}", side, side, DOOR_POSITION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_sit_on_table_top() {
        let center = table_center(1);
        let first = slot_position(center, 0);
        let second = slot_position(center, 1);

        assert!((first.y - (TABLE_SIZE.y + BOX_HALF)).abs() < 1e-6);
        assert_eq!(first.y, second.y);
        assert!(first.z < second.z);
        // nudged away from the left wall
        assert!(first.x > TABLE_X);
    }

    #[test]
    fn test_slots_stay_on_the_table() {
        for index in 0..TABLE_Z.len() {
            let center = table_center(index);
            for slot in 0..TABLE_CAPACITY {
                let p = slot_position(center, slot);
                assert!((p.x - center.x).abs() + BOX_HALF <= TABLE_SIZE.x * 0.5);
                assert!((p.z - center.z).abs() + BOX_HALF <= TABLE_SIZE.z * 0.5);
            }
        }
    }
}
