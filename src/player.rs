use bevy::prelude::*;

use crate::camera::{FirstPerson, MainCamera};
use crate::game::collision::{clamp_to_room, resolve_movement};
use crate::game::config::RoomConfig;
use crate::game::phase::GamePhase;
use crate::input::MovementIntent;
use crate::visual::props::Obstacle;
use crate::visual::setup::ROOM_HALF_SIZE;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, move_player.run_if(in_state(GamePhase::Playing)));
    }
}

/// World-space step for this frame. Movement stays on the floor plane
/// whatever the camera pitch.
pub fn walk_delta(yaw: f32, axes: Vec2, speed: f32, dt: f32) -> Vec3 {
    let turn = Quat::from_rotation_y(yaw);
    let forward = turn * Vec3::NEG_Z;
    let right = turn * Vec3::X;
    (right * axes.x + forward * axes.y) * speed * dt
}

fn move_player(
    time: Res<Time>,
    intent: Res<MovementIntent>,
    config: Res<RoomConfig>,
    obstacles: Query<&Obstacle>,
    mut camera: Query<(&mut Transform, &FirstPerson), With<MainCamera>>,
) {
    if intent.axes == Vec2::ZERO {
        return;
    }
    let Ok((mut transform, look)) = camera.single_mut() else {
        return;
    };

    let player = &config.player;
    let delta = walk_delta(look.yaw, intent.axes, player.speed, time.delta_secs());
    let bounds: Vec<_> = obstacles.iter().map(|o| o.0).collect();

    let next = resolve_movement(
        transform.translation,
        delta,
        player.radius,
        player.eye_height,
        &bounds,
    );
    transform.translation = clamp_to_room(next, ROOM_HALF_SIZE, player.radius);
}
