use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

use crate::game::config::{ControlScheme, RoomConfig};
use crate::game::phase::GamePhase;
use crate::input::{MovementIntent, collect_pointer_events};
use crate::visual::RestartRoom;

/// Spawn point, inside the front half of the room looking at the door
const SPAWN_XZ: Vec2 = Vec2::new(0.0, 3.5);

/// Stop just short of straight up/down
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.05;

/// Radians per second for Q/E turning
const KEY_TURN_SPEED: f32 = 2.0;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                grab_cursor_on_click.after(collect_pointer_events),
                release_cursor_on_escape,
                (mouse_look, key_turn).run_if(in_state(GamePhase::Playing)),
                reset_camera_on_restart,
            ),
        )
        .add_systems(OnExit(GamePhase::Playing), release_cursor);
    }
}

#[derive(Component)]
pub struct MainCamera;

/// First-person view angles
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct FirstPerson {
    /// Turn about Y; 0 looks down -Z
    pub yaw: f32,
    /// Tilt about X; positive looks up
    pub pitch: f32,
}

impl FirstPerson {
    /// Turn by a mouse delta (pixels), keeping pitch out of the poles
    pub fn apply_mouse(&mut self, delta: Vec2, sensitivity: f32) {
        self.yaw -= delta.x * sensitivity;
        self.pitch = (self.pitch - delta.y * sensitivity).clamp(-MAX_PITCH, MAX_PITCH);
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }
}

/// Where the player stands at the start of a play-through
pub fn spawn_position(eye_height: f32) -> Vec3 {
    Vec3::new(SPAWN_XZ.x, eye_height, SPAWN_XZ.y)
}

/// Perspective camera at eye height
pub fn setup_camera(mut commands: Commands, config: Res<RoomConfig>) {
    let look = FirstPerson::default();
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 75.0_f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            ..default()
        }),
        Transform::from_translation(spawn_position(config.player.eye_height))
            .with_rotation(look.rotation()),
        look,
        MainCamera,
    ));
}

fn grab_cursor_on_click(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    config: Res<RoomConfig>,
    phase: Res<State<GamePhase>>,
    mut cursor: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    if config.controls != ControlScheme::PointerLock
        || *phase.get() != GamePhase::Playing
        || !mouse_buttons.just_pressed(MouseButton::Left)
    {
        return;
    }
    let Ok(mut options) = cursor.single_mut() else {
        return;
    };
    if options.grab_mode == CursorGrabMode::None {
        options.grab_mode = CursorGrabMode::Locked;
        options.visible = false;
        info!("Cursor locked");
    }
}

fn release_cursor_on_escape(
    keys: Res<ButtonInput<KeyCode>>,
    cursor: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        release_cursor(cursor);
    }
}

fn release_cursor(mut cursor: Query<&mut CursorOptions, With<PrimaryWindow>>) {
    let Ok(mut options) = cursor.single_mut() else {
        return;
    };
    if options.grab_mode != CursorGrabMode::None {
        options.grab_mode = CursorGrabMode::None;
        options.visible = true;
        info!("Cursor released");
    }
}

fn mouse_look(
    motion: Res<AccumulatedMouseMotion>,
    config: Res<RoomConfig>,
    cursor: Query<&CursorOptions, With<PrimaryWindow>>,
    mut camera: Query<(&mut Transform, &mut FirstPerson), With<MainCamera>>,
) {
    if config.controls != ControlScheme::PointerLock || motion.delta == Vec2::ZERO {
        return;
    }
    let Ok(options) = cursor.single() else {
        return;
    };
    if options.grab_mode == CursorGrabMode::None {
        return;
    }
    let Ok((mut transform, mut look)) = camera.single_mut() else {
        return;
    };

    look.apply_mouse(motion.delta, config.player.look_sensitivity);
    transform.rotation = look.rotation();
}

fn key_turn(
    time: Res<Time>,
    intent: Res<MovementIntent>,
    mut camera: Query<(&mut Transform, &mut FirstPerson), With<MainCamera>>,
) {
    if intent.turn == 0.0 {
        return;
    }
    let Ok((mut transform, mut look)) = camera.single_mut() else {
        return;
    };

    look.yaw += intent.turn * KEY_TURN_SPEED * time.delta_secs();
    transform.rotation = look.rotation();
}

fn reset_camera_on_restart(
    mut restarts: MessageReader<RestartRoom>,
    config: Res<RoomConfig>,
    mut camera: Query<(&mut Transform, &mut FirstPerson), With<MainCamera>>,
) {
    if restarts.read().last().is_none() {
        return;
    }
    let Ok((mut transform, mut look)) = camera.single_mut() else {
        return;
    };

    *look = FirstPerson::default();
    transform.translation = spawn_position(config.player.eye_height);
    transform.rotation = look.rotation();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_looks_down_negative_z() {
        let forward = FirstPerson::default().rotation() * Vec3::NEG_Z;
        assert!(forward.abs_diff_eq(Vec3::NEG_Z, 1e-6));
    }

    #[test]
    fn test_mouse_right_turns_right() {
        let mut look = FirstPerson::default();
        look.apply_mouse(Vec2::new(100.0, 0.0), 0.01);

        let forward = look.rotation() * Vec3::NEG_Z;
        assert!(forward.x > 0.0);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut look = FirstPerson::default();
        look.apply_mouse(Vec2::new(0.0, -100_000.0), 0.01);
        assert_eq!(look.pitch, MAX_PITCH);

        look.apply_mouse(Vec2::new(0.0, 100_000.0), 0.01);
        assert_eq!(look.pitch, -MAX_PITCH);
    }
}
