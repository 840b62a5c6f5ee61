use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorMoved, CursorOptions, PrimaryWindow};

use crate::game::config::{ControlScheme, RoomConfig};

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CursorPos>()
            .init_resource::<MovementIntent>()
            .add_message::<PointerEvent>()
            .add_systems(
                Update,
                (track_cursor_pos, collect_pointer_events, collect_movement_keys),
            );
    }
}

#[derive(Message, Debug, Clone)]
pub struct PointerEvent {
    /// Viewport (logical) coordinates, top-left origin
    pub position: Vec2,
    pub event_type: PointerEventType,
    /// 0 = mouse, >0 = touch id
    pub id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventType {
    Down,
    Move,
    Up,
}

impl PointerEvent {
    /// Ray from the camera through the pointer
    pub fn to_ray(&self, camera: &Camera, camera_transform: &GlobalTransform) -> Option<Ray3d> {
        camera.viewport_to_world(camera_transform, self.position).ok()
    }
}

/// Keyboard movement for this frame
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct MovementIntent {
    /// x = strafe right, y = forward; length at most 1
    pub axes: Vec2,
    /// Positive turns left
    pub turn: f32,
}

#[derive(Resource, Default, Debug, Clone, Copy)]
pub(crate) struct CursorPos(pub Option<Vec2>);

/// Combine held direction keys into a unit-or-zero vector
pub fn movement_axes(forward: bool, backward: bool, left: bool, right: bool) -> Vec2 {
    let axis = |pos: bool, neg: bool| (pos as i8 - neg as i8) as f32;
    Vec2::new(axis(right, left), axis(forward, backward)).normalize_or_zero()
}

fn track_cursor_pos(mut ev_cursor: MessageReader<CursorMoved>, mut pos: ResMut<CursorPos>) {
    for e in ev_cursor.read() {
        // last event wins
        pos.0 = Some(e.position);
    }
}

/// Where mouse clicks aim. With a grabbed cursor the crosshair (window centre)
/// does the aiming; before the grab, clicks only serve to capture the cursor.
pub fn aim_position(
    controls: ControlScheme,
    grabbed: bool,
    window_size: Vec2,
    cursor: Option<Vec2>,
) -> Option<Vec2> {
    match controls {
        ControlScheme::PointerLock if grabbed => Some(window_size * 0.5),
        ControlScheme::PointerLock => None,
        ControlScheme::FreeCursor => cursor,
    }
}

/// Runs before the camera grabs the cursor, so the grabbing click is not also
/// a crosshair click
pub fn collect_pointer_events(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    cursor: Res<CursorPos>,
    config: Res<RoomConfig>,
    windows: Query<(&Window, &CursorOptions), With<PrimaryWindow>>,
    mut touch_events: MessageReader<TouchInput>,
    mut out: MessageWriter<PointerEvent>,
) {
    let Ok((window, cursor_options)) = windows.single() else {
        return;
    };
    let grabbed = cursor_options.grab_mode != CursorGrabMode::None;

    let mouse_pos = aim_position(config.controls, grabbed, window.size(), cursor.0);

    if let Some(p) = mouse_pos {
        if mouse_buttons.just_pressed(MouseButton::Left) {
            out.write(PointerEvent {
                position: p,
                event_type: PointerEventType::Down,
                id: 0,
            });
        }
        if mouse_buttons.pressed(MouseButton::Left) {
            out.write(PointerEvent {
                position: p,
                event_type: PointerEventType::Move,
                id: 0,
            });
        }
        if mouse_buttons.just_released(MouseButton::Left) {
            out.write(PointerEvent {
                position: p,
                event_type: PointerEventType::Up,
                id: 0,
            });
        }
    }

    for ev in touch_events.read() {
        let event_type = match ev.phase {
            TouchPhase::Started => PointerEventType::Down,
            TouchPhase::Moved => PointerEventType::Move,
            TouchPhase::Ended | TouchPhase::Canceled => PointerEventType::Up,
        };
        out.write(PointerEvent {
            position: ev.position,
            event_type,
            id: ev.id,
        });
    }
}

fn collect_movement_keys(keys: Res<ButtonInput<KeyCode>>, mut intent: ResMut<MovementIntent>) {
    let held = |a: KeyCode, b: KeyCode| keys.pressed(a) || keys.pressed(b);

    intent.axes = movement_axes(
        held(KeyCode::KeyW, KeyCode::ArrowUp),
        held(KeyCode::KeyS, KeyCode::ArrowDown),
        held(KeyCode::KeyA, KeyCode::ArrowLeft),
        held(KeyCode::KeyD, KeyCode::ArrowRight),
    );
    intent.turn = (keys.pressed(KeyCode::KeyQ) as i8 - keys.pressed(KeyCode::KeyE) as i8) as f32;
}
