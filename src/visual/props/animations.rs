use bevy::prelude::*;

use crate::{
    game::session::RoomSession,
    puzzle::BoxPlacement,
    visual::{
        interactions::DragState,
        props::components::{BoxProp, DoorProp, KeypadLamp, KeypadPanel, LeverHandle},
        setup::scene::{palette, slot_position, table_center},
    },
};

/// Tilt of a lever in the up position
const LEVER_UP_ANGLE: f32 = -std::f32::consts::FRAC_PI_4;

/// Red feedback on the keypad after a wrong code
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct KeypadFlash {
    remaining: f32,
}

impl KeypadFlash {
    pub fn start(&mut self, secs: f32) {
        self.remaining = secs;
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    pub fn is_flashing(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }
}

/// Target tilt about X for a lever
pub fn lever_angle(up: bool) -> f32 {
    if up { LEVER_UP_ANGLE } else { 0.0 }
}

/// Solved wins over a flash still running from an earlier wrong code
pub fn panel_color(solved: bool, flashing: bool) -> Color {
    if solved {
        palette::KEYPAD_OPEN
    } else if flashing {
        palette::KEYPAD_ERROR
    } else {
        palette::KEYPAD_NEUTRAL
    }
}

/// System: ease lever sticks towards their session position
pub fn animate_levers(
    time: Res<Time>,
    session: Res<RoomSession>,
    mut levers: Query<(&mut LeverHandle, &mut Transform)>,
) {
    let dt = time.delta_secs();

    for (mut lever, mut transform) in &mut levers {
        let target = lever_angle(session.lever_up(lever.index));
        if lever.angle == target {
            continue;
        }

        // Exponential ease-out, snapped once close enough
        lever.angle = lever.angle.lerp(target, (dt * 12.0).min(1.0));
        if (lever.angle - target).abs() < 0.001 {
            lever.angle = target;
        }
        transform.rotation = Quat::from_rotation_x(lever.angle);
    }
}

/// System: put every box where the session says it is
pub fn sync_box_positions(
    session: Res<RoomSession>,
    drag: Res<DragState>,
    mut boxes: Query<(&BoxProp, &mut Transform)>,
) {
    if !session.is_changed() && !drag.is_changed() {
        return;
    }

    for (prop, mut transform) in &mut boxes {
        let target = match session.box_placement(prop.id) {
            Some(BoxPlacement::OnTable { table, slot }) => {
                slot_position(table_center(table.index()), slot)
            }
            Some(BoxPlacement::Held) => drag.hold_point.unwrap_or(transform.translation),
            Some(BoxPlacement::Origin) | None => prop.origin,
        };
        transform.translation = target;
    }
}

/// System: door colour follows its lock state
pub fn update_door_visual(
    session: Res<RoomSession>,
    doors: Query<&MeshMaterial3d<StandardMaterial>, With<DoorProp>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !session.is_changed() {
        return;
    }

    let color = if session.is_door_locked() {
        palette::DOOR_LOCKED
    } else {
        palette::DOOR_UNLOCKED
    };
    for handle in &doors {
        set_color(&mut materials, handle, color);
    }
}

/// System: keypad panel colour and digit lamps
pub fn update_keypad_visual(
    time: Res<Time>,
    session: Res<RoomSession>,
    mut flash: ResMut<KeypadFlash>,
    panels: Query<&MeshMaterial3d<StandardMaterial>, With<KeypadPanel>>,
    lamps: Query<(&KeypadLamp, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if flash.is_flashing() {
        flash.tick(time.delta_secs());
    }

    // Only repaint when something visible could have changed
    if !session.is_changed() && !flash.is_changed() {
        return;
    }

    let solved = session.keypad_solved();
    let color = panel_color(solved, flash.is_flashing());
    for handle in &panels {
        set_color(&mut materials, handle, color);
    }

    let entered = session.keypad_entered().len();
    for (lamp, handle) in &lamps {
        let lit = solved || lamp.index < entered;
        let color = if lit { palette::LAMP_ON } else { palette::LAMP_OFF };
        set_color(&mut materials, handle, color);
    }
}

fn set_color(
    materials: &mut Assets<StandardMaterial>,
    handle: &MeshMaterial3d<StandardMaterial>,
    color: Color,
) {
    let unchanged = materials
        .get(&handle.0)
        .is_some_and(|material| material.base_color == color);
    if unchanged {
        return;
    }
    if let Some(material) = materials.get_mut(&handle.0) {
        material.base_color = color;
    }
}
