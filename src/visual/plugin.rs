use crate::camera::setup_camera;
use crate::game::clock::{EscapeClock, format_time};
use crate::game::session::RoomSession;
use crate::game::{config::setup_room_config, phase::GamePhase};
use crate::visual::RestartRoom;
use crate::visual::interactions::{DragState, handle_pointer_input};
use crate::visual::props::{
    KeypadFlash, LeverHandle, animate_levers, lever_angle, sync_box_positions, update_door_visual,
    update_keypad_visual,
};
use crate::visual::setup::{setup_props, setup_scene, setup_session};
use crate::visual::ui::{
    handle_phase_keys, handle_screen_buttons, spawn_hud, spawn_screens, sync_screen_visibility,
    update_final_time, update_hud,
};
use bevy::prelude::*;

pub struct RoomPlugin;

impl Plugin for RoomPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DragState>()
            .init_state::<GamePhase>()
            .add_message::<RestartRoom>()
            // Load the room description first; everything after reads it
            .add_systems(
                Startup,
                (
                    setup_room_config,
                    setup_session,
                    setup_camera,
                    setup_scene,
                    setup_props,
                    spawn_hud,
                    spawn_screens,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    // Phase changes and restarts
                    handle_screen_buttons,
                    handle_phase_keys,
                    restart_room,
                    // Interaction
                    // Runs in every phase so clicks on screens are drained, not replayed
                    handle_pointer_input,
                    tick_clock.run_if(in_state(GamePhase::Playing)),
                    // Visual updates
                    sync_box_positions,
                    animate_levers,
                    update_door_visual,
                    update_keypad_visual,
                    // UI
                    update_hud,
                    update_final_time.run_if(in_state(GamePhase::Escaped)),
                    sync_screen_visibility,
                )
                    .chain(),
            )
            .add_systems(OnEnter(GamePhase::Playing), start_clock)
            .add_systems(OnEnter(GamePhase::Paused), pause_clock)
            .add_systems(OnEnter(GamePhase::Escaped), stop_clock);
    }
}

fn tick_clock(time: Res<Time>, mut clock: ResMut<EscapeClock>) {
    clock.tick(time.delta_secs());
}

fn start_clock(mut clock: ResMut<EscapeClock>) {
    clock.start();
    info!("Clock running at {}", format_time(clock.elapsed()));
}

fn pause_clock(mut clock: ResMut<EscapeClock>) {
    clock.pause();
    info!("Paused at {}", format_time(clock.elapsed()));
}

fn stop_clock(mut clock: ResMut<EscapeClock>) {
    let total = clock.stop();
    info!("Escaped in {}", format_time(total));
}

/// Put every puzzle back to its starting state
fn restart_room(
    mut restarts: MessageReader<RestartRoom>,
    mut session: ResMut<RoomSession>,
    mut clock: ResMut<EscapeClock>,
    mut flash: ResMut<KeypadFlash>,
    mut drag_state: ResMut<DragState>,
    mut levers: Query<(&mut LeverHandle, &mut Transform)>,
) {
    if restarts.read().last().is_none() {
        return;
    }

    session.reset();
    clock.reset();
    flash.clear();
    drag_state.hold_point = None;

    // Snap levers instead of easing them back
    for (mut lever, mut transform) in &mut levers {
        lever.angle = lever_angle(false);
        transform.rotation = Quat::from_rotation_x(lever.angle);
    }

    info!("Room restarted: {}", session.progress().display_string());
}
