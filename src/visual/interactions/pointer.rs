use bevy::math::bounding::Aabb3d;
use bevy::prelude::*;

use crate::{
    camera::MainCamera,
    game::{
        config::RoomConfig,
        phase::GamePhase,
        session::{ActionResult, RoomAction, RoomSession},
    },
    input::{PointerEvent, PointerEventType},
    puzzle::KeyPress,
    visual::{
        interactions::raycast::{PICK_DISTANCE, hold_point, pick_nearest},
        props::{Hitbox, KeypadFlash, PickTarget},
    },
};

#[derive(Resource, Default)]
pub struct DragState {
    /// Where the held box floats, if one is held
    pub hold_point: Option<Vec3>,
}

/// Pointer events that belong to the room this frame. Outside play they are
/// dropped, so clicks on the start/pause/end screens never reach the props.
pub fn events_in_play(
    phase: GamePhase,
    pointer_events: &mut MessageReader<PointerEvent>,
) -> Vec<PointerEvent> {
    if phase != GamePhase::Playing {
        pointer_events.clear();
        return Vec::new();
    }
    pointer_events.read().cloned().collect()
}

fn world_bounds(hitbox: &Hitbox, transform: &GlobalTransform) -> Aabb3d {
    hitbox.bounds(transform.translation())
}

/// System: turn clicks and drags into room actions
pub fn handle_pointer_input(
    mut pointer_events: MessageReader<PointerEvent>,
    phase: Res<State<GamePhase>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    targets: Query<(&PickTarget, &Hitbox, &GlobalTransform)>,
    config: Res<RoomConfig>,
    mut session: ResMut<RoomSession>,
    mut drag_state: ResMut<DragState>,
    mut flash: ResMut<KeypadFlash>,
    mut next_phase: ResMut<NextState<GamePhase>>,
) {
    let events = events_in_play(*phase.get(), &mut pointer_events);
    if events.is_empty() {
        return;
    }
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    for event in events {
        let Some(ray) = event.to_ray(camera, camera_transform) else {
            continue;
        };

        let holding = session.held_box().is_some();
        match event.event_type {
            // A second press while carrying (touch) counts as letting go
            PointerEventType::Down | PointerEventType::Up if holding => {
                let table = pick_nearest(
                    ray,
                    PICK_DISTANCE,
                    targets
                        .iter()
                        .filter_map(|(target, hitbox, transform)| match target {
                            PickTarget::Table(id) => Some((*id, world_bounds(hitbox, transform))),
                            _ => None,
                        }),
                );
                let action = match table {
                    Some((id, _)) => RoomAction::Place(id),
                    None => RoomAction::Drop,
                };
                let outcome = session.apply(action);
                info!("Released box: {:?}", outcome.result);
                drag_state.hold_point = None;
            }

            PointerEventType::Down => {
                let hit = pick_nearest(
                    ray,
                    PICK_DISTANCE,
                    targets.iter().map(|(target, hitbox, transform)| {
                        (*target, world_bounds(hitbox, transform))
                    }),
                );
                let Some((target, _)) = hit else {
                    continue;
                };

                match target {
                    PickTarget::Box(id) => {
                        let outcome = session.apply(RoomAction::PickUp(id));
                        if let ActionResult::PickedUp { from_table, .. } = outcome.result {
                            info!("Picked up box {} (from {:?})", id, from_table);
                            drag_state.hold_point = hold_point(ray);
                        }
                    }
                    PickTarget::Lever(index) => {
                        session.apply(RoomAction::ToggleLever(index));
                    }
                    PickTarget::KeypadKey(digit) => {
                        let outcome = session.apply(RoomAction::PressKey(digit));
                        if outcome.result == ActionResult::Key(KeyPress::Rejected) {
                            flash.start(config.keypad_flash_secs);
                        }
                    }
                    PickTarget::Door => {
                        if session.is_door_locked() {
                            info!("The door is locked ({})", session.progress().display_string());
                        } else {
                            info!("Escaped through the door!");
                            next_phase.set(GamePhase::Escaped);
                        }
                    }
                    // Tables only matter while carrying a box
                    PickTarget::Table(_) => {}
                }
            }

            PointerEventType::Move => {
                if !holding {
                    continue;
                }
                if let Some(point) = hold_point(ray) {
                    drag_state.hold_point = Some(point);
                }
            }

            PointerEventType::Up => {}
        }
    }
}
