//! In-game overlay: timer, puzzle status, pause button and crosshair.

use bevy::prelude::*;

use crate::{
    game::{
        clock::{EscapeClock, format_time},
        config::{ControlScheme, RoomConfig},
        phase::GamePhase,
        session::RoomSession,
    },
    puzzle::PuzzleKind,
};

use super::screens::{ScreenButton, ShownIn, spawn_button, text_bundle};

#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct TimerText;

#[derive(Component)]
pub struct StatusText;

#[derive(Component)]
pub struct Crosshair;

const CROSSHAIR_SIZE: f32 = 6.0;

/// One line summary of the room, e.g. `Levers [x]  Keypad [ ]  |  1/2 puzzles  |  door locked`
pub fn status_line(session: &RoomSession) -> String {
    let status = session.status();
    let puzzles: Vec<String> = PuzzleKind::ALL
        .into_iter()
        .filter(|&kind| session.state().is_enabled(kind))
        .map(|kind| format!("{} [{}]", kind, if status.get(kind) { "x" } else { " " }))
        .collect();

    format!(
        "{}  |  {}  |  door {}",
        puzzles.join("  "),
        session.progress().display_string(),
        if session.is_door_locked() { "locked" } else { "open" }
    )
}

/// Spawn the HUD (hidden outside play)
pub fn spawn_hud(mut commands: Commands, config: Res<RoomConfig>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                display: Display::None,
                ..default()
            },
            HudRoot,
            ShownIn(&[GamePhase::Playing, GamePhase::Paused]),
            Name::new("HUD"),
        ))
        .with_children(|parent| {
            parent
                .spawn(Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(16.0),
                    top: Val::Px(12.0),
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(4.0),
                    ..default()
                })
                .with_children(|column| {
                    if config.timer.enabled {
                        column.spawn((text_bundle(format_time(0.0), 32.0), TimerText));
                    }
                    column.spawn((text_bundle("", 20.0), StatusText));
                });

            // The pause button belongs to the timer UI
            if config.timer.enabled {
                parent
                    .spawn(Node {
                        position_type: PositionType::Absolute,
                        right: Val::Px(16.0),
                        top: Val::Px(12.0),
                        ..default()
                    })
                    .with_children(|corner| {
                        spawn_button(corner, "Pause", ScreenButton::Pause);
                    });
            }

            // Aim point while the cursor is locked
            if config.controls == ControlScheme::PointerLock {
                parent.spawn((
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Percent(50.0),
                        top: Val::Percent(50.0),
                        width: Val::Px(CROSSHAIR_SIZE),
                        height: Val::Px(CROSSHAIR_SIZE),
                        margin: UiRect {
                            left: Val::Px(-CROSSHAIR_SIZE * 0.5),
                            top: Val::Px(-CROSSHAIR_SIZE * 0.5),
                            ..default()
                        },
                        ..default()
                    },
                    BackgroundColor(Color::WHITE),
                    Crosshair,
                ));
            }
        });

    info!(
        "HUD spawned (timer {}, crosshair {})",
        config.timer.enabled,
        config.controls == ControlScheme::PointerLock
    );
}

/// System: refresh the timer and status lines
pub fn update_hud(
    session: Res<RoomSession>,
    clock: Res<EscapeClock>,
    mut timer_text: Query<&mut Text, (With<TimerText>, Without<StatusText>)>,
    mut status_text: Query<&mut Text, (With<StatusText>, Without<TimerText>)>,
) {
    if clock.is_changed() {
        for mut text in &mut timer_text {
            text.0 = format_time(clock.elapsed());
        }
    }

    if session.is_changed() {
        let line = status_line(&session);
        for mut text in &mut status_text {
            text.0 = line.clone();
        }
    }
}
