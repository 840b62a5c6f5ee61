use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

use crate::{
    game::{
        clock::{EscapeClock, format_time},
        config::RoomConfig,
        phase::GamePhase,
    },
    visual::RestartRoom,
};

const OVERLAY: Color = Color::srgba(0.0, 0.0, 0.0, 0.7);
const BUTTON_IDLE: Color = Color::srgb(0.2, 0.2, 0.24);
const BUTTON_HOVERED: Color = Color::srgb(0.3, 0.3, 0.36);
const BUTTON_PRESSED: Color = Color::srgb(0.12, 0.55, 0.3);
const TEXT: Color = Color::srgb(0.92, 0.92, 0.92);

/// UI root that is only displayed in the listed phases
#[derive(Component, Debug, Clone, Copy)]
pub struct ShownIn(pub &'static [GamePhase]);

impl ShownIn {
    pub fn display_for(&self, phase: GamePhase) -> Display {
        if self.0.contains(&phase) {
            Display::Flex
        } else {
            Display::None
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenButton {
    Start,
    Pause,
    Resume,
    Restart,
}

impl ScreenButton {
    /// Phase the button leads to from `current`, if it applies there
    pub fn next_phase(self, current: GamePhase) -> Option<GamePhase> {
        match (self, current) {
            (ScreenButton::Start, GamePhase::Start) => Some(GamePhase::Playing),
            (ScreenButton::Pause, GamePhase::Playing) => Some(GamePhase::Paused),
            (ScreenButton::Resume, GamePhase::Paused) => Some(GamePhase::Playing),
            (ScreenButton::Restart, GamePhase::Paused | GamePhase::Escaped) => {
                Some(GamePhase::Playing)
            }
            _ => None,
        }
    }
}

#[derive(Component)]
pub struct FinalTimeText;

pub fn text_bundle(value: impl Into<String>, size: f32) -> (Text, TextFont, TextColor) {
    (
        Text::new(value),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(TEXT),
    )
}

pub fn spawn_button(parent: &mut ChildSpawnerCommands, label: &str, action: ScreenButton) {
    parent
        .spawn((
            Button,
            Node {
                padding: UiRect::axes(Val::Px(24.0), Val::Px(10.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            action,
        ))
        .with_children(|button| {
            button.spawn(text_bundle(label, 24.0));
        });
}

fn overlay(shown_in: &'static [GamePhase], name: &'static str) -> impl Bundle {
    (
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            row_gap: Val::Px(16.0),
            display: Display::None,
            ..default()
        },
        BackgroundColor(OVERLAY),
        ShownIn(shown_in),
        Name::new(name),
    )
}

/// Start, pause and end screens
pub fn spawn_screens(mut commands: Commands, config: Res<RoomConfig>) {
    commands
        .spawn(overlay(&[GamePhase::Start], "Start screen"))
        .with_children(|screen| {
            screen.spawn(text_bundle("Escape Room", 64.0));
            screen.spawn(text_bundle(
                "WASD to walk, mouse to look, click to interact. Open the door to get out.",
                20.0,
            ));
            spawn_button(screen, "Start", ScreenButton::Start);
        });

    commands
        .spawn(overlay(&[GamePhase::Paused], "Pause screen"))
        .with_children(|screen| {
            screen.spawn(text_bundle("Paused", 48.0));
            spawn_button(screen, "Resume", ScreenButton::Resume);
            spawn_button(screen, "Restart", ScreenButton::Restart);
        });

    commands
        .spawn(overlay(&[GamePhase::Escaped], "End screen"))
        .with_children(|screen| {
            screen.spawn(text_bundle("You escaped!", 64.0));
            if config.timer.enabled {
                screen.spawn((text_bundle("", 32.0), FinalTimeText));
            }
            spawn_button(screen, "Play again", ScreenButton::Restart);
        });
}

/// System: show the UI roots that belong to the current phase
pub fn sync_screen_visibility(
    phase: Res<State<GamePhase>>,
    mut roots: Query<(&ShownIn, &mut Node)>,
) {
    if !phase.is_changed() {
        return;
    }
    for (shown_in, mut node) in &mut roots {
        node.display = shown_in.display_for(*phase.get());
    }
}

/// System: hover colours and clicks on screen buttons
pub fn handle_screen_buttons(
    mut buttons: Query<(&Interaction, &ScreenButton, &mut BackgroundColor), Changed<Interaction>>,
    phase: Res<State<GamePhase>>,
    mut next_phase: ResMut<NextState<GamePhase>>,
    mut restarts: MessageWriter<RestartRoom>,
) {
    for (interaction, button, mut background) in &mut buttons {
        match interaction {
            Interaction::Pressed => {
                background.0 = BUTTON_PRESSED;
                let Some(next) = button.next_phase(*phase.get()) else {
                    continue;
                };
                if *button == ScreenButton::Restart {
                    restarts.write(RestartRoom);
                }
                info!("{:?} -> {:?}", button, next);
                next_phase.set(next);
            }
            Interaction::Hovered => background.0 = BUTTON_HOVERED,
            Interaction::None => background.0 = BUTTON_IDLE,
        }
    }
}

/// System: `P` toggles pause, `Enter` starts or plays again
pub fn handle_phase_keys(
    keys: Res<ButtonInput<KeyCode>>,
    phase: Res<State<GamePhase>>,
    mut next_phase: ResMut<NextState<GamePhase>>,
    mut restarts: MessageWriter<RestartRoom>,
) {
    let current = *phase.get();

    if keys.just_pressed(KeyCode::KeyP) {
        if let Some(next) = current.toggled_pause() {
            next_phase.set(next);
        }
    }

    if keys.just_pressed(KeyCode::Enter) {
        match current {
            GamePhase::Start => next_phase.set(GamePhase::Playing),
            GamePhase::Escaped => {
                restarts.write(RestartRoom);
                next_phase.set(GamePhase::Playing);
            }
            GamePhase::Playing | GamePhase::Paused => {}
        }
    }
}

/// System: show the frozen time on the end screen
pub fn update_final_time(
    clock: Res<EscapeClock>,
    mut texts: Query<&mut Text, With<FinalTimeText>>,
) {
    if !clock.is_changed() {
        return;
    }
    for mut text in &mut texts {
        text.0 = format!("Time: {}", format_time(clock.elapsed()));
    }
}
