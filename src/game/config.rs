// game/config.rs

use crate::puzzle::{
    CODE_LENGTH, COLOR_COUNT, DoorRule, Keypad, LEVER_COUNT, LeverBank, PuzzleKind, RoomState,
    TABLE_CAPACITY, TABLE_COUNT, TableBoard,
};
use bevy::prelude::*;
use serde::Deserialize;
use std::fmt;

const ROOM_JSON: &str = include_str!("../../assets/room.json");

/// Reasons a room description can be refused
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    LeverCount(usize),
    TableCount(usize),
    ColorOutOfRange { table: usize, color: usize },
    UnbalancedColors { color: usize, count: usize },
    KeypadCode(String),
    NotPositive(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "Invalid room JSON: {}", e),
            ConfigError::LeverCount(n) => {
                write!(f, "Lever solution has {} entries, expected {}", n, LEVER_COUNT)
            }
            ConfigError::TableCount(n) => {
                write!(f, "{} table pairs given, expected {}", n, TABLE_COUNT)
            }
            ConfigError::ColorOutOfRange { table, color } => {
                let last = COLOR_COUNT - 1;
                write!(f, "Table {} asks for colour {} (only 0-{} exist)", table, color, last)
            }
            ConfigError::UnbalancedColors { color, count } => write!(
                f,
                "Colour {} is required {} times but exactly 2 boxes carry it",
                color, count
            ),
            ConfigError::KeypadCode(code) => {
                write!(f, "Keypad code {:?} must be exactly {} digits", code, CODE_LENGTH)
            }
            ConfigError::NotPositive(field) => write!(f, "{} must be greater than zero", field),
        }
    }
}

impl std::error::Error for ConfigError {}

/// How the player looks around and aims
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlScheme {
    /// Grab the cursor on click, mouse turns the camera, aim with the crosshair
    #[default]
    PointerLock,
    /// Cursor stays free and aims directly; keys move and turn
    FreeCursor,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub eye_height: f32,
    /// Walking speed in units per second
    pub speed: f32,
    /// Collision radius around the camera
    pub radius: f32,
    /// Radians of turn per pixel of mouse motion
    pub look_sensitivity: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            eye_height: 1.6,
            speed: 4.0,
            radius: 0.3,
            look_sensitivity: 0.0025,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimerSettings {
    pub enabled: bool,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Optional image paths, relative to the asset folder
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TextureSettings {
    pub floor: Option<String>,
    pub walls: Option<String>,
}

/// Room description exactly as written in JSON
#[derive(Debug, Deserialize)]
struct RoomFile {
    #[serde(default)]
    door_rule: DoorRule,
    puzzles: Vec<PuzzleKind>,
    lever_solution: Vec<bool>,
    table_pairs: Vec<[usize; TABLE_CAPACITY]>,
    keypad_code: String,
    keypad_flash_secs: f32,
    #[serde(default)]
    controls: ControlScheme,
    #[serde(default)]
    player: PlayerSettings,
    #[serde(default)]
    timer: TimerSettings,
    #[serde(default)]
    textures: TextureSettings,
}

/// Validated room description
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RoomConfig {
    pub door_rule: DoorRule,
    pub puzzles: Vec<PuzzleKind>,
    pub lever_solution: [bool; LEVER_COUNT],
    pub table_pairs: [[usize; TABLE_CAPACITY]; TABLE_COUNT],
    pub keypad_code: [u8; CODE_LENGTH],
    /// How long the keypad shows red after a wrong code
    pub keypad_flash_secs: f32,
    pub controls: ControlScheme,
    pub player: PlayerSettings,
    pub timer: TimerSettings,
    pub textures: TextureSettings,
}

impl RoomConfig {
    /// Load the room embedded in the binary
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_json(ROOM_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let file: RoomFile =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::validate(file)
    }

    /// Build a fresh puzzle state from this description
    pub fn build_state(&self) -> RoomState {
        RoomState::new(
            LeverBank::new(self.lever_solution),
            TableBoard::new(self.table_pairs),
            Keypad::new(self.keypad_code),
            self.door_rule,
            &self.puzzles,
        )
    }

    /// Keypad code as typed, e.g. "1984"
    pub fn code_string(&self) -> String {
        self.keypad_code.iter().map(|d| d.to_string()).collect()
    }

    fn validate(file: RoomFile) -> Result<Self, ConfigError> {
        let lever_solution: [bool; LEVER_COUNT] = file
            .lever_solution
            .as_slice()
            .try_into()
            .map_err(|_| ConfigError::LeverCount(file.lever_solution.len()))?;

        let table_pairs: [[usize; TABLE_CAPACITY]; TABLE_COUNT] = file
            .table_pairs
            .as_slice()
            .try_into()
            .map_err(|_| ConfigError::TableCount(file.table_pairs.len()))?;

        // Two boxes per colour, so each colour must be asked for exactly twice
        let mut demand = [0usize; COLOR_COUNT];
        for (table, pair) in table_pairs.iter().enumerate() {
            for &color in pair {
                let Some(count) = demand.get_mut(color) else {
                    return Err(ConfigError::ColorOutOfRange { table, color });
                };
                *count += 1;
            }
        }
        if let Some((color, &count)) = demand.iter().enumerate().find(|(_, c)| **c != 2) {
            return Err(ConfigError::UnbalancedColors { color, count });
        }

        let keypad_code = parse_code(&file.keypad_code)?;

        if file.keypad_flash_secs <= 0.0 {
            return Err(ConfigError::NotPositive("keypad_flash_secs"));
        }
        if file.player.speed <= 0.0 {
            return Err(ConfigError::NotPositive("player.speed"));
        }
        if file.player.radius <= 0.0 {
            return Err(ConfigError::NotPositive("player.radius"));
        }
        if file.player.eye_height <= 0.0 {
            return Err(ConfigError::NotPositive("player.eye_height"));
        }

        Ok(RoomConfig {
            door_rule: file.door_rule,
            puzzles: file.puzzles,
            lever_solution,
            table_pairs,
            keypad_code,
            keypad_flash_secs: file.keypad_flash_secs,
            controls: file.controls,
            player: file.player,
            timer: file.timer,
            textures: file.textures,
        })
    }
}

fn parse_code(code: &str) -> Result<[u8; CODE_LENGTH], ConfigError> {
    let digits: Option<Vec<u8>> = code
        .chars()
        .map(|c| c.to_digit(10).map(|d| d as u8))
        .collect();

    digits
        .and_then(|d| <[u8; CODE_LENGTH]>::try_from(d).ok())
        .ok_or_else(|| ConfigError::KeypadCode(code.to_string()))
}

/// System to load the room description.
/// Runs first in Startup; everything else reads the resource.
pub fn setup_room_config(mut commands: Commands) {
    match RoomConfig::load() {
        Ok(config) => {
            info!("✓ Room config loaded:");
            info!("  - door rule: {:?}", config.door_rule);
            info!("  - puzzles: {:?}", config.puzzles);
            info!("  - controls: {:?}", config.controls);
            info!("  - timer enabled: {}", config.timer.enabled);
            commands.insert_resource(config);
        }
        Err(e) => {
            error!("Failed to load room config: {}", e);
            panic!("Cannot continue without a room description");
        }
    }
}
