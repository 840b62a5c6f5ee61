// game/phase.rs

use bevy::prelude::*;

/// Top-level flow of a play-through
#[derive(States, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// Title screen, waiting for Start
    #[default]
    Start,
    Playing,
    Paused,
    /// Walked out of the unlocked door
    Escaped,
}

impl GamePhase {
    /// Phase reached by the pause toggle (other phases ignore it)
    pub fn toggled_pause(self) -> Option<GamePhase> {
        match self {
            GamePhase::Playing => Some(GamePhase::Paused),
            GamePhase::Paused => Some(GamePhase::Playing),
            GamePhase::Start | GamePhase::Escaped => None,
        }
    }
}
