pub mod interactions;
pub mod plugin;
pub mod props;
pub mod setup;
pub mod ui;

use bevy::prelude::*;

/// Ask for a fresh play-through (puzzles, clock and player position reset)
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct RestartRoom;
