use bevy::prelude::*;

use crate::{
    game::{clock::EscapeClock, config::RoomConfig, session::RoomSession},
    visual::props::KeypadFlash,
};

/// System: Build the puzzle session from the loaded room description
pub fn setup_session(mut commands: Commands, config: Res<RoomConfig>) {
    let session = RoomSession::new(config.build_state());
    info!(
        "Session ready: door {}, keypad code has {} digits",
        if session.is_door_locked() { "locked" } else { "unlocked" },
        config.keypad_code.len()
    );

    commands.insert_resource(session);
    commands.insert_resource(EscapeClock::default());
    commands.insert_resource(KeypadFlash::default());
}
