use bevy::prelude::*;

mod camera;
mod game;
mod input;
mod player;
mod puzzle;
mod visual;

use camera::CameraPlugin;
use input::InputPlugin;
use player::PlayerPlugin;

use crate::visual::plugin::RoomPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Escape Room".into(),
            resizable: true,
            // Fill the browser canvas on the web
            fit_canvas_to_parent: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(CameraPlugin)
    .add_plugins(InputPlugin)
    .add_plugins(PlayerPlugin)
    .add_plugins(RoomPlugin);

    app.run();
}
