pub mod hud;
pub mod screens;

pub use hud::{spawn_hud, update_hud};
pub use screens::{
    handle_phase_keys, handle_screen_buttons, spawn_screens, sync_screen_visibility,
    update_final_time,
};
