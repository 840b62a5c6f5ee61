pub mod animations;
pub mod components;

pub use animations::{
    KeypadFlash, animate_levers, lever_angle, sync_box_positions, update_door_visual,
    update_keypad_visual,
};
pub use components::{
    BoxProp, DoorProp, Hitbox, KeypadLamp, KeypadPanel, LeverHandle, Obstacle, PickTarget,
};
