mod door;
mod keypad;
mod levers;
mod state;
mod tables;

pub use door::{DoorRule, PuzzleKind, PuzzleStatus};
pub use keypad::{CODE_LENGTH, KeyPress, Keypad};
pub use levers::{LEVER_COUNT, LeverBank};
pub use state::RoomState;
pub use tables::{
    BoxId, BoxPlacement, COLOR_COUNT, PickUp, Placement, TABLE_CAPACITY, TABLE_COUNT, TableBoard,
    TableId,
};
