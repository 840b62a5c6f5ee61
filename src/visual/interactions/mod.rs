pub mod pointer;
pub mod raycast;

pub use pointer::{DragState, handle_pointer_input};
