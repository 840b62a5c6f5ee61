pub mod props;
pub mod room;
pub mod scene;

pub use props::setup_props;
pub use room::setup_session;
pub use scene::{ROOM_HALF_SIZE, setup_scene};
