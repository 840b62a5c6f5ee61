pub mod clock;
pub mod collision;
pub mod config;
pub mod phase;
pub mod session;
