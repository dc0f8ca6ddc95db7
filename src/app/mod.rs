//! Application orchestration: state management, event loop, and input handling.

pub mod days;
pub mod drag;
pub mod event;
pub mod handler;
pub mod listener;
pub mod settings;
pub mod state;
pub mod surface;
