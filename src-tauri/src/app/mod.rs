//! Application lifecycle and platform integration.
//!
//! - `tray`: System tray setup and menu handling
//! - `events`: Window event handlers

pub mod events;

#[cfg(desktop)]
pub mod tray;
