//! Application configuration management.
//!
//! Thread-safe configuration behind `parking_lot::RwLock`:
//! - Fast, non-poisoning locks
//! - Loaded once from the environment at startup
//! - Read by the webview in a single IPC call

pub mod mascot;

pub use mascot::{DragModifier, MascotConfig, MASCOT_CONFIG};
