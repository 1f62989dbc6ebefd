//! Mascot configuration.
//!
//! Read once at startup from the environment, after filling unset variables
//! from a `.env` file in the working directory (or a parent), and handed to
//! the webview through `get_mascot_config`:
//! - `PMX_FILE` / `IDLE_VMD`: model and idle motion for the renderer
//! - `MASCOT_DRAG_MODIFIER`: key that turns a press on the mascot into a drag
//! - `MASCOT_DEBUG_KEY`: key that forces the window to capture input
//!
//! Uses `parking_lot::RwLock` like the rest of the config module.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use lazy_static::lazy_static;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{MascotError, MascotResult};

lazy_static! {
    /// Global mascot configuration.
    pub static ref MASCOT_CONFIG: RwLock<MascotConfig> = RwLock::new(MascotConfig::default());
}

/// Modifier key that must be held on pointer-down to start a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../../ui/types/generated/")]
pub enum DragModifier {
    Alt,
    Ctrl,
    Shift,
    Meta,
}

impl FromStr for DragModifier {
    type Err = MascotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alt" | "option" => Ok(DragModifier::Alt),
            "ctrl" | "control" => Ok(DragModifier::Ctrl),
            "shift" => Ok(DragModifier::Shift),
            "meta" | "cmd" | "super" | "win" => Ok(DragModifier::Meta),
            other => Err(MascotError::ConfigError(format!(
                "unknown drag modifier '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for DragModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DragModifier::Alt => write!(f, "alt"),
            DragModifier::Ctrl => write!(f, "ctrl"),
            DragModifier::Shift => write!(f, "shift"),
            DragModifier::Meta => write!(f, "meta"),
        }
    }
}

/// Window and input settings shared with the webview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../../ui/types/generated/")]
pub struct MascotConfig {
    /// Mascot window width in logical pixels.
    pub window_width: u32,
    /// Mascot window height in logical pixels.
    pub window_height: u32,
    /// Character model passed to the renderer.
    pub model_path: Option<String>,
    /// Looping idle motion passed to the renderer.
    pub idle_motion_path: Option<String>,
    pub drag_modifier: DragModifier,
    /// `KeyboardEvent.key` value of the capture-input override.
    pub debug_override_key: String,
    /// Forward cursor moves to the webview while click-through.
    pub forward_pointer: bool,
    /// Cursor poll interval for forwarding, in milliseconds.
    pub forward_interval_ms: u32,
}

impl Default for MascotConfig {
    fn default() -> Self {
        Self {
            window_width: 350,
            window_height: 350,
            model_path: None,
            idle_motion_path: None,
            drag_modifier: DragModifier::Alt,
            debug_override_key: "F1".to_string(),
            forward_pointer: true,
            forward_interval_ms: 16,
        }
    }
}

impl MascotConfig {
    /// Build a config from environment-style lookups.
    ///
    /// Unset or empty variables keep their defaults; malformed ones fail.
    pub fn from_lookup<F>(lookup: F) -> MascotResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        config.model_path = get("PMX_FILE");
        config.idle_motion_path = get("IDLE_VMD");

        if let Some(modifier) = get("MASCOT_DRAG_MODIFIER") {
            config.drag_modifier = modifier.parse()?;
        }
        if let Some(key) = get("MASCOT_DEBUG_KEY") {
            config.debug_override_key = key.trim().to_string();
        }
        if let Some(interval) = get("MASCOT_FORWARD_INTERVAL_MS") {
            let ms: u32 = interval.trim().parse().map_err(|_| {
                MascotError::ConfigError(format!("invalid forward interval '{}'", interval))
            })?;
            config.forward_pointer = ms > 0;
            config.forward_interval_ms = ms.max(1);
        }

        Ok(config)
    }
}

// ============================================================================
// Getters (for internal Rust use)
// ============================================================================

/// Apply an env file to the process environment. Variables that are already
/// set keep their value. Returns whether a file was found and applied.
fn load_env_file(filename: impl AsRef<Path>) -> bool {
    match dotenvy::from_filename(filename) {
        Ok(path) => {
            log::info!("[MASCOT_CONFIG] loaded {}", path.display());
            true
        },
        Err(e) if e.not_found() => {
            log::debug!("[MASCOT_CONFIG] no env file: {}", e);
            false
        },
        Err(e) => {
            log::warn!("[MASCOT_CONFIG] env file ignored: {}", e);
            false
        },
    }
}

/// Load the configuration from `.env` and the process environment into
/// [`MASCOT_CONFIG`].
///
/// A malformed variable is logged and the defaults are kept.
pub fn load_from_env() {
    load_env_file(".env");
    match MascotConfig::from_lookup(|key| std::env::var(key).ok()) {
        Ok(config) => {
            log::debug!("[MASCOT_CONFIG] loaded {:?}", config);
            *MASCOT_CONFIG.write() = config;
        },
        Err(e) => log::warn!("[MASCOT_CONFIG] {}, using defaults", e),
    }
}

/// Snapshot of the current configuration.
pub fn current() -> MascotConfig {
    MASCOT_CONFIG.read().clone()
}

// ============================================================================
// Tauri Commands
// ============================================================================

/// Get the current mascot configuration.
#[tauri::command]
pub fn get_mascot_config() -> MascotConfig {
    current()
}
