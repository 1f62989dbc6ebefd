//! Global cursor position.
//!
//! Read through `device_query` rather than the webview: while the mascot is
//! click-through the webview receives no pointer events at all, and the
//! drag handlers need the cursor at the moment a message arrives.

use device_query::{DeviceQuery, DeviceState};

use crate::error::{MascotError, MascotResult};
use crate::window_input::geometry::{ScreenPoint, WindowBounds};

/// Raw cursor position in physical screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawCursorPosition {
    x: i32,
    y: i32,
}

impl RawCursorPosition {
    /// Get current cursor position using device_query.
    ///
    /// Fails when no input backend is available, e.g. without an X display
    /// on Linux.
    pub fn get() -> MascotResult<Self> {
        let device_state = DeviceState::checked_new().ok_or_else(|| {
            MascotError::CursorError("no input device backend available".to_string())
        })?;
        let position = device_state.get_mouse().coords;
        Ok(Self {
            x: position.0,
            y: position.1,
        })
    }

    /// Create from explicit coordinates.
    #[cfg(test)]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_screen_point(self) -> ScreenPoint {
        ScreenPoint::new(self.x as f64, self.y as f64)
    }

    /// Position relative to a window's top-left corner, in logical pixels.
    ///
    /// Returns `None` when the cursor is outside the window or the scale
    /// factor is unusable.
    pub fn relative_to_window(&self, bounds: WindowBounds, scale_factor: f64) -> Option<(f64, f64)> {
        if !(scale_factor.is_finite() && scale_factor > 0.0) {
            return None;
        }
        let point = self.to_screen_point();
        if !bounds.contains(point) {
            return None;
        }
        let (dx, dy) = point.offset_from(bounds.origin());
        Some((dx / scale_factor, dy / scale_factor))
    }
}
