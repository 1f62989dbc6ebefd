//! OS window access used by the controller.
//!
//! [`WindowSurface`] is the only way the controller touches a window, so the
//! state machine can run against an in-memory window in tests.

use super::geometry::{ScreenPoint, WindowBounds};
use crate::cursor::RawCursorPosition;
use crate::error::{MascotResult, ResultExt};

/// Read and mutate one OS window.
///
/// Every method may fail once the window has been destroyed; callers treat
/// those failures as no-ops.
pub trait WindowSurface {
    /// Stable identity of the window, used to key its session.
    fn label(&self) -> &str;

    /// Current cursor position in screen coordinates.
    fn cursor_position(&self) -> MascotResult<ScreenPoint>;

    /// Current window origin and size.
    fn outer_bounds(&self) -> MascotResult<WindowBounds>;

    /// Move and resize the window in one step.
    fn set_outer_bounds(&self, bounds: WindowBounds) -> MascotResult<()>;

    /// `true` lets pointer input fall through to windows underneath.
    fn set_input_transparent(&self, transparent: bool) -> MascotResult<()>;
}

// ============================================================================
// Physical Coordinate Helpers
// ============================================================================
// Tauri's builder methods use logical coordinates which don't match the
// cursor on scaled displays. Positions and sizes are always set physically.

/// Position a window using physical (pixel) coordinates.
pub(crate) fn set_physical_position(
    window: &tauri::WebviewWindow,
    x: i32,
    y: i32,
) -> MascotResult<()> {
    window
        .set_position(tauri::Position::Physical(tauri::PhysicalPosition { x, y }))
        .context("Failed to set position")
}

/// Resize a window using physical (pixel) dimensions.
pub(crate) fn set_physical_size(
    window: &tauri::WebviewWindow,
    width: u32,
    height: u32,
) -> MascotResult<()> {
    window
        .set_size(tauri::Size::Physical(tauri::PhysicalSize { width, height }))
        .context("Failed to set size")
}

/// Position and resize a window using physical (pixel) coordinates.
pub(crate) fn set_physical_bounds(
    window: &tauri::WebviewWindow,
    bounds: WindowBounds,
) -> MascotResult<()> {
    set_physical_position(window, bounds.x, bounds.y)?;
    set_physical_size(window, bounds.width, bounds.height)
}

impl WindowSurface for tauri::WebviewWindow {
    fn label(&self) -> &str {
        tauri::WebviewWindow::label(self)
    }

    fn cursor_position(&self) -> MascotResult<ScreenPoint> {
        RawCursorPosition::get().map(RawCursorPosition::to_screen_point)
    }

    fn outer_bounds(&self) -> MascotResult<WindowBounds> {
        // Size is read and written through the inner size so a drag never
        // grows the window by the frame thickness.
        let position = self
            .outer_position()
            .with_context(|| format!("Failed to read position of '{}'", self.label()))?;
        let size = self
            .inner_size()
            .with_context(|| format!("Failed to read size of '{}'", self.label()))?;
        Ok(WindowBounds::from_xywh(
            position.x,
            position.y,
            size.width,
            size.height,
        ))
    }

    fn set_outer_bounds(&self, bounds: WindowBounds) -> MascotResult<()> {
        set_physical_bounds(self, bounds)
    }

    fn set_input_transparent(&self, transparent: bool) -> MascotResult<()> {
        self.set_ignore_cursor_events(transparent)
            .with_context(|| format!("Failed to set click-through on '{}'", self.label()))
    }
}
