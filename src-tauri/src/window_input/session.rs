//! Per-window input state.

use super::geometry::{ScreenPoint, WindowBounds};

/// An active drag of one window.
///
/// Both fields are captured once at drag start. Holding the size fixed keeps
/// a display-scale change mid-drag from feeding a new size back into every
/// subsequent move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    cursor_offset: (f64, f64),
    size: (u32, u32),
}

impl DragSession {
    /// Start a drag from the cursor position and the window bounds at press time.
    pub fn begin(cursor: ScreenPoint, bounds: WindowBounds) -> Self {
        Self {
            cursor_offset: cursor.offset_from(bounds.origin()),
            size: bounds.size(),
        }
    }

    /// Vector from the window origin to the cursor.
    pub fn cursor_offset(&self) -> (f64, f64) {
        self.cursor_offset
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Window bounds that keep the grab point under `cursor`.
    pub fn bounds_for(&self, cursor: ScreenPoint) -> WindowBounds {
        let (dx, dy) = self.cursor_offset;
        WindowBounds::from_xywh(
            (cursor.x - dx).round() as i32,
            (cursor.y - dy).round() as i32,
            self.size.0,
            self.size.1,
        )
    }
}

/// Input state of one open window.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowSession {
    input_transparent: bool,
    drag: Option<DragSession>,
    deferred_ignore: bool,
}

impl Default for WindowSession {
    fn default() -> Self {
        Self {
            input_transparent: true,
            drag: None,
            deferred_ignore: false,
        }
    }
}

impl WindowSession {
    /// Whether clicks currently fall through the window.
    pub fn input_transparent(&self) -> bool {
        self.input_transparent
    }

    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// A pass-through request that arrived mid-drag and is still pending.
    pub fn has_deferred_ignore(&self) -> bool {
        self.deferred_ignore
    }

    pub(super) fn set_input_transparent(&mut self, transparent: bool) {
        self.input_transparent = transparent;
        if !transparent {
            self.deferred_ignore = false;
        }
    }

    pub(super) fn defer_ignore(&mut self) {
        self.deferred_ignore = true;
    }

    pub(super) fn start_drag(&mut self, drag: DragSession) -> Option<DragSession> {
        self.drag.replace(drag)
    }

    /// Ends the drag and returns whether a deferred pass-through must be applied.
    pub(super) fn finish_drag(&mut self) -> bool {
        self.drag = None;
        std::mem::take(&mut self.deferred_ignore)
    }
}
