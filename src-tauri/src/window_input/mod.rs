//! Window input controller.
//!
//! The single writer of every mascot window's click-through flag and
//! position. The webview never touches the window; it sends
//! [`ChannelMessage`]s and this module applies them.
//!
//! ## Architecture
//!
//! ```text
//! window_input/
//!   mod.rs      - WindowInputController, message dispatch
//!   geometry.rs - ScreenPoint / WindowBounds
//!   session.rs  - WindowSession / DragSession
//!   surface.rs  - WindowSurface trait + Tauri implementation
//!   forward.rs  - Cursor forwarding while click-through
//! ```
//!
//! All operations are no-ops when the window is gone or a read fails: the
//! channel is fire-and-forget and may race with window teardown.

pub mod forward;
pub mod geometry;
pub mod session;
pub mod surface;


use std::collections::HashMap;

use mascot_channel::ChannelMessage;
use parking_lot::Mutex;

pub use forward::{spawn_pointer_forwarder, PointerForwarder};
pub use geometry::{ScreenPoint, WindowBounds};
pub use session::{DragSession, WindowSession};
pub use surface::WindowSurface;

/// Controller as stored in Tauri managed state.
pub type WindowInputState = Mutex<WindowInputController>;

/// Input sessions of all open windows, keyed by window label.
#[derive(Debug, Default)]
pub struct WindowInputController {
    sessions: HashMap<String, WindowSession>,
}

impl WindowInputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self, label: &str) -> Option<&WindowSession> {
        self.sessions.get(label)
    }

    /// Whether clicks currently fall through the window. Unknown windows
    /// report the initial state.
    pub fn is_input_transparent(&self, label: &str) -> bool {
        self.sessions
            .get(label)
            .map_or(true, WindowSession::input_transparent)
    }

    /// Labels of windows that currently let clicks through.
    pub fn transparent_windows(&self) -> Vec<String> {
        self.sessions
            .iter()
            .filter(|(_, session)| session.input_transparent())
            .map(|(label, _)| label.clone())
            .collect()
    }

    /// Apply one message received from the webview.
    pub fn apply<S: WindowSurface>(&mut self, surface: &S, message: ChannelMessage) {
        log::trace!("[WINDOW_INPUT] {} <- {}", surface.label(), message);
        match message {
            ChannelMessage::SetIgnore(ignore) => self.set_ignore_input(surface, ignore),
            ChannelMessage::DragStart => self.begin_drag(surface),
            ChannelMessage::DragMove => self.update_drag(surface),
            ChannelMessage::DragEnd => self.end_drag(surface),
        }
    }

    /// Set whether the window lets pointer input through.
    ///
    /// Safe to repeat with the current value. A pass-through request during
    /// a drag is held until the drag ends so the window keeps the pointer.
    pub fn set_ignore_input<S: WindowSurface>(&mut self, surface: &S, ignore: bool) {
        let label = surface.label();
        if ignore {
            if let Some(session) = self.sessions.get_mut(label).filter(|s| s.is_dragging()) {
                log::debug!("[WINDOW_INPUT] {}: deferring click-through until drag ends", label);
                session.defer_ignore();
                return;
            }
        }

        if let Err(e) = surface.set_input_transparent(ignore) {
            log::debug!("[WINDOW_INPUT] {}: set_ignore({}) dropped: {}", label, ignore, e);
            return;
        }
        self.sessions
            .entry(label.to_string())
            .or_default()
            .set_input_transparent(ignore);
    }

    /// Start dragging from the current cursor position.
    ///
    /// Replaces any session already in progress for this window.
    pub fn begin_drag<S: WindowSurface>(&mut self, surface: &S) {
        let label = surface.label();
        let (cursor, bounds) = match (surface.cursor_position(), surface.outer_bounds()) {
            (Ok(cursor), Ok(bounds)) => (cursor, bounds),
            (Err(e), _) | (_, Err(e)) => {
                log::debug!("[WINDOW_INPUT] {}: drag-start dropped: {}", label, e);
                return;
            },
        };

        let drag = DragSession::begin(cursor, bounds);
        let previous = self
            .sessions
            .entry(label.to_string())
            .or_default()
            .start_drag(drag);
        if previous.is_some() {
            log::debug!("[WINDOW_INPUT] {}: replaced unfinished drag", label);
        }
        log::debug!(
            "[WINDOW_INPUT] {}: drag started, offset {:?}, size {:?}",
            label,
            drag.cursor_offset(),
            drag.size()
        );
    }

    /// Move the window so the grab point stays under the cursor.
    pub fn update_drag<S: WindowSurface>(&mut self, surface: &S) {
        let label = surface.label();
        let Some(drag) = self.sessions.get(label).and_then(|s| s.drag().copied()) else {
            return;
        };

        let cursor = match surface.cursor_position() {
            Ok(cursor) => cursor,
            Err(e) => {
                log::debug!("[WINDOW_INPUT] {}: drag-move dropped: {}", label, e);
                return;
            },
        };

        if let Err(e) = surface.set_outer_bounds(drag.bounds_for(cursor)) {
            log::debug!("[WINDOW_INPUT] {}: drag-move dropped: {}", label, e);
        }
    }

    /// Finish the drag, if any, and apply a pass-through request held during it.
    pub fn end_drag<S: WindowSurface>(&mut self, surface: &S) {
        let label = surface.label();
        let Some(session) = self.sessions.get_mut(label) else {
            return;
        };
        if !session.is_dragging() {
            return;
        }

        let apply_deferred = session.finish_drag();
        log::debug!("[WINDOW_INPUT] {}: drag ended", label);
        if apply_deferred {
            self.set_ignore_input(surface, true);
        }
    }

    /// Drop all state of a destroyed window, including an unfinished drag.
    pub fn forget_window(&mut self, label: &str) {
        if let Some(session) = self.sessions.remove(label) {
            if session.is_dragging() {
                log::debug!("[WINDOW_INPUT] {}: window closed mid-drag", label);
            }
        }
    }
}
