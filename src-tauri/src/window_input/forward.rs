//! Cursor forwarding for click-through windows.
//!
//! A window with cursor events ignored receives no pointer moves, so the
//! webview could never notice the cursor arriving over the mascot again.
//! This task polls the global cursor and, while a mascot window is
//! click-through and the cursor moves inside it, emits
//! [`POINTER_FORWARD_EVENT`] to that window with window-relative logical
//! coordinates. The webview runs its hover test on those as if they were
//! native moves.

use std::pin::pin;
use std::time::Duration;

use futures::future::Either;
use mascot_channel::{ForwardedPointer, POINTER_FORWARD_EVENT};
use parking_lot::Mutex;
use tauri::{AppHandle, Emitter, Manager};
use tokio_util::sync::{CancellationToken, DropGuard};

use super::geometry::WindowBounds;
use super::surface::WindowSurface;
use super::WindowInputState;
use crate::cursor::RawCursorPosition;
use crate::error::MascotResult;

/// Handle to the forwarding task. Dropping or stopping it ends the task.
pub struct PointerForwarder {
    stop: Mutex<Option<DropGuard>>,
}

impl PointerForwarder {
    /// A handle with no task behind it, used when forwarding is disabled.
    pub fn disabled() -> Self {
        Self {
            stop: Mutex::new(None),
        }
    }

    pub fn is_running(&self) -> bool {
        self.stop.lock().is_some()
    }

    /// Stop the forwarding task.
    pub fn stop(&self) {
        drop(self.stop.lock().take());
    }
}

/// Payload to forward for a cursor at `cursor`, if it is inside `bounds`.
pub fn forwarded_pointer(
    cursor: RawCursorPosition,
    bounds: WindowBounds,
    scale_factor: f64,
) -> Option<ForwardedPointer> {
    cursor
        .relative_to_window(bounds, scale_factor)
        .map(|(x, y)| ForwardedPointer { x, y })
}

/// Cursor sampling state of the forwarding loop.
#[derive(Debug, Default)]
struct CursorPoll {
    last_position: Option<RawCursorPosition>,
    unavailable_logged: bool,
}

impl CursorPoll {
    /// Position to forward for this tick, if it is readable and has moved.
    ///
    /// An unreadable cursor skips the tick and is logged once per outage.
    fn sample(&mut self, read: MascotResult<RawCursorPosition>) -> Option<RawCursorPosition> {
        match read {
            Ok(position) => {
                self.unavailable_logged = false;
                if self.last_position == Some(position) {
                    return None;
                }
                self.last_position = Some(position);
                Some(position)
            },
            Err(e) => {
                if !self.unavailable_logged {
                    log::warn!("[FORWARD] cursor unavailable, skipping forwarding: {}", e);
                    self.unavailable_logged = true;
                }
                None
            },
        }
    }
}

/// Spawn the forwarding task on Tauri's async runtime.
pub fn spawn_pointer_forwarder(app: AppHandle, interval: Duration) -> PointerForwarder {
    let stop_token = CancellationToken::new();
    let stop_token_child = stop_token.child_token();

    tauri::async_runtime::spawn(async move {
        let mut poll = CursorPoll::default();

        loop {
            let sleep = tokio::time::sleep(interval);
            let Either::Right(_) =
                futures::future::select(pin!(stop_token_child.cancelled()), pin!(sleep)).await
            else {
                break;
            };

            let Some(position) = poll.sample(RawCursorPosition::get()) else {
                continue;
            };

            let labels = app.state::<WindowInputState>().lock().transparent_windows();
            for label in labels {
                let Some(window) = app.get_webview_window(&label) else {
                    continue;
                };
                let Ok(bounds) = window.outer_bounds() else {
                    continue;
                };
                let scale_factor = window.scale_factor().unwrap_or(1.0);

                if let Some(pointer) = forwarded_pointer(position, bounds, scale_factor) {
                    if let Err(e) = app.emit_to(label.as_str(), POINTER_FORWARD_EVENT, pointer) {
                        log::debug!("[FORWARD] emit to {} failed: {}", label, e);
                    }
                }
            }
        }

        log::info!("Pointer forwarder done");
    });

    PointerForwarder {
        stop: Mutex::new(Some(stop_token.drop_guard())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MascotError;

    #[test]
    fn forwards_inside_window_only() {
        let bounds = WindowBounds::from_xywh(1000, 600, 350, 350);

        let inside = forwarded_pointer(RawCursorPosition::new(1100, 650), bounds, 1.0);
        assert_eq!(inside, Some(ForwardedPointer { x: 100.0, y: 50.0 }));

        let outside = forwarded_pointer(RawCursorPosition::new(900, 650), bounds, 1.0);
        assert_eq!(outside, None);
    }

    #[test]
    fn forwarded_coordinates_are_logical() {
        let bounds = WindowBounds::from_xywh(0, 0, 700, 700);
        let pointer = forwarded_pointer(RawCursorPosition::new(350, 140), bounds, 1.75);
        assert_eq!(pointer, Some(ForwardedPointer { x: 200.0, y: 80.0 }));
    }

    #[test]
    fn unreadable_cursor_skips_tick() {
        let mut poll = CursorPoll::default();
        let unavailable = || Err(MascotError::CursorError("no display".to_string()));

        assert_eq!(poll.sample(unavailable()), None);
        assert!(poll.unavailable_logged);
        assert_eq!(poll.sample(unavailable()), None);

        let position = RawCursorPosition::new(10, 20);
        assert_eq!(poll.sample(Ok(position)), Some(position));
        assert!(!poll.unavailable_logged);
    }

    #[test]
    fn unmoved_cursor_is_not_forwarded_again() {
        let mut poll = CursorPoll::default();
        let position = RawCursorPosition::new(10, 20);
        assert_eq!(poll.sample(Ok(position)), Some(position));
        assert_eq!(poll.sample(Ok(position)), None);

        let moved = RawCursorPosition::new(11, 20);
        assert_eq!(poll.sample(Ok(moved)), Some(moved));
    }

    #[test]
    fn disabled_handle_is_not_running() {
        let forwarder = PointerForwarder::disabled();
        assert!(!forwarder.is_running());
        forwarder.stop();
        assert!(!forwarder.is_running());
    }
}
