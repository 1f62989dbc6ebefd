//! Window event handlers.

use tauri::{Manager, Window, WindowEvent};

use crate::app_log;
use crate::commands::logging::LogLevel;
use crate::window_input::WindowInputState;

/// Handle window events for the application.
///
/// This is called from the Tauri builder's `on_window_event` hook.
pub fn handle_window_event(window: &Window, event: &WindowEvent) {
    match event {
        // A drag may still be open when the window goes away; drop it
        // quietly together with the rest of the window's input state.
        WindowEvent::Destroyed => {
            let label = window.label();
            window
                .app_handle()
                .state::<WindowInputState>()
                .lock()
                .forget_window(label);
            app_log!(LogLevel::Info, "Window", "'{}' destroyed", label);
        },

        WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
            log::debug!(
                "[WINDOW] '{}' scale factor changed to {}",
                window.label(),
                scale_factor
            );
        },

        _ => {},
    }
}
