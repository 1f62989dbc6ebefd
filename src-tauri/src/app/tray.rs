//! System tray setup and event handling.
//!
//! The tray is the way back in when click-through gets stuck: "Capture
//! Input" forces the mascot window to take pointer input again without
//! going through the webview.

use tauri::{
    menu::{Menu, MenuItem, PredefinedMenuItem},
    tray::TrayIconBuilder,
    App, AppHandle, Manager,
};

use crate::app_log;
use crate::commands::logging::LogLevel;
use crate::commands::window::MASCOT_WINDOW_LABEL;
use crate::window_input::WindowInputState;

/// Force the mascot window to capture pointer input.
pub(crate) fn capture_input(app: &AppHandle) {
    let Some(window) = app.get_webview_window(MASCOT_WINDOW_LABEL) else {
        return;
    };
    app.state::<WindowInputState>()
        .lock()
        .set_ignore_input(&window, false);
    app_log!(LogLevel::Info, "Tray", "capture input forced on '{}'", MASCOT_WINDOW_LABEL);
}

/// Set up the system tray with menu and event handlers.
pub fn setup_system_tray(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    let capture = MenuItem::with_id(app, "capture_input", "Capture Input", true, None::<&str>)?;
    let quit = MenuItem::with_id(app, "quit", "Quit Mascot", true, None::<&str>)?;
    let separator = PredefinedMenuItem::separator(app)?;

    let menu = Menu::with_items(app, &[&capture, &separator, &quit])?;

    let mut builder = TrayIconBuilder::new()
        .menu(&menu)
        .show_menu_on_left_click(true)
        .on_menu_event(move |app, event| match event.id.as_ref() {
            "quit" => app.exit(0),
            "capture_input" => capture_input(app),
            _ => {},
        });

    if let Some(icon) = app.default_window_icon() {
        builder = builder.icon(icon.clone());
    }

    let _tray = builder.build(app)?;
    Ok(())
}
