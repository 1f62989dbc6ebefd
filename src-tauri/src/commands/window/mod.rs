//! Mascot window creation.
//!
//! The window is frameless, transparent, always on top and starts
//! click-through; from then on only the window input controller changes its
//! position or input behaviour.

use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder};

use crate::config::MascotConfig;
use crate::error::{MascotResult, OptionExt};
use crate::window_input::surface::set_physical_bounds;
use crate::window_input::{WindowBounds, WindowInputState};

/// Mascot window label
pub(crate) const MASCOT_WINDOW_LABEL: &str = "mascot";

/// Bounds that put a window of `size` in the bottom-right corner of a work area.
pub(crate) fn bottom_right_bounds(work_area: WindowBounds, size: (u32, u32)) -> WindowBounds {
    let (width, height) = size;
    WindowBounds::from_xywh(
        work_area.x + work_area.width as i32 - width as i32,
        work_area.y + work_area.height as i32 - height as i32,
        width,
        height,
    )
}

/// Physical size of a window given in logical pixels.
pub(crate) fn physical_size(config: &MascotConfig, scale_factor: f64) -> (u32, u32) {
    (
        (config.window_width as f64 * scale_factor).round() as u32,
        (config.window_height as f64 * scale_factor).round() as u32,
    )
}

/// Create the mascot window, place it and make it click-through.
pub fn create_mascot_window(app: &AppHandle, config: &MascotConfig) -> MascotResult<WebviewWindow> {
    if let Some(window) = app.get_webview_window(MASCOT_WINDOW_LABEL) {
        return Ok(window);
    }

    // Created hidden so it never flashes at the default position
    let window = WebviewWindowBuilder::new(
        app,
        MASCOT_WINDOW_LABEL,
        WebviewUrl::App("index.html".into()),
    )
    .title("Mascot")
    .inner_size(config.window_width as f64, config.window_height as f64)
    .transparent(true)
    .decorations(false)
    .shadow(false)
    .always_on_top(true)
    .resizable(false)
    .maximizable(false)
    .skip_taskbar(true)
    .visible(false)
    .focused(false)
    .build()?;

    match place_bottom_right(&window, config) {
        Ok(bounds) => log::debug!("[WINDOW] mascot placed at {:?}", bounds),
        Err(e) => log::warn!("[WINDOW] keeping default mascot position: {}", e),
    }

    app.state::<WindowInputState>()
        .lock()
        .set_ignore_input(&window, true);

    window.show()?;
    Ok(window)
}

fn place_bottom_right(window: &WebviewWindow, config: &MascotConfig) -> MascotResult<WindowBounds> {
    let monitor = window
        .primary_monitor()?
        .context("No primary monitor")?;
    let area = monitor.work_area();
    let work_area = WindowBounds::from_xywh(
        area.position.x,
        area.position.y,
        area.size.width,
        area.size.height,
    );

    let bounds = bottom_right_bounds(work_area, physical_size(config, monitor.scale_factor()));
    set_physical_bounds(window, bounds)?;
    Ok(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placed_in_bottom_right_corner() {
        let work_area = WindowBounds::from_xywh(0, 0, 1920, 1040);
        assert_eq!(
            bottom_right_bounds(work_area, (350, 350)),
            WindowBounds::from_xywh(1570, 690, 350, 350)
        );
    }

    #[test]
    fn placement_respects_offset_work_area() {
        let work_area = WindowBounds::from_xywh(-1280, 40, 1280, 984);
        assert_eq!(
            bottom_right_bounds(work_area, (200, 100)),
            WindowBounds::from_xywh(-200, 924, 200, 100)
        );
    }

    #[test]
    fn size_scales_with_display() {
        let config = MascotConfig::default();
        assert_eq!(physical_size(&config, 1.0), (350, 350));
        assert_eq!(physical_size(&config, 1.5), (525, 525));
    }
}
