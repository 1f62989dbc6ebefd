use std::time::Duration;

use tauri::{Manager, RunEvent};

mod app;
mod commands;
pub mod config;
mod cursor;
pub mod error;
pub mod window_input;

use commands::logging::LogLevel;
use window_input::{PointerForwarder, WindowInputController, WindowInputState};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    config::mascot::load_from_env();

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|_app, _argv, _cwd| {
            log::info!("Mascot is already running");
        }))
        .manage(WindowInputState::new(WindowInputController::new()))
        .on_window_event(app::events::handle_window_event)
        .invoke_handler(tauri::generate_handler![
            // Webview -> host channel
            commands::channel::mascot_channel,
            // Config
            config::mascot::get_mascot_config,
            // Logging
            commands::logging::write_log,
        ])
        .setup(|app| {
            if let Err(e) = commands::logging::init_logging(app.handle()) {
                log::warn!("File logging disabled: {}", e);
            }

            #[cfg(desktop)]
            app::tray::setup_system_tray(app)?;

            let config = config::mascot::current();
            commands::window::create_mascot_window(app.handle(), &config)?;
            app_log!(LogLevel::Info, "Mascot", "mascot window ready");

            let forwarder = if config.forward_pointer {
                window_input::spawn_pointer_forwarder(
                    app.handle().clone(),
                    Duration::from_millis(config.forward_interval_ms as u64),
                )
            } else {
                PointerForwarder::disabled()
            };
            app.manage(forwarder);

            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|app_handle, event| {
        if let RunEvent::Exit = event {
            if let Some(forwarder) = app_handle.try_state::<PointerForwarder>() {
                forwarder.stop();
            }
            app_log!(LogLevel::Info, "Mascot", "exiting");
        }
    });
}
