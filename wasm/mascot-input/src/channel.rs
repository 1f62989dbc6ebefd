//! Sending channel messages to the window host.

use mascot_channel::{ChannelMessage, CHANNEL_COMMAND};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{spawn_local, JsFuture};

/// Fire-and-forget sender. Delivery failures are logged, never returned.
pub trait ChannelSender {
    fn send(&self, message: ChannelMessage);
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI_INTERNALS__"], js_name = invoke)]
    fn tauri_invoke(cmd: &str, args: JsValue) -> Result<js_sys::Promise, JsValue>;
}

#[derive(Serialize)]
struct ChannelArgs {
    message: ChannelMessage,
}

#[derive(Serialize)]
struct LogArgs<'a> {
    level: &'a str,
    source: &'a str,
    message: &'a str,
}

/// Invoke a host command without waiting for it. Rejections are logged.
fn invoke_detached<T: Serialize>(command: &'static str, args: &T, on_error: impl FnOnce(String) + 'static) {
    let args = match serde_wasm_bindgen::to_value(args) {
        Ok(args) => args,
        Err(e) => {
            log::error!("[MascotInput] Failed to encode '{}' args: {}", command, e);
            return;
        },
    };
    let promise = match tauri_invoke(command, args) {
        Ok(promise) => promise,
        Err(e) => {
            log::warn!("[MascotInput] '{}' unavailable: {:?}", command, e);
            return;
        },
    };
    spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            on_error(format!("{:?}", e));
        }
    });
}

/// Append a line to the host's log file.
pub fn write_host_log(level: &str, message: &str) {
    let args = LogArgs {
        level,
        source: "MascotInput",
        message,
    };
    invoke_detached("write_log", &args, |e| {
        log::warn!("[MascotInput] write_log rejected: {}", e);
    });
}

/// Channel backed by the Tauri IPC bridge of the current webview.
#[derive(Debug, Default, Clone, Copy)]
pub struct TauriChannel;

impl ChannelSender for TauriChannel {
    fn send(&self, message: ChannelMessage) {
        invoke_detached(CHANNEL_COMMAND, &ChannelArgs { message }, move |e| {
            log::warn!("[MascotInput] {} rejected: {}", message, e);
            write_host_log("warn", &format!("{} rejected: {}", message, e));
        });
    }
}
