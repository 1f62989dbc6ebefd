//! Receiving end of the webview -> host channel.

use mascot_channel::ChannelMessage;
use tauri::{command, State, WebviewWindow};

use crate::window_input::WindowInputState;

/// Apply a message from the calling webview to its own window.
///
/// Fire-and-forget: nothing is returned and failures are only logged, so a
/// message racing with window teardown can never reject on the webview side.
#[command]
pub fn mascot_channel(
    window: WebviewWindow,
    state: State<'_, WindowInputState>,
    message: ChannelMessage,
) {
    state.lock().apply(&window, message);
}
