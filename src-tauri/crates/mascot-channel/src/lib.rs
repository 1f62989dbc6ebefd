//! Message vocabulary between the mascot webview and the window host.
//!
//! The webview owns the scene and decides when the cursor is over the
//! mascot; the host owns the OS window. The only thing the two share is
//! this set of fire-and-forget messages, carried by a single Tauri command
//! as an adjacently tagged JSON object:
//!
//! ```text
//! { "name": "mouse-through:set-ignore", "payload": true }
//! { "name": "window:drag-start" }
//! ```
//!
//! Messages flow one way (webview -> host) and are never acknowledged.
//! [`POINTER_FORWARD_EVENT`] is the only event going the other way.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tauri command that receives every [`ChannelMessage`].
pub const CHANNEL_COMMAND: &str = "mascot_channel";

/// Wire name of [`ChannelMessage::SetIgnore`].
pub const SET_IGNORE: &str = "mouse-through:set-ignore";
/// Wire name of [`ChannelMessage::DragStart`].
pub const DRAG_START: &str = "window:drag-start";
/// Wire name of [`ChannelMessage::DragMove`].
pub const DRAG_MOVE: &str = "window:drag-move";
/// Wire name of [`ChannelMessage::DragEnd`].
pub const DRAG_END: &str = "window:drag-end";

/// Event emitted by the host to a mascot window while it is click-through.
pub const POINTER_FORWARD_EVENT: &str = "mouse-through:pointer-forward";

/// A request from the scene side to the window host.
///
/// None of the variants carry cursor data. The host reads the cursor itself
/// when a message arrives, so a late or coalesced message still lands on the
/// current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "payload")]
pub enum ChannelMessage {
    /// `true` lets clicks fall through to windows underneath.
    #[serde(rename = "mouse-through:set-ignore")]
    SetIgnore(bool),
    #[serde(rename = "window:drag-start")]
    DragStart,
    #[serde(rename = "window:drag-move")]
    DragMove,
    #[serde(rename = "window:drag-end")]
    DragEnd,
}

impl ChannelMessage {
    /// Wire name of the message.
    pub fn name(&self) -> &'static str {
        match self {
            ChannelMessage::SetIgnore(_) => SET_IGNORE,
            ChannelMessage::DragStart => DRAG_START,
            ChannelMessage::DragMove => DRAG_MOVE,
            ChannelMessage::DragEnd => DRAG_END,
        }
    }

    /// Whether the message belongs to a drag gesture.
    pub fn is_drag(&self) -> bool {
        !matches!(self, ChannelMessage::SetIgnore(_))
    }
}

impl fmt::Display for ChannelMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelMessage::SetIgnore(ignore) => write!(f, "{}({})", self.name(), ignore),
            _ => f.write_str(self.name()),
        }
    }
}

/// Payload of [`POINTER_FORWARD_EVENT`].
///
/// Coordinates are logical pixels relative to the window's top-left corner,
/// the same space as `clientX`/`clientY` in the webview.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForwardedPointer {
    pub x: f64,
    pub y: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_ignore_carries_payload() {
        let json = serde_json::to_value(ChannelMessage::SetIgnore(true)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "name": "mouse-through:set-ignore", "payload": true })
        );
    }

    #[test]
    fn drag_messages_have_no_payload() {
        let json = serde_json::to_value(ChannelMessage::DragMove).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "window:drag-move" }));
    }

    #[test]
    fn parses_messages_sent_by_the_webview() {
        let msg: ChannelMessage =
            serde_json::from_str(r#"{"name":"window:drag-start"}"#).unwrap();
        assert_eq!(msg, ChannelMessage::DragStart);

        let msg: ChannelMessage =
            serde_json::from_str(r#"{"name":"mouse-through:set-ignore","payload":false}"#)
                .unwrap();
        assert_eq!(msg, ChannelMessage::SetIgnore(false));
    }

    #[test]
    fn rejects_unknown_names() {
        let result: Result<ChannelMessage, _> =
            serde_json::from_str(r#"{"name":"window:resize"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn names_match_wire_tags() {
        for msg in [
            ChannelMessage::SetIgnore(false),
            ChannelMessage::DragStart,
            ChannelMessage::DragMove,
            ChannelMessage::DragEnd,
        ] {
            let json = serde_json::to_value(msg).unwrap();
            assert_eq!(json["name"], msg.name());
        }
    }

    #[test]
    fn display_includes_payload() {
        assert_eq!(
            ChannelMessage::SetIgnore(true).to_string(),
            "mouse-through:set-ignore(true)"
        );
        assert_eq!(ChannelMessage::DragEnd.to_string(), "window:drag-end");
        assert!(ChannelMessage::DragEnd.is_drag());
        assert!(!ChannelMessage::SetIgnore(true).is_drag());
    }
}
