//! Pointer and keyboard handling for the mascot webview.
//!
//! The controller turns DOM-level input into channel messages:
//! - hover: every pointer move is hit-tested against the scene and the host
//!   is told when click-through should flip
//! - drag: a modifier-held press on the mascot moves the window
//! - debug override: a key that forces the window to take input
//!
//! It holds no DOM handles. Anything the DOM has to do in response comes
//! back as [`Effect`]s, so the whole state machine runs natively in tests.

use mascot_channel::ChannelMessage;
use serde::{Deserialize, Serialize};

use crate::channel::ChannelSender;
use crate::gesture::{DragGesture, DragModifier, Effect, Modifiers};
use crate::hover::HoverTracker;
use crate::scene::SceneView;
use crate::viewport::ViewportRect;

/// Input settings read from the host's mascot config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InputOptions {
    pub drag_modifier: DragModifier,
    /// `KeyboardEvent.key` value of the capture-input override.
    pub debug_override_key: String,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            drag_modifier: DragModifier::Alt,
            debug_override_key: "F1".to_string(),
        }
    }
}

pub struct MascotController<C, S> {
    channel: C,
    scene: S,
    viewport: ViewportRect,
    hover: HoverTracker,
    gesture: DragGesture,
    options: InputOptions,
}

impl<C: ChannelSender, S: SceneView> MascotController<C, S> {
    pub fn new(channel: C, scene: S, options: InputOptions) -> Self {
        Self {
            channel,
            scene,
            viewport: ViewportRect::default(),
            hover: HoverTracker::default(),
            gesture: DragGesture::new(options.drag_modifier),
            options,
        }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn options(&self) -> &InputOptions {
        &self.options
    }

    /// Canvas rectangle used to map client coordinates.
    pub fn set_viewport(&mut self, viewport: ViewportRect) {
        self.viewport = viewport;
    }

    pub fn is_hovering(&self) -> bool {
        self.hover.is_hovering()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    /// Whether a client position lands on any scene geometry.
    pub fn hit_test(&self, client_x: f32, client_y: f32) -> bool {
        if !self.scene.is_ready() {
            return false;
        }
        let Some(ndc) = self.viewport.to_ndc(client_x, client_y) else {
            return false;
        };
        let ray = self.scene.camera().ray_through(ndc);
        !self.scene.intersect(&ray).is_empty()
    }

    /// Pointer moved, either over the webview or forwarded by the host.
    pub fn pointer_move(&mut self, client_x: f32, client_y: f32) -> Vec<Effect> {
        if self.scene.is_ready() {
            let hovering = self.hit_test(client_x, client_y);
            if let Some(message) = self.hover.update(hovering, self.gesture.is_dragging()) {
                self.send(message);
            }
        }
        let step = self.gesture.pointer_move();
        if let Some(message) = step.message {
            self.send(message);
        }
        step.effects
    }

    /// Starts a drag when the drag modifier is held and the last move was
    /// over the mascot.
    pub fn pointer_down(&mut self, pointer_id: i32, modifiers: Modifiers) -> Vec<Effect> {
        let step = self
            .gesture
            .pointer_down(pointer_id, modifiers, self.hover.is_hovering());
        if let Some(message) = step.message {
            self.send(message);
        }
        step.effects
    }

    /// Pointer released or cancelled.
    pub fn pointer_up(&mut self) -> Vec<Effect> {
        let step = self.gesture.pointer_up();
        if let Some(message) = step.message {
            self.send(message);
            // Hover changes seen during the drag were held back.
            if let Some(message) = self.hover.reconcile() {
                self.send(message);
            }
        }
        step.effects
    }

    /// The animation frame requested through [`Effect::RequestFrame`].
    pub fn animation_frame(&mut self) {
        if let Some(message) = self.gesture.animation_frame() {
            self.send(message);
        }
    }

    /// Returns true when the key was handled.
    ///
    /// The override only tells the host to capture input; hover tracking is
    /// left alone so the window stays interactive until the next hover
    /// change.
    pub fn key_down(&mut self, key: &str) -> bool {
        if key != self.options.debug_override_key {
            return false;
        }
        log::info!("[MascotInput] debug override: capturing input");
        self.send(ChannelMessage::SetIgnore(false));
        true
    }

    fn send(&self, message: ChannelMessage) {
        log::debug!("[MascotInput] -> {}", message);
        self.channel.send(message);
    }
}
