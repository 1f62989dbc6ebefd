//! Modifier-gated window drag gesture.
//!
//! A drag starts on pointer-down while the pointer is over the mascot and
//! the drag modifier is held, and ends on the next pointer-up or cancel.
//! Moves in between are coalesced to at most one `window:drag-move` per
//! animation frame.

use mascot_channel::ChannelMessage;
use serde::{Deserialize, Serialize};

/// Modifier key that has to be held to start a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragModifier {
    #[default]
    Alt,
    Ctrl,
    Shift,
    Meta,
}

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Self::default()
        }
    }

    pub fn holds(&self, modifier: DragModifier) -> bool {
        match modifier {
            DragModifier::Alt => self.alt,
            DragModifier::Ctrl => self.ctrl,
            DragModifier::Shift => self.shift,
            DragModifier::Meta => self.meta,
        }
    }
}

/// Side effects the DOM layer has to perform for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    CapturePointer(i32),
    ReleasePointer(i32),
    PreventDefault,
    /// Call back into the controller on the next animation frame.
    RequestFrame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging {
        pointer_id: i32,
    },
}

/// Outcome of feeding one event to the gesture.
#[derive(Debug, Default, PartialEq)]
pub struct Step {
    pub message: Option<ChannelMessage>,
    pub effects: Vec<Effect>,
}

impl Step {
    fn effects(effects: Vec<Effect>) -> Self {
        Self {
            message: None,
            effects,
        }
    }
}

#[derive(Debug, Default)]
pub struct DragGesture {
    state: GestureState,
    move_pending: bool,
    modifier: DragModifier,
}

impl DragGesture {
    pub fn new(modifier: DragModifier) -> Self {
        Self {
            modifier,
            ..Self::default()
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    pub fn pointer_down(&mut self, pointer_id: i32, modifiers: Modifiers, hovering: bool) -> Step {
        if self.is_dragging() || !hovering || !modifiers.holds(self.modifier) {
            return Step::default();
        }
        self.state = GestureState::Dragging { pointer_id };
        self.move_pending = false;
        Step {
            message: Some(ChannelMessage::DragStart),
            effects: vec![Effect::CapturePointer(pointer_id), Effect::PreventDefault],
        }
    }

    pub fn pointer_move(&mut self) -> Step {
        if !self.is_dragging() {
            return Step::default();
        }
        if self.move_pending {
            return Step::effects(vec![Effect::PreventDefault]);
        }
        self.move_pending = true;
        Step::effects(vec![Effect::RequestFrame, Effect::PreventDefault])
    }

    /// The frame requested by a move has arrived.
    pub fn animation_frame(&mut self) -> Option<ChannelMessage> {
        if !std::mem::take(&mut self.move_pending) {
            return None;
        }
        self.is_dragging().then_some(ChannelMessage::DragMove)
    }

    /// Pointer released or cancelled. Any pointer ends the drag.
    pub fn pointer_up(&mut self) -> Step {
        let GestureState::Dragging { pointer_id } = self.state else {
            return Step::default();
        };
        self.state = GestureState::Idle;
        self.move_pending = false;
        Step {
            message: Some(ChannelMessage::DragEnd),
            effects: vec![Effect::ReleasePointer(pointer_id), Effect::PreventDefault],
        }
    }
}
