//! WASM input layer for the mascot webview.
//!
//! Decides, from the rendered scene, when the transparent mascot window
//! should let clicks through and when a press should drag the window, and
//! reports both to the host over the `mascot_channel` command.
//!
//! The renderer owns the scene; it mirrors the camera and hit geometry here
//! through [`MascotInput::set_camera`], [`MascotInput::add_node`] and
//! [`MascotInput::add_model`].

pub mod camera;
pub mod channel;
pub mod controller;
pub mod gesture;
pub mod hover;
pub mod scene;
pub mod viewport;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlCanvasElement, KeyboardEvent, PointerEvent};

use camera::Camera;
use channel::TauriChannel;
use controller::{InputOptions, MascotController};
use gesture::{Effect, Modifiers};
use scene::{SceneGraph, SceneNode};
use viewport::ViewportRect;

type Controller = MascotController<TauriChannel, SceneGraph>;

/// Initialize panic hook and logging for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("[MascotInput] WASM module initialized");
}

/// A DOM listener that is removed again on drop.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn add(
        target: &EventTarget,
        kind: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<Self, JsValue> {
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// Input handling attached to the mascot canvas.
#[wasm_bindgen]
pub struct MascotInput {
    controller: Rc<RefCell<Controller>>,
    canvas: Option<HtmlCanvasElement>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl MascotInput {
    /// Create the input layer. `options` is the host's mascot config (or
    /// undefined for defaults).
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<MascotInput, JsValue> {
        let options: InputOptions = if options.is_undefined() || options.is_null() {
            InputOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)?
        };
        log::info!(
            "[MascotInput] drag modifier {:?}, debug key {}",
            options.drag_modifier,
            options.debug_override_key
        );

        Ok(Self {
            controller: Rc::new(RefCell::new(MascotController::new(
                TauriChannel,
                SceneGraph::default(),
                options,
            ))),
            canvas: None,
            listeners: Vec::new(),
        })
    }

    /// Start listening for input on the canvas with id `canvas_id`.
    pub fn attach(&mut self, canvas_id: &str) -> Result<(), JsValue> {
        self.detach();

        let window = web_sys::window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("Canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        let rect = canvas.get_bounding_client_rect();
        self.resize(rect.width(), rect.height());

        // Hover runs on every move anywhere in the window; moves over a
        // captured canvas bubble up here as well.
        let listeners = vec![
            Listener::add(&window, "pointermove", self.pointer_handler(&canvas, |c, e| {
                c.pointer_move(e.client_x() as f32, e.client_y() as f32)
            }))?,
            Listener::add(&canvas, "pointerdown", self.pointer_handler(&canvas, |c, e| {
                c.pointer_down(e.pointer_id(), modifiers_of(e))
            }))?,
            Listener::add(&canvas, "pointerup", self.pointer_handler(&canvas, |c, _| c.pointer_up()))?,
            Listener::add(&canvas, "pointercancel", self.pointer_handler(&canvas, |c, _| c.pointer_up()))?,
            Listener::add(&window, "keydown", self.key_handler())?,
            Listener::add(&window, "resize", self.resize_handler(&canvas))?,
        ];

        log::info!("[MascotInput] Attached to canvas: {}", canvas_id);
        self.listeners = listeners;
        self.canvas = Some(canvas);
        Ok(())
    }

    /// Remove all DOM listeners.
    pub fn detach(&mut self) {
        if !self.listeners.is_empty() {
            log::info!("[MascotInput] Detached");
        }
        self.listeners.clear();
        self.canvas = None;
    }

    /// Replace the camera. Expects the shape of [`Camera`].
    #[wasm_bindgen(js_name = setCamera)]
    pub fn set_camera(&self, camera: JsValue) -> Result<(), JsValue> {
        let camera: Camera = serde_wasm_bindgen::from_value(camera)?;
        self.controller.borrow_mut().scene_mut().set_camera(camera);
        Ok(())
    }

    /// Add hit geometry that is not the model, such as a collision volume.
    #[wasm_bindgen(js_name = addNode)]
    pub fn add_node(&self, node: JsValue) -> Result<(), JsValue> {
        let node: SceneNode = serde_wasm_bindgen::from_value(node)?;
        self.controller.borrow_mut().scene_mut().add_node(node);
        Ok(())
    }

    /// Add the loaded model. Hover detection starts from here on.
    #[wasm_bindgen(js_name = addModel)]
    pub fn add_model(&self, node: JsValue) -> Result<(), JsValue> {
        let node: SceneNode = serde_wasm_bindgen::from_value(node)?;
        log::info!("[MascotInput] Model '{}' loaded", node.name);
        self.controller.borrow_mut().scene_mut().add_model(node);
        Ok(())
    }

    /// Viewport resized; keeps the camera aspect in step.
    pub fn resize(&self, width: f64, height: f64) {
        self.controller
            .borrow_mut()
            .scene_mut()
            .camera_mut()
            .set_aspect(width as f32, height as f32);
    }

    /// Cursor position forwarded by the host while the window ignores
    /// input, in window-relative logical pixels.
    #[wasm_bindgen(js_name = forwardPointer)]
    pub fn forward_pointer(&self, x: f64, y: f64) {
        let mut controller = self.controller.borrow_mut();
        // A drag keeps the window capturing input, so the webview already
        // sees every move.
        if controller.is_dragging() {
            return;
        }
        if let Some(canvas) = &self.canvas {
            controller.set_viewport(viewport_of(canvas));
        }
        controller.pointer_move(x as f32, y as f32);
    }

    #[wasm_bindgen(getter, js_name = isHovering)]
    pub fn is_hovering(&self) -> bool {
        self.controller.borrow().is_hovering()
    }

    #[wasm_bindgen(getter, js_name = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.controller.borrow().is_dragging()
    }
}

impl MascotInput {
    fn pointer_handler(
        &self,
        canvas: &HtmlCanvasElement,
        handle: impl Fn(&mut Controller, &PointerEvent) -> Vec<Effect> + 'static,
    ) -> Closure<dyn FnMut(Event)> {
        let weak = Rc::downgrade(&self.controller);
        let canvas = canvas.clone();
        Closure::new(move |event: Event| {
            let Some(controller) = weak.upgrade() else {
                return;
            };
            let Some(pointer) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let effects = {
                let mut controller = controller.borrow_mut();
                controller.set_viewport(viewport_of(&canvas));
                handle(&mut controller, pointer)
            };
            apply_effects(&weak, &canvas, &event, effects);
        })
    }

    fn resize_handler(&self, canvas: &HtmlCanvasElement) -> Closure<dyn FnMut(Event)> {
        let weak = Rc::downgrade(&self.controller);
        let canvas = canvas.clone();
        Closure::new(move |_event: Event| {
            if let Some(controller) = weak.upgrade() {
                let viewport = viewport_of(&canvas);
                controller
                    .borrow_mut()
                    .scene_mut()
                    .camera_mut()
                    .set_aspect(viewport.width, viewport.height);
            }
        })
    }

    fn key_handler(&self) -> Closure<dyn FnMut(Event)> {
        let weak = Rc::downgrade(&self.controller);
        Closure::new(move |event: Event| {
            let (Some(controller), Some(key)) = (weak.upgrade(), event.dyn_ref::<KeyboardEvent>())
            else {
                return;
            };
            if controller.borrow_mut().key_down(&key.key()) {
                event.prevent_default();
            }
        })
    }
}

fn modifiers_of(event: &PointerEvent) -> Modifiers {
    Modifiers {
        alt: event.alt_key(),
        ctrl: event.ctrl_key(),
        shift: event.shift_key(),
        meta: event.meta_key(),
    }
}

fn viewport_of(canvas: &HtmlCanvasElement) -> ViewportRect {
    let rect = canvas.get_bounding_client_rect();
    ViewportRect::new(
        rect.left() as f32,
        rect.top() as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}

fn apply_effects(
    controller: &Weak<RefCell<Controller>>,
    canvas: &HtmlCanvasElement,
    event: &Event,
    effects: Vec<Effect>,
) {
    for effect in effects {
        match effect {
            Effect::CapturePointer(id) => {
                if let Err(e) = canvas.set_pointer_capture(id) {
                    log::warn!("[MascotInput] Pointer capture failed: {:?}", e);
                }
            },
            Effect::ReleasePointer(id) => {
                if canvas.release_pointer_capture(id).is_err() {
                    log::debug!("[MascotInput] Pointer {} was not captured", id);
                }
            },
            Effect::PreventDefault => event.prevent_default(),
            Effect::RequestFrame => request_frame(controller.clone()),
        }
    }
}

fn request_frame(controller: Weak<RefCell<Controller>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::once_into_js(move |_timestamp: f64| {
        if let Some(controller) = controller.upgrade() {
            controller.borrow_mut().animation_frame();
        }
    });
    if let Err(e) = window.request_animation_frame(callback.unchecked_ref()) {
        log::warn!("[MascotInput] requestAnimationFrame failed: {:?}", e);
    }
}
