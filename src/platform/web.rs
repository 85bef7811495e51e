//! Browser host
//!
//! Owns one [`Engine`] behind `Rc<RefCell<_>>`, feeds it keyboard and
//! touch-pad events, and drives it from `requestAnimationFrame`. Each frame
//! the JS renderer receives a JSON snapshot of the state plus the events
//! raised during that frame. Everything registered here is torn down by
//! [`WebHost::stop`].

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, KeyboardEvent, Window};

use crate::config::EngineConfig;
use crate::consts::SIM_DT;
use crate::engine::Engine;
use crate::input::{InputLatch, TouchButton};
use super::frame_navigation;

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// A DOM listener we must remove on stop
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// Cancelable animation frame loop
struct FrameLoop {
    active: Cell<bool>,
    handle: Cell<Option<i32>>,
    last_time: Cell<Option<f64>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl FrameLoop {
    fn new() -> Self {
        Self {
            active: Cell::new(false),
            handle: Cell::new(None),
            last_time: Cell::new(None),
            callback: RefCell::new(None),
        }
    }

    fn request(&self) -> Result<(), JsValue> {
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return Ok(());
        };
        let handle = window()?.request_animation_frame(callback.as_ref().unchecked_ref())?;
        self.handle.set(Some(handle));
        Ok(())
    }

    fn cancel(&self) {
        self.active.set(false);
        self.last_time.set(None);
        if let Some(handle) = self.handle.take() {
            if let Ok(window) = window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
    }

    /// Seconds since the previous frame (one step on the first frame)
    fn elapsed(&self, time: f64) -> f32 {
        match self.last_time.replace(Some(time)) {
            Some(last) => ((time - last) / 1000.0) as f32,
            None => SIM_DT,
        }
    }
}

fn navigate(on_navigate: Option<&js_sys::Function>, destination: &str) {
    log::info!("Navigating to {}", destination);
    let result = match on_navigate {
        Some(callback) => callback
            .call1(&JsValue::NULL, &JsValue::from_str(destination))
            .map(|_| ()),
        None => window().and_then(|w| w.location().set_href(destination)),
    };
    if let Err(err) = result {
        log::error!("Navigation to {} failed: {:?}", destination, err);
    }
}

/// Game host exported to JavaScript
#[wasm_bindgen]
pub struct WebHost {
    engine: Rc<RefCell<Engine>>,
    frame: Rc<FrameLoop>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl WebHost {
    /// Create a host over the home stage, optionally tuned by a JSON config
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WebHost, JsValue> {
        console_error_panic_hook::set_once();
        // Fails harmlessly when a previous host already installed it
        let _ = console_log::init_with_level(log::Level::Info);

        let config = match config_json {
            Some(json) => EngineConfig::from_json(&json).map_err(to_js)?,
            None => EngineConfig::default(),
        };
        let engine = Engine::new(config, InputLatch::new()).map_err(to_js)?;

        Ok(Self {
            engine: Rc::new(RefCell::new(engine)),
            frame: Rc::new(FrameLoop::new()),
            listeners: Vec::new(),
        })
    }

    /// Attach input listeners and start the frame loop.
    ///
    /// `on_frame(snapshot_json, events_json)` runs after every frame.
    /// `on_navigate(destination)` receives portal navigations; without it
    /// the host sets `location.href`.
    pub fn start(
        &mut self,
        on_frame: js_sys::Function,
        on_navigate: Option<js_sys::Function>,
    ) -> Result<(), JsValue> {
        if self.frame.active.get() {
            return Ok(());
        }
        self.engine.borrow_mut().resume();
        self.bind_keyboard()?;
        self.bind_touch_pad()?;

        let engine = self.engine.clone();
        let weak: Weak<FrameLoop> = Rc::downgrade(&self.frame);
        let closure = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            let Some(frame) = weak.upgrade() else {
                return;
            };
            frame.handle.set(None);
            if !frame.active.get() {
                return;
            }

            let dt = frame.elapsed(time);
            let (events, snapshot) = {
                let mut engine = engine.borrow_mut();
                let events = engine.advance(dt);
                (events, engine.state().snapshot_json())
            };

            if let Some(destination) = frame_navigation(&events) {
                navigate(on_navigate.as_ref(), destination);
            }

            match (snapshot, serde_json::to_string(&events)) {
                (Ok(state), Ok(events)) => {
                    if let Err(err) = on_frame.call2(
                        &JsValue::NULL,
                        &JsValue::from_str(&state),
                        &JsValue::from_str(&events),
                    ) {
                        log::warn!("Frame callback threw: {:?}", err);
                    }
                }
                (Err(err), _) | (_, Err(err)) => log::warn!("Frame snapshot failed: {}", err),
            }

            // on_frame may have stopped us
            if frame.active.get() {
                if let Err(err) = frame.request() {
                    log::error!("requestAnimationFrame failed: {:?}", err);
                    frame.active.set(false);
                }
            }
        });

        *self.frame.callback.borrow_mut() = Some(closure);
        self.frame.active.set(true);
        self.frame.request()?;
        log::info!("Web host started with {} listeners", self.listeners.len());
        Ok(())
    }

    /// Cancel the pending frame and remove every listener
    pub fn stop(&mut self) {
        self.frame.cancel();
        for listener in self.listeners.drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.kind,
                listener.closure.as_ref().unchecked_ref(),
            );
        }
        if let Ok(mut engine) = self.engine.try_borrow_mut() {
            engine.latch_mut().release_all();
            engine.stop();
        }
    }

    /// Feed a key press from JS (e.g. a custom on-screen control)
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&self, key: &str) {
        self.engine.borrow_mut().latch_mut().key_down(key);
    }

    #[wasm_bindgen(js_name = keyUp)]
    pub fn key_up(&self, key: &str) {
        self.engine.borrow_mut().latch_mut().key_up(key);
    }

    /// Current state as JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        self.engine.borrow().state().snapshot_json().map_err(to_js)
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.frame.active.get()
    }
}

impl WebHost {
    fn listen(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        self.listeners.push(Listener {
            target: target.clone(),
            kind,
            closure,
        });
        Ok(())
    }

    fn bind_keyboard(&mut self) -> Result<(), JsValue> {
        let target: EventTarget = window()?.into();

        let engine = self.engine.clone();
        self.listen(&target, "keydown", move |event: Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let key = event.key();
            if InputLatch::prevents_default(&key) {
                event.prevent_default();
            }
            engine.borrow_mut().latch_mut().key_down(&key);
        })?;

        let engine = self.engine.clone();
        self.listen(&target, "keyup", move |event: Event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                engine.borrow_mut().latch_mut().key_up(&event.key());
            }
        })?;

        // Keys released while unfocused never send keyup
        let engine = self.engine.clone();
        self.listen(&target, "blur", move |_event: Event| {
            engine.borrow_mut().latch_mut().release_all();
        })
    }

    fn bind_touch_pad(&mut self) -> Result<(), JsValue> {
        let Some(document) = window()?.document() else {
            return Ok(());
        };

        for button in TouchButton::ALL {
            let Some(element) = document.get_element_by_id(button.element_id()) else {
                continue;
            };
            let target: EventTarget = element.into();

            for kind in ["touchstart", "mousedown"] {
                let engine = self.engine.clone();
                self.listen(&target, kind, move |event: Event| {
                    event.prevent_default();
                    button.press(engine.borrow_mut().latch_mut());
                })?;
            }
            for kind in ["touchend", "touchcancel", "mouseup", "mouseleave"] {
                let engine = self.engine.clone();
                self.listen(&target, kind, move |_event: Event| {
                    button.release(engine.borrow_mut().latch_mut());
                })?;
            }
        }
        Ok(())
    }
}

impl Drop for WebHost {
    fn drop(&mut self) {
        self.stop();
        self.frame.callback.borrow_mut().take();
    }
}
