//! Browser glue
//!
//! Wires a `Session` to a canvas: requestAnimationFrame scheduling, the
//! Space key / click activate input and fire-and-forget image loading.
//! Every browser registration is owned by `RosterRunner` and released when
//! it is dropped.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, HtmlImageElement,
    KeyboardEvent,
};

use crate::assets::{AssetReadiness, AssetRole};
use crate::consts::{GAME_HEIGHT, GAME_WIDTH};
use crate::renderer::{CanvasSurface, render};
use crate::session::{Activation, LoopControl, Session};
use crate::sim::TickInput;
use crate::tuning::{Tuning, TuningError};

/// Install the console logger and panic hook (idempotent)
pub fn init_logging() {
    console_error_panic_hook::set_once();
    // Errors only when a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Everything a frame or an input handler touches
struct App {
    session: Session,
    surface: CanvasSurface,
    assets: AssetReadiness,
}

impl App {
    fn frame(&mut self) -> LoopControl {
        let input = TickInput {
            now_ms: super::now_ms(),
            autopilot: false,
        };
        self.session.frame(&input, &self.assets, &mut self.surface)
    }

    /// Draw without advancing the simulation
    fn redraw(&mut self) {
        render(self.session.state(), &self.assets, &mut self.surface);
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// requestAnimationFrame loop; at most one frame is pending at a time
struct FrameLoop {
    callback: FrameCallback,
    pending: Rc<Cell<Option<i32>>>,
}

fn request_frame(callback: &Closure<dyn FnMut(f64)>) -> Option<i32> {
    let window = web_sys::window()?;
    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            log::error!("requestAnimationFrame failed: {:?}", e);
            None
        }
    }
}

impl FrameLoop {
    fn new(app: Rc<RefCell<App>>) -> Self {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        let this: Weak<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::downgrade(&callback);
        let slot = pending.clone();
        let closure = Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
            slot.set(None);
            let control = app.borrow_mut().frame();
            if control == LoopControl::Stop {
                return;
            }
            if let Some(callback) = this.upgrade() {
                if let Some(closure) = callback.borrow().as_ref() {
                    slot.set(request_frame(closure));
                }
            }
        });
        *callback.borrow_mut() = Some(closure);

        Self { callback, pending }
    }

    fn is_active(&self) -> bool {
        self.pending.get().is_some()
    }

    fn start(&self) {
        if self.is_active() {
            return;
        }
        if let Some(closure) = self.callback.borrow().as_ref() {
            self.pending.set(request_frame(closure));
        }
    }

    fn stop(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.cancel_animation_frame(id) {
                    log::warn!("cancelAnimationFrame failed: {:?}", e);
                }
            }
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
        self.callback.borrow_mut().take();
    }
}

/// An event listener removed again on drop
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn new(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref())
        {
            log::warn!("removeEventListener({}) failed: {:?}", self.kind, e);
        }
    }
}

fn tuning_error(e: TuningError) -> JsValue {
    log::error!("{}", e);
    JsValue::from_str(&e.to_string())
}

/// Route the activate input and start the loop when a run begins
fn dispatch_activate(app: &Rc<RefCell<App>>, frame_loop: &FrameLoop) {
    let activation = app.borrow_mut().session.activate();
    if activation == Activation::Started {
        frame_loop.start();
    }
}

/// Watch one image's load / error events and flip its ready flag
fn watch_image(
    image: &HtmlImageElement,
    role: AssetRole,
    app: &Rc<RefCell<App>>,
    listeners: &mut Vec<Listener>,
) -> Result<(), JsValue> {
    let on_load = {
        let app = app.clone();
        move |_event: Event| {
            log::info!("{:?} image loaded", role);
            let mut state = app.borrow_mut();
            state.assets.set_ready(role, true);
            // A running loop picks the image up on its next frame
            if !state.session.is_running() {
                state.redraw();
            }
        }
    };
    let on_error = {
        let app = app.clone();
        move |_event: Event| {
            log::error!("Failed to load {:?} image from {}", role, role.url());
            app.borrow_mut().assets.set_ready(role, false);
        }
    };

    listeners.push(Listener::new(image, "load", on_load)?);
    listeners.push(Listener::new(image, "error", on_error)?);
    image.set_src(role.url());
    Ok(())
}

/// A mounted game, exported to JavaScript
#[wasm_bindgen]
pub struct RosterRunner {
    // Dropped first so no input can restart the loop during teardown
    listeners: Vec<Listener>,
    frame_loop: Rc<FrameLoop>,
    app: Rc<RefCell<App>>,
}

#[wasm_bindgen]
impl RosterRunner {
    /// Mount on the canvas with the given id, optionally with a JSON tuning
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, tuning_json: Option<String>) -> Result<RosterRunner, JsValue> {
        init_logging();

        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).map_err(tuning_error)?,
            None => Tuning::default(),
        };

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element #{}", canvas_id)))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("element is not a canvas"))?;
        canvas.set_width(GAME_WIDTH as u32);
        canvas.set_height(GAME_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("unexpected context type"))?;

        let player = HtmlImageElement::new()?;
        let resignation = HtmlImageElement::new()?;
        let sick_leave = HtmlImageElement::new()?;

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(seed, tuning).map_err(tuning_error)?;
        let app = Rc::new(RefCell::new(App {
            session,
            surface: CanvasSurface::new(
                ctx,
                player.clone(),
                resignation.clone(),
                sick_leave.clone(),
            ),
            assets: AssetReadiness::default(),
        }));
        let frame_loop = Rc::new(FrameLoop::new(app.clone()));

        let mut listeners = Vec::new();
        for (image, role) in [
            (&player, AssetRole::Player),
            (&resignation, AssetRole::Resignation),
            (&sick_leave, AssetRole::SickLeave),
        ] {
            watch_image(image, role, &app, &mut listeners)?;
        }

        let on_key = {
            let app = app.clone();
            let frame_loop = frame_loop.clone();
            move |event: Event| {
                let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if key.code() == "Space" {
                    key.prevent_default();
                    dispatch_activate(&app, &frame_loop);
                }
            }
        };
        listeners.push(Listener::new(&window, "keydown", on_key)?);

        let on_click = {
            let app = app.clone();
            let frame_loop = frame_loop.clone();
            move |_event: Event| dispatch_activate(&app, &frame_loop)
        };
        listeners.push(Listener::new(&canvas, "click", on_click)?);

        app.borrow_mut().redraw();
        log::info!("Roster Runner mounted on #{} (seed {})", canvas_id, seed);

        Ok(RosterRunner {
            listeners,
            frame_loop,
            app,
        })
    }

    /// Best displayed score this page session
    #[wasm_bindgen(getter, js_name = highScore)]
    pub fn high_score(&self) -> f64 {
        self.app.borrow().session.high_score() as f64
    }

    /// Tear down explicitly (same as letting JS free the handle)
    pub fn destroy(self) {}
}

impl Drop for RosterRunner {
    fn drop(&mut self) {
        self.listeners.clear();
        self.frame_loop.stop();
        log::info!("Roster Runner unmounted");
    }
}

thread_local! {
    static MOUNTED: RefCell<Option<RosterRunner>> = const { RefCell::new(None) };
}

/// Mount for the page lifetime (used by the binary entry point)
pub fn mount(canvas_id: &str) -> Result<(), JsValue> {
    let runner = RosterRunner::new(canvas_id, None)?;
    MOUNTED.with(|mounted| *mounted.borrow_mut() = Some(runner));
    Ok(())
}

/// Release the game mounted by `mount`
#[wasm_bindgen]
pub fn unmount() {
    let runner = MOUNTED.with(|mounted| mounted.borrow_mut().take());
    drop(runner);
}
