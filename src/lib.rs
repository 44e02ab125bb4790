mod utils;

pub mod canvas;
pub mod color;
pub mod config;
pub mod field;
pub mod host;
pub mod logger;
pub mod palette;
pub mod particle;
pub mod pointer;
pub mod scheduler;
pub mod surface;
pub mod viewport;

use canvas::CanvasSurface;
use config::FieldConfig;
use field::ConstellationField;
use host::HostBindings;
use palette::Palette;
use pointer::PointerTracker;
use scheduler::{AnimationFrameClock, FrameScheduler};
use std::rc::Rc;
use surface::Surface;
use viewport::Viewport;
use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    logger::init(log::LevelFilter::Info);
}

// Wraps a block in console.time/timeEnd when built with `frame-timing`
pub struct Timer<'a> {
    #[allow(dead_code)]
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        #[cfg(all(target_arch = "wasm32", feature = "frame-timing"))]
        web_sys::console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        #[cfg(all(target_arch = "wasm32", feature = "frame-timing"))]
        web_sys::console::time_end_with_label(self.name);
    }
}

/// A running background. Stopping it, or dropping it, ends the animation
/// loop; dropping also detaches the page listeners.
#[wasm_bindgen]
pub struct Constellation {
    scheduler: FrameScheduler<AnimationFrameClock>,
    _bindings: HostBindings,
}

#[wasm_bindgen]
impl Constellation {
    pub fn stop(&self) {
        self.scheduler.stop();
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn frames(&self) -> f64 {
        self.scheduler.frames() as f64
    }
}

#[wasm_bindgen]
pub fn start_constellation(canvas_id: &str) -> Option<Constellation> {
    start_constellation_with_config(canvas_id, FieldConfig::default())
}

/// Starts the background on the canvas with id `canvas_id`. Returns
/// `undefined` without scheduling anything if there is no usable canvas.
#[wasm_bindgen]
pub fn start_constellation_with_config(
    canvas_id: &str,
    config: FieldConfig,
) -> Option<Constellation> {
    let window = web_sys::window()?;
    let document = window.document()?;
    let surface = match CanvasSurface::acquire(&document, canvas_id) {
        Some(surface) => surface,
        None => {
            log::debug!("no 2d canvas with id {:?}, constellation disabled", canvas_id);
            return None;
        }
    };

    let viewport = Rc::new(Viewport::default());
    let palette = Rc::new(Palette::new(host::current_theme(&document)));
    let pointer = Rc::new(PointerTracker::new());

    host::fit_to_window(&window, surface.canvas(), &viewport);
    let (width, height) = surface.dimensions();
    log::debug!("constellation canvas sized to {}x{}", width, height);

    let bindings = match HostBindings::attach(
        &window,
        &document,
        surface.canvas().clone(),
        Rc::clone(&viewport),
        Rc::clone(&palette),
        Rc::clone(&pointer),
    ) {
        Ok(bindings) => bindings,
        Err(err) => {
            log::warn!("could not attach constellation listeners: {:?}", err);
            return None;
        }
    };

    let field = ConstellationField::initialize(
        config,
        viewport,
        palette,
        pointer,
        &mut rand::thread_rng(),
    );
    let scheduler = FrameScheduler::new(Rc::new(AnimationFrameClock::new()));
    scheduler.start(field, surface);

    Some(Constellation {
        scheduler,
        _bindings: bindings,
    })
}
