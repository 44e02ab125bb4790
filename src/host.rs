// Glue between page events and the shared cells the field reads each tick.
// Everything registered here is undone when the bindings are dropped.

use crate::config::THEME_ATTRIBUTE;
use crate::palette::{Palette, Theme};
use crate::pointer::PointerTracker;
use crate::viewport::Viewport;
use gloo::events::EventListener;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Event, HtmlCanvasElement, MouseEvent, MutationObserver, MutationObserverInit,
    MutationRecord, Window,
};

pub struct HostBindings {
    _listeners: Vec<EventListener>,
    observer: MutationObserver,
    _on_mutation: Closure<dyn FnMut(js_sys::Array, MutationObserver)>,
}

/// Reads the theme attribute off <html>.
pub fn current_theme(document: &Document) -> Theme {
    let value = document
        .document_element()
        .and_then(|root| root.get_attribute(THEME_ATTRIBUTE));
    Theme::from_attribute(value.as_deref())
}

/// Size the canvas to the window and report the new size to the viewport.
pub fn fit_to_window(window: &Window, canvas: &HtmlCanvasElement, viewport: &Viewport) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    viewport.resize(width, height);
    canvas.set_width(viewport.width());
    canvas.set_height(viewport.height());
}

impl HostBindings {
    pub fn attach(
        window: &Window,
        document: &Document,
        canvas: HtmlCanvasElement,
        viewport: Rc<Viewport>,
        palette: Rc<Palette>,
        pointer: Rc<PointerTracker>,
    ) -> Result<HostBindings, JsValue> {
        let mut listeners = Vec::new();

        let resize_window = window.clone();
        listeners.push(EventListener::new(window, "resize", move |_event: &Event| {
            fit_to_window(&resize_window, &canvas, &viewport);
        }));

        let move_pointer = Rc::clone(&pointer);
        listeners.push(EventListener::new(window, "mousemove", move |event: &Event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                move_pointer.move_to(event.client_x() as f64, event.client_y() as f64);
            }
        }));

        listeners.push(EventListener::new(window, "mouseleave", move |_event: &Event| {
            pointer.leave();
        }));

        let theme_document = document.clone();
        let on_mutation = Closure::wrap(Box::new(
            move |records: js_sys::Array, _: MutationObserver| {
                let touched_theme = records.iter().any(|record| {
                    record
                        .dyn_ref::<MutationRecord>()
                        .and_then(|record| record.attribute_name())
                        .map_or(false, |name| name == THEME_ATTRIBUTE)
                });
                if touched_theme {
                    palette.set_theme(current_theme(&theme_document));
                }
            },
        ) as Box<dyn FnMut(js_sys::Array, MutationObserver)>);

        let observer = MutationObserver::new(on_mutation.as_ref().unchecked_ref())?;
        if let Some(root) = document.document_element() {
            let filter = js_sys::Array::of1(&JsValue::from_str(THEME_ATTRIBUTE));
            let mut options = MutationObserverInit::new();
            options.attributes(true).attribute_filter(&filter);
            observer.observe_with_options(&root, &options)?;
        }

        Ok(HostBindings {
            _listeners: listeners,
            observer,
            _on_mutation: on_mutation,
        })
    }
}

// Listeners detach themselves when dropped, the observer needs telling
impl Drop for HostBindings {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
