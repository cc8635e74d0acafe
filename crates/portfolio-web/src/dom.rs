use crate::constants::COARSE_POINTER_QUERY;
use portfolio_core::DeviceProbe;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let window = web::window()?;
    let document = window.document()?;
    Some((window, document))
}

#[inline]
pub fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

/// An event listener that unregisters itself when dropped.
pub struct EventListener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl EventListener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(js_err)?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// `matchMedia(query).matches`, or `None` when the query cannot be evaluated.
pub fn match_media(window: &web::Window, query: &str) -> Option<bool> {
    window
        .match_media(query)
        .ok()
        .flatten()
        .map(|list| list.matches())
}

#[inline]
pub fn viewport_size(window: &web::Window) -> Option<(f64, f64)> {
    let w = window.inner_width().ok()?.as_f64()?;
    let h = window.inner_height().ok()?.as_f64()?;
    Some((w, h))
}

pub fn probe_device(window: &web::Window) -> DeviceProbe {
    DeviceProbe {
        viewport_width: window.inner_width().ok().and_then(|v| v.as_f64()),
        coarse_pointer: match_media(window, COARSE_POINTER_QUERY),
    }
}

#[inline]
pub fn set_class(el: &web::Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

#[inline]
pub fn set_css_var(style: &web::CssStyleDeclaration, name: &str, value: f32) {
    let _ = style.set_property(name, &value.to_string());
}
