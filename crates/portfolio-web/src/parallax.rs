use crate::constants::{CSS_VAR_MX, CSS_VAR_MY};
use crate::dom::{self, EventListener};
use crate::frames::AnimationFrames;
use glam::Vec2;
use portfolio_core::{
    DeviceProbe, DriverMode, ParallaxDriver, ParallaxHandle, PointerSample, Subscription,
};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Running driver plus its DOM wiring: `mousemove` in, `--mx`/`--my` out.
pub struct ParallaxBinding {
    handle: ParallaxHandle,
    _css: Subscription,
}

impl ParallaxBinding {
    pub fn mount(
        window: &web::Window,
        document: &web::Document,
        probe: DeviceProbe,
    ) -> anyhow::Result<Self> {
        let root = document
            .document_element()
            .ok_or_else(|| anyhow::anyhow!("no document element"))?
            .dyn_into::<web::HtmlElement>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        let scheduler = Rc::new(AnimationFrames::new(window.clone()));
        let handle = ParallaxDriver::start(DriverMode::for_probe(probe), scheduler);

        let style = root.style();
        let css = handle.output().subscribe(move |offset: Vec2| {
            dom::set_css_var(&style, CSS_VAR_MX, offset.x);
            dom::set_css_var(&style, CSS_VAR_MY, offset.y);
        });

        let input = handle.pointer_input();
        let win = window.clone();
        let listener = EventListener::new(window, "mousemove", move |ev: web::Event| {
            let Some(mouse) = ev.dyn_ref::<web::MouseEvent>() else {
                return;
            };
            let Some((w, h)) = dom::viewport_size(&win) else {
                return;
            };
            input.send(PointerSample {
                client_x: mouse.client_x() as f32,
                client_y: mouse.client_y() as f32,
                viewport_width: w as f32,
                viewport_height: h as f32,
            });
        })?;
        handle.on_teardown(move || drop(listener));

        log::info!("parallax mounted ({:?})", handle.mode());
        Ok(Self { handle, _css: css })
    }

    pub fn dispose(&self) {
        self.handle.dispose();
    }
}
