#![cfg(target_arch = "wasm32")]
use portfolio_core::ShapeField;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

mod background;
mod chrome;
mod constants;
mod dom;
mod frame_table;
mod frames;
mod layer;
mod parallax;

thread_local! {
    static PAGE: RefCell<Option<Page>> = RefCell::new(None);
}

/// Everything owned by one mounted page. Dropping it unwires the page.
struct Page {
    parallax: parallax::ParallaxBinding,
    _chrome: chrome::Chrome,
    _shapes: Option<background::ShapeLayer>,
    // Mount-time batch; kept so the rendered nodes always match it.
    _field: ShapeField,
}

impl Page {
    /// `Ok(None)` when there is no window or document to draw on.
    fn build() -> anyhow::Result<Option<Self>> {
        let Some((window, document)) = dom::window_document() else {
            return Ok(None);
        };
        let probe = dom::probe_device(&window);
        log::debug!("device probe: {:?}", probe);

        let field = ShapeField::from_probe(probe);
        let shapes = match background::render(&document, &field) {
            Ok(layer) => Some(layer),
            Err(e) => {
                log::warn!("shape field not rendered: {:?}", e);
                None
            }
        };
        let parallax = parallax::ParallaxBinding::mount(&window, &document, probe)?;
        let chrome = chrome::Chrome::mount(&window, &document)?;
        Ok(Some(Self {
            parallax,
            _chrome: chrome,
            _shapes: shapes,
            _field: field,
        }))
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("portfolio-web starting");
    mount();
    Ok(())
}

/// Mount the page. A second call while mounted does nothing.
#[wasm_bindgen]
pub fn mount() {
    let already = PAGE.with(|slot| slot.borrow().is_some());
    if already {
        log::warn!("page already mounted");
        return;
    }
    match Page::build() {
        Ok(Some(page)) => PAGE.with(|slot| *slot.borrow_mut() = Some(page)),
        Ok(None) => log::info!("no display surface; nothing mounted"),
        Err(e) => log::error!("mount error: {:?}", e),
    }
}

/// Tear the page down. Idempotent.
#[wasm_bindgen]
pub fn unmount() {
    let page = PAGE.with(|slot| slot.borrow_mut().take());
    if let Some(page) = page {
        page.parallax.dispose();
        drop(page);
        log::info!("page unmounted");
    }
}
