use crate::frame_table::FrameTable;
use portfolio_core::{FrameCallback, FrameHandle, FrameScheduler};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Shim = Closure<dyn FnMut()>;

/// [`FrameScheduler`] over `requestAnimationFrame`.
///
/// The Rust callback and its JS shim live in the table until the frame fires
/// or is cancelled, so cancelled frames free their closures instead of
/// leaking them. The shim itself only holds the ticket.
pub struct AnimationFrames {
    window: web::Window,
    table: Rc<RefCell<FrameTable<Shim>>>,
}

impl AnimationFrames {
    pub fn new(window: web::Window) -> Self {
        Self {
            window,
            table: Rc::new(RefCell::new(FrameTable::new())),
        }
    }
}

impl FrameScheduler for AnimationFrames {
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameHandle> {
        let ticket = self.table.borrow_mut().next_ticket();
        let table = Rc::downgrade(&self.table);
        let shim: Shim = Closure::once(move || {
            let Some(table) = table.upgrade() else {
                return;
            };
            let callback = table.borrow_mut().fire(ticket);
            if let Some(callback) = callback {
                callback();
            }
        });
        let requested = self
            .window
            .request_animation_frame(shim.as_ref().unchecked_ref::<js_sys::Function>());
        match requested {
            Ok(raf_id) => {
                self.table
                    .borrow_mut()
                    .insert(ticket, raf_id, callback, shim);
                Some(FrameHandle(ticket))
            }
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let raf_id = self.table.borrow_mut().cancel(handle.0);
        if let Some(raf_id) = raf_id {
            let _ = self.window.cancel_animation_frame(raf_id);
        }
    }
}

impl Drop for AnimationFrames {
    fn drop(&mut self) {
        let raf_ids = self.table.borrow_mut().drain();
        for raf_id in raf_ids {
            let _ = self.window.cancel_animation_frame(raf_id);
        }
    }
}
