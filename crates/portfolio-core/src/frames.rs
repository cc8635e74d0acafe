//! Frame scheduling seam.
//!
//! The parallax driver never talks to `requestAnimationFrame` directly; it
//! goes through [`FrameScheduler`] so the same driver runs in the browser and
//! under the deterministic [`ManualFrames`] queue.

use std::cell::{Cell, RefCell};

/// Opaque id of a pending frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u32);

pub type FrameCallback = Box<dyn FnOnce()>;

pub trait FrameScheduler {
    /// Queue `callback` for the next display frame.
    ///
    /// Returns `None` when nothing could be scheduled (no display surface);
    /// the callback is dropped in that case.
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameHandle>;

    /// Cancel a pending callback. Unknown or already-fired handles are ignored.
    fn cancel_frame(&self, handle: FrameHandle);
}

/// In-process frame queue advanced explicitly with [`ManualFrames::run_frame`].
#[derive(Default)]
pub struct ManualFrames {
    next_id: Cell<u32>,
    pending: RefCell<Vec<(FrameHandle, FrameCallback)>>,
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    /// Run every callback queued before this call. Callbacks requested while
    /// the frame runs wait for the next one. Returns how many ran.
    pub fn run_frame(&self) -> usize {
        let due = std::mem::take(&mut *self.pending.borrow_mut());
        let n = due.len();
        for (_, callback) in due {
            callback();
        }
        n
    }

    /// Run frames until the queue drains or `max_frames` is reached.
    /// Returns the number of frames that ran at least one callback.
    pub fn run_until_idle(&self, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && !self.is_idle() {
            self.run_frame();
            frames += 1;
        }
        frames
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameHandle> {
        let id = self.next_id.get().wrapping_add(1);
        self.next_id.set(id);
        let handle = FrameHandle(id);
        self.pending.borrow_mut().push((handle, callback));
        Some(handle)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.pending.borrow_mut().retain(|(h, _)| *h != handle);
    }
}
