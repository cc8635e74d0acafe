// Bookkeeping for pending animation frames, kept free of JS types so it can
// be tested on the host. `S` is the browser-side shim (a wasm-bindgen
// closure in production); the table owns it until the frame is cancelled,
// drained, or has fired and been superseded.

use fnv::FnvHashMap;
use portfolio_core::FrameCallback;

struct Entry<S> {
    raf_id: i32,
    callback: FrameCallback,
    shim: S,
}

pub struct FrameTable<S> {
    next_ticket: u32,
    pending: FnvHashMap<u32, Entry<S>>,
    // Shims of frames that already fired. A shim cannot free itself while it
    // is still on the call stack, so it is released on the next `fire`.
    spent: Vec<S>,
}

impl<S> Default for FrameTable<S> {
    fn default() -> Self {
        Self {
            next_ticket: 0,
            pending: FnvHashMap::default(),
            spent: Vec::new(),
        }
    }
}

impl<S> FrameTable<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_ticket(&mut self) -> u32 {
        self.next_ticket = self.next_ticket.wrapping_add(1);
        self.next_ticket
    }

    pub fn insert(&mut self, ticket: u32, raf_id: i32, callback: FrameCallback, shim: S) {
        self.pending.insert(
            ticket,
            Entry {
                raf_id,
                callback,
                shim,
            },
        );
    }

    /// Take the callback of a frame that just fired.
    pub fn fire(&mut self, ticket: u32) -> Option<FrameCallback> {
        self.spent.clear();
        let entry = self.pending.remove(&ticket)?;
        self.spent.push(entry.shim);
        Some(entry.callback)
    }

    /// Forget a pending frame, dropping its callback and shim. Returns the
    /// browser id to pass to `cancelAnimationFrame`.
    pub fn cancel(&mut self, ticket: u32) -> Option<i32> {
        self.pending.remove(&ticket).map(|entry| entry.raf_id)
    }

    /// Forget everything; returns the browser ids still pending.
    pub fn drain(&mut self) -> Vec<i32> {
        self.spent.clear();
        self.pending.drain().map(|(_, entry)| entry.raf_id).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Shims still owned by the table, pending or spent.
    pub fn live_shims(&self) -> usize {
        self.pending.len() + self.spent.len()
    }
}
