//! Published parallax output.
//!
//! The smoothed `(x, y)` pair lives in an owned, shared cell instead of on a
//! global style root. Presentation code reads it or subscribes to changes;
//! only the driver in [`crate::parallax`] can write.

use glam::Vec2;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Listener = Rc<dyn Fn(Vec2)>;

struct Shared {
    value: Cell<Vec2>,
    publishes: Cell<u64>,
    next_id: Cell<u64>,
    subscribers: RefCell<Vec<(u64, Listener)>>,
}

/// Read side of the driver's output. Cheap to clone; clones share the cell.
#[derive(Clone)]
pub struct ParallaxOutput {
    shared: Rc<Shared>,
}

/// Ticket returned by [`ParallaxOutput::subscribe`]. Dropping it detaches
/// the listener.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    shared: Weak<Shared>,
    id: u64,
}

impl ParallaxOutput {
    pub(crate) fn new() -> Self {
        Self {
            shared: Rc::new(Shared {
                value: Cell::new(Vec2::ZERO),
                publishes: Cell::new(0),
                next_id: Cell::new(0),
                subscribers: RefCell::new(Vec::new()),
            }),
        }
    }

    #[inline]
    pub fn read(&self) -> Vec2 {
        self.shared.value.get()
    }

    /// Number of values published so far.
    #[inline]
    pub fn publish_count(&self) -> u64 {
        self.shared.publishes.get()
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.subscribers.borrow().len()
    }

    pub fn subscribe(&self, listener: impl Fn(Vec2) + 'static) -> Subscription {
        let id = self.shared.next_id.get();
        self.shared.next_id.set(id + 1);
        self.shared
            .subscribers
            .borrow_mut()
            .push((id, Rc::new(listener)));
        Subscription {
            shared: Rc::downgrade(&self.shared),
            id,
        }
    }

    pub(crate) fn publish(&self, value: Vec2) {
        self.shared.value.set(value);
        self.shared.publishes.set(self.shared.publishes.get() + 1);
        // Snapshot so listeners may (un)subscribe while being notified.
        let listeners: Vec<Listener> = self
            .shared
            .subscribers
            .borrow()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener(value);
        }
    }
}

impl Subscription {
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared
                .subscribers
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}
