// Host-side tests for building the shape layer.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod layer {
    include!("../src/layer.rs");
}

use layer::{build_layer, Detach};
use portfolio_core::{DeviceProbe, ShapeField};
use std::cell::RefCell;
use std::rc::Rc;

/// Records which node ids have been detached.
struct Node {
    id: usize,
    detached: Rc<RefCell<Vec<usize>>>,
}

impl Detach for Node {
    fn detach(&self) {
        self.detached.borrow_mut().push(self.id);
    }
}

fn field() -> ShapeField {
    ShapeField::from_probe(DeviceProbe::default())
}

#[test]
fn failed_decoration_detaches_every_created_node() {
    let field = field();
    assert!(field.len() > 3);
    let detached = Rc::new(RefCell::new(Vec::new()));
    let mut created = 0;
    let result = build_layer(
        &field,
        || {
            created += 1;
            Ok(Node {
                id: created,
                detached: detached.clone(),
            })
        },
        |node, _shape| if node.id == 3 { Err("append failed") } else { Ok(()) },
    );
    assert_eq!(result.err(), Some("append failed"));
    assert_eq!(created, 3);
    assert_eq!(*detached.borrow(), vec![1, 2, 3]);
}

#[test]
fn failed_creation_detaches_earlier_nodes() {
    let field = field();
    let detached = Rc::new(RefCell::new(Vec::new()));
    let mut created = 0;
    let result = build_layer(
        &field,
        || {
            created += 1;
            if created == 4 {
                return Err("no document");
            }
            Ok(Node {
                id: created,
                detached: detached.clone(),
            })
        },
        |_, _| Ok(()),
    );
    assert!(result.is_err());
    assert_eq!(*detached.borrow(), vec![1, 2, 3]);
}

#[test]
fn layer_holds_one_node_per_shape_until_dropped() {
    let field = field();
    let detached = Rc::new(RefCell::new(Vec::new()));
    let mut next = 0;
    let mut seen = Vec::new();
    let layer = build_layer(
        &field,
        || {
            next += 1;
            Ok::<_, ()>(Node {
                id: next,
                detached: detached.clone(),
            })
        },
        |node, shape| {
            seen.push((node.id, shape.id));
            Ok(())
        },
    )
    .expect("no failures");
    assert_eq!(layer.len(), field.len());
    assert_eq!(seen.len(), field.len());
    assert!(detached.borrow().is_empty());

    drop(layer);
    assert_eq!(detached.borrow().len(), field.len());
}
