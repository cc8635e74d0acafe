// Node layer for the shape field, generic over the node type so the
// build-and-clean-up rules run on the host too.

use portfolio_core::{ShapeDescriptor, ShapeField};

/// Something that can take itself out of the document.
pub trait Detach {
    fn detach(&self);
}

/// Nodes created for one shape field. Every node is detached on drop.
pub struct NodeLayer<N: Detach> {
    nodes: Vec<N>,
}

impl<N: Detach> NodeLayer<N> {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<N: Detach> Drop for NodeLayer<N> {
    fn drop(&mut self) {
        for node in self.nodes.drain(..) {
            node.detach();
        }
    }
}

/// Create and decorate one node per shape.
///
/// Each node joins the layer before anything else can fail, so an error part
/// way through drops the partial layer and detaches whatever was already
/// attached.
pub fn build_layer<N, E>(
    field: &ShapeField,
    mut create: impl FnMut() -> Result<N, E>,
    mut decorate: impl FnMut(&N, &ShapeDescriptor) -> Result<(), E>,
) -> Result<NodeLayer<N>, E>
where
    N: Detach,
{
    let mut layer = NodeLayer {
        nodes: Vec::with_capacity(field.len()),
    };
    for shape in field.shapes() {
        layer.nodes.push(create()?);
        if let Some(node) = layer.nodes.last() {
            decorate(node, shape)?;
        }
    }
    Ok(layer)
}
