use crate::constants::SHAPES_CONTAINER_ID;
use crate::dom::js_err;
use crate::layer::{self, Detach, NodeLayer};
use portfolio_core::ShapeField;
use web_sys as web;

impl Detach for web::Element {
    fn detach(&self) {
        self.remove();
    }
}

/// DOM nodes for the mount-time shape field. Removed again on drop, and on
/// a failed render.
pub type ShapeLayer = NodeLayer<web::Element>;

pub fn render(document: &web::Document, field: &ShapeField) -> anyhow::Result<ShapeLayer> {
    let container = document
        .get_element_by_id(SHAPES_CONTAINER_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", SHAPES_CONTAINER_ID))?;
    let layer = layer::build_layer(
        field,
        || document.create_element("div").map_err(js_err),
        |el, shape| {
            el.set_class_name(&shape.class_name());
            el.set_attribute("style", &shape.inline_style())
                .map_err(js_err)?;
            el.set_attribute("data-id", &shape.id.to_string())
                .map_err(js_err)?;
            el.set_attribute("aria-hidden", "true").map_err(js_err)?;
            container.append_child(el).map_err(js_err)?;
            Ok(())
        },
    )?;
    log::info!("rendered {} shapes ({:?})", layer.len(), field.class());
    Ok(layer)
}
