//! Decorative background shape field.
//!
//! A field is a fixed batch of randomized [`ShapeDescriptor`]s produced once
//! when the page mounts. The batch size and the size/blur ranges depend on
//! the [`DeviceClass`] observed at that moment; nothing here is regenerated
//! afterwards, so keyed re-renders keep every shape where it was.

use crate::constants::*;
use rand::prelude::*;
use std::fmt::Write as _;

/// Coarse device classification read once at mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    /// Touch-primary or narrow viewport.
    Compact,
    Standard,
}

/// Raw environment answers used to classify the device.
///
/// Either answer may be missing when the host cannot tell (no window, no
/// `matchMedia`); missing answers count as "fine pointer" and "not narrow".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DeviceProbe {
    pub viewport_width: Option<f64>,
    pub coarse_pointer: Option<bool>,
}

impl DeviceProbe {
    #[inline]
    pub fn is_coarse(&self) -> bool {
        self.coarse_pointer.unwrap_or(false)
    }

    #[inline]
    pub fn is_narrow(&self) -> bool {
        self.viewport_width
            .map(|w| w.is_finite() && w < COMPACT_MAX_WIDTH_PX)
            .unwrap_or(false)
    }
}

impl DeviceClass {
    pub fn classify(probe: DeviceProbe) -> Self {
        if probe.is_coarse() || probe.is_narrow() {
            DeviceClass::Compact
        } else {
            DeviceClass::Standard
        }
    }

    pub fn shape_count(self) -> usize {
        match self {
            DeviceClass::Compact => COMPACT_SHAPE_COUNT,
            DeviceClass::Standard => STANDARD_SHAPE_COUNT,
        }
    }

    pub fn size_max_px(self) -> f32 {
        match self {
            DeviceClass::Compact => COMPACT_SIZE_MAX_PX,
            DeviceClass::Standard => STANDARD_SIZE_MAX_PX,
        }
    }

    pub fn blur_max_px(self) -> f32 {
        match self {
            DeviceClass::Compact => COMPACT_BLUR_MAX_PX,
            DeviceClass::Standard => STANDARD_BLUR_MAX_PX,
        }
    }
}

/// Depth flag; near shapes get the stronger CSS treatment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    Far,
    Near,
}

impl Layer {
    pub fn index(self) -> u8 {
        match self {
            Layer::Far => 0,
            Layer::Near => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CornerStyle {
    Circle,
    /// Elliptical `h% / v%` border radius.
    Organic { horizontal_pct: f32, vertical_pct: f32 },
}

impl CornerStyle {
    pub fn css(&self) -> String {
        match self {
            CornerStyle::Circle => "999px".to_string(),
            CornerStyle::Organic {
                horizontal_pct,
                vertical_pct,
            } => format!("{horizontal_pct}% / {vertical_pct}%"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShapeDescriptor {
    pub id: usize,
    pub top: f32,  // % of viewport height
    pub left: f32, // % of viewport width
    pub size: f32, // px
    pub blur: f32, // px
    pub hue: f32,  // deg
    pub opacity: f32,
    pub rotate: f32, // deg, base tilt
    pub parallax: f32,
    pub float_duration: f32, // sec
    pub float_delay: f32,    // sec
    pub layer: Layer,
    pub corner: CornerStyle,
}

impl ShapeDescriptor {
    pub fn class_name(&self) -> String {
        format!("shape z{}", self.layer.index())
    }

    /// Inline `style` attribute value for this shape.
    pub fn inline_style(&self) -> String {
        let mut s = String::with_capacity(256);
        let _ = write!(
            s,
            "top:{}%;left:{}%;width:{}px;height:{}px;filter:blur({}px);opacity:{};border-radius:{};",
            self.top,
            self.left,
            self.size,
            self.size,
            self.blur,
            self.opacity,
            self.corner.css()
        );
        let _ = write!(
            s,
            "--h:{}deg;--parallax:{};--base-rot:{}deg;--float-dur:{}s;--float-delay:{}s",
            self.hue, self.parallax, self.rotate, self.float_duration, self.float_delay
        );
        s
    }
}

#[inline]
fn uniform<R: Rng + ?Sized>(rng: &mut R, (min, max): (f32, f32)) -> f32 {
    rng.gen_range(min..max)
}

/// Draw a fresh batch of shapes for `class` from `rng`.
pub fn generate<R: Rng + ?Sized>(class: DeviceClass, rng: &mut R) -> Vec<ShapeDescriptor> {
    let size_range = (SIZE_MIN_PX, class.size_max_px());
    let blur_range = (BLUR_MIN_PX, class.blur_max_px());
    (0..class.shape_count())
        .map(|id| {
            let top = uniform(rng, POSITION_PCT_RANGE);
            let left = uniform(rng, POSITION_PCT_RANGE);
            let size = uniform(rng, size_range);
            let blur = uniform(rng, blur_range);
            let hue = uniform(rng, HUE_DEG_RANGE);
            let opacity = uniform(rng, OPACITY_RANGE);
            let rotate = uniform(rng, ROTATE_DEG_RANGE);
            let parallax = uniform(rng, PARALLAX_RANGE);
            let float_duration = uniform(rng, FLOAT_DURATION_SEC_RANGE);
            let float_delay = uniform(rng, FLOAT_DELAY_SEC_RANGE);
            let layer = if rng.gen_bool(NEAR_LAYER_PROBABILITY) {
                Layer::Near
            } else {
                Layer::Far
            };
            let corner = if rng.gen_bool(ORGANIC_CORNER_PROBABILITY) {
                CornerStyle::Organic {
                    horizontal_pct: uniform(rng, ORGANIC_H_PCT_RANGE),
                    vertical_pct: uniform(rng, ORGANIC_V_PCT_RANGE),
                }
            } else {
                CornerStyle::Circle
            };
            ShapeDescriptor {
                id,
                top,
                left,
                size,
                blur,
                hue,
                opacity,
                rotate,
                parallax,
                float_duration,
                float_delay,
                layer,
                corner,
            }
        })
        .collect()
}

/// [`generate`] backed by the thread-local system RNG.
pub fn generate_default(class: DeviceClass) -> Vec<ShapeDescriptor> {
    generate(class, &mut thread_rng())
}

/// The mount-time batch. Owned by whoever owns the page and never mutated.
#[derive(Clone, Debug)]
pub struct ShapeField {
    class: DeviceClass,
    shapes: Vec<ShapeDescriptor>,
}

impl ShapeField {
    pub fn new<R: Rng + ?Sized>(class: DeviceClass, rng: &mut R) -> Self {
        let shapes = generate(class, rng);
        log::debug!("generated {} shapes for {:?}", shapes.len(), class);
        Self { class, shapes }
    }

    pub fn from_probe(probe: DeviceProbe) -> Self {
        Self::new(DeviceClass::classify(probe), &mut thread_rng())
    }

    pub fn class(&self) -> DeviceClass {
        self.class
    }

    pub fn shapes(&self) -> &[ShapeDescriptor] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
