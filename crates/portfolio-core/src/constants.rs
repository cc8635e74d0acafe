// Shared tuning constants for the shape field, parallax driver and page chrome.

// Shape field batch sizes
pub const COMPACT_SHAPE_COUNT: usize = 14;
pub const STANDARD_SHAPE_COUNT: usize = 26;

// Shape field ranges (half-open, [min, max))
pub const POSITION_PCT_RANGE: (f32, f32) = (0.0, 100.0);
pub const SIZE_MIN_PX: f32 = 12.0;
pub const COMPACT_SIZE_MAX_PX: f32 = 40.0;
pub const STANDARD_SIZE_MAX_PX: f32 = 52.0;
pub const BLUR_MIN_PX: f32 = 0.0;
pub const COMPACT_BLUR_MAX_PX: f32 = 6.0;
pub const STANDARD_BLUR_MAX_PX: f32 = 8.0;
pub const HUE_DEG_RANGE: (f32, f32) = (0.0, 360.0);
pub const OPACITY_RANGE: (f32, f32) = (0.35, 0.85);
pub const ROTATE_DEG_RANGE: (f32, f32) = (-30.0, 30.0);
pub const PARALLAX_RANGE: (f32, f32) = (0.02, 0.14);
pub const FLOAT_DURATION_SEC_RANGE: (f32, f32) = (12.0, 26.0);
pub const FLOAT_DELAY_SEC_RANGE: (f32, f32) = (-10.0, 10.0);
pub const ORGANIC_H_PCT_RANGE: (f32, f32) = (10.0, 40.0);
pub const ORGANIC_V_PCT_RANGE: (f32, f32) = (25.0, 80.0);
pub const NEAR_LAYER_PROBABILITY: f64 = 0.4;
pub const ORGANIC_CORNER_PROBABILITY: f64 = 0.5;

// Device classification
pub const COMPACT_MAX_WIDTH_PX: f64 = 480.0; // narrow means strictly below this

// Parallax easing
pub const EASING_FACTOR: f32 = 0.08; // fraction of the remaining distance covered per frame
pub const CONVERGENCE_EPSILON: f32 = 0.001; // L1 distance below which the loop idles

// Synthetic drift (coarse pointer devices)
pub const DRIFT_PHASE_STEP: f64 = 0.005; // phase advance per frame
pub const DRIFT_AMPLITUDE_X: f32 = 0.15;
pub const DRIFT_AMPLITUDE_Y: f32 = 0.12;
pub const DRIFT_Y_PHASE_RATIO: f64 = 0.9;
// Common period of sin(phase) and cos(0.9 * phase): 10 and 9 full turns.
pub const DRIFT_PHASE_PERIOD: f64 = 20.0 * std::f64::consts::PI;

// Page chrome
pub const SCROLL_GLASS_THRESHOLD_PX: f64 = 12.0;
pub const NAV_DESKTOP_MIN_WIDTH_PX: f64 = 860.0; // drawer closes at or above this width

// Preferences
pub const THEME_STORAGE_KEY: &str = "theme";
