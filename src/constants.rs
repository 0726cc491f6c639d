//! Shared marker constants such as sizing, shadow, and the contrast cutoff.
//! These are the defaults behind `MarkerStyle`; overrides go through the style, not here.

/// L* above this reads as a light background and gets black text.
pub const DEFAULT_CONTRAST_THRESHOLD: f64 = 72.0;
pub const LIGHTNESS_MIN: f64 = 0.0;
pub const LIGHTNESS_MAX: f64 = 100.0;

pub const MARKER_RADIUS: f64 = 6.0;
pub const MARKER_STROKE_WIDTH: f64 = 1.0;

pub const SHADOW_OFFSET_X: f64 = 2.0;
pub const SHADOW_OFFSET_Y: f64 = 2.0;
pub const SHADOW_BLUR: f64 = 2.0;
pub const SHADOW_OPACITY: f64 = 0.4;

pub const LABEL_FONT_FAMILY: &str = "Roboto";
pub const LABEL_FONT_SIZE: f64 = 13.0;
pub const LABEL_OFFSET_LEFT: f64 = 2.0;
pub const LABEL_OFFSET_TOP: f64 = 1.0;
