//! Point Marker
//!
//! Contrast-aware labeled point markers for interactive canvases.
//!
//! A marker is a small filled circle with a text label, grouped around a
//! canvas point. The label and outline are always pure black or pure white,
//! whichever reads better against the fill (judged by CIE L* lightness).
//!
//! ```
//! use point_marker::build_marker;
//!
//! let marker = build_marker(100.0, 50.0, "#ffffff", "A").unwrap();
//! assert_eq!(marker.text_color().to_hex(), "#000000");
//! ```

pub mod color;
pub mod constants;
pub mod error;
pub mod marker;
pub mod surface;

pub use color::{parse_color, select_contrast_color, Color, ContrastPolicy};
pub use error::{ColorParseReason, InvalidColorError, InvalidMarkerError, StyleError};
pub use marker::{build_marker, Marker, MarkerBuilder, MarkerStyle};
pub use surface::{MarkerLayer, RasterSurface, Surface};
