//! Marker data model
//!
//! A marker is a circle and a text label grouped at a canvas point:
//! - MarkerStyle: shared visual settings, loadable from JSON
//! - MarkerBuilder: composes markers with contrast-aware text and stroke
//! - Marker: the immutable result handed to a surface

mod builder;
mod model;
mod style;

pub use builder::{build_marker, MarkerBuilder};
pub use model::{Anchor, Bounds, Circle, Interaction, Label, Marker, Origin, Point, Shadow};
pub use style::MarkerStyle;
