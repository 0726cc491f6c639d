use crate::color::{parse_color, Color, ContrastPolicy};
use crate::error::{InvalidColorError, StyleError};

use super::model::{Circle, Label, Marker, Point};
use super::style::MarkerStyle;

/// Produces markers sharing one `MarkerStyle`.
///
/// Building never touches a surface; the caller decides where the marker goes.
/// The style is validated once, up front, so every build can trust it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerBuilder {
    style: MarkerStyle,
    policy: ContrastPolicy,
}

impl MarkerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: MarkerStyle) -> Result<Self, StyleError> {
        style.validate()?;
        let policy = style.contrast_policy()?;
        Ok(Self { style, policy })
    }

    pub fn style(&self) -> &MarkerStyle {
        &self.style
    }

    /// Parse `fill` and build a marker centered at (x, y).
    pub fn build(
        &self,
        x: f64,
        y: f64,
        fill: &str,
        label: impl Into<String>,
    ) -> Result<Marker, InvalidColorError> {
        let fill = parse_color(fill)?;
        Ok(self.build_with_color(x, y, fill, label))
    }

    /// Build a marker from an already parsed fill color.
    pub fn build_with_color(&self, x: f64, y: f64, fill: Color, label: impl Into<String>) -> Marker {
        let style = &self.style;
        let contrast = self.policy.select(fill);

        let circle = Circle {
            radius: style.radius,
            fill,
            stroke: contrast,
            stroke_width: style.stroke_width,
            shadow: style.shadow,
        };
        let label = Label {
            content: label.into(),
            font_family: style.font_family.clone(),
            font_size: style.font_size,
            fill: contrast,
            offset: style.text_offset,
        };

        let marker = Marker::new(Point::new(x, y), circle, label, self.policy);
        log::debug!(
            "built marker {} at ({}, {}) fill {} text {}",
            marker.id(),
            x,
            y,
            fill,
            contrast
        );
        marker
    }
}

/// Build a marker with the default style.
pub fn build_marker(
    x: f64,
    y: f64,
    fill: &str,
    label: impl Into<String>,
) -> Result<Marker, InvalidColorError> {
    MarkerBuilder::new().build(x, y, fill, label)
}
