use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::{Color, ContrastPolicy};
use crate::constants::{
    DEFAULT_CONTRAST_THRESHOLD, LABEL_FONT_FAMILY, LABEL_FONT_SIZE, LABEL_OFFSET_LEFT,
    LABEL_OFFSET_TOP, MARKER_RADIUS, MARKER_STROKE_WIDTH,
    SHADOW_BLUR, SHADOW_OFFSET_X, SHADOW_OFFSET_Y, SHADOW_OPACITY,
};
use crate::error::StyleError;

use super::model::{Point, Shadow};

/// Visual settings shared by every marker a builder produces.
///
/// Any field missing from a style file falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// Circle radius in canvas units
    #[serde(default = "default_radius")]
    pub radius: f64,
    /// Outline width in canvas units
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Label offset (left, top) from the circle's origin
    #[serde(default = "default_text_offset")]
    pub text_offset: Point,
    #[serde(default = "default_shadow")]
    pub shadow: Shadow,
    /// L* cutoff above which labels turn black
    #[serde(default = "default_contrast_threshold")]
    pub contrast_threshold: f64,
}

fn default_radius() -> f64 {
    MARKER_RADIUS
}

fn default_stroke_width() -> f64 {
    MARKER_STROKE_WIDTH
}

fn default_font_family() -> String {
    LABEL_FONT_FAMILY.to_string()
}

fn default_font_size() -> f64 {
    LABEL_FONT_SIZE
}

fn default_text_offset() -> Point {
    Point::new(LABEL_OFFSET_LEFT, LABEL_OFFSET_TOP)
}

fn default_shadow() -> Shadow {
    let alpha = (SHADOW_OPACITY * 255.0).round() as u8;
    Shadow {
        color: Color::BLACK.with_alpha(alpha),
        offset_x: SHADOW_OFFSET_X,
        offset_y: SHADOW_OFFSET_Y,
        blur: SHADOW_BLUR,
    }
}

fn default_contrast_threshold() -> f64 {
    DEFAULT_CONTRAST_THRESHOLD
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            stroke_width: default_stroke_width(),
            font_family: default_font_family(),
            font_size: default_font_size(),
            text_offset: default_text_offset(),
            shadow: default_shadow(),
            contrast_threshold: default_contrast_threshold(),
        }
    }
}

impl MarkerStyle {
    pub fn contrast_policy(&self) -> Result<ContrastPolicy, StyleError> {
        ContrastPolicy::with_threshold(self.contrast_threshold)
    }

    /// Every size must be finite; radius and font size must also be positive.
    pub fn validate(&self) -> Result<(), StyleError> {
        self.contrast_policy()?;
        for (field, value) in [("radius", self.radius), ("font_size", self.font_size)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(StyleError::InvalidDimension { field, value });
            }
        }
        for (field, value) in [
            ("stroke_width", self.stroke_width),
            ("shadow.blur", self.shadow.blur),
            ("shadow.offset_x", self.shadow.offset_x),
            ("shadow.offset_y", self.shadow.offset_y),
            ("text_offset.x", self.text_offset.x),
            ("text_offset.y", self.text_offset.y),
        ] {
            if !value.is_finite() {
                return Err(StyleError::InvalidDimension { field, value });
            }
        }
        for (field, value) in [("stroke_width", self.stroke_width), ("shadow.blur", self.shadow.blur)] {
            if value < 0.0 {
                return Err(StyleError::InvalidDimension { field, value });
            }
        }
        Ok(())
    }

    /// Parse and validate a style from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, StyleError> {
        let style: MarkerStyle = serde_json::from_str(json)?;
        style.validate()?;
        Ok(style)
    }

    /// Load a style file
    pub fn load(path: &Path) -> Result<Self, StyleError> {
        let json = fs::read_to_string(path).map_err(|source| StyleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let style = Self::from_json_str(&json)?;
        log::debug!("loaded marker style from {:?}", path);
        Ok(style)
    }

    pub fn to_json_pretty(&self) -> Result<String, StyleError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
