use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CONTRAST_THRESHOLD, LIGHTNESS_MAX, LIGHTNESS_MIN};
use crate::error::{InvalidColorError, StyleError};

use super::model::Color;
use super::parse::parse_color;

/// Chooses a legible foreground (black or white) for a background fill.
///
/// The threshold is always within 0..=100; deserialization goes through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolicyRecord")]
pub struct ContrastPolicy {
    /// L* cutoff: backgrounds strictly lighter than this get black.
    threshold: f64,
}

#[derive(Deserialize)]
struct PolicyRecord {
    #[serde(default = "default_threshold")]
    threshold: f64,
}

impl TryFrom<PolicyRecord> for ContrastPolicy {
    type Error = StyleError;

    fn try_from(record: PolicyRecord) -> Result<Self, Self::Error> {
        Self::with_threshold(record.threshold)
    }
}

fn default_threshold() -> f64 {
    DEFAULT_CONTRAST_THRESHOLD
}

impl Default for ContrastPolicy {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

impl ContrastPolicy {
    /// Rejects NaN and anything outside the L* range.
    pub fn with_threshold(threshold: f64) -> Result<Self, StyleError> {
        if !(LIGHTNESS_MIN..=LIGHTNESS_MAX).contains(&threshold) {
            return Err(StyleError::ThresholdOutOfRange(threshold));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_light(&self, background: Color) -> bool {
        background.lightness() > self.threshold
    }

    /// Pure black on light backgrounds, pure white otherwise. Never anything in between.
    pub fn select(&self, background: Color) -> Color {
        if self.is_light(background) {
            Color::BLACK
        } else {
            Color::WHITE
        }
    }

    pub fn select_str(&self, background: &str) -> Result<Color, InvalidColorError> {
        Ok(self.select(parse_color(background)?))
    }
}

/// Parse `background` and pick its contrast color with the default threshold.
pub fn select_contrast_color(background: &str) -> Result<Color, InvalidColorError> {
    ContrastPolicy::default().select_str(background)
}
