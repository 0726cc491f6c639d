use std::path::PathBuf;

use thiserror::Error;

use crate::color::Color;

/// Why a color string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ColorParseReason {
    #[error("empty color string")]
    Empty,
    #[error("invalid hex length")]
    InvalidLength,
    #[error("invalid hex digits")]
    InvalidHex,
    #[error("invalid rgb()/rgba() function")]
    InvalidFunction,
    #[error("component out of range")]
    OutOfRange,
    #[error("unknown color name")]
    UnknownName,
}

/// A supplied value could not be interpreted as a color.
///
/// Markers are never built from a substituted default; callers get this back instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {input:?}: {reason}")]
pub struct InvalidColorError {
    pub input: String,
    #[source]
    pub reason: ColorParseReason,
}

impl InvalidColorError {
    pub fn new(input: impl Into<String>, reason: ColorParseReason) -> Self {
        Self {
            input: input.into(),
            reason,
        }
    }
}

/// Errors raised while loading or validating a `MarkerStyle`.
#[derive(Debug, Error)]
pub enum StyleError {
    #[error("failed to read marker style {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse marker style: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("contrast threshold {0} is outside 0..=100")]
    ThresholdOutOfRange(f64),
    #[error("{field} is out of range: {value}")]
    InvalidDimension { field: &'static str, value: f64 },
}

/// A serialized marker that no builder could have produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidMarkerError {
    #[error("stroke {stroke} and text {text} must both be {expected} on fill {fill}")]
    ContrastMismatch {
        fill: Color,
        stroke: Color,
        text: Color,
        expected: Color,
    },
    #[error("marker origin must be centered")]
    NotCentered,
    #[error("marker interaction must be locked")]
    Unlocked,
}
