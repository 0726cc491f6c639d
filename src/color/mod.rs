//! Color values, parsing, and contrast selection.

mod contrast;
mod model;
mod named;
mod parse;

pub use contrast::{select_contrast_color, ContrastPolicy};
pub use model::Color;
pub use parse::parse_color;
