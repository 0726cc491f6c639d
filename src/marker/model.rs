use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::color::{Color, ContrastPolicy};
use crate::error::InvalidMarkerError;

/// A canvas position or offset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, point: Point) -> bool {
        (self.min_x..=self.max_x).contains(&point.x) && (self.min_y..=self.max_y).contains(&point.y)
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Which point of a shape its position refers to, per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    pub x: Anchor,
    pub y: Anchor,
}

impl Origin {
    pub const CENTER: Origin = Origin {
        x: Anchor::Center,
        y: Anchor::Center,
    };
}

/// Drop shadow cast by the marker circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub color: Color,
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
}

impl Shadow {
    /// CSS shorthand, e.g. `2px 2px 2px rgba(0, 0, 0, 0.4)`.
    pub fn to_css(&self) -> String {
        format!(
            "{}px {}px {}px {}",
            self.offset_x,
            self.offset_y,
            self.blur,
            self.color.to_css_rgba()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub radius: f64,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f64,
    pub shadow: Shadow,
}

/// Text drawn next to the circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub content: String,
    pub font_family: String,
    pub font_size: f64,
    pub fill: Color,
    /// Top-left of the text relative to the top-left of the circle's bounding square.
    pub offset: Point,
}

/// What a user may do with a placed marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub lock_rotation: bool,
    pub lock_scaling_x: bool,
    pub lock_scaling_y: bool,
    pub has_controls: bool,
    pub has_borders: bool,
}

impl Interaction {
    /// No rotation, no scaling, no handles or selection border.
    pub const LOCKED: Interaction = Interaction {
        lock_rotation: true,
        lock_scaling_x: true,
        lock_scaling_y: true,
        has_controls: false,
        has_borders: false,
    };

    pub fn is_locked(&self) -> bool {
        *self == Self::LOCKED
    }
}

/// A labeled point: circle and text grouped around a center anchor.
///
/// Markers are immutable once built; each build yields a fresh `id`. A clone is the
/// same marker, id included, so surfaces treat it as a replacement rather than a
/// second marker. Deserializing keeps the stored id but re-checks that the stroke
/// and text are the contrast color of the fill under the stored policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MarkerRecord")]
pub struct Marker {
    id: Uuid,
    position: Point,
    origin: Origin,
    circle: Circle,
    label: Label,
    interaction: Interaction,
    contrast: ContrastPolicy,
}

#[derive(Deserialize)]
struct MarkerRecord {
    id: Uuid,
    position: Point,
    origin: Origin,
    circle: Circle,
    label: Label,
    interaction: Interaction,
    #[serde(default)]
    contrast: ContrastPolicy,
}

impl TryFrom<MarkerRecord> for Marker {
    type Error = InvalidMarkerError;

    fn try_from(record: MarkerRecord) -> Result<Self, Self::Error> {
        let fill = record.circle.fill;
        let expected = record.contrast.select(fill);
        if record.circle.stroke != expected || record.label.fill != expected {
            return Err(InvalidMarkerError::ContrastMismatch {
                fill,
                stroke: record.circle.stroke,
                text: record.label.fill,
                expected,
            });
        }
        if record.origin != Origin::CENTER {
            return Err(InvalidMarkerError::NotCentered);
        }
        if !record.interaction.is_locked() {
            return Err(InvalidMarkerError::Unlocked);
        }

        Ok(Self {
            id: record.id,
            position: record.position,
            origin: record.origin,
            circle: record.circle,
            label: record.label,
            interaction: record.interaction,
            contrast: record.contrast,
        })
    }
}

impl Marker {
    pub(crate) fn new(position: Point, circle: Circle, label: Label, contrast: ContrastPolicy) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            origin: Origin::CENTER,
            circle,
            label,
            interaction: Interaction::LOCKED,
            contrast,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Center of the marker in canvas coordinates.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn circle(&self) -> &Circle {
        &self.circle
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// Policy that chose the stroke and text color.
    pub fn contrast_policy(&self) -> ContrastPolicy {
        self.contrast
    }

    pub fn fill(&self) -> Color {
        self.circle.fill
    }

    pub fn stroke(&self) -> Color {
        self.circle.stroke
    }

    pub fn text_color(&self) -> Color {
        self.label.fill
    }

    /// Top-left corner of the circle's bounding square.
    pub fn circle_origin(&self) -> Point {
        Point::new(
            self.position.x - self.circle.radius,
            self.position.y - self.circle.radius,
        )
    }

    /// Top-left corner of the label text.
    pub fn label_origin(&self) -> Point {
        let origin = self.circle_origin();
        Point::new(origin.x + self.label.offset.x, origin.y + self.label.offset.y)
    }

    /// Area painted by the circle, its stroke, and its shadow.
    pub fn bounds(&self) -> Bounds {
        let Circle {
            radius,
            stroke_width,
            shadow,
            ..
        } = self.circle;
        let reach = radius + stroke_width / 2.0;
        let body = Bounds {
            min_x: self.position.x - reach,
            min_y: self.position.y - reach,
            max_x: self.position.x + reach,
            max_y: self.position.y + reach,
        };

        let shadow_reach = radius + shadow.blur;
        let cast = Bounds {
            min_x: self.position.x + shadow.offset_x - shadow_reach,
            min_y: self.position.y + shadow.offset_y - shadow_reach,
            max_x: self.position.x + shadow.offset_x + shadow_reach,
            max_y: self.position.y + shadow.offset_y + shadow_reach,
        };

        body.union(&cast)
    }
}
