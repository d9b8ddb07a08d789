//! Component orientation codes and placement transforms.
//!
//! An orientation code is `R<angle>` (rotate), `M<angle>` or `MR<angle>`
//! (mirror about the vertical axis, then rotate). Anything else is an error,
//! never a silent default.
//!
//! The placement transform composes in a fixed order: translate to the
//! anchor, then mirror (if present), then rotate. Swapping mirror and rotate
//! changes the rendered result for any nonzero angle, so the order is not
//! negotiable.

use crate::geometry::Point;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum OrientationError {
    #[error("unrecognized orientation code '{0}'")]
    UnrecognizedCode(String),
    #[error("invalid rotation angle in orientation code '{0}'")]
    InvalidAngle(String),
}

/// Rotation in whole degrees plus an optional vertical-axis mirror.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub angle: i32,
    pub mirrored: bool,
}

impl Orientation {
    /// Parse an orientation code (`R90`, `M0`, `MR180`, ...).
    pub fn parse(code: &str) -> Result<Orientation, OrientationError> {
        let (mirrored, digits) = if let Some(rest) = code.strip_prefix("MR") {
            (true, rest)
        } else if let Some(rest) = code.strip_prefix('M') {
            (true, rest)
        } else if let Some(rest) = code.strip_prefix('R') {
            (false, rest)
        } else {
            return Err(OrientationError::UnrecognizedCode(code.to_string()));
        };

        let angle = digits
            .parse::<i32>()
            .map_err(|_| OrientationError::InvalidAngle(code.to_string()))?;

        Ok(Orientation { angle, mirrored })
    }
}

/// A component's placement: translate to `(x, y)`, mirror if flagged, rotate.
///
/// `(x, y)` is the anchor in output coordinates (already scaled and flipped).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub orientation: Orientation,
}

impl Placement {
    #[inline]
    pub fn new(x: f64, y: f64, orientation: Orientation) -> Self {
        Self { x, y, orientation }
    }

    /// Render the placement as an SVG `transform` attribute value.
    ///
    /// Operation order in the attribute matches the fixed composition order;
    /// SVG applies the list left to right.
    pub fn to_svg_transform(&self) -> String {
        let mut transform = format!("translate({},{})", self.x, self.y);
        if self.orientation.mirrored {
            transform.push_str(" scale(-1,1)");
        }
        transform.push_str(&format!(" rotate({})", self.orientation.angle));
        transform
    }

    /// Apply the placement to a point in the artwork's local coordinates.
    ///
    /// Matches SVG semantics for the attribute produced by
    /// [`to_svg_transform`](Self::to_svg_transform): the point is rotated,
    /// then mirrored, then translated.
    pub fn apply(&self, p: Point) -> Point {
        let radians = (self.orientation.angle as f64).to_radians();
        let (sin, cos) = radians.sin_cos();

        let rotated = Point::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos);
        let mirrored = if self.orientation.mirrored {
            Point::new(-rotated.x, rotated.y)
        } else {
            rotated
        };
        Point::new(mirrored.x + self.x, mirrored.y + self.y)
    }
}

// ============================================================================
// TESTS
// ============================================================================
