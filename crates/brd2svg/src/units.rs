//! Unit conversion and coordinate-system mapping.
//!
//! The board file uses a Y-up coordinate system; SVG is Y-down. The flip is
//! `y -> H - y` for a fixed reference height H (normally the board's maximum
//! Y extent in output units), which makes it an involution: applying it twice
//! with the same H restores the original value.
//!
//! Unit conversion is a uniform scale factor. The original tool's iterations
//! disagree on whether board millimeters should be converted to mils, so the
//! factor is an explicit parameter (default [`IDENTITY_SCALE`]) rather than a
//! baked-in constant; [`MM_TO_MIL`] is provided for callers that want the
//! conversion.

use crate::geometry::Point;

/// Millimeters to thousandths-of-an-inch.
pub const MM_TO_MIL: f64 = 39.3701;

/// Default scale factor: source units pass through unchanged.
pub const IDENTITY_SCALE: f64 = 1.0;

/// Output units per inch, used to derive the `width`/`height` attributes.
pub const OUTPUT_UNITS_PER_INCH: f64 = 1000.0;

/// Fallback canvas width in output units when the board has no outline.
pub const DEFAULT_CANVAS_WIDTH: f64 = 2000.0;

/// Fallback canvas height in output units when the board has no outline.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 2000.0;

/// Scale a point uniformly from source units into output units.
#[inline]
pub fn scale_point(p: Point, factor: f64) -> Point {
    Point::new(p.x * factor, p.y * factor)
}

/// Flip a point's Y coordinate about the reference height `h`.
#[inline]
pub fn flip_y(p: Point, h: f64) -> Point {
    Point::new(p.x, h - p.y)
}

/// The combined source-to-output mapping: scale, then vertical flip.
///
/// Holding both parameters in one value keeps the mapping consistent across
/// the outline and every component anchor — applying the flip to one and not
/// the other breaks relative placement.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMap {
    /// Source-unit to output-unit scale factor.
    pub scale: f64,
    /// Flip reference height, in output units.
    pub flip_height: f64,
}

impl CoordinateMap {
    /// Map a source-unit point into output coordinates.
    #[inline]
    pub fn to_output(&self, p: Point) -> Point {
        flip_y(scale_point(p, self.scale), self.flip_height)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_is_uniform() {
        let p = scale_point(Point::new(2.0, 3.0), MM_TO_MIL);
        assert!((p.x - 78.7402).abs() < 1e-9);
        assert!((p.y - 118.1103).abs() < 1e-9);
    }

    #[test]
    fn identity_scale_is_noop() {
        let p = Point::new(12.5, -4.0);
        assert_eq!(scale_point(p, IDENTITY_SCALE), p);
    }

    #[test]
    fn flip_is_an_involution() {
        let p = Point::new(100.0, 30.0);
        let h = 500.0;
        assert_eq!(flip_y(flip_y(p, h), h), p);
    }

    #[test]
    fn flip_maps_extremes() {
        let h = 500.0;
        assert_eq!(flip_y(Point::new(0.0, 0.0), h).y, 500.0);
        assert_eq!(flip_y(Point::new(0.0, 500.0), h).y, 0.0);
    }

    #[test]
    fn coordinate_map_scales_then_flips() {
        let map = CoordinateMap { scale: 2.0, flip_height: 100.0 };
        // (10, 20) -> scaled (20, 40) -> flipped (20, 60)
        assert_eq!(map.to_output(Point::new(10.0, 20.0)), Point::new(20.0, 60.0));
    }
}
