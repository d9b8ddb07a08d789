//! Core geometry types: points, board-edge segments, bounding boxes.
//!
//! Coordinates are plain `f64` pairs. Whether a value is in board units or
//! output units is a property of the pipeline stage, not the type — see
//! the `units` module for the mappings between the two.

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One mechanical boundary edge defined by two endpoints.
///
/// Segments carry no adjacency information; the source document lists them
/// in arbitrary order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Segment {
    #[inline]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Get the start point of the segment.
    #[inline]
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// Get the end point of the segment.
    #[inline]
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }
}

/// An axis-aligned bounding box.
///
/// Invariant: `min_x <= max_x` and `min_y <= max_y`. A box built from a
/// single point is degenerate (zero width/height) but still valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    /// Compute the bounding box of a point collection.
    ///
    /// Returns `None` for an empty collection.
    pub fn from_points(points: &[Point]) -> Option<BBox> {
        if points.is_empty() {
            return None;
        }

        let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

        Some(BBox { min_x, min_y, max_x, max_y })
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Grow the box (in place) so it contains `p`.
    pub fn expand_to(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Grow the box (in place) by `margin` on every side.
    pub fn pad(&mut self, margin: f64) {
        self.min_x -= margin;
        self.min_y -= margin;
        self.max_x += margin;
        self.max_y += margin;
    }
}

// ============================================================================
// TESTS
// ============================================================================
