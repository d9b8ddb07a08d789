//! Board-outline reconstruction from unordered wire segments.
//!
//! The source document lists boundary wires in arbitrary order, so the
//! "outline" recovered here is a best-effort boundary sample: both endpoints
//! of every segment, deduplicated by exact coordinate equality, in first-seen
//! order. No attempt is made to walk the segments into a connectivity-ordered
//! closed loop — callers must treat the result as a point cloud plus the raw
//! segment list, not a guaranteed simple polygon.

use crate::geometry::{BBox, Point, Segment};
use std::collections::HashSet;

/// A reconstructed board outline: deduplicated endpoint sequence plus the
/// raw segments it came from (kept for rendering the boundary as lines).
#[derive(Debug, Clone, PartialEq)]
pub struct BoardOutline {
    points: Vec<Point>,
    segments: Vec<Segment>,
}

impl BoardOutline {
    /// Reconstruct an outline from a segment list.
    ///
    /// Returns `None` when no segments were supplied — the caller falls back
    /// to a default canvas in that case.
    ///
    /// Deduplication uses exact equality on the raw f64 values (no epsilon):
    /// two endpoints collapse only when their bit patterns agree, matching
    /// the source convention of wires that share exact corner coordinates.
    pub fn from_segments(segments: Vec<Segment>) -> Option<BoardOutline> {
        if segments.is_empty() {
            return None;
        }

        let mut seen: HashSet<(u64, u64)> = HashSet::new();
        let mut points = Vec::new();

        for seg in &segments {
            for p in [seg.start(), seg.end()] {
                if seen.insert((p.x.to_bits(), p.y.to_bits())) {
                    points.push(p);
                }
            }
        }

        Some(BoardOutline { points, segments })
    }

    /// The deduplicated endpoints, in first-seen order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The raw boundary segments, in document order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Bounding box of the outline.
    ///
    /// Never fails: construction guarantees at least one segment, hence at
    /// least one point.
    pub fn bounding_box(&self) -> BBox {
        BBox::from_points(&self.points).unwrap_or(BBox {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 0.0,
            max_y: 0.0,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
