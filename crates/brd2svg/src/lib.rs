//! # brd2svg
//!
//! Converts Eagle `.brd` board files into composite breadboard-style SVGs:
//! reads the board outline and component placements, maps them into SVG
//! coordinates (unit scale plus Y-axis flip), and assembles per-package
//! artwork onto one canvas.
//!
//! The pipeline is [`brd::parse_board`] -> [`outline::BoardOutline`] ->
//! [`compose::compose`]; everything else supports those three stages.

pub mod artwork;
pub mod brd;
pub mod compose;
pub mod geometry;
pub mod outline;
pub mod pathdata;
pub mod transform;
pub mod units;

// Re-export common types at crate root for convenience.
pub use artwork::{Artwork, ArtworkError};
pub use brd::{Board, BrdError, Component, parse_board};
pub use compose::{Composite, ComposeConfig, ComposeError, Part, PlacementStrategy, compose};
pub use geometry::{BBox, Point, Segment};
pub use outline::BoardOutline;
pub use transform::{Orientation, OrientationError, Placement};
pub use units::{CoordinateMap, IDENTITY_SCALE, MM_TO_MIL};
