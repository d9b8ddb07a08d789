//! CLI command implementation.
//!
//! One command: read a `.brd` file, resolve per-package artwork from the
//! subparts directory, and write the composite SVG next to the input.

pub mod convert;
pub mod resolver;

pub use convert::{cmd_convert, print_usage};
