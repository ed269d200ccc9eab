#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Diagnostic rendering (`describe()`), not `std::fmt::Debug`.
pub mod debug;
/// Geometric primitives: points, affine matrices, bounding boxes.
pub mod geometry;
/// The layout item types: glyphs, shapes, text lines/blocks, pages.
pub mod item;
/// Line, block and reading-order tree construction.
pub mod layout;
/// The spatial index layout clustering is built on.
pub mod plane;

#[cfg(test)]
pub(crate) mod test_util;

// common re-exports
pub use geometry::{Bbox, Matrix, Point};
pub use item::{FontRef, Item};
pub use layout::{analyze_container, Direction, LayoutParams};

// re-export dependencies
pub use fontdb;
