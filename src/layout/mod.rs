//! Layout parameters and the writing direction the clustering algorithms
//! run in.

pub mod analyzer;
pub mod block_builder;
pub mod line_builder;
pub mod tree_builder;

pub use analyzer::analyze_container;
pub use tree_builder::{GroupArena, GroupNode, NodeId};

/// The writing direction a page (or figure) is analyzed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Horizontal,
    Vertical,
}

/// Tuning knobs for a single [`analyze_container`] call.
///
/// Mirrors `LAParams` in the source layout engine this crate reimplements:
/// every field is honored for the duration of one page's analysis and
/// nothing here is mutated by the pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
    pub direction: Direction,
    /// Fractional vertical/horizontal overlap threshold required for two
    /// consecutive glyphs to be considered part of the same line.
    pub line_overlap: f64,
    /// Maximum inter-glyph gap, as a multiple of glyph width/height, still
    /// considered part of the same line.
    pub char_margin: f64,
    /// Neighborhood ratio used when grouping lines into blocks.
    pub line_margin: f64,
    /// Minimum gap, as a multiple of glyph width/height, that inserts a
    /// word break (`AnonText::space`) between two glyphs in a line.
    pub word_margin: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            direction: Direction::Horizontal,
            line_overlap: 0.5,
            char_margin: 3.0,
            line_margin: 0.5,
            word_margin: 0.1,
        }
    }
}
