//! Phase A: chains consecutive upright glyphs into [`TextLine`]s.
//!
//! Mirrors the source layout engine's single sequential pass over objects
//! in input order: each glyph either extends the line in progress (if it is
//! alignment-compatible with the previous glyph) or closes it and starts a
//! new one. This is why a `TextLine`'s reading order within itself is
//! simply the order its glyphs were fed in — no sorting happens here, only
//! in the block builder afterward.

use crate::geometry::{sort_by_key_stable, Bbox};
use crate::item::{AnonText, Glyph, HasBbox, Item, TextLine};
use crate::layout::{Direction, LayoutParams};

/// True if two glyphs belong on the same line, per direction.
///
/// Horizontal: vertically overlapping by at least `line_overlap` of the
/// shorter glyph's height, and horizontally no further apart than
/// `char_margin` times the taller glyph's width. Vertical is the
/// axis-swapped mirror.
fn chains(a: &Bbox, b: &Bbox, direction: Direction, params: &LayoutParams) -> bool {
    match direction {
        Direction::Horizontal => {
            a.is_voverlap(b)
                && a.height().min(b.height()) * params.line_overlap < a.voverlap(b)
                && a.hdistance(b) < a.width().max(b.width()) * params.char_margin
        }
        Direction::Vertical => {
            a.is_hoverlap(b)
                && a.width().min(b.width()) * params.line_overlap < a.hoverlap(b)
                && a.vdistance(b) < a.height().max(b.height()) * params.char_margin
        }
    }
}

/// Builds the children list for one run of chained glyphs: re-sorts the run
/// by its leading edge in reading order (x0 ascending for horizontal, y1
/// descending for vertical — stable, so original chaining order breaks
/// ties), then inserts a word-break [`AnonText::space`] wherever the gap
/// between consecutive glyphs in that order exceeds `word_margin` times the
/// glyph's width (horizontal) or height (vertical) — never the other axis,
/// even when it happens to be larger — and a trailing [`AnonText::newline`]
/// once the run is complete.
fn finish_line(mut run: Vec<Glyph>, direction: Direction, params: &LayoutParams) -> TextLine {
    match direction {
        Direction::Horizontal => sort_by_key_stable(&mut run, |g| g.bbox().x0),
        Direction::Vertical => sort_by_key_stable(&mut run, |g| -g.bbox().y1),
    }

    let mut children = Vec::with_capacity(run.len() * 2);
    let mut prev: Option<Bbox> = None;
    for glyph in run {
        let bbox = glyph.bbox();
        if let Some(prev_bbox) = prev {
            let margin = params.word_margin
                * match direction {
                    Direction::Horizontal => bbox.width(),
                    Direction::Vertical => bbox.height(),
                };
            let gap = match direction {
                Direction::Horizontal => bbox.x0 - prev_bbox.x1,
                Direction::Vertical => prev_bbox.y0 - bbox.y1,
            };
            if gap > margin {
                children.push(Item::AnonText(AnonText::space()));
            }
        }
        prev = Some(bbox);
        children.push(Item::Glyph(glyph));
    }
    children.push(Item::AnonText(AnonText::newline()));
    TextLine::new(children)
}

/// Groups `glyphs` (already filtered to upright, real-text glyphs, in their
/// original stream order) into lines.
///
/// Returns an empty vec for an empty input — there is no line to build from
/// zero glyphs, unlike [`TextLine::new`] which panics on an empty children
/// list internally (that invariant is about a single run never being empty,
/// which this function guarantees by construction).
pub fn build_lines(glyphs: Vec<Glyph>, params: &LayoutParams) -> Vec<TextLine> {
    let mut lines = Vec::new();
    let mut run: Vec<Glyph> = Vec::new();

    for glyph in glyphs {
        if let Some(last) = run.last() {
            if !chains(&last.bbox(), &glyph.bbox(), params.direction, params) {
                lines.push(finish_line(std::mem::take(&mut run), params.direction, params));
            }
        }
        run.push(glyph);
    }
    if !run.is_empty() {
        lines.push(finish_line(run, params.direction, params));
    }
    lines
}
