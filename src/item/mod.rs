//! Layout item kinds, sharing a geometric interface (bbox, overlap
//! predicates) through the [`HasBbox`] trait rather than an inheritance
//! hierarchy — every variant is a concrete struct with an embedded bbox,
//! and [`Item`] is a thin tagged enum over them.

mod container;
mod glyph;
mod shapes;

pub use container::{Container, Figure, Page, TextBlock, TextLine};
pub use glyph::{AnonText, FontRef, Glyph};
pub use shapes::{Image, Line, Polygon, Rect};

use crate::geometry::Bbox;

/// Anything with a bounding box. `AnonText` deliberately does not
/// implement this: it carries no geometry and must never be mistaken for a
/// spatial item by a `Plane` or an overlap predicate.
pub trait HasBbox {
    fn bbox(&self) -> Bbox;
}

/// A page's (or figure's) child items, covering every concrete variant the
/// data model names. Heterogeneous collections (a page's children, a
/// figure's children) are stored as `Vec<Item>`; homogeneous collections
/// produced mid-pipeline (glyphs, lines, blocks) are typed directly as
/// `Vec<Glyph>` / `Vec<TextLine>` / `Vec<TextBlock>`.
#[derive(Clone, Debug, PartialEq)]
pub enum Item {
    Glyph(Glyph),
    AnonText(AnonText),
    Polygon(Polygon),
    Line(Line),
    Rect(Rect),
    Image(Image),
    Figure(Figure),
    TextLine(TextLine),
    TextBlock(TextBlock),
    Page(Page),
}

impl Item {
    /// `None` only for `AnonText`, which carries no geometry.
    pub fn bbox(&self) -> Option<Bbox> {
        match self {
            Item::Glyph(g) => Some(g.bbox()),
            Item::AnonText(_) => None,
            Item::Polygon(p) => Some(p.bbox()),
            Item::Line(l) => Some(l.bbox()),
            Item::Rect(r) => Some(r.bbox()),
            Item::Image(i) => Some(i.bbox()),
            Item::Figure(f) => Some(f.bbox()),
            Item::TextLine(t) => Some(t.bbox()),
            Item::TextBlock(t) => Some(t.bbox()),
            Item::Page(p) => Some(p.bbox()),
        }
    }

    /// A text item is upright iff it is a `Glyph` satisfying the matrix
    /// test, or a synthetic `AnonText` (which is always considered
    /// upright, matching `LTText.is_upright` always returning `true` for
    /// non-`LTChar` text in the source engine).
    pub fn is_upright_text(&self) -> bool {
        match self {
            Item::Glyph(g) => g.is_upright(),
            Item::AnonText(_) => true,
            _ => false,
        }
    }

    pub fn as_glyph(&self) -> Option<&Glyph> {
        match self {
            Item::Glyph(g) => Some(g),
            _ => None,
        }
    }
}
