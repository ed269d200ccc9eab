use crate::geometry::{Bbox, Matrix, Point};
use crate::item::HasBbox;

/// An opaque handle identifying which font a glyph came from.
///
/// This crate never loads or rasterizes fonts (that is the font-decoder
/// collaborator's job); it only needs a `Copy + Eq + Hash` handle so glyphs
/// can be grouped, compared, and shown in diagnostics. Reusing `fontdb::ID`
/// rather than minting a parallel newtype keeps this crate interoperable
/// with whatever `fontdb::Database` the collaborator already maintains.
pub type FontRef = fontdb::ID;

/// A single positioned character.
///
/// The bbox is derived once, at construction time, from font size plus
/// descent (horizontal) or displacement (vertical) applied through the
/// character matrix — the same arithmetic the original PDF layout engine
/// performs, just with the font-table lookups already done by the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    bbox: Bbox,
    pub matrix: Matrix,
    pub font: FontRef,
    pub font_size: f64,
    /// Horizontal (or vertical) advance of this glyph, in user space.
    pub advance: f64,
    pub vertical: bool,
    /// The glyph's text. `"?"` when the font has no Unicode mapping for
    /// this character — the font layer signals that upstream; this crate
    /// treats it as ordinary text either way.
    pub text: String,
}

impl Glyph {
    /// Builds a horizontal glyph.
    ///
    /// `size` is `font.get_size() * fontsize` and `descent` is
    /// `font.get_descent() * fontsize`, both already computed by the
    /// caller — this crate does not read font tables.
    pub fn new_horizontal(
        matrix: Matrix,
        font: FontRef,
        font_size: f64,
        size: f64,
        descent: f64,
        advance: f64,
        text: impl Into<String>,
    ) -> Self {
        let descent = matrix.apply_norm(Point::new(0.0, descent)).y;
        let (dx, dy) = {
            let d = matrix.apply_norm(Point::new(advance, size));
            (d.x, d.y)
        };
        let tx = matrix.e;
        let ty = matrix.f + descent;
        let bbox = Bbox::new(tx, ty, tx + dx, ty + dy);
        Self { bbox, matrix, font, font_size, advance, vertical: false, text: text.into() }
    }

    /// Builds a vertical glyph.
    ///
    /// `size` is `font.get_size() * fontsize` and `displacement` is
    /// `(1000 - font.char_disp(cid)) * fontsize * 0.001`, both already
    /// computed by the caller.
    pub fn new_vertical(
        matrix: Matrix,
        font: FontRef,
        font_size: f64,
        size: f64,
        displacement: f64,
        advance: f64,
        text: impl Into<String>,
    ) -> Self {
        let displacement = matrix.apply_norm(Point::new(0.0, displacement)).y;
        let (dx, dy) = {
            let d = matrix.apply_norm(Point::new(size, advance));
            (d.x, d.y)
        };
        let tx = matrix.e - dx / 2.0;
        let ty = matrix.f + displacement;
        let bbox = Bbox::new(tx, ty + dy, tx + dx, ty);
        Self { bbox, matrix, font, font_size, advance, vertical: true, text: text.into() }
    }

    /// A glyph is upright iff its matrix preserves orientation. Only
    /// upright glyphs with real text participate in clustering; everything
    /// else (including this one if it fails the test) passes through as an
    /// "other" object.
    pub fn is_upright(&self) -> bool {
        self.matrix.is_upright()
    }
}

impl HasBbox for Glyph {
    fn bbox(&self) -> Bbox {
        self.bbox
    }
}

/// A synthetic text token with no geometry: a word-break space or a
/// terminal line-break newline, inserted by the line builder. Treated as
/// text (it contributes to a line's text accessor) but never as a spatial
/// item — it never appears in a `Plane` and has no bbox.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnonText {
    pub text: String,
}

impl AnonText {
    pub fn space() -> Self {
        Self { text: " ".to_string() }
    }

    pub fn newline() -> Self {
        Self { text: "\n".to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::test_util::dummy_font_ref as font_ref;

    #[test]
    fn horizontal_glyph_bbox_matches_size_and_advance() {
        let m = Matrix::IDENTITY;
        let g = Glyph::new_horizontal(m, font_ref(), 10.0, 10.0, -2.0, 6.0, "A");
        // descent -2 applied via identity matrix -> ty = -2; dx=6, dy=10
        assert_eq!((g.bbox().x0, g.bbox().y0, g.bbox().x1, g.bbox().y1), (0.0, -2.0, 6.0, 8.0));
        assert!(g.is_upright());
        assert!(!g.vertical);
    }

    #[test]
    fn upside_down_glyph_is_not_upright() {
        let m = Matrix::new(1.0, 0.0, 0.0, -1.0, 0.0, 0.0);
        let g = Glyph::new_horizontal(m, font_ref(), 10.0, 10.0, 0.0, 6.0, "A");
        assert!(!g.is_upright());
    }

    #[test]
    fn anon_text_carries_no_geometry() {
        let sp = AnonText::space();
        let nl = AnonText::newline();
        assert_eq!(sp.text, " ");
        assert_eq!(nl.text, "\n");
    }
}
