//! Human-readable diagnostic rendering.
//!
//! Deliberately not a `std::fmt::Debug` impl: `Debug` is for developers
//! inspecting a value in a debugger or an assertion failure, and several
//! `#[derive(Debug)]`s already cover that. `describe()` instead mirrors the
//! one-line-per-object summaries the source layout engine's `__repr__`
//! methods produce (bbox plus the bit of payload that identifies the
//! object), meant for a caller building a tree dump of an analyzed page.

use crate::geometry::Bbox;
use crate::item::{AnonText, Figure, Glyph, HasBbox, Image, Item, Line, Page, Polygon, Rect, TextBlock, TextLine};

fn bbox_str(b: Bbox) -> String {
    b.three_decimals()
}

/// Produces a one-line diagnostic summary of a value.
pub trait Describe {
    fn describe(&self) -> String;
}

impl Describe for Glyph {
    fn describe(&self) -> String {
        format!(
            "<Glyph {} matrix={:?} font={:?} size={} {:?}>",
            bbox_str(self.bbox()),
            self.matrix,
            self.font,
            self.font_size,
            self.text
        )
    }
}

impl Describe for AnonText {
    fn describe(&self) -> String {
        format!("<AnonText {:?}>", self.text)
    }
}

impl Describe for Polygon {
    fn describe(&self) -> String {
        format!("<Polygon {} pts={}>", bbox_str(self.bbox()), self.points_str())
    }
}

impl Describe for Line {
    fn describe(&self) -> String {
        format!("<Line {}>", bbox_str(self.bbox()))
    }
}

impl Describe for Rect {
    fn describe(&self) -> String {
        format!("<Rect {}>", bbox_str(self.bbox()))
    }
}

impl Describe for Image {
    fn describe(&self) -> String {
        format!("<Image {} {} {}x{}>", self.name, bbox_str(self.bbox()), self.src_size.0, self.src_size.1)
    }
}

impl Describe for Figure {
    fn describe(&self) -> String {
        let mut out = format!("<Figure {} {}>\n", self.name, bbox_str(self.bbox()));
        for child in self.children() {
            out.push_str("  ");
            out.push_str(&child.describe());
            out.push('\n');
        }
        out
    }
}

impl Describe for TextLine {
    fn describe(&self) -> String {
        format!("<TextLine {} {:?}>", bbox_str(self.bbox()), self.text())
    }
}

impl Describe for TextBlock {
    fn describe(&self) -> String {
        let mut out = format!("<TextBlock {} index={:?}>\n", bbox_str(self.bbox()), self.index);
        for line in self.lines() {
            out.push_str("  ");
            out.push_str(&line.describe());
            out.push('\n');
        }
        out
    }
}

impl Describe for Page {
    fn describe(&self) -> String {
        let mut out = format!("<Page {:?} {} rotation={}>\n", self.page_id, bbox_str(self.bbox()), self.rotation);
        for child in self.children() {
            out.push_str("  ");
            out.push_str(&child.describe());
            out.push('\n');
        }
        out
    }
}

impl Describe for Item {
    fn describe(&self) -> String {
        match self {
            Item::Glyph(g) => g.describe(),
            Item::AnonText(a) => a.describe(),
            Item::Polygon(p) => p.describe(),
            Item::Line(l) => l.describe(),
            Item::Rect(r) => r.describe(),
            Item::Image(i) => i.describe(),
            Item::Figure(f) => f.describe(),
            Item::TextLine(t) => t.describe(),
            Item::TextBlock(t) => t.describe(),
            Item::Page(p) => p.describe(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Matrix;
    use crate::item::PageId;
    use crate::test_util::dummy_font_ref;

    #[test]
    fn glyph_describe_includes_its_text() {
        let g = Glyph::new_horizontal(Matrix::IDENTITY, dummy_font_ref(), 10.0, 10.0, 0.0, 6.0, "Q");
        assert!(g.describe().contains("\"Q\""));
    }

    #[test]
    fn page_describe_includes_every_child() {
        let page = Page::new(
            PageId(7),
            Bbox::new(0.0, 0.0, 100.0, 100.0),
            0,
            vec![Item::Rect(Rect::new(1.0, Bbox::new(0.0, 0.0, 1.0, 1.0)))],
        );
        let desc = page.describe();
        assert!(desc.contains("PageId(7)"));
        assert!(desc.contains("Rect"));
        let _ = page.bbox();
    }
}
