use crate::geometry::{Bbox, Matrix, Point};
use crate::item::{HasBbox, Item};
use crate::layout::tree_builder::GroupArena;
use crate::layout::Direction;

/// An ordered sequence of child items plus its own bbox.
///
/// Fixating a container sets its bbox to the union of its children's
/// bboxes, but only if it doesn't already have one — fixating an
/// already-fixated container is a no-op on bbox, by construction.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Container {
    bbox: Option<Bbox>,
    pub children: Vec<Item>,
}

impl Container {
    pub fn new() -> Self {
        Self { bbox: None, children: Vec::new() }
    }

    pub fn from_children(children: Vec<Item>) -> Self {
        Self { bbox: None, children }
    }

    pub fn push(&mut self, item: Item) {
        self.children.push(item);
    }

    pub fn bbox(&self) -> Option<Bbox> {
        self.bbox
    }

    /// Sets the bbox directly, bypassing union-of-children computation —
    /// used by variants (`Figure`, `Page`) whose bbox is known up front.
    pub fn set_bbox(&mut self, bbox: Bbox) {
        self.bbox = Some(bbox);
    }

    /// Unions the bboxes of every child that has one (`AnonText` children
    /// contribute nothing) if this container has no bbox yet.
    pub fn fixate(&mut self) {
        if self.bbox.is_none() {
            self.bbox = Bbox::union_all(self.children.iter().filter_map(Item::bbox));
        }
    }
}

/// A container of glyphs judged co-linear along the writing direction,
/// produced by the line builder. Always fixated at construction: a
/// `TextLine` cannot exist without a bbox.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
    container: Container,
}

impl TextLine {
    /// `children` must contain at least one real glyph (invariant 3 in the
    /// data model); the line's bbox is the union of the real glyphs'
    /// bboxes since `AnonText` separators contribute no geometry.
    pub fn new(children: Vec<Item>) -> Self {
        assert!(
            children.iter().any(|c| matches!(c, Item::Glyph(_))),
            "a TextLine must contain at least one real glyph"
        );
        let mut container = Container::from_children(children);
        container.fixate();
        Self { container }
    }

    pub fn children(&self) -> &[Item] {
        &self.container.children
    }

    pub fn bbox(&self) -> Bbox {
        self.container.bbox().expect("TextLine is always fixated at construction")
    }

    /// Concatenation of this line's text-carrying children, in child
    /// order — glyph text and the inserted `AnonText` word/line breaks.
    pub fn text(&self) -> String {
        self.container
            .children
            .iter()
            .map(|c| match c {
                Item::Glyph(g) => g.text.as_str(),
                Item::AnonText(a) => a.text.as_str(),
                _ => "",
            })
            .collect()
    }

    /// The rectangle the block builder queries the `Plane` with to find
    /// this line's grouping neighbors. Always contains the line's own
    /// bbox, since it is built by inflating that same bbox — a
    /// correctly-implemented `Plane::find` therefore structurally cannot
    /// omit the line itself from its own neighbor query.
    pub fn neighborhood_rect(&self, direction: Direction, line_margin: f64) -> Bbox {
        let b = self.bbox();
        match direction {
            Direction::Horizontal => {
                let h = line_margin * b.height();
                Bbox::new(b.x0, b.y0 - h, b.x1, b.y1 + h)
            }
            Direction::Vertical => {
                let w = line_margin * b.width();
                Bbox::new(b.x0 - w, b.y0, b.x1 + w, b.y1)
            }
        }
    }
}

impl HasBbox for TextLine {
    fn bbox(&self) -> Bbox {
        TextLine::bbox(self)
    }
}

/// A set of text lines grouped by transitive neighborhood closure. Carries
/// the non-negative integer reading-order index assigned by the tree
/// builder; `None` until that pass runs.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    container: Container,
    pub index: Option<usize>,
}

impl TextBlock {
    /// Panics if `lines` is empty — a block with no lines should never be
    /// constructed (the line builder never emits an empty grouping).
    pub fn new(lines: Vec<TextLine>) -> Self {
        assert!(!lines.is_empty(), "a TextBlock must contain at least one line");
        let mut container = Container::from_children(lines.into_iter().map(Item::TextLine).collect());
        container.fixate();
        Self { container, index: None }
    }

    pub fn bbox(&self) -> Bbox {
        self.container.bbox().expect("TextBlock is always fixated at construction")
    }

    pub fn lines(&self) -> impl Iterator<Item = &TextLine> {
        self.container.children.iter().filter_map(|c| match c {
            Item::TextLine(l) => Some(l),
            _ => None,
        })
    }

    /// Concatenation of this block's line texts, in child order.
    pub fn text(&self) -> String {
        self.lines().map(TextLine::text).collect()
    }

    /// Sorts this block's lines top-to-bottom (horizontal, by descending
    /// `y1`) or right-to-left (vertical, by descending `x1`), per
    /// invariant 4 in the data model.
    pub fn sort_lines(&mut self, direction: Direction) {
        crate::geometry::sort_by_key_stable(&mut self.container.children, |c| {
            let b = c.bbox().expect("TextLine always has a bbox");
            match direction {
                Direction::Horizontal => -b.y1,
                Direction::Vertical => -b.x1,
            }
        });
    }
}

impl HasBbox for TextBlock {
    fn bbox(&self) -> Bbox {
        TextBlock::bbox(self)
    }
}

/// A container whose bbox is the image of an `(x, y, width, height)`
/// rectangle under a matrix; may itself contain glyphs and nested figures,
/// analyzed recursively by the downstream collaborator (this crate's own
/// page analyzer never descends into figures; see [`crate::layout::analyzer`]).
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    container: Container,
    pub name: String,
    pub matrix: Matrix,
}

impl Figure {
    pub fn new(name: impl Into<String>, xywh: (f64, f64, f64, f64), matrix: Matrix, children: Vec<Item>) -> Self {
        let (x, y, w, h) = xywh;
        let corners = [
            Point::new(x, y),
            Point::new(x + w, y),
            Point::new(x, y + h),
            Point::new(x + w, y + h),
        ];
        let bbox = Bbox::from_points(corners.into_iter().map(|p| matrix.apply_pt(p)));
        let mut container = Container::from_children(children);
        container.set_bbox(bbox);
        Self { container, name: name.into(), matrix }
    }

    pub fn bbox(&self) -> Bbox {
        self.container.bbox().expect("Figure bbox is set at construction")
    }

    pub fn children(&self) -> &[Item] {
        &self.container.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Item> {
        &mut self.container.children
    }
}

impl HasBbox for Figure {
    fn bbox(&self) -> Bbox {
        Figure::bbox(self)
    }
}

/// An opaque page identifier, supplied by the page-iterator collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PageId(pub u64);

/// Top-level container for one page's items.
///
/// After [`crate::layout::analyzer::analyze_container`] runs (via
/// [`Page::analyze`]), `container.children` holds index-ordered text
/// blocks followed by the page's other (non-text) objects, and `layout`
/// holds the reading-order tree those indexes came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    container: Container,
    pub page_id: PageId,
    pub rotation: u16,
    pub layout: Option<GroupArena>,
}

impl Page {
    pub fn new(page_id: PageId, bbox: Bbox, rotation: u16, children: Vec<Item>) -> Self {
        let mut container = Container::from_children(children);
        container.set_bbox(bbox);
        Self { container, page_id, rotation, layout: None }
    }

    pub fn bbox(&self) -> Bbox {
        self.container.bbox().expect("Page bbox is set at construction")
    }

    pub fn children(&self) -> &[Item] {
        &self.container.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Item> {
        &mut self.container.children
    }

    pub fn set_children(&mut self, children: Vec<Item>) {
        self.container.children = children;
    }
}

impl HasBbox for Page {
    fn bbox(&self) -> Bbox {
        Page::bbox(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Glyph;
    use crate::test_util::dummy_font_ref;

    fn glyph_at(x0: f64, y0: f64, x1: f64, y1: f64) -> Item {
        let m = Matrix::IDENTITY;
        Item::Glyph(Glyph::new_horizontal(m, dummy_font_ref(), 10.0, y1 - y0, y0, x1 - x0, "A"))
    }

    #[test]
    fn container_fixate_is_idempotent() {
        let mut c = Container::from_children(vec![glyph_at(0.0, 0.0, 10.0, 10.0)]);
        c.fixate();
        let first = c.bbox();
        c.push(glyph_at(100.0, 100.0, 110.0, 110.0));
        c.fixate();
        assert_eq!(c.bbox(), first, "fixating an already-fixated container must be a no-op");
    }

    #[test]
    fn textline_text_concatenates_children_in_order() {
        let line = TextLine::new(vec![
            glyph_at(0.0, 0.0, 10.0, 10.0),
            Item::AnonText(crate::item::AnonText::space()),
            glyph_at(11.0, 0.0, 21.0, 10.0),
            Item::AnonText(crate::item::AnonText::newline()),
        ]);
        assert_eq!(line.text(), "A A\n");
    }

    #[test]
    fn textline_neighborhood_rect_contains_self() {
        let line = TextLine::new(vec![glyph_at(0.0, 0.0, 10.0, 10.0)]);
        let rect = line.neighborhood_rect(Direction::Horizontal, 0.5);
        let b = line.bbox();
        assert!(rect.x0 <= b.x0 && rect.x1 >= b.x1 && rect.y0 <= b.y0 && rect.y1 >= b.y1);
    }

    #[test]
    fn figure_bbox_is_matrix_image_of_xywh() {
        let fig = Figure::new("Fig1", (0.0, 0.0, 10.0, 20.0), Matrix::new(2.0, 0.0, 0.0, 1.0, 5.0, 0.0), vec![]);
        // x in [0,10] maps to [5, 25] under a=2,e=5; y in [0,20] unchanged.
        assert_eq!(fig.bbox(), Bbox::new(5.0, 0.0, 25.0, 20.0));
    }
}
