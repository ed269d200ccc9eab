//! The page-level entry point: turns a flat bag of items into index-ordered
//! text blocks plus the untouched "other" objects (shapes, images, figures,
//! non-upright glyphs), mirroring the three tiers the source layout engine
//! exposes (`LTPage.analyze`, `LTFigure.analyze`, and the shared
//! `LTLayoutContainer.analyze` those two delegate to).

use crate::item::{Figure, Glyph, Item, Page, TextBlock};
use crate::layout::block_builder::build_blocks;
use crate::layout::line_builder::build_lines;
use crate::layout::tree_builder::{assign_indices, build_tree, GroupArena};
use crate::layout::LayoutParams;

/// Runs the full line -> block -> reading-order pipeline over `children`.
///
/// `params` being `None` disables analysis entirely: the children are
/// returned unmodified and no tree is built, matching `LTLayoutContainer
/// .analyze`'s `if not laparams: return` pass-through for a page with no
/// parameter record.
///
/// Returns the new child list — index-ordered text blocks first, then every
/// other item in its original relative order — and the arena describing how
/// those blocks were grouped. The arena is `None` when there were no
/// clusterable glyphs at all (an all-figure or all-image page, say): there
/// is nothing to build a tree over.
pub fn analyze_container(children: Vec<Item>, params: Option<&LayoutParams>) -> (Vec<Item>, Option<GroupArena>) {
    let Some(params) = params else {
        log::debug!("no layout parameters supplied, passing {} items through unmodified", children.len());
        return (children, None);
    };

    let mut glyphs: Vec<Glyph> = Vec::new();
    let mut other: Vec<Item> = Vec::new();

    for item in children {
        match item {
            Item::Glyph(g) if g.is_upright() && !g.text.is_empty() => glyphs.push(g),
            other_item => other.push(other_item),
        }
    }

    log::debug!("analyzing {} glyphs and {} other items", glyphs.len(), other.len());

    let lines = build_lines(glyphs, params);
    let mut blocks = build_blocks(lines, params);

    if blocks.is_empty() {
        log::debug!("no clusterable text found, skipping tree construction");
        return (other, None);
    }

    let arena = build_tree(&blocks, params.direction);
    let order = assign_indices(&arena, arena.root(), params.direction);

    let mut blocks: Vec<Option<TextBlock>> = blocks.drain(..).map(Some).collect();
    let mut ordered = Vec::with_capacity(blocks.len() + other.len());
    for (position, block_idx) in order.into_iter().enumerate() {
        let mut block = blocks[block_idx].take().expect("each block index appears exactly once in reading order");
        block.index = Some(position);
        ordered.push(Item::TextBlock(block));
    }
    ordered.extend(other);

    (ordered, Some(arena))
}

impl Page {
    /// Runs [`analyze_container`] over this page's children in place and
    /// records the resulting tree on [`Page::layout`]. `params` being `None`
    /// leaves the page's children untouched.
    pub fn analyze(&mut self, params: Option<&LayoutParams>) {
        let children = std::mem::take(self.children_mut());
        let (ordered, arena) = analyze_container(children, params);
        self.set_children(ordered);
        self.layout = arena;
    }
}

impl Figure {
    /// Runs [`analyze_container`] over this figure's own children in place.
    ///
    /// Unlike [`Page::analyze`], the resulting tree is discarded rather than
    /// stored: nothing in this crate's data model currently needs a
    /// figure's internal reading-order tree kept around after analysis, only
    /// its index-ordered blocks.
    pub fn analyze(&mut self, params: Option<&LayoutParams>) {
        let children = std::mem::take(self.children_mut());
        let (ordered, _arena) = analyze_container(children, params);
        *self.children_mut() = ordered;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Bbox, Matrix};
    use crate::item::PageId;
    use crate::layout::Direction;
    use crate::test_util::dummy_font_ref;

    fn glyph_at(x0: f64, y0: f64, x1: f64, y1: f64) -> Item {
        Item::Glyph(Glyph::new_horizontal(Matrix::IDENTITY, dummy_font_ref(), 10.0, y1 - y0, y0, x1 - x0, "A"))
    }

    #[test]
    fn blocks_come_before_other_items_and_carry_indices() {
        let params = LayoutParams::default();
        let children = vec![
            Item::Rect(crate::item::Rect::new(1.0, Bbox::new(0.0, 0.0, 1.0, 1.0))),
            glyph_at(0.0, 0.0, 6.0, 10.0),
        ];
        let (ordered, arena) = analyze_container(children, Some(&params));
        assert!(arena.is_some());
        assert!(matches!(ordered[0], Item::TextBlock(_)));
        assert!(matches!(ordered[1], Item::Rect(_)));
        if let Item::TextBlock(b) = &ordered[0] {
            assert_eq!(b.index, Some(0));
        }
    }

    #[test]
    fn a_page_with_no_clusterable_text_has_no_layout_tree() {
        let mut page = Page::new(PageId(1), Bbox::new(0.0, 0.0, 100.0, 100.0), 0, vec![Item::Rect(crate::item::Rect::new(1.0, Bbox::new(0.0, 0.0, 1.0, 1.0)))]);
        page.analyze(Some(&LayoutParams::default()));
        assert!(page.layout.is_none());
        assert_eq!(page.children().len(), 1);
    }

    #[test]
    fn no_params_leaves_children_untouched() {
        let children = vec![glyph_at(0.0, 0.0, 6.0, 10.0), Item::Rect(crate::item::Rect::new(1.0, Bbox::new(0.0, 0.0, 1.0, 1.0)))];
        let (ordered, arena) = analyze_container(children.clone(), None);
        assert!(arena.is_none());
        assert!(matches!(ordered[0], Item::Glyph(_)), "pass-through must not even build lines out of the glyph");
        assert_eq!(ordered.len(), children.len());
    }

    #[test]
    fn page_analyze_orders_blocks_top_to_bottom() {
        let mut page = Page::new(
            PageId(1),
            Bbox::new(0.0, 0.0, 1000.0, 1000.0),
            0,
            vec![glyph_at(0.0, 0.0, 6.0, 10.0), glyph_at(0.0, 500.0, 6.0, 510.0)],
        );
        page.analyze(Some(&LayoutParams { direction: Direction::Horizontal, line_margin: 0.05, ..LayoutParams::default() }));
        assert!(page.layout.is_some());
        let blocks: Vec<_> = page.children().iter().filter_map(|c| if let Item::TextBlock(b) = c { Some(b) } else { None }).collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].bbox().y0 > blocks[1].bbox().y0, "the higher block must be listed first");
    }

    #[test]
    fn block_indexes_are_exactly_zero_through_k_minus_one() {
        let params = LayoutParams { direction: Direction::Horizontal, line_margin: 0.05, ..LayoutParams::default() };
        let children = vec![
            glyph_at(0.0, 0.0, 6.0, 10.0),
            glyph_at(0.0, 200.0, 6.0, 210.0),
            glyph_at(0.0, 400.0, 6.0, 410.0),
            glyph_at(0.0, 600.0, 6.0, 610.0),
        ];
        let (ordered, arena) = analyze_container(children, Some(&params));
        assert!(arena.is_some());
        let mut indexes: Vec<usize> = ordered
            .iter()
            .filter_map(|c| if let Item::TextBlock(b) = c { b.index } else { None })
            .collect();
        indexes.sort_unstable();
        assert_eq!(indexes, vec![0, 1, 2, 3]);
    }

    #[test]
    fn non_text_item_order_does_not_affect_block_layout() {
        let params = LayoutParams::default();
        let text = vec![glyph_at(0.0, 0.0, 6.0, 10.0), glyph_at(0.0, 500.0, 6.0, 510.0)];
        let others_forward = vec![
            Item::Rect(crate::item::Rect::new(1.0, Bbox::new(50.0, 50.0, 51.0, 51.0))),
            Item::Rect(crate::item::Rect::new(1.0, Bbox::new(60.0, 60.0, 61.0, 61.0))),
        ];
        let others_reversed: Vec<Item> = others_forward.iter().cloned().rev().collect();

        let mut forward = text.clone();
        forward.extend(others_forward);
        let mut reversed = text;
        reversed.extend(others_reversed);

        let (ordered_forward, _) = analyze_container(forward, Some(&params));
        let (ordered_reversed, _) = analyze_container(reversed, Some(&params));

        let block_bboxes = |items: &[Item]| -> Vec<Bbox> {
            items.iter().filter_map(|c| if let Item::TextBlock(b) = c { Some(b.bbox()) } else { None }).collect()
        };
        assert_eq!(block_bboxes(&ordered_forward), block_bboxes(&ordered_reversed));
    }
}
