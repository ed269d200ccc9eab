//! Phase B: groups [`TextLine`]s into [`TextBlock`]s by transitive
//! neighborhood closure.
//!
//! Each line is inserted into a [`Plane`] keyed by its own bbox. Two lines
//! belong in the same block if either is inside the other's
//! [`TextLine::neighborhood_rect`] — and the relation is then closed
//! transitively (if line A neighbors B and B neighbors C, A/B/C end up in
//! one block even if A and C alone would not have been judged neighbors).
//! A union-find over the neighbor-pair graph computes that closure in
//! roughly linear time instead of repeatedly rescanning merged groups.

use crate::item::{TextBlock, TextLine};
use crate::layout::LayoutParams;
use crate::plane::Plane;

struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self { parent: (0..n).collect() }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            self.parent[ra.max(rb)] = ra.min(rb);
        }
    }
}

/// Groups `lines` into blocks. The order of lines within each returned
/// block follows their original order in `lines`; line-internal sorting
/// by reading direction happens later via
/// [`TextBlock::sort_lines`](crate::item::TextBlock::sort_lines).
pub fn build_blocks(lines: Vec<TextLine>, params: &LayoutParams) -> Vec<TextBlock> {
    if lines.is_empty() {
        return Vec::new();
    }

    let mut plane = Plane::new();
    let ids: Vec<_> = lines.iter().map(|l| plane.insert(l.bbox())).collect();

    let mut uf = UnionFind::new(lines.len());
    for (i, line) in lines.iter().enumerate() {
        let rect = line.neighborhood_rect(params.direction, params.line_margin);
        let hits = plane.find(rect);
        assert!(hits.contains(&ids[i]), "line's neighbor query must include itself");
        for hit in hits {
            let j = ids.iter().position(|&id| id == hit).expect("plane id must be one of ours");
            uf.union(i, j);
        }
    }

    let mut groups: std::collections::BTreeMap<usize, Vec<usize>> = std::collections::BTreeMap::new();
    for i in 0..lines.len() {
        let root = uf.find(i);
        groups.entry(root).or_default().push(i);
    }

    let mut lines: Vec<Option<TextLine>> = lines.into_iter().map(Some).collect();
    let mut blocks = Vec::with_capacity(groups.len());
    for (_, members) in groups {
        let group_lines: Vec<TextLine> = members.into_iter().map(|i| lines[i].take().expect("each line belongs to exactly one group")).collect();
        let mut block = TextBlock::new(group_lines);
        block.sort_lines(params.direction);
        blocks.push(block);
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Matrix;
    use crate::item::Glyph;
    use crate::layout::Direction;
    use crate::test_util::dummy_font_ref;

    fn line_at(y0: f64, y1: f64) -> TextLine {
        let g = Glyph::new_horizontal(Matrix::IDENTITY, dummy_font_ref(), 10.0, y1 - y0, y0, 10.0, "A");
        TextLine::new(vec![crate::item::Item::Glyph(g)])
    }

    #[test]
    fn close_lines_merge_into_one_block() {
        let params = LayoutParams { direction: Direction::Horizontal, line_margin: 0.5, ..LayoutParams::default() };
        let lines = vec![line_at(0.0, 10.0), line_at(10.0, 20.0), line_at(20.0, 30.0)];
        let blocks = build_blocks(lines, &params);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].lines().count(), 3);
    }

    #[test]
    fn block_lines_come_out_sorted_top_to_bottom_regardless_of_input_order() {
        let params = LayoutParams { direction: Direction::Horizontal, line_margin: 0.5, ..LayoutParams::default() };
        // fed bottom line first, then top line
        let lines = vec![line_at(0.0, 10.0), line_at(10.0, 20.0)];
        let blocks = build_blocks(lines, &params);
        assert_eq!(blocks.len(), 1);
        let ys: Vec<f64> = blocks[0].lines().map(|l| l.bbox().y1).collect();
        assert_eq!(ys, vec![20.0, 10.0], "lines must be sorted by descending y1, top first");
    }

    #[test]
    fn far_apart_lines_stay_in_separate_blocks() {
        let params = LayoutParams { direction: Direction::Horizontal, line_margin: 0.1, ..LayoutParams::default() };
        let lines = vec![line_at(0.0, 10.0), line_at(1000.0, 1010.0)];
        let blocks = build_blocks(lines, &params);
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn transitive_neighbors_merge_even_when_endpoints_are_not_direct_neighbors() {
        // A neighbors B, B neighbors C, but A and C alone are too far apart:
        // all three must still end up in the same block.
        let params = LayoutParams { direction: Direction::Horizontal, line_margin: 0.6, ..LayoutParams::default() };
        let lines = vec![line_at(0.0, 10.0), line_at(10.0, 20.0), line_at(20.0, 30.0)];
        let blocks = build_blocks(lines, &params);
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn empty_input_produces_no_blocks() {
        let params = LayoutParams::default();
        assert!(build_blocks(Vec::new(), &params).is_empty());
    }
}
