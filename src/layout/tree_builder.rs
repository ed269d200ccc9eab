//! Phase C: agglomerates [`TextBlock`]s pairwise into a binary reading-order
//! tree, then walks that tree to assign each block its final index.
//!
//! The tree is stored as an arena (`Vec<GroupNode>` addressed by
//! [`NodeId`]) rather than as owned recursive nodes — leaves reference
//! their source block by position in the caller's block slice instead of
//! owning it, so the arena can be kept around afterward (on [`Page`](crate::item::Page))
//! purely as a read-only description of how the page was grouped.

use crate::geometry::Bbox;
use crate::item::TextBlock;
use crate::layout::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Debug, PartialEq)]
pub enum GroupNode {
    /// A single source block, identified by its index into the slice
    /// `build_tree` was called with.
    Leaf { block: usize, bbox: Bbox },
    /// The union of two previously-merged nodes.
    Branch { bbox: Bbox, left: NodeId, right: NodeId },
}

impl GroupNode {
    pub fn bbox(&self) -> Bbox {
        match self {
            GroupNode::Leaf { bbox, .. } => *bbox,
            GroupNode::Branch { bbox, .. } => *bbox,
        }
    }
}

/// The reading-order tree built over one page's (or figure's) text blocks.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct GroupArena {
    nodes: Vec<GroupNode>,
}

impl GroupArena {
    fn push(&mut self, node: GroupNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> &GroupNode {
        &self.nodes[id.0]
    }

    pub fn bbox(&self, id: NodeId) -> Bbox {
        self.get(id).bbox()
    }

    /// The last node pushed during [`build_tree`] is always the final
    /// merge's result, i.e. the root.
    pub fn root(&self) -> NodeId {
        NodeId(self.nodes.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// The merge cost between two candidate nodes: the area of their combined
/// bounding box, less the areas they each already cover. Smaller is a
/// tighter, more plausible grouping; this is the same cost the source
/// layout engine's `group_textboxes` minimizes when picking which two
/// boxes to merge next, and it is not a true metric distance (it can be
/// negative when the boxes overlap), only a total order for pair
/// selection.
fn merge_cost(a: Bbox, b: Bbox) -> f64 {
    let union = a.union(b);
    union.area() - a.area() - b.area()
}

/// Builds the reading-order tree over `blocks` by repeatedly merging the
/// two nodes with the lowest [`merge_cost`] until a single root remains.
///
/// Before each merge round the working list is re-sorted by area ascending
/// (stable against the previous round's order) exactly as the source
/// engine's `group_textboxes` re-sorts its working list on every iteration;
/// ties in merge cost are then broken by first occurrence in the
/// outer-then-inner loop order over that area-sorted list, not by the
/// original block index — this only matters when costs tie, but the spec
/// calls it out explicitly as load-bearing for deterministic output.
///
/// Panics if `blocks` is empty: there is no tree to build over zero
/// blocks, and callers (the page analyzer) skip tree-building entirely in
/// that case.
pub fn build_tree(blocks: &[TextBlock], _direction: Direction) -> GroupArena {
    assert!(!blocks.is_empty(), "build_tree requires at least one block");

    let mut arena = GroupArena::default();
    let mut active: Vec<NodeId> = blocks
        .iter()
        .enumerate()
        .map(|(i, b)| arena.push(GroupNode::Leaf { block: i, bbox: b.bbox() }))
        .collect();

    while active.len() > 1 {
        crate::geometry::sort_by_key_stable(&mut active, |&id| arena.bbox(id).area());

        let mut best: Option<(usize, usize, f64)> = None;
        for i in 0..active.len() {
            for j in (i + 1)..active.len() {
                let cost = merge_cost(arena.bbox(active[i]), arena.bbox(active[j]));
                if best.map_or(true, |(_, _, b)| cost < b) {
                    best = Some((i, j, cost));
                }
            }
        }
        let (i, j, _) = best.expect("at least one pair exists while active.len() > 1");
        let left = active[i];
        let right = active[j];
        let bbox = arena.bbox(left).union(arena.bbox(right));
        let merged = arena.push(GroupNode::Branch { bbox, left, right });

        // Remove the higher index first so the lower index's removal
        // doesn't shift it.
        active.remove(j);
        active.remove(i);
        active.push(merged);
    }

    arena
}

/// Walks the tree rooted at `root`, visiting children at each branch in
/// reading order, and returns the source block indices in that order.
///
/// Each branch's two children are ordered by a diagonal key: `x0 - y1`
/// ascending for a horizontal group (top-left-to-bottom-right reading),
/// `-x1 - y1` ascending for a vertical group (top-right-to-bottom-left).
pub fn assign_indices(arena: &GroupArena, root: NodeId, direction: Direction) -> Vec<usize> {
    let mut out = Vec::new();
    walk(arena, root, direction, &mut out);
    out
}

fn diagonal_key(b: crate::geometry::Bbox, direction: Direction) -> f64 {
    match direction {
        Direction::Horizontal => b.x0 - b.y1,
        Direction::Vertical => -b.x1 - b.y1,
    }
}

fn walk(arena: &GroupArena, id: NodeId, direction: Direction, out: &mut Vec<usize>) {
    match *arena.get(id) {
        GroupNode::Leaf { block, .. } => out.push(block),
        GroupNode::Branch { left, right, .. } => {
            let key = |n: NodeId| diagonal_key(arena.bbox(n), direction);
            let (first, second) = if key(left) <= key(right) { (left, right) } else { (right, left) };
            walk(arena, first, direction, out);
            walk(arena, second, direction, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Matrix;
    use crate::item::{Glyph, Item};
    use crate::test_util::dummy_font_ref;

    fn block_at(y0: f64, y1: f64) -> TextBlock {
        let g = Glyph::new_horizontal(Matrix::IDENTITY, dummy_font_ref(), 10.0, y1 - y0, y0, 10.0, "A");
        let line = crate::item::TextLine::new(vec![Item::Glyph(g)]);
        TextBlock::new(vec![line])
    }

    #[test]
    fn single_block_tree_is_just_a_leaf() {
        let blocks = vec![block_at(0.0, 10.0)];
        let arena = build_tree(&blocks, Direction::Horizontal);
        assert_eq!(arena.len(), 1);
        assert!(matches!(arena.get(arena.root()), GroupNode::Leaf { block: 0, .. }));
    }

    #[test]
    fn three_blocks_merge_into_a_single_root() {
        let blocks = vec![block_at(0.0, 10.0), block_at(20.0, 30.0), block_at(100.0, 110.0)];
        let arena = build_tree(&blocks, Direction::Horizontal);
        // 3 leaves + 2 branches = 5 nodes.
        assert_eq!(arena.len(), 5);
        assert!(matches!(arena.get(arena.root()), GroupNode::Branch { .. }));
    }

    #[test]
    fn horizontal_reading_order_visits_top_block_first() {
        let blocks = vec![block_at(0.0, 10.0), block_at(100.0, 110.0)];
        let arena = build_tree(&blocks, Direction::Horizontal);
        let order = assign_indices(&arena, arena.root(), Direction::Horizontal);
        assert_eq!(order, vec![1, 0], "the higher block (greater y1) reads first");
    }

    #[test]
    fn merge_cost_matches_the_spec_worked_example() {
        // Two equal-area blocks at (0,0)-(10,10) and (20,0)-(30,10): union
        // area 300, minus 100 and 100 leaves a distance of 100.
        let a = Bbox::new(0.0, 0.0, 10.0, 10.0);
        let b = Bbox::new(20.0, 0.0, 30.0, 10.0);
        assert_eq!(merge_cost(a, b), 100.0);
    }

    #[test]
    fn assign_indices_visits_every_block_exactly_once() {
        let blocks = vec![block_at(0.0, 10.0), block_at(20.0, 30.0), block_at(40.0, 50.0), block_at(60.0, 70.0)];
        let arena = build_tree(&blocks, Direction::Horizontal);
        let mut order = assign_indices(&arena, arena.root(), Direction::Horizontal);
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }
}
