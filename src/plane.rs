//! A spatial index over axis-aligned bboxes, queried by overlapping
//! rectangle. Grounded in the source layout engine's `Plane` class: each
//! item contributes two `(coordinate, id)` entries per axis (one for its
//! near edge, one for its far edge) into a single coordinate-sorted
//! sequence per axis, and a query does a binary search *against that same
//! sorted coordinate* on each axis, whose intersection gives the candidates
//! actually inside the query rect.

use crate::geometry::Bbox;

/// A handle into a [`Plane`], returned by [`Plane::insert`] and echoed back
/// by [`Plane::find`]. Opaque outside this module: callers correlate it with
/// their own item collection by index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlaneId(usize);

/// One `(coordinate, id)` entry in an axis's sorted sequence. Each inserted
/// item contributes exactly two of these per axis (its near and far edge),
/// so the binary search below always runs against the field the sequence
/// is actually sorted by — unlike searching an x0-sorted sequence for an x1
/// predicate, which is unsound whenever item widths vary.
#[derive(Clone, Copy)]
struct AxisEntry {
    key: f64,
    id: usize,
}

/// Sorted-sequence spatial index.
///
/// `xs` holds two entries per item — `(x0, id)` and `(x1, id)` — sorted by
/// `key`; `ys` is the same for `(y0, id)`/`(y1, id)`. A query binary-searches
/// each sequence for the half-open slice of entries whose key falls inside
/// the query rect's span on that axis, then intersects the two candidate id
/// sets — exactly the two-pass approach `Plane.find` in the source engine
/// uses instead of an R-tree, since bboxes in one page are few enough that
/// sorted-array binary search wins on simplicity.
pub struct Plane {
    boxes: Vec<Bbox>,
    xs: Vec<AxisEntry>,
    ys: Vec<AxisEntry>,
    live: usize,
}

impl Plane {
    pub fn new() -> Self {
        Self { boxes: Vec::new(), xs: Vec::new(), ys: Vec::new(), live: 0 }
    }

    /// Inserts `bbox`, returning a stable handle for later lookup via
    /// [`Plane::find`]'s results.
    pub fn insert(&mut self, bbox: Bbox) -> PlaneId {
        let idx = self.boxes.len();
        self.boxes.push(bbox);
        self.live += 1;

        let x0_pos = self.xs.partition_point(|e| e.key < bbox.x0);
        self.xs.insert(x0_pos, AxisEntry { key: bbox.x0, id: idx });
        let x1_pos = self.xs.partition_point(|e| e.key < bbox.x1);
        self.xs.insert(x1_pos, AxisEntry { key: bbox.x1, id: idx });

        let y0_pos = self.ys.partition_point(|e| e.key < bbox.y0);
        self.ys.insert(y0_pos, AxisEntry { key: bbox.y0, id: idx });
        let y1_pos = self.ys.partition_point(|e| e.key < bbox.y1);
        self.ys.insert(y1_pos, AxisEntry { key: bbox.y1, id: idx });

        PlaneId(idx)
    }

    /// Removes a previously-inserted entry. Used by the line and block
    /// builders once an item has been consumed into a group and must no
    /// longer be offered as a neighbor candidate.
    pub fn remove(&mut self, id: PlaneId) {
        let before = self.xs.len();
        self.xs.retain(|e| e.id != id.0);
        self.ys.retain(|e| e.id != id.0);
        if self.xs.len() != before {
            self.live -= 1;
        }
    }

    /// Returns the ids of every entry whose bbox overlaps `rect` on both
    /// axes, in ascending insertion-index order (matching the source
    /// engine's `Plane.find`, which yields objects in the order they were
    /// added rather than in any spatial order).
    pub fn find(&self, rect: Bbox) -> Vec<PlaneId> {
        let x_lo = self.xs.partition_point(|e| e.key < rect.x0);
        let x_hi = self.xs.partition_point(|e| e.key <= rect.x1);
        let x_candidates: fxhash::FxHashSet<usize> = self.xs[x_lo..x_hi].iter().map(|e| e.id).collect();

        let y_lo = self.ys.partition_point(|e| e.key < rect.y0);
        let y_hi = self.ys.partition_point(|e| e.key <= rect.y1);
        let mut hits: Vec<usize> =
            self.ys[y_lo..y_hi].iter().map(|e| e.id).filter(|id| x_candidates.contains(id)).collect();

        hits.sort_unstable();
        hits.dedup();
        hits.into_iter().map(PlaneId).collect()
    }

    pub fn bbox_of(&self, id: PlaneId) -> Bbox {
        self.boxes[id.0]
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn len(&self) -> usize {
        self.live
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::new()
    }
}
