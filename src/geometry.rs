//! Axis-aligned bounding boxes, affine matrices, and the overlap/distance
//! predicates the clustering algorithms are built on.

/// A point in PDF user space (y-up).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A 6-component affine matrix `(a, b, c, d, e, f)` mapping `(x, y)` to
/// `(a*x + c*y + e, b*x + d*y + f)`.
///
/// Stored as a value record and passed by value, never wrapped in a general
/// 3x3 matrix type: the PDF content stream operators this comes from only
/// ever produce this shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    fn as_transform(self) -> euclid::Transform2D<f64, euclid::UnknownUnit, euclid::UnknownUnit> {
        euclid::Transform2D::new(self.a, self.b, self.c, self.d, self.e, self.f)
    }

    /// Applies the full affine transform, including translation.
    pub fn apply_pt(self, p: Point) -> Point {
        let p = self.as_transform().transform_point(euclid::Point2D::new(p.x, p.y));
        Point::new(p.x, p.y)
    }

    /// Applies the linear part only (translation omitted), used for sizing
    /// vectors such as glyph displacement and advance.
    pub fn apply_norm(self, p: Point) -> Point {
        let v = self.as_transform().transform_vector(euclid::Vector2D::new(p.x, p.y));
        Point::new(v.x, v.y)
    }

    /// A glyph transformed by this matrix preserves orientation iff
    /// `a*d > 0` and `b*c <= 0`.
    pub fn is_upright(self) -> bool {
        0.0 < self.a * self.d && self.b * self.c <= 0.0
    }
}

/// An axis-aligned bounding box, always canonicalized so `x0 <= x1` and
/// `y0 <= y1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bbox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Bbox {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        let (x0, x1) = if x1 < x0 { (x1, x0) } else { (x0, x1) };
        let (y0, y1) = if y1 < y0 { (y1, y0) } else { (y0, y1) };
        let bbox = Self { x0, y0, x1, y1 };
        debug_assert!(bbox.x0 <= bbox.x1 && bbox.y0 <= bbox.y1, "bbox failed to canonicalize: {bbox:?}");
        bbox
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Computes the maximal rectangle covering every point in `pts`.
    ///
    /// Panics if `pts` is empty; there is no meaningful bbox for zero points.
    pub fn from_points(pts: impl IntoIterator<Item = Point>) -> Self {
        let mut x0 = f64::INFINITY;
        let mut y0 = f64::INFINITY;
        let mut x1 = f64::NEG_INFINITY;
        let mut y1 = f64::NEG_INFINITY;
        let mut any = false;
        for p in pts {
            any = true;
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        assert!(any, "Bbox::from_points called with no points");
        Bbox::new(x0, y0, x1, y1)
    }

    /// Union of a non-empty set of bboxes; used by container fixation.
    pub fn union_all(boxes: impl IntoIterator<Item = Bbox>) -> Option<Bbox> {
        let mut iter = boxes.into_iter();
        let first = iter.next()?;
        Some(iter.fold(first, |acc, b| acc.union(b)))
    }

    pub fn union(self, other: Bbox) -> Bbox {
        Bbox::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }

    pub fn is_hoverlap(&self, other: &Bbox) -> bool {
        other.x0 <= self.x1 && self.x0 <= other.x1
    }

    pub fn is_voverlap(&self, other: &Bbox) -> bool {
        other.y0 <= self.y1 && self.y0 <= other.y1
    }

    /// 0 if horizontally overlapping, else the gap between the two boxes.
    pub fn hdistance(&self, other: &Bbox) -> f64 {
        if self.is_hoverlap(other) {
            0.0
        } else {
            (self.x0 - other.x1).abs().min((self.x1 - other.x0).abs())
        }
    }

    /// 0 if not horizontally overlapping, else the *shorter overhang* of the
    /// two boxes — not the intersection width. This definition is load
    /// bearing: thresholds throughout the line builder are calibrated
    /// against it, not against geometric intersection width.
    pub fn hoverlap(&self, other: &Bbox) -> f64 {
        if self.is_hoverlap(other) {
            (self.x0 - other.x1).abs().min((self.x1 - other.x0).abs())
        } else {
            0.0
        }
    }

    /// 0 if vertically overlapping, else the gap between the two boxes.
    pub fn vdistance(&self, other: &Bbox) -> f64 {
        if self.is_voverlap(other) {
            0.0
        } else {
            (self.y0 - other.y1).abs().min((self.y1 - other.y0).abs())
        }
    }

    /// See [`Bbox::hoverlap`]; the vertical counterpart of the same
    /// shorter-overhang definition.
    pub fn voverlap(&self, other: &Bbox) -> f64 {
        if self.is_voverlap(other) {
            (self.y0 - other.y1).abs().min((self.y1 - other.y0).abs())
        } else {
            0.0
        }
    }

    pub fn three_decimals(&self) -> String {
        format!("{:.3},{:.3},{:.3},{:.3}", self.x0, self.y0, self.x1, self.y1)
    }
}

/// Sorts `items` by `key`, breaking ties by each item's original position in
/// the slice. `Vec::sort_by` is already stable, so this is a thin,
/// self-documenting wrapper making that reliance explicit at each call
/// site — several algorithms in this crate depend on tie-breaking by
/// original input order for deterministic output.
pub fn sort_by_key_stable<T, K: PartialOrd>(items: &mut [T], mut key: impl FnMut(&T) -> K) {
    items.sort_by(|a, b| key(a).partial_cmp(&key(b)).unwrap_or(std::cmp::Ordering::Equal));
}
