use crate::geometry::{Bbox, Point};
use crate::item::HasBbox;

/// A stroked or filled polygon. Only its bbox participates in layout; the
/// point list and line width are carried through for the downstream
/// renderer/debug consumer.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    bbox: Bbox,
    pub linewidth: f64,
    pub pts: Vec<Point>,
}

impl Polygon {
    /// Panics if `pts` is empty — a polygon with no points has no bbox.
    pub fn new(linewidth: f64, pts: Vec<Point>) -> Self {
        let bbox = Bbox::from_points(pts.iter().copied());
        Self { bbox, linewidth, pts }
    }

    pub fn points_str(&self) -> String {
        self.pts.iter().map(|p| format!("{:.3},{:.3}", p.x, p.y)).collect::<Vec<_>>().join(",")
    }
}

impl HasBbox for Polygon {
    fn bbox(&self) -> Bbox {
        self.bbox
    }
}

/// A two-point polygon — kept as its own [`Item`](crate::item::Item)
/// variant (rather than requiring downstream consumers to notice a
/// `Polygon` happens to have exactly two points) but built from the same
/// bounding-rectangle construction `Polygon` uses.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    bbox: Bbox,
    pub linewidth: f64,
    pub p0: Point,
    pub p1: Point,
}

impl Line {
    pub fn new(linewidth: f64, p0: Point, p1: Point) -> Self {
        let bbox = Bbox::from_points([p0, p1]);
        Self { bbox, linewidth, p0, p1 }
    }
}

impl HasBbox for Line {
    fn bbox(&self) -> Bbox {
        self.bbox
    }
}

/// An axis-aligned stroked or filled rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct Rect {
    bbox: Bbox,
    pub linewidth: f64,
}

impl Rect {
    pub fn new(linewidth: f64, bbox: Bbox) -> Self {
        Self { bbox, linewidth }
    }

    /// The four corners, counter-clockwise from `(x0, y0)`, matching how
    /// the original PDF layout engine expands a rect into a four-point
    /// polygon for its debug string.
    pub fn corners(&self) -> [Point; 4] {
        let b = self.bbox;
        [
            Point::new(b.x0, b.y0),
            Point::new(b.x1, b.y0),
            Point::new(b.x1, b.y1),
            Point::new(b.x0, b.y1),
        ]
    }
}

impl HasBbox for Rect {
    fn bbox(&self) -> Bbox {
        self.bbox
    }
}

/// A decoded raster image. The payload is opaque to this crate — it is
/// never decoded, resampled, or inspected, only carried through layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    bbox: Bbox,
    pub name: String,
    pub subtype: String,
    pub src_size: (u32, u32),
    pub data: Vec<u8>,
}

impl Image {
    pub fn new(name: impl Into<String>, subtype: impl Into<String>, src_size: (u32, u32), bbox: Bbox, data: Vec<u8>) -> Self {
        Self { bbox, name: name.into(), subtype: subtype.into(), src_size, data }
    }
}

impl HasBbox for Image {
    fn bbox(&self) -> Bbox {
        self.bbox
    }
}
