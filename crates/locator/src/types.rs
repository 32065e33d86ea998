use serde::{Deserialize, Serialize};

/// Integer pixel coordinate, origin at the top-left corner, x increasing
/// rightward and y increasing downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// The boundary of one foreground region as a closed polygon in traversal
/// order. Consecutive points are connected by straight segments, and the
/// last point connects back to the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contour {
    pub points: Vec<Point>,
}

impl Contour {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The smallest axis-aligned rectangle containing every point of the
    /// contour, or `None` for an empty contour.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let first = self.points.first()?;
        let mut min_x = first.x;
        let mut min_y = first.y;
        let mut max_x = first.x;
        let mut max_y = first.y;

        for point in &self.points[1..] {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        Some(BoundingBox {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        })
    }
}

/// Axis-aligned bounding rectangle in pixel units. `(x, y)` is the top-left
/// corner; a single-pixel region has width and height 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A traced contour tagged by the size filter. Rejected regions are kept so
/// callers can inspect the full candidate set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionDecision {
    pub contour: Contour,
    pub bounding_box: BoundingBox,
    pub accepted: bool,
}
