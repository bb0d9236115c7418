use crate::point::Point;
use crate::quadrant::Quadrant;
use geo::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2D axis-aligned bounding box tagged with its subdivision depth.
///
/// The box spans from its upper-left `min` corner to its `max` corner. Point
/// containment is half-open: the `max` edges are excluded. Quadrants reuse
/// the parent's corners and a shared center, so the four children of a box
/// partition it exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Upper-left corner
    pub min: Point,
    pub max: Point,
    /// Subdivision level, the root region is 0
    pub depth: u32,
}

impl BoundingBox {
    /// Create a depth-0 box from its upper-left corner and extent.
    ///
    /// # Examples
    ///
    /// ```
    /// use hotquad_types::bbox::BoundingBox;
    ///
    /// let bbox = BoundingBox::new(40.5, -74.25, 0.4, 0.55);
    /// assert_eq!(bbox.depth, 0);
    /// ```
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::with_depth(Point::new(x, y), width, height, 0)
    }

    pub fn with_depth(origin: Point, width: f64, height: f64, depth: u32) -> Self {
        let max = Point::new(origin.x + width, origin.y + height);
        Self::from_corners(origin, max, depth)
    }

    pub fn from_corners(min: Point, max: Point, depth: u32) -> Self {
        Self { min, max, depth }
    }

    /// Upper-left corner, same as [`BoundingBox::min`].
    pub fn origin(&self) -> Point {
        self.min
    }

    pub fn min(&self) -> Point {
        self.min
    }

    pub fn max(&self) -> Point {
        self.max
    }

    pub fn min_x(&self) -> f64 {
        self.min.x
    }

    pub fn min_y(&self) -> f64 {
        self.min.y
    }

    pub fn max_x(&self) -> f64 {
        self.max.x
    }

    pub fn max_y(&self) -> f64 {
        self.max.y
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Split point shared by the four quadrants.
    pub fn center(&self) -> Point {
        Point::new(
            self.min.x + self.width() / 2.0,
            self.min.y + self.height() / 2.0,
        )
    }

    /// A box is degenerate when it cannot hold any point.
    pub fn is_degenerate(&self) -> bool {
        !(self.max.x > self.min.x && self.max.y > self.min.y)
    }

    /// Half-open containment test: points on the `max` edges are outside.
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min_x()
            && point.x < self.max_x()
            && point.y >= self.min_y()
            && point.y < self.max_y()
    }

    /// Check if `other` lies completely inside this box (edges may touch).
    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        other.min_x() >= self.min_x()
            && other.max_x() <= self.max_x()
            && other.min_y() >= self.min_y()
            && other.max_y() <= self.max_y()
    }

    /// Check if this box intersects `other`.
    ///
    /// Boxes that merely share an edge count as intersecting; only a strict
    /// gap on either axis separates them.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        if self.contains_box(other) || other.contains_box(self) {
            return true;
        }

        if self.max_x() < other.min_x() || self.min_x() > other.max_x() {
            return false;
        }
        if self.max_y() < other.min_y() || self.min_y() > other.max_y() {
            return false;
        }

        true
    }

    /// The child box occupying `quadrant`, one level deeper.
    ///
    /// Outer edges are copied from `self`, never recomputed.
    pub fn quadrant(&self, quadrant: Quadrant) -> BoundingBox {
        let center = self.center();
        let (min_x, max_x) = if quadrant.is_west() {
            (self.min.x, center.x)
        } else {
            (center.x, self.max.x)
        };
        let (min_y, max_y) = if quadrant.is_north() {
            (self.min.y, center.y)
        } else {
            (center.y, self.max.y)
        };

        BoundingBox::from_corners(
            Point::new(min_x, min_y),
            Point::new(max_x, max_y),
            self.depth + 1,
        )
    }

    /// All four child boxes in `[NW, NE, SW, SE]` order.
    pub fn quadrants(&self) -> [BoundingBox; 4] {
        Quadrant::ALL.map(|quadrant| self.quadrant(quadrant))
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(
            geo::coord! { x: self.min_x(), y: self.min_y() },
            geo::coord! { x: self.max_x(), y: self.max_y() },
        )
    }
}

impl From<Rect> for BoundingBox {
    fn from(rect: Rect) -> Self {
        Self::from_corners(rect.min().into(), rect.max().into(), 0)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, height={}, width={}, depth={})",
            self.min,
            self.height(),
            self.width(),
            self.depth
        )
    }
}
