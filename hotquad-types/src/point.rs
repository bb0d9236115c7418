use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// An immutable 2D coordinate.
///
/// Equality and ordering are exact floating-point comparisons: x is compared
/// first, y breaks ties. No tolerance is applied, so `(1.0, 2.0)` and
/// `(1.0, 2.0 + f64::EPSILON)` are distinct points.
///
/// # Examples
///
/// ```
/// use hotquad_types::point::Point;
///
/// let a = Point::new(1.0, 5.0);
/// let b = Point::new(2.0, 0.0);
/// assert!(a < b);
/// assert_eq!(a, Point::from((1.0, 5.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Both coordinates are finite (not NaN or infinite).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.x.partial_cmp(&other.x)? {
            Ordering::Equal => self.y.partial_cmp(&other.y),
            ordering => Some(ordering),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (f64, f64) {
    fn from(point: Point) -> Self {
        (point.x, point.y)
    }
}

impl From<geo::Point<f64>> for Point {
    fn from(point: geo::Point<f64>) -> Self {
        Self::new(point.x(), point.y())
    }
}

impl From<Point> for geo::Point<f64> {
    fn from(point: Point) -> Self {
        geo::Point::new(point.x, point.y)
    }
}

impl From<geo::Coord<f64>> for Point {
    fn from(coord: geo::Coord<f64>) -> Self {
        Self::new(coord.x, coord.y)
    }
}
