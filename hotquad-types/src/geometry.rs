use crate::bbox::BoundingBox;
use serde::{Deserialize, Serialize};

/// One node's bounding box in `min`/`max` form, the record consumed by
/// visualization front ends.
///
/// # Examples
///
/// ```
/// use hotquad_types::bbox::BoundingBox;
/// use hotquad_types::geometry::NodeGeometry;
///
/// let geometry = NodeGeometry::from(&BoundingBox::new(0.0, 0.0, 2.0, 4.0));
/// assert_eq!((geometry.x2, geometry.y2), (2.0, 4.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeGeometry {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub depth: u32,
}

impl From<&BoundingBox> for NodeGeometry {
    fn from(bbox: &BoundingBox) -> Self {
        Self {
            x1: bbox.min_x(),
            y1: bbox.min_y(),
            x2: bbox.max_x(),
            y2: bbox.max_y(),
            depth: bbox.depth,
        }
    }
}

impl From<BoundingBox> for NodeGeometry {
    fn from(bbox: BoundingBox) -> Self {
        Self::from(&bbox)
    }
}
