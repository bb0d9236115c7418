//! Point-region quadtree with density hotspot detection.
//!
//! ```rust
//! use hotquad::{HotspotFinder, Quadtree};
//!
//! let mut tree = Quadtree::with_params(0.0, 0.0, 100.0, 100.0, 1, 5)?;
//! tree.insert(10.0, 10.0)?;
//! tree.insert(90.0, 90.0)?;
//! tree.insert(95.0, 95.0)?;
//!
//! assert_eq!(tree.query_range(0.0, 0.0, 100.0, 100.0).len(), 3);
//!
//! let hotspots = HotspotFinder::new(&tree).find(1);
//! assert_eq!(hotspots[0].depth(), tree.max_depth_reached());
//! # Ok::<(), hotquad::HotquadError>(())
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod export;
pub mod hotspot;
pub mod trip;
pub mod tree;

pub use builder::QuadtreeBuilder;
pub use config::{Config, Region};
pub use error::{HotquadError, Result};
pub use hotspot::{Cluster, HotspotFinder};
pub use tree::{Node, NodeId, NodeKind, Quadtree};

pub use hotquad_types::{BoundingBox, Direction, NodeGeometry, Point, Quadrant};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{
        BoundingBox, Cluster, Config, Direction, HotquadError, HotspotFinder, NodeId, Point,
        Quadrant, Quadtree, QuadtreeBuilder, Region, Result,
    };
}
