//! # hotquad-types
//!
//! Core spatial value types for the hotquad quadtree.
//!
//! This crate provides the plain, serializable building blocks shared by the
//! index and its collaborators:
//!
//! - **Point**: an exact 2D coordinate with x-then-y ordering
//! - **BoundingBox**: an axis-aligned region with a subdivision depth
//! - **Quadrant** / **Direction**: child slots and neighbor directions
//! - **NodeGeometry**: the export record describing one node's box
//!
//! All types are serializable with Serde and convert to the `geo` crate's
//! geometric primitives.
//!
//! ## Examples
//!
//! ```rust
//! use hotquad_types::bbox::BoundingBox;
//! use hotquad_types::point::Point;
//!
//! let region = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
//! assert!(region.contains(&Point::new(10.0, 10.0)));
//! assert!(!region.contains(&Point::new(100.0, 10.0)));
//! ```

pub mod bbox;
pub mod geometry;
pub mod point;
pub mod quadrant;

pub use bbox::BoundingBox;
pub use geometry::NodeGeometry;
pub use point::Point;
pub use quadrant::{Direction, Quadrant};
