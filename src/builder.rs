//! Tree builder for flexible configuration
//!
//! The builder collects a region and subdivision parameters, validates them
//! once, and produces an empty [`Quadtree`].

use crate::config::{Config, Region};
use crate::error::Result;
use crate::tree::Quadtree;

/// Builder for a quadtree with a custom region, leaf capacity and depth limit.
#[derive(Debug, Clone, Default)]
pub struct QuadtreeBuilder {
    config: Config,
}

impl QuadtreeBuilder {
    /// Create a builder over the default region with default parameters.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Set the indexed region by its upper-left corner and extent.
    pub fn region(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.config.region = Region::new(x, y, width, height);
        self
    }

    /// Set the number of points a leaf holds before it subdivides.
    pub fn leaf_capacity(mut self, capacity: usize) -> Self {
        self.config.leaf_capacity = capacity;
        self
    }

    /// Set the deepest level a node may be created at.
    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.config = self.config.with_max_depth(max_depth);
        self
    }

    /// Replace every setting with `config`.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Build the tree. Fails if the region is degenerate or the capacity is zero.
    pub fn build(self) -> Result<Quadtree> {
        Quadtree::from_config(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HotquadError;

    #[test]
    fn test_builder_default() {
        let tree = QuadtreeBuilder::new().build().unwrap();
        assert_eq!(tree.leaf_capacity(), 4);
        assert_eq!(tree.max_depth(), 20);
        assert_eq!(tree.bounds().origin().x, Region::NEW_YORK.x);
    }

    #[test]
    fn test_builder_custom() {
        let tree = QuadtreeBuilder::new()
            .region(0.0, 0.0, 100.0, 50.0)
            .leaf_capacity(1)
            .max_depth(5)
            .build()
            .unwrap();

        assert_eq!(tree.leaf_capacity(), 1);
        assert_eq!(tree.max_depth(), 5);
        assert_eq!(tree.bounds().width(), 100.0);
        assert_eq!(tree.bounds().height(), 50.0);
        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn test_builder_from_config() {
        let config = Config::new(Region::new(-1.0, -1.0, 2.0, 2.0)).with_leaf_capacity(8);
        let tree = QuadtreeBuilder::new().config(config).build().unwrap();
        assert_eq!(tree.leaf_capacity(), 8);
    }

    #[test]
    fn test_builder_rejects_invalid() {
        let result = QuadtreeBuilder::new().region(0.0, 0.0, -5.0, 5.0).build();
        assert!(matches!(result, Err(HotquadError::InvalidConfig(_))));

        let result = QuadtreeBuilder::new().leaf_capacity(0).build();
        assert!(matches!(result, Err(HotquadError::InvalidConfig(_))));
    }
}
