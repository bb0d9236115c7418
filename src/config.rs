//! Tree configuration.
//!
//! A [`Config`] fixes the indexed region and the two subdivision parameters
//! for the lifetime of a tree. It can be loaded from JSON (or TOML with the
//! `toml` feature) and is validated before any tree is built from it.
use crate::error::{HotquadError, Result};
use hotquad_types::bbox::BoundingBox;
use serde::{Deserialize, Serialize};

/// Upper-left corner and extent of the indexed region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Region {
    /// New York City as covered by the yellow-cab trip records, with
    /// latitude on x and longitude on y.
    pub const NEW_YORK: Region = Region {
        x: 40.5,
        y: -74.25,
        width: 0.4,
        height: 0.55,
    };

    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn to_bounds(&self) -> BoundingBox {
        BoundingBox::new(self.x, self.y, self.width, self.height)
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err("Region origin must be finite".to_string());
        }
        if !self.width.is_finite() || !self.height.is_finite() {
            return Err("Region extent must be finite".to_string());
        }
        if self.to_bounds().is_degenerate() {
            return Err(format!(
                "Region must have positive width and height, got {}x{}",
                self.width, self.height
            ));
        }
        Ok(())
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::NEW_YORK
    }
}

/// Quadtree configuration
///
/// # Example
///
/// ```rust
/// use hotquad::Config;
///
/// let json = r#"{
///     "region": { "x": 0.0, "y": 0.0, "width": 100.0, "height": 100.0 },
///     "leaf_capacity": 8
/// }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.leaf_capacity, 8);
/// assert_eq!(config.max_depth, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub region: Region,

    /// Points a leaf holds before it subdivides
    #[serde(default = "Config::default_leaf_capacity")]
    pub leaf_capacity: usize,

    /// Deepest level a node may be created at; buckets there grow unbounded
    #[serde(default = "Config::default_max_depth")]
    pub max_depth: u32,
}

impl Config {
    /// Depth past which halving a region stops producing distinct `f64` edges
    /// for realistic extents.
    pub const DEEP_TREE_WARNING: u32 = 48;

    pub const fn default_leaf_capacity() -> usize {
        4
    }

    pub const fn default_max_depth() -> u32 {
        20
    }

    pub fn new(region: Region) -> Self {
        Self {
            region,
            ..Self::default()
        }
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    pub fn with_leaf_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Leaf capacity must be greater than zero");
        self.leaf_capacity = capacity;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        if max_depth > Self::DEEP_TREE_WARNING {
            log::warn!(
                "Max depth of {} is very deep; leaf boxes may become too small to split in f64",
                max_depth
            );
        }
        self.max_depth = max_depth;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        self.region.validate()?;

        if self.leaf_capacity == 0 {
            return Err("Leaf capacity must be greater than zero".to_string());
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate().map_err(HotquadError::InvalidConfig)?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str)?;
        config.validate().map_err(HotquadError::InvalidConfig)?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: Region::default(),
            leaf_capacity: Self::default_leaf_capacity(),
            max_depth: Self::default_max_depth(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.leaf_capacity, 4);
        assert_eq!(config.max_depth, 20);
        assert_eq!(config.region, Region::NEW_YORK);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let config = Config::new(Region::new(0.0, 0.0, 10.0, 20.0))
            .with_leaf_capacity(2)
            .with_max_depth(6);

        let json = config.to_json().unwrap();
        let parsed = Config::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let result = Config::from_json(r#"{"leaf_capacity": 4, "capacity": 4}"#);
        assert!(matches!(result, Err(HotquadError::Json(_))));
    }

    #[test]
    fn test_rejects_degenerate_region() {
        let json = r#"{"region": {"x": 0.0, "y": 0.0, "width": 0.0, "height": 1.0}}"#;
        assert!(matches!(
            Config::from_json(json),
            Err(HotquadError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_extent_lost_to_rounding() {
        // 1e6 + 1e-12 == 1e6, so the box has no interior.
        let region = Region::new(1e6, 0.0, 1e-12, 1.0);
        assert!(region.to_bounds().is_degenerate());
        assert!(region.validate().is_err());
        assert!(Region::new(1e6, 0.0, 1.0, 1.0).validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let config = Config {
            leaf_capacity: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_region() {
        let region = Region::new(f64::NAN, 0.0, 1.0, 1.0);
        assert!(region.validate().is_err());
        let region = Region::new(0.0, 0.0, f64::INFINITY, 1.0);
        assert!(region.validate().is_err());
    }

    #[test]
    #[should_panic(expected = "Leaf capacity must be greater than zero")]
    fn test_with_zero_capacity_panics() {
        let _ = Config::default().with_leaf_capacity(0);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml() {
        let toml_str = r#"
            leaf_capacity = 1
            max_depth = 5

            [region]
            x = 0.0
            y = 0.0
            width = 100.0
            height = 100.0
        "#;
        let config = Config::from_toml(toml_str).unwrap();
        assert_eq!(config.leaf_capacity, 1);
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.region.width, 100.0);
    }
}
