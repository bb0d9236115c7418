//! Geometry export for visualization.
//!
//! Trees and hotspot results are flattened into [`NodeGeometry`] records.
//! Hotspot exports separate consecutive clusters with a `null` entry so a
//! consumer can recover cluster boundaries from a flat array.

use crate::error::Result;
use crate::hotspot::Cluster;
use crate::tree::{NodeId, Quadtree};
use hotquad_types::geometry::NodeGeometry;
use std::fmt;
use std::io::Write;

/// Geometry of every node, parents before children.
pub fn tree_geometries(tree: &Quadtree) -> Vec<NodeGeometry> {
    tree.pre_order()
        .map(|(_, node)| NodeGeometry::from(node.bounds()))
        .collect()
}

/// Flattened cluster membership with `None` between clusters.
pub fn hotspot_records(tree: &Quadtree, clusters: &[Cluster]) -> Vec<Option<NodeGeometry>> {
    let mut records = Vec::new();
    for (i, cluster) in clusters.iter().enumerate() {
        if i > 0 {
            records.push(None);
        }
        records.extend(cluster.geometries(tree).into_iter().map(Some));
    }
    records
}

pub fn write_tree_json<W: Write>(tree: &Quadtree, writer: W) -> Result<()> {
    serde_json::to_writer(writer, &tree_geometries(tree))?;
    Ok(())
}

pub fn write_hotspots_json<W: Write>(tree: &Quadtree, clusters: &[Cluster], writer: W) -> Result<()> {
    serde_json::to_writer(writer, &hotspot_records(tree, clusters))?;
    Ok(())
}

/// Box-drawing outline of the tree, one node per line.
pub fn render_tree(tree: &Quadtree) -> String {
    let mut out = String::new();
    render_node(tree, tree.root(), "", true, &mut out);
    out
}

fn render_node(tree: &Quadtree, id: NodeId, prefix: &str, is_tail: bool, out: &mut String) {
    let node = &tree[id];
    out.push_str(prefix);
    out.push_str(if is_tail { "└── " } else { "├── " });
    out.push_str(&format!("node={{{}}}", node.bounds()));
    if node.is_leaf() {
        out.push_str(", [");
        for point in node.points() {
            out.push_str(&format!("{}, ", point));
        }
        out.push(']');
    }
    out.push('\n');

    if let Some(children) = node.children() {
        let child_prefix = format!("{}{}", prefix, if is_tail { "    " } else { "│   " });
        for (i, &child) in children.iter().enumerate() {
            render_node(tree, child, &child_prefix, i == children.len() - 1, out);
        }
    }
}

impl fmt::Display for Quadtree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_tree(self))
    }
}

#[cfg(feature = "geojson")]
pub mod geojson {
    //! GeoJSON conversion for node geometries.

    use super::*;
    use ::geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
    use serde_json::json;

    fn node_feature(tree: &Quadtree, id: NodeId, cluster: Option<usize>) -> Feature {
        let node = &tree[id];
        let polygon = node.bounds().to_rect().to_polygon();
        let ring: Vec<Vec<f64>> = polygon
            .exterior()
            .coords()
            .map(|coord| vec![coord.x, coord.y])
            .collect();

        let mut properties = JsonObject::new();
        properties.insert("depth".to_string(), json!(node.depth()));
        properties.insert("points".to_string(), json!(node.len()));
        if let Some(cluster) = cluster {
            properties.insert("cluster".to_string(), json!(cluster));
        }

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }

    /// Every node as a polygon feature carrying its depth.
    pub fn tree_to_geojson(tree: &Quadtree) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: tree
                .pre_order()
                .map(|(id, _)| node_feature(tree, id, None))
                .collect(),
            foreign_members: None,
        }
    }

    /// Cluster members as polygon features tagged with their cluster rank.
    pub fn hotspots_to_geojson(tree: &Quadtree, clusters: &[Cluster]) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: clusters
                .iter()
                .enumerate()
                .flat_map(|(rank, cluster)| {
                    cluster
                        .nodes()
                        .iter()
                        .map(move |&id| node_feature(tree, id, Some(rank)))
                })
                .collect(),
            foreign_members: None,
        }
    }

    pub fn write_geojson<W: Write>(collection: &FeatureCollection, writer: W) -> Result<()> {
        serde_json::to_writer(writer, collection)?;
        Ok(())
    }
}
