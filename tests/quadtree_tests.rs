use hotquad::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_points(seed: u64, count: usize, extent: f64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Point::new(rng.gen_range(0.0..extent), rng.gen_range(0.0..extent)))
        .collect()
}

fn sorted(mut points: Vec<Point>) -> Vec<Point> {
    points.sort_by(|a, b| a.partial_cmp(b).unwrap());
    points
}

/// Test 1: The five-point walkthrough
#[test]
fn test_five_point_walkthrough() {
    init_logging();
    let mut tree = Quadtree::builder()
        .region(0.0, 0.0, 100.0, 100.0)
        .leaf_capacity(1)
        .max_depth(5)
        .build()
        .expect("Failed to build tree");

    let points = [
        (10.0, 10.0),
        (90.0, 10.0),
        (10.0, 90.0),
        (90.0, 90.0),
        (95.0, 95.0),
    ];
    for (x, y) in points {
        assert!(tree.insert(x, y).expect("Insert failed"));
    }

    let root = tree.root();
    assert!(!tree[root].is_leaf());
    let se = tree[root].child(Quadrant::SouthEast).unwrap();
    assert!(!tree[se].is_leaf(), "the south-east corner holds two points");

    let all = tree.query_range(0.0, 0.0, 100.0, 100.0);
    assert_eq!(all.len(), 5);

    let corner = sorted(tree.query_range(85.0, 85.0, 15.0, 15.0));
    assert_eq!(corner, vec![Point::new(90.0, 90.0), Point::new(95.0, 95.0)]);
}

/// Test 2: Every accepted point is found exactly once
#[test]
fn test_containment_round_trip() {
    init_logging();
    let mut tree = Quadtree::with_params(0.0, 0.0, 1024.0, 1024.0, 4, 16).unwrap();
    let points = random_points(7, 2_000, 1024.0);

    let mut accepted = Vec::new();
    for point in &points {
        if tree.insert_point(*point).unwrap() {
            accepted.push(*point);
        }
    }

    assert_eq!(tree.len(), accepted.len());
    let found = tree.query_range(0.0, 0.0, 1024.0, 1024.0);
    assert_eq!(sorted(found), sorted(accepted));
}

/// Test 3: Range queries agree with a linear scan
#[test]
fn test_range_queries_against_scan() {
    let mut tree = Quadtree::with_params(0.0, 0.0, 1024.0, 1024.0, 2, 12).unwrap();
    let points = random_points(11, 1_000, 1024.0);
    for point in &points {
        tree.insert_point(*point).unwrap();
    }

    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..50 {
        let range = BoundingBox::new(
            rng.gen_range(0.0..1024.0),
            rng.gen_range(0.0..1024.0),
            rng.gen_range(1.0..300.0),
            rng.gen_range(1.0..300.0),
        );
        let expected: Vec<Point> = points.iter().copied().filter(|p| range.contains(p)).collect();
        assert_eq!(sorted(tree.query(&range)), sorted(expected));
    }
}

/// Test 4: Duplicates are rejected at any depth
#[test]
fn test_duplicates_rejected() {
    let mut tree = Quadtree::with_params(0.0, 0.0, 1024.0, 1024.0, 1, 16).unwrap();
    let points = random_points(3, 200, 1024.0);
    for point in &points {
        tree.insert_point(*point).unwrap();
    }
    let len = tree.len();
    let nodes = tree.node_count();

    for point in &points {
        assert!(!tree.insert_point(*point).unwrap());
    }
    assert_eq!(tree.len(), len);
    assert_eq!(tree.node_count(), nodes);
}

/// Test 5: No node is created beyond the depth limit
#[test]
fn test_depth_bound() {
    let mut tree = Quadtree::with_params(0.0, 0.0, 1.0, 1.0, 1, 6).unwrap();
    for i in 0..500 {
        let offset = i as f64 * 1e-7;
        assert!(tree.insert(0.25 + offset, 0.25 + offset).unwrap());
    }

    assert_eq!(tree.max_depth_reached(), 6);
    for (_, node) in tree.pre_order() {
        assert!(node.depth() <= 6);
        if node.depth() < 6 {
            assert!(node.len() <= 1);
        }
    }
}

/// Test 6: Removing what was added collapses the tree again
#[test]
fn test_remove_merge_symmetry() {
    init_logging();
    let mut tree = Quadtree::with_params(0.0, 0.0, 100.0, 100.0, 4, 20).unwrap();

    for (x, y) in [(10.0, 10.0), (60.0, 10.0), (10.0, 60.0), (60.0, 60.0), (70.0, 70.0)] {
        tree.insert(x, y).unwrap();
    }
    assert!(!tree[tree.root()].is_leaf());

    assert!(tree.remove(70.0, 70.0));
    assert!(tree.remove(60.0, 60.0));
    assert!(tree[tree.root()].is_leaf());
    assert_eq!(tree.node_count(), 1);
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.query_range(0.0, 0.0, 100.0, 100.0).len(), 3);
}

/// Test 7: Removing everything and compacting leaves a single empty root
#[test]
fn test_remove_all_then_compact() {
    let mut tree = Quadtree::with_params(0.0, 0.0, 1024.0, 1024.0, 3, 14).unwrap();
    let points = random_points(21, 500, 1024.0);
    for point in &points {
        tree.insert_point(*point).unwrap();
    }

    for point in &points {
        assert!(tree.remove_point(*point));
    }
    assert!(tree.is_empty());
    assert!(tree.query_range(0.0, 0.0, 1024.0, 1024.0).is_empty());

    tree.compact();
    assert_eq!(tree.node_count(), 1);
    assert!(tree[tree.root()].is_leaf());
}

/// Test 8: Same-depth neighbors point back at each other
#[test]
fn test_neighbor_symmetry() {
    let mut tree = Quadtree::with_params(0.0, 0.0, 1024.0, 1024.0, 1, 7).unwrap();
    for point in random_points(5, 300, 1024.0) {
        tree.insert_point(point).unwrap();
    }

    let mut checked = 0;
    for (id, node) in tree.pre_order() {
        for direction in Direction::ALL {
            match tree.neighbor(id, direction) {
                Some(other) if tree[other].depth() == node.depth() => {
                    assert_eq!(tree.neighbor(other, direction.opposite()), Some(id));
                    checked += 1;
                }
                Some(other) => assert!(tree[other].is_leaf()),
                None => {
                    let bounds = node.bounds();
                    let outer = tree.bounds();
                    let on_edge = match direction {
                        Direction::North => bounds.min_y() == outer.min_y(),
                        Direction::South => bounds.max_y() == outer.max_y(),
                        Direction::West => bounds.min_x() == outer.min_x(),
                        Direction::East => bounds.max_x() == outer.max_x(),
                    };
                    assert!(on_edge, "{} has no {:?} neighbor", bounds, direction);
                }
            }
        }
    }
    assert!(checked > 0);
}

/// Test 9: Neighbors share an edge with the node they were asked for
#[test]
fn test_neighbors_are_adjacent() {
    let mut tree = Quadtree::with_params(0.0, 0.0, 1024.0, 1024.0, 2, 8).unwrap();
    for point in random_points(17, 400, 1024.0) {
        tree.insert_point(point).unwrap();
    }

    for (id, node) in tree.pre_order() {
        let bounds = node.bounds();
        let [north, east, south, west] = tree.neighbors(id);
        if let Some(n) = north {
            assert_eq!(tree[n].bounds().max_y(), bounds.min_y());
        }
        if let Some(e) = east {
            assert_eq!(tree[e].bounds().min_x(), bounds.max_x());
        }
        if let Some(s) = south {
            assert_eq!(tree[s].bounds().min_y(), bounds.max_y());
        }
        if let Some(w) = west {
            assert_eq!(tree[w].bounds().max_x(), bounds.min_x());
        }
    }
}

/// Test 10: Trees built from a config file match the builder
#[test]
fn test_config_round_trip() {
    let config = Config::new(Region::new(0.0, 0.0, 64.0, 32.0))
        .with_leaf_capacity(2)
        .with_max_depth(9);
    let json = config.to_json().unwrap();
    let loaded = Config::from_json(&json).unwrap();
    assert_eq!(loaded, config);

    let tree = QuadtreeBuilder::new().config(loaded).build().unwrap();
    assert_eq!(tree.leaf_capacity(), 2);
    assert_eq!(tree.max_depth(), 9);
    assert_eq!(*tree.bounds(), BoundingBox::new(0.0, 0.0, 64.0, 32.0));
}

/// Test 11: The default tree covers the trip data region
#[test]
fn test_default_region() {
    let mut tree = Quadtree::builder().build().unwrap();
    assert_eq!(tree.leaf_capacity(), 4);
    assert_eq!(tree.max_depth(), 20);

    // Times Square, as (latitude, longitude).
    assert!(tree.insert(40.758, -73.9855).unwrap());
    // London is outside.
    assert!(!tree.insert(51.5074, -0.1278).unwrap());
}
