//! Property-based tests for the geometry pipeline.
//!
//! Uses proptest to generate random networks and box pairs, then checks
//! the structural invariants: extent containment, affine corner
//! exactness, round-trip identity, and build determinism.

use proptest::prelude::*;
use roadweb_core::bbox::BoundingBox;
use roadweb_core::builder::build_world;
use roadweb_core::config::SimConfig;
use roadweb_core::id::NodeId;
use roadweb_core::model::{Network, NetworkNode, NetworkWay};
use roadweb_core::reproject::{DegenerateAxisPolicy, Point, reproject};

// ===========================================================================
// Generators
// ===========================================================================

/// A finite lon/lat coordinate pair.
fn arb_coord() -> impl Strategy<Value = (f64, f64)> {
    (-180.0..180.0f64, -90.0..90.0f64)
}

/// A non-empty node set with distinct ids.
fn arb_nodes(max: usize) -> impl Strategy<Value = Vec<NetworkNode>> {
    proptest::collection::vec(arb_coord(), 1..=max).prop_map(|coords| {
        coords
            .into_iter()
            .enumerate()
            .map(|(i, (lon, lat))| NetworkNode {
                id: NodeId(i as i64),
                lon,
                lat,
            })
            .collect()
    })
}

/// A bounding box with at least `min_span` extent on both axes, in
/// either axis orientation.
fn arb_box(min_span: f64) -> impl Strategy<Value = BoundingBox> {
    (
        -1000.0..1000.0f64,
        -1000.0..1000.0f64,
        min_span..500.0f64,
        min_span..500.0f64,
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(x, y, w, h, flip_x, flip_y)| {
            let (min_x, max_x) = if flip_x { (x + w, x) } else { (x, x + w) };
            let (min_y, max_y) = if flip_y { (y + h, y) } else { (y, y + h) };
            BoundingBox::new(min_x, min_y, max_x, max_y)
        })
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * (1.0 + a.abs().max(b.abs()))
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    /// Every node lies inside the computed extent.
    #[test]
    fn bbox_contains_every_node(nodes in arb_nodes(40)) {
        let network = Network::new(nodes, vec![]).unwrap();
        let bbox = BoundingBox::of_network(&network).unwrap();
        for node in network.nodes() {
            prop_assert!(bbox.min_x <= node.lon && node.lon <= bbox.max_x);
            prop_assert!(bbox.min_y <= node.lat && node.lat <= bbox.max_y);
        }
    }

    /// Reprojecting a source corner yields the corresponding target
    /// corner, for any non-degenerate pair including inverted targets.
    #[test]
    fn corners_map_exactly(source in arb_box(1e-3), target in arb_box(1e-3)) {
        let lo = reproject(
            Point::new(source.min_x, source.min_y),
            &source,
            &target,
            DegenerateAxisPolicy::Fail,
        ).unwrap();
        prop_assert!(close(lo.x, target.min_x), "{} vs {}", lo.x, target.min_x);
        prop_assert!(close(lo.y, target.min_y), "{} vs {}", lo.y, target.min_y);

        let hi = reproject(
            Point::new(source.max_x, source.max_y),
            &source,
            &target,
            DegenerateAxisPolicy::Fail,
        ).unwrap();
        prop_assert!(close(hi.x, target.max_x), "{} vs {}", hi.x, target.max_x);
        prop_assert!(close(hi.y, target.max_y), "{} vs {}", hi.y, target.max_y);
    }

    /// target -> source -> target reproduces the original point.
    #[test]
    fn round_trip_is_identity(
        source in arb_box(1e-3),
        target in arb_box(1e-3),
        t in 0.0..1.0f64,
        u in 0.0..1.0f64,
    ) {
        let p = Point::new(
            source.min_x + t * (source.max_x - source.min_x),
            source.min_y + u * (source.max_y - source.min_y),
        );
        let there = reproject(p, &source, &target, DegenerateAxisPolicy::Fail).unwrap();
        let back = reproject(there, &target, &source, DegenerateAxisPolicy::Fail).unwrap();
        prop_assert!(close(back.x, p.x), "{} vs {}", back.x, p.x);
        prop_assert!(close(back.y, p.y), "{} vs {}", back.y, p.y);
    }

    /// Building twice from the same input produces the same body and
    /// connective counts and the same classifications.
    #[test]
    fn build_is_deterministic(nodes in arb_nodes(20), seed in any::<u64>()) {
        // Stitch nodes into ways pseudo-randomly but reproducibly.
        let ids: Vec<NodeId> = nodes.iter().map(|n| n.id).collect();
        let mut ways = Vec::new();
        let mut cursor = seed as usize;
        for chunk in ids.chunks(3) {
            if chunk.len() >= 2 {
                let mut shuffled = chunk.to_vec();
                cursor = cursor.wrapping_mul(6364136223846793005).wrapping_add(1);
                shuffled.rotate_left(cursor % chunk.len());
                ways.push(NetworkWay::new(shuffled));
            }
        }
        let network = Network::new(nodes, ways).unwrap();
        let config = SimConfig {
            degenerate_axis: DegenerateAxisPolicy::Collapse,
            ..SimConfig::default()
        };
        let a = build_world(&network, &config).unwrap();
        let b = build_world(&network, &config).unwrap();
        prop_assert_eq!(a.body_count(), b.body_count());
        prop_assert_eq!(a.connective_count(), b.connective_count());
        for id in &ids {
            prop_assert_eq!(a.is_static(*id), b.is_static(*id));
            prop_assert_eq!(a.position(*id), b.position(*id));
        }
    }
}
