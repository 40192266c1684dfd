//! Graph-to-physics construction: walks the network's ways and
//! materializes bodies and connective joints into a fresh
//! [`SimulationWorld`].
//!
//! Construction fails fast: any unresolvable node id or refused
//! degenerate axis aborts the whole build, and no partial world is ever
//! returned.

use log::{info, warn};
use rapier2d::prelude::{ImpulseJointHandle, RigidBodyHandle};

use crate::bbox::BoundingBox;
use crate::boundary::BoundaryClassifier;
use crate::config::{ConnectiveStrategy, SimConfig};
use crate::error::Error;
use crate::id::NodeId;
use crate::model::Network;
use crate::reproject::{Point, reproject};
use crate::world::{Connective, SimulationWorld};

/// Build a complete simulation world from one network snapshot.
///
/// Bodies are created lazily and memoized by node id, so a node shared
/// between ways gets exactly one body. Connective structures are built
/// per the configured strategy until `chain_cap` is reached, first-come
/// in way order.
///
/// # Errors
///
/// - [`Error::EmptyNetwork`] when the network has no nodes.
/// - [`Error::NodeNotFound`] when a way references an unknown id.
/// - [`Error::DegenerateAxis`] when the domain extent collapses on an
///   axis and the configured policy is `Fail`.
pub fn build_world(network: &Network, config: &SimConfig) -> Result<SimulationWorld, Error> {
    let domain = BoundingBox::of_network(network)?;
    let classifier = BoundaryClassifier::new(domain, config.margin, config.degenerate_axis);
    let mut world = SimulationWorld::new(config.target);
    let mut truncated = false;

    'ways: for way in network.ways() {
        if !way.qualifies() {
            continue;
        }
        match config.strategy {
            ConnectiveStrategy::Chain => {
                if world.connective_count() >= config.chain_cap {
                    truncated = true;
                    break 'ways;
                }
                let mut joints = Vec::with_capacity(way.nodes.len() - 1);
                let mut links = Vec::with_capacity(way.nodes.len() - 1);
                for pair in way.nodes.windows(2) {
                    let (a, b) = (pair[0], pair[1]);
                    if a == b {
                        // Zero-length segment, nothing to join.
                        continue;
                    }
                    let ha = body_for(&mut world, network, &domain, &classifier, config, a)?;
                    let hb = body_for(&mut world, network, &domain, &classifier, config, b)?;
                    joints.push(join(&mut world, ha, hb, config.rope_slack));
                    links.push((a, b));
                }
                if !links.is_empty() {
                    world.push_connective(Connective { joints, links });
                }
            }
            ConnectiveStrategy::Pairwise => {
                for pair in way.nodes.windows(2) {
                    let (a, b) = (pair[0], pair[1]);
                    if a == b {
                        continue;
                    }
                    if world.connective_count() >= config.chain_cap {
                        truncated = true;
                        break 'ways;
                    }
                    let ha = body_for(&mut world, network, &domain, &classifier, config, a)?;
                    let hb = body_for(&mut world, network, &domain, &classifier, config, b)?;
                    let joint = join(&mut world, ha, hb, config.rope_slack);
                    world.push_connective(Connective {
                        joints: vec![joint],
                        links: vec![(a, b)],
                    });
                }
            }
        }
    }

    if truncated {
        warn!(
            "connective cap reached ({}); remaining ways dropped",
            config.chain_cap
        );
    }

    if let Some(floor) = config.floor {
        let half_width = config.target.width() as f32 * floor.width_factor / 2.0;
        let center_x = ((config.target.min_x + config.target.max_x) / 2.0) as f32;
        // Screen-style coordinates: the larger y corner is the bottom.
        let bottom = config.target.min_y.max(config.target.max_y) as f32;
        world.insert_floor(
            half_width,
            floor.thickness / 2.0,
            center_x,
            bottom + floor.thickness / 2.0,
        );
    }

    info!(
        "built world: {} bodies, {} connective structures",
        world.body_count(),
        world.connective_count()
    );
    Ok(world)
}

/// Fetch the body for `id`, creating it on first reference: reproject
/// into the target box, classify against the boundary margin, insert a
/// circular body in the shared collision group.
fn body_for(
    world: &mut SimulationWorld,
    network: &Network,
    domain: &BoundingBox,
    classifier: &BoundaryClassifier,
    config: &SimConfig,
    id: NodeId,
) -> Result<RigidBodyHandle, Error> {
    if let Some(handle) = world.handle_of(id) {
        return Ok(handle);
    }
    let node = network.node(id).ok_or(Error::NodeNotFound(id))?;
    let position = reproject(
        Point::new(node.lon, node.lat),
        domain,
        &config.target,
        config.degenerate_axis,
    )?;
    let pinned = classifier.is_static(node.lon, node.lat)?;
    Ok(world.insert_node_body(
        id,
        position.x as f32,
        position.y as f32,
        pinned,
        config.body_radius,
    ))
}

/// Join two bodies with a rope whose rest length is their current
/// separation scaled by the slack factor.
fn join(
    world: &mut SimulationWorld,
    a: RigidBodyHandle,
    b: RigidBodyHandle,
    slack: f32,
) -> ImpulseJointHandle {
    let pa = *world.bodies[a].translation();
    let pb = *world.bodies[b].translation();
    let rest_length = (pb - pa).norm() * slack;
    world.insert_rope_joint(a, b, rest_length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NetworkNode, NetworkWay};

    fn node(id: i64, lon: f64, lat: f64) -> NetworkNode {
        NetworkNode {
            id: NodeId(id),
            lon,
            lat,
        }
    }

    fn way(ids: &[i64]) -> NetworkWay {
        NetworkWay::new(ids.iter().map(|&i| NodeId(i)).collect())
    }

    #[test]
    fn shared_nodes_are_memoized() {
        // Two ways meeting at node 2: five distinct nodes, one body each.
        let network = Network::new(
            vec![
                node(1, 0.0, 0.0),
                node(2, 0.5, 0.5),
                node(3, 1.0, 0.0),
                node(4, 0.0, 1.0),
                node(5, 1.0, 1.0),
            ],
            vec![way(&[1, 2, 3]), way(&[4, 2, 5])],
        )
        .unwrap();
        let world = build_world(&network, &SimConfig::default()).unwrap();
        assert_eq!(world.body_count(), 5);
        assert_eq!(world.connective_count(), 2);
    }

    #[test]
    fn unknown_way_node_fails_fast() {
        let network = Network::new(
            vec![node(1, 0.0, 0.0), node(2, 1.0, 1.0)],
            vec![way(&[1, 99])],
        )
        .unwrap();
        let err = build_world(&network, &SimConfig::default()).unwrap_err();
        assert!(matches!(err, Error::NodeNotFound(NodeId(99))));
    }

    #[test]
    fn unreferenced_nodes_get_no_bodies() {
        let network = Network::new(
            vec![node(1, 0.0, 0.0), node(2, 1.0, 1.0), node(3, 0.4, 0.6)],
            vec![way(&[1, 2]), way(&[3])],
        )
        .unwrap();
        let world = build_world(&network, &SimConfig::default()).unwrap();
        // Node 3 sits in a way that contributes no edges.
        assert_eq!(world.body_count(), 2);
        assert!(world.handle_of(NodeId(3)).is_none());
    }

    #[test]
    fn repeated_id_within_way_joins_nothing() {
        let network = Network::new(
            vec![node(1, 0.0, 0.0), node(2, 1.0, 1.0)],
            vec![way(&[1, 1]), way(&[1, 2])],
        )
        .unwrap();
        let world = build_world(&network, &SimConfig::default()).unwrap();
        assert_eq!(world.connective_count(), 1);
        assert_eq!(world.body_count(), 2);
    }

    #[test]
    fn build_result_is_debug_printable() {
        // Result<SimulationWorld, _> must unwrap_err in tests, which
        // needs the world to stay Debug.
        let network = Network::new(
            vec![node(1, 0.0, 0.0), node(2, 1.0, 1.0)],
            vec![way(&[1, 2])],
        )
        .unwrap();
        let world = build_world(&network, &SimConfig::default());
        assert!(format!("{world:?}").contains("SimulationWorld"));
    }

    #[test]
    fn floor_collider_is_created_when_configured() {
        let mut config = SimConfig::default();
        config.floor = Some(crate::config::FloorConfig::default());
        let network = Network::new(
            vec![node(1, 0.0, 0.0), node(2, 1.0, 1.0)],
            vec![way(&[1, 2])],
        )
        .unwrap();
        let world = build_world(&network, &config).unwrap();
        assert!(world.has_floor());
        let without = build_world(&network, &SimConfig::default()).unwrap();
        assert!(!without.has_floor());
    }
}
