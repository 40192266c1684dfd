//! The road network input model: nodes, ways, and the immutable
//! [`Network`] snapshot the builder consumes.
//!
//! A `Network` is validated once at construction (unique node ids, id
//! lookup index) and never mutated afterwards. A new network means a new
//! world, never an incremental patch.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::id::NodeId;

/// A single geographic node: an id plus a lon/lat coordinate pair.
///
/// The field names match the element shape produced by Overpass-style
/// geodata queries, so fixtures deserialize directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetworkNode {
    /// Unique id within one network.
    pub id: NodeId,
    /// Longitude, degrees.
    pub lon: f64,
    /// Latitude, degrees.
    pub lat: f64,
}

/// An ordered polyline of node references representing one street segment.
///
/// A way with fewer than two node ids contributes no edges and is skipped
/// by the builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkWay {
    /// Ordered node references. Every id must resolve within the same
    /// network.
    pub nodes: Vec<NodeId>,
}

impl NetworkWay {
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }

    /// Whether this way contributes at least one edge.
    pub fn qualifies(&self) -> bool {
        self.nodes.len() >= 2
    }
}

/// An immutable road network snapshot: nodes unique by id, ways in input
/// order.
#[derive(Debug, Clone)]
pub struct Network {
    nodes: Vec<NetworkNode>,
    ways: Vec<NetworkWay>,
    /// id -> index into `nodes`. Built once at construction.
    index: HashMap<NodeId, usize>,
}

impl Network {
    /// Build a network from raw parts, validating node-id uniqueness.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateNode`] if two nodes share an id.
    pub fn new(nodes: Vec<NetworkNode>, ways: Vec<NetworkWay>) -> Result<Self, Error> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id, i).is_some() {
                return Err(Error::DuplicateNode(node.id));
            }
        }
        Ok(Self {
            nodes,
            ways,
            index,
        })
    }

    /// All nodes, in input order.
    pub fn nodes(&self) -> &[NetworkNode] {
        &self.nodes
    }

    /// All ways, in input order.
    pub fn ways(&self) -> &[NetworkWay] {
        &self.ways
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&NetworkNode> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn way_count(&self) -> usize {
        self.ways.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: i64, lon: f64, lat: f64) -> NetworkNode {
        NetworkNode {
            id: NodeId(id),
            lon,
            lat,
        }
    }

    #[test]
    fn lookup_by_id() {
        let net = Network::new(
            vec![node(1, 0.0, 0.0), node(2, 1.0, 1.0)],
            vec![NetworkWay::new(vec![NodeId(1), NodeId(2)])],
        )
        .unwrap();
        assert_eq!(net.node(NodeId(2)).unwrap().lon, 1.0);
        assert!(net.node(NodeId(3)).is_none());
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = Network::new(vec![node(7, 0.0, 0.0), node(7, 1.0, 1.0)], vec![]).unwrap_err();
        assert!(matches!(err, Error::DuplicateNode(NodeId(7))));
    }

    #[test]
    fn short_ways_do_not_qualify() {
        assert!(!NetworkWay::new(vec![]).qualifies());
        assert!(!NetworkWay::new(vec![NodeId(1)]).qualifies());
        assert!(NetworkWay::new(vec![NodeId(1), NodeId(2)]).qualifies());
    }

    #[test]
    fn nodes_deserialize_from_overpass_shape() {
        let json = r#"[{"id": 10, "lon": 30.5, "lat": 59.9}]"#;
        let nodes: Vec<NetworkNode> = serde_json::from_str(json).unwrap();
        assert_eq!(nodes[0].id, NodeId(10));
        assert_eq!(nodes[0].lat, 59.9);
    }
}
