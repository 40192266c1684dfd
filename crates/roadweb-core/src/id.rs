use serde::{Deserialize, Serialize};

/// Identifies a node in a road network. Cheap to copy and compare.
///
/// Ids follow the OSM convention of signed 64-bit integers and are only
/// meaningful within the [`Network`](crate::model::Network) that declared
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub i64);
