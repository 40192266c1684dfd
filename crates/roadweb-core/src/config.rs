//! Simulation configuration. Everything tunable lives here with the
//! defaults observed in practice; none of the constants are derived.

use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::reproject::DegenerateAxisPolicy;

/// How consecutive bodies along a way are linked.
///
/// Both variants emit the same joint type; they differ in grouping and
/// in how they count against [`SimConfig::chain_cap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConnectiveStrategy {
    /// One multi-segment chain per way. The whole way counts as a single
    /// connective structure against the cap.
    #[default]
    Chain,
    /// One independent constraint per consecutive pair. Each constraint
    /// counts against the cap individually, and creation stops exactly
    /// at the cap, mid-way if necessary.
    Pairwise,
}

/// Optional static floor under the web, sized relative to the target box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorConfig {
    /// Floor slab thickness in simulation units.
    pub thickness: f32,
    /// Floor width as a multiple of the target box width.
    pub width_factor: f32,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            thickness: 20.0,
            width_factor: 1.5,
        }
    }
}

/// Full configuration for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Target/simulation-space box nodes are reprojected into. The
    /// default is a 800x600 surface with y growing downward.
    pub target: BoundingBox,
    /// Boundary margin multiplier `m`: nodes outside the unit square of
    /// the `[-m, m]` normalized box are pinned static.
    pub margin: f64,
    /// Upper bound on connective structures, first-come in way order.
    pub chain_cap: usize,
    /// How ways become joints.
    pub strategy: ConnectiveStrategy,
    /// Behavior when the domain box has zero extent on an axis.
    pub degenerate_axis: DegenerateAxisPolicy,
    /// Optional static floor; `None` means bodies fall freely.
    pub floor: Option<FloorConfig>,
    /// Gravity in simulation units, +y down to match the default target.
    pub gravity: [f32; 2],
    /// Radius of each node's circular body.
    pub body_radius: f32,
    /// Joint rest length = inter-body distance x this factor.
    pub rope_slack: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            target: BoundingBox::new(0.0, 600.0, 800.0, 0.0),
            margin: 1.2,
            chain_cap: 20,
            strategy: ConnectiveStrategy::default(),
            degenerate_axis: DegenerateAxisPolicy::default(),
            floor: None,
            gravity: [0.0, 98.1],
            body_radius: 2.0,
            rope_slack: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_observed_values() {
        let config = SimConfig::default();
        assert_eq!(config.target, BoundingBox::new(0.0, 600.0, 800.0, 0.0));
        assert_eq!(config.margin, 1.2);
        assert_eq!(config.chain_cap, 20);
        assert_eq!(config.strategy, ConnectiveStrategy::Chain);
        assert_eq!(config.degenerate_axis, DegenerateAxisPolicy::Fail);
        assert!(config.floor.is_none());
    }

    #[test]
    fn partial_config_deserializes_over_defaults() {
        let config: SimConfig =
            serde_json::from_str(r#"{"chain_cap": 5, "strategy": "Pairwise"}"#).unwrap();
        assert_eq!(config.chain_cap, 5);
        assert_eq!(config.strategy, ConnectiveStrategy::Pairwise);
        assert_eq!(config.margin, 1.2);
    }
}
