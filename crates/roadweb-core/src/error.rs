use crate::id::NodeId;
use crate::reproject::Axis;

/// Errors that can occur while building or driving a simulation.
///
/// All variants are construction-time failures: they are detected before a
/// world is attached and stepped, never mid-simulation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A bounding box was requested for a network with zero nodes.
    #[error("network contains no nodes")]
    EmptyNetwork,

    /// The source bounding box has zero extent on an axis and the
    /// reprojection policy is [`Fail`](crate::reproject::DegenerateAxisPolicy::Fail).
    #[error("degenerate source extent on axis {0:?}")]
    DegenerateAxis(Axis),

    /// A way references a node id absent from the network's node set.
    #[error("no node with id {0:?}")]
    NodeNotFound(NodeId),

    /// Two nodes in the same network share an id.
    #[error("duplicate node id {0:?}")]
    DuplicateNode(NodeId),

    /// The render target could not initialize against the configured
    /// surface dimensions.
    #[error("engine attach failure: {0}")]
    EngineAttach(String),

    /// The lifecycle has been disposed; disposal is terminal.
    #[error("simulation has been disposed")]
    Disposed,
}
