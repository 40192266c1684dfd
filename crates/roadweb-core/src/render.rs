//! The render-request seam.
//!
//! The core never draws pixels. Each tick it extracts a [`WorldFrame`]
//! and hands it to whatever [`RenderTarget`] the host attached; a
//! headless host simply attaches none.

use serde::{Deserialize, Serialize};

use crate::id::NodeId;

/// One body's state inside a frame snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameBody {
    pub id: NodeId,
    /// Position in target space.
    pub x: f32,
    pub y: f32,
    /// Pinned bodies render as anchors, free bodies as strand points.
    pub is_static: bool,
}

/// A snapshot of live body positions plus the strand endpoints connecting
/// them, in deterministic (body insertion) order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldFrame {
    pub bodies: Vec<FrameBody>,
    /// Node-id pairs of every joint, for drawing the web strands.
    pub links: Vec<(NodeId, NodeId)>,
}

/// A surface the lifecycle drives: attached once when the simulation
/// starts, handed one frame per tick, detached on disposal.
pub trait RenderTarget {
    /// Initialize against a surface of the given target dimensions.
    ///
    /// # Errors
    ///
    /// An error message here surfaces as
    /// [`Error::EngineAttach`](crate::error::Error::EngineAttach) and
    /// keeps the lifecycle out of the running state.
    fn attach(&mut self, width: f32, height: f32) -> Result<(), String>;

    /// Draw one frame. Called exactly once per simulation step.
    fn draw(&mut self, frame: &WorldFrame);

    /// Release surface resources. Called on disposal and before a
    /// rebuild re-attaches.
    fn detach(&mut self);
}
