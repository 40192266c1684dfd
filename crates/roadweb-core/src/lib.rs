//! Roadweb Core -- turns a geographic road network into an animated 2D
//! physics "spider web".
//!
//! Nodes with lon/lat coordinates and ways (ordered node polylines) come
//! in; a rapier world of circular bodies linked by rope joints comes
//! out. Nodes near the network's geographic edge are pinned static so
//! the web has anchors; interior nodes dangle and sway under gravity.
//!
//! # Pipeline
//!
//! 1. **Extent** -- [`bbox::BoundingBox::of_network`] scans all nodes
//!    for the domain bounding box.
//! 2. **Reprojection** -- [`reproject::reproject`] maps each node into
//!    the target box with a per-axis affine transform (not a geodetic
//!    projection).
//! 3. **Classification** -- [`boundary::BoundaryClassifier`] pins nodes
//!    whose margin-normalized position leaves the unit square.
//! 4. **Construction** -- [`builder::build_world`] lazily materializes
//!    one body per referenced node and links consecutive way nodes with
//!    rope joints, bounded by the connective cap.
//! 5. **Stepping** -- [`sim::Simulation`] owns the pipeline state, runs
//!    one physics step + one render request per tick, and rebuilds or
//!    disposes wholesale.
//!
//! # Key Types
//!
//! - [`model::Network`] -- the immutable node/way input snapshot.
//! - [`config::SimConfig`] -- target box, margin, connective strategy
//!   and cap, floor, gravity.
//! - [`world::SimulationWorld`] -- bodies + joints for one run.
//! - [`sim::Simulation`] -- `Idle -> Running -> Disposed` lifecycle.
//! - [`render::RenderTarget`] -- the seam a host renderer implements.

pub mod bbox;
pub mod boundary;
pub mod builder;
pub mod config;
pub mod error;
pub mod id;
pub mod model;
pub mod render;
pub mod reproject;
pub mod sim;
pub mod world;

pub use bbox::BoundingBox;
pub use builder::build_world;
pub use config::{ConnectiveStrategy, FloorConfig, SimConfig};
pub use error::Error;
pub use id::NodeId;
pub use model::{Network, NetworkNode, NetworkWay};
pub use render::{RenderTarget, WorldFrame};
pub use reproject::{Axis, DegenerateAxisPolicy, Point, reproject};
pub use sim::Simulation;
pub use world::SimulationWorld;
