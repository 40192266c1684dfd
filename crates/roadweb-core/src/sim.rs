//! The simulation lifecycle: owns the physics pipeline and the current
//! world, drives one step + one render request per tick, and guarantees
//! full teardown.
//!
//! State machine: `Idle -> Running -> Disposed` (terminal). A new
//! network while running means dispose-then-rebuild, never two live
//! worlds; a failed build leaves (or reverts to) `Idle` with no world
//! attached.

use std::hash::{Hash, Hasher};

use log::{debug, info};
use rapier2d::prelude::*;

use crate::builder::build_world;
use crate::config::SimConfig;
use crate::error::Error;
use crate::model::Network;
use crate::render::{RenderTarget, WorldFrame};
use crate::world::SimulationWorld;

/// Everything that exists only while the simulation is running: the
/// world plus the rapier pipeline state stepping it.
struct Running {
    world: SimulationWorld,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    ccd: CCDSolver,
    params: IntegrationParameters,
    /// Fingerprint of the network this world was built from, so an
    /// unchanged input can be recognized as a no-op rebuild.
    fingerprint: u64,
}

enum Lifecycle {
    Idle,
    Running(Box<Running>),
    Disposed,
}

/// Owns engine and world exclusively: one `Simulation`, at most one live
/// world+pipeline pair. The host drives [`step`](Simulation::step) from
/// its frame source and replaces input wholesale via
/// [`rebuild`](Simulation::rebuild).
pub struct Simulation {
    config: SimConfig,
    state: Lifecycle,
    render: Option<Box<dyn RenderTarget>>,
}

impl Simulation {
    /// Create an idle simulation with no render target.
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            state: Lifecycle::Idle,
            render: None,
        }
    }

    /// Create an idle simulation that will drive the given render target.
    pub fn with_render_target(config: SimConfig, render: Box<dyn RenderTarget>) -> Self {
        Self {
            config,
            state: Lifecycle::Idle,
            render: Some(render),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, Lifecycle::Running(_))
    }

    pub fn is_disposed(&self) -> bool {
        matches!(self.state, Lifecycle::Disposed)
    }

    /// The current world, while running.
    pub fn world(&self) -> Option<&SimulationWorld> {
        match &self.state {
            Lifecycle::Running(run) => Some(&run.world),
            _ => None,
        }
    }

    /// Build a world from `network` and start stepping. Equivalent to
    /// [`rebuild`](Simulation::rebuild); kept as the explicit
    /// `Idle -> Running` entry point.
    ///
    /// # Errors
    ///
    /// Any build error ([`Error::EmptyNetwork`], [`Error::NodeNotFound`],
    /// [`Error::DegenerateAxis`]) or [`Error::EngineAttach`] leaves the
    /// lifecycle idle. [`Error::Disposed`] after disposal.
    pub fn start(&mut self, network: &Network) -> Result<(), Error> {
        self.rebuild(network)
    }

    /// Replace the current input wholesale. A no-op when the network is
    /// unchanged; otherwise the current world and pipeline are fully
    /// torn down before the new build begins.
    ///
    /// # Errors
    ///
    /// See [`start`](Simulation::start). On failure the lifecycle is
    /// `Idle` with no world attached.
    pub fn rebuild(&mut self, network: &Network) -> Result<(), Error> {
        if self.is_disposed() {
            return Err(Error::Disposed);
        }
        let fingerprint = network_fingerprint(network);
        if let Lifecycle::Running(run) = &self.state {
            if run.fingerprint == fingerprint {
                debug!("network unchanged; keeping current world");
                return Ok(());
            }
            debug!("new network; disposing current world before rebuild");
        }

        // Full teardown first: at most one live world+engine pair.
        self.teardown();
        debug_assert!(matches!(self.state, Lifecycle::Idle));

        let world = build_world(network, &self.config)?;
        if let Some(render) = &mut self.render {
            render
                .attach(
                    self.config.target.width() as f32,
                    self.config.target.height() as f32,
                )
                .map_err(Error::EngineAttach)?;
        }
        info!(
            "simulation running: {} bodies, {} connective structures",
            world.body_count(),
            world.connective_count()
        );
        self.state = Lifecycle::Running(Box::new(Running {
            world,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd: CCDSolver::new(),
            params: IntegrationParameters::default(),
            fingerprint,
        }));
        Ok(())
    }

    /// Advance the world by exactly one physics step and issue exactly
    /// one render request.
    ///
    /// Returns the frame that was (or would be) rendered, or `None`
    /// when not running -- so a stale tick source firing after disposal
    /// does nothing.
    pub fn step(&mut self) -> Option<WorldFrame> {
        let gravity = vector![self.config.gravity[0], self.config.gravity[1]];
        let Lifecycle::Running(run) = &mut self.state else {
            return None;
        };
        run.pipeline.step(
            &gravity,
            &run.params,
            &mut run.islands,
            &mut run.broad_phase,
            &mut run.narrow_phase,
            &mut run.world.bodies,
            &mut run.world.colliders,
            &mut run.world.impulse_joints,
            &mut run.world.multibody_joints,
            &mut run.ccd,
            None,
            &(),
            &(),
        );
        let frame = run.world.frame();
        if let Some(render) = &mut self.render {
            render.draw(&frame);
        }
        Some(frame)
    }

    /// Stop stepping and release the world, pipeline, and render target.
    /// Idempotent; the lifecycle is terminal afterwards.
    pub fn dispose(&mut self) {
        if self.is_disposed() {
            return;
        }
        self.teardown();
        self.state = Lifecycle::Disposed;
        debug!("simulation disposed");
    }

    /// Drop the running world (if any) and detach the render target,
    /// returning to `Idle`.
    fn teardown(&mut self) {
        if let Lifecycle::Running(run) = std::mem::replace(&mut self.state, Lifecycle::Idle) {
            drop(run);
            if let Some(render) = &mut self.render {
                render.detach();
            }
        }
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Content fingerprint of a network: node ids and coordinates plus way
/// topology. Used only to recognize unchanged rebuild input.
fn network_fingerprint(network: &Network) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    for node in network.nodes() {
        node.id.hash(&mut hasher);
        node.lon.to_bits().hash(&mut hasher);
        node.lat.to_bits().hash(&mut hasher);
    }
    0xff_u8.hash(&mut hasher);
    for way in network.ways() {
        way.nodes.hash(&mut hasher);
        0xfe_u8.hash(&mut hasher);
    }
    hasher.finish()
}
