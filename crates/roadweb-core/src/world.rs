//! The built simulation world: rapier body/collider/joint sets plus the
//! node-id arena that maps network nodes onto physics handles.
//!
//! A world is assembled wholesale from one network snapshot and never
//! partially mutated; a new network means a new world.

use std::collections::HashMap;

use rapier2d::prelude::*;

use crate::bbox::BoundingBox;
use crate::id::NodeId;
use crate::render::{FrameBody, WorldFrame};

/// Collision memberships for web bodies: they collide with the floor
/// only, never with each other.
pub(crate) const WEB_GROUPS: InteractionGroups = InteractionGroups {
    memberships: Group::GROUP_1,
    filter: Group::GROUP_2,
};
/// Collision memberships for the optional floor.
pub(crate) const FLOOR_GROUPS: InteractionGroups = InteractionGroups {
    memberships: Group::GROUP_2,
    filter: Group::GROUP_1,
};

/// One cap-counted connective structure: a whole chain for the chain
/// strategy, a single pair constraint for the pairwise strategy.
#[derive(Debug)]
pub struct Connective {
    /// Joints belonging to this structure.
    pub joints: Vec<ImpulseJointHandle>,
    /// Node-id endpoints of each joint, in way order. Kept for frame
    /// extraction so renderers can draw the strands.
    pub links: Vec<(NodeId, NodeId)>,
}

/// The complete set of bodies, colliders, and joints for one run.
///
/// Exclusively owned by the stepping lifecycle; hosts only ever replace
/// it wholesale via rebuild.
#[derive(Debug)]
pub struct SimulationWorld {
    pub(crate) bodies: RigidBodySet,
    pub(crate) colliders: ColliderSet,
    pub(crate) impulse_joints: ImpulseJointSet,
    // Required by the pipeline step even though the builder only emits
    // impulse joints (street graphs share nodes between ways, which
    // multibody articulations reject as loops).
    pub(crate) multibody_joints: MultibodyJointSet,
    connectives: Vec<Connective>,
    /// id -> body handle arena; at most one body per node id.
    body_index: HashMap<NodeId, RigidBodyHandle>,
    /// Insertion order, for deterministic frame extraction.
    body_order: Vec<NodeId>,
    floor: Option<ColliderHandle>,
    target: BoundingBox,
}

impl SimulationWorld {
    pub(crate) fn new(target: BoundingBox) -> Self {
        Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            connectives: Vec::new(),
            body_index: HashMap::new(),
            body_order: Vec::new(),
            floor: None,
            target,
        }
    }

    /// Insert one circular body for a node. The caller guarantees the id
    /// is not yet present.
    pub(crate) fn insert_node_body(
        &mut self,
        id: NodeId,
        x: f32,
        y: f32,
        is_static: bool,
        radius: f32,
    ) -> RigidBodyHandle {
        let builder = if is_static {
            RigidBodyBuilder::fixed()
        } else {
            RigidBodyBuilder::dynamic()
        };
        let handle = self.bodies.insert(builder.translation(vector![x, y]));
        self.colliders.insert_with_parent(
            ColliderBuilder::ball(radius).collision_groups(WEB_GROUPS),
            handle,
            &mut self.bodies,
        );
        self.body_index.insert(id, handle);
        self.body_order.push(id);
        handle
    }

    /// Join two bodies with a rope constraint of the given rest length.
    pub(crate) fn insert_rope_joint(
        &mut self,
        a: RigidBodyHandle,
        b: RigidBodyHandle,
        rest_length: f32,
    ) -> ImpulseJointHandle {
        let joint = RopeJointBuilder::new(rest_length)
            .local_anchor1(point![0.0, 0.0])
            .local_anchor2(point![0.0, 0.0]);
        self.impulse_joints.insert(a, b, joint, true)
    }

    pub(crate) fn push_connective(&mut self, connective: Connective) {
        self.connectives.push(connective);
    }

    /// Insert the static floor slab below the target box.
    pub(crate) fn insert_floor(&mut self, half_width: f32, half_thickness: f32, cx: f32, cy: f32) {
        let handle = self
            .bodies
            .insert(RigidBodyBuilder::fixed().translation(vector![cx, cy]));
        let collider = self.colliders.insert_with_parent(
            ColliderBuilder::cuboid(half_width, half_thickness).collision_groups(FLOOR_GROUPS),
            handle,
            &mut self.bodies,
        );
        self.floor = Some(collider);
    }

    /// The target box this world was built against.
    pub fn target(&self) -> BoundingBox {
        self.target
    }

    pub fn body_count(&self) -> usize {
        self.body_order.len()
    }

    pub fn connective_count(&self) -> usize {
        self.connectives.len()
    }

    pub fn connectives(&self) -> &[Connective] {
        &self.connectives
    }

    pub fn has_floor(&self) -> bool {
        self.floor.is_some()
    }

    pub fn handle_of(&self, id: NodeId) -> Option<RigidBodyHandle> {
        self.body_index.get(&id).copied()
    }

    /// Whether the node's body is pinned. `None` when no body exists for
    /// the id.
    pub fn is_static(&self, id: NodeId) -> Option<bool> {
        let handle = self.handle_of(id)?;
        Some(self.bodies[handle].is_fixed())
    }

    /// Current position of a node's body in target space.
    pub fn position(&self, id: NodeId) -> Option<(f32, f32)> {
        let handle = self.handle_of(id)?;
        let t = self.bodies[handle].translation();
        Some((t.x, t.y))
    }

    /// Snapshot of live body positions and strand endpoints, in body
    /// insertion order. This is what a render target consumes.
    pub fn frame(&self) -> WorldFrame {
        let bodies = self
            .body_order
            .iter()
            .map(|&id| {
                let body = &self.bodies[self.body_index[&id]];
                let t = body.translation();
                FrameBody {
                    id,
                    x: t.x,
                    y: t.y,
                    is_static: body.is_fixed(),
                }
            })
            .collect();
        let links = self
            .connectives
            .iter()
            .flat_map(|c| c.links.iter().copied())
            .collect();
        WorldFrame { bodies, links }
    }
}
