//! The physics world: a rapier pipeline advanced in fixed steps.
//!
//! Everything outside this module speaks `glam` vectors in world units; the
//! conversion to and from rapier's vector types happens here.

pub mod bodies;
pub mod timestep;

use std::collections::HashMap;
use std::num::NonZeroUsize;

use bevy_ecs::entity::Entity;
use bevy_ecs::resource::Resource;
use bitflags::bitflags;
use glam::Vec2;
use parking_lot::Mutex;
use rapier2d::prelude::*;
use smallvec::SmallVec;
use tracing::trace;

use crate::constants::to_pixels;

pub use self::timestep::FixedTimestep;

bitflags! {
    /// Collision categories of the level's fixtures.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CollisionCategory: u32 {
        const PLAYER = 1 << 0;
        const ENEMY = 1 << 1;
        const GROUND = 1 << 2;
        const STOPPER = 1 << 3;
    }
}

impl CollisionCategory {
    /// The categories a fixture of this category collides with.
    pub fn filter(self) -> CollisionCategory {
        if self.contains(CollisionCategory::PLAYER) {
            CollisionCategory::GROUND | CollisionCategory::ENEMY
        } else if self.contains(CollisionCategory::ENEMY) {
            CollisionCategory::all()
        } else if self.contains(CollisionCategory::STOPPER) {
            CollisionCategory::ENEMY
        } else {
            CollisionCategory::all()
        }
    }

    pub fn interaction_groups(self) -> InteractionGroups {
        InteractionGroups::new(
            Group::from_bits_truncate(self.bits()),
            Group::from_bits_truncate(self.filter().bits()),
        )
    }
}

/// Identifies what a collider belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColliderTag {
    pub category: CollisionCategory,
    /// The owning entity; static geometry has none.
    pub entity: Option<Entity>,
}

/// Two colliders that started touching during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: ColliderTag,
    pub b: ColliderTag,
}

impl Contact {
    /// Returns this contact's tags ordered so that the first matches `category`.
    pub fn oriented(&self, category: CollisionCategory) -> Option<(ColliderTag, ColliderTag)> {
        if self.a.category.contains(category) {
            Some((self.a, self.b))
        } else if self.b.category.contains(category) {
            Some((self.b, self.a))
        } else {
            None
        }
    }
}

/// The level's collision listener; records contacts as the pipeline reports them.
#[derive(Default)]
struct ContactCollector {
    started: Mutex<Vec<(ColliderHandle, ColliderHandle)>>,
}

impl EventHandler for ContactCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        if event.started() {
            self.started.lock().push((event.collider1(), event.collider2()));
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

/// A collider's outline, for the physics debug view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugShape {
    /// Center, in world units.
    pub center: Vec2,
    pub half_extents: Vec2,
    pub category: CollisionCategory,
    /// Whether the collider currently takes part in the simulation.
    pub active: bool,
}

/// The physics simulation of one level.
#[derive(Resource)]
pub struct PhysicsWorld {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    tags: HashMap<ColliderHandle, ColliderTag>,
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    contacts: ContactCollector,
    timestep: FixedTimestep,
    steps_taken: u64,
}

impl PhysicsWorld {
    pub fn new(gravity: Vec2, timestep: FixedTimestep, velocity_iterations: usize, position_iterations: usize) -> Self {
        let integration_parameters = IntegrationParameters {
            dt: timestep.step(),
            num_solver_iterations: NonZeroUsize::new(velocity_iterations).unwrap_or(NonZeroUsize::MIN),
            num_internal_pgs_iterations: position_iterations,
            ..IntegrationParameters::default()
        };

        Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            tags: HashMap::new(),
            gravity: vector![gravity.x, gravity.y],
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            contacts: ContactCollector::default(),
            timestep,
            steps_taken: 0,
        }
    }

    /// Feeds a frame's delta time into the accumulator and runs every step that is due.
    ///
    /// Returns the number of steps taken.
    pub fn step_fixed(&mut self, dt: f32) -> u32 {
        let steps = self.timestep.advance(dt);
        for _ in 0..steps {
            self.step_once();
        }
        if steps > 0 {
            trace!(steps, carried = self.timestep.accumulator(), "Stepped physics");
        }
        steps
    }

    fn step_once(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.contacts,
        );
        self.steps_taken += 1;
    }

    /// Removes and returns the contacts that started since the last call.
    ///
    /// Contacts with colliders that carry no tag are dropped.
    pub fn drain_contacts(&mut self) -> Vec<Contact> {
        let started = std::mem::take(&mut *self.contacts.started.lock());
        started
            .into_iter()
            .filter_map(|(first, second)| {
                Some(Contact {
                    a: *self.tags.get(&first)?,
                    b: *self.tags.get(&second)?,
                })
            })
            .collect()
    }

    pub fn timestep(&self) -> &FixedTimestep {
        &self.timestep
    }

    /// Total number of fixed steps simulated so far.
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    pub fn gravity(&self) -> Vec2 {
        Vec2::new(self.gravity.x, self.gravity.y)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Inserts a body with a single box collider.
    pub(crate) fn insert_body(
        &mut self,
        body: RigidBody,
        half_extents: Vec2,
        tag: ColliderTag,
        collider: ColliderBuilder,
    ) -> RigidBodyHandle {
        let handle = self.bodies.insert(body);
        let collider = collider
            .collision_groups(tag.category.interaction_groups())
            .build();
        let collider_handle = self.colliders.insert_with_parent(collider, handle, &mut self.bodies);
        self.tags.insert(collider_handle, tag);
        trace!(?handle, category = ?tag.category, ?half_extents, "Inserted body");
        handle
    }

    pub fn translation(&self, handle: RigidBodyHandle) -> Vec2 {
        self.bodies
            .get(handle)
            .map(|body| Vec2::new(body.translation().x, body.translation().y))
            .unwrap_or_default()
    }

    /// The body's position in map pixels.
    pub fn pixel_position(&self, handle: RigidBodyHandle) -> Vec2 {
        to_pixels(self.translation(handle))
    }

    pub fn linear_velocity(&self, handle: RigidBodyHandle) -> Vec2 {
        self.bodies
            .get(handle)
            .map(|body| Vec2::new(body.linvel().x, body.linvel().y))
            .unwrap_or_default()
    }

    pub fn set_linear_velocity(&mut self, handle: RigidBodyHandle, velocity: Vec2) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_linvel(vector![velocity.x, velocity.y], true);
        }
    }

    pub fn apply_impulse(&mut self, handle: RigidBodyHandle, impulse: Vec2) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.apply_impulse(vector![impulse.x, impulse.y], true);
        }
    }

    pub fn is_enabled(&self, handle: RigidBodyHandle) -> bool {
        self.bodies.get(handle).is_some_and(|body| body.is_enabled())
    }

    pub fn set_enabled(&mut self, handle: RigidBodyHandle, enabled: bool) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_enabled(enabled);
        }
    }

    /// Stops the body's colliders from touching anything, keeping the body itself enabled.
    pub fn detach_from_collisions(&mut self, handle: RigidBodyHandle) {
        let Some(body) = self.bodies.get(handle) else {
            return;
        };
        let handles: SmallVec<[ColliderHandle; 2]> = body.colliders().iter().copied().collect();
        for handle in handles {
            if let Some(collider) = self.colliders.get_mut(handle) {
                collider.set_collision_groups(InteractionGroups::none());
            }
        }
    }

    /// Holds the body in place: no gravity, no velocity.
    pub fn freeze(&mut self, handle: RigidBodyHandle) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_gravity_scale(0.0, true);
            body.set_linvel(vector![0.0, 0.0], true);
        }
    }

    /// Outlines of every collider in the world.
    pub fn debug_shapes(&self) -> Vec<DebugShape> {
        self.colliders
            .iter()
            .map(|(handle, collider)| {
                let aabb = collider.compute_aabb();
                let center = aabb.center();
                let half_extents = aabb.half_extents();
                let body_enabled = collider
                    .parent()
                    .and_then(|parent| self.bodies.get(parent))
                    .is_none_or(|body| body.is_enabled());

                DebugShape {
                    center: Vec2::new(center.x, center.y),
                    half_extents: Vec2::new(half_extents.x, half_extents.y),
                    category: self.tags.get(&handle).map(|tag| tag.category).unwrap_or_default(),
                    active: body_enabled && collider.collision_groups() != InteractionGroups::none(),
                }
            })
            .collect()
    }
}
