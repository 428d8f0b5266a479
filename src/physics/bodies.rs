//! Turning map rectangles into physics bodies.

use bevy_ecs::entity::Entity;
use rapier2d::prelude::*;
use tracing::debug;

use crate::constants::to_world;
use crate::map::{LayerKind, MapLayer, Rect};
use crate::physics::{ColliderTag, CollisionCategory, PhysicsWorld};

/// Physical properties of a dynamic body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicBody {
    pub mass: f32,
    pub friction: f32,
    /// Whether the body takes part in the simulation from the start.
    pub enabled: bool,
}

/// Creates an immovable box covering `rect`.
///
/// `rect` is center-anchored, in map pixels.
pub fn create_static_body(world: &mut PhysicsWorld, rect: Rect, category: CollisionCategory) -> RigidBodyHandle {
    let center = to_world(rect.position());
    let half_extents = to_world(rect.half_extents());

    let body = RigidBodyBuilder::fixed().translation(vector![center.x, center.y]).build();
    let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y);

    world.insert_body(body, half_extents, ColliderTag { category, entity: None }, collider)
}

/// Creates a rotation-locked box body owned by `entity`.
///
/// `rect` is center-anchored, in map pixels. Its collider reports collision events.
pub fn create_dynamic_body(
    world: &mut PhysicsWorld,
    rect: Rect,
    category: CollisionCategory,
    entity: Entity,
    properties: DynamicBody,
) -> RigidBodyHandle {
    let center = to_world(rect.position());
    let half_extents = to_world(rect.half_extents());

    let body = RigidBodyBuilder::dynamic()
        .translation(vector![center.x, center.y])
        .lock_rotations()
        .enabled(properties.enabled)
        .build();
    let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y)
        .mass(properties.mass)
        .friction(properties.friction)
        .active_events(ActiveEvents::COLLISION_EVENTS);

    world.insert_body(
        body,
        half_extents,
        ColliderTag {
            category,
            entity: Some(entity),
        },
        collider,
    )
}

/// Creates the immovable bodies of a solid or stopper layer.
///
/// Enemy layers carry no static geometry and are left untouched. Returns the
/// number of bodies created.
pub fn create_layer_geometry(world: &mut PhysicsWorld, layer: &MapLayer) -> usize {
    let category = match layer.kind {
        LayerKind::Solid => CollisionCategory::GROUND,
        LayerKind::EnemyStopper => CollisionCategory::STOPPER,
        LayerKind::Enemies => return 0,
    };

    for object in &layer.objects {
        create_static_body(world, object.rect.centered(), category);
    }

    debug!(layer = %layer.name, ?category, bodies = layer.objects.len(), "Created layer geometry");
    layer.objects.len()
}

