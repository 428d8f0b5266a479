use bevy_ecs::system::{Res, ResMut};

use crate::physics::PhysicsWorld;
use crate::systems::components::DeltaTime;

/// Advances the simulation by however many fixed steps this frame's time allows.
pub fn physics_system(dt: Res<DeltaTime>, mut physics: ResMut<PhysicsWorld>) {
    physics.step_fixed(dt.0);
}
