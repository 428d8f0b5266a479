//! Enemy activation, walking and stomping.

use bevy_ecs::{
    event::EventReader,
    query::{With, Without},
    system::{Query, Res, ResMut, Single},
};
use glam::Vec2;
use tracing::{debug, info};

use crate::constants::player::STOMP_BOUNCE_SPEED;
use crate::events::GameEvent;
use crate::physics::PhysicsWorld;
use crate::settings::LevelSettings;
use crate::systems::components::{Body, DeltaTime, Enemy, EnemyState, Facing, Player};

/// Wakes up the bodies of enemies close to the player.
///
/// An enemy's body starts disabled and is enabled the first time the player
/// comes within the activation radius; it is never disabled again.
pub fn enemy_activation_system(
    settings: Res<LevelSettings>,
    mut physics: ResMut<PhysicsWorld>,
    player: Single<&Body, With<Player>>,
    enemies: Query<(&Body, &Enemy)>,
) {
    let player_position = physics.pixel_position(player.0);

    for (body, enemy) in &enemies {
        if physics.is_enabled(body.0) {
            continue;
        }

        let distance = player_position.distance(physics.pixel_position(body.0));
        if distance < settings.activation_radius {
            physics.set_enabled(body.0, true);
            debug!(index = enemy.index, kind = %enemy.kind, distance, "Activated enemy");
        }
    }
}

/// Advances every enemy, active or not.
pub fn enemy_update_system(
    dt: Res<DeltaTime>,
    mut physics: ResMut<PhysicsWorld>,
    mut enemies: Query<(&Body, &mut Enemy, &mut Facing)>,
) {
    for (body, mut enemy, mut facing) in &mut enemies {
        enemy.state_timer += dt.0;
        let traits = enemy.kind.traits();

        match enemy.state {
            EnemyState::Walking => {
                if physics.is_enabled(body.0) {
                    let velocity = physics.linear_velocity(body.0);
                    physics.set_linear_velocity(body.0, Vec2::new(enemy.direction * traits.walk_speed, velocity.y));
                }
                *facing = if enemy.direction < 0.0 { Facing::Left } else { Facing::Right };
            }
            EnemyState::Stomped => {
                if enemy.visible && enemy.state_timer >= traits.remains_visible {
                    enemy.visible = false;
                    debug!(index = enemy.index, "Stomped enemy removed from view");
                }
            }
        }
    }
}

/// Flattens stomped enemies and bounces the player off them.
///
/// A stomped enemy keeps its enabled body but no longer collides with anything.
pub fn stomp_system(
    mut events: EventReader<GameEvent>,
    mut physics: ResMut<PhysicsWorld>,
    player: Single<&Body, (With<Player>, Without<Enemy>)>,
    mut enemies: Query<(&Body, &mut Enemy)>,
) {
    for event in events.read() {
        let GameEvent::EnemyStomped(entity) = *event else {
            continue;
        };
        let Ok((body, mut enemy)) = enemies.get_mut(entity) else {
            continue;
        };
        if enemy.state == EnemyState::Stomped {
            continue;
        }

        enemy.state = EnemyState::Stomped;
        enemy.state_timer = 0.0;
        physics.detach_from_collisions(body.0);
        physics.freeze(body.0);

        let velocity = physics.linear_velocity(player.0);
        physics.set_linear_velocity(player.0, Vec2::new(velocity.x, STOMP_BOUNCE_SPEED));
        info!(index = enemy.index, kind = %enemy.kind, "Enemy stomped");
    }
}
