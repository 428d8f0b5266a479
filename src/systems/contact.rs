//! Game rules applied to the contacts reported by the physics world.

use bevy_ecs::{
    entity::Entity,
    event::EventWriter,
    query::With,
    system::{Query, ResMut, Single},
};
use tracing::trace;

use crate::events::GameEvent;
use crate::physics::{CollisionCategory, PhysicsWorld};
use crate::systems::components::{Body, Enemy, EnemyState, Player, PlayerState, Size};

/// Resolves this frame's new contacts.
///
/// A player landing on a walking enemy stomps it; touching it any other way
/// kills the player. Enemies turn around when they walk into a stopper or
/// into each other.
pub fn contact_system(
    mut physics: ResMut<PhysicsWorld>,
    mut writer: EventWriter<GameEvent>,
    player: Single<(&Body, &Size, &PlayerState), With<Player>>,
    mut enemies: Query<(&Body, &mut Enemy)>,
) {
    let (player_body, player_size, player_state) = *player;

    for contact in physics.drain_contacts() {
        trace!(?contact, "Contact started");

        if let Some((_, other)) = contact.oriented(CollisionCategory::PLAYER) {
            let Some(enemy_entity) = other.entity.filter(|_| other.category.contains(CollisionCategory::ENEMY)) else {
                continue;
            };
            if player_state.is_dying() {
                continue;
            }
            let Ok((enemy_body, enemy)) = enemies.get(enemy_entity) else {
                continue;
            };
            if enemy.state != EnemyState::Walking {
                continue;
            }

            let feet = physics.pixel_position(player_body.0).y - player_size.0.y / 2.0;
            let enemy_center = physics.pixel_position(enemy_body.0).y;
            trace!(feet, enemy_center, "Player touched enemy");

            if feet > enemy_center {
                writer.write(GameEvent::EnemyStomped(enemy_entity));
            } else {
                writer.write(GameEvent::PlayerKilled);
            }
        } else if let Some((enemy, other)) = contact.oriented(CollisionCategory::ENEMY) {
            if other.category.intersects(CollisionCategory::STOPPER | CollisionCategory::ENEMY) {
                turn_around(&mut enemies, enemy.entity);
                if other.category.contains(CollisionCategory::ENEMY) {
                    turn_around(&mut enemies, other.entity);
                }
            }
        }
    }
}

fn turn_around(enemies: &mut Query<(&Body, &mut Enemy)>, entity: Option<Entity>) {
    let Some(entity) = entity else {
        return;
    };
    if let Ok((_, mut enemy)) = enemies.get_mut(entity) {
        if enemy.state == EnemyState::Walking {
            enemy.reverse();
            trace!(index = enemy.index, direction = enemy.direction, "Enemy turned around");
        }
    }
}
