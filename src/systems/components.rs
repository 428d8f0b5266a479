use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use glam::Vec2;
use rapier2d::prelude::RigidBodyHandle;
use tracing::debug;

use crate::texture::animated::FrameSequence;

/// The physics body backing an entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Body(pub RigidBodyHandle);

/// An entity's size, in map pixels.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Size(pub Vec2);

/// The horizontal direction an entity is looking in.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// The facing matching a horizontal velocity, keeping the current one when still.
    pub fn from_velocity(self, velocity_x: f32) -> Facing {
        if velocity_x > f32::EPSILON {
            Facing::Right
        } else if velocity_x < -f32::EPSILON {
            Facing::Left
        } else {
            self
        }
    }
}

/// A tag component for the entity controlled by the player.
#[derive(Component, Debug, Default)]
pub struct Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumIter)]
pub enum PlayerAnimation {
    Standing,
    Running,
    Jumping,
    Falling,
    /// Terminal; the player never leaves it.
    Dying,
}

/// The player's animation state and how long it has been in it.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    pub current: PlayerAnimation,
    pub previous: PlayerAnimation,
    /// Seconds spent in `current`.
    pub timer: f32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            current: PlayerAnimation::Standing,
            previous: PlayerAnimation::Standing,
            timer: 0.0,
        }
    }
}

impl PlayerState {
    /// Moves to `next`, resetting the timer on a change and accumulating `dt` otherwise.
    pub fn advance(&mut self, next: PlayerAnimation, dt: f32) {
        self.previous = self.current;
        self.current = next;
        if self.current == self.previous {
            self.timer += dt;
        } else {
            self.timer = 0.0;
        }
    }

    pub fn is_dying(&self) -> bool {
        self.current == PlayerAnimation::Dying
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumString, strum_macros::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum EnemyKind {
    Goomba,
}

/// Behaviour shared by every enemy of a kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyTraits {
    /// Walking speed, in world units per second.
    pub walk_speed: f32,
    pub mass: f32,
    pub walking: FrameSequence,
    pub stomped: FrameSequence,
    /// Seconds a stomped enemy stays on screen.
    pub remains_visible: f32,
}

const GOOMBA: EnemyTraits = EnemyTraits {
    walk_speed: 1.0,
    mass: 1.0,
    walking: FrameSequence::new(&["goomba/walking_0", "goomba/walking_1"], 0.2, true),
    stomped: FrameSequence::still(&["goomba/stomped"]),
    remains_visible: 1.0,
};

impl EnemyKind {
    pub fn traits(self) -> &'static EnemyTraits {
        match self {
            EnemyKind::Goomba => &GOOMBA,
        }
    }

    /// Resolves the kind of an enemy spawn object from its class, then its name.
    ///
    /// Objects naming no known kind spawn goombas.
    pub fn from_object(name: &str, class: &str) -> EnemyKind {
        [class, name]
            .iter()
            .find_map(|tag| tag.to_lowercase().parse().ok())
            .unwrap_or_else(|| {
                debug!(name, class, "Enemy object names no known kind, spawning a goomba");
                EnemyKind::Goomba
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum EnemyState {
    Walking,
    Stomped,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Position of the enemy in map order.
    pub index: usize,
    pub state: EnemyState,
    /// Seconds spent in `state`.
    pub state_timer: f32,
    /// -1.0 when walking left, 1.0 when walking right.
    pub direction: f32,
    pub visible: bool,
}

impl Enemy {
    pub fn new(kind: EnemyKind, index: usize) -> Self {
        Self {
            kind,
            index,
            state: EnemyState::Walking,
            state_timer: 0.0,
            direction: -1.0,
            visible: true,
        }
    }

    pub fn reverse(&mut self) {
        self.direction = -self.direction;
    }
}

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: Player,
    pub state: PlayerState,
    pub body: Body,
    pub size: Size,
    pub facing: Facing,
}

#[derive(Bundle)]
pub struct EnemyBundle {
    pub enemy: Enemy,
    pub body: Body,
    pub size: Size,
    pub facing: Facing,
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct DeltaTime(pub f32);

/// Which debug views are switched on.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DebugState {
    /// The camera is moved by hand instead of following the player.
    pub camera: bool,
    /// Physics bodies are drawn as wireframes instead of the scene.
    pub physics: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_timer_resets_on_change() {
        let mut state = PlayerState::default();
        state.advance(PlayerAnimation::Standing, 0.5);
        assert_eq!(state.timer, 0.5);

        state.advance(PlayerAnimation::Running, 0.5);
        assert_eq!(state.timer, 0.0);
        assert_eq!(state.previous, PlayerAnimation::Standing);

        state.advance(PlayerAnimation::Running, 0.25);
        assert_eq!(state.timer, 0.25);
    }

    #[test]
    fn test_enemy_kind_from_object() {
        assert_eq!(EnemyKind::from_object("goomba", ""), EnemyKind::Goomba);
        assert_eq!(EnemyKind::from_object("", "Goomba"), EnemyKind::Goomba);
        assert_eq!(EnemyKind::from_object("mystery", ""), EnemyKind::Goomba);
    }

    #[test]
    fn test_facing_keeps_direction_when_still() {
        assert_eq!(Facing::Left.from_velocity(0.0), Facing::Left);
        assert_eq!(Facing::Left.from_velocity(1.0), Facing::Right);
        assert_eq!(Facing::Right.from_velocity(-1.0), Facing::Left);
    }
}
