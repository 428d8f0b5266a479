//! Player movement, animation state and death.

use bevy_ecs::{
    event::{EventReader, EventWriter},
    query::With,
    system::{Res, ResMut, Single},
};
use glam::Vec2;
use tracing::{debug, info};

use crate::constants::player::{
    DEATH_HOP_SPEED, GROUNDED_EPSILON, JUMP_IMPULSE, MAX_RUN_SPEED, RUN_FRAME_DURATION, RUN_IMPULSE,
};
use crate::events::GameEvent;
use crate::physics::PhysicsWorld;
use crate::systems::components::{Body, DeltaTime, Facing, Player, PlayerAnimation, PlayerState, Size};
use crate::systems::input::{Action, InputState};
use crate::texture::animated::FrameSequence;

const RUNNING_FRAMES: &[&str] = &["player/running_0", "player/running_1", "player/running_2"];

impl PlayerAnimation {
    /// The atlas frames shown while in this state.
    pub fn frames(self) -> FrameSequence {
        match self {
            PlayerAnimation::Standing => FrameSequence::still(&["player/standing"]),
            PlayerAnimation::Running => FrameSequence::new(RUNNING_FRAMES, RUN_FRAME_DURATION, true),
            PlayerAnimation::Jumping => FrameSequence::still(&["player/jumping"]),
            PlayerAnimation::Falling => FrameSequence::still(&["player/falling"]),
            PlayerAnimation::Dying => FrameSequence::still(&["player/dying"]),
        }
    }

    /// Derives the state of a living player from its velocity.
    fn from_motion(velocity: Vec2, previous: PlayerAnimation) -> PlayerAnimation {
        if velocity.y > GROUNDED_EPSILON || (velocity.y < -GROUNDED_EPSILON && previous == PlayerAnimation::Jumping) {
            PlayerAnimation::Jumping
        } else if velocity.y < -GROUNDED_EPSILON {
            PlayerAnimation::Falling
        } else if velocity.x.abs() > GROUNDED_EPSILON {
            PlayerAnimation::Running
        } else {
            PlayerAnimation::Standing
        }
    }

    fn is_grounded(self) -> bool {
        matches!(self, PlayerAnimation::Standing | PlayerAnimation::Running)
    }
}

/// Moves the player from held input and advances its animation state.
pub fn player_system(
    dt: Res<DeltaTime>,
    input: Res<InputState>,
    mut physics: ResMut<PhysicsWorld>,
    mut writer: EventWriter<GameEvent>,
    player: Single<(&Body, &Size, &mut PlayerState, &mut Facing), With<Player>>,
) {
    let (body, size, mut state, mut facing) = player.into_inner();

    if state.is_dying() {
        state.advance(PlayerAnimation::Dying, dt.0);
        return;
    }

    let velocity = physics.linear_velocity(body.0);
    if input.just_pressed(Action::Jump) && state.current.is_grounded() && velocity.y.abs() <= GROUNDED_EPSILON {
        physics.apply_impulse(body.0, Vec2::new(0.0, JUMP_IMPULSE));
    }
    if input.is_held(Action::MoveRight) && velocity.x <= MAX_RUN_SPEED {
        physics.apply_impulse(body.0, Vec2::new(RUN_IMPULSE, 0.0));
    }
    if input.is_held(Action::MoveLeft) && velocity.x >= -MAX_RUN_SPEED {
        physics.apply_impulse(body.0, Vec2::new(-RUN_IMPULSE, 0.0));
    }

    // Fully below the bottom of the map.
    if physics.pixel_position(body.0).y + size.0.y / 2.0 < 0.0 {
        writer.write(GameEvent::PlayerKilled);
    }

    let velocity = physics.linear_velocity(body.0);
    let next = PlayerAnimation::from_motion(velocity, state.current);
    if next != state.current {
        debug!(from = %state.current, to = %next, "Player state changed");
    }
    state.advance(next, dt.0);
    *facing = facing.from_velocity(velocity.x);
}

/// Puts the player into its terminal state when something killed it.
///
/// The dying player stops colliding with anything and hops up before falling
/// out of the level.
pub fn player_death_system(
    mut events: EventReader<GameEvent>,
    mut physics: ResMut<PhysicsWorld>,
    player: Single<(&Body, &mut PlayerState), With<Player>>,
) {
    let (body, mut state) = player.into_inner();

    for event in events.read() {
        if !matches!(event, GameEvent::PlayerKilled) || state.is_dying() {
            continue;
        }

        info!(position = ?physics.pixel_position(body.0), "Player died");
        physics.detach_from_collisions(body.0);
        physics.set_linear_velocity(body.0, Vec2::new(0.0, DEATH_HOP_SPEED));
        state.advance(PlayerAnimation::Dying, 0.0);
    }
}
