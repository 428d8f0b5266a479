//! Tunables of a level, injected at construction.

use bevy_ecs::resource::Resource;
use glam::Vec2;

use crate::constants::{self, audio, camera, enemy, physics, player, stage};
use crate::map::Rect;

/// Everything a level needs to know that is not part of its map.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct LevelSettings {
    pub map_path: String,
    pub gravity: Vec2,
    pub time_step: f32,
    pub max_frame_time: f32,
    pub velocity_iterations: usize,
    pub position_iterations: usize,
    /// Player spawn rectangle, center-anchored, in map pixels.
    pub spawn: Rect,
    /// Player pixel x beyond which the camera follows the player.
    pub follow_threshold: f32,
    /// Vertical camera position while following, in world units.
    pub camera_height: f32,
    /// Pixel distance under which enemies are activated.
    pub activation_radius: f32,
    /// Seconds the player must have been dying before the game is over.
    pub game_over_delay: f32,
    pub music_volume: f32,
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            map_path: constants::DEFAULT_MAP.to_string(),
            gravity: physics::GRAVITY,
            time_step: physics::TIME_STEP,
            max_frame_time: physics::MAX_FRAME_TIME,
            velocity_iterations: physics::VELOCITY_ITERATIONS,
            position_iterations: physics::POSITION_ITERATIONS,
            spawn: Rect::from(player::SPAWN),
            follow_threshold: camera::FOLLOW_THRESHOLD,
            camera_height: camera::FOLLOW_HEIGHT,
            activation_radius: enemy::ACTIVATION_RADIUS,
            game_over_delay: stage::GAME_OVER_DELAY,
            music_volume: audio::MUSIC_VOLUME,
        }
    }
}

impl LevelSettings {
    pub fn with_map(map_path: impl Into<String>) -> Self {
        Self {
            map_path: map_path.into(),
            ..Self::default()
        }
    }
}
