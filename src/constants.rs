//! This module contains all the constants used in the game.

use std::time::Duration;

use glam::{UVec2, Vec2};

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// Conversion factor between map pixels and physics world units (meters).
pub const PIXELS_PER_METER: f32 = 32.0;

/// The map resource loaded when none is given on the command line.
pub const DEFAULT_MAP: &str = "maps/level1.tmj";

/// Physics simulation constants.
pub mod physics {
    use glam::Vec2;

    /// Fixed downward gravity, in world units per second squared.
    pub const GRAVITY: Vec2 = Vec2::new(0.0, -40.0);
    /// Size of one physics step, in seconds.
    pub const TIME_STEP: f32 = 1.0 / 60.0;
    /// Upper bound on a single frame's delta time fed into the accumulator.
    pub const MAX_FRAME_TIME: f32 = 0.25;
    pub const VELOCITY_ITERATIONS: usize = 6;
    pub const POSITION_ITERATIONS: usize = 2;
}

/// Camera placement and debug-camera movement.
pub mod camera {
    use glam::Vec2;

    /// Player pixel x beyond which the camera starts following.
    pub const FOLLOW_THRESHOLD: f32 = 145.0;
    /// Vertical position the camera is pinned to while following, in world units.
    pub const FOLLOW_HEIGHT: f32 = 7.0;
    /// Visible area, in world units.
    pub const VIEWPORT: Vec2 = Vec2::new(20.0, 14.0);
    /// Debug camera pan speed, in world units per second.
    pub const PAN_SPEED: f32 = 10.0;
    /// Debug camera zoom speed, in zoom factor per second.
    pub const ZOOM_SPEED: f32 = 1.0;
    pub const MIN_ZOOM: f32 = 0.25;
    pub const MAX_ZOOM: f32 = 4.0;
}

/// Player tuning.
pub mod player {
    /// Spawn rectangle (center x, center y, width, height) in map pixels.
    pub const SPAWN: [f32; 4] = [150.0, 40.0, 32.0, 16.0];
    /// Horizontal impulse applied per update while a direction is held.
    pub const RUN_IMPULSE: f32 = 0.6;
    /// Horizontal speed cap, in world units per second.
    pub const MAX_RUN_SPEED: f32 = 8.0;
    /// Vertical impulse applied when jumping; clears a three-tile pipe.
    pub const JUMP_IMPULSE: f32 = 17.0;
    /// Mass of the player's body.
    pub const MASS: f32 = 1.0;
    pub const FRICTION: f32 = 0.4;
    /// Vertical speed given to the player when a stomp bounces it off an enemy.
    pub const STOMP_BOUNCE_SPEED: f32 = 10.0;
    /// Vertical speed of the death hop.
    pub const DEATH_HOP_SPEED: f32 = 14.0;
    /// Vertical speed below which the player counts as standing on something.
    pub const GROUNDED_EPSILON: f32 = 0.05;
    /// Seconds each running frame is shown.
    pub const RUN_FRAME_DURATION: f32 = 0.1;
}

/// Enemy tuning.
pub mod enemy {
    /// Pixel distance to the player under which an enemy's body is activated.
    pub const ACTIVATION_RADIUS: f32 = 300.0;
}

/// Level stage machine timings.
pub mod stage {
    /// Seconds the player's death state must persist before the game is over.
    pub const GAME_OVER_DELAY: f32 = 2.6;
}

/// Audio settings.
pub mod audio {
    /// Background music volume, from 0.0 to 1.0.
    pub const MUSIC_VOLUME: f32 = 0.2;
}

/// The logical size of the window canvas, in pixels.
pub const CANVAS_SIZE: UVec2 = UVec2::new(
    (camera::VIEWPORT.x * PIXELS_PER_METER) as u32,
    (camera::VIEWPORT.y * PIXELS_PER_METER) as u32,
);

/// The scale factor for the window.
pub const SCALE: f32 = 1.5;

/// Converts a map pixel position into world units.
pub fn to_world(pixels: Vec2) -> Vec2 {
    pixels / PIXELS_PER_METER
}

/// Converts a world position into map pixels.
pub fn to_pixels(world: Vec2) -> Vec2 {
    world * PIXELS_PER_METER
}
