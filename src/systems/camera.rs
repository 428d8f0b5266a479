use bevy_ecs::{
    query::With,
    system::{Res, ResMut, Single},
};
use glam::Vec2;

use crate::camera::Camera;
use crate::constants::camera::{MAX_ZOOM, MIN_ZOOM, PAN_SPEED, ZOOM_SPEED};
use crate::physics::PhysicsWorld;
use crate::settings::LevelSettings;
use crate::systems::components::{Body, DebugState, DeltaTime, Player, PlayerState};
use crate::systems::input::{Action, InputState};

/// Positions the camera, then recomputes its projection.
///
/// Outside debug mode the camera is pinned to the player once the player is
/// past the follow threshold and alive; otherwise it holds its position. In
/// debug mode the camera is panned and zoomed by hand.
pub fn camera_system(
    dt: Res<DeltaTime>,
    settings: Res<LevelSettings>,
    debug_state: Res<DebugState>,
    input: Res<InputState>,
    physics: Res<PhysicsWorld>,
    mut camera: ResMut<Camera>,
    player: Single<(&Body, &PlayerState), With<Player>>,
) {
    let (body, state) = *player;

    if debug_state.camera {
        move_debug_camera(&mut camera, &input, dt.0);
    } else if physics.pixel_position(body.0).x > settings.follow_threshold && !state.is_dying() {
        camera.position = Vec2::new(physics.translation(body.0).x, settings.camera_height);
    }

    camera.update();
}

fn move_debug_camera(camera: &mut Camera, input: &InputState, dt: f32) {
    let mut pan = Vec2::ZERO;
    if input.is_held(Action::PanLeft) {
        pan.x -= 1.0;
    }
    if input.is_held(Action::PanRight) {
        pan.x += 1.0;
    }
    if input.is_held(Action::PanUp) {
        pan.y += 1.0;
    }
    if input.is_held(Action::PanDown) {
        pan.y -= 1.0;
    }
    camera.position += pan * PAN_SPEED * dt;

    if input.is_held(Action::ZoomIn) {
        camera.zoom -= ZOOM_SPEED * dt;
    }
    if input.is_held(Action::ZoomOut) {
        camera.zoom += ZOOM_SPEED * dt;
    }
    camera.zoom = camera.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
}
