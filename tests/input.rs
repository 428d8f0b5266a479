use platformer::level::Level;
use platformer::scene::SceneTransition;
use platformer::systems::input::{Action, Bindings, Key, KeyEvent};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

fn level() -> Level {
    common::level(vec![common::ground(0.0, 1920.0)], common::settings_at(400.0))
}

fn repeat(key: Key) -> KeyEvent {
    KeyEvent::Down { key, repeat: true }
}

#[test]
fn test_default_bindings() {
    let bindings = Bindings::default();

    assert_that(&bindings.action(Key::D)).is_equal_to(Some(Action::MoveRight));
    assert_that(&bindings.action(Key::Left)).is_equal_to(Some(Action::MoveLeft));
    assert_that(&bindings.action(Key::Space)).is_equal_to(Some(Action::Jump));
    assert_that(&bindings.action(Key::F1)).is_none();
    assert_that(&bindings.command(Key::Enter)).is_none();
}

#[test]
fn test_debug_render_toggles_once_per_press() {
    let mut level = level();
    let mut camera = common::camera();

    common::tick_with(&mut level, &mut camera, &[KeyEvent::pressed(Key::F1)]);
    assert!(level.debug_state().physics);

    // Auto-repeat while the key is held changes nothing.
    for _ in 0..10 {
        common::tick_with(&mut level, &mut camera, &[repeat(Key::F1)]);
        assert!(level.debug_state().physics);
    }

    common::tick_with(&mut level, &mut camera, &[KeyEvent::Up(Key::F1)]);
    common::tick_with(&mut level, &mut camera, &[KeyEvent::pressed(Key::F1)]);
    assert!(!level.debug_state().physics);
}

#[test]
fn test_debug_camera_stops_following() {
    let mut level = level();
    let mut camera = common::camera();

    common::tick_with(&mut level, &mut camera, &[]);
    let followed = camera.position;
    assert_that(&followed.x).is_close_to(level.player().world_position.x, 0.01);

    common::tick_with(&mut level, &mut camera, &[KeyEvent::pressed(Key::F5)]);
    assert!(level.debug_state().camera);

    // Pan right for one second.
    common::tick_with(&mut level, &mut camera, &[KeyEvent::pressed(Key::L)]);
    common::run_frames(&mut level, &mut camera, 59);
    common::tick_with(&mut level, &mut camera, &[KeyEvent::Up(Key::L)]);

    assert_that(&camera.position.x).is_close_to(followed.x + 10.0, 0.5);
    assert_that(&camera.position.y).is_equal_to(followed.y);
}

#[test]
fn test_debug_camera_toggles_back_to_following() {
    let mut level = level();
    let mut camera = common::camera();

    common::tick_with(&mut level, &mut camera, &[KeyEvent::pressed(Key::F5)]);
    common::tick_with(&mut level, &mut camera, &[KeyEvent::pressed(Key::J)]);
    common::run_frames(&mut level, &mut camera, 30);
    common::tick_with(&mut level, &mut camera, &[KeyEvent::Up(Key::J), KeyEvent::Up(Key::F5)]);
    common::tick_with(&mut level, &mut camera, &[KeyEvent::pressed(Key::F5)]);

    assert!(!level.debug_state().camera);
    assert_that(&camera.position.x).is_close_to(level.player().world_position.x, 0.01);
}

#[test]
fn test_debug_camera_zoom_is_clamped() {
    let mut level = level();
    let mut camera = common::camera();

    common::tick_with(&mut level, &mut camera, &[KeyEvent::pressed(Key::F5), KeyEvent::pressed(Key::Z)]);
    common::run_frames(&mut level, &mut camera, 600);

    assert_that(&camera.zoom).is_close_to(0.25, 1e-6);
}

#[test]
fn test_escape_requests_exit() {
    let mut level = level();
    let mut camera = common::camera();

    let transition = common::tick_with(&mut level, &mut camera, &[KeyEvent::pressed(Key::Escape)]);
    assert_eq!(transition, Some(SceneTransition::Exit));

    // Exit is reported once, not every frame.
    assert_eq!(common::tick_with(&mut level, &mut camera, &[]), None);
}

#[test]
fn test_holding_right_runs_right() {
    let mut level = level();
    let mut camera = common::camera();
    let start = level.player().pixel_position.x;

    common::tick_with(&mut level, &mut camera, &[KeyEvent::pressed(Key::D)]);
    common::run_frames(&mut level, &mut camera, 30);

    assert_that(&level.player().pixel_position.x).is_greater_than(start + 16.0);
    assert_that(&level.player().velocity.x).is_greater_than(0.0);
}
