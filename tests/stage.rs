use platformer::level::Level;
use platformer::render::RenderPass;
use platformer::scene::SceneTransition;
use platformer::systems::audio::MusicState;
use platformer::systems::components::{EnemyState, PlayerAnimation};
use platformer::systems::stage::LevelStage;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

/// A level with nothing under the player, so it falls out of the map and dies.
fn bottomless_level() -> (Level, common::RecordingMusic) {
    let mut level = common::level(vec![], common::settings_at(100.0));
    let music = common::RecordingMusic::default();
    level.attach_music(Box::new(music.clone()));
    (level, music)
}

#[test]
fn test_falling_out_of_the_map_kills_the_player() {
    let (mut level, _) = bottomless_level();
    let mut camera = common::camera();

    let frames = common::tick_until(&mut level, &mut camera, 120, |level| level.stage() == LevelStage::Dying);
    assert_that(&frames).is_some();
    assert_eq!(level.player().animation, PlayerAnimation::Dying);
}

#[test]
fn test_dying_pauses_music() {
    let (mut level, music) = bottomless_level();
    let mut camera = common::camera();
    assert_eq!(music.calls(), vec!["play"]);

    common::tick_until(&mut level, &mut camera, 120, |level| level.stage() == LevelStage::Dying);

    assert_eq!(level.music().state, MusicState::Paused);
    assert_eq!(music.calls(), vec!["play", "pause"]);
}

#[test]
fn test_game_over_is_requested_exactly_once() {
    let (mut level, music) = bottomless_level();
    let mut camera = common::camera();

    let transitions = common::run_frames(&mut level, &mut camera, 600);

    assert_eq!(transitions, vec![SceneTransition::GameOver]);
    assert_eq!(level.stage(), LevelStage::GameOver);
    // Paused, never stopped, while the level is alive.
    assert_eq!(music.calls(), vec!["play", "pause"]);
}

#[test]
fn test_game_over_waits_for_the_death_delay() {
    let (mut level, _) = bottomless_level();
    let mut camera = common::camera();

    common::tick_until(&mut level, &mut camera, 120, |level| level.stage() == LevelStage::Dying);

    let mut timer_at_game_over = None;
    for _ in 0..600 {
        let timer = level.player().state_timer;
        if level.tick(common::FRAME, &mut camera, &[]) == Some(SceneTransition::GameOver) {
            timer_at_game_over = Some(level.player().state_timer);
            assert_that(&timer).is_less_than_or_equal_to(2.6);
            break;
        }
        assert_eq!(level.stage(), LevelStage::Dying);
    }

    let timer = timer_at_game_over.expect("game over should have been reached");
    assert_that(&timer).is_greater_than(2.6);
    assert_that(&timer).is_less_than(2.6 + 2.0 * common::FRAME);
}

#[test]
fn test_nothing_updates_after_game_over() {
    let (mut level, _) = bottomless_level();
    let mut camera = common::camera();
    common::run_frames(&mut level, &mut camera, 600);
    assert_eq!(level.stage(), LevelStage::GameOver);

    let player = level.player();
    let steps = level.physics().steps_taken();
    let updates = camera.update_count();
    let camera_position = camera.position;

    let transitions = common::run_frames(&mut level, &mut camera, 30);

    assert!(transitions.is_empty());
    assert_eq!(level.player(), player);
    assert_eq!(level.physics().steps_taken(), steps);
    assert_eq!(camera.update_count(), updates);
    assert_eq!(camera.position, camera_position);
}

#[test]
fn test_render_pass_is_skipped_after_game_over() {
    let (mut level, _) = bottomless_level();
    let mut camera = common::camera();

    assert!(matches!(level.render_pass(&camera), RenderPass::Normal { .. }));
    common::run_frames(&mut level, &mut camera, 600);
    assert_eq!(level.render_pass(&camera), RenderPass::Skip);
}

#[test]
fn test_world_keeps_updating_while_dying() {
    let (mut level, _) = bottomless_level();
    let mut camera = common::camera();
    common::tick_until(&mut level, &mut camera, 120, |level| level.stage() == LevelStage::Dying);

    let steps = level.physics().steps_taken();
    let position = level.player().pixel_position;
    common::run_frames(&mut level, &mut camera, 30);

    assert_that(&level.physics().steps_taken()).is_greater_than(steps);
    assert_ne!(level.player().pixel_position, position);
}

#[test]
fn test_running_into_an_enemy_kills_the_player() {
    let mut level = common::level(
        vec![
            common::ground(0.0, 1920.0),
            common::object_layer("Enemies", vec![common::goomba(2, 200.0)]),
        ],
        common::settings_at(100.0),
    );
    let mut camera = common::camera();

    let frames = common::tick_until(&mut level, &mut camera, 600, |level| level.stage() == LevelStage::Dying);

    assert_that(&frames).is_some();
    assert_eq!(level.enemies()[0].state, EnemyState::Walking);
}

#[test]
fn test_landing_on_an_enemy_stomps_it() {
    let mut level = common::level(
        vec![
            common::ground(0.0, 1920.0),
            common::object_layer("Enemies", vec![common::goomba(2, 234.0)]),
        ],
        common::settings_at_height(250.0, 160.0),
    );
    let mut camera = common::camera();

    let frames = common::tick_until(&mut level, &mut camera, 120, |level| {
        level.enemies()[0].state == EnemyState::Stomped
    });
    assert_that(&frames).is_some();
    assert_eq!(level.stage(), LevelStage::Playing);
    assert_ne!(level.player().animation, PlayerAnimation::Dying);

    // The flattened enemy lingers for a second, then disappears.
    assert!(level.enemies()[0].visible);
    common::run_frames(&mut level, &mut camera, 90);
    assert!(!level.enemies()[0].visible);
    assert_eq!(level.stage(), LevelStage::Playing);
}
