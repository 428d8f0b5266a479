use platformer::level::{Level, Released};
use platformer::settings::LevelSettings;
use pretty_assertions::assert_eq;

mod common;

fn expected(enemies: usize) -> Vec<Released> {
    let mut released = vec![
        Released::SpriteAtlas,
        Released::TileMap,
        Released::PhysicsWorld,
        Released::BackgroundMusic,
        Released::Player,
    ];
    released.extend((0..enemies).map(Released::Enemy));
    released
}

#[test]
fn test_never_ticked_level_releases_everything() {
    let level = Level::new(LevelSettings::default()).unwrap();
    assert_eq!(level.dispose(), expected(7));
}

#[test]
fn test_released_resources_are_unique() {
    let level = common::level(
        vec![
            common::ground(0.0, 1920.0),
            common::object_layer("Enemies", vec![common::goomba(2, 300.0), common::goomba(3, 900.0)]),
        ],
        common::settings_at(100.0),
    );

    let released = level.dispose();
    let mut unique = released.clone();
    unique.dedup();
    assert_eq!(released, unique);
    assert_eq!(released, expected(2));
}

#[test]
fn test_teardown_after_game_over() {
    let mut level = common::level(vec![], common::settings_at(100.0));
    let music = common::RecordingMusic::default();
    level.attach_music(Box::new(music.clone()));
    let mut camera = common::camera();

    common::run_frames(&mut level, &mut camera, 600);

    assert_eq!(level.dispose(), expected(0));
    assert_eq!(music.calls(), vec!["play", "pause", "stop"]);
}

#[test]
fn test_teardown_stops_music_once() {
    let mut level = common::level(vec![common::ground(0.0, 640.0)], common::settings_at(100.0));
    let music = common::RecordingMusic::default();
    level.attach_music(Box::new(music.clone()));
    let mut camera = common::camera();
    common::run_frames(&mut level, &mut camera, 10);

    level.dispose();
    assert_eq!(music.calls(), vec!["play", "stop"]);
}

#[test]
fn test_released_display() {
    assert_eq!(Released::SpriteAtlas.to_string(), "SpriteAtlas");
    assert_eq!(Released::Enemy(3).to_string(), "Enemy");
}
