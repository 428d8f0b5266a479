#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use platformer::camera::Camera;
use platformer::constants::camera::VIEWPORT;
use platformer::level::Level;
use platformer::map::{Rect, TiledMap};
use platformer::scene::SceneTransition;
use platformer::settings::LevelSettings;
use platformer::systems::audio::MusicPlayer;
use platformer::systems::input::KeyEvent;
use serde_json::{json, Value};

pub const TILE: f32 = 32.0;
pub const MAP_WIDTH: u32 = 60;
pub const MAP_HEIGHT: u32 = 14;
pub const MAP_PIXEL_HEIGHT: f32 = MAP_HEIGHT as f32 * TILE;
pub const FRAME: f32 = 1.0 / 60.0;

/// A Tiled object whose bottom-left corner sits at (`x`, `y`) with y pointing up.
pub fn object(id: u32, name: &str, x: f32, y: f32, width: f32, height: f32) -> Value {
    json!({
        "id": id,
        "name": name,
        "x": x,
        "y": MAP_PIXEL_HEIGHT - y - height,
        "width": width,
        "height": height,
    })
}

pub fn object_layer(name: &str, objects: Vec<Value>) -> Value {
    json!({
        "type": "objectgroup",
        "name": name,
        "objects": objects,
    })
}

/// A one tile high ground strip from `from` to `to` (pixels).
pub fn ground(from: f32, to: f32) -> Value {
    object_layer("Ground", vec![object(1, "", from, 0.0, to - from, TILE)])
}

/// A goomba standing on the ground with its left edge at `x`.
pub fn goomba(id: u32, x: f32) -> Value {
    object(id, "goomba", x, TILE, TILE, TILE)
}

pub fn map_json(layers: Vec<Value>) -> String {
    json!({
        "width": MAP_WIDTH,
        "height": MAP_HEIGHT,
        "tilewidth": TILE as u32,
        "tileheight": TILE as u32,
        "layers": layers,
    })
    .to_string()
}

pub fn map(layers: Vec<Value>) -> TiledMap {
    TiledMap::from_json_str(&map_json(layers)).expect("fixture map should be valid")
}

/// Settings spawning the player standing on the ground, centered at pixel `x`.
pub fn settings_at(x: f32) -> LevelSettings {
    let mut settings = LevelSettings::default();
    settings.spawn = Rect::new(x, TILE + 8.0, 32.0, 16.0);
    settings
}

/// Settings spawning the player centered at (`x`, `y`) pixels.
pub fn settings_at_height(x: f32, y: f32) -> LevelSettings {
    let mut settings = settings_at(x);
    settings.spawn = Rect::new(x, y, 32.0, 16.0);
    settings
}

pub fn level(layers: Vec<Value>, settings: LevelSettings) -> Level {
    Level::from_map(map(layers), settings).expect("fixture level should build")
}

pub fn camera() -> Camera {
    Camera::new(VIEWPORT)
}

/// Ticks `frames` frames without input, collecting every transition returned.
pub fn run_frames(level: &mut Level, camera: &mut Camera, frames: usize) -> Vec<SceneTransition> {
    (0..frames).filter_map(|_| level.tick(FRAME, camera, &[])).collect()
}

/// Ticks until `done` holds, giving up after `limit` frames. Returns the frames ticked.
pub fn tick_until(level: &mut Level, camera: &mut Camera, limit: usize, done: impl Fn(&Level) -> bool) -> Option<usize> {
    for frame in 1..=limit {
        level.tick(FRAME, camera, &[]);
        if done(level) {
            return Some(frame);
        }
    }
    None
}

pub fn tick_with(level: &mut Level, camera: &mut Camera, input: &[KeyEvent]) -> Option<SceneTransition> {
    level.tick(FRAME, camera, input)
}

/// A music player that records every call it receives.
#[derive(Clone, Default)]
pub struct RecordingMusic {
    pub calls: Rc<RefCell<Vec<&'static str>>>,
}

impl RecordingMusic {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }
}

impl MusicPlayer for RecordingMusic {
    fn play(&mut self, _volume: f32, _looping: bool) {
        self.calls.borrow_mut().push("play");
    }

    fn pause(&mut self) {
        self.calls.borrow_mut().push("pause");
    }

    fn resume(&mut self) {
        self.calls.borrow_mut().push("resume");
    }

    fn stop(&mut self) {
        self.calls.borrow_mut().push("stop");
    }
}
