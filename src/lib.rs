//! Tile-map driven platformer level library crate.

#[cfg(feature = "sdl")]
pub mod app;
pub mod asset;
#[cfg(feature = "sdl")]
pub mod audio;
pub mod camera;
pub mod constants;
pub mod error;
pub mod events;
pub mod formatter;
pub mod level;
pub mod map;
pub mod physics;
pub mod platform;
pub mod render;
pub mod scene;
pub mod settings;
pub mod systems;
pub mod texture;
