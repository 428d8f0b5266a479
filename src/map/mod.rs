//! This module defines the level map: loading Tiled maps and reading their object layers.

pub mod object;
#[cfg(feature = "sdl")]
pub mod render;
pub mod tiled;

pub use object::{LayerKind, MapLayer, MapObject, Rect};
pub use tiled::TiledMap;

use bevy_ecs::resource::Resource;

/// The map a level was built from, kept for drawing.
#[derive(Resource, Debug, Clone)]
pub struct LevelMap(pub TiledMap);
