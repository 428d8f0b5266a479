//! Object regions read from a map's object layers.

use std::str::FromStr;

use glam::Vec2;

/// An axis-aligned rectangle in map pixels, y pointing up.
///
/// Depending on context `x`/`y` is either the bottom-left corner (as read from
/// the map) or the center (after [`Rect::centered`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Moves the rectangle's origin from its bottom-left corner to its center.
    pub fn centered(&self) -> Rect {
        Rect::new(
            self.x + self.width / 2.0,
            self.y + self.height / 2.0,
            self.width,
            self.height,
        )
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size() / 2.0
    }
}

impl From<[f32; 4]> for Rect {
    fn from([x, y, width, height]: [f32; 4]) -> Self {
        Rect::new(x, y, width, height)
    }
}

/// What the objects of a layer turn into once the level is built.
///
/// Decided once per layer at load time from the layer's name; any name that is
/// not one of the known tags describes solid level geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumString)]
pub enum LayerKind {
    /// Spawn points for enemies.
    #[strum(serialize = "Enemies")]
    Enemies,
    /// Invisible walls that only enemies collide with, turning them around.
    #[strum(serialize = "Enemy-Stopper")]
    EnemyStopper,
    /// Immovable geometry: ground, pipes, bricks.
    #[strum(disabled)]
    Solid,
}

impl LayerKind {
    pub fn from_layer_name(name: &str) -> Self {
        LayerKind::from_str(name).unwrap_or(LayerKind::Solid)
    }
}

/// A named rectangle sourced from the map resource.
///
/// Consumed once while the level is built and never kept afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct MapObject {
    pub id: u32,
    pub name: String,
    /// The object's class as set in the map editor, empty when unset.
    pub class: String,
    /// Bottom-left anchored rectangle, in map pixels with y pointing up.
    pub rect: Rect,
}

/// An object layer with its kind resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct MapLayer {
    pub name: String,
    pub kind: LayerKind,
    pub objects: Vec<MapObject>,
}
