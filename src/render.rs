//! What to draw for a frame, decided without touching any graphics backend.

use std::collections::HashMap;
use std::ops::Range;

use bevy_ecs::{resource::Resource, world::World};
use glam::Vec2;
use tracing::trace;

use crate::camera::Camera;
use crate::constants::{to_world, PIXELS_PER_METER};
use crate::error::TextureError;
use crate::map::{LevelMap, TiledMap};
use crate::physics::{DebugShape, PhysicsWorld};
use crate::systems::components::{Body, DebugState, Enemy, EnemyState, Facing, Player, PlayerState, Size};
use crate::systems::stage::LevelStage;
use crate::texture::sprite::{atlas_tile, AtlasTile};

/// The atlas frames a level draws, resolved once when the level is built.
#[derive(Resource, Debug, Clone, Default)]
pub struct SpriteSheet {
    tiles: HashMap<&'static str, AtlasTile>,
}

impl SpriteSheet {
    pub fn load(frames: impl IntoIterator<Item = &'static str>) -> Result<Self, TextureError> {
        let tiles = frames
            .into_iter()
            .map(|name| atlas_tile(name).map(|tile| (name, tile)))
            .collect::<Result<HashMap<_, _>, _>>()?;
        Ok(Self { tiles })
    }

    pub fn get(&self, name: &str) -> Option<AtlasTile> {
        self.tiles.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteOwner {
    Player,
    /// An enemy, by its position in map order.
    Enemy(usize),
}

/// One sprite to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub owner: SpriteOwner,
    pub frame: &'static str,
    pub tile: AtlasTile,
    /// Center of the sprite, in world units.
    pub center: Vec2,
    /// Size of the sprite, in world units.
    pub size: Vec2,
    /// Mirror horizontally; atlas frames face right.
    pub flip: bool,
}

/// The block of map tiles inside the camera's view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRange {
    pub columns: Range<u32>,
    /// Rows counted from the top of the map, as stored.
    pub rows: Range<u32>,
}

impl TileRange {
    pub fn visible(map: &TiledMap, camera: &Camera) -> Self {
        let (min, max) = camera.visible_bounds();
        let (min, max) = (min * PIXELS_PER_METER, max * PIXELS_PER_METER);
        let tile_width = map.tile_width as f32;
        let tile_height = map.tile_height as f32;
        let map_height = map.pixel_size().y;

        let clamp = |value: f32, limit: u32| (value.max(0.0) as u32).min(limit);
        Self {
            columns: clamp((min.x / tile_width).floor(), map.width)..clamp((max.x / tile_width).ceil(), map.width),
            rows: clamp(((map_height - max.y) / tile_height).floor(), map.height)
                ..clamp(((map_height - min.y) / tile_height).ceil(), map.height),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.rows.is_empty()
    }
}

/// A frame's drawing instructions.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderPass {
    /// The game is over; nothing is drawn.
    Skip,
    /// Wireframes of the physics bodies in place of the scene.
    Debug { shapes: Vec<DebugShape> },
    /// The map, then the player, then the enemies, in that order.
    Normal { map: TileRange, sprites: Vec<SpriteDraw> },
}

/// Builds the render pass for the level in `world`, seen through `camera`.
pub fn build_render_pass(world: &mut World, camera: &Camera) -> RenderPass {
    if !world.resource::<LevelStage>().is_active() {
        return RenderPass::Skip;
    }

    if world.resource::<DebugState>().physics {
        let shapes = world.resource::<PhysicsWorld>().debug_shapes();
        trace!(shapes = shapes.len(), "Built physics debug pass");
        return RenderPass::Debug { shapes };
    }

    let map = TileRange::visible(&world.resource::<LevelMap>().0, camera);

    let mut sprites = Vec::new();
    let mut players = world.query_filtered::<(&Body, &Size, &PlayerState, &Facing), bevy_ecs::query::With<Player>>();
    let mut enemies = world.query::<(&Body, &Size, &Enemy, &Facing)>();

    let physics = world.resource::<PhysicsWorld>();
    let sheet = world.resource::<SpriteSheet>();

    for (body, size, state, facing) in players.iter(world) {
        let frame = state.current.frames().frame_at(state.timer);
        if let Some(sprite) = place_sprite(sheet, physics, SpriteOwner::Player, frame, body, size, *facing) {
            sprites.push(sprite);
        }
    }

    let mut visible_enemies: Vec<_> = enemies.iter(world).filter(|(_, _, enemy, _)| enemy.visible).collect();
    visible_enemies.sort_by_key(|(_, _, enemy, _)| enemy.index);
    for (body, size, enemy, facing) in visible_enemies {
        let traits = enemy.kind.traits();
        let frames = match enemy.state {
            EnemyState::Walking => traits.walking,
            EnemyState::Stomped => traits.stomped,
        };
        let frame = frames.frame_at(enemy.state_timer);
        if let Some(sprite) = place_sprite(sheet, physics, SpriteOwner::Enemy(enemy.index), frame, body, size, *facing) {
            sprites.push(sprite);
        }
    }

    trace!(sprites = sprites.len(), columns = ?map.columns, "Built render pass");
    RenderPass::Normal { map, sprites }
}

/// Places a frame over a body: as wide as the body, keeping the frame's aspect
/// ratio, standing on the body's bottom edge.
fn place_sprite(
    sheet: &SpriteSheet,
    physics: &PhysicsWorld,
    owner: SpriteOwner,
    frame: &'static str,
    body: &Body,
    size: &Size,
    facing: Facing,
) -> Option<SpriteDraw> {
    let tile = sheet.get(frame)?;
    let body_center = physics.pixel_position(body.0);

    let width = size.0.x;
    let height = width * f32::from(tile.size.y) / f32::from(tile.size.x.max(1));
    let bottom = body_center.y - size.0.y / 2.0;

    Some(SpriteDraw {
        owner,
        frame,
        tile,
        center: to_world(Vec2::new(body_center.x, bottom + height / 2.0)),
        size: to_world(Vec2::new(width, height)),
        flip: facing == Facing::Left,
    })
}
