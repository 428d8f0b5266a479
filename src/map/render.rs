//! Map rendering functionality.

use glam::Vec2;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, RenderTarget};
use tracing::debug;

use crate::camera::Camera;
use crate::constants::{to_world, CANVAS_SIZE};
use crate::error::TextureError;
use crate::map::TiledMap;
use crate::physics::{CollisionCategory, DebugShape};
use crate::render::TileRange;

/// Tile fill colors, indexed by global tile id minus one.
const TILE_COLORS: [Color; 3] = [
    Color::RGB(181, 83, 40),  // ground
    Color::RGB(0, 168, 0),    // pipe
    Color::RGB(200, 76, 12),  // brick
];

const UNKNOWN_TILE: Color = Color::MAGENTA;

/// Strips the flip flags Tiled stores in the top bits of a global tile id.
const TILE_ID_MASK: u32 = 0x1FFF_FFFF;

/// Draws tile layers and physics wireframes through a camera.
pub struct MapRenderer {
    visible_layers: usize,
}

impl MapRenderer {
    pub fn new(map: &TiledMap) -> Self {
        let visible_layers = map.tile_layers().filter(|layer| layer.visible).count();
        debug!(visible_layers, "Created map renderer");
        Self { visible_layers }
    }

    /// Renders the visible tiles of every visible tile layer.
    pub fn render_tiles<T: RenderTarget>(
        &self,
        canvas: &mut Canvas<T>,
        map: &TiledMap,
        range: &TileRange,
        camera: &Camera,
    ) -> Result<(), TextureError> {
        if self.visible_layers == 0 || range.is_empty() {
            return Ok(());
        }

        let scale = camera.screen_scale(CANVAS_SIZE);
        let tile_size = Vec2::new(map.tile_width as f32, map.tile_height as f32);
        let map_height = map.pixel_size().y;

        for layer in map.tile_layers().filter(|layer| layer.visible) {
            for row in range.rows.clone() {
                for column in range.columns.clone() {
                    let Some(gid) = layer.tile(column, row).filter(|gid| gid & TILE_ID_MASK != 0) else {
                        continue;
                    };

                    // Top-left corner of the tile, y pointing up.
                    let corner = Vec2::new(column as f32 * tile_size.x, map_height - row as f32 * tile_size.y);
                    let screen = camera.world_to_screen(to_world(corner), CANVAS_SIZE);
                    let size = to_world(tile_size) * scale;

                    let id = (gid & TILE_ID_MASK) as usize;
                    canvas.set_draw_color(TILE_COLORS.get(id - 1).copied().unwrap_or(UNKNOWN_TILE));
                    canvas
                        .fill_rect(Rect::new(
                            screen.x.floor() as i32,
                            screen.y.floor() as i32,
                            size.x.ceil() as u32,
                            size.y.ceil() as u32,
                        ))
                        .map_err(TextureError::RenderFailed)?;
                }
            }
        }

        Ok(())
    }

    /// Renders a wireframe box for every collider.
    pub fn render_debug_shapes<T: RenderTarget>(
        &self,
        canvas: &mut Canvas<T>,
        shapes: &[DebugShape],
        camera: &Camera,
    ) -> Result<(), TextureError> {
        let scale = camera.screen_scale(CANVAS_SIZE);

        for shape in shapes {
            let color = if !shape.active {
                Color::GRAY
            } else if shape.category.contains(CollisionCategory::PLAYER) {
                Color::GREEN
            } else if shape.category.contains(CollisionCategory::ENEMY) {
                Color::RED
            } else if shape.category.contains(CollisionCategory::STOPPER) {
                Color::YELLOW
            } else {
                Color::CYAN
            };

            let top_left = camera.world_to_screen(
                Vec2::new(shape.center.x - shape.half_extents.x, shape.center.y + shape.half_extents.y),
                CANVAS_SIZE,
            );
            let size = shape.half_extents * 2.0 * scale;

            canvas.set_draw_color(color);
            canvas
                .draw_rect(Rect::new(
                    top_left.x.round() as i32,
                    top_left.y.round() as i32,
                    (size.x.round() as u32).max(1),
                    (size.y.round() as u32).max(1),
                ))
                .map_err(TextureError::RenderFailed)?;
        }

        Ok(())
    }
}
