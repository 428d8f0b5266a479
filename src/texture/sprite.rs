//! Sprite atlas frames.
//!
//! Frame rectangles are generated at build time from `assets/game/atlas.json`;
//! the atlas texture itself only exists with the SDL frontend.

use glam::U16Vec2;

use crate::error::TextureError;

/// A frame's rectangle within the atlas image, in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MapperFrame {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

mod atlas_data {
    include!(concat!(env!("OUT_DIR"), "/atlas_data.rs"));
}

pub use atlas_data::ATLAS_FRAMES;

/// A single tile within the sprite atlas, defined by its position and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AtlasTile {
    pub pos: U16Vec2,
    pub size: U16Vec2,
}

impl From<MapperFrame> for AtlasTile {
    fn from(frame: MapperFrame) -> Self {
        Self {
            pos: U16Vec2::new(frame.x, frame.y),
            size: U16Vec2::new(frame.width, frame.height),
        }
    }
}

/// Looks up a named frame in the atlas.
pub fn atlas_tile(name: &str) -> Result<AtlasTile, TextureError> {
    ATLAS_FRAMES
        .get(name)
        .copied()
        .map(AtlasTile::from)
        .ok_or_else(|| TextureError::AtlasTileNotFound(name.to_string()))
}

#[cfg(feature = "sdl")]
pub use self::sdl_atlas::SpriteAtlas;

#[cfg(feature = "sdl")]
mod sdl_atlas {
    use sdl2::pixels::Color;
    use sdl2::rect::Rect;
    use sdl2::render::{Canvas, RenderTarget, Texture, TextureCreator};
    use sdl2::rwops::RWops;
    use sdl2::surface::Surface;
    use tracing::debug;

    use super::{AtlasTile, ATLAS_FRAMES};
    use crate::asset::Asset;
    use crate::error::{GameError, GameResult, TextureError};

    /// Pixels of this color in the atlas image are transparent.
    const COLOR_KEY: Color = Color::RGB(255, 0, 255);

    /// The character atlas texture.
    pub struct SpriteAtlas {
        texture: Texture,
    }

    impl SpriteAtlas {
        pub fn load<T>(texture_creator: &TextureCreator<T>) -> GameResult<Self> {
            let bytes = Asset::AtlasImage.get_bytes()?;
            let mut rwops = RWops::from_bytes(&bytes).map_err(GameError::Sdl)?;
            let mut surface = Surface::load_bmp_rw(&mut rwops).map_err(GameError::Sdl)?;
            surface.set_color_key(true, COLOR_KEY).map_err(GameError::Sdl)?;

            let texture = texture_creator
                .create_texture_from_surface(&surface)
                .map_err(|e| TextureError::LoadFailed(e.to_string()))?;

            debug!(tile_count = ATLAS_FRAMES.len(), "Loaded sprite atlas");
            Ok(Self { texture })
        }

        /// Draws `tile` into `dest`, mirrored horizontally when `flip` is set.
        pub fn render<C: RenderTarget>(
            &self,
            canvas: &mut Canvas<C>,
            tile: AtlasTile,
            dest: Rect,
            flip: bool,
        ) -> Result<(), TextureError> {
            let src = Rect::new(tile.pos.x as i32, tile.pos.y as i32, tile.size.x as u32, tile.size.y as u32);
            canvas
                .copy_ex(&self.texture, src, dest, 0.0, None, flip, false)
                .map_err(TextureError::RenderFailed)
        }

        /// Releases the GPU texture.
        pub fn dispose(self) {
            // SAFETY: the canvas that created the texture outlives every level view.
            unsafe { self.texture.destroy() };
            debug!("Released sprite atlas texture");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atlas_tile_lookup() {
        let tile = atlas_tile("goomba/stomped").unwrap();
        assert_eq!(tile.pos, U16Vec2::new(32, 24));
        assert_eq!(tile.size, U16Vec2::new(16, 8));
    }

    #[test]
    fn test_missing_atlas_tile() {
        assert!(matches!(
            atlas_tile("koopa/walking_0"),
            Err(TextureError::AtlasTileNotFound(name)) if name == "koopa/walking_0"
        ));
    }
}
