//! Tiled JSON map format (`.tmj`).

use glam::Vec2;
use serde::Deserialize;
use tracing::{debug, info};

use crate::asset::get_asset_bytes;
use crate::error::{GameResult, MapError};
use crate::map::object::{LayerKind, MapLayer, MapObject, Rect};

/// A tile map as stored by the Tiled editor.
#[derive(Debug, Clone, Deserialize)]
pub struct TiledMap {
    /// Width of the map, in tiles.
    pub width: u32,
    /// Height of the map, in tiles.
    pub height: u32,
    #[serde(rename = "tilewidth")]
    pub tile_width: u32,
    #[serde(rename = "tileheight")]
    pub tile_height: u32,
    #[serde(default)]
    pub layers: Vec<Layer>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Layer {
    #[serde(rename = "tilelayer")]
    Tiles(TileLayer),
    #[serde(rename = "objectgroup")]
    Objects(ObjectLayer),
    /// Image layers and groups carry nothing the level uses.
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TileLayer {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Global tile ids, row by row from the top; 0 is an empty cell.
    pub data: Vec<u32>,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

impl TileLayer {
    /// The tile id at column `x`, row `y` (rows counted from the top).
    pub fn tile(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.data.get(index).copied()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectLayer {
    pub name: String,
    #[serde(default)]
    pub objects: Vec<TiledObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TiledObject {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    /// The class as written by Tiled 1.9 and later.
    #[serde(default)]
    pub class: Option<String>,
    /// The same value under its pre-1.9 key.
    #[serde(default, rename = "type")]
    pub legacy_type: Option<String>,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
}

impl TiledObject {
    /// The object's class, preferring the current key when both are set.
    pub fn class(&self) -> &str {
        [&self.class, &self.legacy_type]
            .into_iter()
            .filter_map(|key| key.as_deref())
            .find(|class| !class.is_empty())
            .unwrap_or_default()
    }
}

fn visible_by_default() -> bool {
    true
}

impl TiledMap {
    /// Loads and validates the map at `path`.
    pub fn load(path: &str) -> GameResult<Self> {
        let bytes = get_asset_bytes(path)?;
        let map = Self::from_json(&bytes)?;
        info!(
            path,
            width = map.width,
            height = map.height,
            layers = map.layers.len(),
            "Loaded tile map"
        );
        Ok(map)
    }

    pub fn from_json(bytes: &[u8]) -> GameResult<Self> {
        let map: TiledMap = serde_json::from_slice(bytes)?;
        map.validate()?;
        Ok(map)
    }

    pub fn from_json_str(json: &str) -> GameResult<Self> {
        Self::from_json(json.as_bytes())
    }

    fn validate(&self) -> Result<(), MapError> {
        if self.width == 0 || self.height == 0 || self.tile_width == 0 || self.tile_height == 0 {
            return Err(MapError::InvalidDimensions {
                width: self.width,
                height: self.height,
                tile_width: self.tile_width,
                tile_height: self.tile_height,
            });
        }

        // Pixel sizes are computed unchecked everywhere else.
        if self.width.checked_mul(self.tile_width).is_none() || self.height.checked_mul(self.tile_height).is_none() {
            return Err(MapError::TooLarge {
                width: self.width,
                height: self.height,
            });
        }

        for layer in &self.layers {
            match layer {
                Layer::Tiles(tiles) => {
                    let Some(cells) = tiles.width.checked_mul(tiles.height) else {
                        return Err(MapError::LayerTooLarge {
                            layer: tiles.name.clone(),
                            width: tiles.width,
                            height: tiles.height,
                        });
                    };
                    let expected = cells as usize;
                    if tiles.data.len() != expected {
                        return Err(MapError::TileCountMismatch {
                            layer: tiles.name.clone(),
                            expected,
                            found: tiles.data.len(),
                        });
                    }
                }
                Layer::Objects(objects) => {
                    if let Some(object) = objects.objects.iter().find(|o| o.width < 0.0 || o.height < 0.0) {
                        return Err(MapError::NegativeSize {
                            layer: objects.name.clone(),
                            id: object.id,
                        });
                    }
                }
                Layer::Unsupported => {}
            }
        }

        Ok(())
    }

    /// Size of the whole map, in pixels.
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(
            (self.width * self.tile_width) as f32,
            (self.height * self.tile_height) as f32,
        )
    }

    pub fn tile_layers(&self) -> impl Iterator<Item = &TileLayer> {
        self.layers.iter().filter_map(|layer| match layer {
            Layer::Tiles(tiles) => Some(tiles),
            _ => None,
        })
    }

    /// Object layers with their kinds resolved and rectangles flipped to y-up.
    ///
    /// Tiled anchors objects at their top-left corner with y growing downwards;
    /// the level works with bottom-left anchored rectangles and y growing upwards.
    pub fn object_layers(&self) -> Vec<MapLayer> {
        let map_height = self.pixel_size().y;

        self.layers
            .iter()
            .filter_map(|layer| match layer {
                Layer::Objects(group) => Some(group),
                Layer::Tiles(_) => None,
                Layer::Unsupported => {
                    debug!("Skipping unsupported map layer");
                    None
                }
            })
            .map(|group| {
                let kind = LayerKind::from_layer_name(&group.name);
                debug!(layer = %group.name, %kind, objects = group.objects.len(), "Resolved object layer");

                MapLayer {
                    name: group.name.clone(),
                    kind,
                    objects: group
                        .objects
                        .iter()
                        .map(|object| MapObject {
                            id: object.id,
                            name: object.name.clone(),
                            class: object.class().to_string(),
                            rect: Rect::new(
                                object.x,
                                map_height - (object.y + object.height),
                                object.width,
                                object.height,
                            ),
                        })
                        .collect(),
                }
            })
            .collect()
    }
}
