//! Centralized error types for the platformer.
//!
//! This module defines all error types used throughout the application,
//! providing a consistent error handling approach.

use std::io;

/// Main error type for the platformer.
///
/// This is the primary error type that should be used in public APIs.
/// It can represent any error that can occur while loading or running a level.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Map error: {0}")]
    Map(#[from] MapError),

    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Asset not found: {0}")]
    NotFound(String),
}

/// Errors raised while validating a loaded map.
#[derive(thiserror::Error, Debug)]
pub enum MapError {
    #[error("Map has invalid dimensions: {width}x{height} tiles of {tile_width}x{tile_height} pixels")]
    InvalidDimensions {
        width: u32,
        height: u32,
        tile_width: u32,
        tile_height: u32,
    },

    #[error("Map of {width}x{height} tiles is too large")]
    TooLarge { width: u32, height: u32 },

    #[error("Tile layer '{layer}' of {width}x{height} tiles is too large")]
    LayerTooLarge { layer: String, width: u32, height: u32 },

    #[error("Tile layer '{layer}' holds {found} tiles, expected {expected}")]
    TileCountMismatch { layer: String, expected: usize, found: usize },

    #[error("Object {id} in layer '{layer}' has a negative size")]
    NegativeSize { layer: String, id: u32 },
}

/// Errors related to texture operations.
#[derive(thiserror::Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture: {0}")]
    LoadFailed(String),

    #[error("Texture not found in atlas: {0}")]
    AtlasTileNotFound(String),

    #[error("Rendering failed: {0}")]
    RenderFailed(String),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
