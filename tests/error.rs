use std::io;

use platformer::error::{AssetError, GameError, MapError, TextureError};
use pretty_assertions::assert_eq;

#[test]
fn test_game_error_display() {
    let error = GameError::Sdl("no video device".to_string());
    assert_eq!(error.to_string(), "SDL error: no video device");

    let error = GameError::Logging("already set".to_string());
    assert_eq!(error.to_string(), "Logging setup failed: already set");
}

#[test]
fn test_nested_errors_convert() {
    let error: GameError = AssetError::NotFound("maps/level9.tmj".to_string()).into();
    assert_eq!(error.to_string(), "Asset error: Asset not found: maps/level9.tmj");

    let error: GameError = TextureError::AtlasTileNotFound("koopa/walking_0".to_string()).into();
    assert_eq!(
        error.to_string(),
        "Texture error: Texture not found in atlas: koopa/walking_0"
    );

    let error: GameError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
    assert!(matches!(error, GameError::Io(_)));
}

#[test]
fn test_map_error_display() {
    let error = MapError::InvalidDimensions {
        width: 0,
        height: 14,
        tile_width: 32,
        tile_height: 32,
    };
    assert_eq!(
        error.to_string(),
        "Map has invalid dimensions: 0x14 tiles of 32x32 pixels"
    );

    let error = MapError::TileCountMismatch {
        layer: "Terrain".to_string(),
        expected: 4,
        found: 3,
    };
    assert_eq!(error.to_string(), "Tile layer 'Terrain' holds 3 tiles, expected 4");
}

#[test]
fn test_oversized_map_error_display() {
    let error = MapError::TooLarge { width: 200_000_000, height: 14 };
    assert_eq!(error.to_string(), "Map of 200000000x14 tiles is too large");

    let error = MapError::LayerTooLarge {
        layer: "Terrain".to_string(),
        width: 70000,
        height: 70000,
    };
    assert_eq!(error.to_string(), "Tile layer 'Terrain' of 70000x70000 tiles is too large");
}
