use platformer::asset::{get_asset_bytes, Asset};
use platformer::error::AssetError;
use speculoos::prelude::*;
use strum::IntoEnumIterator;

#[test]
fn test_embedded_assets_are_available() {
    for asset in Asset::iter() {
        let bytes = asset.get_bytes().unwrap();
        assert_that(&bytes.is_empty()).is_false();
    }
}

#[test]
fn test_bundled_map_is_embedded() {
    let bytes = get_asset_bytes("maps/level1.tmj").unwrap();
    assert_that(&bytes.starts_with(b"{")).is_true();
}

#[test]
fn test_maps_can_be_loaded_from_disk() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/maps/level1.tmj");
    let bytes = get_asset_bytes(path.to_str().unwrap()).unwrap();
    assert_that(&bytes.len()).is_greater_than(0);
}

#[test]
fn test_missing_asset() {
    let result = get_asset_bytes("nowhere/nothing.bin");
    assert!(matches!(result, Err(AssetError::NotFound(path)) if path == "nowhere/nothing.bin"));
}
