//! Asset loading abstraction.
//!
//! Assets under `assets/` are embedded into the binary; paths that are not
//! embedded are read from the filesystem, so levels can be loaded from anywhere.

use std::borrow::Cow;
use std::path::Path;

use rust_embed::RustEmbed;
use tracing::trace;

use crate::error::AssetError;

#[derive(RustEmbed)]
#[folder = "assets/"]
struct EmbeddedAssets;

/// Assets the game itself depends on (as opposed to user-selected maps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::EnumIter)]
pub enum Asset {
    AtlasImage,
    BackgroundMusic,
}

impl Asset {
    /// The path of this asset relative to the asset root.
    pub fn path(&self) -> &'static str {
        match self {
            Asset::AtlasImage => "game/atlas.bmp",
            Asset::BackgroundMusic => "audio/background.wav",
        }
    }

    pub fn get_bytes(&self) -> Result<Cow<'static, [u8]>, AssetError> {
        get_asset_bytes(self.path())
    }
}

/// Returns the bytes of the asset at `path`.
///
/// Embedded assets take precedence; anything else is read from disk.
pub fn get_asset_bytes(path: &str) -> Result<Cow<'static, [u8]>, AssetError> {
    if let Some(file) = EmbeddedAssets::get(path) {
        trace!(path, "Loaded embedded asset");
        return Ok(file.data);
    }

    let on_disk = Path::new(path);
    if !on_disk.exists() {
        return Err(AssetError::NotFound(path.to_string()));
    }

    trace!(path, "Loading asset from filesystem");
    Ok(Cow::Owned(std::fs::read(on_disk)?))
}
