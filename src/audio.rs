//! This module handles background music playback through SDL2_mixer.

use std::borrow::Cow;

use sdl2::mixer::{self, Music, AUDIO_S16LSB, DEFAULT_CHANNELS, MAX_VOLUME};
use tracing::{debug, warn};

use crate::asset::Asset;
use crate::error::{GameError, GameResult};
use crate::systems::audio::MusicPlayer;

const AUDIO_FREQUENCY: i32 = 22_050;
const CHUNK_SIZE: i32 = 1024;

/// The background music player.
///
/// If audio fails to initialize, the player is disabled and every operation
/// silently does nothing.
pub struct Audio {
    music: Option<Music<'static>>,
}

impl Default for Audio {
    fn default() -> Self {
        Self::new()
    }
}

impl Audio {
    pub fn new() -> Self {
        match Self::try_new() {
            Ok(audio) => audio,
            Err(e) => {
                warn!("Failed to initialize audio: {}. Audio will be disabled.", e);
                Self { music: None }
            }
        }
    }

    fn try_new() -> GameResult<Self> {
        mixer::open_audio(AUDIO_FREQUENCY, AUDIO_S16LSB, DEFAULT_CHANNELS, CHUNK_SIZE).map_err(GameError::Sdl)?;

        // Music keeps borrowing its bytes for as long as it plays.
        let bytes: &'static [u8] = match Asset::BackgroundMusic.get_bytes()? {
            Cow::Borrowed(bytes) => bytes,
            Cow::Owned(bytes) => Box::leak(bytes.into_boxed_slice()),
        };
        let music = Music::from_static_bytes(bytes).map_err(GameError::Sdl)?;

        debug!(bytes = bytes.len(), "Loaded background music");
        Ok(Self { music: Some(music) })
    }

    pub fn is_disabled(&self) -> bool {
        self.music.is_none()
    }
}

impl MusicPlayer for Audio {
    fn play(&mut self, volume: f32, looping: bool) {
        let Some(music) = &self.music else {
            debug!("Audio disabled, ignoring play request");
            return;
        };

        Music::set_volume((volume.clamp(0.0, 1.0) * MAX_VOLUME as f32).round() as i32);
        if let Err(e) = music.play(if looping { -1 } else { 1 }) {
            warn!(error = %e, "Failed to play background music");
        }
    }

    fn pause(&mut self) {
        if !self.is_disabled() {
            Music::pause();
        }
    }

    fn resume(&mut self) {
        if !self.is_disabled() {
            Music::resume();
        }
    }

    fn stop(&mut self) {
        if !self.is_disabled() {
            Music::halt();
        }
    }
}

impl Drop for Audio {
    fn drop(&mut self) {
        if self.music.take().is_some() {
            Music::halt();
            mixer::close_audio();
        }
    }
}
