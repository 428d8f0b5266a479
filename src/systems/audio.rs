//! Background music state and its synchronisation with an audio backend.
//!
//! The level only tracks what the music should be doing. An optional backend,
//! stored as a non-send resource since mixer handles must stay on the main
//! thread, is brought in line whenever that state changes.

use bevy_ecs::{
    change_detection::DetectChanges,
    resource::Resource,
    system::{NonSendMut, Res},
};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum MusicState {
    Playing,
    Paused,
    Stopped,
}

/// The level's looping background track.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct BackgroundMusic {
    pub state: MusicState,
    /// From 0.0 to 1.0.
    pub volume: f32,
    pub looping: bool,
}

impl BackgroundMusic {
    /// A looping track that starts playing right away.
    pub fn start(volume: f32) -> Self {
        debug!(volume, "Starting background music");
        Self {
            state: MusicState::Playing,
            volume,
            looping: true,
        }
    }

    pub fn pause(&mut self) {
        if self.state == MusicState::Playing {
            self.state = MusicState::Paused;
            debug!("Background music paused");
        }
    }

    pub fn resume(&mut self) {
        if self.state == MusicState::Paused {
            self.state = MusicState::Playing;
            debug!("Background music resumed");
        }
    }

    pub fn stop(&mut self) {
        if self.state != MusicState::Stopped {
            self.state = MusicState::Stopped;
            debug!("Background music stopped");
        }
    }
}

/// Something that can actually play the background track.
pub trait MusicPlayer {
    fn play(&mut self, volume: f32, looping: bool);
    fn pause(&mut self);
    fn resume(&mut self);
    fn stop(&mut self);
}

/// Non-send resource wrapper around the active [`MusicPlayer`].
pub struct MusicBackend {
    player: Box<dyn MusicPlayer>,
    applied: Option<MusicState>,
}

impl MusicBackend {
    pub fn new(player: Box<dyn MusicPlayer>) -> Self {
        Self { player, applied: None }
    }

    /// Brings the backend in line with `music`, doing nothing if it already is.
    pub fn apply(&mut self, music: &BackgroundMusic) {
        if self.applied == Some(music.state) {
            return;
        }

        match (self.applied, music.state) {
            (Some(MusicState::Paused), MusicState::Playing) => self.player.resume(),
            (_, MusicState::Playing) => self.player.play(music.volume, music.looping),
            (_, MusicState::Paused) => self.player.pause(),
            (_, MusicState::Stopped) => self.player.stop(),
        }
        self.applied = Some(music.state);
    }

    /// Stops playback and gives up the backend.
    pub fn release(mut self) {
        self.player.stop();
    }
}

/// System that pushes background music changes to the backend, if there is one.
pub fn audio_system(music: Res<BackgroundMusic>, backend: Option<NonSendMut<MusicBackend>>) {
    if !music.is_changed() {
        return;
    }
    if let Some(mut backend) = backend {
        backend.apply(&music);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Default)]
    struct Log(Rc<RefCell<Vec<&'static str>>>);

    impl MusicPlayer for Log {
        fn play(&mut self, _volume: f32, _looping: bool) {
            self.0.borrow_mut().push("play");
        }
        fn pause(&mut self) {
            self.0.borrow_mut().push("pause");
        }
        fn resume(&mut self) {
            self.0.borrow_mut().push("resume");
        }
        fn stop(&mut self) {
            self.0.borrow_mut().push("stop");
        }
    }

    #[test]
    fn test_backend_applies_each_state_once() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut backend = MusicBackend::new(Box::new(Log(calls.clone())));
        let mut music = BackgroundMusic::start(0.2);

        backend.apply(&music);
        backend.apply(&music);
        music.pause();
        backend.apply(&music);
        music.resume();
        backend.apply(&music);
        backend.release();

        assert_eq!(*calls.borrow(), vec!["play", "pause", "resume", "stop"]);
    }

    #[test]
    fn test_stopped_music_cannot_resume() {
        let mut music = BackgroundMusic::start(0.2);
        music.stop();
        music.resume();
        assert_eq!(music.state, MusicState::Stopped);
    }
}
