//! Requests from a level to whoever owns it.

use bevy_ecs::resource::Resource;

/// A change of scene requested by the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SceneTransition {
    /// The player died and the death sequence finished.
    GameOver,
    /// The player asked to quit.
    Exit,
}

/// The transition requested during the current frame, if any.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PendingTransition(pub Option<SceneTransition>);

impl PendingTransition {
    /// Records `transition`. A pending game over is never replaced.
    pub fn request(&mut self, transition: SceneTransition) {
        if self.0 != Some(SceneTransition::GameOver) {
            self.0 = Some(transition);
        }
    }

    pub fn take(&mut self) -> Option<SceneTransition> {
        self.0.take()
    }
}
