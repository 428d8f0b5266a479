use bevy_ecs::{
    query::With,
    resource::Resource,
    system::{Res, ResMut, Single},
};
use tracing::{debug, info};

use crate::scene::{PendingTransition, SceneTransition};
use crate::settings::LevelSettings;
use crate::systems::audio::BackgroundMusic;
use crate::systems::components::{Player, PlayerState};

/// A resource to track the overall stage of the level.
#[derive(Resource, Debug, Default, PartialEq, Eq, Clone, Copy, strum_macros::Display)]
pub enum LevelStage {
    /// The player is alive and in control.
    #[default]
    Playing,
    /// The player has died and the death animation is running; the world keeps updating.
    Dying,
    /// The death sequence is over. Nothing updates anymore.
    GameOver,
}

impl LevelStage {
    /// Whether the world still simulates in this stage.
    pub fn is_active(self) -> bool {
        self != LevelStage::GameOver
    }
}

/// Run condition for everything that stops once the game is over.
pub fn level_active(stage: Res<LevelStage>) -> bool {
    stage.is_active()
}

/// Moves the level through its stages based on the player's state.
///
/// Entering `Dying` pauses the music; entering `GameOver` requests the game
/// over scene. Each transition happens at most once.
pub fn stage_system(
    settings: Res<LevelSettings>,
    mut stage: ResMut<LevelStage>,
    mut music: ResMut<BackgroundMusic>,
    mut pending: ResMut<PendingTransition>,
    player: Single<&PlayerState, With<Player>>,
) {
    let old_stage = *stage;
    let new_stage = match old_stage {
        LevelStage::Playing if player.is_dying() => LevelStage::Dying,
        LevelStage::Dying if player.timer > settings.game_over_delay => LevelStage::GameOver,
        other => other,
    };

    if old_stage == new_stage {
        return;
    }

    debug!(old_stage = %old_stage, new_stage = %new_stage, "Level stage transition");
    match new_stage {
        LevelStage::Dying => {
            music.pause();
        }
        LevelStage::GameOver => {
            info!(dying_for = player.timer, "Game over");
            pending.request(SceneTransition::GameOver);
        }
        LevelStage::Playing => {}
    }
    *stage = new_stage;
}
