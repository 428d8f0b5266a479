use std::collections::{HashMap, HashSet};

use bevy_ecs::{
    event::{EventReader, EventWriter},
    resource::Resource,
    system::{Res, ResMut},
};
use tracing::{debug, info};

use crate::events::{GameCommand, GameEvent};
use crate::scene::{PendingTransition, SceneTransition};
use crate::systems::components::DebugState;

/// The keys the level reacts to, independent of any windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumIter)]
pub enum Key {
    A,
    D,
    W,
    Left,
    Right,
    Up,
    Space,
    I,
    J,
    K,
    L,
    Z,
    X,
    F1,
    F5,
    Escape,
    Q,
    Enter,
}

/// A keyboard event as delivered by the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down { key: Key, repeat: bool },
    Up(Key),
}

impl KeyEvent {
    /// A fresh key press, not an auto-repeat.
    pub fn pressed(key: Key) -> Self {
        KeyEvent::Down { key, repeat: false }
    }
}

/// Continuous actions driven by held keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    ZoomIn,
    ZoomOut,
}

#[derive(Debug, Clone, Resource)]
pub struct Bindings {
    key_bindings: HashMap<Key, GameCommand>,
    action_bindings: HashMap<Key, Action>,
}

impl Default for Bindings {
    fn default() -> Self {
        let key_bindings = HashMap::from([
            (Key::F5, GameCommand::ToggleDebugCamera),
            (Key::F1, GameCommand::ToggleDebugRender),
            (Key::Escape, GameCommand::Exit),
            (Key::Q, GameCommand::Exit),
        ]);

        let action_bindings = HashMap::from([
            // Player movement
            (Key::A, Action::MoveLeft),
            (Key::Left, Action::MoveLeft),
            (Key::D, Action::MoveRight),
            (Key::Right, Action::MoveRight),
            (Key::W, Action::Jump),
            (Key::Up, Action::Jump),
            (Key::Space, Action::Jump),
            // Debug camera
            (Key::J, Action::PanLeft),
            (Key::L, Action::PanRight),
            (Key::I, Action::PanUp),
            (Key::K, Action::PanDown),
            (Key::Z, Action::ZoomIn),
            (Key::X, Action::ZoomOut),
        ]);

        Self {
            key_bindings,
            action_bindings,
        }
    }
}

impl Bindings {
    pub fn command(&self, key: Key) -> Option<GameCommand> {
        self.key_bindings.get(&key).copied()
    }

    pub fn action(&self, key: Key) -> Option<Action> {
        self.action_bindings.get(&key).copied()
    }
}

/// Keyboard state as of the current frame.
#[derive(Debug, Default, Clone, Resource)]
pub struct InputState {
    held_keys: HashSet<Key>,
    held: HashSet<Action>,
    pressed: HashSet<Action>,
}

impl InputState {
    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    /// Whether `action` was started by a key press this frame.
    pub fn just_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }
}

/// Raw key events delivered for the current frame.
#[derive(Debug, Default, Clone, Resource)]
pub struct FrameInput(pub Vec<KeyEvent>);

/// Turns this frame's key events into commands and held actions.
///
/// Commands fire on the initial press only; auto-repeated presses are ignored,
/// so holding a toggle key flips it exactly once.
pub fn input_system(
    bindings: Res<Bindings>,
    mut frame: ResMut<FrameInput>,
    mut input: ResMut<InputState>,
    mut writer: EventWriter<GameEvent>,
) {
    input.pressed.clear();

    for event in frame.0.drain(..) {
        match event {
            KeyEvent::Down { key, repeat: false } => {
                if let Some(command) = bindings.command(key) {
                    writer.write(GameEvent::Command(command));
                }
                if let Some(action) = bindings.action(key) {
                    input.pressed.insert(action);
                }
                input.held_keys.insert(key);
            }
            KeyEvent::Down { repeat: true, .. } => {}
            KeyEvent::Up(key) => {
                input.held_keys.remove(&key);
            }
        }
    }

    let held: HashSet<Action> = input.held_keys.iter().filter_map(|key| bindings.action(*key)).collect();
    input.held = held;
}

/// Applies commands: debug toggles and exit requests.
pub fn command_system(
    mut events: EventReader<GameEvent>,
    mut debug_state: ResMut<DebugState>,
    mut pending: ResMut<PendingTransition>,
) {
    for event in events.read() {
        let GameEvent::Command(command) = event else {
            continue;
        };

        match command {
            GameCommand::ToggleDebugCamera => {
                debug_state.camera = !debug_state.camera;
                debug!(enabled = debug_state.camera, "Toggled debug camera");
            }
            GameCommand::ToggleDebugRender => {
                debug_state.physics = !debug_state.physics;
                debug!(enabled = debug_state.physics, "Toggled physics debug view");
            }
            GameCommand::Exit => {
                info!("Exit requested");
                pending.request(SceneTransition::Exit);
            }
        }
    }
}
