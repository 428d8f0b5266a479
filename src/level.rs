//! The level controller: builds a level from its map and drives it frame by frame.

use bevy_ecs::{
    entity::Entity,
    event::{EventRegistry, Events},
    schedule::{IntoScheduleConfigs, Schedule, SystemSet},
    world::World,
};
use glam::Vec2;
use strum::IntoEnumIterator;
use tracing::{debug, info, warn};

use crate::camera::Camera;
use crate::constants::player::{FRICTION, MASS};
use crate::constants::PIXELS_PER_METER;
use crate::error::GameResult;
use crate::events::GameEvent;
use crate::map::{LayerKind, LevelMap, TiledMap};
use crate::physics::bodies::{create_dynamic_body, create_layer_geometry, DynamicBody};
use crate::physics::{CollisionCategory, FixedTimestep, PhysicsWorld};
use crate::render::{build_render_pass, RenderPass, SpriteSheet};
use crate::scene::{PendingTransition, SceneTransition};
use crate::settings::LevelSettings;
use crate::systems::audio::{audio_system, BackgroundMusic, MusicBackend, MusicPlayer};
use crate::systems::camera::camera_system;
use crate::systems::components::{
    Body, DebugState, DeltaTime, Enemy, EnemyBundle, EnemyKind, EnemyState, Facing, Player, PlayerAnimation,
    PlayerBundle, PlayerState, Size,
};
use crate::systems::contact::contact_system;
use crate::systems::enemy::{enemy_activation_system, enemy_update_system, stomp_system};
use crate::systems::input::{command_system, input_system, Bindings, FrameInput, InputState, KeyEvent};
use crate::systems::physics::physics_system;
use crate::systems::player::{player_death_system, player_system};
use crate::systems::stage::{level_active, stage_system, LevelStage};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
enum LevelSet {
    Input,
    Update,
    Respond,
    Present,
}

/// Something a level owned and gave back when it was disposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Released {
    SpriteAtlas,
    TileMap,
    PhysicsWorld,
    BackgroundMusic,
    Player,
    /// An enemy, by its position in map order.
    Enemy(usize),
}

/// The player as seen from outside the level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub pixel_position: Vec2,
    pub world_position: Vec2,
    pub velocity: Vec2,
    pub animation: PlayerAnimation,
    pub state_timer: f32,
}

/// An enemy as seen from outside the level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyView {
    pub index: usize,
    pub kind: EnemyKind,
    pub state: EnemyState,
    pub facing: Facing,
    pub pixel_position: Vec2,
    /// Whether the enemy's body takes part in the simulation.
    pub active: bool,
    pub visible: bool,
}

/// A playable level: its map, physics world, player, enemies and music.
pub struct Level {
    world: World,
    schedule: Schedule,
    player: Entity,
    enemies: Vec<Entity>,
}

impl Level {
    /// Loads the map named in `settings` and builds the level from it.
    pub fn new(settings: LevelSettings) -> GameResult<Self> {
        let map = TiledMap::load(&settings.map_path)?;
        Self::from_map(map, settings)
    }

    /// Builds a level from an already loaded map.
    pub fn from_map(map: TiledMap, settings: LevelSettings) -> GameResult<Self> {
        let mut world = World::default();
        EventRegistry::register_event::<GameEvent>(&mut world);

        debug!("Resolving sprite frames");
        let sprite_sheet = SpriteSheet::load(sprite_frames())?;

        let mut physics = PhysicsWorld::new(
            settings.gravity,
            FixedTimestep::new(settings.time_step, settings.max_frame_time),
            settings.velocity_iterations,
            settings.position_iterations,
        );

        debug!(spawn = ?settings.spawn, "Spawning player");
        let player = world.spawn_empty().id();
        let player_body = create_dynamic_body(
            &mut physics,
            settings.spawn,
            CollisionCategory::PLAYER,
            player,
            DynamicBody {
                mass: MASS,
                friction: FRICTION,
                enabled: true,
            },
        );
        world.entity_mut(player).insert(PlayerBundle {
            player: Player,
            state: PlayerState::default(),
            body: Body(player_body),
            size: Size(settings.spawn.size()),
            facing: Facing::Right,
        });

        let mut enemies = Vec::new();
        for layer in map.object_layers() {
            match layer.kind {
                LayerKind::Enemies => {
                    for object in &layer.objects {
                        let kind = EnemyKind::from_object(&object.name, &object.class);
                        let traits = kind.traits();
                        let rect = object.rect.centered();
                        let index = enemies.len();

                        let entity = world.spawn_empty().id();
                        let body = create_dynamic_body(
                            &mut physics,
                            rect,
                            CollisionCategory::ENEMY,
                            entity,
                            DynamicBody {
                                mass: traits.mass,
                                friction: 0.0,
                                enabled: false,
                            },
                        );
                        world.entity_mut(entity).insert(EnemyBundle {
                            enemy: Enemy::new(kind, index),
                            body: Body(body),
                            size: Size(rect.size()),
                            facing: Facing::Left,
                        });
                        debug!(index, %kind, position = ?rect.position(), "Spawned enemy");
                        enemies.push(entity);
                    }
                }
                LayerKind::EnemyStopper | LayerKind::Solid => {
                    create_layer_geometry(&mut physics, &layer);
                }
            }
        }

        info!(
            enemies = enemies.len(),
            bodies = physics.body_count(),
            map_width = map.width,
            map_height = map.height,
            "Level built"
        );

        world.insert_resource(physics);
        world.insert_resource(sprite_sheet);
        world.insert_resource(LevelMap(map));
        world.insert_resource(BackgroundMusic::start(settings.music_volume));
        world.insert_resource(settings);
        world.insert_resource(LevelStage::default());
        world.insert_resource(DebugState::default());
        world.insert_resource(PendingTransition::default());
        world.insert_resource(DeltaTime::default());
        world.insert_resource(Bindings::default());
        world.insert_resource(InputState::default());
        world.insert_resource(FrameInput::default());

        Ok(Self {
            world,
            schedule: Self::build_schedule(),
            player,
            enemies,
        })
    }

    fn build_schedule() -> Schedule {
        let mut schedule = Schedule::default();
        schedule
            .add_systems((
                (input_system, command_system).chain().in_set(LevelSet::Input),
                (
                    player_system,
                    camera_system,
                    enemy_activation_system,
                    enemy_update_system,
                    physics_system,
                    contact_system,
                    (stomp_system, player_death_system),
                )
                    .chain()
                    .in_set(LevelSet::Update),
                stage_system.in_set(LevelSet::Respond),
                audio_system.in_set(LevelSet::Present),
            ))
            .configure_sets(
                (
                    LevelSet::Input,
                    LevelSet::Update.run_if(level_active),
                    LevelSet::Respond.run_if(level_active),
                    LevelSet::Present,
                )
                    .chain(),
            );
        schedule
    }

    /// Hands background music playback to `player`, starting it right away.
    pub fn attach_music(&mut self, player: Box<dyn MusicPlayer>) {
        let mut backend = MusicBackend::new(player);
        backend.apply(self.world.resource::<BackgroundMusic>());
        self.world.insert_non_send_resource(backend);
    }

    /// Runs one frame.
    ///
    /// The camera is borrowed for the duration of the frame. Returns the scene
    /// transition requested during the frame; `GameOver` is returned at most once.
    pub fn tick(&mut self, dt: f32, camera: &mut Camera, input: &[KeyEvent]) -> Option<SceneTransition> {
        self.world.insert_resource(DeltaTime(dt));
        self.world.resource_mut::<FrameInput>().0.extend_from_slice(input);
        self.world.insert_resource(*camera);

        self.schedule.run(&mut self.world);

        if let Some(updated) = self.world.remove_resource::<Camera>() {
            *camera = updated;
        }
        self.world.resource_mut::<Events<GameEvent>>().update();
        self.world.resource_mut::<PendingTransition>().take()
    }

    /// What to draw this frame.
    pub fn render_pass(&mut self, camera: &Camera) -> RenderPass {
        build_render_pass(&mut self.world, camera)
    }

    pub fn stage(&self) -> LevelStage {
        *self.world.resource::<LevelStage>()
    }

    pub fn debug_state(&self) -> DebugState {
        *self.world.resource::<DebugState>()
    }

    pub fn music(&self) -> BackgroundMusic {
        *self.world.resource::<BackgroundMusic>()
    }

    pub fn settings(&self) -> &LevelSettings {
        self.world.resource::<LevelSettings>()
    }

    pub fn map(&self) -> &TiledMap {
        &self.world.resource::<LevelMap>().0
    }

    pub fn physics(&self) -> &PhysicsWorld {
        self.world.resource::<PhysicsWorld>()
    }

    pub fn player(&self) -> PlayerView {
        let physics = self.physics();
        let body = self.world.get::<Body>(self.player).map(|body| body.0);
        let state = self.world.get::<PlayerState>(self.player).copied().unwrap_or_default();
        let world_position = body.map(|body| physics.translation(body)).unwrap_or_default();

        PlayerView {
            pixel_position: world_position * PIXELS_PER_METER,
            world_position,
            velocity: body.map(|body| physics.linear_velocity(body)).unwrap_or_default(),
            animation: state.current,
            state_timer: state.timer,
        }
    }

    pub fn enemies(&self) -> Vec<EnemyView> {
        let physics = self.physics();
        self.enemies
            .iter()
            .filter_map(|entity| {
                let enemy = self.world.get::<Enemy>(*entity)?;
                let body = self.world.get::<Body>(*entity)?;
                let facing = self.world.get::<Facing>(*entity).copied().unwrap_or_default();
                Some(EnemyView {
                    index: enemy.index,
                    kind: enemy.kind,
                    state: enemy.state,
                    facing,
                    pixel_position: physics.pixel_position(body.0),
                    active: physics.is_enabled(body.0),
                    visible: enemy.visible,
                })
            })
            .collect()
    }

    /// Releases everything the level owns, each resource exactly once.
    ///
    /// Consumes the level, so a second release is impossible. Works whether or
    /// not the level was ever ticked or drawn.
    pub fn dispose(mut self) -> Vec<Released> {
        let mut released = Vec::new();

        if self.world.remove_resource::<SpriteSheet>().is_some() {
            released.push(Released::SpriteAtlas);
        }
        if self.world.remove_resource::<LevelMap>().is_some() {
            released.push(Released::TileMap);
        }
        if self.world.remove_resource::<PhysicsWorld>().is_some() {
            released.push(Released::PhysicsWorld);
        }
        if let Some(mut music) = self.world.remove_resource::<BackgroundMusic>() {
            music.stop();
            if let Some(backend) = self.world.remove_non_send_resource::<MusicBackend>() {
                backend.release();
            }
            released.push(Released::BackgroundMusic);
        }
        if self.world.despawn(self.player) {
            released.push(Released::Player);
        }
        for (index, entity) in self.enemies.drain(..).enumerate() {
            if self.world.despawn(entity) {
                released.push(Released::Enemy(index));
            } else {
                warn!(index, "Enemy was already gone at teardown");
            }
        }

        info!(count = released.len(), "Level disposed");
        for resource in &released {
            debug!(%resource, "Released");
        }
        released
    }
}

/// Every atlas frame the player and the enemies can show.
fn sprite_frames() -> impl Iterator<Item = &'static str> {
    let player = PlayerAnimation::iter().flat_map(|state| state.frames().frames().iter().copied());

    let enemies = EnemyKind::iter()
        .flat_map(|kind| [kind.traits().walking, kind.traits().stomped])
        .flat_map(|frames| frames.frames().iter().copied());

    player.chain(enemies)
}
