use std::time::{Duration, Instant};

use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::pixels::Color;
use sdl2::render::{Canvas, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::{AudioSubsystem, EventPump, Sdl};
use tracing::{debug, info, trace, warn};

use crate::audio::Audio;
use crate::camera::Camera;
use crate::constants::{camera::VIEWPORT, CANVAS_SIZE, LOOP_TIME, SCALE};
use crate::error::{GameError, GameResult};
use crate::formatter;
use crate::level::Level;
use crate::map::render::MapRenderer;
use crate::platform;
use crate::render::RenderPass;
use crate::scene::SceneTransition;
use crate::settings::LevelSettings;
use crate::systems::input::{Key, KeyEvent};
use crate::texture::sprite::SpriteAtlas;

const SKY: Color = Color::RGB(92, 148, 252);

/// A level together with the GPU resources used to draw it.
struct LevelView {
    level: Level,
    atlas: SpriteAtlas,
    map_renderer: MapRenderer,
}

impl LevelView {
    fn load(settings: &LevelSettings, texture_creator: &TextureCreator<WindowContext>) -> GameResult<Self> {
        let mut level = Level::new(settings.clone())?;
        level.attach_music(Box::new(Audio::new()));
        let atlas = SpriteAtlas::load(texture_creator)?;
        let map_renderer = MapRenderer::new(level.map());

        Ok(Self {
            level,
            atlas,
            map_renderer,
        })
    }

    fn draw(&mut self, canvas: &mut Canvas<Window>, camera: &Camera) -> GameResult<()> {
        match self.level.render_pass(camera) {
            RenderPass::Skip => {}
            RenderPass::Debug { shapes } => {
                canvas.set_draw_color(Color::BLACK);
                canvas.clear();
                self.map_renderer.render_debug_shapes(canvas, &shapes, camera)?;
            }
            RenderPass::Normal { map, sprites } => {
                canvas.set_draw_color(SKY);
                canvas.clear();
                self.map_renderer.render_tiles(canvas, self.level.map(), &map, camera)?;

                let scale = camera.screen_scale(CANVAS_SIZE);
                for sprite in sprites {
                    let center = camera.world_to_screen(sprite.center, CANVAS_SIZE);
                    let size = sprite.size * scale;
                    let dest = sdl2::rect::Rect::from_center(
                        (center.x.round() as i32, center.y.round() as i32),
                        size.x.round() as u32,
                        size.y.round() as u32,
                    );
                    self.atlas.render(canvas, sprite.tile, dest, sprite.flip)?;
                }
            }
        }
        Ok(())
    }

    fn dispose(self) {
        let released = self.level.dispose();
        self.atlas.dispose();
        drop(self.map_renderer);
        debug!(released = released.len(), "Level view disposed");
    }
}

enum Scene {
    Level(Box<LevelView>),
    GameOver,
}

/// Main application wrapper that manages SDL initialization, window lifecycle, and the frame loop.
pub struct App {
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    event_pump: EventPump,
    camera: Camera,
    scene: Scene,
    settings: LevelSettings,
    last_tick: Instant,
    focused: bool,
    // Keep SDL alive for the app lifetime so subsystems (audio) are not shut down
    _sdl_context: Sdl,
    _audio_subsystem: AudioSubsystem,
}

impl App {
    /// Initializes SDL subsystems, creates the window, and loads the level.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Sdl` if any SDL initialization step fails, or propagates
    /// errors from loading the level's map and atlas.
    pub fn new(settings: LevelSettings) -> GameResult<Self> {
        info!("Initializing SDL2 application");
        let sdl_context = sdl2::init().map_err(GameError::Sdl)?;
        let video_subsystem = sdl_context.video().map_err(GameError::Sdl)?;
        let audio_subsystem = sdl_context.audio().map_err(GameError::Sdl)?;
        let event_pump = sdl_context.event_pump().map_err(GameError::Sdl)?;

        let width = (CANVAS_SIZE.x as f32 * SCALE).round() as u32;
        let height = (CANVAS_SIZE.y as f32 * SCALE).round() as u32;
        trace!(width, height, scale = SCALE, "Creating window");
        let window = video_subsystem
            .window("Platformer", width, height)
            .resizable()
            .position_centered()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;

        let mut canvas = window
            .into_canvas()
            .accelerated()
            .present_vsync()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        canvas
            .set_logical_size(CANVAS_SIZE.x, CANVAS_SIZE.y)
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        debug!(renderer_info = ?canvas.info(), "Canvas renderer initialized");

        let texture_creator = canvas.texture_creator();
        let view = LevelView::load(&settings, &texture_creator)?;

        info!(map = %settings.map_path, "Application initialization completed successfully");
        Ok(App {
            canvas,
            texture_creator,
            event_pump,
            camera: Camera::new(VIEWPORT),
            scene: Scene::Level(Box::new(view)),
            settings,
            last_tick: Instant::now(),
            focused: true,
            _sdl_context: sdl_context,
            _audio_subsystem: audio_subsystem,
        })
    }

    /// Executes a single frame with consistent timing.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the app should keep running, `Ok(false)` once the player quit.
    pub fn run(&mut self) -> GameResult<bool> {
        let start = Instant::now();
        let dt = self.last_tick.elapsed().as_secs_f32();
        self.last_tick = start;

        formatter::increment_frame();

        let Some(input) = self.poll_input() else {
            return Ok(false);
        };

        match &mut self.scene {
            Scene::Level(view) => {
                match view.level.tick(dt, &mut self.camera, &input) {
                    Some(SceneTransition::Exit) => return Ok(false),
                    Some(SceneTransition::GameOver) => self.show_game_over(),
                    None => view.draw(&mut self.canvas, &self.camera)?,
                }
            }
            Scene::GameOver => {
                if input.contains(&KeyEvent::pressed(Key::Enter)) {
                    self.restart()?;
                } else if input.iter().any(|event| {
                    matches!(event, KeyEvent::Down { key: Key::Escape | Key::Q, repeat: false })
                }) {
                    return Ok(false);
                }
                self.canvas.set_draw_color(Color::BLACK);
                self.canvas.clear();
            }
        }

        self.canvas.present();

        let elapsed = start.elapsed();
        if elapsed < LOOP_TIME {
            let time = LOOP_TIME.saturating_sub(elapsed);
            if time != Duration::ZERO {
                platform::sleep(time, self.focused);
            }
        } else {
            warn!(elapsed = ?elapsed, budget = ?LOOP_TIME, "Frame took longer than expected");
        }

        Ok(true)
    }

    fn show_game_over(&mut self) {
        if let Scene::Level(view) = std::mem::replace(&mut self.scene, Scene::GameOver) {
            view.dispose();
        }
        info!("Game over, press Enter to play again");
    }

    fn restart(&mut self) -> GameResult<()> {
        info!("Restarting level");
        let view = LevelView::load(&self.settings, &self.texture_creator)?;
        self.camera = Camera::new(VIEWPORT);
        self.scene = Scene::Level(Box::new(view));
        Ok(())
    }

    /// Collects this frame's key events; `None` when the window was closed.
    fn poll_input(&mut self) -> Option<Vec<KeyEvent>> {
        let mut input = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => return None,
                Event::Window { win_event, .. } => match win_event {
                    WindowEvent::FocusGained => self.focused = true,
                    WindowEvent::FocusLost => self.focused = false,
                    _ => {}
                },
                Event::KeyDown {
                    keycode: Some(keycode),
                    repeat,
                    ..
                } => {
                    if let Some(key) = map_keycode(keycode) {
                        input.push(KeyEvent::Down { key, repeat });
                    }
                }
                Event::KeyUp {
                    keycode: Some(keycode), ..
                } => {
                    if let Some(key) = map_keycode(keycode) {
                        input.push(KeyEvent::Up(key));
                    }
                }
                _ => {}
            }
        }

        Some(input)
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Scene::Level(view) = std::mem::replace(&mut self.scene, Scene::GameOver) {
            view.dispose();
        }
    }
}

fn map_keycode(keycode: Keycode) -> Option<Key> {
    let key = match keycode {
        Keycode::A => Key::A,
        Keycode::D => Key::D,
        Keycode::W => Key::W,
        Keycode::Left => Key::Left,
        Keycode::Right => Key::Right,
        Keycode::Up => Key::Up,
        Keycode::Space => Key::Space,
        Keycode::I => Key::I,
        Keycode::J => Key::J,
        Keycode::K => Key::K,
        Keycode::L => Key::L,
        Keycode::Z => Key::Z,
        Keycode::X => Key::X,
        Keycode::F1 => Key::F1,
        Keycode::F5 => Key::F5,
        Keycode::Escape => Key::Escape,
        Keycode::Q => Key::Q,
        Keycode::Return | Keycode::KpEnter => Key::Enter,
        _ => return None,
    };
    Some(key)
}
