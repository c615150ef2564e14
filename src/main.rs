//! Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use pong::audio::{AudioManager, dispatch_cues};
    use pong::consts::*;
    use pong::input::KeyboardState;
    use pong::renderer::{RenderState, build_scene};
    use pong::sim::{FrameControl, GameEvent, GamePhase, GameState, tick};
    use pong::{Settings, StartupError};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        audio: Option<AudioManager>,
        keys: KeyboardState,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                state: GameState::new(seed),
                render_state: None,
                audio: None,
                keys: KeyboardState::new(),
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) -> FrameControl {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut control = FrameControl::Continue;
            let mut substeps = 0;
            while self.accumulator >= FRAME_DT && substeps < MAX_SUBSTEPS {
                let input = self.keys.tick_input();
                control = tick(&mut self.state, &input);
                self.accumulator -= FRAME_DT;
                substeps += 1;

                self.handle_events();
                if control == FrameControl::Exit {
                    break;
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }

            control
        }

        /// Play cues and log what happened this tick
        fn handle_events(&mut self) {
            let events = self.state.drain_events();
            if let Some(audio) = self.audio.as_mut() {
                dispatch_cues(&events, audio);
            }
            for event in &events {
                match event {
                    GameEvent::PointScored { player_won } => log::info!(
                        "Point {} ({} - {})",
                        if *player_won { "won" } else { "lost" },
                        self.state.score.wins,
                        self.state.score.losses
                    ),
                    GameEvent::PhaseChanged { to: GamePhase::Quit, .. } => {
                        if let Some(audio) = self.audio.as_mut() {
                            audio.stop();
                        }
                    }
                    _ => {}
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_scene(&self.state);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update menu/HUD text in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let phase = self.state.phase;

            set_visible(&document, "menu", "overlay", phase == GamePhase::Menu);
            set_visible(&document, "hud", "", phase == GamePhase::Playing);
            set_visible(&document, "goodbye", "overlay", phase == GamePhase::Quit);
            set_visible(&document, "hud-fps", "overlay", self.settings.show_fps);

            if let Some(el) = document.get_element_by_id("hud-wins") {
                el.set_text_content(Some(&format!("Wins: {}", self.state.score.wins)));
            }
            if let Some(el) = document.get_element_by_id("hud-losses") {
                el.set_text_content(Some(&format!("Losses: {}", self.state.score.losses)));
            }
            if let Some(el) = document.get_element_by_id("hud-fps") {
                el.set_text_content(Some(&format!("{} fps", self.fps)));
            }
        }

        fn set_focused(&mut self, focused: bool) {
            if !focused {
                // Keyups will not arrive while unfocused
                self.keys.clear();
            }
            if self.settings.mute_on_blur {
                if let Some(audio) = self.audio.as_ref() {
                    let volume = if focused {
                        self.settings.effective_volume()
                    } else {
                        0.0
                    };
                    audio.set_volume(volume);
                }
            }
        }
    }

    /// Toggle the `hidden` class, keeping the element's base class
    fn set_visible(document: &Document, id: &str, base: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let class = if visible {
                base.to_string()
            } else {
                format!("{base} hidden")
            };
            let _ = el.set_attribute("class", class.trim());
        }
    }

    /// Menu and score text share one font size; scores sit in the top corners
    fn style_text(document: &Document) {
        if let Some(el) = document.get_element_by_id("screen") {
            let _ = el.set_attribute("style", &format!("font-size: {FONT_SIZE_PT}pt"));
        }
        if let Some(el) = document.get_element_by_id("hud-wins") {
            let _ = el.set_attribute("style", &format!("top: {HUD_MARGIN}px; left: {HUD_MARGIN}px"));
        }
        if let Some(el) = document.get_element_by_id("hud-losses") {
            let _ = el.set_attribute(
                "style",
                &format!("top: {HUD_MARGIN}px; right: {HUD_MARGIN}px"),
            );
        }
    }

    pub async fn run() -> Result<(), StartupError> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| StartupError::Logger(e.to_string()))?;

        log::info!("Pong starting...");

        let window = web_sys::window().ok_or(StartupError::NoWindow)?;
        let document = window.document().ok_or(StartupError::NoWindow)?;
        document.set_title(WINDOW_TITLE);

        style_text(&document);

        // Hide loading indicator
        set_visible(&document, "loading", "overlay", false);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or(StartupError::MissingElement("canvas"))?
            .dyn_into()
            .map_err(|_| StartupError::NotACanvas("canvas"))?;

        // Backing store at device resolution, logical size fixed by layout()
        let dpr = window.device_pixel_ratio();
        let width = (SCREEN_WIDTH as f64 * dpr) as u32;
        let height = (SCREEN_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        // Write back normalized values so the stored copy is editable
        settings.save();
        let seed = settings.seed_or(js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU (WebGL fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| StartupError::Surface(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| StartupError::Adapter(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await?;
        game.borrow_mut().render_state = Some(render_state);

        // Browsers may refuse audio until a gesture; play silently then
        let volume = game.borrow().settings.effective_volume();
        match AudioManager::new(volume) {
            Ok(audio) => game.borrow_mut().audio = Some(audio),
            Err(e) => log::warn!("{} - audio disabled", e),
        }

        setup_input_handlers(game.clone());
        setup_focus_handlers(game.clone());

        game.borrow().update_hud();

        // Start game loop
        request_animation_frame(game);

        log::info!("Pong running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if g.keys.press(&event.code()) {
                    event.prevent_default();
                }
                // First gesture unlocks audio
                if let Some(audio) = g.audio.as_ref() {
                    audio.resume();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.release(&event.code());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_focus_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Window blur (click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().set_focused(false);
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().set_focused(true);
            });
            let _ = window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let control = {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                FRAME_DT
            };
            g.last_time = time;

            let control = g.update(dt, time);
            g.render();
            g.update_hud();
            control
        };

        match control {
            FrameControl::Continue => request_animation_frame(game),
            FrameControl::Exit => log::info!("Quit - frame loop stopped"),
        }
    }

    /// Show a startup failure to the player
    pub fn show_error(err: &StartupError) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        set_visible(&document, "loading", "overlay", false);
        if let Some(el) = document.get_element_by_id("error") {
            el.set_text_content(Some(&err.to_string()));
        }
        set_visible(&document, "error", "overlay", true);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {}", e);
        wasm_game::show_error(&e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pong (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` to play in a browser");

    let settings = pong::Settings::load();
    settings.rewrite_stored();
    let seed = settings.seed_or(headless::clock_seed());
    let score = headless::run(seed, headless::DEMO_FRAMES);
    println!("Demo finished: {} wins, {} losses", score.wins, score.losses);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Self-playing demo for native smoke runs
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use pong::audio::{LogSink, dispatch_cues};
    use pong::sim::{FrameControl, GameEvent, GameState, Score, TickInput, tick};

    /// One minute at 60 Hz
    pub const DEMO_FRAMES: u64 = 60 * 60;

    pub fn clock_seed() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    /// Player paddle chases the ball, same rule as the AI
    fn autopilot(state: &GameState) -> TickInput {
        TickInput {
            up: state.ball.pos.y < state.paddle.pos.y,
            down: state.ball.pos.y > state.paddle.pos.y,
            ..Default::default()
        }
    }

    /// Menu -> play `frames` frames -> menu -> quit; returns the final score
    pub fn run(seed: u64, frames: u64) -> Score {
        let mut state = GameState::new(seed);
        let mut audio = LogSink::new();
        log::info!("Headless demo with seed {}", seed);

        let script = std::iter::once(TickInput {
            play: true,
            ..Default::default()
        })
        .chain((0..frames).map(|_| TickInput::default()))
        .chain([
            TickInput {
                menu: true,
                ..Default::default()
            },
            TickInput {
                quit: true,
                ..Default::default()
            },
        ]);

        for scripted in script {
            let input = if scripted == TickInput::default() {
                autopilot(&state)
            } else {
                scripted
            };
            let control = tick(&mut state, &input);

            let events = state.drain_events();
            dispatch_cues(&events, &mut audio);
            for event in &events {
                if let GameEvent::PointScored { player_won } = event {
                    log::info!(
                        "frame {}: point {} ({} - {})",
                        state.frame,
                        if *player_won { "won" } else { "lost" },
                        state.score.wins,
                        state.score.losses
                    );
                }
            }

            if control == FrameControl::Exit {
                break;
            }
        }

        log::info!("{} cues requested", audio.requests());
        state.score
    }
}
