//! Everglow entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use everglow::audio::AudioManager;
    use everglow::feedback::{FeedbackEvent, MusicCue};
    use everglow::persistence::Storage;
    use everglow::platform::{InputAction, action_for_key, action_for_tap};
    use everglow::renderer::canvas::CanvasPainter;
    use everglow::{App, HighScore, Screen, Settings};

    /// Game instance holding all state
    struct Game {
        app: App,
        painter: Option<CanvasPainter>,
        audio: AudioManager,
        storage: Storage,
        last_cue: Option<MusicCue>,
        focused: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let storage = Storage::open();
            let settings = Settings::load(&storage);
            let high_score = HighScore::load(&storage);
            Self {
                audio: AudioManager::new(&settings),
                app: App::new(high_score.value(), seed, settings),
                painter: None,
                storage,
                last_cue: None,
                focused: true,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Play cues, persist records, keep music in step
        fn dispatch(&mut self, events: Vec<FeedbackEvent>) {
            for event in events {
                if event == FeedbackEvent::HighScore {
                    if let Err(e) = HighScore(self.app.high_score()).save(&self.storage) {
                        log::warn!("Failed to save high score: {}", e);
                    }
                }
                self.audio.play(event);
            }
            self.sync_music();
        }

        fn sync_music(&mut self) {
            let cue = if !self.focused && self.app.settings().mute_on_blur {
                MusicCue::Pause
            } else {
                self.app.music_cue()
            };
            if self.last_cue != Some(cue) {
                self.audio.set_music(cue);
                self.last_cue = Some(cue);
            }
        }

        fn input(&mut self, action: InputAction) {
            self.audio.resume();
            let events = self.app.handle_input(action);
            if action == InputAction::ToggleMute {
                self.settings_changed();
            }
            self.dispatch(events);
        }

        /// Push the app's settings to audio and storage
        fn settings_changed(&mut self) {
            let settings = self.app.settings();
            self.audio.apply_settings(settings);
            if let Err(e) = settings.save(&self.storage) {
                log::warn!("Failed to save settings: {}", e);
            }
        }

        /// Match the canvas backing store to its on-screen size
        fn resize(&mut self, canvas: &HtmlCanvasElement) {
            let Some(window) = web_sys::window() else { return };
            let dpr = window.device_pixel_ratio();
            let width = (canvas.client_width() as f64 * dpr) as u32;
            let height = (canvas.client_height() as f64 * dpr) as u32;
            if width == 0 || height == 0 {
                return;
            }
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(painter) = &mut self.painter {
                painter.resize(width as f32, height as f32);
            }
        }

        /// Run one frame of simulation
        fn update(&mut self, time: f64) {
            let events = self.app.frame(time);
            self.dispatch(events);

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&self, time: f64) {
            if let Some(painter) = &self.painter {
                painter.paint(
                    self.app.state(),
                    time / 1000.0,
                    self.app.settings().reduced_motion,
                );
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let state = self.app.state();
            let on_menu = self.app.screen() == Screen::Menu;

            set_text(&document, "hud-score", &state.score.to_string());
            set_text(&document, "hud-high", &state.high_score.to_string());
            set_text(&document, "hud-level", &state.level.to_string());
            set_text(&document, "hud-fps", &self.fps.to_string());
            set_text(&document, "menu-high", &state.high_score.to_string());
            set_text(&document, "final-score", &state.score.to_string());
            set_text(&document, "final-high", &state.high_score.to_string());

            set_visible(&document, "menu", on_menu);
            set_visible(&document, "hud", !on_menu);
            set_visible(&document, "hud-fps-item", self.app.settings().show_fps);
            set_visible(&document, "game-over", !on_menu && !state.is_running);
            set_visible(&document, "new-record", self.app.is_new_record() && state.score > 0);

            if let Some(el) = document.get_element_by_id("hud-high-item") {
                let class = if self.app.is_highlighting() {
                    "hud-item pulse"
                } else {
                    "hud-item"
                };
                let _ = el.set_attribute("class", class);
            }
        }
    }

    fn set_text(document: &web_sys::Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = if visible {
                el.class_list().remove_1("hidden")
            } else {
                el.class_list().add_1("hidden")
            };
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Everglow starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No canvas element");
            return;
        };

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());
        match ctx {
            Some(ctx) => {
                game.borrow_mut().painter =
                    Some(CanvasPainter::new(ctx, width as f32, height as f32));
            }
            None => log::warn!("2D canvas unavailable - rendering disabled"),
        }

        setup_resize_handler(&canvas, game.clone());
        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());
        setup_focus_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Everglow running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                if let Some(action) = action_for_key(&event.key()) {
                    event.prevent_default();
                    game.borrow_mut().input(action);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click - left/right half of the course
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let width = canvas_clone.client_width() as f32;
                if let Some(action) = action_for_tap(event.offset_x() as f32, width) {
                    game.borrow_mut().input(action);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.changed_touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    if let Some(action) = action_for_tap(x, rect.width() as f32) {
                        game.borrow_mut().input(action);
                    }
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize(&canvas);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for (id, action) in [
            ("start-btn", InputAction::Confirm),
            ("restart-btn", InputAction::Confirm),
            ("menu-btn", InputAction::Back),
            ("left-btn", InputAction::Left),
            ("right-btn", InputAction::Right),
        ] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    game.borrow_mut().input(action);
                });
                let _ = btn
                    .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_focus_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        for (event_name, focused) in [("blur", false), ("focus", true)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                g.focused = focused;
                g.sync_music();
                if !focused {
                    log::info!("Window blurred");
                }
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render(time);
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Everglow (native) starting...");
    log::info!("Native mode runs a headless autopilot game - run with `trunk serve` to play");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = flag_value(&args, "--seed").unwrap_or_else(clock_seed);
    let max_seconds = flag_value(&args, "--seconds").map_or(120.0, |s: u64| s as f32);

    let summary = native::run_headless(seed, max_seconds);
    println!(
        "seed {}: score {} (level {}) after {:.1}s, high score {}{}",
        seed,
        summary.score,
        summary.level,
        summary.elapsed,
        summary.high_score,
        if summary.new_record { " - new record!" } else { "" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn flag_value<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    let pos = args.iter().position(|a| a == flag)?;
    match args.get(pos + 1).map(|v| v.parse()) {
        Some(Ok(value)) => Some(value),
        _ => {
            log::warn!("Ignoring invalid value for {}", flag);
            None
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use everglow::feedback::FeedbackEvent;
    use everglow::persistence::Storage;
    use everglow::{App, AppCommand, HighScore, Settings};

    /// Frame step for headless runs (60 Hz)
    const FRAME_MS: f64 = 1000.0 / 60.0;

    pub struct RunSummary {
        pub score: u32,
        pub level: u32,
        pub elapsed: f32,
        pub high_score: u32,
        pub new_record: bool,
    }

    /// Play one autopilot run, persisting any new high score
    pub fn run_headless(seed: u64, max_seconds: f32) -> RunSummary {
        let storage = Storage::open();
        let settings = Settings {
            autopilot: true,
            ..Settings::load(&storage)
        };
        let high_score = HighScore::load(&storage);
        let mut app = App::new(high_score.value(), seed, settings);
        log::info!("Headless run with seed {} (data dir {})", seed, storage.root().display());

        app.apply(AppCommand::Start);
        let mut now = 0.0;
        let mut raised = false;
        while app.state().is_running && app.state().elapsed < max_seconds {
            now += FRAME_MS;
            raised |= app.frame(now).contains(&FeedbackEvent::HighScore);
        }

        if raised {
            if let Err(e) = HighScore(app.high_score()).save(&storage) {
                log::warn!("Failed to save high score: {}", e);
            }
        }

        let state = app.state();
        RunSummary {
            score: state.score,
            level: state.level,
            elapsed: state.elapsed,
            high_score: state.high_score,
            new_record: app.is_new_record(),
        }
    }
}
