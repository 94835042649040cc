//! Road Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use road_rush::audio::{AudioManager, SoundEffect};
    use road_rush::consts::*;
    use road_rush::game_loop::{Game, GameLoop, Phase};
    use road_rush::particles::ParticleSystem;
    use road_rush::render::CanvasRenderer;
    use road_rush::sim::{EffectKind, GameState, TickEvent, TickInput, tick};
    use road_rush::storage::Store;
    use road_rush::{HighScores, Settings, Stats};

    /// Particle palette indices
    const BURST_GOLD: u8 = 0;
    const BURST_CYAN: u8 = 1;
    const BURST_RED: u8 = 2;

    /// One game instance: sim state plus all owned subsystems. No globals -
    /// audio, particles, storage and the loop are constructed here and
    /// passed around explicitly.
    struct RoadRush {
        state: GameState,
        particles: ParticleSystem,
        audio: AudioManager,
        renderer: CanvasRenderer,
        input: TickInput,
        store: Store,
        settings: Settings,
        highscores: HighScores,
        stats: Stats,
        /// Steering key state
        left_held: bool,
        right_held: bool,
        mouse_down: bool,
        /// Guards the end-of-run bookkeeping so it happens once
        run_recorded: bool,
        /// Rank achieved on the last finished run, for the HUD
        last_rank: Option<usize>,
    }

    impl RoadRush {
        fn new(seed: u64, renderer: CanvasRenderer) -> Self {
            let store = Store::new();
            let settings = Settings::load(&store);
            let highscores = HighScores::load(&store);
            let stats = Stats::load(&store);

            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);

            let particles = ParticleSystem::new(settings.effective_max_particles());

            Self {
                state: GameState::new(seed),
                particles,
                audio,
                renderer,
                input: TickInput::default(),
                store,
                settings,
                highscores,
                stats,
                left_held: false,
                right_held: false,
                mouse_down: false,
                run_recorded: false,
                last_rank: None,
            }
        }

        /// Reset for a fresh run
        fn restart(&mut self, seed: u64) {
            self.state = GameState::new(seed);
            self.particles.clear();
            self.input = TickInput::default();
            self.run_recorded = false;
            self.last_rank = None;
            self.audio.resume();
            self.audio.play(SoundEffect::EngineStart);
            log::info!("New run with seed {}", self.state.seed);
        }

        fn handle_event(&mut self, event: &TickEvent) {
            match event {
                TickEvent::Dodged => self.audio.play(SoundEffect::Dodge),
                TickEvent::PowerUpCollected(_, pos) => {
                    self.audio.play(SoundEffect::PickupCollect);
                    self.particles
                        .burst(*pos, BURST_GOLD, 12, &mut self.state.rng);
                }
                TickEvent::ShieldBlock(pos) => {
                    self.audio.play(SoundEffect::ShieldBlock);
                    self.particles
                        .burst(*pos, BURST_CYAN, 16, &mut self.state.rng);
                }
                TickEvent::Crash(pos) => {
                    self.audio.play(SoundEffect::Crash);
                    self.particles
                        .burst(*pos, BURST_RED, 24, &mut self.state.rng);
                }
                TickEvent::GameOver => self.finish_run(),
            }
        }

        /// End-of-run bookkeeping: stats, leaderboard, persistence
        fn finish_run(&mut self) {
            if self.run_recorded {
                return;
            }
            self.run_recorded = true;

            self.stats.record_run(&self.state);
            self.stats.save(&self.store);

            let timestamp = js_sys::Date::now();
            self.last_rank =
                self.highscores
                    .add_score(self.state.score, self.state.distance_m, timestamp);
            if self.last_rank.is_some() {
                self.highscores.save(&self.store);
                self.audio.play(SoundEffect::HighScore);
            } else {
                self.audio.play(SoundEffect::GameOver);
            }
        }
    }

    impl Game for RoadRush {
        fn update(&mut self, dt: f32) -> Option<Phase> {
            // Keyboard steering wins unless a pointer target is set
            if self.input.target_x.is_none() {
                self.input.steer =
                    (self.right_held as i8 - self.left_held as i8) as f32;
            }

            let events = tick(&mut self.state, &self.input, dt);
            let mut request = None;
            for event in &events {
                self.handle_event(event);
                if *event == TickEvent::GameOver {
                    request = Some(Phase::GameOver);
                }
            }

            self.particles.update(dt);
            request
        }

        fn render(&mut self, _dt: f32) {
            self.renderer.draw(&self.state, &self.particles);
        }
    }

    /// Loop plus game, shared with the input closures
    struct App {
        game_loop: GameLoop,
        game: RoadRush,
    }

    type Shared = Rc<RefCell<App>>;

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Road Rush starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Match the backing store to the displayed size
        let dpr = window.device_pixel_ratio();
        canvas.set_width((canvas.client_width() as f64 * dpr) as u32);
        canvas.set_height((canvas.client_height() as f64 * dpr) as u32);

        let renderer = CanvasRenderer::new(canvas.clone()).expect("canvas 2d init failed");

        let seed = js_sys::Date::now() as u64;
        let app: Shared = Rc::new(RefCell::new(App {
            game_loop: GameLoop::new(),
            game: RoadRush::new(seed, renderer),
        }));
        log::info!("Game initialized with seed: {seed}");

        setup_keyboard(app.clone());
        setup_pointer(&canvas, app.clone());
        setup_auto_pause(app.clone());

        request_animation_frame(app);

        log::info!("Road Rush running!");
    }

    fn request_animation_frame(app: Shared) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Shared, time: f64) {
        {
            let mut a = app.borrow_mut();
            let App { game_loop, game } = &mut *a;
            game_loop.frame(time, game);
            update_hud(game_loop, game);
        }
        request_animation_frame(app);
    }

    /// Start a run, or restart after game over
    fn start_run(app: &Shared) {
        let mut a = app.borrow_mut();
        match a.game_loop.phase() {
            Phase::Menu => {
                a.game_loop.start();
                a.game.audio.resume();
                a.game.audio.play(SoundEffect::EngineStart);
            }
            Phase::GameOver => {
                let seed = js_sys::Date::now() as u64;
                a.game.restart(seed);
                a.game_loop.start();
            }
            _ => {}
        }
    }

    fn toggle_pause(app: &Shared) {
        let mut a = app.borrow_mut();
        match a.game_loop.phase() {
            Phase::Playing => a.game_loop.pause(),
            Phase::Paused => a.game_loop.resume(),
            _ => {}
        }
    }

    fn setup_keyboard(app: Shared) {
        let window = web_sys::window().unwrap();

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => {
                        app.borrow_mut().game.left_held = true;
                    }
                    "ArrowRight" | "d" | "D" => {
                        app.borrow_mut().game.right_held = true;
                    }
                    " " | "Enter" => start_run(&app),
                    "Escape" | "p" | "P" => toggle_pause(&app),
                    "m" | "M" => {
                        let mut a = app.borrow_mut();
                        let muted = a.game.audio.muted();
                        a.game.audio.set_muted(!muted);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => {
                        app.borrow_mut().game.left_held = false;
                    }
                    "ArrowRight" | "d" | "D" => {
                        app.borrow_mut().game.right_held = false;
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Convert a pointer x in client coordinates to road coordinates
    fn client_to_road_x(canvas: &HtmlCanvasElement, client_x: f32) -> f32 {
        let rect = canvas.get_bounding_client_rect();
        let w = rect.width() as f32;
        if w <= 0.0 {
            return ROAD_WIDTH / 2.0;
        }
        ((client_x - rect.left() as f32) / w * ROAD_WIDTH).clamp(0.0, ROAD_WIDTH)
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, app: Shared) {
        // Mouse drag steers toward the pointer
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().game.mouse_down = true;
                start_run(&app);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                a.game.mouse_down = false;
                a.game.input.target_x = None;
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                if a.game.mouse_down {
                    a.game.input.target_x =
                        Some(client_to_road_x(&canvas_clone, event.client_x() as f32));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch steers toward the finger
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                start_run(&app);
                if let Some(touch) = event.touches().get(0) {
                    app.borrow_mut().game.input.target_x =
                        Some(client_to_road_x(&canvas_clone, touch.client_x() as f32));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    app.borrow_mut().game.input.target_x =
                        Some(client_to_road_x(&canvas_clone, touch.client_x() as f32));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().game.input.target_x = None;
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(app: Shared) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut a = app.borrow_mut();
                    if a.game_loop.phase() == Phase::Playing {
                        a.game_loop.pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut a = app.borrow_mut();
                if a.game_loop.phase() == Phase::Playing {
                    a.game_loop.pause();
                    log::info!("Auto-paused (window blur)");
                }
                if a.game.settings.mute_on_blur {
                    a.game.audio.set_muted(true);
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Update HUD elements in the DOM. Missing elements are skipped.
    fn update_hud(game_loop: &GameLoop, game: &RoadRush) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let set = |id: &str, text: &str| {
            if let Some(el) = document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        };

        set("hud-score", &game.state.score.to_string());
        set("hud-lives", &game.state.lives.to_string());
        set("hud-distance", &format!("{:.0} m", game.state.distance_m));
        if game.settings.show_fps {
            set("hud-fps", &game_loop.fps().to_string());
        }

        let mut effect_text = String::new();
        for (kind, label) in [
            (EffectKind::Shield, "shield"),
            (EffectKind::SlowMotion, "slow"),
            (EffectKind::DoublePoints, "x2"),
        ] {
            let remaining = game.state.effects.remaining(kind, game.state.clock);
            if remaining > 0.0 {
                if !effect_text.is_empty() {
                    effect_text.push_str("  ");
                }
                effect_text.push_str(&format!("{label} {remaining:.0}s"));
            }
        }
        set("hud-effects", &effect_text);

        let overlay = |id: &str, visible: bool| {
            if let Some(el) = document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
            }
        };

        let phase = game_loop.phase();
        overlay("menu-overlay", phase == Phase::Menu);
        overlay("pause-overlay", phase == Phase::Paused);
        overlay("game-over-overlay", phase == Phase::GameOver);

        if phase == Phase::GameOver {
            set("final-score", &game.state.score.to_string());
            set("final-distance", &format!("{:.0} m", game.state.distance_m));
            if let Some(rank) = game.last_rank {
                set("final-rank", &format!("High score! Rank #{rank}"));
            } else {
                set("final-rank", "");
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless smoke run: drive the sim for thirty simulated seconds and log
/// the outcome. The playable build is the web one.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use road_rush::consts::SIM_DT;
    use road_rush::sim::{GameState, TickEvent, TickInput, tick};

    env_logger::init();
    log::info!("Road Rush (native) starting...");
    log::info!("Native mode is a headless self-check - build for wasm32 to play");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut state = GameState::new(seed);

    let mut input = TickInput::default();
    for i in 0..(30.0 / SIM_DT) as u32 {
        // Sweep back and forth across the road
        input.steer = if (i / 120) % 2 == 0 { 1.0 } else { -1.0 };
        let events = tick(&mut state, &input, SIM_DT);
        if events.contains(&TickEvent::GameOver) {
            break;
        }
    }

    log::info!(
        "Run ended: score {}, {:.0} m, {} dodged, {} lives left",
        state.score,
        state.distance_m,
        state.dodged,
        state.lives
    );
    println!(
        "score {} | distance {:.0} m | dodged {} | lives {}",
        state.score, state.distance_m, state.dodged, state.lives
    );
}
