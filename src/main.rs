//! Flappy Canvas entry point
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

    use flappy_canvas::Tuning;
    use flappy_canvas::persistence::LocalStorageStore;
    use flappy_canvas::platform::{
        FpsCounter, FrameClock, Key, PointerKind, input_for_key, input_for_pointer,
        input_for_visibility,
    };
    use flappy_canvas::renderer::{canvas, debug_overlay, scene};
    use flappy_canvas::sim::{GameEvent, GameState, InputEvent, handle_input, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        clock: FrameClock,
        fps: FpsCounter,
        /// Delta fed to the last tick
        last_delta_ms: f32,
        ctx: CanvasRenderingContext2d,
        show_debug: bool,
    }

    impl Game {
        fn handle(&mut self, input: InputEvent) {
            handle_input(&mut self.state, input, now_ms());
        }

        fn update(&mut self, time: f64) {
            self.fps.record(time);
            let dt = self.clock.frame(time);
            self.last_delta_ms = dt;
            tick(&mut self.state, dt, time);
        }

        fn render(&self) {
            let mut shapes = scene(&self.state);
            if self.show_debug {
                let frame = self.fps.stats(self.last_delta_ms);
                shapes.extend(debug_overlay(&self.state.debug_info(), &frame));
            }

            let size = self.state.tuning.canvas;
            if let Err(e) = canvas::paint(&self.ctx, size.width as f64, size.height as f64, &shapes)
            {
                log::warn!("Render error: {:?}", e);
            }
        }
    }

    /// Same time base as `requestAnimationFrame` timestamps
    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    fn js_err(msg: &str) -> JsValue {
        JsValue::from_str(msg)
    }

    /// Tuning from the canvas `data-tuning` attribute, defaults otherwise
    fn load_tuning(canvas: &HtmlCanvasElement) -> Result<Tuning, JsValue> {
        match canvas.get_attribute("data-tuning") {
            Some(json) => Tuning::from_json(&json).map_err(|e| js_err(&e.to_string())),
            None => Ok(Tuning::default()),
        }
    }

    pub fn run() -> Result<(), JsValue> {
        log::info!("Flappy Canvas starting...");

        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let document = window.document().ok_or_else(|| js_err("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| js_err("no canvas"))?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| js_err("no 2d context"))?
            .dyn_into()?;

        let tuning = match load_tuning(&canvas) {
            Ok(tuning) => tuning,
            Err(e) => {
                show_init_error(&ctx, &e);
                return Err(e);
            }
        };

        // Backing store at device resolution, drawing in logical units
        let dpr = window.device_pixel_ratio();
        canvas.set_width((tuning.canvas.width as f64 * dpr) as u32);
        canvas.set_height((tuning.canvas.height as f64 * dpr) as u32);
        ctx.scale(dpr, dpr)?;

        let seed = js_sys::Date::now() as u64;
        let mut state = match GameState::new(tuning, seed, Box::new(LocalStorageStore::new())) {
            Ok(state) => state,
            Err(e) => {
                let e = js_err(&e.to_string());
                show_init_error(&ctx, &e);
                return Err(e);
            }
        };
        state.events.subscribe(|event| match event {
            GameEvent::RunEnded(summary) => log::info!("Run ended: {:?}", summary),
            other => log::debug!("{:?}", other),
        });

        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            state,
            clock: FrameClock::new(tuning.physics.max_delta_ms),
            fps: FpsCounter::new(),
            last_delta_ms: 0.0,
            ctx,
            show_debug: false,
        }));

        setup_input_handlers(&canvas, game.clone())?;
        setup_auto_pause(game.clone())?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        request_animation_frame(game);

        log::info!("Flappy Canvas running!");
        Ok(())
    }

    fn show_init_error(ctx: &CanvasRenderingContext2d, error: &JsValue) {
        log::error!("Failed to initialize: {:?}", error);
        ctx.set_fill_style_str("#ff4444");
        ctx.set_font("16px Arial");
        let _ = ctx.fill_text("Failed to initialize game", 10.0, 30.0);
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = input_for_key(&event.code()) else {
                    return;
                };
                event.prevent_default();
                if event.repeat() {
                    return;
                }

                let mut g = game.borrow_mut();
                match key {
                    Key::Game(input) => g.handle(input),
                    Key::ToggleIdle => {
                        g.state.idle_mode = !g.state.idle_mode;
                        log::info!("Idle mode: {}", g.state.idle_mode);
                    }
                    Key::ToggleDebug => g.show_debug = !g.show_debug,
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse press
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
                if let Some(input) = input_for_pointer(PointerKind::Mouse, event.button()) {
                    game.borrow_mut().handle(input);
                }
            });
            canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(input) = input_for_pointer(PointerKind::Touch, 0) {
                    game.borrow_mut().handle(input);
                }
            });
            canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let document = window.document().ok_or_else(|| js_err("no document"))?;

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
                let mut g = game.borrow_mut();
                if let Some(input) = input_for_visibility(hidden) {
                    g.handle(input);
                    log::info!("Auto-paused (tab hidden)");
                } else {
                    // Don't count the time spent hidden as a frame
                    g.clock.reset();
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase.is_playing() {
                    g.handle(InputEvent::Pause);
                    log::info!("Auto-paused (window blur)");
                }
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
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
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if let Err(e) = wasm_game::run() {
        log::error!("Flappy Canvas failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::process::ExitCode;

    use flappy_canvas::Tuning;
    use flappy_canvas::consts::REFERENCE_FRAME_MS;
    use flappy_canvas::persistence::FileStore;
    use flappy_canvas::platform::{FpsCounter, FrameClock};
    use flappy_canvas::sim::{GameEvent, GameState, tick};

    /// Simulated play time for a headless run
    const HEADLESS_FRAMES: u32 = 60 * 60;

    env_logger::init();
    log::info!("Flappy Canvas (native) starting...");
    log::info!("Native mode runs the autopilot headless - build for wasm32 to play");

    // Optional tuning file as the first argument
    let tuning = match std::env::args().nth(1) {
        Some(path) => {
            let loaded = std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
            match loaded {
                Ok(tuning) => tuning,
                Err(e) => {
                    log::error!("Failed to load tuning from {}: {}", path, e);
                    return ExitCode::FAILURE;
                }
            }
        }
        None => Tuning::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let store = FileStore::new("flappy_best_score.json");

    let mut state = match GameState::new(tuning, seed, Box::new(store)) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid tuning: {}", e);
            return ExitCode::FAILURE;
        }
    };
    state.idle_mode = true;
    state.events.subscribe(|event| match event {
        GameEvent::RunEnded(summary) => log::info!("Run ended: {:?}", summary),
        other => log::debug!("{:?}", other),
    });

    log::info!("Game initialized with seed: {}", seed);

    let mut clock = FrameClock::new(tuning.physics.max_delta_ms);
    let mut fps = FpsCounter::new();
    let mut now = 0.0;
    let mut dt = 0.0;
    for _ in 0..HEADLESS_FRAMES {
        now += REFERENCE_FRAME_MS as f64;
        fps.record(now);
        dt = clock.frame(now);
        tick(&mut state, dt, now);
    }
    log::info!("Simulated frame rate: {:?}", fps.stats(dt));

    match serde_json::to_string(&state.debug_info()) {
        Ok(json) => log::info!("Final state: {}", json),
        Err(e) => log::warn!("Could not serialize debug info: {}", e),
    }
    println!(
        "score: {}  best: {}",
        state.score.current(),
        state.score.best()
    );
    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
