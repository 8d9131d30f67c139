//! Droplet entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use droplet::Tuning;
    use droplet::consts::*;
    use droplet::platform::{InputState, input::should_prevent_default};
    use droplet::renderer::{CanvasRenderer, Sprites};
    use droplet::sim::{GameEvent, GameState, Viewport, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Option<CanvasRenderer>,
        accumulator: f32,
        last_time: f64,
        input: InputState,
    }

    impl Game {
        fn new(seed: u64, viewport: Viewport, tuning: Tuning) -> Self {
            Self {
                state: GameState::new(seed, viewport, tuning),
                renderer: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: InputState::new(),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            self.accumulator += dt.min(MAX_FRAME_DT);

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.tick_input();
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.clear_one_shots();
            }

            for event in self.state.drain_events() {
                log_event(&event);
            }
        }

        /// Render the current frame
        fn render(&self) {
            if let Some(ref renderer) = self.renderer {
                if let Err(e) = renderer.render(&self.state) {
                    log::warn!("Render error: {:?}", e);
                }
            }
        }
    }

    fn log_event(event: &GameEvent) {
        match event {
            GameEvent::CoinCollected { kind } => log::debug!("Collected {:?}", kind),
            GameEvent::GameOver {
                cause,
                score,
                new_high_score: true,
            } => log::info!("Game over ({:?}), new high score {}", cause, score),
            other => log::debug!("{:?}", other),
        }
    }

    /// Optional `<script id="tuning" type="application/json">` overrides
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {}", e);
                Tuning::default()
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger already set: {}", e).into());
        }

        log::info!("Droplet starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let viewport = Viewport::new(canvas.width() as f32, canvas.height() as f32);
        let tuning = load_tuning(&document);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, viewport, tuning)));
        log::info!("Game initialized with seed: {}", seed);

        let sprites = match Sprites::load().await {
            Ok(sprites) => sprites,
            Err(e) => {
                if let Some(loading) = document.get_element_by_id("loading") {
                    loading.set_text_content(Some(&e.to_string()));
                }
                return Err(JsValue::from_str(&e.to_string()));
            }
        };
        game.borrow_mut().renderer = Some(CanvasRenderer::new(ctx, sprites, viewport));

        // Keys pressed while loading must not skip the menu
        setup_input_handlers(&canvas, game.clone())?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            loading.set_attribute("class", "hidden")?;
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Droplet running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Keydown
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if should_prevent_default(&code) {
                    event.prevent_default();
                }
                game.borrow_mut().input.key_down(&code);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyup
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.code());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Click, mapped from CSS pixels into canvas pixels
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                if rect.width() <= 0.0 || rect.height() <= 0.0 {
                    return;
                }
                let scale_x = canvas_clone.width() as f64 / rect.width();
                let scale_y = canvas_clone.height() as f64 / rect.height();
                let x = (event.client_x() as f64 - rect.left()) * scale_x;
                let y = (event.client_y() as f64 - rect.top()) * scale_y;
                game.borrow_mut().input.click(Vec2::new(x as f32, y as f32));
            });
            canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window blur: keyups will never arrive for keys held while unfocused
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().input.release_all();
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
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Droplet failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Droplet (native) starting...");
    log::info!("Native mode runs a headless autopilot - build for wasm32 to play");

    headless::run(0xD0_0D1E, 3600);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted session without a display: run right, jump off platform edges
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use droplet::Tuning;
    use droplet::consts::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
    use droplet::sim::{GameEvent, GamePhase, GameState, TickInput, Viewport, is_standing, tick};

    pub fn run(seed: u64, max_ticks: u32) {
        let viewport = Viewport::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT);
        let mut state = GameState::new(seed, viewport, Tuning::default());
        let mut collected = 0u32;

        let mut ticks = 0;
        while ticks < max_ticks {
            let input = autopilot(&state);
            tick(&mut state, &input);
            ticks += 1;

            for event in state.drain_events() {
                match event {
                    GameEvent::CoinCollected { .. } => collected += 1,
                    GameEvent::GameOver { cause, score, .. } => {
                        log::info!("Game over after {} ticks: {:?}, score {}", ticks, cause, score);
                    }
                    other => log::debug!("{:?}", other),
                }
            }
            if state.phase == GamePhase::GameOver {
                break;
            }
        }

        log::info!(
            "Session summary: {} ticks, x={:.0}, score {}, pH {}, {} coins collected, {} platforms generated",
            ticks,
            state.player.pos.x,
            state.player.score,
            state.ph,
            collected,
            state.platforms.len()
        );
    }

    fn autopilot(state: &GameState) -> TickInput {
        if state.phase != GamePhase::Playing {
            return TickInput {
                confirm: state.phase == GamePhase::Start,
                ..Default::default()
            };
        }

        let player = &state.player;
        let center_x = player.center().x;
        let near_edge = state
            .platforms
            .iter()
            .find(|p| center_x >= p.pos.x && center_x <= p.right())
            .is_some_and(|p| player.aabb().right() >= p.right() - state.tuning.player_speed * 2.0);
        let standing = is_standing(player, &state.platforms, state.floor_line());

        TickInput {
            move_right: true,
            jump: standing && near_edge,
            ..Default::default()
        }
    }
}
