//! Lane Leap entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use lane_leap::Tuning;
    use lane_leap::consts::*;
    use lane_leap::host::HostBridge;
    use lane_leap::host::web::WebBridge;
    use lane_leap::render::{SceneSync, SpriteId, SpriteSink, VisualKey};
    use lane_leap::sim::{Direction, GameState, TickInput, tick};
    use lane_leap::ui::{GameOverOverlay, score_label};

    struct CanvasSprite {
        pos: Vec2,
        scale: Vec2,
        key: VisualKey,
        visible: bool,
    }

    /// Retained sprites drawn onto a 2D canvas each frame
    #[derive(Default)]
    struct CanvasSink {
        next_id: u32,
        sprites: HashMap<SpriteId, CanvasSprite>,
    }

    impl SpriteSink for CanvasSink {
        fn create(&mut self, pos: Vec2, key: VisualKey) -> SpriteId {
            let id = SpriteId(self.next_id);
            self.next_id += 1;
            self.sprites.insert(
                id,
                CanvasSprite {
                    pos,
                    scale: Vec2::ONE,
                    key,
                    visible: true,
                },
            );
            id
        }

        fn set_position(&mut self, id: SpriteId, pos: Vec2) {
            if let Some(s) = self.sprites.get_mut(&id) {
                s.pos = pos;
            }
        }

        fn set_scale(&mut self, id: SpriteId, scale: Vec2) {
            if let Some(s) = self.sprites.get_mut(&id) {
                s.scale = scale;
            }
        }

        fn set_visible(&mut self, id: SpriteId, visible: bool) {
            if let Some(s) = self.sprites.get_mut(&id) {
                s.visible = visible;
            }
        }

        fn destroy(&mut self, id: SpriteId) {
            self.sprites.remove(&id);
        }
    }

    impl CanvasSink {
        fn draw(&self, ctx: &CanvasRenderingContext2d) {
            // Platforms first so the capsule sits on top
            for key in [VisualKey::Platform, VisualKey::Capsule] {
                for sprite in self.sprites.values().filter(|s| s.visible && s.key == key) {
                    match sprite.key {
                        VisualKey::Platform => {
                            let (w, h) = PLATFORM_SIZE;
                            ctx.set_fill_style_str("#00ff00");
                            ctx.fill_rect(
                                (sprite.pos.x - w / 2.0) as f64,
                                (sprite.pos.y - h / 2.0) as f64,
                                w as f64,
                                h as f64,
                            );
                        }
                        VisualKey::Capsule => {
                            // Origin at bottom-centre
                            let w = CAPSULE_SIZE.0 * sprite.scale.x;
                            let h = CAPSULE_SIZE.1 * sprite.scale.y;
                            ctx.set_fill_style_str("#ffffff");
                            ctx.fill_rect(
                                (sprite.pos.x - w / 2.0) as f64,
                                (sprite.pos.y - h) as f64,
                                w as f64,
                                h as f64,
                            );
                        }
                    }
                }
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        scene: SceneSync,
        sink: CanvasSink,
        ctx: CanvasRenderingContext2d,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
    }

    impl Game {
        fn new(seed: u64, ctx: CanvasRenderingContext2d) -> Self {
            Self {
                state: GameState::with_tuning(seed, Tuning::load()),
                scene: SceneSync::new(),
                sink: CanvasSink::default(),
                ctx,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.direction = None;
                self.input.restart = false;
            }

            for event in self.state.drain_events() {
                log::debug!("{:?}", event);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let tuning = &self.state.tuning;
            let (w, h) = (tuning.screen_width as f64, tuning.screen_height as f64);
            let ctx = &self.ctx;

            ctx.set_fill_style_str("#1a1a1a");
            ctx.fill_rect(0.0, 0.0, w, h);

            self.scene.sync(&mut self.sink, &self.state);
            self.sink.draw(ctx);

            ctx.set_fill_style_str("#ffffff");
            ctx.set_font("24px sans-serif");
            ctx.set_text_align("left");
            let _ = ctx.fill_text(&score_label(self.state.score), 20.0, 44.0);

            if let Some(overlay) = GameOverOverlay::from_state(&self.state) {
                ctx.set_fill_style_str("rgba(0, 0, 0, 0.8)");
                ctx.fill_rect(0.0, 0.0, w, h);
                ctx.set_text_align("center");

                ctx.set_fill_style_str("red");
                ctx.set_font("bold 40px sans-serif");
                let _ = ctx.fill_text(overlay.title, w / 2.0, 250.0);

                ctx.set_fill_style_str("#ffffff");
                ctx.set_font("20px sans-serif");
                let _ = ctx.fill_text(&overlay.reason, w / 2.0, 320.0);

                ctx.set_fill_style_str(if overlay.restart_armed { "#00ff00" } else { "#336633" });
                ctx.set_font("24px sans-serif");
                let _ = ctx.fill_text(overlay.restart_label, w / 2.0, 400.0);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Lane Leap starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No canvas element");
            return;
        };
        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::error!("No 2d context");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, ctx)));
        {
            let g = game.borrow();
            canvas.set_width(g.state.tuning.screen_width as u32);
            canvas.set_height(g.state.tuning.screen_height as u32);
        }
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        WebBridge::new().notify_ready();

        request_animation_frame(game);
        log::info!("Lane Leap running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard: one lane move per key press
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => {
                        g.input.direction = Some(Direction::Left);
                    }
                    "ArrowRight" | "d" | "D" => {
                        if g.input.direction.is_none() {
                            g.input.direction = Some(Direction::Right);
                        }
                    }
                    "i" | "I" => {
                        g.input.idle_mode = !g.input.idle_mode;
                        log::info!("Idle mode: {}", g.input.idle_mode);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Tap/click restarts (once the overlay is armed)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                let mut g = game.borrow_mut();
                if g.state.is_game_over() {
                    g.input.restart = true;
                }
            });
            let _ = window
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
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
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_leap::Tuning;
    use lane_leap::consts::SIM_DT;
    use lane_leap::host::{HostBridge, LogBridge};
    use lane_leap::sim::{GameEvent, GameState, TickInput, tick};
    use lane_leap::ui::{GameOverOverlay, score_label};

    env_logger::init();
    log::info!("Lane Leap (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 to play");

    let seed = std::env::var("LANE_LEAP_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    let demo_secs: f32 = std::env::var("LANE_LEAP_DEMO_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(30.0);

    let mut state = GameState::with_tuning(seed, Tuning::load());
    LogBridge::new().notify_ready();
    log::info!("Game initialized with seed: {}", seed);

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let ticks = (demo_secs / SIM_DT) as u64;
    let mut best = 0;
    for _ in 0..ticks {
        tick(&mut state, &input, SIM_DT);
        for event in state.drain_events() {
            match event {
                GameEvent::Scored(score) => {
                    best = best.max(score);
                    log::debug!("{}", score_label(score));
                }
                GameEvent::GameOver(_) => {
                    if let Some(overlay) = GameOverOverlay::from_state(&state) {
                        println!(
                            "{}: {} ({})",
                            overlay.title,
                            overlay.reason,
                            score_label(overlay.final_score)
                        );
                    }
                }
                other => log::trace!("{:?}", other),
            }
        }
    }

    println!(
        "Demo finished after {:.0}s: {}, best {}, runs {}",
        demo_secs,
        score_label(state.score),
        best,
        state.run + 1
    );
}
