//! Arcade Pong entry point
//!
//! wasm32: canvas host driven by `requestAnimationFrame`.
//! Native: headless demo match (AI vs AI) that logs its progress.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use arcade_pong::app::{App, Key, MenuCommand};
    use arcade_pong::audio::AudioManager;
    use arcade_pong::consts::*;
    use arcade_pong::persistence::LocalStore;

    const ACCENT: &str = "rgba(230, 126, 34, 1)";
    const ACCENT_DIM: &str = "rgba(230, 126, 34, 0.3)";
    const BACKGROUND: &str = "rgb(12, 12, 28)";

    /// Game instance holding all state
    struct Game {
        app: App<LocalStore>,
        audio: AudioManager,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        last_time: f64,
    }

    impl Game {
        /// Client coordinates to field coordinates
        fn to_field(&self, client_x: f64, client_y: f64) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            let sx = FIELD_WIDTH as f64 / rect.width().max(1.0);
            let sy = FIELD_HEIGHT as f64 / rect.height().max(1.0);
            Vec2::new(
                ((client_x - rect.left()) * sx) as f32,
                ((client_y - rect.top()) * sy) as f32,
            )
        }

        fn update(&mut self, dt: f32) {
            self.app.frame(dt);
            for cue in self.app.take_cues() {
                self.audio.play(&cue);
            }
        }

        fn render(&self) {
            let ctx = &self.ctx;
            let w = FIELD_WIDTH as f64;
            let h = FIELD_HEIGHT as f64;

            ctx.set_fill_style_str(BACKGROUND);
            ctx.fill_rect(0.0, 0.0, w, h);

            // Center dashed line
            ctx.set_stroke_style_str(ACCENT_DIM);
            ctx.set_line_width(2.0);
            let dash = js_sys::Array::of2(&JsValue::from_f64(10.0), &JsValue::from_f64(10.0));
            let _ = ctx.set_line_dash(&dash);
            ctx.begin_path();
            ctx.move_to(w / 2.0, 0.0);
            ctx.line_to(w / 2.0, h);
            ctx.stroke();
            let _ = ctx.set_line_dash(&js_sys::Array::new());
            ctx.stroke_rect(0.0, 0.0, w, h);

            let game = &self.app.game;
            ctx.set_fill_style_str(ACCENT);
            for paddle in [&game.paddle1, &game.paddle2] {
                ctx.fill_rect(
                    paddle.pos.x as f64,
                    paddle.pos.y as f64,
                    paddle.width as f64,
                    paddle.height as f64,
                );
            }
            let b = game.ball.bounds();
            ctx.fill_rect(
                b.min.x as f64,
                b.min.y as f64,
                (b.max.x - b.min.x) as f64,
                (b.max.y - b.min.y) as f64,
            );

            for p in &self.app.particles.particles {
                ctx.set_global_alpha((1.0 - p.progress()) as f64);
                let pos = p.pos();
                ctx.fill_rect(pos.x as f64 - 2.0, pos.y as f64 - 2.0, 4.0, 4.0);
            }
            ctx.set_global_alpha(1.0);

            self.render_hud();
        }

        fn render_hud(&self) {
            let ctx = &self.ctx;
            let app = &self.app;
            let t = |key: &str| app.i18n.t(key);
            let w = FIELD_WIDTH as f64;
            let h = FIELD_HEIGHT as f64;

            ctx.set_fill_style_str(ACCENT);
            ctx.set_text_align("center");
            ctx.set_font("32px monospace");
            let _ = ctx.fill_text(&app.game.score.p1.to_string(), w * 0.25, 48.0);
            let _ = ctx.fill_text(&app.game.score.p2.to_string(), w * 0.75, 48.0);
            ctx.set_font("16px monospace");
            let _ = ctx.fill_text(&app.clock_text(), w / 2.0, 24.0);
            let _ = ctx.fill_text(&t("game.player1"), w * 0.25, 72.0);
            let _ = ctx.fill_text(&app.player2_label(), w * 0.75, 72.0);

            let lines = app.screen_lines();
            // Title larger, the rest as a centered list
            let top = h / 2.0 - lines.len() as f64 * 18.0;
            for (i, line) in lines.iter().enumerate() {
                ctx.set_font(if i == 0 { "32px monospace" } else { "20px monospace" });
                let _ = ctx.fill_text(line, w / 2.0, top + i as f64 * 36.0);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Arcade Pong starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(FIELD_WIDTH as u32);
        canvas.set_height(FIELD_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let browser_lang = window.navigator().language();
        let app = App::new(LocalStore::new(), seed, browser_lang.as_deref());
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            app,
            audio: AudioManager::new(),
            canvas: canvas.clone(),
            ctx,
            last_time: 0.0,
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_clock(game.clone());
        request_animation_frame(game);

        log::info!("Arcade Pong running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                let raw = event.key();
                if let Some(key) = Key::from_dom(&raw) {
                    event.prevent_default();
                    g.app.key_down(key);
                    return;
                }
                if let Some(cmd) = MenuCommand::from_dom(&raw, g.app.screen()) {
                    event.prevent_default();
                    g.app.menu_command(cmd);
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom(&event.key()) {
                    game.borrow_mut().app.key_up(key);
                }
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move - absolute paddle placement
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.to_field(event.client_x() as f64, event.client_y() as f64);
                g.app.pointer_move(pos);
            });
            let _ = canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move - every finger, so both players can share a screen
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                let touches = event.touches();
                for i in 0..touches.length() {
                    if let Some(touch) = touches.get(i) {
                        let pos = g.to_field(touch.client_x() as f64, touch.client_y() as f64);
                        g.app.pointer_move(pos);
                    }
                }
            });
            let _ = canvas.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click/tap unlocks audio
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow().audio.resume();
            });
            let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Independent one-second timer for the match clock
    fn setup_clock(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut()>::new(move || {
            game.borrow_mut().app.second_elapsed();
        });
        if window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                1000,
            )
            .is_err()
        {
            log::warn!("Failed to start match clock");
        }
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                1.0 / 60.0
            };
            g.last_time = time;

            g.update(dt.min(0.1));
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

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Arcade Pong (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 to play");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5eed);
    demo_match(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one AI-vs-AI match at 60 ticks per second of simulated time
#[cfg(not(target_arch = "wasm32"))]
fn demo_match(seed: u64) {
    use arcade_pong::persistence::MemoryStore;
    use arcade_pong::sim::{Difficulty, GameEvent, GameMode, Side, ai, set_paddle_direction};
    use arcade_pong::{App, Screen};

    const TICKS_PER_SECOND: u64 = 60;
    const MAX_TICKS: u64 = TICKS_PER_SECOND * 60 * 30;

    let mut app = App::new(MemoryStore::new(), seed, None);
    app.set_difficulty(Difficulty::Hard);
    app.start(GameMode::OnePlayer);
    log::info!("Demo match with seed {}", seed);

    let mut longest_rally = 0;
    for n in 1..=MAX_TICKS {
        let dir = ai::track(&app.game.ball, &app.game.paddle1);
        set_paddle_direction(&mut app.game, Side::Left, dir);

        for event in app.frame(1.0 / TICKS_PER_SECOND as f32) {
            match event {
                GameEvent::PaddleHit { hits, .. } => longest_rally = longest_rally.max(hits),
                GameEvent::Score { scorer, score, .. } => {
                    log::info!("{:?} scores: {} - {}", scorer, score.p1, score.p2)
                }
                _ => {}
            }
        }
        for cue in app.take_cues() {
            log::debug!("cue {:?}", cue.effect);
        }
        if n % TICKS_PER_SECOND == 0 {
            app.second_elapsed();
        }
        if app.screen() == Screen::GameOver {
            break;
        }
    }

    if app.screen() == Screen::GameOver {
        let (title, message) = app.game_over_text();
        println!("{} ({}) in {}", title, message, app.clock_text());
    } else {
        println!(
            "No winner after {} ticks: {} - {}",
            MAX_TICKS, app.game.score.p1, app.game.score.p2
        );
    }
    println!("Longest rally: {} hits", longest_rally);
}
