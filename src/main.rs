//! Tilt Maze entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{DeviceOrientationEvent, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use tilt_maze::consts::*;
    use tilt_maze::renderer::{Assets, CanvasSurface, HtmlImage, draw, load_assets};
    use tilt_maze::sim::{ControlInput, Maze, Scheduler, Task, World, tick};
    use tilt_maze::{Tuning, input};

    /// `setTimeout`-backed scheduler; tasks run against the live game
    struct BrowserScheduler {
        game: Weak<RefCell<Game>>,
    }

    impl Scheduler for BrowserScheduler {
        fn schedule(&mut self, task: Task, delay_secs: f32) {
            let Some(window) = web_sys::window() else {
                log::error!("No window to schedule on");
                return;
            };
            let game = self.game.clone();
            let callback = Closure::once_into_js(move || {
                if let Some(game) = game.upgrade() {
                    task(&mut game.borrow_mut().maze);
                }
            });
            let millis = (delay_secs * 1000.0) as i32;
            if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                millis,
            ) {
                log::error!("setTimeout failed: {:?}", e);
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        maze: Maze,
        assets: Assets<HtmlImage>,
        surface: CanvasSurface,
        scheduler: BrowserScheduler,
        input: ControlInput,
        accumulator: f32,
        last_time: f64,
    }

    impl Game {
        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.maze, &self.input, &mut self.scheduler);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Writes are consumed once; velocity carries on in the ball
                self.input.clear();
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            draw(&self.maze, &self.assets, &mut self.surface);
        }
    }

    /// Optional `<script id="tuning" type="application/json">` override
    fn page_tuning(document: &web_sys::Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from page");
                tuning
            }
            Err(e) => {
                log::error!("Ignoring page tuning: {}", e);
                Tuning::default()
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Tilt Maze starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Canvas fills the window
        let width = window.inner_width()?.as_f64().unwrap_or(800.0) as u32;
        let height = window.inner_height()?.as_f64().unwrap_or(600.0) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let tuning = page_tuning(&document);
        let world = World::for_tuning(width as f32, height as f32, &tuning)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let assets = load_assets().await?;
        let surface = CanvasSurface::new(&canvas)?;

        let seed = js_sys::Date::now() as u64;
        let maze = Maze::new(world, tuning, assets.sizes(), seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new_cyclic(|weak| {
            RefCell::new(Game {
                maze,
                assets,
                surface,
                scheduler: BrowserScheduler { game: weak.clone() },
                input: ControlInput::default(),
                accumulator: 0.0,
                last_time: 0.0,
            })
        });

        setup_input_handlers(&canvas, game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Tilt Maze running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Device tilt (mobile)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: DeviceOrientationEvent| {
                let mut g = game.borrow_mut();
                let Game { input, maze, .. } = &mut *g;
                input::orientation(event.beta(), event.gamma(), input, &maze.tuning);
            });
            window.add_event_listener_with_callback(
                "deviceorientation",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Arrow keys (desktop fallback)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let Game { input, maze, .. } = &mut *g;
                if input::key_down(&event.code(), input, &maze.tuning) {
                    event.prevent_default();
                }
            });
            document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                input::key_up(&event.code(), &mut game.borrow_mut().input);
            });
            document.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start (jump) and touch move (steer)
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                input::touch_start(&mut g.input);
                steer_towards_touch(&mut g, &canvas_clone, &event);
            });
            canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                steer_towards_touch(&mut game.borrow_mut(), &canvas_clone, &event);
            });
            canvas.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                input::touch_end(&mut game.borrow_mut().input);
            });
            canvas.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn steer_towards_touch(g: &mut Game, canvas: &HtmlCanvasElement, event: &TouchEvent) {
        if let Some(touch) = event.touches().get(0) {
            let rect = canvas.get_bounding_client_rect();
            let at = Vec2::new(
                touch.client_x() as f32 - rect.left() as f32,
                touch.client_y() as f32 - rect.top() as f32,
            );
            let ball = g.maze.ball.pos.truncate();
            input::touch_steer(at, ball, &mut g.input, &g.maze.tuning);
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
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Tilt Maze failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;
    use serde::Serialize;

    use tilt_maze::consts::SIM_DT;
    use tilt_maze::sim::{ControlInput, Maze, Outcome, SpriteSizes, TimerQueue, World, tick};
    use tilt_maze::{Tuning, input};

    #[derive(Parser, Debug)]
    #[command(about = "Play Tilt Maze headless with a random tilting hand", version)]
    pub struct Args {
        /// RNG seed for layouts and the simulated player
        #[arg(long, default_value_t = 1)]
        pub seed: u64,
        /// Frames to simulate (60 per second)
        #[arg(long, default_value_t = 60 * 60)]
        pub frames: u64,
        #[arg(long, default_value_t = 800.0)]
        pub width: f32,
        #[arg(long, default_value_t = 600.0)]
        pub height: f32,
        /// Enable the depth variant with this depth (overrides tuning)
        #[arg(long)]
        pub depth: Option<f32>,
        /// JSON tuning file
        #[arg(long)]
        pub tuning: Option<PathBuf>,
        /// Print the summary as JSON
        #[arg(long)]
        pub json: bool,
    }

    #[derive(Debug, Default, PartialEq, Serialize)]
    pub struct Summary {
        pub seed: u64,
        pub frames: u64,
        /// Simulated time covered by the run
        pub seconds: f64,
        pub levels: u32,
        pub wins: u32,
        pub losses: u32,
        pub final_outcome: Outcome,
    }

    /// Frames between changes of the simulated tilt
    const TILT_HOLD_FRAMES: u64 = 30;

    pub fn run(args: Args) -> Result<Summary, Box<dyn std::error::Error>> {
        let mut tuning = match &args.tuning {
            Some(path) => Tuning::from_json(&std::fs::read_to_string(path)?)?,
            None => Tuning::default(),
        };
        if args.depth.is_some() {
            tuning.depth = args.depth;
            tuning.validate()?;
        }

        let world = World::for_tuning(args.width, args.height, &tuning)?;
        let mut maze = Maze::new(world, tuning, SpriteSizes::default(), args.seed)?;
        let mut timers = TimerQueue::new();
        let mut hand = Pcg32::seed_from_u64(args.seed.wrapping_add(1));
        let mut controls = ControlInput::default();
        let mut summary = Summary {
            seed: args.seed,
            frames: args.frames,
            ..Summary::default()
        };

        for frame in 0..args.frames {
            if frame % TILT_HOLD_FRAMES == 0 {
                let beta = hand.random_range(-20.0..20.0);
                let gamma = hand.random_range(-20.0..20.0);
                input::orientation(Some(beta), Some(gamma), &mut controls, &maze.tuning);
                if maze.world.is_3d() && hand.random_bool(0.25) {
                    input::key_down("Space", &mut controls, &maze.tuning);
                }
            }

            let was_playing = !maze.outcome.is_terminal();
            tick(&mut maze, &controls, &mut timers);
            controls.clear();

            if was_playing {
                match maze.outcome {
                    Outcome::Won => summary.wins += 1,
                    Outcome::Lost => summary.losses += 1,
                    Outcome::Playing => {}
                }
            }
            timers.advance(SIM_DT, &mut maze);
        }

        summary.seconds = timers.now();
        summary.levels = maze.level;
        summary.final_outcome = maze.outcome;
        Ok(summary)
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use clap::Parser;

    env_logger::init();
    log::info!("Tilt Maze (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    let args = headless::Args::parse();
    let json = args.json;
    let summary = headless::run(args)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "seed {}: {} frames, {} levels, {} won, {} lost",
            summary.seed, summary.frames, summary.levels, summary.wins, summary.losses
        );
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
