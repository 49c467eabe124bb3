//! Pong Classic entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use glam::Vec2;
    use pong_classic::consts::SIM_DT;
    use pong_classic::renderer::{DisplayList, RenderState};
    use pong_classic::{Game, GameConfig};

    /// Game plus the GPU state it is drawn with
    struct App {
        game: Game<DisplayList>,
        render_state: RenderState,
        last_time: f64,
    }

    impl App {
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            self.last_time = time;
            self.game.frame(dt);
        }

        fn render(&mut self) {
            let vertices = self.game.scene().vertices();
            match self.render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = self.render_state.size;
                    self.render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }
    }

    fn js_error(context: &str, e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&format!("{}: {}", context, e))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
        }

        log::info!("Pong starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let config = GameConfig::default();

        // Backing store at device resolution, play field stretched over it
        let dpr = window.device_pixel_ratio();
        let width = (config.screen_width as f64 * dpr) as u32;
        let height = (config.screen_height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| js_error("Failed to create surface", e))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| js_error("Failed to get adapter", e))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let world_size = Vec2::new(config.screen_width, config.screen_height);
        let render_state = RenderState::new(surface, &adapter, width, height, world_size)
            .await
            .map_err(|e| js_error("Failed to create device", e))?;

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(config, DisplayList::new(), seed);
        let app = Rc::new(RefCell::new(App {
            game,
            render_state,
            last_time: 0.0,
        }));

        setup_input_handlers(&window, &canvas, app.clone())?;

        request_animation_frame(app);

        log::info!("Pong running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        app: Rc<RefCell<App>>,
    ) -> Result<(), JsValue> {
        // Held paddle keys
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if app.borrow_mut().game.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if app.borrow_mut().game.key_up(&event.key()) {
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Press starts a match from attract mode
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                app.borrow_mut().game.pointer_down();
            });
            canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key-up events are lost while unfocused
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().game.release_keys();
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, stopping game loop");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.update(time);
            a.render();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Simulated time after which a headless match is abandoned
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_LIMIT_SECS: f32 = 3600.0;

/// Attract mode runs this long before the simulated press
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_DEMO_SECS: f32 = 1.0;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Pong (native) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match load_config(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path);
                config
            }
            Err(e) => {
                log::error!("Failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => pong_classic::GameConfig::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(time_seed);

    match run_headless(config, seed) {
        Some((winner, score)) => println!(
            "{:?} wins {} - {} (seed {})",
            winner, score.left, score.right, seed
        ),
        None => println!(
            "No winner after {} simulated seconds (seed {})",
            HEADLESS_LIMIT_SECS, seed
        ),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config(path: &str) -> Result<pong_classic::GameConfig, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(pong_classic::GameConfig::from_json(&json)?)
}

#[cfg(not(target_arch = "wasm32"))]
fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Play one match with idle paddles: demo, a press, then until someone wins
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(
    config: pong_classic::GameConfig,
    seed: u64,
) -> Option<(pong_classic::sim::Side, pong_classic::sim::Score)> {
    use pong_classic::Game;
    use pong_classic::consts::SIM_DT;
    use pong_classic::renderer::DisplayList;
    use pong_classic::sim::MatchEvent;

    let mut game = Game::new(config, DisplayList::new(), seed);
    let demo_frames = (HEADLESS_DEMO_SECS / SIM_DT) as u64;
    let max_frames = (HEADLESS_LIMIT_SECS / SIM_DT) as u64;

    for frame in 0..max_frames {
        if frame == demo_frames {
            game.pointer_down();
        }
        for event in game.frame(SIM_DT) {
            if let MatchEvent::MatchWon { winner, score } = event {
                return Some((winner, score));
            }
        }
    }
    None
}
