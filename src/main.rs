//! Neon Dash entry point
//!
//! The web build drives the game from `requestAnimationFrame`; the native build is a
//! headless runner for playing levels from the command line.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use neon_dash::driver::RenderTarget;
    use neon_dash::renderer::RenderState;
    use neon_dash::sim::RunPhase;
    use neon_dash::{AudioManager, Command, FrameDriver, Settings, UiSink, levels};

    /// HUD backed by DOM elements
    struct DomHud {
        document: Document,
    }

    impl DomHud {
        fn set_text(&self, selector: &str, text: &str) {
            if let Some(el) = self.document.query_selector(selector).ok().flatten() {
                el.set_text_content(Some(text));
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.class_list().toggle_with_force("hidden", !visible);
            }
        }
    }

    impl UiSink for DomHud {
        fn phase_changed(&mut self, phase: RunPhase) {
            self.set_visible("menu", phase == RunPhase::Menu);
            self.set_visible("pause-menu", phase == RunPhase::Paused);
            self.set_visible("game-over", phase == RunPhase::GameOver);
            self.set_visible("win-screen", phase == RunPhase::Won);
        }

        fn attempt_changed(&mut self, attempt: u32) {
            self.set_text("#hud-attempt .hud-value", &attempt.to_string());
        }

        fn progress_changed(&mut self, progress: u8) {
            self.set_text("#hud-progress .hud-value", &format!("{}%", progress));
            if let Some(bar) = self.document.get_element_by_id("progress-bar") {
                let _ = bar.set_attribute("style", &format!("width: {}%", progress));
            }
        }

        fn coin_changed(&mut self, collected: bool) {
            self.set_visible("hud-coin", collected);
        }

        fn level_changed(&mut self, index: Option<usize>, name: &str) {
            let label = match index {
                Some(i) => format!("{}. {}", i + 1, name),
                None => name.to_string(),
            };
            self.set_text("#hud-level .hud-value", &label);
            // The win screen only offers a next level when one exists
            self.set_visible("next-btn", index.is_some_and(|i| i + 1 < levels::count()));
        }
    }

    /// Game instance holding all state
    struct Game {
        driver: FrameDriver<AudioManager, DomHud>,
        render_state: Option<RenderState>,
    }

    impl Game {
        fn push(&mut self, command: Command) {
            self.driver.push(command);
        }

        /// Pressing the action also unlocks audio on browsers that require a gesture
        fn press(&mut self) {
            self.driver.audio().resume();
            self.push(Command::InputDown);
        }

        fn frame(&mut self) -> bool {
            let target = self
                .render_state
                .as_mut()
                .map(|r| r as &mut dyn RenderTarget);
            self.driver.frame(target)
        }

        /// Match canvas, surface and simulation viewport to the window
        fn resize(&mut self, canvas: &HtmlCanvasElement, dpr: f64) {
            let client_w = canvas.client_width().max(1);
            let client_h = canvas.client_height().max(1);
            let width = (client_w as f64 * dpr) as u32;
            let height = (client_h as f64 * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.scale_factor = dpr as f32;
                render_state.resize(width, height);
            }
            self.push(Command::Resize {
                width: client_w as f32,
                height: client_h as f32,
            });
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Neon Dash starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let settings = Settings::default();
        let mut audio = AudioManager::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_muted(settings.muted);

        let hud = DomHud {
            document: document.clone(),
        };
        let driver = FrameDriver::new(0, settings, audio, hud)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        // Initialize WebGPU
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width().max(1) as f64 * dpr) as u32;
        let height = (canvas.client_height().max(1) as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        // A missing surface leaves the game running without drawing
        let render_state = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                match instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::HighPerformance,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await
                {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        match RenderState::new(surface, &adapter, width, height, dpr as f32).await {
                            Ok(state) => Some(state),
                            Err(e) => {
                                log::error!("Failed to create device: {}", e);
                                None
                            }
                        }
                    }
                    Err(e) => {
                        log::error!("No graphics adapter: {}", e);
                        None
                    }
                }
            }
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                None
            }
        };

        let game = Rc::new(RefCell::new(Game {
            driver,
            render_state,
        }));
        {
            let mut g = game.borrow_mut();
            g.driver.init();
            g.resize(&canvas, dpr);
        }

        setup_input_handlers(&canvas, game.clone())?;
        setup_buttons(&document, game.clone());
        setup_auto_pause(game.clone())?;
        setup_resize(canvas, game.clone())?;
        setup_teardown(game.clone())?;

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.class_list().remove_1("hidden");
        }

        request_animation_frame(game);

        log::info!("Neon Dash running!");
        Ok(())
    }

    /// Action keys
    fn is_action_key(code: &str) -> bool {
        matches!(code, "Space" | "ArrowUp")
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Keyboard down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                let mut g = game.borrow_mut();
                if is_action_key(&code) {
                    event.prevent_default();
                    if !event.repeat() {
                        g.press();
                    }
                    return;
                }
                match code.as_str() {
                    "Escape" => g.push(Command::TogglePause),
                    "KeyR" => g.push(Command::Restart),
                    "KeyM" => g.push(Command::Menu),
                    "KeyN" => g.push(Command::NextLevel),
                    "KeyB" => g.push(Command::PrevLevel),
                    _ => {
                        // Digit1..Digit7 pick a level
                        if let Some(n) = code
                            .strip_prefix("Digit")
                            .and_then(|d| d.parse::<usize>().ok())
                            .filter(|n| (1..=levels::count()).contains(n))
                        {
                            g.push(Command::SwitchLevel(n - 1));
                        }
                    }
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if is_action_key(&event.code()) {
                    game.borrow_mut().push(Command::InputUp);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() == 0 {
                    game.borrow_mut().press();
                }
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() == 0 {
                    game.borrow_mut().push(Command::InputUp);
                }
            });
            // Released anywhere, so a drag off the canvas does not stick
            window.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().press();
            });
            canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                // Only release once the last finger lifts
                if event.touches().length() == 0 {
                    game.borrow_mut().push(Command::InputUp);
                }
            });
            canvas.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        let buttons = [
            ("resume-btn", Command::Resume),
            ("restart-btn", Command::Restart),
            ("retry-btn", Command::Restart),
            ("menu-btn", Command::Menu),
            ("next-btn", Command::AdvanceLevel),
        ];
        for (id, command) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().push(command.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        fn auto_pause(game: &Rc<RefCell<Game>>, reason: &str) {
            let mut g = game.borrow_mut();
            if g.driver.settings().pause_on_blur && g.driver.state().phase == RunPhase::Playing {
                log::info!("Auto-paused ({})", reason);
                g.push(Command::Pause);
            }
            // Held keys never see their keyup once focus is gone
            g.push(Command::InputUp);
        }

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    auto_pause(&game, "tab hidden");
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
                auto_pause(&game, "window blur");
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let dpr = window_clone.device_pixel_ratio();
            game.borrow_mut().resize(&canvas, dpr);
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_teardown(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().driver.teardown();
        });
        window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Exactly one simulation step per display callback
    fn game_loop(game: Rc<RefCell<Game>>) {
        let running = game.borrow_mut().frame();
        if running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    web_game::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::ops::Range;
    use std::path::{Path, PathBuf};

    use anyhow::{Context, Result, bail};
    use clap::Parser;

    use neon_dash::sim::{Level, RunPhase};
    use neon_dash::{AudioManager, Command, FrameDriver, Settings, UiSink, levels};

    /// Play a Neon Dash level without a window
    #[derive(Parser, Debug)]
    #[command(name = "neon-dash", version, about)]
    pub struct Cli {
        /// Built-in level number (1-based)
        #[arg(short, long, default_value_t = 1, conflicts_with = "file")]
        level: usize,

        /// Level JSON file (array of obstacle records)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Hold the action over a frame range `START:END` (end exclusive); repeatable
        #[arg(long = "hold", value_name = "START:END", value_parser = parse_hold)]
        holds: Vec<Range<u64>>,

        /// Settings JSON (cosmetics, particles, volume); defaults when omitted
        #[arg(long, value_name = "PATH")]
        settings: Option<PathBuf>,

        /// Maximum number of frames to simulate
        #[arg(short = 'n', long, default_value_t = 1800)]
        frames: u64,

        /// List the built-in levels and exit
        #[arg(long)]
        list: bool,
    }

    fn parse_hold(s: &str) -> Result<Range<u64>, String> {
        let (start, end) = s
            .split_once(':')
            .ok_or_else(|| format!("expected START:END, got '{}'", s))?;
        let start: u64 = start.trim().parse().map_err(|e| format!("bad start: {}", e))?;
        let end: u64 = end.trim().parse().map_err(|e| format!("bad end: {}", e))?;
        if end <= start {
            return Err(format!("empty range {}:{}", start, end));
        }
        Ok(start..end)
    }

    fn load_settings(path: Option<&Path>) -> Result<Settings> {
        let Some(path) = path else {
            return Ok(Settings::default());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let settings = Settings::from_json(&json)
            .with_context(|| format!("parsing {}", path.display()))?;
        log::debug!("settings: {}", settings.to_json()?);
        Ok(settings)
    }

    /// HUD that logs every signal and keeps the latest values
    #[derive(Debug, Default)]
    struct LogHud {
        phase: RunPhase,
        attempt: u32,
        progress: u8,
        coin: bool,
    }

    impl UiSink for LogHud {
        fn phase_changed(&mut self, phase: RunPhase) {
            log::info!("phase: {}", phase.as_str());
            self.phase = phase;
        }
        fn attempt_changed(&mut self, attempt: u32) {
            log::info!("attempt: {}", attempt);
            self.attempt = attempt;
        }
        fn progress_changed(&mut self, progress: u8) {
            log::debug!("progress: {}%", progress);
            self.progress = progress;
        }
        fn coin_changed(&mut self, collected: bool) {
            log::info!("coin: {}", collected);
            self.coin = collected;
        }
        fn level_changed(&mut self, _index: Option<usize>, name: &str) {
            log::info!("level: {}", name);
        }
    }

    pub fn run(cli: Cli) -> Result<()> {
        if cli.list {
            for (i, name) in levels::names().enumerate() {
                println!("{}. {}", i + 1, name);
            }
            return Ok(());
        }

        let settings = load_settings(cli.settings.as_deref())?;
        let mut audio = AudioManager::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_muted(settings.muted);
        let hud = LogHud::default();

        let mut driver = match &cli.file {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                let name = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "custom".to_string());
                let level = Level::from_json(name, &json)
                    .with_context(|| format!("parsing {}", path.display()))?;
                FrameDriver::with_level(level, settings, audio, hud)
            }
            None => {
                if cli.level == 0 || cli.level > levels::count() {
                    bail!("level must be between 1 and {}", levels::count());
                }
                FrameDriver::new(cli.level - 1, settings, audio, hud)?
            }
        };
        driver.init();

        // The first press only starts the run
        driver.push(Command::InputDown);
        driver.push(Command::InputUp);

        let mut held = false;
        let mut frame = 0;
        while frame < cli.frames {
            let want = cli.holds.iter().any(|r| r.contains(&frame));
            if want != held {
                driver.push(if want { Command::InputDown } else { Command::InputUp });
                held = want;
            }
            driver.frame(None);
            frame += 1;
            if matches!(driver.state().phase, RunPhase::GameOver | RunPhase::Won) {
                break;
            }
        }
        driver.teardown();

        let hud = driver.ui();
        let outcome = match hud.phase {
            RunPhase::Won => "WON",
            RunPhase::GameOver => "DIED",
            _ => "TIMEOUT",
        };
        println!(
            "{}: {} after {} frames at x={:.1} | attempt {} | progress {}% | coin {}",
            driver.state().level().name,
            outcome,
            frame,
            driver.state().player.x,
            hud.attempt,
            hud.progress,
            if hud.coin { "yes" } else { "no" },
        );
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_hold() {
            assert_eq!(parse_hold("10:20"), Ok(10..20));
            assert!(parse_hold("20:10").is_err());
            assert!(parse_hold("abc").is_err());
        }

        #[test]
        fn test_cli_parses_holds() {
            let cli = Cli::try_parse_from(["neon-dash", "--level", "2", "--hold", "5:9", "--hold", "40:60"])
                .unwrap();
            assert_eq!(cli.level, 2);
            assert_eq!(cli.holds, vec![5..9, 40..60]);
        }

        #[test]
        fn test_settings_file_is_optional() {
            let settings = load_settings(None).unwrap();
            assert_eq!(settings, Settings::default());
            assert!(load_settings(Some(Path::new("/nonexistent/settings.json"))).is_err());
        }

        #[test]
        fn test_settings_file_is_read() {
            let path = std::env::temp_dir().join("neon-dash-settings-test.json");
            std::fs::write(&path, r#"{ "muted": true, "cosmetics": { "color": 2 } }"#).unwrap();
            let cli = Cli::try_parse_from(["neon-dash", "--settings", path.to_str().unwrap()])
                .unwrap();
            let settings = load_settings(cli.settings.as_deref()).unwrap();
            std::fs::remove_file(&path).unwrap();
            assert!(settings.muted);
            assert_eq!(settings.cosmetics.color, 2);
        }

        #[test]
        fn test_level_and_file_conflict() {
            assert!(Cli::try_parse_from(["neon-dash", "--level", "2", "--file", "x.json"]).is_err());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    headless::run(headless::Cli::parse())
}
