//! Frame driver
//!
//! One call to [`FrameDriver::frame`] per display callback: drain the buffered
//! commands, advance the simulation exactly one step, publish signals and cues, then
//! draw. There is no catch-up; a slow display simply runs the game slower.

use crate::audio::CueSink;
use crate::levels;
use crate::renderer::{build_scene, RenderState, Vertex};
use crate::settings::{Cosmetics, Settings};
use crate::sim::{self, GameEvent, GameState, Level, LevelError, RunPhase, Viewport};

/// Commands from the input layer and the UI
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Action pressed (key, mouse button or touch)
    InputDown,
    /// Action released
    InputUp,
    TogglePause,
    Pause,
    Resume,
    /// Restart from the pause menu; counts as a retry
    Restart,
    /// Back to the menu, attempts kept
    Menu,
    /// Load a built-in level by index
    SwitchLevel(usize),
    /// Load a custom level
    LoadLevel(Level),
    /// Next built-in level, wrapping after the last
    NextLevel,
    /// Previous built-in level, wrapping before the first
    PrevLevel,
    /// Continue from the win screen; no-op on the last built-in or a custom level
    AdvanceLevel,
    SetCosmetics(Cosmetics),
    /// New viewport size in logical pixels
    Resize { width: f32, height: f32 },
}

/// Receives summary signals for the HUD
pub trait UiSink {
    fn phase_changed(&mut self, phase: RunPhase);
    fn attempt_changed(&mut self, attempt: u32);
    fn progress_changed(&mut self, progress: u8);
    fn coin_changed(&mut self, collected: bool);
    /// A level was loaded; `index` is `None` for custom levels
    fn level_changed(&mut self, _index: Option<usize>, _name: &str) {}
}

/// UI sink that drops every signal
#[derive(Debug, Default, Clone, Copy)]
pub struct NullUi;

impl UiSink for NullUi {
    fn phase_changed(&mut self, _phase: RunPhase) {}
    fn attempt_changed(&mut self, _attempt: u32) {}
    fn progress_changed(&mut self, _progress: u8) {}
    fn coin_changed(&mut self, _collected: bool) {}
}

/// Something the frame can be drawn to
pub trait RenderTarget {
    fn present(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError>;
    /// Rebuild the surface after it was lost or outdated
    fn reconfigure(&mut self);
}

impl RenderTarget for RenderState {
    fn present(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        self.render(vertices)
    }

    fn reconfigure(&mut self) {
        RenderState::reconfigure(self);
    }
}

/// Input events buffered between frames
///
/// Edges are kept in arrival order so a press and release inside one frame still
/// produce a jump.
#[derive(Debug, Default)]
pub struct InputLatch {
    held: bool,
    pending: Vec<Command>,
}

impl InputLatch {
    pub fn push(&mut self, command: Command) {
        match command {
            Command::InputDown => self.held = true,
            Command::InputUp => self.held = false,
            _ => {}
        }
        self.pending.push(command);
    }

    /// Whether the action input is physically held right now
    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.pending)
    }

    pub fn clear(&mut self) {
        self.held = false;
        self.pending.clear();
    }
}

/// Owns the simulation and its collaborators
pub struct FrameDriver<A: CueSink, U: UiSink> {
    state: GameState,
    settings: Settings,
    audio: A,
    ui: U,
    latch: InputLatch,
    /// Built-in level currently loaded, `None` for custom levels
    level_index: Option<usize>,
    running: bool,
}

impl<A: CueSink, U: UiSink> FrameDriver<A, U> {
    /// Driver for a built-in level
    pub fn new(level_index: usize, settings: Settings, audio: A, ui: U) -> Result<Self, LevelError> {
        let level = levels::builtin(level_index)?;
        let mut driver = Self::with_level(level, settings, audio, ui);
        driver.level_index = Some(level_index);
        Ok(driver)
    }

    /// Driver for a custom level
    pub fn with_level(level: Level, settings: Settings, audio: A, ui: U) -> Self {
        Self {
            state: GameState::new(level),
            settings,
            audio,
            ui,
            latch: InputLatch::default(),
            level_index: None,
            running: false,
        }
    }

    /// Start the loop and publish the initial HUD state
    pub fn init(&mut self) {
        log::info!("Starting on level '{}'", self.state.level().name);
        self.running = true;
        self.latch.clear();
        // Anything queued while constructing is superseded by the full snapshot
        self.state.drain_events();
        self.publish_snapshot();
    }

    /// Reload the current level: full reset back to the menu
    pub fn reset(&mut self) {
        let level = self.state.level().clone();
        self.state.load_level(level);
        self.latch.clear();
        self.dispatch_events();
    }

    /// Stop the loop; later frames are no-ops
    pub fn teardown(&mut self) {
        log::info!("Frame driver stopped");
        self.running = false;
        self.latch.clear();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Buffer a command for the next frame
    pub fn push(&mut self, command: Command) {
        if self.running {
            self.latch.push(command);
        }
    }

    /// Run one frame: commands, one simulation step, signals, draw
    ///
    /// Returns whether the driver is still running.
    pub fn frame(&mut self, target: Option<&mut dyn RenderTarget>) -> bool {
        if !self.running {
            return false;
        }
        self.step();
        match target {
            Some(target) => self.draw(target),
            None => log::trace!("No render target, skipping draw"),
        }
        true
    }

    /// Commands, simulation step and signals without drawing
    pub fn step(&mut self) {
        for command in self.latch.drain() {
            self.apply(command);
        }
        sim::tick(&mut self.state);
        self.dispatch_events();
    }

    fn draw(&mut self, target: &mut dyn RenderTarget) {
        let vertices = build_scene(&self.state, &self.settings);
        match target.present(&vertices) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::info!("Surface lost, reconfiguring");
                target.reconfigure();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::InputDown => self.state.input_down(),
            Command::InputUp => self.state.input_up(),
            Command::TogglePause => self.state.toggle_pause(),
            Command::Pause => self.state.pause(),
            Command::Resume => self.state.resume(),
            Command::Restart => self.state.restart(),
            Command::Menu => self.state.to_menu(),
            Command::SwitchLevel(index) => self.switch_level(index),
            Command::LoadLevel(level) => {
                self.level_index = None;
                self.state.load_level(level);
                self.ui.level_changed(None, &self.state.level().name);
            }
            Command::NextLevel => {
                let next = self.level_index.map_or(0, levels::next_index);
                self.switch_level(next);
            }
            Command::PrevLevel => {
                let prev = self.level_index.map_or(0, levels::prev_index);
                self.switch_level(prev);
            }
            Command::AdvanceLevel => match self.level_index {
                Some(index) if index + 1 < levels::count() => self.switch_level(index + 1),
                _ => log::debug!("No level after {:?}", self.level_index),
            },
            Command::SetCosmetics(cosmetics) => self.settings.set_cosmetics(cosmetics),
            Command::Resize { width, height } => {
                if width > 0.0 && height > 0.0 {
                    self.state.viewport = Viewport::new(width, height);
                } else {
                    log::debug!("Ignoring degenerate viewport {}x{}", width, height);
                }
            }
        }
    }

    fn switch_level(&mut self, index: usize) {
        match levels::builtin(index) {
            Ok(level) => {
                self.level_index = Some(index);
                self.state.load_level(level);
                self.ui.level_changed(Some(index), &self.state.level().name);
            }
            Err(e) => log::warn!("Cannot switch level: {}", e),
        }
    }

    /// Route simulation events to the audio and UI sinks
    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Cue(cue) => self.audio.play(cue),
                GameEvent::PhaseChanged(phase) => self.ui.phase_changed(phase),
                GameEvent::AttemptChanged(attempt) => self.ui.attempt_changed(attempt),
                GameEvent::ProgressChanged(progress) => self.ui.progress_changed(progress),
                GameEvent::CoinCollected(collected) => self.ui.coin_changed(collected),
            }
        }
    }

    fn publish_snapshot(&mut self) {
        let name = self.state.level().name.clone();
        self.ui.level_changed(self.level_index, &name);
        self.ui.phase_changed(self.state.phase);
        self.ui.attempt_changed(self.state.attempt);
        self.ui.progress_changed(self.state.progress);
        self.ui.coin_changed(self.state.coin_collected);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn level_index(&self) -> Option<usize> {
        self.level_index
    }

    /// Whether the action input is currently held on the input side
    pub fn input_held(&self) -> bool {
        self.latch.is_held()
    }
}
