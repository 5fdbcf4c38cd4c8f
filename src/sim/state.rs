//! Game state and core simulation types
//!
//! Everything a frame mutates lives in [`GameState`], owned by the frame driver and
//! updated in place by [`super::tick`].

use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::collision::Aabb;
use super::level::{Level, Obstacle};
use super::particles::ParticleSystem;
use crate::audio::Cue;
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunPhase {
    /// Idle, waiting for the first input
    #[default]
    Menu,
    /// Simulation active
    Playing,
    /// Simulation and particles frozen
    Paused,
    /// Player died; particles keep decaying
    GameOver,
    /// Finish line reached; particles keep decaying
    Won,
}

impl RunPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunPhase::Menu => "MENU",
            RunPhase::Playing => "PLAYING",
            RunPhase::Paused => "PAUSED",
            RunPhase::GameOver => "GAMEOVER",
            RunPhase::Won => "WON",
        }
    }

    /// Phases that an input-down turns into a fresh run
    pub fn awaits_start(&self) -> bool {
        matches!(self, RunPhase::Menu | RunPhase::GameOver | RunPhase::Won)
    }
}

/// Player locomotion style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Cube,
    Ship,
    Wave,
}

/// The player entity
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Left edge in world space
    pub x: f32,
    /// Top edge, measured downward from the top of the viewport
    pub y: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    /// Radians
    pub rotation: f32,
    pub is_grounded: bool,
    pub is_dead: bool,
    pub mode: GameMode,
    pub is_dashing: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            vy: 0.0,
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            rotation: 0.0,
            is_grounded: true,
            is_dead: false,
            mode: GameMode::Cube,
            is_dashing: false,
        }
    }
}

impl Player {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// Viewport size in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Y coordinate of the ground line
    pub fn ground_y(&self) -> f32 {
        self.height - GROUND_HEIGHT
    }
}

/// Events produced by the simulation, drained by the frame driver each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Play a sound cue
    Cue(Cue),
    PhaseChanged(RunPhase),
    AttemptChanged(u32),
    ProgressChanged(u8),
    CoinCollected(bool),
}

/// Complete simulation state for the active level
#[derive(Debug, Clone)]
pub struct GameState {
    /// Current phase
    pub phase: RunPhase,
    /// Attempt counter (1-based)
    pub attempt: u32,
    /// Whether this run picked up the level's coin
    pub coin_collected: bool,
    /// Progress through the level, 0-100
    pub progress: u8,
    /// Last progress value published to the UI
    pub(crate) reported_progress: Option<u8>,
    /// Id of the most recently triggered standard orb
    pub last_orb_id: Option<u32>,
    /// Whether the action input is currently held
    pub holding_input: bool,
    pub player: Player,
    pub camera: Camera,
    pub viewport: Viewport,
    /// Runtime obstacles, sorted by id
    pub obstacles: Vec<Obstacle>,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticleSystem,
    /// Simulation frame counter for the current run
    pub time_ticks: u64,
    /// Level data runs are rebuilt from
    level: Level,
    /// Pending events for the driver
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a state for the given level, sitting in the menu
    pub fn new(level: Level) -> Self {
        let obstacles = level.obstacles();
        Self {
            phase: RunPhase::Menu,
            attempt: 1,
            coin_collected: false,
            progress: 0,
            reported_progress: None,
            last_orb_id: None,
            holding_input: false,
            player: Player::default(),
            camera: Camera::default(),
            viewport: Viewport::default(),
            obstacles,
            particles: ParticleSystem::new(level.seed()),
            time_ticks: 0,
            level,
            events: Vec::new(),
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub(crate) fn replace_level(&mut self, level: Level) {
        self.level = level;
    }

    /// Queue an event for the driver
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// X coordinate used as the progress denominator
    pub fn finish_x(&self) -> f32 {
        self.obstacles
            .last()
            .map(|o| o.x)
            .filter(|x| *x != 0.0)
            .unwrap_or(FALLBACK_LEVEL_LENGTH)
    }

    /// Current phase transition helper; emits a signal when the phase changes
    pub fn set_phase(&mut self, phase: RunPhase) {
        if self.phase != phase {
            log::info!("Phase {} -> {}", self.phase.as_str(), phase.as_str());
            self.phase = phase;
            self.emit(GameEvent::PhaseChanged(phase));
        }
    }

    pub(crate) fn set_attempt(&mut self, attempt: u32) {
        self.attempt = attempt;
        self.emit(GameEvent::AttemptChanged(attempt));
    }

    pub(crate) fn set_coin_collected(&mut self, collected: bool) {
        self.coin_collected = collected;
        self.emit(GameEvent::CoinCollected(collected));
    }

    /// Recompute progress and publish it when the integer value moves
    pub(crate) fn update_progress(&mut self) {
        let ratio = self.player.x / self.finish_x();
        let progress = (ratio * 100.0).floor().clamp(0.0, 100.0) as u8;
        self.progress = progress;

        // Whole-point steps only, so any change is at least one point
        if self.reported_progress != Some(progress) {
            self.reported_progress = Some(progress);
            self.emit(GameEvent::ProgressChanged(progress));
        }
    }
}
