//! Neon Dash - a side-scrolling obstacle course runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, run state)
//! - `driver`: Frame driver tying input, simulation, signals and rendering together
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Fire-and-forget sound cues
//! - `levels`: Built-in level data
//! - `settings`: Cosmetic and audio preferences

pub mod audio;
pub mod driver;
pub mod levels;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use audio::{AudioManager, Cue, CueSink};
pub use driver::{Command, FrameDriver, UiSink};
pub use settings::Settings;

/// Game configuration constants
///
/// All physics values are per frame; the simulation advances exactly one step per
/// display callback.
pub mod consts {
    /// Downward acceleration in cube mode
    pub const GRAVITY: f32 = 1.4;
    /// Vertical velocity applied by a grounded jump
    pub const JUMP_FORCE: f32 = -16.8;
    /// Multiplier on `JUMP_FORCE` for yellow orbs
    pub const ORB_BOOST: f32 = 1.2;
    /// World scroll speed (horizontal distance per frame)
    pub const MOVE_SPEED: f32 = 10.5;
    /// Distance from the bottom of the viewport to the ground line
    pub const GROUND_HEIGHT: f32 = 120.0;
    /// Player box edge length
    pub const PLAYER_SIZE: f32 = 40.0;

    /// Cube rotation while airborne (radians per frame)
    pub const CUBE_SPIN: f32 = 0.15;
    /// Blend factor toward the nearest right angle while grounded
    pub const CUBE_SNAP_BLEND: f32 = 0.2;

    /// Ship physics
    pub const SHIP_GRAVITY: f32 = 0.6;
    pub const SHIP_LIFT: f32 = 1.2;
    pub const SHIP_MAX_VY: f32 = 15.0;
    /// Banking angle per unit of vertical speed
    pub const SHIP_BANK: f32 = 0.05;
    /// Upward kick on entering a ship portal
    pub const SHIP_ENTRY_VY: f32 = -5.0;

    /// Wave vertical speed (matches scroll speed for a 45 degree line)
    pub const WAVE_SPEED: f32 = 10.5;

    /// Rotation decay while dashing
    pub const DASH_ROTATION_DECAY: f32 = 0.8;

    /// Spike hitbox inset on every side
    pub const SPIKE_INSET: f32 = 8.0;
    /// Landing/ceiling slack for blocks
    pub const BLOCK_TOLERANCE: f32 = 15.0;
    pub const WAVE_BLOCK_TOLERANCE: f32 = 20.0;

    /// Level descriptor defaults
    pub const DEFAULT_OBSTACLE_SIZE: f32 = 40.0;
    /// Progress denominator when a level has no obstacles
    pub const FALLBACK_LEVEL_LENGTH: f32 = 1000.0;

    /// Camera framing
    pub const CAMERA_LEAD: f32 = 0.25;
    pub const CAMERA_IDEAL_Y: f32 = 0.6;
    pub const CAMERA_SMOOTHING: f32 = 0.1;
    pub const CAMERA_MIN_Y: f32 = -100.0;
    pub const CAMERA_MAX_Y: f32 = 400.0;

    /// Particle decay
    pub const PARTICLE_LIFE_STEP: f32 = 0.02;
    pub const PARTICLE_SHRINK: f32 = 0.95;
    /// Death burst size
    pub const PARTICLE_COUNT: usize = 20;
    /// Hard cap on live particles
    pub const MAX_PARTICLES: usize = 1024;

    /// Default viewport (logical pixels) before the first resize
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 720.0;
}

/// Round an angle to the nearest multiple of 90 degrees
#[inline]
pub fn nearest_right_angle(angle: f32) -> f32 {
    use std::f32::consts::FRAC_PI_2;
    (angle / FRAC_PI_2).round() * FRAC_PI_2
}

/// Blend `current` toward `target` by factor `t`
#[inline]
pub fn blend(current: f32, target: f32, t: f32) -> f32 {
    current * (1.0 - t) + target * t
}
