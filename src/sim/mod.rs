//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame, no wall-clock time
//! - Seeded RNG only (cosmetic particles)
//! - Stable iteration order (obstacles by id)
//! - No rendering, audio or platform dependencies; side effects leave as events

pub mod camera;
pub mod collision;
pub mod level;
pub mod particles;
mod run;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use collision::{Aabb, BlockContact, classify_block_contact, spike_hitbox};
pub use level::{Level, LevelError, Obstacle, ObstacleDescriptor, ObstacleKind};
pub use particles::{Particle, ParticleSystem, ParticleTint};
pub use state::{GameEvent, GameMode, GameState, Player, RunPhase, Viewport};
pub use tick::tick;
