//! Run state machine
//!
//! Phase transitions driven by input and UI commands. The per-frame physics lives in
//! `tick`; everything here happens between frames or as a result of a collision.

use glam::Vec2;

use super::camera::Camera;
use super::level::{Level, ObstacleKind};
use super::particles::{ParticleSystem, ParticleTint};
use super::state::{GameEvent, GameMode, GameState, Player, RunPhase};
use crate::audio::Cue;
use crate::consts::{JUMP_FORCE, ORB_BOOST};

impl GameState {
    /// Action input pressed
    ///
    /// Starts a run from MENU, GAMEOVER or WON, jumps while playing and is ignored
    /// entirely while paused.
    pub fn input_down(&mut self) {
        if self.phase == RunPhase::Paused {
            return;
        }
        self.holding_input = true;

        if self.phase.awaits_start() {
            let retry = self.phase == RunPhase::GameOver;
            self.start_run(retry);
            return;
        }

        if self.phase == RunPhase::Playing && self.player.mode == GameMode::Cube {
            self.try_jump();
        }
    }

    /// Action input released
    pub fn input_up(&mut self) {
        self.holding_input = false;
    }

    /// Reset everything about the current run and start playing
    ///
    /// A retry bumps the attempt counter before the reset. The press that starts
    /// the run does not count as held input.
    pub fn start_run(&mut self, retry: bool) {
        if retry {
            self.set_attempt(self.attempt + 1);
        }
        self.reset_run();
        log::info!(
            "Starting '{}' attempt {}",
            self.level().name,
            self.attempt
        );
        self.set_phase(RunPhase::Playing);
    }

    /// Reinitialize player, camera, particles and obstacles from level data
    fn reset_run(&mut self) {
        self.player = Player::default();
        self.camera = Camera::default();
        self.particles.reset();
        self.obstacles = self.level().obstacles();
        self.last_orb_id = None;
        self.holding_input = false;
        self.time_ticks = 0;
        self.progress = 0;
        self.reported_progress = None;
        self.set_coin_collected(false);
    }

    /// Flip between PLAYING and PAUSED; other phases are unaffected
    pub fn toggle_pause(&mut self) {
        match self.phase {
            RunPhase::Playing => self.pause(),
            RunPhase::Paused => self.resume(),
            _ => {}
        }
    }

    pub fn pause(&mut self) {
        if self.phase == RunPhase::Playing {
            self.set_phase(RunPhase::Paused);
        }
    }

    pub fn resume(&mut self) {
        if self.phase == RunPhase::Paused {
            self.set_phase(RunPhase::Playing);
        }
    }

    /// Abandon the current run and start a new one
    ///
    /// Counts as a retry unless nothing has been played yet.
    pub fn restart(&mut self) {
        let retry = self.phase != RunPhase::Menu;
        self.start_run(retry);
    }

    /// Return to the idle menu, keeping the attempt counter
    pub fn to_menu(&mut self) {
        self.holding_input = false;
        self.set_phase(RunPhase::Menu);
    }

    /// Swap in a new level: full reset, MENU, attempt counter back to 1
    pub fn load_level(&mut self, level: Level) {
        log::info!(
            "Loading level '{}' ({} records)",
            level.name,
            level.descriptors.len()
        );
        self.particles = ParticleSystem::new(level.seed());
        self.replace_level(level);
        self.reset_run();
        self.set_phase(RunPhase::Menu);
        self.set_attempt(1);
    }

    /// Jump request: a standard orb takes precedence over a grounded jump
    pub(crate) fn try_jump(&mut self) {
        let ground_y = self.viewport.ground_y();
        let player_box = self.player.aabb();

        // Only the first overlapping orb is considered; if it already fired, nothing does
        let orb = self
            .obstacles
            .iter()
            .find(|o| o.kind == ObstacleKind::Orb && player_box.overlaps(&o.aabb(ground_y)))
            .map(|o| (o.id, o.aabb(ground_y).center()));

        if let Some((id, center)) = orb {
            if self.last_orb_id == Some(id) {
                return;
            }
            self.player.vy = JUMP_FORCE * ORB_BOOST;
            self.player.is_grounded = false;
            self.player.is_dashing = false;
            self.last_orb_id = Some(id);
            self.emit(GameEvent::Cue(Cue::Orb));
            self.particles.spawn_orb(center, ParticleTint::Orb);
            return;
        }

        if self.player.mode == GameMode::Cube && self.player.is_grounded {
            self.player.vy = JUMP_FORCE;
            self.player.is_grounded = false;
            self.emit(GameEvent::Cue(Cue::Jump));
        }
    }

    /// Kill the player; only the first death of a run counts
    pub(crate) fn die(&mut self) {
        if self.phase != RunPhase::Playing || self.player.is_dead {
            return;
        }
        self.player.is_dead = true;
        self.set_phase(RunPhase::GameOver);
        self.emit(GameEvent::Cue(Cue::Death));
        let center = Vec2::new(self.player.center_x(), self.player.center_y());
        self.particles.spawn_death(center);
    }

    /// Finish the level; ignored unless the run is still live
    pub(crate) fn win(&mut self) {
        if self.phase != RunPhase::Playing {
            return;
        }
        self.set_phase(RunPhase::Won);
        self.emit(GameEvent::Cue(Cue::Win));
    }
}
