//! Per-frame simulation step
//!
//! Core game loop that advances the run by exactly one frame. Input has already
//! been latched into `GameState::holding_input` by the driver; this module never
//! looks at raw events.

use std::f32::consts::FRAC_PI_4;

use glam::Vec2;

use super::collision::{BlockContact, classify_block_contact, spike_hitbox};
use super::level::ObstacleKind;
use super::particles::ParticleTint;
use super::state::{GameEvent, GameMode, GameState, RunPhase};
use crate::audio::Cue;
use crate::consts::*;
use crate::{blend, nearest_right_angle};

/// Advance the game state by one frame
pub fn tick(state: &mut GameState) {
    match state.phase {
        RunPhase::Paused | RunPhase::Menu => return,
        RunPhase::GameOver | RunPhase::Won => {
            state.particles.update();
            return;
        }
        RunPhase::Playing => {}
    }

    // Holding in cube mode keeps re-jumping as soon as the player lands
    if state.player.mode == GameMode::Cube && state.holding_input {
        state.try_jump();
    }

    integrate_player(state);
    resolve_collisions(state);
    clamp_to_floor(state);
    release_orb_marker(state);

    let (player, viewport) = (&state.player, &state.viewport);
    state.camera.follow(player, viewport);
    state.update_progress();
    state.particles.update();
    state.time_ticks += 1;
}

/// Scroll forward and apply the current mode's vertical motion
fn integrate_player(state: &mut GameState) {
    let holding = state.holding_input;
    let p = &mut state.player;
    p.x += MOVE_SPEED;

    if p.is_dashing {
        p.vy = 0.0;
        state
            .particles
            .spawn_dash_line(Vec2::new(p.x, p.center_y()));
        p.rotation *= DASH_ROTATION_DECAY;
        if !holding {
            p.is_dashing = false;
        }
        return;
    }

    match p.mode {
        GameMode::Cube => {
            p.vy += GRAVITY;
            p.y += p.vy;
            if p.is_grounded {
                let target = nearest_right_angle(p.rotation);
                p.rotation = blend(p.rotation, target, CUBE_SNAP_BLEND);
            } else {
                p.rotation += CUBE_SPIN;
            }
        }
        GameMode::Ship => {
            p.vy += SHIP_GRAVITY;
            if holding {
                p.vy -= SHIP_LIFT;
                state
                    .particles
                    .spawn_ship_trail(Vec2::new(p.x, p.center_y()));
            }
            p.vy = p.vy.clamp(-SHIP_MAX_VY, SHIP_MAX_VY);
            p.y += p.vy;
            p.rotation = blend(p.rotation, p.vy * SHIP_BANK, 0.1);
        }
        GameMode::Wave => {
            if holding {
                p.vy = -WAVE_SPEED;
                p.rotation = -FRAC_PI_4;
            } else {
                p.vy = WAVE_SPEED;
                p.rotation = FRAC_PI_4;
            }
            p.y += p.vy;
            state
                .particles
                .spawn_wave_trail(Vec2::new(p.center_x(), p.center_y()));
        }
    }
}

/// One pass over every obstacle; several kinds may apply in the same frame
fn resolve_collisions(state: &mut GameState) {
    let ground_y = state.viewport.ground_y();
    state.player.is_grounded = false;

    for i in 0..state.obstacles.len() {
        let kind = state.obstacles[i].kind;
        let obs_box = state.obstacles[i].aabb(ground_y);
        let player_box = state.player.aabb();
        if !player_box.overlaps(&obs_box) {
            continue;
        }

        match kind {
            ObstacleKind::OrbDash => {
                if state.holding_input && !state.player.is_dashing {
                    let p = &mut state.player;
                    p.is_dashing = true;
                    p.vy = 0.0;
                    p.y = obs_box.center().y - p.height / 2.0;
                    p.is_grounded = false;
                    p.rotation = 0.0;
                    state.emit(GameEvent::Cue(Cue::Dash));
                    state
                        .particles
                        .spawn_orb(obs_box.center(), ParticleTint::OrbDash);
                }
            }
            ObstacleKind::Coin => {
                if !state.obstacles[i].collected {
                    state.obstacles[i].collected = true;
                    state.set_coin_collected(true);
                    state.emit(GameEvent::Cue(Cue::Coin));
                    state.particles.spawn_coin(obs_box.center());
                }
            }
            ObstacleKind::PortalShip => {
                if state.player.mode != GameMode::Ship {
                    enter_mode(state, GameMode::Ship);
                    state.player.vy = SHIP_ENTRY_VY;
                }
            }
            ObstacleKind::PortalCube => {
                if state.player.mode != GameMode::Cube {
                    enter_mode(state, GameMode::Cube);
                }
            }
            ObstacleKind::PortalWave => {
                if state.player.mode != GameMode::Wave {
                    enter_mode(state, GameMode::Wave);
                    state.player.vy = WAVE_SPEED;
                }
            }
            // Standard orbs fire from the jump path
            ObstacleKind::Orb => {}
            ObstacleKind::Spike => {
                if player_box.overlaps(&spike_hitbox(&obs_box)) {
                    state.die();
                }
            }
            ObstacleKind::Finish => state.win(),
            ObstacleKind::Block => {
                let p = &mut state.player;
                match classify_block_contact(&player_box, p.vy, &obs_box, p.mode) {
                    BlockContact::Landing { surface } => {
                        p.y = surface - p.height;
                        p.vy = 0.0;
                        p.is_grounded = true;
                        if p.mode == GameMode::Ship {
                            p.rotation = 0.0;
                        }
                    }
                    BlockContact::Ceiling { surface } => {
                        p.y = surface;
                        p.vy = 0.0;
                        if p.mode == GameMode::Wave {
                            state.die();
                        }
                    }
                    BlockContact::Impact => state.die(),
                }
            }
        }
    }
}

fn enter_mode(state: &mut GameState, mode: GameMode) {
    log::debug!("Mode {:?} -> {:?} at x={}", state.player.mode, mode, state.player.x);
    let p = &mut state.player;
    p.mode = mode;
    p.rotation = 0.0;
    p.is_dashing = false;
}

/// Keep a live player above the ground line
///
/// The wave only gets repositioned; every other mode lands as on a block.
fn clamp_to_floor(state: &mut GameState) {
    let ground_y = state.viewport.ground_y();
    let p = &mut state.player;
    if p.is_dead || p.bottom() < ground_y {
        return;
    }

    p.y = ground_y - p.height;
    if p.mode != GameMode::Wave {
        p.vy = 0.0;
        p.is_grounded = true;
        if p.mode == GameMode::Ship {
            p.rotation = 0.0;
        }
    }
}

/// Forget the last orb once the player is clear of it
fn release_orb_marker(state: &mut GameState) {
    let Some(id) = state.last_orb_id else {
        return;
    };
    let ground_y = state.viewport.ground_y();
    let player_box = state.player.aabb();
    let still_inside = state
        .obstacles
        .iter()
        .find(|o| o.id == id)
        .is_some_and(|o| player_box.overlaps(&o.aabb(ground_y)));
    if !still_inside {
        state.last_orb_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::{Level, ObstacleDescriptor};
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_2;

    const GROUND: f32 = DEFAULT_VIEWPORT_HEIGHT - GROUND_HEIGHT;

    fn level(descriptors: Vec<ObstacleDescriptor>) -> Level {
        Level::new("test", descriptors)
    }

    /// A state already in PLAYING with the player resting on the ground
    fn playing(descriptors: Vec<ObstacleDescriptor>) -> GameState {
        let mut state = GameState::new(level(descriptors));
        state.input_down();
        state.input_up();
        state.player.y = GROUND - PLAYER_SIZE;
        state.drain_events();
        state
    }

    fn finish_far() -> ObstacleDescriptor {
        ObstacleDescriptor::new(ObstacleKind::Finish, 100_000.0)
    }

    fn cues(state: &mut GameState) -> Vec<Cue> {
        state
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::Cue(cue) => Some(cue),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_scrolls_at_constant_speed() {
        let mut state = playing(vec![finish_far()]);
        for _ in 0..10 {
            tick(&mut state);
        }
        assert!((state.player.x - 10.0 * MOVE_SPEED).abs() < 1e-3);
        assert!(state.player.is_grounded);
        assert_eq!(state.player.bottom(), GROUND);
        assert_eq!(state.time_ticks, 10);
    }

    #[test]
    fn test_frozen_phases_leave_player_alone() {
        let mut state = playing(vec![
            ObstacleDescriptor::new(ObstacleKind::Coin, 0.0),
            finish_far(),
        ]);
        state.pause();
        let before = state.player.clone();
        for _ in 0..5 {
            tick(&mut state);
        }
        assert_eq!(state.player, before);
        assert!(!state.obstacles[0].collected);
        assert_eq!(state.time_ticks, 0);

        state.to_menu();
        tick(&mut state);
        assert_eq!(state.player, before);
    }

    #[test]
    fn test_game_over_only_decays_particles() {
        let mut state = playing(vec![finish_far()]);
        state.die();
        let before = state.player.clone();
        let count = state.particles.len();
        let life = state.particles.particles()[0].life;

        tick(&mut state);
        assert_eq!(state.player, before);
        assert_eq!(state.particles.len(), count);
        assert!(state.particles.particles()[0].life < life);
    }

    #[test]
    fn test_spike_core_kills() {
        // Spike one frame ahead: after moving, the player overlaps its core
        let mut state = playing(vec![
            ObstacleDescriptor::new(ObstacleKind::Spike, 30.0),
            finish_far(),
        ]);
        tick(&mut state);
        assert_eq!(state.phase, RunPhase::GameOver);
        assert!(state.player.is_dead);
        assert!(cues(&mut state).contains(&Cue::Death));
    }

    #[test]
    fn test_spike_margin_is_safe() {
        // After one frame the player's right edge is at 50.5: 5.5 units into a
        // spike at x=45, short of the 8 unit margin
        let mut state = playing(vec![
            ObstacleDescriptor::new(ObstacleKind::Spike, 45.0),
            finish_far(),
        ]);
        tick(&mut state);
        assert_eq!(state.phase, RunPhase::Playing);
        assert!(!state.player.is_dead);
    }

    #[test]
    fn test_landing_on_block() {
        let mut state = playing(vec![
            ObstacleDescriptor::new(ObstacleKind::Block, 0.0)
                .at_height(100.0)
                .with_width(400.0),
            finish_far(),
        ]);
        let block_top = GROUND - 100.0 - 40.0;
        // Falling, 5 units above the block
        state.player.y = block_top - PLAYER_SIZE - 5.0;
        state.player.vy = 8.0;
        state.player.is_grounded = false;

        tick(&mut state);
        assert_eq!(state.phase, RunPhase::Playing);
        assert_eq!(state.player.vy, 0.0);
        assert!(state.player.is_grounded);
        assert_eq!(state.player.bottom(), block_top);
    }

    #[test]
    fn test_block_side_kills() {
        let mut state = playing(vec![
            ObstacleDescriptor::new(ObstacleKind::Block, 45.0).with_height(80.0),
            finish_far(),
        ]);
        tick(&mut state);
        assert_eq!(state.phase, RunPhase::GameOver);
    }

    #[test]
    fn test_wave_ceiling_is_lethal_but_floor_is_not() {
        let mut state = playing(vec![
            ObstacleDescriptor::new(ObstacleKind::Block, 0.0)
                .at_height(200.0)
                .with_width(1000.0),
            finish_far(),
        ]);
        state.player.mode = GameMode::Wave;

        // Released: dives into the floor and slides along it
        for _ in 0..3 {
            tick(&mut state);
        }
        assert_eq!(state.phase, RunPhase::Playing);
        assert_eq!(state.player.bottom(), GROUND);
        assert!(!state.player.is_grounded);
        assert_eq!(state.player.vy, WAVE_SPEED);

        // Held: climbs into the block above
        state.holding_input = true;
        for _ in 0..20 {
            tick(&mut state);
            if state.phase != RunPhase::Playing {
                break;
            }
        }
        assert_eq!(state.phase, RunPhase::GameOver);
    }

    #[test]
    fn test_cube_ceiling_bump_survives() {
        let block_bottom = GROUND - 100.0;
        let mut state = playing(vec![
            ObstacleDescriptor::new(ObstacleKind::Block, 0.0)
                .at_height(100.0)
                .with_width(1000.0),
            finish_far(),
        ]);
        state.player.y = block_bottom + 2.0;
        state.player.vy = -10.0;
        state.player.is_grounded = false;

        tick(&mut state);
        assert_eq!(state.phase, RunPhase::Playing);
        assert_eq!(state.player.y, block_bottom);
        assert_eq!(state.player.vy, 0.0);
    }

    #[test]
    fn test_held_input_bunny_hops() {
        let mut state = playing(vec![finish_far()]);
        state.holding_input = true;
        tick(&mut state);
        assert!(state.player.vy < 0.0);
        assert_eq!(cues(&mut state), vec![Cue::Jump]);

        let mut jumps = 0;
        for _ in 0..60 {
            tick(&mut state);
            jumps += cues(&mut state).iter().filter(|c| **c == Cue::Jump).count();
        }
        assert!(jumps >= 2);
    }

    #[test]
    fn test_ship_clamp_at_bound() {
        let mut state = playing(vec![finish_far()]);
        state.player.mode = GameMode::Ship;
        state.player.y = 0.0;
        state.player.vy = SHIP_MAX_VY;
        tick(&mut state);
        assert_eq!(state.player.vy, SHIP_MAX_VY);
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    /// Player in open air, clear of the ground
    fn airborne(state: &mut GameState, mode: GameMode) {
        state.player.mode = mode;
        state.player.y = GROUND - 300.0;
        state.player.vy = 0.0;
        state.player.is_grounded = false;
        state.player.rotation = 0.0;
    }

    #[test]
    fn test_cube_spins_in_air() {
        let mut state = playing(vec![finish_far()]);
        airborne(&mut state, GameMode::Cube);
        tick(&mut state);
        assert_close(state.player.rotation, CUBE_SPIN);
        tick(&mut state);
        assert_close(state.player.rotation, 2.0 * CUBE_SPIN);
    }

    #[test]
    fn test_grounded_cube_snaps_toward_right_angle() {
        let mut state = playing(vec![finish_far()]);
        state.player.is_grounded = true;
        state.player.rotation = 1.3;
        tick(&mut state);
        assert_close(state.player.rotation, 1.3 * 0.8 + FRAC_PI_2 * 0.2);

        for _ in 0..100 {
            tick(&mut state);
        }
        assert_close(state.player.rotation, FRAC_PI_2);
    }

    #[test]
    fn test_ship_banks_with_vertical_speed() {
        let mut state = playing(vec![finish_far()]);
        airborne(&mut state, GameMode::Ship);
        tick(&mut state);
        // vy = 0.6, target 0.6 * SHIP_BANK, blended by 0.1
        assert_close(state.player.rotation, 0.6 * SHIP_BANK * 0.1);

        airborne(&mut state, GameMode::Ship);
        state.holding_input = true;
        tick(&mut state);
        assert_close(state.player.rotation, -0.6 * SHIP_BANK * 0.1);
    }

    #[test]
    fn test_ship_rotation_zeroed_on_floor_landing() {
        let mut state = playing(vec![finish_far()]);
        state.player.mode = GameMode::Ship;
        state.player.vy = 5.0;
        state.player.rotation = 0.4;
        tick(&mut state);
        assert!(state.player.is_grounded);
        assert_eq!(state.player.rotation, 0.0);
    }

    #[test]
    fn test_ship_rotation_zeroed_on_block_landing() {
        let mut state = playing(vec![
            ObstacleDescriptor::new(ObstacleKind::Block, 0.0).with_width(200.0),
            finish_far(),
        ]);
        state.player.mode = GameMode::Ship;
        state.player.y = GROUND - 83.0;
        state.player.vy = 5.0;
        state.player.is_grounded = false;
        state.player.rotation = 0.4;
        tick(&mut state);
        assert_eq!(state.phase, RunPhase::Playing);
        assert_eq!(state.player.y, GROUND - 80.0);
        assert!(state.player.is_grounded);
        assert_eq!(state.player.rotation, 0.0);
    }

    #[test]
    fn test_wave_points_along_its_diagonal() {
        let mut state = playing(vec![finish_far()]);
        airborne(&mut state, GameMode::Wave);
        state.holding_input = true;
        tick(&mut state);
        assert_close(state.player.rotation, -FRAC_PI_4);

        state.input_up();
        tick(&mut state);
        assert_close(state.player.rotation, FRAC_PI_4);
    }

    #[test]
    fn test_dash_decays_rotation() {
        let mut state = playing(vec![finish_far()]);
        airborne(&mut state, GameMode::Cube);
        state.player.is_dashing = true;
        state.player.rotation = 0.5;
        state.holding_input = true;
        tick(&mut state);
        assert_close(state.player.rotation, 0.5 * DASH_ROTATION_DECAY);
        tick(&mut state);
        assert_close(state.player.rotation, 0.5 * DASH_ROTATION_DECAY * DASH_ROTATION_DECAY);
        assert_eq!(state.player.vy, 0.0);
    }

    #[test]
    fn test_ship_portal() {
        let mut state = playing(vec![
            ObstacleDescriptor::new(ObstacleKind::PortalShip, 40.0).with_height(400.0),
            finish_far(),
        ]);
        state.player.y = 300.0;
        state.player.is_grounded = false;
        state.player.rotation = 1.0;
        tick(&mut state);
        assert_eq!(state.player.mode, GameMode::Ship);
        assert_eq!(state.player.vy, SHIP_ENTRY_VY);
        assert_eq!(state.player.rotation, 0.0);

        // Portal still overlapping: mode equality prevents re-entry
        state.player.vy = 3.0;
        tick(&mut state);
        assert_ne!(state.player.vy, SHIP_ENTRY_VY);
        assert_eq!(state.player.mode, GameMode::Ship);
    }

    #[test]
    fn test_wave_portal_sets_descent() {
        let mut state = playing(vec![
            ObstacleDescriptor::new(ObstacleKind::PortalWave, 40.0).with_height(400.0),
            finish_far(),
        ]);
        state.player.y = 300.0;
        state.player.is_grounded = false;
        tick(&mut state);
        assert_eq!(state.player.mode, GameMode::Wave);
        assert_eq!(state.player.vy, WAVE_SPEED);
        assert!(!state.player.is_dashing);
    }

    #[test]
    fn test_coin_is_collected_once() {
        let mut state = playing(vec![
            ObstacleDescriptor::new(ObstacleKind::Coin, 30.0).with_width(200.0),
            finish_far(),
        ]);
        tick(&mut state);
        assert!(state.obstacles[0].collected);
        assert!(state.coin_collected);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Cue(Cue::Coin)));
        assert!(events.contains(&GameEvent::CoinCollected(true)));
        let particles = state.particles.len();

        tick(&mut state);
        let events = state.drain_events();
        assert!(!events.contains(&GameEvent::Cue(Cue::Coin)));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::CoinCollected(_))));
        assert!(state.particles.len() <= particles);
    }

    #[test]
    fn test_dash_orb_requires_hold() {
        let mut state = playing(vec![
            ObstacleDescriptor::new(ObstacleKind::OrbDash, 30.0).with_width(200.0),
            finish_far(),
        ]);
        tick(&mut state);
        assert!(!state.player.is_dashing);
        assert!(!cues(&mut state).contains(&Cue::Dash));
    }

    #[test]
    fn test_dash_enters_once_and_exits_on_release() {
        let mut state = playing(vec![
            ObstacleDescriptor::new(ObstacleKind::OrbDash, 30.0)
                .at_height(80.0)
                .with_width(300.0),
            finish_far(),
        ]);
        // Float the player inside the orb band
        state.player.y = GROUND - 100.0;
        state.player.is_grounded = false;
        state.holding_input = true;

        tick(&mut state);
        assert!(state.player.is_dashing);
        let orb_center_y = GROUND - 80.0 - 20.0;
        assert_eq!(state.player.center_y(), orb_center_y);
        assert_eq!(cues(&mut state), vec![Cue::Dash]);

        // Held and still overlapping: gravity suppressed, no second trigger
        for _ in 0..3 {
            tick(&mut state);
            assert!(state.player.is_dashing);
            assert_eq!(state.player.vy, 0.0);
            assert!(cues(&mut state).is_empty());
        }

        // Release inside the orb: dash ends and does not re-trigger
        state.input_up();
        tick(&mut state);
        assert!(!state.player.is_dashing);
        assert!(!cues(&mut state).contains(&Cue::Dash));
    }

    #[test]
    fn test_orb_debounce_and_reentry() {
        let mut state = playing(vec![
            ObstacleDescriptor::new(ObstacleKind::Orb, 0.0)
                .at_height(200.0)
                .with_width(400.0),
            finish_far(),
        ]);
        let orb_top = GROUND - 200.0 - 40.0;
        state.player.y = orb_top + 10.0;
        state.player.is_grounded = false;
        state.holding_input = true;

        tick(&mut state);
        assert_eq!(state.last_orb_id, Some(0));
        assert_eq!(cues(&mut state), vec![Cue::Orb]);

        // Pin the player inside the orb: held frames must not re-fire
        state.player.y = orb_top + 10.0;
        state.player.vy = 0.0;
        tick(&mut state);
        assert!(!cues(&mut state).contains(&Cue::Orb));

        // Leave the orb, then come back
        state.player.y = GROUND - PLAYER_SIZE;
        tick(&mut state);
        assert_eq!(state.last_orb_id, None);
        cues(&mut state);

        state.player.y = orb_top + 10.0;
        state.player.vy = 0.0;
        state.player.is_grounded = false;
        tick(&mut state);
        assert!(cues(&mut state).contains(&Cue::Orb));
    }

    #[test]
    fn test_overlapping_orbs_fire_only_the_first() {
        let tall_orb = || {
            ObstacleDescriptor::new(ObstacleKind::Orb, 0.0)
                .with_width(400.0)
                .with_height(400.0)
        };
        let mut state = playing(vec![tall_orb(), tall_orb(), finish_far()]);
        state.player.is_grounded = true;

        state.input_down();
        tick(&mut state);
        tick(&mut state);

        assert_eq!(state.last_orb_id, Some(0));
        assert_eq!(cues(&mut state), vec![Cue::Orb]);
    }

    #[test]
    fn test_finish_wins() {
        let mut state = playing(vec![ObstacleDescriptor::new(ObstacleKind::Finish, 30.0)
            .with_height(400.0)]);
        tick(&mut state);
        assert_eq!(state.phase, RunPhase::Won);
        assert!(cues(&mut state).contains(&Cue::Win));

        // Further frames never return to PLAYING on their own
        tick(&mut state);
        assert_eq!(state.phase, RunPhase::Won);
    }

    #[test]
    fn test_progress_reaches_100() {
        let mut state = playing(vec![ObstacleDescriptor::new(ObstacleKind::Finish, 1050.0)
            .at_height(1000.0)]);
        let mut last = 0;
        for _ in 0..200 {
            tick(&mut state);
            assert!(state.progress >= last);
            last = state.progress;
        }
        assert_eq!(state.progress, 100);
        assert!(state.player.x >= state.finish_x());
    }

    #[test]
    fn test_progress_reported_on_change_only() {
        let mut state = playing(vec![ObstacleDescriptor::new(ObstacleKind::Finish, 100_000.0)]);
        let mut reports = Vec::new();
        for _ in 0..200 {
            tick(&mut state);
            for e in state.drain_events() {
                if let GameEvent::ProgressChanged(p) = e {
                    reports.push(p);
                }
            }
        }
        // 200 frames * 10.5 = 2100 units = 2%
        assert_eq!(reports, vec![0, 1, 2]);
    }

    #[test]
    fn test_determinism() {
        let descriptors = vec![
            ObstacleDescriptor::new(ObstacleKind::PortalWave, 100.0).with_height(400.0),
            ObstacleDescriptor::new(ObstacleKind::Finish, 5000.0),
        ];
        let mut a = playing(descriptors.clone());
        let mut b = playing(descriptors);
        for frame in 0..120 {
            let hold = frame % 17 < 8;
            a.holding_input = hold;
            b.holding_input = hold;
            tick(&mut a);
            tick(&mut b);
        }
        assert_eq!(a.player, b.player);
        assert_eq!(a.particles.particles(), b.particles.particles());
    }

    proptest! {
        #[test]
        fn prop_ship_vy_stays_clamped(holds in proptest::collection::vec(any::<bool>(), 1..120)) {
            let mut state = playing(vec![finish_far()]);
            state.player.mode = GameMode::Ship;
            for hold in holds {
                state.holding_input = hold;
                tick(&mut state);
                prop_assert!(state.player.vy.abs() <= SHIP_MAX_VY);
            }
        }

        #[test]
        fn prop_progress_never_decreases(holds in proptest::collection::vec(any::<bool>(), 1..200)) {
            let mut state = playing(vec![
                ObstacleDescriptor::new(ObstacleKind::Block, 600.0).with_width(120.0),
                ObstacleDescriptor::new(ObstacleKind::Finish, 1500.0),
            ]);
            let mut last = state.progress;
            for hold in holds {
                state.holding_input = hold;
                tick(&mut state);
                if state.phase == RunPhase::Playing {
                    prop_assert!(state.progress >= last);
                }
                last = state.progress;
            }
        }
    }
}
