//! Decorative particles
//!
//! Bursts and trails spawned by gameplay events. Particles never feed back into the
//! simulation; they only decay.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{MAX_PARTICLES, PARTICLE_COUNT, PARTICLE_LIFE_STEP, PARTICLE_SHRINK};

/// Color slot a particle is drawn with; the renderer resolves it to RGBA
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleTint {
    /// The player's chosen color
    Player,
    Coin,
    Orb,
    OrbDash,
    /// Ship exhaust
    Flame,
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    /// Per-frame displacement
    pub vel: Vec2,
    pub tint: ParticleTint,
    /// 0-1, decreases every frame
    pub life: f32,
    pub size: f32,
}

/// Live particle set with its own seeded RNG
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: Pcg32,
    seed: u64,
}

impl ParticleSystem {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    /// Drop all particles and rewind the RNG
    pub fn reset(&mut self) {
        self.particles.clear();
        self.rng = Pcg32::seed_from_u64(self.seed);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Advance every particle one frame and drop the dead ones
    pub fn update(&mut self) {
        for p in self.particles.iter_mut() {
            p.pos += p.vel;
            p.life -= PARTICLE_LIFE_STEP;
            p.size *= PARTICLE_SHRINK;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    fn push(&mut self, particle: Particle) {
        if self.particles.len() >= MAX_PARTICLES {
            // Oldest particle has the least life left
            self.particles.remove(0);
        }
        self.particles.push(particle);
    }

    /// Uniform value in [-0.5, 0.5)
    fn jitter(&mut self) -> f32 {
        self.rng.random::<f32>() - 0.5
    }

    /// Radial burst of `count` particles around `pos`
    fn burst(&mut self, pos: Vec2, count: usize, spread: f32, life: f32, max_size: f32, tint: ParticleTint) {
        for _ in 0..count {
            let vel = Vec2::new(self.jitter() * spread, self.jitter() * spread);
            let size = self.rng.random::<f32>() * max_size + 2.0;
            self.push(Particle {
                pos,
                vel,
                tint,
                life,
                size,
            });
        }
    }

    /// Player shattering on death
    pub fn spawn_death(&mut self, pos: Vec2) {
        self.burst(pos, PARTICLE_COUNT, 15.0, 1.0, 8.0, ParticleTint::Player);
    }

    pub fn spawn_coin(&mut self, pos: Vec2) {
        self.burst(pos, 10, 10.0, 0.8, 5.0, ParticleTint::Coin);
    }

    /// Orb activation; `tint` distinguishes jump and dash orbs
    pub fn spawn_orb(&mut self, pos: Vec2, tint: ParticleTint) {
        self.burst(pos, 10, 20.0, 0.6, 6.0, tint);
    }

    /// Exhaust puff behind a thrusting ship
    pub fn spawn_ship_trail(&mut self, pos: Vec2) {
        let vel = Vec2::new(-5.0 - self.rng.random::<f32>() * 5.0, self.jitter() * 2.0);
        let size = self.rng.random::<f32>() * 4.0 + 2.0;
        self.push(Particle {
            pos,
            vel,
            tint: ParticleTint::Flame,
            life: 0.5,
            size,
        });
    }

    pub fn spawn_wave_trail(&mut self, pos: Vec2) {
        self.push(Particle {
            pos,
            vel: Vec2::new(-2.0, 0.0),
            tint: ParticleTint::Player,
            life: 0.4,
            size: 8.0,
        });
    }

    /// Speed line streaming backward while dashing
    pub fn spawn_dash_line(&mut self, pos: Vec2) {
        let vel = Vec2::new(-15.0 - self.rng.random::<f32>() * 10.0, self.jitter() * 2.0);
        self.push(Particle {
            pos,
            vel,
            tint: ParticleTint::OrbDash,
            life: 0.4,
            size: 2.0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_burst_sizes() {
        let mut ps = ParticleSystem::new(7);
        ps.spawn_death(Vec2::new(10.0, 10.0));
        assert_eq!(ps.len(), PARTICLE_COUNT);
        ps.spawn_coin(Vec2::ZERO);
        assert_eq!(ps.len(), PARTICLE_COUNT + 10);
        assert!(ps.particles().iter().all(|p| p.size >= 2.0));
    }

    #[test]
    fn test_decay_removes_dead_particles() {
        let mut ps = ParticleSystem::new(1);
        ps.spawn_wave_trail(Vec2::ZERO);
        let start = ps.particles()[0].clone();

        ps.update();
        let p = &ps.particles()[0];
        assert!((p.life - (start.life - PARTICLE_LIFE_STEP)).abs() < 1e-6);
        assert!((p.size - start.size * PARTICLE_SHRINK).abs() < 1e-6);
        assert_eq!(p.pos, Vec2::new(-2.0, 0.0));

        // 0.4 life at 0.02 per frame: gone after 20 frames at the latest
        for _ in 0..20 {
            ps.update();
        }
        assert!(ps.is_empty());
    }

    #[test]
    fn test_reset_rewinds_rng() {
        let mut a = ParticleSystem::new(42);
        a.spawn_death(Vec2::ZERO);
        let first: Vec<Particle> = a.particles().to_vec();

        a.reset();
        assert!(a.is_empty());
        a.spawn_death(Vec2::ZERO);
        assert_eq!(a.particles(), first.as_slice());
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut ps = ParticleSystem::new(3);
        for _ in 0..MAX_PARTICLES + 5 {
            ps.spawn_dash_line(Vec2::ZERO);
        }
        assert_eq!(ps.len(), MAX_PARTICLES);
    }

    proptest! {
        #[test]
        fn prop_life_strictly_decreases(seed in any::<u64>(), frames in 1usize..60) {
            let mut ps = ParticleSystem::new(seed);
            ps.spawn_orb(Vec2::ZERO, ParticleTint::Orb);
            for _ in 0..frames {
                let before: Vec<f32> = ps.particles().iter().map(|p| p.life).collect();
                ps.update();
                for (p, life) in ps.particles().iter().zip(before) {
                    prop_assert!(p.life < life);
                    prop_assert!(p.life > 0.0);
                }
            }
        }
    }
}
