//! Impact particle burst
//!
//! Headless particle data for an explosion effect at the impact point.
//! Particles live in the vertical plane, y up. Seeded, so a given seed
//! always produces the same burst.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::math::{Vector2, deg_to_rad};

/// Seconds a freshly spawned particle lives
pub const PARTICLE_LIFETIME: f64 = 5.0;

/// Maximum live particles
pub const MAX_PARTICLES: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    /// Seconds remaining
    pub lifetime: f64,
}

/// Set of particles sharing one RNG stream
#[derive(Debug, Clone)]
pub struct ParticleBurst {
    particles: Vec<Particle>,
    rng: Pcg32,
}

impl ParticleBurst {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Spawn `count` particles at `origin` with `speed` in random directions.
    ///
    /// Each direction is `angle_deg` plus a uniform offset in [0, 360).
    /// Oldest particles are dropped past `MAX_PARTICLES`.
    pub fn spawn(&mut self, count: usize, origin: Vector2<f64>, speed: f64, angle_deg: f64) {
        for _ in 0..count {
            let offset: f64 = self.rng.random_range(0.0..360.0);
            let rad = deg_to_rad(angle_deg + offset);
            self.particles.push(Particle {
                pos: origin,
                vel: Vector2::new(speed * rad.cos(), speed * rad.sin()),
                lifetime: PARTICLE_LIFETIME,
            });
        }

        if self.particles.len() > MAX_PARTICLES {
            let excess = self.particles.len() - MAX_PARTICLES;
            self.particles.drain(..excess);
        }
    }

    /// Advance all particles by `dt` under downward `gravity`, then cull the
    /// expired ones
    pub fn update(&mut self, dt: f64, gravity: f64) {
        for p in self.particles.iter_mut() {
            p.vel.y -= gravity * dt;
            p.pos += p.vel * dt;
            p.lifetime -= dt;
        }
        self.particles.retain(|p| p.lifetime > 0.0);
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_is_deterministic() {
        let mut a = ParticleBurst::new(42);
        let mut b = ParticleBurst::new(42);
        a.spawn(20, Vector2::zero(), 10.0, 0.0);
        b.spawn(20, Vector2::zero(), 10.0, 0.0);
        assert_eq!(a.particles(), b.particles());

        let mut c = ParticleBurst::new(7);
        c.spawn(20, Vector2::zero(), 10.0, 0.0);
        assert_ne!(a.particles(), c.particles());
    }

    #[test]
    fn test_spawn_speed() {
        let mut burst = ParticleBurst::new(1);
        burst.spawn(50, Vector2::new(3.0, 4.0), 25.0, 90.0);
        assert_eq!(burst.len(), 50);
        for p in burst.particles() {
            assert!((p.vel.magnitude() - 25.0).abs() < 1e-9);
            assert_eq!(p.pos, Vector2::new(3.0, 4.0));
            assert_eq!(p.lifetime, PARTICLE_LIFETIME);
        }
    }

    #[test]
    fn test_update_applies_gravity_and_expires() {
        let mut burst = ParticleBurst::new(3);
        burst.spawn(10, Vector2::zero(), 0.0, 0.0);
        burst.update(1.0, 9.81);
        for p in burst.particles() {
            assert!((p.vel.y + 9.81).abs() < 1e-12);
            assert!((p.pos.y + 9.81).abs() < 1e-12);
            assert!((p.lifetime - 4.0).abs() < 1e-12);
        }

        for _ in 0..4 {
            burst.update(1.0, 9.81);
        }
        assert!(burst.is_empty());
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut burst = ParticleBurst::new(9);
        burst.spawn(MAX_PARTICLES, Vector2::zero(), 1.0, 0.0);
        burst.update(1.0, 0.0);
        burst.spawn(10, Vector2::new(100.0, 0.0), 1.0, 0.0);
        assert_eq!(burst.len(), MAX_PARTICLES);
        let newest = burst.particles().iter().filter(|p| p.lifetime == PARTICLE_LIFETIME).count();
        assert_eq!(newest, 10);
    }
}
