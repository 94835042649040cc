//! Visual particle bursts
//!
//! Purely cosmetic: crashes, shield blocks and pickups each emit a burst.
//! Particles carry a life in [0, 1] that decays every tick; dead particles
//! are dropped by retain, so everything still stored is alive.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

/// A single particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Palette index for color lookup
    pub color: u8,
    /// 0-1, decreases over time
    pub life: f32,
    pub size: f32,
}

/// Owns the particle array and its quality cap
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    max_particles: usize,
}

impl ParticleSystem {
    pub fn new(max_particles: usize) -> Self {
        Self {
            particles: Vec::with_capacity(max_particles.min(256)),
            max_particles,
        }
    }

    /// Change the cap (settings quality switch). Excess particles are
    /// dropped oldest-first.
    pub fn set_max_particles(&mut self, max: usize) {
        self.max_particles = max;
        if self.particles.len() > max {
            self.particles.drain(..self.particles.len() - max);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Emit a radial burst at `pos`
    pub fn burst(&mut self, pos: Vec2, color: u8, count: usize, rng: &mut Pcg32) {
        for _ in 0..count {
            if self.particles.len() >= self.max_particles {
                break;
            }
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let speed = rng.random_range(40.0..160.0);
            self.particles.push(Particle {
                pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                color,
                life: rng.random_range(0.6..1.0),
                size: rng.random_range(2.0..5.0),
            });
        }
    }

    /// Advance the burst animation and drop dead particles
    pub fn update(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.pos += p.vel * dt;
            p.vel *= 0.96;
            p.life -= dt * 1.5;
            p.size *= 0.995;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_burst_respects_cap() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut ps = ParticleSystem::new(10);
        ps.burst(Vec2::ZERO, 0, 50, &mut rng);
        assert_eq!(ps.len(), 10);
    }

    #[test]
    fn test_retained_particles_are_alive() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut ps = ParticleSystem::new(64);
        ps.burst(Vec2::new(10.0, 10.0), 1, 32, &mut rng);
        for _ in 0..30 {
            ps.update(1.0 / 60.0);
            assert!(ps.iter().all(|p| p.life > 0.0));
        }
    }

    #[test]
    fn test_all_particles_eventually_expire() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut ps = ParticleSystem::new(64);
        ps.burst(Vec2::ZERO, 2, 32, &mut rng);
        // Max life 1.0, decay 1.5/s: everything is gone within a second
        for _ in 0..70 {
            ps.update(1.0 / 60.0);
        }
        assert!(ps.is_empty());
    }

    #[test]
    fn test_lowering_cap_drops_oldest() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut ps = ParticleSystem::new(64);
        ps.burst(Vec2::ZERO, 0, 40, &mut rng);
        ps.set_max_particles(8);
        assert_eq!(ps.len(), 8);
    }
}
