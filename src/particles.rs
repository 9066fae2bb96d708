//! Particle bursts (visual only, never affect gameplay)

use glam::Vec2;
use rand::Rng;

use crate::consts::{PARTICLE_COUNT, PARTICLE_LIFETIME};

/// One spark flying out from a burst origin
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub origin: Vec2,
    /// Full travel from origin over the particle's life
    pub offset: Vec2,
    /// Seconds left
    pub life: f32,
}

impl Particle {
    /// 0 at spawn, 1 at expiry
    pub fn progress(&self) -> f32 {
        1.0 - (self.life / PARTICLE_LIFETIME).clamp(0.0, 1.0)
    }

    pub fn pos(&self) -> Vec2 {
        self.origin + self.offset * self.progress()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ring of particles at evenly spaced angles with random reach
    pub fn burst<R: Rng>(&mut self, origin: Vec2, rng: &mut R) {
        for i in 0..PARTICLE_COUNT {
            let angle = std::f32::consts::TAU * i as f32 / PARTICLE_COUNT as f32;
            let velocity = 2.0 + rng.random::<f32>() * 2.0;
            self.particles.push(Particle {
                origin,
                offset: Vec2::new(angle.cos(), angle.sin()) * velocity * 30.0,
                life: PARTICLE_LIFETIME,
            });
        }
    }

    /// Age all particles by `dt` seconds and drop expired ones
    pub fn update(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
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
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_shape() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut system = ParticleSystem::new();
        system.burst(Vec2::new(100.0, 50.0), &mut rng);

        assert_eq!(system.len(), PARTICLE_COUNT);
        for p in &system.particles {
            let reach = p.offset.length();
            assert!((59.9..=120.1).contains(&reach), "reach {reach}");
            assert_eq!(p.pos(), p.origin);
        }
    }

    #[test]
    fn test_particles_expire() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut system = ParticleSystem::new();
        system.burst(Vec2::ZERO, &mut rng);

        system.update(PARTICLE_LIFETIME / 2.0);
        assert_eq!(system.len(), PARTICLE_COUNT);
        let p = &system.particles[0];
        assert!((p.progress() - 0.5).abs() < 1e-5);

        system.update(PARTICLE_LIFETIME);
        assert!(system.is_empty());
    }
}
