//! Ephemeral burst particles
//!
//! Organism deaths and the end of a game emit small bursts. Particles
//! drift and fade in every session phase, pruned once fully transparent.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::Particle;
use crate::consts::PARTICLE_FADE;

/// Emit a burst of particles around `origin`.
///
/// The count is rolled from `seed` and lands between `seed` and `2 * seed`
/// inclusive. Each particle starts on a spiral ring scaled by `spread`
/// (zero spread collapses the ring onto the origin) and drifts with `bias`
/// plus unit jitter per axis, fully opaque.
pub fn emit_burst(
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    origin: Vec2,
    bias: Vec2,
    spread: f32,
    seed: u32,
) {
    let count = (seed as f32 + rng.random::<f32>() * seed as f32).ceil() as u32;
    for q in (0..count).rev() {
        let ring = Vec2::new((q as f32).sin(), (q as f32).cos()) * spread;
        let jitter = Vec2::new(
            rng.random::<f32>() * 2.0 - 1.0,
            rng.random::<f32>() * 2.0 - 1.0,
        );
        particles.push(Particle {
            pos: origin + ring,
            vel: bias + jitter,
            alpha: 1.0,
        });
    }
}

/// Drift and fade all particles, dropping the spent ones
pub fn advance(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.alpha -= PARTICLE_FADE;
    }
    particles.retain(|p| p.alpha > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    #[test]
    fn test_zero_spread_burst_lands_on_origin() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut particles = Vec::new();
        emit_burst(&mut particles, &mut rng, Vec2::ZERO, Vec2::ZERO, 0.0, 5);

        assert!((5..=10).contains(&particles.len()));
        for p in &particles {
            assert_eq!(p.pos, Vec2::ZERO);
            assert_eq!(p.alpha, 1.0);
            // Velocity is pure jitter here, one unit at most per axis
            assert!(p.vel.x.abs() <= 1.0 && p.vel.y.abs() <= 1.0);
        }
    }

    #[test]
    fn test_spread_spaces_the_ring() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut particles = Vec::new();
        emit_burst(&mut particles, &mut rng, Vec2::new(50.0, 50.0), Vec2::ZERO, 5.0, 5);

        // Every start point sits on the spread circle around the origin
        for p in &particles {
            let d = p.pos.distance(Vec2::new(50.0, 50.0));
            assert!((d - 5.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_bias_shifts_drift() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut particles = Vec::new();
        emit_burst(&mut particles, &mut rng, Vec2::ZERO, Vec2::new(3.0, -3.0), 0.0, 8);
        for p in &particles {
            assert!(p.vel.x > 2.0 - 1e-3 && p.vel.x < 4.0 + 1e-3);
            assert!(p.vel.y > -4.0 - 1e-3 && p.vel.y < -2.0 + 1e-3);
        }
    }

    #[test]
    fn test_advance_moves_fades_and_prunes() {
        let mut particles = vec![
            Particle {
                pos: Vec2::ZERO,
                vel: Vec2::new(1.0, 2.0),
                alpha: 1.0,
            },
            Particle {
                pos: Vec2::ZERO,
                vel: Vec2::ZERO,
                alpha: PARTICLE_FADE,
            },
        ];
        advance(&mut particles);

        // The nearly spent particle hit zero and dropped out
        assert_eq!(particles.len(), 1);
        assert_eq!(particles[0].pos, Vec2::new(1.0, 2.0));
        assert!((particles[0].alpha - (1.0 - PARTICLE_FADE)).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_burst_count_bounded_by_seed(rng_seed in 0u64..2000, seed in 1u32..64) {
            let mut rng = Pcg32::seed_from_u64(rng_seed);
            let mut particles = Vec::new();
            emit_burst(&mut particles, &mut rng, Vec2::ZERO, Vec2::ZERO, 1.0, seed);
            let count = particles.len() as u32;
            prop_assert!(count >= seed && count <= 2 * seed);
        }
    }
}
