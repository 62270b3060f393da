//! Rotocore - a rotating-shield survival arcade game
//!
//! Core modules:
//! - `sim`: Simulation (entities, spawn scheduling, the per-tick step)
//! - `render`: Draw-ready primitives pulled by the embedding each frame
//! - `audio`: Named cues recorded by the simulation for sound collaborators

pub mod audio;
pub mod render;
pub mod sim;

pub use audio::AudioCue;
pub use render::{FrameFeed, frame_feed, smoothed_outline};
pub use sim::{GameWorld, SessionPhase, tick};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Target display rate (ticks per second)
    pub const FRAMERATE: u32 = 60;

    /// Arena defaults (origin at the top-left corner)
    pub const DEFAULT_WORLD_WIDTH: f32 = 1000.0;
    pub const DEFAULT_WORLD_HEIGHT: f32 = 650.0;

    /// Player defaults - the shield orbits at this radius around the core
    pub const PLAYER_RADIUS: f32 = 60.0;
    /// Number of deformation nodes on the core outline
    pub const CORE_QUALITY: usize = 16;
    /// Per-axis jitter rolled for every core node on each update
    pub const CORE_JITTER: f32 = 5.0;
    /// Fraction of the player radius the core reaches at full energy
    pub const ENERGY_RADIUS_SCALE: f32 = 0.8;
    /// Energy granted at session start
    pub const START_ENERGY: f32 = 30.0;
    pub const ENERGY_MAX: f32 = 100.0;

    /// Shield arc half-width (radians)
    pub const SHIELD_HALF_ARC: f32 = 1.6;
    /// Deflection ring half-thickness around the shield radius
    pub const SHIELD_RING_TOLERANCE: f32 = 5.0;
    /// Energy drained per tick while the shield is held
    pub const SHIELD_DRAIN: f32 = 0.1;
    /// The held shield stops draining at or below this energy
    pub const SHIELD_MIN_ENERGY: f32 = 10.0;
    /// One-time cost when the shield is first engaged
    pub const SHIELD_ENGAGE_COST: f32 = 4.0;
    /// Engaging is free at or below this energy
    pub const SHIELD_ENGAGE_MIN_ENERGY: f32 = 15.0;

    /// Interaction rule thresholds and rewards
    pub const ACTIVE_KILL_MIN_ENERGY: f32 = 11.0;
    pub const ACTIVE_KILL_SCORE: f32 = 4.0;
    pub const CONTACT_ENEMY_DRAIN: f32 = 6.0;
    pub const CONTACT_ENERGY_GAIN: f32 = 8.0;
    pub const CONTACT_ENERGY_SCORE: f32 = 30.0;

    /// Passive score rate per playing tick (scaled by difficulty and FPS)
    pub const SCORE_RATE: f32 = 0.4;
    /// Difficulty ramp per playing tick (monotonic, no cap)
    pub const DIFFICULTY_RAMP: f32 = 0.0015;

    /// Easing factors applied once per tick
    pub const ANGLE_EASE: f32 = 0.2;
    pub const RADIUS_EASE: f32 = 0.2;
    pub const NODE_EASE: f32 = 0.2;
    pub const ALPHA_EASE: f32 = 0.2;

    /// Organism sizing rolls
    pub const ENEMY_SIZE_MIN: f32 = 6.0;
    pub const ENEMY_SIZE_RANGE: f32 = 4.0;
    pub const ENERGY_SIZE_MIN: f32 = 10.0;
    pub const ENERGY_SIZE_RANGE: f32 = 6.0;
    /// Speed scalar band; the raw uniform draw is clamped into it
    pub const SPEED_MIN: f32 = 0.6;
    pub const SPEED_MAX: f32 = 0.75;
    /// Scale from (player - spawn point) to the initial velocity
    pub const APPROACH_FACTOR: f32 = 0.006;
    /// Maximum per-axis velocity boost rolled for enemies
    pub const ENEMY_EAGERNESS: f32 = 0.1;

    /// Spawn placement inset from the arena edges
    pub const SPAWN_EDGE_INSET: f32 = 10.0;
    /// Minimum gap between enemy spawns (milliseconds)
    pub const ENEMY_SPAWN_COOLDOWN_MS: f64 = 100.0;
    /// Per-tick uniform draw must exceed this for an energy orb to spawn
    pub const ENERGY_SPAWN_THRESHOLD: f32 = 0.996;

    /// Death bursts: spread of the initial ring and the count seed
    pub const DEATH_BURST_SPREAD: f32 = 5.0;
    pub const DEATH_BURST_SEED: u32 = 5;
    /// Scale from (organism - player) to the burst drift bias
    pub const DEATH_BURST_BIAS: f32 = 0.02;
    pub const GAME_OVER_BURST_SPREAD: f32 = 10.0;
    pub const GAME_OVER_BURST_SEED: u32 = 40;
    /// Alpha lost per tick by every particle
    pub const PARTICLE_FADE: f32 = 0.02;
}

/// Normalize angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Minimal absolute angular difference, in [0, π]
#[inline]
pub fn angular_distance(a: f32, b: f32) -> f32 {
    normalize_angle(a - b).abs()
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(3.0 * PI) - (-PI)).abs() < 1e-5);
        assert!((normalize_angle(-3.0 * PI) - (-PI)).abs() < 1e-5);
        assert_eq!(normalize_angle(0.5), 0.5);
    }

    #[test]
    fn test_angular_distance_across_seam() {
        // 3.1 and -3.1 are close through the seam, not 6.2 apart
        let d = angular_distance(3.1, -3.1);
        assert!((d - (2.0 * PI - 6.2)).abs() < 1e-4);
    }

    #[test]
    fn test_polar_round_trip() {
        let v = polar_to_cartesian(10.0, 1.2);
        let (r, theta) = cartesian_to_polar(v);
        assert!((r - 10.0).abs() < 1e-4);
        assert!((theta - 1.2).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_angular_distance_in_range(a in -10.0f32..10.0, b in -10.0f32..10.0) {
            let d = angular_distance(a, b);
            prop_assert!((0.0..=PI + 1e-4).contains(&d));
        }
    }
}
