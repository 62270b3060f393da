//! Organism spawning and difficulty pressure
//!
//! One check per organism kind per tick. Spawns happen in every session
//! phase (organisms drift across the attract screen too); only the spawn
//! cue is gated on active play.

use glam::Vec2;
use rand::Rng;

use super::state::{GameWorld, Organism};
use crate::audio::AudioCue;
use crate::consts::*;

/// Spawn an enemy when the live count trails the difficulty and the
/// throttle window has passed
pub fn maybe_spawn_enemy(world: &mut GameWorld, live_enemies: usize, now_ms: f64) {
    if (live_enemies as f32) < world.session.difficulty
        && now_ms - world.session.last_spawn_ms > ENEMY_SPAWN_COOLDOWN_MS
    {
        let mut organism = Organism::enemy(&mut world.rng);
        place_on_edge(&mut organism, world);
        // Enemies close in a touch faster than their aim-at-spawn course
        organism.vel.x *= 1.0 + world.rng.random::<f32>() * ENEMY_EAGERNESS;
        organism.vel.y *= 1.0 + world.rng.random::<f32>() * ENEMY_EAGERNESS;
        world.session.last_spawn_ms = now_ms;
        announce(world, &organism);
        world.organisms.push(organism);
    }
}

/// Keep at most one energy orb in flight, behind a rare per-tick draw
pub fn maybe_spawn_energy(world: &mut GameWorld, live_orbs: usize) {
    if live_orbs < 1 && world.rng.random::<f32>() > ENERGY_SPAWN_THRESHOLD {
        let mut organism = Organism::energy(&mut world.rng);
        place_on_edge(&mut organism, world);
        announce(world, &organism);
        world.organisms.push(organism);
    }
}

/// Drop the organism on a uniformly chosen arena edge, slightly inset, and
/// aim it at the player
fn place_on_edge(organism: &mut Organism, world: &mut GameWorld) {
    let (w, h) = (world.bounds.width, world.bounds.height);
    let rng = &mut world.rng;
    organism.pos = match rng.random_range(0..4) {
        0 => Vec2::new(SPAWN_EDGE_INSET, rng.random::<f32>() * h),
        1 => Vec2::new(rng.random::<f32>() * w, SPAWN_EDGE_INSET),
        2 => Vec2::new(w - SPAWN_EDGE_INSET, rng.random::<f32>() * h),
        _ => Vec2::new(rng.random::<f32>() * w, h - SPAWN_EDGE_INSET),
    };
    organism.vel = (world.player.pos - organism.pos) * APPROACH_FACTOR * organism.speed;
}

/// Record the spawn cue during active play
fn announce(world: &mut GameWorld, organism: &Organism) {
    if world.session.playing() {
        world.cues.push(AudioCue::Spawn {
            pan: organism.pos.x / world.bounds.width,
        });
    }
}
