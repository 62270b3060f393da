//! The per-tick simulation step
//!
//! One call advances the whole world by a single display frame, from input
//! smoothing through interaction rules and spawning to the end-of-game
//! check. Organism kinematics and cleanup run in every session phase;
//! scoring and interactions only while playing.

use glam::Vec2;

use super::particles;
use super::spawn::{maybe_spawn_enemy, maybe_spawn_energy};
use super::state::{GameWorld, Organism, OrganismKind, Player, Session, SessionPhase};
use super::timing::score_factor;
use crate::audio::AudioCue;
use crate::consts::*;
use crate::{angular_distance, cartesian_to_polar};

/// Advance the world by one frame
pub fn tick(world: &mut GameWorld) {
    let now_ms = world.clock.now_ms();

    // Frame boundary: the previous tick's cues are gone
    world.cues.clear();
    world.fps.frame(now_ms);
    let factor = score_factor(world.fps.fps);

    if world.session.playing() {
        let before = world.session.difficulty;
        world.session.difficulty += DIFFICULTY_RAMP;
        if world.session.difficulty.floor() > before.floor() {
            log::debug!("spawn pressure reached {}", world.session.difficulty.floor());
        }
        let gain = SCORE_RATE * world.session.difficulty * factor;
        world.session.score += gain;
        world.session.frames += 1;
        world.session.frame_score += gain;

        aim_shield(&mut world.player, world.input.cursor);

        // The core swells and shrinks with the energy fraction
        world.player.energy_radius_target =
            (world.player.energy / ENERGY_MAX) * (world.player.radius * ENERGY_RADIUS_SCALE);
        world.player.energy_radius +=
            (world.player.energy_radius_target - world.player.energy_radius) * RADIUS_EASE;

        world.player.update_core(&mut world.rng);
        ease_core_nodes(&mut world.player);
    }

    // A held shield burns energy for its active kill zone
    if world.session.playing()
        && world.input.shield_engaged
        && world.player.energy > SHIELD_MIN_ENERGY
    {
        world.player.energy -= SHIELD_DRAIN;
        world.cues.push(AudioCue::ShieldActive);
    }

    let (live_enemies, live_orbs) = advance_organisms(world);
    debug_assert!(world.player.energy >= 0.0 && world.player.energy <= ENERGY_MAX);

    maybe_spawn_enemy(world, live_enemies, now_ms);
    maybe_spawn_energy(world, live_orbs);

    particles::advance(&mut world.particles);

    // A drained core ends the session on the spot
    if world.session.playing() && world.player.energy == 0.0 {
        let at = world.player.pos;
        particles::emit_burst(
            &mut world.particles,
            &mut world.rng,
            at,
            Vec2::ZERO,
            GAME_OVER_BURST_SPREAD,
            GAME_OVER_BURST_SEED,
        );
        world.session.phase = SessionPhase::GameOver;
        world.session.duration_ms = now_ms - world.session.started_at_ms;
        world.session.score = world.session.score.round();
        world.cues.push(AudioCue::GameOver);
        log::info!(
            "game over: score {} after {:.1}s",
            world.session.score,
            world.session.duration_ms / 1000.0
        );
    }
}

/// Turn the shield toward the cursor, snapping across the ±π seam
fn aim_shield(player: &mut Player, cursor: Vec2) {
    let (_, target) = cartesian_to_polar(cursor - player.pos);
    if (target - player.angle).abs() > std::f32::consts::PI {
        player.angle = target;
    }
    player.angle += (target - player.angle) * ANGLE_EASE;
}

/// Ease every node toward its deformed slot on the current core radius
fn ease_core_nodes(player: &mut Player) {
    let center = player.pos;
    for node in &mut player.core_nodes {
        let target = center + node.normal + node.offset;
        node.pos += (target - node.pos) * NODE_EASE;
    }
}

/// Advance every organism and resolve its fate; returns live counts by kind
fn advance_organisms(world: &mut GameWorld) -> (usize, usize) {
    let GameWorld {
        bounds,
        player,
        organisms,
        particles,
        session,
        input,
        rng,
        cues,
        ..
    } = world;

    let mut live_enemies = 0;
    let mut live_orbs = 0;
    let mut i = 0;
    while i < organisms.len() {
        let organism = &mut organisms[i];
        organism.pos += organism.vel;
        organism.alpha += (1.0 - organism.alpha) * ALPHA_EASE;

        if session.playing() {
            resolve_contact(organism, player, session, input.shield_engaged, cues);
        }

        // Off-screen cleanup runs in every phase
        if !organism.dead && bounds.outside(organism.pos, organism.size) {
            organism.dead = true;
        }

        if organism.dead {
            let at = organism.pos;
            let bias = (at - player.pos) * DEATH_BURST_BIAS;
            particles::emit_burst(particles, rng, at, bias, DEATH_BURST_SPREAD, DEATH_BURST_SEED);
            // Ordered removal; the next entry slides into this index
            organisms.remove(i);
        } else {
            match organism.kind {
                OrganismKind::Enemy => live_enemies += 1,
                OrganismKind::Energy => live_orbs += 1,
            }
            i += 1;
        }
    }
    (live_enemies, live_orbs)
}

/// Evaluate the interaction rules for one organism, in priority order.
/// The first matching rule wins; an organism dies from at most one rule
/// per tick.
fn resolve_contact(
    organism: &mut Organism,
    player: &mut Player,
    session: &mut Session,
    shield_engaged: bool,
    cues: &mut Vec<AudioCue>,
) {
    let (dist, theta) = cartesian_to_polar(organism.pos - player.pos);

    // Deflection ring: passive, kills either kind, held or not
    if angular_distance(theta, player.angle) < SHIELD_HALF_ARC
        && dist > player.radius - SHIELD_RING_TOLERANCE
        && dist < player.radius + SHIELD_RING_TOLERANCE
    {
        organism.dead = true;
        session.collisions += 1;
        cues.push(AudioCue::OrganismDeflected);
        return;
    }

    // Active kill: anything caught inside a held shield
    if shield_engaged && dist < player.radius && player.energy > ACTIVE_KILL_MIN_ENERGY {
        organism.dead = true;
        session.score += ACTIVE_KILL_SCORE;
        session.collisions += 1;
        return;
    }

    // Core contact
    if dist < player.energy_radius + organism.size * 0.5 {
        match organism.kind {
            OrganismKind::Enemy => {
                player.energy -= CONTACT_ENEMY_DRAIN;
                cues.push(AudioCue::EnergyDown);
            }
            OrganismKind::Energy => {
                player.energy += CONTACT_ENERGY_GAIN;
                session.score += CONTACT_ENERGY_SCORE;
                cues.push(AudioCue::EnergyUp);
            }
        }
        player.energy = player.energy.clamp(0.0, ENERGY_MAX);
        organism.dead = true;
        session.collisions += 1;
    }
}
