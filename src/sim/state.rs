//! World state and entity types
//!
//! Everything the simulation mutates lives in the `GameWorld` aggregate.
//! There are no globals; independent worlds can run side by side.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::timing::{Clock, FpsCounter};
use crate::audio::AudioCue;
use crate::consts::*;
use crate::polar_to_cartesian;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Attract state before the first game
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Energy ran out; the final score stays on display
    GameOver,
}

/// Organism variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrganismKind {
    /// Hostile; drains core energy on contact
    Enemy,
    /// Beneficial; restores energy and scores on contact
    Energy,
}

/// A drifting organism (enemy or energy orb)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organism {
    pub kind: OrganismKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Visual diameter; half of it widens the core-contact test
    pub size: f32,
    /// Speed scalar rolled at spawn, applied to the approach velocity
    pub speed: f32,
    /// Fade-in opacity, eased toward 1 every tick
    pub alpha: f32,
    /// Marked during a tick, removed before the tick ends
    pub dead: bool,
}

impl Organism {
    /// Roll a new enemy; the spawner assigns position and velocity
    pub fn enemy(rng: &mut Pcg32) -> Self {
        Self {
            kind: OrganismKind::Enemy,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: ENEMY_SIZE_MIN + rng.random::<f32>() * ENEMY_SIZE_RANGE,
            speed: rng.random::<f32>().clamp(SPEED_MIN, SPEED_MAX),
            alpha: 0.0,
            dead: false,
        }
    }

    /// Roll a new energy orb
    pub fn energy(rng: &mut Pcg32) -> Self {
        Self {
            kind: OrganismKind::Energy,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: ENERGY_SIZE_MIN + rng.random::<f32>() * ENERGY_SIZE_RANGE,
            speed: rng.random::<f32>().clamp(SPEED_MIN, SPEED_MAX),
            alpha: 0.0,
            dead: false,
        }
    }
}

/// One node of the deformable core outline
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CoreNode {
    /// Smoothed position, eased toward the deformed target every tick
    pub pos: Vec2,
    /// Radial offset of this node's angular slot at the current core radius
    pub normal: Vec2,
    /// Reserved for smoothed normals
    pub normal_target: Vec2,
    /// Jitter rolled fresh on every core update
    pub offset: Vec2,
}

/// The player organism: energy core plus rotating shield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Shield orbit radius
    pub radius: f32,
    /// Shield facing (radians), eased toward the cursor direction
    pub angle: f32,
    /// Energy pool, clamped to [0, 100] after contact interactions
    pub energy: f32,
    /// Smoothed visual radius of the core
    pub energy_radius: f32,
    pub energy_radius_target: f32,
    /// Deformation nodes, filled lazily on the first core update
    pub core_nodes: Vec<CoreNode>,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PLAYER_RADIUS,
            angle: 0.0,
            energy: START_ENERGY,
            energy_radius: 0.0,
            energy_radius_target: 0.0,
            core_nodes: Vec::new(),
        }
    }

    /// Recompute node normals for the current core radius and roll fresh
    /// jitter. Nodes are created on the first call and never resized; each
    /// keeps the angular slot it was born with.
    pub fn update_core(&mut self, rng: &mut Pcg32) {
        if self.core_nodes.is_empty() {
            for _ in 0..CORE_QUALITY {
                self.core_nodes.push(CoreNode {
                    pos: self.pos,
                    normal: Vec2::ZERO,
                    normal_target: Vec2::ZERO,
                    offset: Vec2::ZERO,
                });
            }
        }
        debug_assert_eq!(self.core_nodes.len(), CORE_QUALITY);

        for (i, node) in self.core_nodes.iter_mut().enumerate() {
            let slot = (i as f32 / CORE_QUALITY as f32) * std::f32::consts::TAU;
            node.normal = polar_to_cartesian(self.energy_radius, slot);
            node.offset = Vec2::new(
                rng.random::<f32>() * CORE_JITTER,
                rng.random::<f32>() * CORE_JITTER,
            );
        }
    }

    /// Point where the shield arc crosses its facing direction
    pub fn shield_contact(&self) -> Vec2 {
        self.pos + polar_to_cartesian(self.radius, self.angle)
    }
}

/// A burst particle (visual only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Fades a fixed step per tick; pruned at zero
    pub alpha: f32,
}

/// Arena bounds (origin at the top-left corner)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// True once a point lies fully past the arena grown by `margin`
    pub fn outside(&self, pos: Vec2, margin: f32) -> bool {
        pos.x < -margin
            || pos.x > self.width + margin
            || pos.y < -margin
            || pos.y > self.height + margin
    }
}

/// Session bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub phase: SessionPhase,
    /// Running score; rounded to a whole value when the session ends
    pub score: f32,
    /// Spawn pressure, ramping every playing tick without bound
    pub difficulty: f32,
    /// World time when the session began (milliseconds)
    pub started_at_ms: f64,
    /// Final session length, set on game over
    pub duration_ms: f64,
    /// Enemy spawn throttle; carries across sessions
    pub last_spawn_ms: f64,
    /// Playing ticks this session
    pub frames: u64,
    /// Passive score accrued over those ticks
    pub frame_score: f32,
    /// Organisms resolved by an interaction rule this session
    pub collisions: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Idle,
            score: 0.0,
            difficulty: 1.0,
            started_at_ms: 0.0,
            duration_ms: 0.0,
            last_spawn_ms: -10_000.0,
            frames: 0,
            frame_score: 0.0,
            collisions: 0,
        }
    }
}

impl Session {
    /// True while gameplay rules apply
    pub fn playing(&self) -> bool {
        self.phase == SessionPhase::Playing
    }
}

/// Latest input signals, written by the embedding at any time
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InputState {
    /// Cursor position in world space; the shield faces this point
    pub cursor: Vec2,
    /// Held-shield signal
    pub shield_engaged: bool,
}

fn restored_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// The complete owned game world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameWorld {
    /// Seed the world's generator started from
    pub seed: u64,
    pub bounds: Bounds,
    pub player: Player,
    pub organisms: Vec<Organism>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    pub session: Session,
    pub input: InputState,
    pub fps: FpsCounter,
    /// Time source; swap in `Clock::manual()` for deterministic tests
    #[serde(skip)]
    pub clock: Clock,
    /// Every random draw in the simulation flows through this generator.
    /// A restored world re-rolls from a fresh seed
    #[serde(skip, default = "restored_rng")]
    pub rng: Pcg32,
    /// Cues recorded by the last tick, dropped at the next frame boundary
    #[serde(skip)]
    pub cues: Vec<AudioCue>,
}

impl GameWorld {
    /// Create a world with the default arena and a centered player
    pub fn new(seed: u64) -> Self {
        let bounds = Bounds {
            width: DEFAULT_WORLD_WIDTH,
            height: DEFAULT_WORLD_HEIGHT,
        };
        Self {
            seed,
            bounds,
            player: Player::new(bounds.center()),
            organisms: Vec::new(),
            particles: Vec::new(),
            session: Session::default(),
            input: InputState {
                cursor: bounds.center(),
                shield_engaged: false,
            },
            fps: FpsCounter::default(),
            clock: Clock::default(),
            rng: Pcg32::seed_from_u64(seed),
            cues: Vec::new(),
        }
    }

    /// Begin a session, or restart after game over. No-op while playing.
    /// Organisms are cleared; particles keep fading through the transition.
    pub fn start(&mut self) {
        if self.session.playing() {
            return;
        }
        self.organisms.clear();
        self.session.phase = SessionPhase::Playing;
        self.session.score = 0.0;
        self.session.difficulty = 1.0;
        self.session.frames = 0;
        self.session.frame_score = 0.0;
        self.session.collisions = 0;
        self.session.started_at_ms = self.clock.now_ms();
        self.session.duration_ms = 0.0;
        self.player.energy = START_ENERGY;
        log::info!("session started (seed {})", self.seed);
    }

    /// Latest cursor position in world space
    pub fn set_cursor_position(&mut self, x: f32, y: f32) {
        self.input.cursor = Vec2::new(x, y);
    }

    /// Raise or release the shield. Engaging costs a slice of energy when
    /// more than 15 is banked, so a raise can never end a game by itself.
    pub fn set_shield_engaged(&mut self, engaged: bool) {
        if engaged && !self.input.shield_engaged && self.player.energy > SHIELD_ENGAGE_MIN_ENERGY {
            self.player.energy -= SHIELD_ENGAGE_COST;
        }
        self.input.shield_engaged = engaged;
    }

    /// Resize the arena. The player recenters immediately; stray organisms
    /// are culled against the new bounds on the next tick.
    pub fn set_world_size(&mut self, width: f32, height: f32) {
        self.bounds = Bounds { width, height };
        self.player.pos = self.bounds.center();
    }

    /// Live organisms of one kind
    pub fn count_of(&self, kind: OrganismKind) -> usize {
        self.organisms.iter().filter(|o| o.kind == kind).count()
    }
}
