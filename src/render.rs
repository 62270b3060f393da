//! Per-frame render feed
//!
//! The simulation never draws. After each tick the embedding pulls a
//! `FrameFeed`: typed primitives plus the scoreboard values, rasterized
//! however the presentation layer likes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{GameWorld, OrganismKind, SessionPhase};

/// The shield arc, spanning the facing angle plus/minus the half-width
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShieldArc {
    pub center: Vec2,
    pub radius: f32,
    pub start_angle: f32,
    pub end_angle: f32,
    /// Where the arc crosses the facing direction
    pub contact: Vec2,
}

/// Full-circle glow drawn while the shield is held
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShieldBubble {
    pub center: Vec2,
    pub radius: f32,
    pub alpha: f32,
}

/// One organism, ready to draw
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrganismSprite {
    pub pos: Vec2,
    pub radius: f32,
    pub kind: OrganismKind,
    pub alpha: f32,
}

/// One burst particle, ready to draw as a unit rect
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ParticleSprite {
    pub pos: Vec2,
    pub alpha: f32,
}

/// Scoreboard values for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Score in whole units
    pub score: i64,
    /// Session length in seconds, two decimals, frozen after game over
    pub time_secs: f32,
    pub fps: u32,
    /// FPS as a share of the target rate
    pub fps_percent: u32,
}

impl StatusReport {
    /// Preformatted scoreboard line
    pub fn line(&self) -> String {
        format!(
            "Score: {} Time: {:.2}s FPS: {} ({}%)",
            self.score, self.time_secs, self.fps, self.fps_percent
        )
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameFeed {
    /// Present only during play
    pub shield: Option<ShieldArc>,
    /// Present while the shield is held with energy behind it
    pub bubble: Option<ShieldBubble>,
    /// Ordered core outline nodes; close them with `smoothed_outline`
    pub core_outline: Vec<Vec2>,
    pub organisms: Vec<OrganismSprite>,
    pub particles: Vec<ParticleSprite>,
    pub status: StatusReport,
}

/// Snapshot the world into draw-ready form
pub fn frame_feed(world: &GameWorld) -> FrameFeed {
    let player = &world.player;
    let playing = world.session.playing();

    let shield = playing.then(|| ShieldArc {
        center: player.pos,
        radius: player.radius,
        start_angle: player.angle - SHIELD_HALF_ARC,
        end_angle: player.angle + SHIELD_HALF_ARC,
        contact: player.shield_contact(),
    });

    let bubble = (playing && world.input.shield_engaged && player.energy > SHIELD_MIN_ENERGY)
        .then(|| ShieldBubble {
            center: player.pos,
            radius: player.radius,
            alpha: (player.energy / ENERGY_MAX) * 0.9,
        });

    let core_outline = if playing {
        player.core_nodes.iter().map(|n| n.pos).collect()
    } else {
        Vec::new()
    };

    FrameFeed {
        shield,
        bubble,
        core_outline,
        organisms: world
            .organisms
            .iter()
            .map(|o| OrganismSprite {
                pos: o.pos,
                radius: o.size * 0.5,
                kind: o.kind,
                alpha: o.alpha,
            })
            .collect(),
        particles: world
            .particles
            .iter()
            .map(|p| ParticleSprite {
                pos: p.pos,
                alpha: p.alpha.max(0.0),
            })
            .collect(),
        status: status_report(world),
    }
}

/// Scoreboard values for the current frame
pub fn status_report(world: &GameWorld) -> StatusReport {
    let session = &world.session;
    let elapsed_ms = match session.phase {
        SessionPhase::Playing => world.clock.now_ms() - session.started_at_ms,
        SessionPhase::GameOver => session.duration_ms,
        SessionPhase::Idle => 0.0,
    };
    let fps = world.fps.fps;
    StatusReport {
        score: session.score.round() as i64,
        time_secs: (elapsed_ms / 10.0).round() as f32 / 100.0,
        fps,
        fps_percent: ((fps.min(FRAMERATE) as f32 / FRAMERATE as f32) * 100.0).round() as u32,
    }
}

/// Path segment of a closed outline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathSeg {
    MoveTo(Vec2),
    /// Quadratic curve through `ctrl`, ending at the midpoint toward the
    /// next node
    QuadTo { ctrl: Vec2, to: Vec2 },
}

/// Close the node loop with midpoint-smoothed quadratics, wrapping last to
/// first. Fewer than three nodes yield an empty path.
pub fn smoothed_outline(nodes: &[Vec2]) -> Vec<PathSeg> {
    let n = nodes.len();
    if n < 3 {
        return Vec::new();
    }
    let mid = |a: Vec2, b: Vec2| (a + b) * 0.5;
    let mut path = Vec::with_capacity(n + 1);
    path.push(PathSeg::MoveTo(mid(nodes[n - 1], nodes[0])));
    for i in 0..n {
        let next = nodes[(i + 1) % n];
        path.push(PathSeg::QuadTo {
            ctrl: nodes[i],
            to: mid(nodes[i], next),
        });
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Clock, tick};

    fn playing_world() -> GameWorld {
        let mut world = GameWorld::new(21);
        world.clock = Clock::manual();
        world.session.last_spawn_ms = 0.0;
        world.start();
        world.set_shield_engaged(true);
        world.clock.advance(1000.0 / 60.0);
        tick(&mut world);
        world
    }

    #[test]
    fn test_idle_feed_hides_player_geometry() {
        let world = GameWorld::new(20);
        let feed = frame_feed(&world);
        assert!(feed.shield.is_none());
        assert!(feed.bubble.is_none());
        assert!(feed.core_outline.is_empty());
        assert_eq!(feed.status.score, 0);
        assert_eq!(feed.status.time_secs, 0.0);
        assert_eq!(feed.status.fps_percent, 0);
    }

    #[test]
    fn test_playing_feed_carries_shield_and_outline() {
        let world = playing_world();
        let feed = frame_feed(&world);

        let shield = feed.shield.expect("shield visible during play");
        assert_eq!(shield.center, world.player.pos);
        assert_eq!(shield.radius, world.player.radius);
        assert!((shield.end_angle - shield.start_angle - 2.0 * SHIELD_HALF_ARC).abs() < 1e-5);
        assert!((shield.contact.distance(world.player.pos) - world.player.radius).abs() < 1e-3);

        let bubble = feed.bubble.expect("held shield shows its bubble");
        assert!((bubble.alpha - world.player.energy / ENERGY_MAX * 0.9).abs() < 1e-5);

        assert_eq!(feed.core_outline.len(), CORE_QUALITY);
    }

    #[test]
    fn test_organism_sprites_use_half_size() {
        let mut world = playing_world();
        let mut o = crate::sim::Organism::enemy(&mut world.rng);
        o.pos = Vec2::new(100.0, 100.0);
        o.size = 8.0;
        o.alpha = 0.4;
        world.organisms.push(o);

        let feed = frame_feed(&world);
        let sprite = feed.organisms.last().expect("pushed organism");
        assert_eq!(sprite.radius, 4.0);
        assert_eq!(sprite.alpha, 0.4);
        assert_eq!(sprite.kind, OrganismKind::Enemy);
    }

    #[test]
    fn test_status_line_formatting() {
        let status = StatusReport {
            score: 128,
            time_secs: 3.46,
            fps: 60,
            fps_percent: 100,
        };
        assert_eq!(status.line(), "Score: 128 Time: 3.46s FPS: 60 (100%)");
    }

    #[test]
    fn test_smoothed_outline_closes_on_itself() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        let path = smoothed_outline(&square);
        assert_eq!(path.len(), 5);

        let start = match path[0] {
            PathSeg::MoveTo(p) => p,
            ref other => panic!("expected MoveTo, got {other:?}"),
        };
        assert_eq!(start, Vec2::new(0.0, 5.0));
        match path[4] {
            PathSeg::QuadTo { to, .. } => assert_eq!(to, start),
            ref other => panic!("expected QuadTo, got {other:?}"),
        }
    }

    #[test]
    fn test_smoothed_outline_needs_three_nodes() {
        assert!(smoothed_outline(&[]).is_empty());
        assert!(smoothed_outline(&[Vec2::ZERO, Vec2::ONE]).is_empty());
    }
}
