//! Rotocore entry point
//!
//! Runs one headless demo session: a scripted cursor sweeps the shield
//! around the core while the scoreboard logs once a second. Prints a JSON
//! summary when the session ends.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Serialize;

use rotocore::consts::FRAMERATE;
use rotocore::sim::SessionPhase;
use rotocore::{GameWorld, frame_feed, polar_to_cartesian, tick};

/// End-of-run report, printed as one JSON line
#[derive(Debug, Serialize)]
struct SessionSummary {
    seed: u64,
    score: i64,
    duration_secs: f64,
    frames: u64,
    collisions: u64,
    fps_min: u32,
    fps_max: u32,
}

fn main() {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut world = GameWorld::new(seed);
    world.start();

    let frame = Duration::from_secs(1) / FRAMERATE;
    let mut sweep = 0.0_f32;
    for i in 0u32.. {
        sweep += 0.05;
        let cursor = world.player.pos + polar_to_cartesian(120.0, sweep);
        world.set_cursor_position(cursor.x, cursor.y);
        world.set_shield_engaged(i % 180 < 45 && world.player.energy > 30.0);

        tick(&mut world);
        let feed = frame_feed(&world);
        if i % FRAMERATE == 0 {
            log::info!("{}", feed.status.line());
        }

        if world.session.phase == SessionPhase::GameOver || i >= 3600 {
            break;
        }
        std::thread::sleep(frame);
    }

    let session = &world.session;
    let duration_ms = if world.session.phase == SessionPhase::GameOver {
        session.duration_ms
    } else {
        world.clock.now_ms() - session.started_at_ms
    };
    let summary = SessionSummary {
        seed,
        score: session.score.round() as i64,
        duration_secs: duration_ms / 1000.0,
        frames: session.frames,
        collisions: session.collisions,
        fps_min: world.fps.fps_min,
        fps_max: world.fps.fps_max,
    };
    match serde_json::to_string(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("summary serialization failed: {err}"),
    }
}
