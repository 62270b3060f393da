//! Audio cue feed
//!
//! The simulation never makes sound. It records named cues during each
//! tick; an embedding drains `GameWorld::cues` after ticking and
//! synthesizes or routes them however it likes.

use serde::{Deserialize, Serialize};

/// One audio cue recorded during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AudioCue {
    /// An organism entered the arena. `pan` is the spawn x normalized by
    /// the arena width, usable as a stereo position
    Spawn { pan: f32 },
    /// An organism died against the deflection ring
    OrganismDeflected,
    /// An energy orb was absorbed by the core
    EnergyUp,
    /// An enemy reached the core
    EnergyDown,
    /// The shield is engaged and draining (one per held tick)
    ShieldActive,
    /// Energy ran out
    GameOver,
}
