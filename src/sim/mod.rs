//! Simulation module
//!
//! All gameplay logic lives here, with no rendering or platform
//! dependencies. Every random draw flows through the world's one seeded
//! generator, and time enters only through the world's clock, so whole
//! sessions replay deterministically under a manual clock.

pub mod particles;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timing;

pub use particles::emit_burst;
pub use state::{
    Bounds, CoreNode, GameWorld, InputState, Organism, OrganismKind, Particle, Player, Session,
    SessionPhase,
};
pub use tick::tick;
pub use timing::{Clock, FpsCounter, score_factor};
