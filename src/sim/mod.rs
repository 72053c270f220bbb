//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Seeded RNG only (owned by the state)
//! - Wall-clock time only enters through `TickInput`
//! - Insertion-ordered obstacles

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use state::{
    GameOverSummary, GamePhase, GameState, Obstacle, ObstacleKind, PitLabel, Player, Raindrop,
};
pub use tick::{TickInput, tick};
