//! Roster Runner - a side-scrolling obstacle runner
//!
//! Core modules:
//! - `sim`: Simulation (physics, spawning, collisions, game state)
//! - `renderer`: Scene drawing against an abstract 2D surface
//! - `session`: Start/restart transitions and input dispatch
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use assets::{AssetReadiness, AssetRole};
pub use session::{Activation, LoopControl, Session};
pub use tuning::{Tuning, TuningError};

/// Fixed playfield geometry
pub mod consts {
    /// Canvas dimensions
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 400.0;
    pub const GROUND_HEIGHT: f32 = 80.0;

    /// Player box; x never changes
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 100.0;
    pub const PLAYER_X: f32 = 100.0;
    /// Resting y of the player's top edge when standing on the ground
    pub const PLAYER_Y: f32 = GAME_HEIGHT - GROUND_HEIGHT - PLAYER_HEIGHT;

    /// Obstacle boxes
    pub const PIT_WIDTH: f32 = 80.0;
    pub const PIT_HEIGHT: f32 = 40.0;
    pub const RESIGNATION_WIDTH: f32 = 80.0;
    pub const RESIGNATION_HEIGHT: f32 = 60.0;
    /// Resignations float this far above the standing player's head...
    pub const RESIGNATION_LIFT: f32 = 80.0;
    /// ...plus a random extra in [0, RESIGNATION_BAND)
    pub const RESIGNATION_BAND: f32 = 40.0;

    /// Flapping motion of resignations (wall-clock driven)
    pub const FLAP_FREQUENCY: f64 = 0.003;
    pub const FLAP_AMPLITUDE: f32 = 2.0;

    /// Raw score added every tick; displayed score is raw / SCORE_SCALE
    pub const SCORE_PER_TICK: u64 = 1;
    pub const SCORE_SCALE: u64 = 10;

    /// End-of-game figures: days late = (DEADLINE_SCORE - score) / SCORE_PER_DAY
    pub const DEADLINE_SCORE: i64 = 5000;
    pub const SCORE_PER_DAY: i64 = 100;
    pub const PENALTY_BASE: i64 = 50_000;

    /// Winter banner
    pub const BANNER_HEIGHT: f32 = 80.0;

    /// Raindrop streaks
    pub const RAIN_DRIFT_X: f32 = 2.0;
    pub const RAIN_LENGTH_MIN: f32 = 15.0;
    pub const RAIN_LENGTH_RANGE: f32 = 20.0;
    /// Raindrops that fall off the bottom re-enter anywhere in [0, width + this)
    pub const RAIN_REENTRY_SPREAD: f32 = 100.0;
    /// Raindrops drifting past -RAIN_EDGE_MARGIN re-enter at width + RAIN_EDGE_MARGIN
    pub const RAIN_EDGE_MARGIN: f32 = 10.0;
}

/// Format an integer with comma thousands separators ("49,520", "-1,200")
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
