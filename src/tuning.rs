//! Data-driven game balance
//!
//! Every knob that shapes difficulty lives here so it can be overridden from
//! JSON without a rebuild. Missing fields fall back to the shipped defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Balance constants for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration added to the player's velocity every tick
    pub gravity: f32,
    /// Vertical velocity applied on jump (negative is up)
    pub jump_velocity: f32,
    /// Game speed at the start of a session (pixels per tick)
    pub initial_speed: f32,
    /// Speed added every tick before winter
    pub speed_increment: f32,
    /// Speed added every tick once winter has started
    pub winter_speed_increment: f32,
    /// Obstacle spawn gap range, [min, max)
    pub min_obstacle_distance: f32,
    pub max_obstacle_distance: f32,
    /// Probability that a spawned obstacle is a resignation rather than a pit
    pub resignation_chance: f32,
    /// Raw score at which winter starts
    pub winter_season_score: u64,
    /// Banner slide-in speed (pixels per tick)
    pub banner_animation_speed: f32,
    /// Number of raindrops materialized when winter starts
    pub rain_count: usize,
    pub rain_speed_min: f32,
    pub rain_speed_max: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            jump_velocity: -12.0,
            initial_speed: 5.0,
            speed_increment: 0.001,
            winter_speed_increment: 0.003,
            min_obstacle_distance: 300.0,
            max_obstacle_distance: 600.0,
            resignation_chance: 0.6,
            // 30 seconds at 10 raw points per second
            winter_season_score: 300,
            banner_animation_speed: 4.0,
            rain_count: 100,
            rain_speed_min: 8.0,
            rain_speed_max: 15.0,
        }
    }
}

/// Why a tuning document was rejected
#[derive(Debug, Error)]
pub enum TuningError {
    /// Not valid JSON, or a field had the wrong type
    #[error("tuning parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Parsed, but the values break a gameplay invariant
    #[error("invalid tuning: {0}")]
    Invalid(&'static str),
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check the values the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.min_obstacle_distance <= 0.0 {
            return Err(TuningError::Invalid("min_obstacle_distance must be positive"));
        }
        if self.min_obstacle_distance >= self.max_obstacle_distance {
            return Err(TuningError::Invalid(
                "min_obstacle_distance must be below max_obstacle_distance",
            ));
        }
        // Speed must never decrease within a session
        if self.speed_increment < 0.0 || self.winter_speed_increment < 0.0 {
            return Err(TuningError::Invalid("speed increments must be non-negative"));
        }
        if self.initial_speed <= 0.0 {
            return Err(TuningError::Invalid("initial_speed must be positive"));
        }
        if self.gravity <= 0.0 {
            return Err(TuningError::Invalid("gravity must be positive"));
        }
        if !(0.0..=1.0).contains(&self.resignation_chance) {
            return Err(TuningError::Invalid("resignation_chance must be within [0, 1]"));
        }
        if self.rain_speed_min > self.rain_speed_max {
            return Err(TuningError::Invalid("rain_speed_min must not exceed rain_speed_max"));
        }
        if self.banner_animation_speed <= 0.0 {
            return Err(TuningError::Invalid("banner_animation_speed must be positive"));
        }
        Ok(())
    }
}
