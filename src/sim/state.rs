//! Game state and core simulation types
//!
//! A single `GameState` is owned by the session and passed by `&mut` into
//! the tick and the input handlers.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first activation
    Idle,
    /// Ticking every frame
    Running,
    /// Run ended, waiting for activation to restart
    GameOver,
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel_y: f32,
    pub jumping: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, PLAYER_Y),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            vel_y: 0.0,
            jumping: false,
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Start a jump. Ignored while airborne.
    pub fn jump(&mut self, jump_velocity: f32) -> bool {
        if self.jumping {
            return false;
        }
        self.vel_y = jump_velocity;
        self.jumping = true;
        true
    }

    /// Apply one tick of gravity and land on the ground
    pub fn fall(&mut self, gravity: f32) {
        self.vel_y += gravity;
        self.pos.y += self.vel_y;

        if self.pos.y >= PLAYER_Y {
            self.pos.y = PLAYER_Y;
            self.vel_y = 0.0;
            self.jumping = false;
        }
    }
}

/// Labels painted on pits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PitLabel {
    ExamWeek,
    PublicHoliday,
    SickLeave,
    SystemDown,
    StaffMeeting,
}

impl PitLabel {
    pub const ALL: [PitLabel; 5] = [
        PitLabel::ExamWeek,
        PitLabel::PublicHoliday,
        PitLabel::SickLeave,
        PitLabel::SystemDown,
        PitLabel::StaffMeeting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PitLabel::ExamWeek => "Exam Week",
            PitLabel::PublicHoliday => "Public Holiday",
            PitLabel::SickLeave => "Sick Leave",
            PitLabel::SystemDown => "System Down",
            PitLabel::StaffMeeting => "Staff Meeting",
        }
    }
}

/// Obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Sits in the ground; must be jumped over
    Pit { label: PitLabel },
    /// Floats above the player and flaps up and down with the wall clock
    Resignation,
}

/// A scrolling obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: ObstacleKind,
    /// Frozen at spawn; later speed-ups don't affect existing obstacles
    pub vel_x: f32,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn is_pit(&self) -> bool {
        matches!(self.kind, ObstacleKind::Pit { .. })
    }

    pub fn label(&self) -> Option<PitLabel> {
        match self.kind {
            ObstacleKind::Pit { label } => Some(label),
            ObstacleKind::Resignation => None,
        }
    }

    /// Fully scrolled past the left edge
    pub fn is_offscreen(&self) -> bool {
        self.pos.x + self.size.x <= 0.0
    }
}

/// A winter rain streak
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Raindrop {
    pub pos: Vec2,
    pub speed: f32,
    pub length: f32,
}

/// Figures shown on the game-over overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverSummary {
    /// Displayed score (raw / 10)
    pub score: u64,
    /// May be negative for very high scores
    pub days_late: i64,
    /// May be negative for very high scores
    pub penalty: i64,
    /// The score beat the previous session high
    pub new_high_score: bool,
}

impl GameOverSummary {
    pub fn from_score(score: u64, previous_high: u64) -> Self {
        let signed = score as i64;
        Self {
            score,
            days_late: (DEADLINE_SCORE - signed).div_euclid(SCORE_PER_DAY),
            penalty: PENALTY_BASE - signed,
            new_high_score: score > previous_high,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed this state's RNG was created from
    pub seed: u64,
    pub phase: GamePhase,
    pub player: Player,
    /// Insertion order is also draw order
    pub obstacles: Vec<Obstacle>,
    pub raindrops: Vec<Raindrop>,
    /// Raw score (+1 per tick)
    pub score: u64,
    /// Best displayed score this page session
    pub high_score: u64,
    /// Scroll speed in pixels per tick, never decreases
    pub speed: f32,
    pub winter: bool,
    /// Winter banner top edge; slides from -BANNER_HEIGHT to 0
    pub banner_y: f32,
    /// Gap the next obstacle will be spawned at
    pub next_gap: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Set on the tick the run ends
    pub summary: Option<GameOverSummary>,
    pub tuning: Tuning,
    #[serde(skip, default = "unseeded_rng")]
    pub(crate) rng: Pcg32,
}

fn unseeded_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

impl GameState {
    /// Create a fresh, idle game state
    pub fn new(seed: u64, tuning: Tuning, high_score: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let next_gap = super::spawn::next_gap(&mut rng, &tuning);

        Self {
            seed,
            phase: GamePhase::Idle,
            player: Player::default(),
            obstacles: Vec::new(),
            raindrops: Vec::new(),
            score: 0,
            high_score,
            speed: tuning.initial_speed,
            winter: false,
            banner_y: -BANNER_HEIGHT,
            next_gap,
            time_ticks: 0,
            summary: None,
            tuning,
            rng,
        }
    }

    /// Score as shown to the player
    pub fn display_score(&self) -> u64 {
        self.score / SCORE_SCALE
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Jump request from input. Ignored when airborne or not running.
    pub fn jump(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.player.jump(self.tuning.jump_velocity)
    }
}
