//! Session driver
//!
//! Owns the live `GameState` and the transitions around it:
//! Idle -> Running -> GameOver -> (activate) -> Running.
//! The platform layer schedules `frame` once per display refresh and routes
//! the activate input (key or pointer) to `activate`.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

use crate::assets::AssetReadiness;
use crate::renderer::{Surface, render};
use crate::sim::{GamePhase, GameState, TickInput, tick};
use crate::tuning::{Tuning, TuningError};

/// What an activate input did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// A new run started (from idle or after game over)
    Started,
    /// The player jumped
    Jumped,
    /// Jump request while airborne
    Ignored,
}

/// Whether the frame loop should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// A page session: one live game plus the high score carried between runs
pub struct Session {
    state: GameState,
    tuning: Tuning,
    /// Seeds each run's RNG
    seeder: Pcg32,
    runs: u32,
}

impl Session {
    /// Start an idle session. Rejects tuning that breaks a gameplay invariant.
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;

        let mut seeder = Pcg32::seed_from_u64(seed);
        let state = GameState::new(seeder.next_u64(), tuning.clone(), 0);
        Ok(Self {
            state,
            tuning,
            seeder,
            runs: 0,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for the platform layer and tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn high_score(&self) -> u64 {
        self.state.high_score
    }

    /// Number of runs started this session
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Handle the single activate input
    pub fn activate(&mut self) -> Activation {
        match self.state.phase {
            GamePhase::Idle | GamePhase::GameOver => {
                self.restart();
                Activation::Started
            }
            GamePhase::Running => {
                if self.state.jump() {
                    Activation::Jumped
                } else {
                    Activation::Ignored
                }
            }
        }
    }

    /// Replace the game wholesale, keeping only the high score
    pub fn restart(&mut self) {
        let seed = self.seeder.next_u64();
        self.state = GameState::new(seed, self.tuning.clone(), self.state.high_score);
        self.state.phase = GamePhase::Running;
        self.runs += 1;
        log::info!(
            "Run {} started (seed {}, high score {})",
            self.runs,
            seed,
            self.state.high_score
        );
    }

    /// One animation frame: tick, then draw
    pub fn frame(
        &mut self,
        input: &TickInput,
        assets: &AssetReadiness,
        surface: &mut impl Surface,
    ) -> LoopControl {
        tick(&mut self.state, input);
        render(&self.state, assets, surface);

        if self.state.is_running() {
            LoopControl::Continue
        } else {
            LoopControl::Stop
        }
    }
}
