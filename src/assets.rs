//! Optional image assets
//!
//! Images load asynchronously and may fail; the renderer consults the ready
//! flags every frame and falls back to primitive shapes per asset.

use serde::{Deserialize, Serialize};

/// Logical role of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetRole {
    /// Doctor on a scooter
    Player,
    /// Resignation email
    Resignation,
    /// Illustration for the "Sick Leave" pit
    SickLeave,
}

impl AssetRole {
    pub const ALL: [AssetRole; 3] = [
        AssetRole::Player,
        AssetRole::Resignation,
        AssetRole::SickLeave,
    ];

    /// URL the browser fetches the image from
    pub fn url(&self) -> &'static str {
        match self {
            AssetRole::Player => "/images/doctor-scooter.svg",
            AssetRole::Resignation => "/images/resignation-email.svg",
            AssetRole::SickLeave => "/images/sick-leave.svg",
        }
    }
}

/// Per-asset ready flags (all false until the loader reports success)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetReadiness {
    pub player: bool,
    pub resignation: bool,
    pub sick_leave: bool,
}

impl AssetReadiness {
    /// Every asset loaded
    pub fn all() -> Self {
        Self {
            player: true,
            resignation: true,
            sick_leave: true,
        }
    }

    pub fn is_ready(&self, role: AssetRole) -> bool {
        match role {
            AssetRole::Player => self.player,
            AssetRole::Resignation => self.resignation,
            AssetRole::SickLeave => self.sick_leave,
        }
    }

    pub fn set_ready(&mut self, role: AssetRole, ready: bool) {
        match role {
            AssetRole::Player => self.player = ready,
            AssetRole::Resignation => self.resignation = ready,
            AssetRole::SickLeave => self.sick_leave = ready,
        }
    }
}
