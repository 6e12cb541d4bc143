// [libs/domain/models/src/player.rs]
//! Tracked players and the upstream platform enum (spec §3 TrackedPlayer).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Steam,
    Psn,
    Xbox,
    Kakao,
    Stadia,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Platform::Steam => "steam",
            Platform::Psn => "psn",
            Platform::Xbox => "xbox",
            Platform::Kakao => "kakao",
            Platform::Stadia => "stadia",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedPlayer {
    pub player_id: String,
    pub player_name: String,
    pub platform: Platform,
    pub tracking_enabled: bool,
}
