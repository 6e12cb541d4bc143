// [libs/domain/models/src/tournament.rs]
//! Tournament roster, team and scheduling entities (spec §3, §4.3, §4.6).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentRosterEntry {
    pub player_name: String,
    pub team_ref: String,
    pub preferred_team: bool,
    pub primary_sample: bool,
    pub sample_priority: i32,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub team_ref: String,
    pub team_name: String,
    pub division: String,
    pub group_name: Option<String>,
    pub team_number: i32,
    pub active: bool,
}

/// A (division, group) pair, spec Glossary "Lobby". Holds at most 16 teams.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LobbyKey {
    pub division: String,
    pub group_name: Option<String>,
}

pub const MAX_TEAMS_PER_LOBBY: usize = 16;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentRound {
    pub round_ref: String,
    pub division: String,
    pub group_name: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledMatch {
    pub schedule_slot_ref: String,
    pub round_ref: String,
    pub scheduled_datetime: DateTime<Utc>,
    pub map_name: String,
}

/// Outcome of tournament-context assignment (spec §4.3 step 3-6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Confirmed,
    Unscheduled,
    RemakeCandidate,
    MixedDivision,
    NotTournamentMatch,
}

/// Result of the §4.3 tournament-context resolution, ready to be persisted
/// onto the match ledger row.
#[derive(Debug, Clone)]
pub struct TournamentContext {
    pub is_tournament_match: bool,
    pub validation_status: ValidationStatus,
    pub round_ref: Option<String>,
    pub schedule_slot_ref: Option<String>,
    pub team_count: i32,
    pub unmatched_player_count: i32,
}

impl TournamentContext {
    pub fn not_tournament(unmatched: i32) -> Self {
        Self {
            is_tournament_match: false,
            validation_status: ValidationStatus::NotTournamentMatch,
            round_ref: None,
            schedule_slot_ref: None,
            team_count: 0,
            unmatched_player_count: unmatched,
        }
    }

    pub fn mixed_division() -> Self {
        Self {
            is_tournament_match: false,
            validation_status: ValidationStatus::MixedDivision,
            round_ref: None,
            schedule_slot_ref: None,
            team_count: 0,
            unmatched_player_count: 0,
        }
    }
}
