// [libs/domain/models/src/match.rs]
//! The unified match ledger row (spec §3 "Match (ledger row)").

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tournament::ValidationStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Discovered,
    Processing,
    Complete,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveredBy {
    Main,
    Tournament,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryPriority {
    Normal,
    High,
}

/// Per-stage boolean processing ledger (spec §3, §4.3 "Stage transitions").
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ProcessingFlags {
    pub summaries_processed: bool,
    pub telemetry_downloaded: bool,
    pub landings_processed: bool,
    pub kills_processed: bool,
    pub circles_processed: bool,
    pub weapons_processed: bool,
    pub damage_processed: bool,
    pub finishing_processed: bool,
    pub fights_processed: bool,
    pub stats_aggregated: bool,
}

#[derive(Debug, Clone)]
pub struct MatchRow {
    pub match_id: String,
    pub map_name: String,
    pub game_mode: String,
    pub game_type: String,
    pub match_datetime: DateTime<Utc>,
    pub duration: i32,
    pub telemetry_url: Option<String>,
    pub status: MatchStatus,
    pub error_message: Option<String>,
    pub is_tournament_match: bool,
    pub discovered_by: DiscoveredBy,
    pub discovery_priority: DiscoveryPriority,
    pub round_ref: Option<String>,
    pub schedule_slot_ref: Option<String>,
    pub validation_status: ValidationStatus,
    pub team_count: i32,
    pub unmatched_player_count: i32,
    pub flags: ProcessingFlags,
    pub stats_aggregated_at: Option<DateTime<Utc>>,
}

/// What a discovery service has on hand when it first learns of a match,
/// before the ledger row exists. Used as the first-writer-wins insert
/// payload (spec §4.3).
#[derive(Debug, Clone)]
pub struct NewMatch {
    pub match_id: String,
    pub map_name: String,
    pub game_mode: String,
    pub game_type: String,
    pub match_datetime: DateTime<Utc>,
    pub duration: i32,
    pub telemetry_url: Option<String>,
    pub discovered_by: DiscoveredBy,
    pub discovery_priority: DiscoveryPriority,
}

/// Outcome of an insertion attempt: tells the caller whether it actually
/// won the race, per the "first-writer-wins" invariant (spec §4.3, §8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    AlreadyExists,
}
