// [libs/domain/models/src/summary.rs]
//! Per-(match, participant) summary row (spec §3 "MatchParticipant").

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchParticipant {
    pub match_id: String,
    pub participant_id: String,
    pub player_name: String,
    pub team_id: i32,
    pub team_rank: i32,
    pub won: bool,

    pub kills: i32,
    pub assists: i32,
    pub dbnos: i32,
    pub damage_dealt: f64,
    pub headshot_kills: i32,
    pub longest_kill: f64,
    pub ride_distance: f64,
    pub walk_distance: f64,
    pub swim_distance: f64,
    pub time_survived: f64,
    pub revives: i32,
    pub heals: i32,
    pub boosts: i32,
    pub weapons_acquired: i32,
    pub kill_place: i32,
    pub win_place: i32,

    // Phase-3 roll-up columns (spec §4.9 Phase 3, §4.11 weapon category subset).
    pub killsteals: i32,
    pub heals_used: i32,
    pub boosts_used: i32,
    pub throwables_used: i32,
    pub smokes_thrown: i32,
    pub throwable_damage: f64,
    pub damage_received: f64,
    pub mean_distance_from_circle_center: Option<f64>,
    pub mean_distance_from_circle_edge: Option<f64>,
    pub mean_time_in_zone_fraction: Option<f64>,
}

/// The `participant_id -> {team_id, team_rank, won}` lookup the summary
/// worker builds from the match document's roster entries (spec §4.7 step 5).
#[derive(Debug, Clone, Copy)]
pub struct RosterPlacement {
    pub team_id: i32,
    pub team_rank: i32,
    pub won: bool,
}
