// [libs/domain/models/src/stats.rs]
//! Knock lifecycle rows (spec §3 "KnockEvent", §4.9 Phase 2) and career
//! aggregate rows (spec §3 "Career Aggregate Rows", §4.11).

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::telemetry_event::Location3D;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KnockOutcome {
    Killed,
    Revived,
    Unknown,
}

/// Teammate-proximity snapshot sampled in a +/-5s window around the knock
/// (spec §3 KnockEvent, §4.9 "Knock lifecycle / finishing metrics").
#[derive(Debug, Clone, Default, Serialize)]
pub struct TeammateProximitySnapshot {
    pub nearest_teammate_distance: Option<f64>,
    pub mean_teammate_distance: Option<f64>,
    pub within_50m: i32,
    pub within_100m: i32,
    pub within_200m: i32,
    pub team_spread_variance: Option<f64>,
    pub alive_teammates: i32,
    pub per_teammate_distances: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct KnockEvent {
    pub match_id: String,
    pub attacker_name: Option<String>,
    pub victim_name: String,
    pub weapon: String,
    pub attacker_location: Option<Location3D>,
    pub victim_location: Location3D,
    pub distance: f64,
    pub damage_reason: String,
    pub damage_type_category: String,
    pub dbno_id: i64,
    pub knocked_at: DateTime<Utc>,
    pub outcome: KnockOutcome,
    pub finisher_name: Option<String>,
    pub finisher_is_self: bool,
    pub finisher_is_teammate: bool,
    pub time_to_finish: Option<f64>,
    pub proximity: TeammateProximitySnapshot,
}

/// Distance histogram buckets used by the per-(match, player) finishing
/// summary roll-up (spec §4.9: 0-10, 10-50, 50-100, 100-200, 200+ m and the
/// teammate-support histogram <25, 25-50, 50-100, 100-200, 200+ m).
#[derive(Debug, Clone, Default, Serialize)]
pub struct FinishingDistanceHistogram {
    pub bucket_0_10: i32,
    pub bucket_10_50: i32,
    pub bucket_50_100: i32,
    pub bucket_100_200: i32,
    pub bucket_200_plus: i32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TeammateSupportHistogram {
    pub bucket_under_25: i32,
    pub bucket_25_50: i32,
    pub bucket_50_100: i32,
    pub bucket_100_200: i32,
    pub bucket_200_plus: i32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PlayerFinishingSummary {
    pub match_id: String,
    pub player_name: String,
    pub knocks_dealt: i32,
    pub finishes_converted: i32,
    pub knocks_revived_against: i32,
    pub distance_histogram: FinishingDistanceHistogram,
    pub teammate_support_histogram: TeammateSupportHistogram,
}

/// Match-type classes career aggregates are partitioned by (spec §4.11).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTypeClass {
    Ranked,
    Normal,
    All,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PlayerDamageStats {
    pub player_name: String,
    pub match_type_class: Option<String>,
    pub total_damage_dealt: f64,
    pub total_damage_received: f64,
    pub total_matches: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PlayerAdvancedCareerStats {
    pub player_name: String,
    pub match_type_class: Option<String>,
    pub total_killsteals: i64,
    pub total_throwable_damage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BackfillStatus {
    pub player_name: String,
    pub requested_at: DateTime<Utc>,
    pub window_days: i32,
    pub completed: bool,
}
