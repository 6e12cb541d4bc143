// [libs/domain/models/src/telemetry_event.rs]
//! Raw telemetry event shapes (as deserialized from the stored
//! `raw.json.gz` array) and the extracted per-event row families the
//! processing engine writes to detail tables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Location3D {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Location3D {
    pub fn distance_2d(&self, other: &Location3D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// A single raw telemetry record. Upstream telemetry is a heterogeneous
/// array tagged by `_T`; only the fields each extractor needs are modeled
/// (spec §9 "dynamic-typed any payloads", small tagged records per kind,
/// not an untyped map).
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "_T")]
pub enum TelemetryEvent {
    LogParachuteLanding {
        #[serde(rename = "_D")]
        timestamp: DateTime<Utc>,
        character: EventCharacter,
    },
    LogPlayerKillV2 {
        #[serde(rename = "_D")]
        timestamp: DateTime<Utc>,
        victim: EventCharacter,
        #[serde(default)]
        finisher: Option<EventCharacter>,
        #[serde(rename = "dBNOId", default = "default_dbno_id")]
        dbno_id: i64,
        #[serde(default)]
        finish_damage_info: DamageInfo,
    },
    LogPlayerMakeGroggy {
        #[serde(rename = "_D")]
        timestamp: DateTime<Utc>,
        attacker: Option<EventCharacter>,
        victim: EventCharacter,
        #[serde(rename = "dBNOId")]
        dbno_id: i64,
        #[serde(default)]
        damage_reason: String,
        #[serde(default)]
        damage_type_category: String,
        #[serde(default)]
        damage_causer_name: String,
        #[serde(default)]
        distance: f64,
    },
    LogPlayerRevive {
        #[serde(rename = "_D")]
        timestamp: DateTime<Utc>,
        reviver: EventCharacter,
        victim: EventCharacter,
        #[serde(rename = "dBNOId")]
        dbno_id: i64,
    },
    LogPlayerTakeDamage {
        #[serde(rename = "_D")]
        timestamp: DateTime<Utc>,
        attacker: Option<EventCharacter>,
        victim: EventCharacter,
        #[serde(default)]
        damage: f64,
        #[serde(default)]
        damage_type_category: String,
        #[serde(default)]
        damage_causer_name: String,
        #[serde(default)]
        damage_reason: String,
    },
    LogItemUse {
        #[serde(rename = "_D")]
        timestamp: DateTime<Utc>,
        character: EventCharacter,
        item: EventItem,
    },
    LogPlayerPosition {
        #[serde(rename = "_D")]
        timestamp: DateTime<Utc>,
        character: EventCharacter,
    },
    LogGameStatePeriodic {
        #[serde(rename = "_D")]
        timestamp: DateTime<Utc>,
        game_state: GameStateSnapshot,
    },
    #[serde(other)]
    Unknown,
}

fn default_dbno_id() -> i64 {
    -1
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventCharacter {
    pub name: String,
    #[serde(default)]
    pub team_id: i32,
    #[serde(default)]
    pub health: f64,
    pub location: Location3D,
    #[serde(default)]
    pub zone: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventItem {
    #[serde(rename = "itemId")]
    pub item_id: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sub_category: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DamageInfo {
    #[serde(default)]
    pub damage_reason: String,
    #[serde(default)]
    pub damage_type_category: String,
    #[serde(default)]
    pub damage_causer_name: String,
    #[serde(default)]
    pub distance: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameStateSnapshot {
    #[serde(default)]
    pub safety_zone_position: Location3D,
    #[serde(default)]
    pub safety_zone_radius: f64,
    #[serde(default)]
    pub poison_gas_warning_position: Location3D,
    #[serde(default)]
    pub poison_gas_warning_radius: f64,
}

// ---- Extracted detail rows (Phase 1, spec §4.9) ----

#[derive(Debug, Clone, Serialize)]
pub struct LandingRow {
    pub match_id: String,
    pub player_name: String,
    pub team_id: i32,
    pub location: Location3D,
    pub timestamp: DateTime<Utc>,
    pub is_valid: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct KillPositionRow {
    pub match_id: String,
    pub victim_name: String,
    pub finisher_name: Option<String>,
    pub dbno_id: i64,
    pub knocker_location: Location3D,
    pub finisher_location: Option<Location3D>,
    pub victim_location: Location3D,
    pub zone: serde_json::Value,
    pub damage_reason: String,
    pub damage_type_category: String,
    pub damage_causer_name: String,
    pub distance: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeaponKillEventRow {
    pub match_id: String,
    pub attacker_name: Option<String>,
    pub victim_name: String,
    pub weapon_id: String,
    pub damage_type: String,
    pub distance: f64,
    pub is_knock: bool,
    pub zone_phase: i32,
    pub time_survived: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerDamageEventRow {
    pub match_id: String,
    pub attacker_name: Option<String>,
    pub victim_name: String,
    pub damage: f64,
    pub damage_type_category: String,
    pub damage_causer_name: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CirclePositionRow {
    pub match_id: String,
    pub player_name: String,
    pub phase: i32,
    pub player_location: Location3D,
    pub circle_center: Location3D,
    pub circle_radius: f64,
    pub distance_from_center: f64,
    pub distance_from_edge: f64,
    pub in_zone: bool,
    pub timestamp: DateTime<Utc>,
}

/// Aggregate item-usage counters, one row per (match, player), spec §4.9
/// "Item usage".
#[derive(Debug, Clone, Default, Serialize)]
pub struct ItemUsageAggregate {
    pub match_id: String,
    pub player_name: String,
    pub heals: i32,
    pub boosts: i32,
    pub throwables: i32,
    pub smokes_thrown: i32,
}

/// Per-player advanced stats, spec §4.9 "Advanced stats".
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdvancedStatsAggregate {
    pub match_id: String,
    pub player_name: String,
    pub killsteals: i32,
    pub throwable_damage: f64,
    pub damage_received: f64,
}
