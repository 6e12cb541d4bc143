// [libs/domain/models/src/fight.rs]
//! Fight and FightParticipant entities (spec §3, §4.10).

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::telemetry_event::Location3D;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FightOutcome {
    DecisiveWin,
    MarginalWin,
    Draw,
    ThirdParty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeamOutcome {
    Won,
    Lost,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FightReason {
    MultipleCasualties,
    SingleInstantKillWithResistance,
    ReciprocalDamage,
    SingleKnockWithReturnFire,
}

impl FightReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FightReason::MultipleCasualties => "multiple_casualties",
            FightReason::SingleInstantKillWithResistance => "single_instant_kill_with_resistance",
            FightReason::ReciprocalDamage => "reciprocal_damage",
            FightReason::SingleKnockWithReturnFire => "single_knock_with_return_fire",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Fight {
    /// Assigned by the database on insert (`RETURNING id`); absent until then.
    pub fight_id: Option<i64>,
    pub match_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub team_refs: Vec<i32>,
    pub primary_pair: (i32, i32),
    pub third_party_team_refs: Vec<i32>,
    pub center: Location3D,
    pub spread_radius: f64,
    pub total_knocks: i32,
    pub total_kills: i32,
    pub total_damage: f64,
    pub total_damage_events: i32,
    pub total_attack_events: i32,
    pub outcome: FightOutcome,
    pub winning_team: Option<i32>,
    pub losing_team: Option<i32>,
    pub team_outcomes: HashMap<i32, TeamOutcome>,
    pub fight_reason: FightReason,
    pub participants: Vec<FightParticipant>,
}

impl Fight {
    pub fn duration_seconds(&self) -> f64 {
        (self.end_time - self.start_time).num_milliseconds() as f64 / 1000.0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FightParticipant {
    /// Stamped in after the owning `Fight` receives its generated id; a
    /// `None` here past the persistence boundary is a defect (spec §4.10).
    pub fight_id: Option<i64>,
    pub player_name: String,
    pub team_ref: i32,
    pub knocks_dealt: i32,
    pub kills_dealt: i32,
    pub damage_dealt: f64,
    pub damage_taken: f64,
    pub attacks_made: i32,
    pub mean_location: Location3D,
    pub was_knocked: bool,
    pub was_killed: bool,
    pub survived: bool,
    pub knocked_at: Option<DateTime<Utc>>,
    pub killed_at: Option<DateTime<Utc>>,
}

/// The set of AI-controlled entity names excluded from fight statistics
/// (spec §4.10 "NPC set").
pub const NPC_NAMES: &[&str] = &[
    "Commander",
    "Guard",
    "Pillar",
    "SkySoldier",
    "Soldier",
    "PillarSoldier",
    "ZombieSoldier",
];

pub fn is_npc(name: &str) -> bool {
    NPC_NAMES.contains(&name)
}
