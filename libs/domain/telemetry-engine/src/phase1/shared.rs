// [libs/domain/telemetry-engine/src/phase1/shared.rs]
//! Read-only materializations several Phase 1 extractors need but none of
//! them owns exclusively (spec §4.9 "reads from a shared read-only
//! materialization").

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use skirmish_domain_models::{EventCharacter, Location3D, TelemetryEvent};

#[derive(Debug, Clone)]
pub struct KnockRef {
    pub timestamp: DateTime<Utc>,
    pub attacker_name: Option<String>,
    pub attacker_team: Option<i32>,
    pub attacker_location: Option<Location3D>,
}

/// `dBNOId -> knock` index built from every `LogPlayerMakeGroggy`, used by
/// the kill-position, weapon-kill and killsteal extractors.
pub fn build_knock_index(events: &[TelemetryEvent]) -> HashMap<i64, KnockRef> {
    let mut index = HashMap::new();
    for event in events {
        if let TelemetryEvent::LogPlayerMakeGroggy { timestamp, attacker, dbno_id, .. } = event {
            index.insert(
                *dbno_id,
                KnockRef {
                    timestamp: *timestamp,
                    attacker_name: attacker.as_ref().map(|a| a.name.clone()),
                    attacker_team: attacker.as_ref().map(|a| a.team_id),
                    attacker_location: attacker.as_ref().map(|a| a.location),
                },
            );
        }
    }
    index
}

/// Timestamps of every `LogGameStatePeriodic`, in event order, so extractors
/// can derive a zone-phase index without re-scanning the stream.
pub fn game_state_timestamps(events: &[TelemetryEvent]) -> Vec<DateTime<Utc>> {
    events
        .iter()
        .filter_map(|event| match event {
            TelemetryEvent::LogGameStatePeriodic { timestamp, .. } => Some(*timestamp),
            _ => None,
        })
        .collect()
}

/// 1-based count of game-state snapshots at or before `at`: a stable
/// proxy for "which zone phase was active" without replaying the safety
/// zone's shrink schedule.
pub fn zone_phase_at(state_timestamps: &[DateTime<Utc>], at: DateTime<Utc>) -> i32 {
    state_timestamps.iter().filter(|t| **t <= at).count() as i32
}

/// Last known position/health per player, updated in event order so each
/// extractor can ask "where was this player last seen" as of a timestamp
/// without its own full scan.
#[derive(Default)]
pub struct PositionTracker {
    last_known: HashMap<String, EventCharacter>,
}

impl PositionTracker {
    pub fn observe(&mut self, character: &EventCharacter) {
        self.last_known.insert(character.name.clone(), character.clone());
    }

    pub fn get(&self, player_name: &str) -> Option<&EventCharacter> {
        self.last_known.get(player_name)
    }

    pub fn alive_players(&self) -> impl Iterator<Item = &EventCharacter> {
        self.last_known.values().filter(|c| c.health > 0.0)
    }
}
