// [libs/domain/telemetry-engine/src/phase1/kill_positions.rs]
//! Kill-position extractor: knocker and finisher coordinates for every
//! kill (spec §4.9 "Kill positions").

use skirmish_domain_models::{KillPositionRow, TelemetryEvent};

use super::shared::build_knock_index;

pub fn extract_kill_positions(match_id: &str, events: &[TelemetryEvent]) -> Vec<KillPositionRow> {
    let knock_index = build_knock_index(events);

    events
        .iter()
        .filter_map(|event| match event {
            TelemetryEvent::LogPlayerKillV2 { timestamp, victim, finisher, dbno_id, finish_damage_info } => {
                let knock = knock_index.get(dbno_id);
                Some(KillPositionRow {
                    match_id: match_id.to_string(),
                    victim_name: victim.name.clone(),
                    finisher_name: finisher.as_ref().map(|f| f.name.clone()),
                    dbno_id: *dbno_id,
                    knocker_location: knock.and_then(|k| k.attacker_location).unwrap_or_default(),
                    finisher_location: finisher.as_ref().map(|f| f.location),
                    victim_location: victim.location,
                    zone: serde_json::Value::from(victim.zone.clone()),
                    damage_reason: finish_damage_info.damage_reason.clone(),
                    damage_type_category: finish_damage_info.damage_type_category.clone(),
                    damage_causer_name: finish_damage_info.damage_causer_name.clone(),
                    distance: finish_damage_info.distance,
                    timestamp: *timestamp,
                })
            }
            _ => None,
        })
        .collect()
}
