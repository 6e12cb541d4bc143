// [libs/domain/telemetry-engine/src/phase1/weapon_kills.rs]
//! Weapon-kill extractor: one row per knock and one per kill, flagged
//! accordingly (spec §4.9 "Weapon kills").

use skirmish_domain_models::{TelemetryEvent, WeaponKillEventRow};

use super::shared::{build_knock_index, game_state_timestamps, zone_phase_at};

pub fn extract_weapon_kills(match_id: &str, events: &[TelemetryEvent]) -> Vec<WeaponKillEventRow> {
    let knock_index = build_knock_index(events);
    let state_timestamps = game_state_timestamps(events);
    let mut rows = Vec::new();

    for event in events {
        match event {
            TelemetryEvent::LogPlayerMakeGroggy {
                timestamp,
                attacker,
                victim,
                damage_causer_name,
                distance,
                ..
            } => {
                rows.push(WeaponKillEventRow {
                    match_id: match_id.to_string(),
                    attacker_name: attacker.as_ref().map(|a| a.name.clone()),
                    victim_name: victim.name.clone(),
                    weapon_id: damage_causer_name.clone(),
                    damage_type: "knock".to_string(),
                    distance: *distance,
                    is_knock: true,
                    zone_phase: zone_phase_at(&state_timestamps, *timestamp),
                    time_survived: 0.0,
                    timestamp: *timestamp,
                });
            }
            TelemetryEvent::LogPlayerKillV2 { timestamp, victim, dbno_id, finish_damage_info, .. } => {
                let knock = knock_index.get(dbno_id);
                let time_survived = knock
                    .map(|k| (*timestamp - k.timestamp).num_milliseconds() as f64 / 1000.0)
                    .unwrap_or(0.0);
                rows.push(WeaponKillEventRow {
                    match_id: match_id.to_string(),
                    attacker_name: knock.and_then(|k| k.attacker_name.clone()),
                    victim_name: victim.name.clone(),
                    weapon_id: finish_damage_info.damage_causer_name.clone(),
                    damage_type: finish_damage_info.damage_type_category.clone(),
                    distance: finish_damage_info.distance,
                    is_knock: false,
                    zone_phase: zone_phase_at(&state_timestamps, *timestamp),
                    time_survived,
                    timestamp: *timestamp,
                });
            }
            _ => {}
        }
    }

    rows
}
