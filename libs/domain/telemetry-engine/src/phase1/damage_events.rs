// [libs/domain/telemetry-engine/src/phase1/damage_events.rs]
//! Detailed damage-event extractor, scoped to tracked players only: the
//! aggregated counters in `advanced_stats` cover everyone (spec §4.9
//! "Damage events").

use std::collections::HashSet;

use skirmish_domain_models::{PlayerDamageEventRow, TelemetryEvent};

pub fn extract_damage_events(
    match_id: &str,
    events: &[TelemetryEvent],
    tracked_players: &HashSet<String>,
) -> Vec<PlayerDamageEventRow> {
    events
        .iter()
        .filter_map(|event| match event {
            TelemetryEvent::LogPlayerTakeDamage {
                timestamp,
                attacker,
                victim,
                damage,
                damage_type_category,
                damage_causer_name,
                ..
            } => {
                let attacker_tracked = attacker.as_ref().map(|a| tracked_players.contains(&a.name)).unwrap_or(false);
                if !attacker_tracked && !tracked_players.contains(&victim.name) {
                    return None;
                }
                Some(PlayerDamageEventRow {
                    match_id: match_id.to_string(),
                    attacker_name: attacker.as_ref().map(|a| a.name.clone()),
                    victim_name: victim.name.clone(),
                    damage: *damage,
                    damage_type_category: damage_type_category.clone(),
                    damage_causer_name: damage_causer_name.clone(),
                    timestamp: *timestamp,
                })
            }
            _ => None,
        })
        .collect()
}
