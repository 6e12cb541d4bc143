// [libs/domain/telemetry-engine/src/phase1/advanced_stats.rs]
//! Per-player killsteals, throwable damage and damage received (spec
//! §4.9 "Advanced stats").
//!
//! Killsteal rule: a kill is a killsteal iff the `dBNOId` knock was made
//! by a player on a different team than the finisher.

use std::collections::HashMap;

use skirmish_domain_models::{categorize_weapon, AdvancedStatsAggregate, TelemetryEvent, WeaponCategory};

use super::shared::build_knock_index;

const BLUE_ZONE_DAMAGE_TYPE: &str = "Damage_BlueZone";

pub fn extract_advanced_stats(match_id: &str, events: &[TelemetryEvent]) -> Vec<AdvancedStatsAggregate> {
    let knock_index = build_knock_index(events);
    let mut per_player: HashMap<String, AdvancedStatsAggregate> = HashMap::new();

    fn get<'a>(
        per_player: &'a mut HashMap<String, AdvancedStatsAggregate>,
        match_id: &str,
        name: &str,
    ) -> &'a mut AdvancedStatsAggregate {
        per_player
            .entry(name.to_string())
            .or_insert_with(|| AdvancedStatsAggregate { match_id: match_id.to_string(), player_name: name.to_string(), ..Default::default() })
    }

    for event in events {
        match event {
            TelemetryEvent::LogPlayerKillV2 { finisher, dbno_id, .. } => {
                let Some(finisher) = finisher else { continue };
                let Some(knock) = knock_index.get(dbno_id) else { continue };
                let is_killsteal = knock.attacker_team.is_some()
                    && knock.attacker_team != Some(finisher.team_id)
                    && knock.attacker_name.as_deref() != Some(finisher.name.as_str());
                if is_killsteal {
                    if let Some(knocker_name) = &knock.attacker_name {
                        get(&mut per_player, match_id, knocker_name).killsteals += 1;
                    }
                }
            }
            TelemetryEvent::LogPlayerTakeDamage {
                attacker,
                victim,
                damage,
                damage_type_category,
                damage_causer_name,
                ..
            } => {
                let self_damage = attacker.as_ref().map(|a| a.name == victim.name).unwrap_or(false);
                if !self_damage && damage_type_category != BLUE_ZONE_DAMAGE_TYPE {
                    get(&mut per_player, match_id, &victim.name).damage_received += damage;
                }
                if let Some(attacker) = attacker {
                    if categorize_weapon(damage_causer_name) == WeaponCategory::Throwable {
                        get(&mut per_player, match_id, &attacker.name).throwable_damage += damage;
                    }
                }
            }
            _ => {}
        }
    }

    per_player.into_values().collect()
}
