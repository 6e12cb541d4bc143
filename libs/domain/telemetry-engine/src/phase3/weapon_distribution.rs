// [libs/domain/telemetry-engine/src/phase3/weapon_distribution.rs]
//! Per-player weapon-category distribution (spec §4.9 Phase 3, §4.11).
//! Kills/knocks fold the Phase 1 weapon-kill rows by category; damage is
//! re-derived from the full event stream since Phase 1's damage-event
//! table only stores detail rows for tracked players while the aggregate
//! counts stay global.

use std::collections::HashMap;

use skirmish_domain_models::{categorize_weapon, TelemetryEvent, WeaponCategory, WeaponCategoryTally, WeaponKillEventRow};

pub fn extract_weapon_distribution(
    match_id: &str,
    events: &[TelemetryEvent],
    weapon_kills: &[WeaponKillEventRow],
) -> Vec<WeaponCategoryTally> {
    let mut tallies: HashMap<(String, WeaponCategory), WeaponCategoryTally> = HashMap::new();

    fn get<'a>(
        tallies: &'a mut HashMap<(String, WeaponCategory), WeaponCategoryTally>,
        match_id: &str,
        player: &str,
        category: WeaponCategory,
    ) -> &'a mut WeaponCategoryTally {
        tallies
            .entry((player.to_string(), category))
            .or_insert_with(|| WeaponCategoryTally {
                match_id: match_id.to_string(),
                player_name: player.to_string(),
                weapon_category: category,
                ..Default::default()
            })
    }

    for row in weapon_kills {
        let Some(attacker_name) = &row.attacker_name else { continue };
        let category = categorize_weapon(&row.weapon_id).player_facing();
        let tally = get(&mut tallies, match_id, attacker_name, category);
        if row.is_knock {
            tally.knocks += 1;
        } else {
            tally.kills += 1;
        }
    }

    for event in events {
        if let TelemetryEvent::LogPlayerTakeDamage { attacker, damage, damage_causer_name, .. } = event {
            let Some(attacker) = attacker else { continue };
            let category = categorize_weapon(damage_causer_name).player_facing();
            get(&mut tallies, match_id, &attacker.name, category).damage += damage;
        }
    }

    tallies.into_values().collect()
}
