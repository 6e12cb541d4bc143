// [libs/domain/telemetry-engine/src/phase1/item_usage.rs]
//! Item-usage aggregator: heals, boosts and throwables (with a smoke
//! sub-count), matched by item id prefix (spec §4.9 "Item usage").

use std::collections::HashMap;

use skirmish_domain_models::{categorize_weapon, ItemUsageAggregate, TelemetryEvent, WeaponCategory};

pub fn extract_item_usage(match_id: &str, events: &[TelemetryEvent]) -> Vec<ItemUsageAggregate> {
    let mut per_player: HashMap<String, ItemUsageAggregate> = HashMap::new();

    for event in events {
        if let TelemetryEvent::LogItemUse { character, item, .. } = event {
            let aggregate = per_player.entry(character.name.clone()).or_insert_with(|| ItemUsageAggregate {
                match_id: match_id.to_string(),
                player_name: character.name.clone(),
                ..Default::default()
            });

            if item.item_id.starts_with("Item_Heal_") {
                aggregate.heals += 1;
            } else if item.item_id.starts_with("Item_Boost_") {
                aggregate.boosts += 1;
            } else if categorize_weapon(&item.item_id) == WeaponCategory::Throwable {
                aggregate.throwables += 1;
                if item.item_id.contains("Smoke") {
                    aggregate.smokes_thrown += 1;
                }
            }
        }
    }

    per_player.into_values().collect()
}
