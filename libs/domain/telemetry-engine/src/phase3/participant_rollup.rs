// [libs/domain/telemetry-engine/src/phase3/participant_rollup.rs]
//! Folds Phase 1's advanced-stats, item-usage and positional aggregates
//! into the enhanced `match_summaries` columns (spec §4.9 Phase 3).

use std::collections::HashMap;

use skirmish_domain_models::{AdvancedStatsAggregate, ItemUsageAggregate, MatchParticipant};

use crate::phase1::PositionalAccumulator;

pub fn apply_rollup(
    participants: &mut [MatchParticipant],
    advanced_stats: &[AdvancedStatsAggregate],
    item_usage: &[ItemUsageAggregate],
    positional_means: &HashMap<String, PositionalAccumulator>,
) {
    let advanced_by_player: HashMap<&str, &AdvancedStatsAggregate> =
        advanced_stats.iter().map(|row| (row.player_name.as_str(), row)).collect();
    let items_by_player: HashMap<&str, &ItemUsageAggregate> =
        item_usage.iter().map(|row| (row.player_name.as_str(), row)).collect();

    for participant in participants.iter_mut() {
        if let Some(row) = advanced_by_player.get(participant.player_name.as_str()) {
            participant.killsteals = row.killsteals;
            participant.throwable_damage = row.throwable_damage;
            participant.damage_received = row.damage_received;
        }

        if let Some(row) = items_by_player.get(participant.player_name.as_str()) {
            participant.heals_used = row.heals;
            participant.boosts_used = row.boosts;
            participant.throwables_used = row.throwables;
            participant.smokes_thrown = row.smokes_thrown;
        }

        if let Some(accumulator) = positional_means.get(&participant.player_name) {
            participant.mean_distance_from_circle_center = accumulator.mean_distance_from_center();
            participant.mean_distance_from_circle_edge = accumulator.mean_distance_from_edge();
            participant.mean_time_in_zone_fraction = accumulator.mean_time_in_zone_fraction();
        }
    }
}
