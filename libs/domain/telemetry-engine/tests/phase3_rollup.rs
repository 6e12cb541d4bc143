// [libs/domain/telemetry-engine/tests/phase3_rollup.rs]

use chrono::{TimeZone, Utc};

use skirmish_domain_models::{
    AdvancedStatsAggregate, EventCharacter, ItemUsageAggregate, Location3D, MatchParticipant, TelemetryEvent,
    WeaponCategory, WeaponKillEventRow,
};
use skirmish_telemetry_engine::phase1::PositionalAccumulator;
use skirmish_telemetry_engine::phase3::{apply_rollup, extract_weapon_distribution};

fn character(name: &str, team_id: i32, x: f64, y: f64) -> EventCharacter {
    EventCharacter { name: name.to_string(), team_id, health: 100.0, location: Location3D { x, y, z: 0.0 }, zone: Vec::new() }
}

fn at(seconds: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
}

#[test]
fn weapon_distribution_folds_kills_knocks_and_damage_by_player_facing_category() {
    let events = vec![TelemetryEvent::LogPlayerTakeDamage {
        timestamp: at(0),
        attacker: Some(character("alpha", 1, 0.0, 0.0)),
        victim: character("victim", 9, 5.0, 5.0),
        damage: 40.0,
        damage_type_category: "Damage_Gun".to_string(),
        damage_causer_name: "WeapAK47_C".to_string(),
        damage_reason: String::new(),
    }];

    let weapon_kills = vec![WeaponKillEventRow {
        match_id: "m1".to_string(),
        attacker_name: Some("alpha".to_string()),
        victim_name: "victim".to_string(),
        weapon_id: "WeapAK47_C".to_string(),
        damage_type: "knock".to_string(),
        distance: 50.0,
        is_knock: true,
        zone_phase: 1,
        time_survived: 0.0,
        timestamp: at(0),
    }];

    let tallies = extract_weapon_distribution("m1", &events, &weapon_kills);
    let ar = tallies.iter().find(|t| t.player_name == "alpha" && t.weapon_category == WeaponCategory::Ar).unwrap();
    assert_eq!(ar.knocks, 1);
    assert_eq!(ar.damage, 40.0);
}

#[test]
fn rollup_applies_advanced_stats_item_usage_and_positional_means_by_player_name() {
    let mut participants = vec![MatchParticipant { player_name: "alpha".to_string(), ..Default::default() }];

    let advanced = vec![AdvancedStatsAggregate {
        match_id: "m1".to_string(),
        player_name: "alpha".to_string(),
        killsteals: 2,
        throwable_damage: 15.0,
        damage_received: 80.0,
    }];

    let items = vec![ItemUsageAggregate {
        match_id: "m1".to_string(),
        player_name: "alpha".to_string(),
        heals: 3,
        boosts: 1,
        throwables: 2,
        smokes_thrown: 1,
    }];

    let mut positional = std::collections::HashMap::new();
    let mut accumulator = PositionalAccumulator::default();
    accumulator.distance_from_center_sum = 300.0;
    accumulator.distance_from_edge_sum = 100.0;
    accumulator.in_zone_samples = 8;
    accumulator.total_samples = 10;
    positional.insert("alpha".to_string(), accumulator);

    apply_rollup(&mut participants, &advanced, &items, &positional);

    let alpha = &participants[0];
    assert_eq!(alpha.killsteals, 2);
    assert_eq!(alpha.heals_used, 3);
    assert_eq!(alpha.smokes_thrown, 1);
    assert_eq!(alpha.mean_distance_from_circle_center, Some(30.0));
    assert_eq!(alpha.mean_time_in_zone_fraction, Some(0.8));
}
