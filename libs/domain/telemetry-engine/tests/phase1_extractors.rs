// [libs/domain/telemetry-engine/tests/phase1_extractors.rs]

use std::collections::HashSet;

use chrono::{TimeZone, Utc};

use skirmish_domain_models::{DamageInfo, EventCharacter, EventItem, GameStateSnapshot, Location3D, TelemetryEvent};
use skirmish_telemetry_engine::phase1::{
    extract_advanced_stats, extract_circle_positions, extract_damage_events, extract_item_usage,
    extract_kill_positions, extract_landings, extract_weapon_kills,
};

fn character(name: &str, team_id: i32, x: f64, y: f64) -> EventCharacter {
    EventCharacter { name: name.to_string(), team_id, health: 100.0, location: Location3D { x, y, z: 0.0 }, zone: vec!["Pochinki".to_string()] }
}

fn at(seconds: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
}

#[test]
fn a_landing_at_the_map_origin_is_flagged_invalid() {
    let events = vec![
        TelemetryEvent::LogParachuteLanding { timestamp: at(0), character: character("alpha", 1, 0.0, 0.0) },
        TelemetryEvent::LogParachuteLanding { timestamp: at(1), character: character("bravo", 2, 120.0, 340.0) },
    ];

    let rows = extract_landings("m1", &events);
    assert_eq!(rows.len(), 2);
    assert!(!rows[0].is_valid);
    assert!(rows[1].is_valid);
}

#[test]
fn kill_position_recovers_knocker_location_from_the_matching_knock() {
    let events = vec![
        TelemetryEvent::LogPlayerMakeGroggy {
            timestamp: at(0),
            attacker: Some(character("alpha", 1, 10.0, 10.0)),
            victim: character("bravo", 2, 20.0, 20.0),
            dbno_id: 42,
            damage_reason: "Damage_Gun".to_string(),
            damage_type_category: "Damage_Gun".to_string(),
            damage_causer_name: "WeapAK47_C".to_string(),
            distance: 30.0,
        },
        TelemetryEvent::LogPlayerKillV2 {
            timestamp: at(5),
            victim: character("bravo", 2, 20.0, 20.0),
            finisher: Some(character("alpha", 1, 12.0, 12.0)),
            dbno_id: 42,
            finish_damage_info: DamageInfo {
                damage_reason: "Damage_Gun".to_string(),
                damage_type_category: "Damage_Gun".to_string(),
                damage_causer_name: "WeapAK47_C".to_string(),
                distance: 28.0,
            },
        },
    ];

    let rows = extract_kill_positions("m1", &events);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].knocker_location, Location3D { x: 10.0, y: 10.0, z: 0.0 });
    assert_eq!(rows[0].finisher_name.as_deref(), Some("alpha"));
}

#[test]
fn weapon_kills_emits_a_row_per_knock_and_per_kill() {
    let events = vec![
        TelemetryEvent::LogPlayerMakeGroggy {
            timestamp: at(0),
            attacker: Some(character("alpha", 1, 0.0, 0.0)),
            victim: character("bravo", 2, 5.0, 5.0),
            dbno_id: 1,
            damage_reason: String::new(),
            damage_type_category: String::new(),
            damage_causer_name: "WeapM416_C".to_string(),
            distance: 40.0,
        },
        TelemetryEvent::LogPlayerKillV2 {
            timestamp: at(10),
            victim: character("bravo", 2, 5.0, 5.0),
            finisher: Some(character("alpha", 1, 0.0, 0.0)),
            dbno_id: 1,
            finish_damage_info: DamageInfo::default(),
        },
    ];

    let rows = extract_weapon_kills("m1", &events);
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().any(|r| r.is_knock));
    let kill_row = rows.iter().find(|r| !r.is_knock).unwrap();
    assert_eq!(kill_row.time_survived, 10.0);
    assert_eq!(kill_row.attacker_name.as_deref(), Some("alpha"));
}

#[test]
fn damage_events_are_kept_only_when_attacker_or_victim_is_tracked() {
    let events = vec![
        TelemetryEvent::LogPlayerTakeDamage {
            timestamp: at(0),
            attacker: Some(character("alpha", 1, 0.0, 0.0)),
            victim: character("bravo", 2, 5.0, 5.0),
            damage: 25.0,
            damage_type_category: "Damage_Gun".to_string(),
            damage_causer_name: "WeapM416_C".to_string(),
            damage_reason: String::new(),
        },
        TelemetryEvent::LogPlayerTakeDamage {
            timestamp: at(1),
            attacker: Some(character("charlie", 3, 0.0, 0.0)),
            victim: character("delta", 4, 5.0, 5.0),
            damage: 10.0,
            damage_type_category: "Damage_Gun".to_string(),
            damage_causer_name: "WeapUMP_C".to_string(),
            damage_reason: String::new(),
        },
    ];

    let tracked: HashSet<String> = ["alpha".to_string()].into_iter().collect();
    let rows = extract_damage_events("m1", &events, &tracked);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].attacker_name.as_deref(), Some("alpha"));
}

#[test]
fn item_usage_matches_heal_boost_and_throwable_prefixes() {
    let events = vec![
        TelemetryEvent::LogItemUse {
            timestamp: at(0),
            character: character("alpha", 1, 0.0, 0.0),
            item: EventItem { item_id: "Item_Heal_FirstAid".to_string(), category: String::new(), sub_category: String::new() },
        },
        TelemetryEvent::LogItemUse {
            timestamp: at(1),
            character: character("alpha", 1, 0.0, 0.0),
            item: EventItem { item_id: "Item_Boost_Energy".to_string(), category: String::new(), sub_category: String::new() },
        },
        TelemetryEvent::LogItemUse {
            timestamp: at(2),
            character: character("alpha", 1, 0.0, 0.0),
            item: EventItem { item_id: "WeapSmokeBomb_C".to_string(), category: String::new(), sub_category: String::new() },
        },
    ];

    let rows = extract_item_usage("m1", &events);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].heals, 1);
    assert_eq!(rows[0].boosts, 1);
    assert_eq!(rows[0].throwables, 1);
    assert_eq!(rows[0].smokes_thrown, 1);
}

#[test]
fn killsteal_counts_when_the_knocker_and_finisher_are_on_different_teams() {
    let events = vec![
        TelemetryEvent::LogPlayerMakeGroggy {
            timestamp: at(0),
            attacker: Some(character("alpha", 1, 0.0, 0.0)),
            victim: character("victim", 9, 5.0, 5.0),
            dbno_id: 7,
            damage_reason: String::new(),
            damage_type_category: String::new(),
            damage_causer_name: "WeapM416_C".to_string(),
            distance: 10.0,
        },
        TelemetryEvent::LogPlayerKillV2 {
            timestamp: at(2),
            victim: character("victim", 9, 5.0, 5.0),
            finisher: Some(character("bravo", 2, 6.0, 6.0)),
            dbno_id: 7,
            finish_damage_info: DamageInfo::default(),
        },
        TelemetryEvent::LogPlayerTakeDamage {
            timestamp: at(3),
            attacker: Some(character("bravo", 2, 6.0, 6.0)),
            victim: character("victim", 9, 5.0, 5.0),
            damage: 50.0,
            damage_type_category: "Damage_Gun".to_string(),
            damage_causer_name: "WeapGrenade_C".to_string(),
            damage_reason: String::new(),
        },
    ];

    let rows = extract_advanced_stats("m1", &events);
    let alpha = rows.iter().find(|r| r.player_name == "alpha").unwrap();
    assert_eq!(alpha.killsteals, 1);
    let victim_row = rows.iter().find(|r| r.player_name == "victim").unwrap();
    assert_eq!(victim_row.damage_received, 50.0);
    let bravo = rows.iter().find(|r| r.player_name == "bravo").unwrap();
    assert_eq!(bravo.throwable_damage, 50.0);
}

#[test]
fn circle_positions_samples_tracked_players_every_fifth_state_and_accumulates_for_everyone() {
    let mut events = Vec::new();
    events.push(TelemetryEvent::LogPlayerPosition { timestamp: at(0), character: character("alpha", 1, 0.0, 0.0) });
    for i in 0..10 {
        events.push(TelemetryEvent::LogGameStatePeriodic {
            timestamp: at(i + 1),
            game_state: GameStateSnapshot { safety_zone_position: Location3D::default(), safety_zone_radius: 100.0, ..Default::default() },
        });
    }

    let tracked: HashSet<String> = ["alpha".to_string()].into_iter().collect();
    let (rows, means) = extract_circle_positions("m1", &events, &tracked);
    assert_eq!(rows.len(), 2);
    let accumulator = means.get("alpha").unwrap();
    assert_eq!(accumulator.total_samples, 10);
    assert!(accumulator.mean_time_in_zone_fraction().unwrap() > 0.0);
}
