// [libs/domain/telemetry-engine/tests/phase2_knock_lifecycle.rs]

use chrono::{TimeZone, Utc};

use skirmish_domain_models::{DamageInfo, EventCharacter, KnockOutcome, Location3D, TelemetryEvent};
use skirmish_telemetry_engine::phase2::{extract_knock_events, project_combat_events, summarize_finishing};

fn character(name: &str, team_id: i32, x: f64, y: f64) -> EventCharacter {
    EventCharacter { name: name.to_string(), team_id, health: 100.0, location: Location3D { x, y, z: 0.0 }, zone: Vec::new() }
}

fn at(seconds: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
}

#[test]
fn a_knock_finished_by_its_own_attacker_is_not_a_killsteal_and_has_a_finish_time() {
    let events = vec![
        TelemetryEvent::LogPlayerMakeGroggy {
            timestamp: at(0),
            attacker: Some(character("alpha", 1, 0.0, 0.0)),
            victim: character("victim", 9, 5.0, 5.0),
            dbno_id: 1,
            damage_reason: String::new(),
            damage_type_category: String::new(),
            damage_causer_name: "WeapM416_C".to_string(),
            distance: 12.0,
        },
        TelemetryEvent::LogPlayerKillV2 {
            timestamp: at(6),
            victim: character("victim", 9, 5.0, 5.0),
            finisher: Some(character("alpha", 1, 0.0, 0.0)),
            dbno_id: 1,
            finish_damage_info: DamageInfo::default(),
        },
    ];

    let knocks = extract_knock_events("m1", &events);
    assert_eq!(knocks.len(), 1);
    assert_eq!(knocks[0].outcome, KnockOutcome::Killed);
    assert!(knocks[0].finisher_is_self);
    assert!(!knocks[0].finisher_is_teammate);
    assert_eq!(knocks[0].time_to_finish, Some(6.0));
}

#[test]
fn a_revived_knock_has_no_finisher_and_the_revived_outcome() {
    let events = vec![
        TelemetryEvent::LogPlayerMakeGroggy {
            timestamp: at(0),
            attacker: Some(character("alpha", 1, 0.0, 0.0)),
            victim: character("victim", 9, 5.0, 5.0),
            dbno_id: 2,
            damage_reason: String::new(),
            damage_type_category: String::new(),
            damage_causer_name: "WeapM416_C".to_string(),
            distance: 12.0,
        },
        TelemetryEvent::LogPlayerRevive {
            timestamp: at(4),
            reviver: character("delta", 9, 5.0, 5.0),
            victim: character("victim", 9, 5.0, 5.0),
            dbno_id: 2,
        },
    ];

    let knocks = extract_knock_events("m1", &events);
    assert_eq!(knocks[0].outcome, KnockOutcome::Revived);
    assert!(knocks[0].finisher_name.is_none());
}

#[test]
fn teammate_proximity_only_counts_samples_within_the_five_second_window() {
    let events = vec![
        TelemetryEvent::LogPlayerPosition { timestamp: at(-4), character: character("teammate", 1, 20.0, 0.0) },
        TelemetryEvent::LogPlayerPosition { timestamp: at(50), character: character("far_teammate", 1, 500.0, 500.0) },
        TelemetryEvent::LogPlayerMakeGroggy {
            timestamp: at(0),
            attacker: Some(character("alpha", 1, 0.0, 0.0)),
            victim: character("victim", 9, 5.0, 5.0),
            dbno_id: 3,
            damage_reason: String::new(),
            damage_type_category: String::new(),
            damage_causer_name: "WeapM416_C".to_string(),
            distance: 12.0,
        },
    ];

    let knocks = extract_knock_events("m1", &events);
    assert_eq!(knocks[0].proximity.alive_teammates, 1);
    assert_eq!(knocks[0].proximity.nearest_teammate_distance, Some(20.0));
}

#[test]
fn teammate_proximity_prefers_take_damage_positions_over_idle_position_ticks() {
    let events = vec![
        // Stale idle-tick position: should be ignored once a damage-event
        // position for the same teammate exists in the window.
        TelemetryEvent::LogPlayerPosition { timestamp: at(-4), character: character("teammate", 1, 999.0, 0.0) },
        TelemetryEvent::LogPlayerTakeDamage {
            timestamp: at(-1),
            attacker: Some(character("teammate", 1, 30.0, 0.0)),
            victim: character("someone_else", 9, 40.0, 0.0),
            damage: 10.0,
            damage_type_category: "Damage_Gun".to_string(),
            damage_causer_name: "WeapM416_C".to_string(),
            damage_reason: String::new(),
        },
        // No damage-event position for this teammate in the window: falls
        // back to its idle-tick position.
        TelemetryEvent::LogPlayerPosition { timestamp: at(1), character: character("fallback_teammate", 1, 40.0, 0.0) },
        TelemetryEvent::LogPlayerMakeGroggy {
            timestamp: at(0),
            attacker: Some(character("alpha", 1, 0.0, 0.0)),
            victim: character("victim", 9, 5.0, 5.0),
            dbno_id: 5,
            damage_reason: String::new(),
            damage_type_category: String::new(),
            damage_causer_name: "WeapM416_C".to_string(),
            distance: 12.0,
        },
    ];

    let knocks = extract_knock_events("m1", &events);
    assert_eq!(knocks[0].proximity.alive_teammates, 2);
    // Nearest is the damage-event position (30.0), not the stale idle
    // position (999.0) for the same teammate.
    assert_eq!(knocks[0].proximity.nearest_teammate_distance, Some(30.0));
}

#[test]
fn finishing_summary_counts_knocks_and_conversions_per_attacker() {
    let events = vec![
        TelemetryEvent::LogPlayerMakeGroggy {
            timestamp: at(0),
            attacker: Some(character("alpha", 1, 0.0, 0.0)),
            victim: character("victim", 9, 5.0, 5.0),
            dbno_id: 1,
            damage_reason: String::new(),
            damage_type_category: String::new(),
            damage_causer_name: "WeapM416_C".to_string(),
            distance: 5.0,
        },
        TelemetryEvent::LogPlayerKillV2 {
            timestamp: at(2),
            victim: character("victim", 9, 5.0, 5.0),
            finisher: Some(character("alpha", 1, 0.0, 0.0)),
            dbno_id: 1,
            finish_damage_info: DamageInfo::default(),
        },
    ];

    let knocks = extract_knock_events("m1", &events);
    let summaries = summarize_finishing("m1", &knocks);
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].knocks_dealt, 1);
    assert_eq!(summaries[0].finishes_converted, 1);
    assert_eq!(summaries[0].distance_histogram.bucket_0_10, 1);
}

#[test]
fn combat_events_project_damage_knock_and_kill_with_the_right_tags() {
    let events = vec![
        TelemetryEvent::LogPlayerTakeDamage {
            timestamp: at(0),
            attacker: Some(character("alpha", 1, 0.0, 0.0)),
            victim: character("victim", 9, 5.0, 5.0),
            damage: 30.0,
            damage_type_category: "Damage_Gun".to_string(),
            damage_causer_name: "WeapM416_C".to_string(),
            damage_reason: String::new(),
        },
        TelemetryEvent::LogPlayerMakeGroggy {
            timestamp: at(1),
            attacker: Some(character("alpha", 1, 0.0, 0.0)),
            victim: character("victim", 9, 5.0, 5.0),
            dbno_id: 4,
            damage_reason: String::new(),
            damage_type_category: String::new(),
            damage_causer_name: "WeapM416_C".to_string(),
            distance: 5.0,
        },
        TelemetryEvent::LogPlayerKillV2 {
            timestamp: at(2),
            victim: character("victim", 9, 5.0, 5.0),
            finisher: Some(character("alpha", 1, 0.0, 0.0)),
            dbno_id: 4,
            finish_damage_info: DamageInfo::default(),
        },
    ];

    let combat = project_combat_events(&events);
    assert_eq!(combat.len(), 3);
    assert_eq!(combat[0].damage, 30.0);
    assert_eq!(combat[1].dbno_id, Some(4));
    assert_eq!(combat[2].attacker.as_ref().unwrap().name, "alpha");
}
