// [libs/domain/fight-detector/tests/clustering.rs]
//! Engagement windowing coverage (spec §4.10 "Clustering").

use chrono::{TimeZone, Utc};

use skirmish_domain_models::Location3D;
use skirmish_fight_detector::{cluster_engagements, CombatEvent, CombatEventKind, Combatant};

fn combatant(name: &str, team_ref: i32, x: f64, y: f64) -> Combatant {
    Combatant { name: name.to_string(), team_ref, location: Location3D { x, y, z: 0.0 } }
}

fn damage_event(minute: i64, attacker: &str, attacker_team: i32, victim: &str, victim_team: i32, amount: f64) -> CombatEvent {
    CombatEvent {
        kind: CombatEventKind::Damage,
        timestamp: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::seconds(minute),
        attacker: Some(combatant(attacker, attacker_team, 0.0, 0.0)),
        victim: combatant(victim, victim_team, 0.0, 0.0),
        damage: amount,
        dbno_id: None,
    }
}

#[test]
fn events_within_window_and_radius_stay_in_one_engagement() {
    let events = vec![
        damage_event(0, "alpha", 1, "bravo", 2, 30.0),
        damage_event(10, "alpha", 1, "bravo", 2, 40.0),
        damage_event(20, "bravo", 2, "alpha", 1, 25.0),
    ];
    let engagements = cluster_engagements(events);
    assert_eq!(engagements.len(), 1);
    assert_eq!(engagements[0].events.len(), 3);
}

#[test]
fn a_gap_past_the_engagement_window_starts_a_new_engagement() {
    let events = vec![
        damage_event(0, "alpha", 1, "bravo", 2, 30.0),
        damage_event(200, "alpha", 1, "bravo", 2, 30.0),
    ];
    let engagements = cluster_engagements(events);
    assert_eq!(engagements.len(), 2);
}

#[test]
fn npc_combatants_are_excluded_before_clustering() {
    let mut event = damage_event(0, "alpha", 1, "bravo", 2, 30.0);
    event.victim.name = "Guard".to_string();
    let engagements = cluster_engagements(vec![event]);
    assert!(engagements.is_empty());
}

#[test]
fn an_event_far_from_the_running_center_starts_a_new_engagement() {
    let mut far = damage_event(5, "alpha", 1, "bravo", 2, 30.0);
    far.victim.location = Location3D { x: 10_000.0, y: 10_000.0, z: 0.0 };
    far.attacker.as_mut().unwrap().location = Location3D { x: 10_000.0, y: 10_000.0, z: 0.0 };

    let events = vec![damage_event(0, "alpha", 1, "bravo", 2, 30.0), far];
    let engagements = cluster_engagements(events);
    assert_eq!(engagements.len(), 2);
}
