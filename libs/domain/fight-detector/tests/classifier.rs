// [libs/domain/fight-detector/tests/classifier.rs]
//! Priority-ladder classifier coverage (spec §4.10 "Classifier").

use chrono::{TimeZone, Utc};

use skirmish_domain_models::{FightReason, Location3D};
use skirmish_fight_detector::{classify, cluster_engagements, CombatEvent, CombatEventKind, Combatant};

fn combatant(name: &str, team_ref: i32) -> Combatant {
    Combatant { name: name.to_string(), team_ref, location: Location3D::default() }
}

fn at(second: i64) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::seconds(second)
}

fn one_engagement(events: Vec<CombatEvent>) -> skirmish_fight_detector::Engagement {
    let mut engagements = cluster_engagements(events);
    assert_eq!(engagements.len(), 1, "test fixture should collapse into a single engagement");
    engagements.remove(0)
}

#[test]
fn two_knocks_classify_as_multiple_casualties() {
    let events = vec![
        CombatEvent {
            kind: CombatEventKind::Knock,
            timestamp: at(0),
            attacker: Some(combatant("alpha", 1)),
            victim: combatant("bravo", 2),
            damage: 0.0,
            dbno_id: Some(1),
        },
        CombatEvent {
            kind: CombatEventKind::Knock,
            timestamp: at(5),
            attacker: Some(combatant("charlie", 2)),
            victim: combatant("delta", 1),
            damage: 0.0,
            dbno_id: Some(2),
        },
    ];
    let engagement = one_engagement(events);
    assert_eq!(classify(&engagement), Some(FightReason::MultipleCasualties));
}

#[test]
fn lone_execution_without_resistance_is_discarded() {
    let events = vec![CombatEvent {
        kind: CombatEventKind::Kill,
        timestamp: at(0),
        attacker: Some(combatant("alpha", 1)),
        victim: combatant("bravo", 2),
        damage: 0.0,
        dbno_id: Some(1),
    }];
    let engagement = one_engagement(events);
    assert_eq!(classify(&engagement), None);
}

#[test]
fn lone_kill_with_enough_return_damage_counts_as_a_fight() {
    let events = vec![
        CombatEvent {
            kind: CombatEventKind::Damage,
            timestamp: at(0),
            attacker: Some(combatant("bravo", 2)),
            victim: combatant("alpha", 1),
            damage: 40.0,
            dbno_id: None,
        },
        CombatEvent {
            kind: CombatEventKind::Kill,
            timestamp: at(5),
            attacker: Some(combatant("alpha", 1)),
            victim: combatant("bravo", 2),
            damage: 0.0,
            dbno_id: Some(1),
        },
    ];
    let engagement = one_engagement(events);
    assert_eq!(classify(&engagement), Some(FightReason::SingleInstantKillWithResistance));
}

#[test]
fn reciprocal_damage_needs_both_sides_above_the_share_floor() {
    let events = vec![
        CombatEvent {
            kind: CombatEventKind::Damage,
            timestamp: at(0),
            attacker: Some(combatant("alpha", 1)),
            victim: combatant("bravo", 2),
            damage: 100.0,
            dbno_id: None,
        },
        CombatEvent {
            kind: CombatEventKind::Damage,
            timestamp: at(5),
            attacker: Some(combatant("bravo", 2)),
            victim: combatant("alpha", 1),
            damage: 60.0,
            dbno_id: None,
        },
    ];
    let engagement = one_engagement(events);
    assert_eq!(classify(&engagement), Some(FightReason::ReciprocalDamage));
}

#[test]
fn lopsided_damage_without_casualties_is_not_a_fight() {
    let events = vec![
        CombatEvent {
            kind: CombatEventKind::Damage,
            timestamp: at(0),
            attacker: Some(combatant("alpha", 1)),
            victim: combatant("bravo", 2),
            damage: 140.0,
            dbno_id: None,
        },
        CombatEvent {
            kind: CombatEventKind::Damage,
            timestamp: at(5),
            attacker: Some(combatant("bravo", 2)),
            victim: combatant("alpha", 1),
            damage: 5.0,
            dbno_id: None,
        },
    ];
    let engagement = one_engagement(events);
    assert_eq!(classify(&engagement), None);
}

#[test]
fn single_knock_with_return_fire_needs_both_sides_at_75() {
    let events = vec![
        CombatEvent {
            kind: CombatEventKind::Damage,
            timestamp: at(0),
            attacker: Some(combatant("alpha", 1)),
            victim: combatant("bravo", 2),
            damage: 80.0,
            dbno_id: None,
        },
        CombatEvent {
            kind: CombatEventKind::Knock,
            timestamp: at(3),
            attacker: Some(combatant("alpha", 1)),
            victim: combatant("bravo", 2),
            damage: 0.0,
            dbno_id: Some(9),
        },
        CombatEvent {
            kind: CombatEventKind::Damage,
            timestamp: at(5),
            attacker: Some(combatant("bravo", 2)),
            victim: combatant("alpha", 1),
            damage: 75.0,
            dbno_id: None,
        },
    ];
    let engagement = one_engagement(events);
    assert_eq!(classify(&engagement), Some(FightReason::SingleKnockWithReturnFire));
}
