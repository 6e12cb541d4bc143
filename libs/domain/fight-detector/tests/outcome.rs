// [libs/domain/fight-detector/tests/outcome.rs]
//! Third-party (3+ team) outcome assignment coverage (spec §8: exactly one
//! WON, one LOST, the rest DRAW).

use chrono::{TimeZone, Utc};

use skirmish_domain_models::{FightOutcome, Location3D, TeamOutcome};
use skirmish_fight_detector::{assign_outcome, cluster_engagements, CombatEvent, CombatEventKind, Combatant};

fn combatant(name: &str, team_ref: i32) -> Combatant {
    Combatant { name: name.to_string(), team_ref, location: Location3D { x: 0.0, y: 0.0, z: 0.0 } }
}

fn kill_event(second: i64, attacker: &str, attacker_team: i32, victim: &str, victim_team: i32) -> CombatEvent {
    CombatEvent {
        kind: CombatEventKind::Kill,
        timestamp: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::seconds(second),
        attacker: Some(combatant(attacker, attacker_team)),
        victim: combatant(victim, victim_team),
        damage: 100.0,
        dbno_id: None,
    }
}

#[test]
fn ties_break_toward_the_lowest_team_ref() {
    let events = vec![
        kill_event(0, "a1", 1, "c1", 3),
        kill_event(10, "b1", 2, "c2", 3),
    ];
    let engagements = cluster_engagements(events);
    assert_eq!(engagements.len(), 1);

    let outcome = assign_outcome(&engagements[0]);
    assert_eq!(outcome.outcome, FightOutcome::ThirdParty);
    // team 1 and team 2 each have exactly one kill; team 1 wins the tie.
    assert_eq!(outcome.winning_team, Some(1));
    // team 3 lost both of its members and has the most deaths.
    assert_eq!(outcome.losing_team, Some(3));
    assert_eq!(outcome.team_outcomes.get(&1), Some(&TeamOutcome::Won));
    assert_eq!(outcome.team_outcomes.get(&2), Some(&TeamOutcome::Draw));
    assert_eq!(outcome.team_outcomes.get(&3), Some(&TeamOutcome::Lost));
}

#[test]
fn a_team_tied_for_most_kills_and_most_deaths_is_never_won_and_lost_at_once() {
    let events = vec![
        kill_event(0, "a1", 1, "b1", 2),
        kill_event(10, "a2", 1, "c1", 3),
        kill_event(20, "b1", 2, "a1", 1),
        kill_event(30, "c1", 3, "a2", 1),
    ];
    let engagements = cluster_engagements(events);
    assert_eq!(engagements.len(), 1);

    let outcome = assign_outcome(&engagements[0]);
    assert_eq!(outcome.outcome, FightOutcome::ThirdParty);
    // team 1 has the most kills (2) and also the most deaths (2, a1 and a2).
    assert_eq!(outcome.winning_team, Some(1));
    assert_ne!(outcome.winning_team, outcome.losing_team);
    // among the remaining teams, 2 and 3 tie on one death each; 2 wins the tie.
    assert_eq!(outcome.losing_team, Some(2));

    assert_eq!(outcome.team_outcomes.get(&1), Some(&TeamOutcome::Won));
    assert_eq!(outcome.team_outcomes.get(&2), Some(&TeamOutcome::Lost));
    assert_eq!(outcome.team_outcomes.get(&3), Some(&TeamOutcome::Draw));

    let lost_count = outcome.team_outcomes.values().filter(|v| **v == TeamOutcome::Lost).count();
    let won_count = outcome.team_outcomes.values().filter(|v| **v == TeamOutcome::Won).count();
    assert_eq!(won_count, 1);
    assert_eq!(lost_count, 1);
}
