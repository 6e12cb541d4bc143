// [libs/domain/fight-detector/src/detector.rs]
//! Top-level entry point: cluster, classify, assign outcomes, enrich
//! participants (spec §4.10 end to end).

use skirmish_domain_models::Fight;

use crate::classifier::classify;
use crate::clustering::{cluster_engagements, Engagement};
use crate::events::{CombatEvent, CombatEventKind};
use crate::outcome::assign_outcome;
use crate::participants::enrich_participants;

/// Runs the full pipeline over one match's combat events. Engagements that
/// fail the classifier ladder are silently dropped (spec §4.10 "Engagements
/// that match no rule are discarded").
pub fn detect_fights(match_id: &str, events: Vec<CombatEvent>) -> Vec<Fight> {
    cluster_engagements(events)
        .into_iter()
        .filter_map(|engagement| build_fight(match_id, engagement))
        .collect()
}

fn build_fight(match_id: &str, engagement: Engagement) -> Option<Fight> {
    let reason = classify(&engagement)?;
    let assignment = assign_outcome(&engagement);
    let participants = enrich_participants(&engagement);

    let mut team_refs: Vec<i32> = assignment.team_outcomes.keys().copied().collect();
    team_refs.sort_unstable();
    let (primary_pair, third_party_team_refs) = split_primary_pair(&team_refs);

    let total_knocks = count_kind(&engagement, CombatEventKind::Knock);
    let total_kills = count_kind(&engagement, CombatEventKind::Kill);
    let total_damage_events = count_kind(&engagement, CombatEventKind::Damage);
    let total_attack_events = engagement.events.iter().filter(|event| event.attacker.is_some()).count() as i32;
    let total_damage: f64 = engagement
        .events
        .iter()
        .filter(|event| event.kind == CombatEventKind::Damage)
        .map(|event| event.damage)
        .sum();

    let center = engagement.center();
    let spread_radius = engagement
        .events
        .iter()
        .map(|event| center.distance_2d(&event.victim.location))
        .fold(0.0_f64, f64::max);

    Some(Fight {
        fight_id: None,
        match_id: match_id.to_string(),
        start_time: engagement.start_time,
        end_time: engagement.end_time,
        team_refs,
        primary_pair,
        third_party_team_refs,
        center,
        spread_radius,
        total_knocks,
        total_kills,
        total_damage,
        total_damage_events,
        total_attack_events,
        outcome: assignment.outcome,
        winning_team: assignment.winning_team,
        losing_team: assignment.losing_team,
        team_outcomes: assignment.team_outcomes,
        fight_reason: reason,
        participants,
    })
}

fn count_kind(engagement: &Engagement, kind: CombatEventKind) -> i32 {
    engagement.events.iter().filter(|event| event.kind == kind).count() as i32
}

/// With exactly two teams the pair is unambiguous. With three or more
/// (third-party fights) the two lowest `team_ref`s are treated as the
/// primary pair and the rest as third parties.
fn split_primary_pair(team_refs: &[i32]) -> ((i32, i32), Vec<i32>) {
    match team_refs {
        [] => ((0, 0), Vec::new()),
        [single] => ((*single, *single), Vec::new()),
        [a, b] => ((*a, *b), Vec::new()),
        [a, b, rest @ ..] => ((*a, *b), rest.to_vec()),
    }
}
