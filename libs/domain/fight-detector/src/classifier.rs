// [libs/domain/fight-detector/src/classifier.rs]
//! Priority-ladder classifier: the first rule that fires decides whether
//! an engagement is a fight, and why (spec §4.10 "Classifier").

use std::collections::{HashMap, HashSet};

use skirmish_domain_models::FightReason;

use crate::clustering::Engagement;
use crate::events::CombatEventKind;

/// Combined damage required before two undecided sides count as a
/// reciprocal-damage fight.
const RECIPROCAL_MIN_COMBINED_DAMAGE: f64 = 150.0;
/// Minimum share of combined damage either side must contribute for rule 3.
const RECIPROCAL_MIN_SHARE: f64 = 0.20;
/// Minimum damage each side must deal for a lone knock to count as a fight.
const SINGLE_KNOCK_MIN_SIDE_DAMAGE: f64 = 75.0;

pub fn classify(engagement: &Engagement) -> Option<FightReason> {
    let knock_count = engagement
        .events
        .iter()
        .filter(|event| event.kind == CombatEventKind::Knock)
        .count();
    let kills: Vec<_> = engagement
        .events
        .iter()
        .filter(|event| event.kind == CombatEventKind::Kill)
        .collect();

    if knock_count + kills.len() >= 2 {
        return Some(FightReason::MultipleCasualties);
    }

    if kills.len() == 1 {
        let kill = kills[0];
        let victim_already_knocked = engagement.events.iter().any(|event| {
            event.kind == CombatEventKind::Knock && event.victim.name == kill.victim.name
        });
        if !victim_already_knocked {
            return classify_single_instant_kill(engagement, &kill.victim.name);
        }
        // A kill preceded by its own knock is a finishing blow, not a fresh
        // engagement trigger; fall through to the remaining rules using the
        // knock/damage evidence already gathered above.
    }

    if knock_count == 0 && kills.is_empty() {
        return classify_reciprocal_damage(engagement);
    }

    if knock_count == 1 && kills.is_empty() {
        return classify_single_knock(engagement);
    }

    None
}

fn team_sizes(engagement: &Engagement) -> HashMap<i32, HashSet<&str>> {
    let mut teams: HashMap<i32, HashSet<&str>> = HashMap::new();
    for event in &engagement.events {
        teams.entry(event.victim.team_ref).or_default().insert(event.victim.name.as_str());
        if let Some(attacker) = &event.attacker {
            teams.entry(attacker.team_ref).or_default().insert(attacker.name.as_str());
        }
    }
    teams
}

fn damage_by_team(engagement: &Engagement) -> HashMap<i32, f64> {
    let mut totals: HashMap<i32, f64> = HashMap::new();
    for event in &engagement.events {
        if event.kind != CombatEventKind::Damage {
            continue;
        }
        if let Some(attacker) = &event.attacker {
            *totals.entry(attacker.team_ref).or_default() += event.damage;
        }
    }
    totals
}

fn classify_single_instant_kill(engagement: &Engagement, victim_name: &str) -> Option<FightReason> {
    let teams = team_sizes(engagement);
    let victim_team = engagement
        .events
        .iter()
        .find(|event| event.victim.name == victim_name)
        .map(|event| event.victim.team_ref)?;

    let victim_team_size = teams.get(&victim_team).map(|members| members.len()).unwrap_or(1).max(1);
    let opposing_size: usize = teams
        .iter()
        .filter(|(team_ref, _)| **team_ref != victim_team)
        .map(|(_, members)| members.len())
        .sum();

    let threshold = if opposing_size >= 4 * victim_team_size {
        75.0
    } else if opposing_size == 4 && victim_team_size == 2 {
        50.0
    } else {
        25.0
    };

    let damage_by_team = damage_by_team(engagement);
    let resistance = damage_by_team.get(&victim_team).copied().unwrap_or(0.0);

    if resistance >= threshold {
        Some(FightReason::SingleInstantKillWithResistance)
    } else {
        None
    }
}

fn classify_reciprocal_damage(engagement: &Engagement) -> Option<FightReason> {
    let damage_by_team = damage_by_team(engagement);
    let combined: f64 = damage_by_team.values().sum();
    if combined < RECIPROCAL_MIN_COMBINED_DAMAGE {
        return None;
    }
    let every_side_contributed = damage_by_team.values().all(|share| *share / combined >= RECIPROCAL_MIN_SHARE);
    if damage_by_team.len() >= 2 && every_side_contributed {
        Some(FightReason::ReciprocalDamage)
    } else {
        None
    }
}

fn classify_single_knock(engagement: &Engagement) -> Option<FightReason> {
    let damage_by_team = damage_by_team(engagement);
    if damage_by_team.len() >= 2 && damage_by_team.values().all(|total| *total >= SINGLE_KNOCK_MIN_SIDE_DAMAGE) {
        Some(FightReason::SingleKnockWithReturnFire)
    } else {
        None
    }
}
