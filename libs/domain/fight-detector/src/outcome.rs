// [libs/domain/fight-detector/src/outcome.rs]
//! Two-team vs. third-party outcome assignment (spec §4.10 "Outcome
//! assignment").

use std::collections::{HashMap, HashSet};

use skirmish_domain_models::{FightOutcome, TeamOutcome};

use crate::clustering::Engagement;
use crate::events::CombatEventKind;

pub struct OutcomeAssignment {
    pub outcome: FightOutcome,
    pub winning_team: Option<i32>,
    pub losing_team: Option<i32>,
    pub team_outcomes: HashMap<i32, TeamOutcome>,
}

fn team_members(engagement: &Engagement) -> HashMap<i32, HashSet<&str>> {
    let mut teams: HashMap<i32, HashSet<&str>> = HashMap::new();
    for event in &engagement.events {
        teams.entry(event.victim.team_ref).or_default().insert(event.victim.name.as_str());
        if let Some(attacker) = &event.attacker {
            teams.entry(attacker.team_ref).or_default().insert(attacker.name.as_str());
        }
    }
    teams
}

fn deaths_by_team(engagement: &Engagement) -> HashMap<i32, HashSet<&str>> {
    let mut deaths: HashMap<i32, HashSet<&str>> = HashMap::new();
    for event in &engagement.events {
        if event.kind == CombatEventKind::Kill {
            deaths.entry(event.victim.team_ref).or_default().insert(event.victim.name.as_str());
        }
    }
    deaths
}

fn knocks_by_team(engagement: &Engagement) -> HashMap<i32, u32> {
    let mut knocks: HashMap<i32, u32> = HashMap::new();
    for event in &engagement.events {
        if event.kind == CombatEventKind::Knock {
            if let Some(attacker) = &event.attacker {
                *knocks.entry(attacker.team_ref).or_default() += 1;
            }
        }
    }
    knocks
}

fn kills_by_team(engagement: &Engagement) -> HashMap<i32, u32> {
    let mut kills: HashMap<i32, u32> = HashMap::new();
    for event in &engagement.events {
        if event.kind == CombatEventKind::Kill {
            if let Some(attacker) = &event.attacker {
                *kills.entry(attacker.team_ref).or_default() += 1;
            }
        }
    }
    kills
}

fn damage_by_team(engagement: &Engagement) -> HashMap<i32, f64> {
    let mut totals: HashMap<i32, f64> = HashMap::new();
    for event in &engagement.events {
        if event.kind == CombatEventKind::Damage {
            if let Some(attacker) = &event.attacker {
                *totals.entry(attacker.team_ref).or_default() += event.damage;
            }
        }
    }
    totals
}

pub fn assign_outcome(engagement: &Engagement) -> OutcomeAssignment {
    let members = team_members(engagement);
    let deaths = deaths_by_team(engagement);

    if members.len() <= 2 {
        return assign_two_team_outcome(&members, &deaths);
    }

    assign_third_party_outcome(engagement, &members, &deaths)
}

fn assign_two_team_outcome(
    members: &HashMap<i32, HashSet<&str>>,
    deaths: &HashMap<i32, HashSet<&str>>,
) -> OutcomeAssignment {
    let mut teams: Vec<i32> = members.keys().copied().collect();
    teams.sort();

    if teams.len() < 2 {
        let team_outcomes = teams.iter().map(|t| (*t, TeamOutcome::Draw)).collect();
        return OutcomeAssignment { outcome: FightOutcome::Draw, winning_team: None, losing_team: None, team_outcomes };
    }

    let (team_a, team_b) = (teams[0], teams[1]);
    let deaths_a = deaths.get(&team_a).map(|s| s.len()).unwrap_or(0);
    let deaths_b = deaths.get(&team_b).map(|s| s.len()).unwrap_or(0);
    let size_a = members.get(&team_a).map(|s| s.len()).unwrap_or(0);
    let size_b = members.get(&team_b).map(|s| s.len()).unwrap_or(0);

    let a_wiped = size_a > 0 && deaths_a >= size_a;
    let b_wiped = size_b > 0 && deaths_b >= size_b;
    let diff = (deaths_a as i32 - deaths_b as i32).abs();
    let total_deaths = deaths_a + deaths_b;

    let (outcome, winner, loser) = if a_wiped && !b_wiped {
        (FightOutcome::DecisiveWin, Some(team_b), Some(team_a))
    } else if b_wiped && !a_wiped {
        (FightOutcome::DecisiveWin, Some(team_a), Some(team_b))
    } else if diff >= 2 {
        if deaths_a < deaths_b {
            (FightOutcome::DecisiveWin, Some(team_a), Some(team_b))
        } else {
            (FightOutcome::DecisiveWin, Some(team_b), Some(team_a))
        }
    } else if diff == 1 && total_deaths >= 2 {
        if deaths_a < deaths_b {
            (FightOutcome::MarginalWin, Some(team_a), Some(team_b))
        } else {
            (FightOutcome::MarginalWin, Some(team_b), Some(team_a))
        }
    } else {
        (FightOutcome::Draw, None, None)
    };

    let mut team_outcomes = HashMap::new();
    match (winner, loser) {
        (Some(w), Some(l)) => {
            team_outcomes.insert(w, TeamOutcome::Won);
            team_outcomes.insert(l, TeamOutcome::Lost);
        }
        _ => {
            team_outcomes.insert(team_a, TeamOutcome::Draw);
            team_outcomes.insert(team_b, TeamOutcome::Draw);
        }
    }

    OutcomeAssignment { outcome, winning_team: winner, losing_team: loser, team_outcomes }
}

/// Picks the team maximizing `score` among `candidates`, in ascending
/// `team_ref` order, with a `<=` replacement test so the lowest `team_ref`
/// wins ties deterministically regardless of `HashMap` iteration order.
fn pick_max_by<K: Ord + Copy, S: PartialOrd>(
    candidates: impl Iterator<Item = K>,
    score: impl Fn(K) -> S,
) -> Option<K> {
    let mut sorted: Vec<K> = candidates.collect();
    sorted.sort();
    sorted.into_iter().fold(None, |best: Option<(K, S)>, candidate| {
        let candidate_score = score(candidate);
        match best {
            Some((_, ref best_score)) if candidate_score <= *best_score => best,
            _ => Some((candidate, candidate_score)),
        }
    }).map(|(candidate, _)| candidate)
}

fn assign_third_party_outcome(
    engagement: &Engagement,
    members: &HashMap<i32, HashSet<&str>>,
    deaths: &HashMap<i32, HashSet<&str>>,
) -> OutcomeAssignment {
    let kills = kills_by_team(engagement);
    let knocks = knocks_by_team(engagement);
    let damage = damage_by_team(engagement);

    let winner = pick_max_by(members.keys().copied(), |team_ref| {
        (
            kills.get(&team_ref).copied().unwrap_or(0),
            knocks.get(&team_ref).copied().unwrap_or(0),
            damage.get(&team_ref).copied().unwrap_or(0.0),
        )
    });

    // Excludes the winner so a team that ties for both most kills and most
    // deaths never ends up recorded as both Won and Lost (spec §8).
    let loser = pick_max_by(members.keys().copied().filter(|team_ref| Some(*team_ref) != winner), |team_ref| {
        deaths.get(&team_ref).map(|s| s.len()).unwrap_or(0)
    });

    let mut team_outcomes = HashMap::new();
    for team_ref in members.keys() {
        let verdict = if Some(*team_ref) == winner {
            TeamOutcome::Won
        } else if Some(*team_ref) == loser {
            TeamOutcome::Lost
        } else {
            TeamOutcome::Draw
        };
        team_outcomes.insert(*team_ref, verdict);
    }

    OutcomeAssignment { outcome: FightOutcome::ThirdParty, winning_team: winner, losing_team: loser, team_outcomes }
}
