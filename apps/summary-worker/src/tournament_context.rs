// [apps/summary-worker/src/tournament_context.rs]
//! Tournament context assignment (spec §4.3): given a match's participant
//! names and its datetime, decides whether the match belongs to exactly
//! one tracked (division, group) lobby and, if so, binds it to a round
//! and scheduled slot. Lives here rather than in either discovery service
//! because only the full participant list lets it validate strictly.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};

use skirmish_domain_models::{Team, TournamentContext, ValidationStatus};
use skirmish_infra_db::{DbError, TournamentRepository};

/// A scheduled slot more than this far from the match's actual start is
/// not considered a match, even on the same map (spec §4.3 step 6
/// "closest time within a small tolerance").
const SCHEDULE_SLOT_TOLERANCE: Duration = Duration::hours(3);

/// Minimum distinct teams among matched roster members for a match to be
/// treated as a real tournament match rather than a scrim/remake (spec
/// §4.3 step 4).
const MIN_TEAM_COUNT: usize = 8;

pub async fn resolve_tournament_context(
    tournaments: &TournamentRepository,
    participant_names: &[String],
    match_datetime: DateTime<Utc>,
    map_name: &str,
) -> Result<TournamentContext, DbError> {
    let matched = tournaments.active_roster_for_players(participant_names).await?;
    let unmatched_count = (participant_names.len() as i32) - (distinct_player_count(&matched) as i32);

    let mut by_player: HashMap<&str, &Team> = HashMap::new();
    for (player_name, team) in &matched {
        by_player.entry(player_name.as_str()).or_insert(team);
    }

    let lobby_pairs: HashSet<(&str, Option<&str>)> = by_player
        .values()
        .map(|team| (team.division.as_str(), team.group_name.as_deref()))
        .collect();

    if lobby_pairs.len() != 1 {
        return Ok(TournamentContext::mixed_division());
    }

    let (division, group_name) = *lobby_pairs.iter().next().expect("checked len == 1");
    let division = division.to_string();
    let group_name = group_name.map(str::to_string);

    let team_count = by_player.values().map(|team| team.team_ref.as_str()).collect::<HashSet<_>>().len();

    if team_count < MIN_TEAM_COUNT {
        return Ok(TournamentContext {
            is_tournament_match: false,
            validation_status: ValidationStatus::RemakeCandidate,
            round_ref: None,
            schedule_slot_ref: None,
            team_count: team_count as i32,
            unmatched_player_count: unmatched_count,
        });
    }

    let round = tournaments
        .find_round_for_datetime(&division, group_name.as_deref(), match_datetime)
        .await?;

    let Some(round) = round else {
        return Ok(TournamentContext {
            is_tournament_match: true,
            validation_status: ValidationStatus::Unscheduled,
            round_ref: None,
            schedule_slot_ref: None,
            team_count: team_count as i32,
            unmatched_player_count: unmatched_count,
        });
    };

    let tolerance_seconds = SCHEDULE_SLOT_TOLERANCE.num_seconds();
    let candidates = tournaments.scheduled_matches_for_round(&round.round_ref).await?;
    let slot = candidates
        .into_iter()
        .filter(|slot| slot.map_name == map_name)
        .map(|slot| {
            let offset = (slot.scheduled_datetime - match_datetime).num_seconds().abs();
            (slot, offset)
        })
        .filter(|(_, offset)| *offset <= tolerance_seconds)
        .min_by_key(|(_, offset)| *offset)
        .map(|(slot, _)| slot);

    match slot {
        Some(slot) => Ok(TournamentContext {
            is_tournament_match: true,
            validation_status: ValidationStatus::Confirmed,
            round_ref: Some(round.round_ref),
            schedule_slot_ref: Some(slot.schedule_slot_ref),
            team_count: team_count as i32,
            unmatched_player_count: unmatched_count,
        }),
        None => Ok(TournamentContext {
            is_tournament_match: true,
            validation_status: ValidationStatus::Unscheduled,
            round_ref: Some(round.round_ref),
            schedule_slot_ref: None,
            team_count: team_count as i32,
            unmatched_player_count: unmatched_count,
        }),
    }
}

fn distinct_player_count(matched: &[(String, Team)]) -> usize {
    matched.iter().map(|(name, _)| name.as_str()).collect::<HashSet<_>>().len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_window_accepts_small_offsets_and_rejects_large_ones() {
        let tolerance_seconds = SCHEDULE_SLOT_TOLERANCE.num_seconds();
        assert!(Duration::minutes(45).num_seconds().abs() <= tolerance_seconds);
        assert!(Duration::hours(6).num_seconds().abs() > tolerance_seconds);
    }
}
