// [libs/infra/db/src/repositories/tournament.rs]
//! Tournament roster, team and scheduling tables (spec §3, §4.6, §6).

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use skirmish_domain_models::{ScheduledMatch, Team, TournamentRosterEntry, TournamentRound};

use crate::errors::DbError;

pub struct TournamentRepository {
    pool: PgPool,
}

impl TournamentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Stratified sample source: active, primary-sample, preferred
    /// rosters ordered by ascending `sample_priority` (spec §4.6 step 1).
    pub async fn stratified_sample(
        &self,
        division: &str,
        group_name: Option<&str>,
        limit: i32,
    ) -> Result<Vec<TournamentRosterEntry>, DbError> {
        let rows = sqlx::query(
            r#"SELECT tp.player_name, tp.team_ref, tp.preferred_team,
                      tp.primary_sample, tp.sample_priority, tp.active
               FROM tournament_players tp
               JOIN teams t ON t.team_ref = tp.team_ref
               WHERE t.division = $1
                 AND (t.group_name = $2 OR ($2 IS NULL AND t.group_name IS NULL))
                 AND tp.primary_sample = TRUE AND tp.active = TRUE AND tp.preferred_team = TRUE
               ORDER BY tp.sample_priority ASC
               LIMIT $3"#,
        )
        .bind(division)
        .bind(group_name)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(TournamentRosterEntry {
                    player_name: row.try_get("player_name")?,
                    team_ref: row.try_get("team_ref")?,
                    preferred_team: row.try_get("preferred_team")?,
                    primary_sample: row.try_get("primary_sample")?,
                    sample_priority: row.try_get("sample_priority")?,
                    active: row.try_get("active")?,
                })
            })
            .collect()
    }

    pub async fn list_active_lobbies(&self) -> Result<Vec<(String, Option<String>)>, DbError> {
        let rows = sqlx::query(
            "SELECT DISTINCT division, group_name FROM teams WHERE active = TRUE",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter()
            .map(|row| Ok((row.try_get("division")?, row.try_get("group_name")?)))
            .collect()
    }

    pub async fn find_team_by_ref(&self, team_ref: &str) -> Result<Option<Team>, DbError> {
        let row = sqlx::query(
            "SELECT team_ref, team_name, division, group_name, team_number, active FROM teams WHERE team_ref = $1",
        )
        .bind(team_ref)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|row| {
            Ok(Team {
                team_ref: row.try_get("team_ref")?,
                team_name: row.try_get("team_name")?,
                division: row.try_get("division")?,
                group_name: row.try_get("group_name")?,
                team_number: row.try_get("team_number")?,
                active: row.try_get("active")?,
            })
        })
        .transpose()
    }

    /// Resolves the round whose `[start_date, end_date]` window contains
    /// `match_datetime` for the given (division, group), spec §4.3 step 5.
    pub async fn find_round_for_datetime(
        &self,
        division: &str,
        group_name: Option<&str>,
        match_datetime: DateTime<Utc>,
    ) -> Result<Option<TournamentRound>, DbError> {
        let row = sqlx::query(
            r#"SELECT round_ref, division, group_name, start_date, end_date
               FROM tournament_rounds
               WHERE division = $1
                 AND (group_name = $2 OR ($2 IS NULL AND group_name IS NULL))
                 AND start_date <= $3 AND end_date >= $3
               LIMIT 1"#,
        )
        .bind(division)
        .bind(group_name)
        .bind(match_datetime)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|row| {
            Ok(TournamentRound {
                round_ref: row.try_get("round_ref")?,
                division: row.try_get("division")?,
                group_name: row.try_get("group_name")?,
                start_date: row.try_get("start_date")?,
                end_date: row.try_get("end_date")?,
            })
        })
        .transpose()
    }

    /// Joins `player_name ∈ names` against the active roster and its team,
    /// preferring each player's preferred team when they sit on more than
    /// one (spec §4.3 step 1 "Intersect participant names with the active
    /// roster").
    pub async fn active_roster_for_players(
        &self,
        player_names: &[String],
    ) -> Result<Vec<(String, Team)>, DbError> {
        if player_names.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query(
            r#"SELECT tp.player_name, t.team_ref, t.team_name, t.division, t.group_name,
                      t.team_number, t.active
               FROM tournament_players tp
               JOIN teams t ON t.team_ref = tp.team_ref
               WHERE tp.active = TRUE AND t.active = TRUE
                 AND tp.player_name = ANY($1)
               ORDER BY tp.preferred_team DESC"#,
        )
        .bind(player_names)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok((
                    row.try_get::<String, _>("player_name")?,
                    Team {
                        team_ref: row.try_get("team_ref")?,
                        team_name: row.try_get("team_name")?,
                        division: row.try_get("division")?,
                        group_name: row.try_get("group_name")?,
                        team_number: row.try_get("team_number")?,
                        active: row.try_get("active")?,
                    },
                ))
            })
            .collect()
    }

    /// Candidate scheduled slots for a round, used by §4.3 step 6's
    /// closest-time/same-map binding.
    pub async fn scheduled_matches_for_round(
        &self,
        round_ref: &str,
    ) -> Result<Vec<ScheduledMatch>, DbError> {
        let rows = sqlx::query(
            "SELECT schedule_slot_ref, round_ref, scheduled_datetime, map_name FROM tournament_scheduled_matches WHERE round_ref = $1",
        )
        .bind(round_ref)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter()
            .map(|row| {
                Ok(ScheduledMatch {
                    schedule_slot_ref: row.try_get("schedule_slot_ref")?,
                    round_ref: row.try_get("round_ref")?,
                    scheduled_datetime: row.try_get("scheduled_datetime")?,
                    map_name: row.try_get("map_name")?,
                })
            })
            .collect()
    }
}
