// [libs/infra/db/src/repositories/ledger/mod.rs]
/*!
 * =================================================================
 * APARATO: MATCH LEDGER REPOSITORY
 * RESPONSABILIDAD: INSERCION RACE-SAFE Y TRANSICIONES DE ETAPA
 * =================================================================
 *
 * The ledger is the only shared cross-worker mutable state (spec §5).
 * Every write here is a single-statement upsert or flag flip; there are
 * no long-lived transactions and no read-modify-write races.
 */

pub mod queries;

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use skirmish_domain_models::{
    DiscoveredBy, DiscoveryPriority, InsertOutcome, MatchRow, MatchStatus, NewMatch,
    ProcessingFlags, ValidationStatus,
};

use crate::errors::DbError;
use self::queries as sql;

pub struct LedgerRepository {
    pool: PgPool,
}

impl LedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// First-writer-wins insertion (spec §4.3, §8 "Ledger uniqueness").
    pub async fn insert_if_not_exists(&self, new_match: &NewMatch) -> Result<InsertOutcome, DbError> {
        let result = sqlx::query(sql::INSERT_IF_NOT_EXISTS)
            .bind(&new_match.match_id)
            .bind(&new_match.map_name)
            .bind(&new_match.game_mode)
            .bind(&new_match.game_type)
            .bind(new_match.match_datetime)
            .bind(new_match.duration)
            .bind(&new_match.telemetry_url)
            .bind(discovered_by_str(new_match.discovered_by))
            .bind(discovery_priority_str(new_match.discovery_priority))
            .execute(&self.pool)
            .await?;

        Ok(if result.rows_affected() == 1 {
            InsertOutcome::Inserted
        } else {
            InsertOutcome::AlreadyExists
        })
    }

    /// Minimal placeholder row for a match that failed before its detail
    /// could be fetched (spec §4.5 "it inserts a minimal row marked failed").
    pub async fn insert_failed_placeholder(
        &self,
        match_id: &str,
        match_datetime: DateTime<Utc>,
        error_message: &str,
        discovered_by: DiscoveredBy,
        discovery_priority: DiscoveryPriority,
    ) -> Result<InsertOutcome, DbError> {
        let result = sqlx::query(sql::INSERT_FAILED_PLACEHOLDER)
            .bind(match_id)
            .bind(match_datetime)
            .bind(error_message)
            .bind(discovered_by_str(discovered_by))
            .bind(discovery_priority_str(discovery_priority))
            .execute(&self.pool)
            .await?;

        Ok(if result.rows_affected() == 1 {
            InsertOutcome::Inserted
        } else {
            InsertOutcome::AlreadyExists
        })
    }

    pub async fn find_by_id(&self, match_id: &str) -> Result<Option<MatchRow>, DbError> {
        let row = sqlx::query(sql::FIND_BY_ID)
            .bind(match_id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(row_to_match).transpose()
    }

    pub async fn mark_failed(&self, match_id: &str, error_message: &str) -> Result<(), DbError> {
        sqlx::query(sql::MARK_FAILED)
            .bind(match_id)
            .bind(error_message)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn set_status(&self, match_id: &str, status: MatchStatus) -> Result<(), DbError> {
        sqlx::query(sql::SET_STATUS)
            .bind(match_id)
            .bind(status_str(status))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn set_telemetry_url(&self, match_id: &str, url: &str) -> Result<(), DbError> {
        sqlx::query(sql::SET_TELEMETRY_URL)
            .bind(match_id)
            .bind(url)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn flip(&self, statement: &str, match_id: &str) -> Result<bool, DbError> {
        let result = sqlx::query(statement)
            .bind(match_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() == 1)
    }

    pub async fn flip_summaries_processed(&self, match_id: &str) -> Result<bool, DbError> {
        self.flip(sql::FLIP_SUMMARIES_PROCESSED, match_id).await
    }
    pub async fn flip_telemetry_downloaded(&self, match_id: &str) -> Result<bool, DbError> {
        self.flip(sql::FLIP_TELEMETRY_DOWNLOADED, match_id).await
    }
    pub async fn flip_landings_processed(&self, match_id: &str) -> Result<bool, DbError> {
        self.flip(sql::FLIP_LANDINGS_PROCESSED, match_id).await
    }
    pub async fn flip_kills_processed(&self, match_id: &str) -> Result<bool, DbError> {
        self.flip(sql::FLIP_KILLS_PROCESSED, match_id).await
    }
    pub async fn flip_circles_processed(&self, match_id: &str) -> Result<bool, DbError> {
        self.flip(sql::FLIP_CIRCLES_PROCESSED, match_id).await
    }
    pub async fn flip_weapons_processed(&self, match_id: &str) -> Result<bool, DbError> {
        self.flip(sql::FLIP_WEAPONS_PROCESSED, match_id).await
    }
    pub async fn flip_damage_processed(&self, match_id: &str) -> Result<bool, DbError> {
        self.flip(sql::FLIP_DAMAGE_PROCESSED, match_id).await
    }
    pub async fn flip_finishing_processed(&self, match_id: &str) -> Result<bool, DbError> {
        self.flip(sql::FLIP_FINISHING_PROCESSED, match_id).await
    }
    pub async fn flip_fights_processed(&self, match_id: &str) -> Result<bool, DbError> {
        self.flip(sql::FLIP_FIGHTS_PROCESSED, match_id).await
    }

    pub async fn mark_stats_aggregated(&self, match_id: &str) -> Result<(), DbError> {
        sqlx::query(sql::MARK_STATS_AGGREGATED)
            .bind(match_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Resets the flag so the aggregator will pick the match up again
    /// (spec §4.11 "Backfills are performed by the same code path").
    pub async fn reset_stats_aggregated(&self, match_id: &str) -> Result<(), DbError> {
        sqlx::query(sql::RESET_STATS_AGGREGATED_FOR_BACKFILL)
            .bind(match_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn set_tournament_context(
        &self,
        match_id: &str,
        is_tournament_match: bool,
        validation_status: ValidationStatus,
        team_count: i32,
        unmatched_player_count: i32,
        round_ref: Option<&str>,
        schedule_slot_ref: Option<&str>,
    ) -> Result<(), DbError> {
        sqlx::query(sql::SET_TOURNAMENT_CONTEXT)
            .bind(match_id)
            .bind(is_tournament_match)
            .bind(validation_status_str(validation_status))
            .bind(team_count)
            .bind(unmatched_player_count)
            .bind(round_ref)
            .bind(schedule_slot_ref)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn fetch_pending_aggregation(&self, limit: i64) -> Result<Vec<String>, DbError> {
        let rows = sqlx::query(sql::FETCH_PENDING_AGGREGATION)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(|r| r.get::<String, _>("match_id")).collect())
    }

    /// Finds every completed match a player appears in within the backfill
    /// window, so the aggregator can re-run them (spec §4.11 "Backfills are
    /// performed by the same code path with `stats_aggregated` reset").
    pub async fn fetch_match_ids_for_backfill(
        &self,
        player_name: &str,
        window_days: i32,
    ) -> Result<Vec<String>, DbError> {
        let rows = sqlx::query(sql::FETCH_MATCH_IDS_FOR_BACKFILL)
            .bind(player_name)
            .bind(window_days)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(|r| r.get::<String, _>("match_id")).collect())
    }
}

fn discovered_by_str(v: DiscoveredBy) -> &'static str {
    match v {
        DiscoveredBy::Main => "main",
        DiscoveredBy::Tournament => "tournament",
    }
}

fn discovery_priority_str(v: DiscoveryPriority) -> &'static str {
    match v {
        DiscoveryPriority::Normal => "normal",
        DiscoveryPriority::High => "high",
    }
}

fn status_str(v: MatchStatus) -> &'static str {
    match v {
        MatchStatus::Discovered => "discovered",
        MatchStatus::Processing => "processing",
        MatchStatus::Complete => "complete",
        MatchStatus::Failed => "failed",
    }
}

fn validation_status_str(v: ValidationStatus) -> &'static str {
    match v {
        ValidationStatus::Confirmed => "confirmed",
        ValidationStatus::Unscheduled => "unscheduled",
        ValidationStatus::RemakeCandidate => "remake_candidate",
        ValidationStatus::MixedDivision => "mixed_division",
        ValidationStatus::NotTournamentMatch => "not_tournament",
    }
}

fn parse_status(raw: &str) -> Result<MatchStatus, DbError> {
    match raw {
        "discovered" => Ok(MatchStatus::Discovered),
        "processing" => Ok(MatchStatus::Processing),
        "complete" => Ok(MatchStatus::Complete),
        "failed" => Ok(MatchStatus::Failed),
        other => Err(DbError::MappingError(format!("unknown match status {other}"))),
    }
}

fn parse_discovered_by(raw: &str) -> Result<DiscoveredBy, DbError> {
    match raw {
        "main" => Ok(DiscoveredBy::Main),
        "tournament" => Ok(DiscoveredBy::Tournament),
        other => Err(DbError::MappingError(format!("unknown discovered_by {other}"))),
    }
}

fn parse_priority(raw: &str) -> Result<DiscoveryPriority, DbError> {
    match raw {
        "normal" => Ok(DiscoveryPriority::Normal),
        "high" => Ok(DiscoveryPriority::High),
        other => Err(DbError::MappingError(format!("unknown discovery_priority {other}"))),
    }
}

fn parse_validation_status(raw: &str) -> Result<ValidationStatus, DbError> {
    match raw {
        "confirmed" => Ok(ValidationStatus::Confirmed),
        "unscheduled" => Ok(ValidationStatus::Unscheduled),
        "remake_candidate" => Ok(ValidationStatus::RemakeCandidate),
        "mixed_division" => Ok(ValidationStatus::MixedDivision),
        "not_tournament" => Ok(ValidationStatus::NotTournamentMatch),
        other => Err(DbError::MappingError(format!("unknown validation_status {other}"))),
    }
}

fn row_to_match(row: sqlx::postgres::PgRow) -> Result<MatchRow, DbError> {
    Ok(MatchRow {
        match_id: row.try_get("match_id")?,
        map_name: row.try_get("map_name")?,
        game_mode: row.try_get("game_mode")?,
        game_type: row.try_get("game_type")?,
        match_datetime: row.try_get("match_datetime")?,
        duration: row.try_get("duration")?,
        telemetry_url: row.try_get("telemetry_url")?,
        status: parse_status(row.try_get::<String, _>("status")?.as_str())?,
        error_message: row.try_get("error_message")?,
        is_tournament_match: row.try_get("is_tournament_match")?,
        discovered_by: parse_discovered_by(row.try_get::<String, _>("discovered_by")?.as_str())?,
        discovery_priority: parse_priority(row.try_get::<String, _>("discovery_priority")?.as_str())?,
        round_ref: row.try_get("round_ref")?,
        schedule_slot_ref: row.try_get("schedule_slot_ref")?,
        validation_status: parse_validation_status(
            row.try_get::<String, _>("validation_status")?.as_str(),
        )?,
        team_count: row.try_get("team_count")?,
        unmatched_player_count: row.try_get("unmatched_player_count")?,
        flags: ProcessingFlags {
            summaries_processed: row.try_get("summaries_processed")?,
            telemetry_downloaded: row.try_get("telemetry_downloaded")?,
            landings_processed: row.try_get("landings_processed")?,
            kills_processed: row.try_get("kills_processed")?,
            circles_processed: row.try_get("circles_processed")?,
            weapons_processed: row.try_get("weapons_processed")?,
            damage_processed: row.try_get("damage_processed")?,
            finishing_processed: row.try_get("finishing_processed")?,
            fights_processed: row.try_get("fights_processed")?,
            stats_aggregated: row.try_get("stats_aggregated")?,
        },
        stats_aggregated_at: row.try_get("stats_aggregated_at")?,
    })
}
