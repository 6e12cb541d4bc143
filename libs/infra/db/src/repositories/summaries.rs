// [libs/infra/db/src/repositories/summaries.rs]
//! Per-participant summary rows (spec §4.7, §8 "Participant uniqueness").

use sqlx::PgPool;

use skirmish_domain_models::MatchParticipant;

use crate::errors::DbError;

const UPSERT: &str = r#"
    INSERT INTO match_summaries (
        match_id, participant_id, player_name, team_id, team_rank, won,
        kills, assists, damage_dealt, dbnos, time_survived, walk_distance,
        ride_distance
    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
    ON CONFLICT (match_id, participant_id) DO NOTHING
"#;

const UPDATE_ENHANCED_COLUMNS: &str = r#"
    UPDATE match_summaries SET
        killsteals = $3, heals_used = $4, boosts_used = $5,
        throwables_used = $6, smokes_thrown = $7, throwable_damage = $8,
        damage_received = $9, mean_distance_from_circle_center = $10,
        mean_distance_from_circle_edge = $11, mean_time_in_zone_fraction = $12
    WHERE match_id = $1 AND participant_id = $2
"#;

pub struct SummaryRepository {
    pool: PgPool,
}

impl SummaryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Bulk-insert with `ON CONFLICT DO NOTHING` (spec §4.7 step 7,
    /// §8 "Participant uniqueness", no duplicate rows regardless of retries).
    pub async fn bulk_insert(
        &self,
        match_id: &str,
        participants: &[MatchParticipant],
    ) -> Result<(), DbError> {
        for p in participants {
            sqlx::query(UPSERT)
                .bind(match_id)
                .bind(&p.participant_id)
                .bind(&p.player_name)
                .bind(p.team_id)
                .bind(p.team_rank)
                .bind(p.won)
                .bind(p.kills)
                .bind(p.assists)
                .bind(p.damage_dealt)
                .bind(p.dbnos)
                .bind(p.time_survived)
                .bind(p.walk_distance)
                .bind(p.ride_distance)
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }

    /// Phase-3 roll-up columns (spec §4.9 Phase 3).
    pub async fn update_enhanced_columns(
        &self,
        match_id: &str,
        participant_id: &str,
        p: &MatchParticipant,
    ) -> Result<(), DbError> {
        sqlx::query(UPDATE_ENHANCED_COLUMNS)
            .bind(match_id)
            .bind(participant_id)
            .bind(p.killsteals)
            .bind(p.heals_used)
            .bind(p.boosts_used)
            .bind(p.throwables_used)
            .bind(p.smokes_thrown)
            .bind(p.throwable_damage)
            .bind(p.damage_received)
            .bind(p.mean_distance_from_circle_center)
            .bind(p.mean_distance_from_circle_edge)
            .bind(p.mean_time_in_zone_fraction)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Reloads every participant row for a match. Used both as the
    /// processing pipeline's starting point, before the enhanced columns
    /// below are populated (spec §4.9 "loads the match's summary rows"),
    /// and by the aggregator afterward to read them back (spec §4.11). The
    /// columns simply carry their `DEFAULT 0` until Phase 3 writes them.
    pub async fn fetch_by_match(&self, match_id: &str) -> Result<Vec<MatchParticipant>, DbError> {
        let rows = sqlx::query_as::<_, (
            String, String, i32, i32, bool, i32, i32, i32, f64, f64, f64, i32, f64, f64,
        )>(
            r#"SELECT participant_id, player_name, team_id, team_rank, won,
                      kills, assists, dbnos, damage_dealt, time_survived,
                      walk_distance, killsteals, throwable_damage, damage_received
               FROM match_summaries WHERE match_id = $1"#,
        )
        .bind(match_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(
                |(
                    participant_id,
                    player_name,
                    team_id,
                    team_rank,
                    won,
                    kills,
                    assists,
                    dbnos,
                    damage_dealt,
                    time_survived,
                    walk_distance,
                    killsteals,
                    throwable_damage,
                    damage_received,
                )| MatchParticipant {
                    match_id: match_id.to_string(),
                    participant_id,
                    player_name,
                    team_id,
                    team_rank,
                    won,
                    kills,
                    assists,
                    dbnos,
                    damage_dealt,
                    time_survived,
                    walk_distance,
                    killsteals,
                    throwable_damage,
                    damage_received,
                    ..MatchParticipant::default()
                },
            )
            .collect())
    }

    pub async fn existing_count(&self, match_id: &str) -> Result<i64, DbError> {
        let row: (i64,) = sqlx::query_as(
            "SELECT count(*) FROM match_summaries WHERE match_id = $1",
        )
        .bind(match_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.0)
    }
}
