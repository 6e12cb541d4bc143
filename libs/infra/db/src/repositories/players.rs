// [libs/infra/db/src/repositories/players.rs]
//! Tracked-player roster (spec §3 "TrackedPlayer", §4.5 "fetches up to K
//! tracked players").

use sqlx::{PgPool, Row};

use skirmish_domain_models::{Platform, TrackedPlayer};

use crate::errors::DbError;

pub struct PlayerRepository {
    pool: PgPool,
}

impl PlayerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Up to `limit` tracking-enabled players, for the main discovery
    /// service's per-run sample (spec §4.5 step 1).
    pub async fn fetch_tracked(&self, limit: i64) -> Result<Vec<TrackedPlayer>, DbError> {
        let rows = sqlx::query(
            "SELECT player_id, player_name, platform, tracking_enabled FROM players
             WHERE tracking_enabled = TRUE ORDER BY player_id LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(TrackedPlayer {
                    player_id: row.try_get("player_id")?,
                    player_name: row.try_get("player_name")?,
                    platform: parse_platform(row.try_get::<String, _>("platform")?.as_str())?,
                    tracking_enabled: row.try_get("tracking_enabled")?,
                })
            })
            .collect()
    }

    /// Registers a new tracked player and schedules its backfill window in
    /// the same call site's transaction boundary (the caller invokes
    /// `CareerRepository::schedule_backfill` alongside this, spec §6
    /// `player_backfill_status`).
    pub async fn upsert(&self, player: &TrackedPlayer) -> Result<(), DbError> {
        sqlx::query(
            r#"INSERT INTO players (player_id, player_name, platform, tracking_enabled)
               VALUES ($1, $2, $3, $4)
               ON CONFLICT (player_id) DO UPDATE SET
                   player_name = EXCLUDED.player_name,
                   platform = EXCLUDED.platform,
                   tracking_enabled = EXCLUDED.tracking_enabled"#,
        )
        .bind(&player.player_id)
        .bind(&player.player_name)
        .bind(player.platform.to_string())
        .bind(player.tracking_enabled)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

fn parse_platform(raw: &str) -> Result<Platform, DbError> {
    match raw {
        "steam" => Ok(Platform::Steam),
        "psn" => Ok(Platform::Psn),
        "xbox" => Ok(Platform::Xbox),
        "kakao" => Ok(Platform::Kakao),
        "stadia" => Ok(Platform::Stadia),
        other => Err(DbError::MappingError(format!("unknown platform {other}"))),
    }
}
