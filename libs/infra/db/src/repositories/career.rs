// [libs/infra/db/src/repositories/career.rs]
//! Career aggregate tables (spec §3 "Career Aggregate Rows", §4.11), the
//! backfill-status table, and the combatability materialized view refresh.

use sqlx::{PgPool, Row};

use crate::errors::DbError;

pub struct CareerRepository {
    pool: PgPool,
}

impl CareerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn accumulate_damage_stats(
        &self,
        player_name: &str,
        match_type_class: &str,
        damage_dealt: f64,
        damage_received: f64,
        throwable_damage: f64,
    ) -> Result<(), DbError> {
        sqlx::query(
            r#"INSERT INTO player_damage_stats (
                player_name, match_type_class, total_damage_dealt,
                total_damage_received, total_throwable_damage, matches_counted
            ) VALUES ($1, $2, $3, $4, $5, 1)
            ON CONFLICT (player_name, match_type_class) DO UPDATE SET
                total_damage_dealt = player_damage_stats.total_damage_dealt + EXCLUDED.total_damage_dealt,
                total_damage_received = player_damage_stats.total_damage_received + EXCLUDED.total_damage_received,
                total_throwable_damage = player_damage_stats.total_throwable_damage + EXCLUDED.total_throwable_damage,
                matches_counted = player_damage_stats.matches_counted + 1"#,
        )
        .bind(player_name)
        .bind(match_type_class)
        .bind(damage_dealt)
        .bind(damage_received)
        .bind(throwable_damage)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn accumulate_weapon_stats(
        &self,
        player_name: &str,
        match_type_class: &str,
        weapon_category: &str,
        kills: i32,
        knocks: i32,
        damage: f64,
    ) -> Result<(), DbError> {
        sqlx::query(
            r#"INSERT INTO player_weapon_stats (
                player_name, match_type_class, weapon_category, kills, knocks, damage
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (player_name, match_type_class, weapon_category) DO UPDATE SET
                kills = player_weapon_stats.kills + EXCLUDED.kills,
                knocks = player_weapon_stats.knocks + EXCLUDED.knocks,
                damage = player_weapon_stats.damage + EXCLUDED.damage"#,
        )
        .bind(player_name)
        .bind(match_type_class)
        .bind(weapon_category)
        .bind(kills)
        .bind(knocks)
        .bind(damage)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn accumulate_advanced_career_stats(
        &self,
        player_name: &str,
        match_type_class: &str,
        killsteals: i32,
    ) -> Result<(), DbError> {
        sqlx::query(
            r#"INSERT INTO player_advanced_career_stats (
                player_name, match_type_class, killsteals, matches_counted
            ) VALUES ($1, $2, $3, 1)
            ON CONFLICT (player_name, match_type_class) DO UPDATE SET
                killsteals = player_advanced_career_stats.killsteals + EXCLUDED.killsteals,
                matches_counted = player_advanced_career_stats.matches_counted + 1"#,
        )
        .bind(player_name)
        .bind(match_type_class)
        .bind(killsteals)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Schedules a 180-day retroactive population when a tracked player is
    /// added (spec §6 `player_backfill_status`).
    pub async fn schedule_backfill(&self, player_name: &str, window_days: i32) -> Result<(), DbError> {
        sqlx::query(
            r#"INSERT INTO player_backfill_status (player_name, window_days, backfilled)
               VALUES ($1, $2, FALSE)
               ON CONFLICT (player_name) DO UPDATE SET window_days = EXCLUDED.window_days, backfilled = FALSE"#,
        )
        .bind(player_name)
        .bind(window_days)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Players scheduled for backfill but not yet walked (spec §6
    /// `player_backfill_status`, §4.11).
    pub async fn fetch_pending_backfills(&self) -> Result<Vec<(String, i32)>, DbError> {
        let rows = sqlx::query(
            "SELECT player_name, window_days FROM player_backfill_status WHERE backfilled = FALSE",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .iter()
            .map(|r| (r.get::<String, _>("player_name"), r.get::<i32, _>("window_days")))
            .collect())
    }

    pub async fn mark_backfilled(&self, player_name: &str) -> Result<(), DbError> {
        sqlx::query(
            "UPDATE player_backfill_status SET backfilled = TRUE, backfilled_at = now() WHERE player_name = $1",
        )
        .bind(player_name)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Refreshes the fight-outcome roll-up view at the end of each
    /// aggregator batch (spec §6 "Materialized view... with a refresh
    /// function").
    pub async fn refresh_team_combatability_metrics(&self) -> Result<(), DbError> {
        sqlx::query("REFRESH MATERIALIZED VIEW team_combatability_metrics")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
