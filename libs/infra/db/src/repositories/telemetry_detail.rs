// [libs/infra/db/src/repositories/telemetry_detail.rs]
//! Phase-1 extractor output tables (spec §4.9 Phase 1, §3 "Extracted
//! Telemetry Rows"). Each `delete_for_match` + `bulk_insert` pair runs
//! inside its own transaction so re-processing never duplicates rows
//! (spec §4.9 "Idempotency").

use sqlx::{PgPool, Postgres, Transaction};

use skirmish_domain_models::{
    CirclePositionRow, KillPositionRow, LandingRow, PlayerDamageEventRow, WeaponKillEventRow,
};

use crate::errors::DbError;

pub struct TelemetryDetailRepository {
    pool: PgPool,
}

impl TelemetryDetailRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn replace_landings(&self, match_id: &str, rows: &[LandingRow]) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM landings WHERE match_id = $1")
            .bind(match_id)
            .execute(&mut *tx)
            .await?;
        for row in rows {
            sqlx::query(
                "INSERT INTO landings (match_id, player_name, team_id, location_x, location_y, location_z, is_valid)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(&row.match_id)
            .bind(&row.player_name)
            .bind(row.team_id)
            .bind(row.location.x)
            .bind(row.location.y)
            .bind(row.location.z)
            .bind(row.is_valid)
            .execute(&mut *tx)
            .await?;
        }
        commit(tx).await
    }

    pub async fn replace_kill_positions(
        &self,
        match_id: &str,
        rows: &[KillPositionRow],
    ) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM kill_positions WHERE match_id = $1")
            .bind(match_id)
            .execute(&mut *tx)
            .await?;
        for row in rows {
            sqlx::query(
                r#"INSERT INTO kill_positions (
                    match_id, killer_name, victim_name, knocker_name,
                    killer_location_x, killer_location_y, killer_location_z,
                    victim_location_x, victim_location_y, victim_location_z,
                    damage_reason, damage_category, damage_causer, distance,
                    killer_zone, event_time
                ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16)"#,
            )
            .bind(&row.match_id)
            .bind(&row.finisher_name)
            .bind(&row.victim_name)
            .bind(&row.finisher_name)
            .bind(row.finisher_location.map(|l| l.x))
            .bind(row.finisher_location.map(|l| l.y))
            .bind(row.finisher_location.map(|l| l.z))
            .bind(row.victim_location.x)
            .bind(row.victim_location.y)
            .bind(row.victim_location.z)
            .bind(&row.damage_reason)
            .bind(&row.damage_type_category)
            .bind(&row.damage_causer_name)
            .bind(row.distance)
            .bind(&row.zone)
            .bind(row.timestamp)
            .execute(&mut *tx)
            .await?;
        }
        commit(tx).await
    }

    pub async fn replace_weapon_kill_events(
        &self,
        match_id: &str,
        rows: &[WeaponKillEventRow],
    ) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM weapon_kill_events WHERE match_id = $1")
            .bind(match_id)
            .execute(&mut *tx)
            .await?;
        for row in rows {
            let category = skirmish_domain_models::categorize_weapon(&row.weapon_id);
            sqlx::query(
                r#"INSERT INTO weapon_kill_events (
                    match_id, attacker_name, victim_name, weapon_id, weapon_category,
                    damage_type, distance, is_knock, zone_phase, time_survived, event_time
                ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11)"#,
            )
            .bind(&row.match_id)
            .bind(&row.attacker_name)
            .bind(&row.victim_name)
            .bind(&row.weapon_id)
            .bind(format!("{:?}", category))
            .bind(&row.damage_type)
            .bind(row.distance)
            .bind(row.is_knock)
            .bind(row.zone_phase)
            .bind(row.time_survived)
            .bind(row.timestamp)
            .execute(&mut *tx)
            .await?;
        }
        commit(tx).await
    }

    /// Filtered storage: only rows for tracked players are persisted in
    /// detail here (spec §3 "Damage events and circle positions are
    /// filtered storage"); the caller pre-filters `rows`.
    pub async fn replace_player_damage_events(
        &self,
        match_id: &str,
        rows: &[PlayerDamageEventRow],
    ) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM player_damage_events WHERE match_id = $1")
            .bind(match_id)
            .execute(&mut *tx)
            .await?;
        for row in rows {
            sqlx::query(
                r#"INSERT INTO player_damage_events (
                    match_id, attacker_name, victim_name, damage, damage_type, weapon_id, event_time
                ) VALUES ($1,$2,$3,$4,$5,$6,$7)"#,
            )
            .bind(&row.match_id)
            .bind(&row.attacker_name)
            .bind(&row.victim_name)
            .bind(row.damage)
            .bind(&row.damage_type_category)
            .bind(&row.damage_causer_name)
            .bind(row.timestamp)
            .execute(&mut *tx)
            .await?;
        }
        commit(tx).await
    }

    pub async fn replace_circle_positions(
        &self,
        match_id: &str,
        rows: &[CirclePositionRow],
    ) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM circle_positions WHERE match_id = $1")
            .bind(match_id)
            .execute(&mut *tx)
            .await?;
        for row in rows {
            sqlx::query(
                r#"INSERT INTO circle_positions (
                    match_id, player_name, phase, player_x, player_y,
                    circle_center_x, circle_center_y, circle_radius,
                    distance_from_center, distance_from_edge, in_zone, sampled_at
                ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12)"#,
            )
            .bind(&row.match_id)
            .bind(&row.player_name)
            .bind(row.phase)
            .bind(row.player_location.x)
            .bind(row.player_location.y)
            .bind(row.circle_center.x)
            .bind(row.circle_center.y)
            .bind(row.circle_radius)
            .bind(row.distance_from_center)
            .bind(row.distance_from_edge)
            .bind(row.in_zone)
            .bind(row.timestamp)
            .execute(&mut *tx)
            .await?;
        }
        commit(tx).await
    }
}

async fn commit(tx: Transaction<'_, Postgres>) -> Result<(), DbError> {
    tx.commit().await?;
    Ok(())
}
