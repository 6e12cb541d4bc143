// [libs/infra/db/src/repositories/weapon_distribution.rs]
//! Per-match weapon-category tallies (spec §4.9 Phase 3 "per-match weapon
//! table"). The aggregator folds these rows into the career
//! `player_weapon_stats` table (spec §4.11); they are not derived again
//! from `weapon_kill_events` at aggregation time.

use sqlx::PgPool;

use skirmish_domain_models::WeaponCategoryTally;

use crate::errors::DbError;

pub struct WeaponDistributionRepository {
    pool: PgPool,
}

impl WeaponDistributionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn replace_for_match(
        &self,
        match_id: &str,
        rows: &[WeaponCategoryTally],
    ) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM match_weapon_distribution WHERE match_id = $1")
            .bind(match_id)
            .execute(&mut *tx)
            .await?;
        for row in rows {
            sqlx::query(
                r#"INSERT INTO match_weapon_distribution (
                    match_id, player_name, weapon_category, kills, knocks, damage
                ) VALUES ($1, $2, $3, $4, $5, $6)"#,
            )
            .bind(&row.match_id)
            .bind(&row.player_name)
            .bind(format!("{:?}", row.weapon_category))
            .bind(row.kills)
            .bind(row.knocks)
            .bind(row.damage)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    pub async fn fetch_for_match(&self, match_id: &str) -> Result<Vec<WeaponCategoryTally>, DbError> {
        let rows = sqlx::query_as::<_, (String, String, String, i32, i32, f64)>(
            "SELECT match_id, player_name, weapon_category, kills, knocks, damage
             FROM match_weapon_distribution WHERE match_id = $1",
        )
        .bind(match_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(match_id, player_name, category, kills, knocks, damage)| {
                WeaponCategoryTally {
                    match_id,
                    player_name,
                    weapon_category: parse_category(&category),
                    kills,
                    knocks,
                    damage,
                }
            })
            .collect())
    }
}

fn parse_category(raw: &str) -> skirmish_domain_models::WeaponCategory {
    use skirmish_domain_models::WeaponCategory::*;
    match raw {
        "Ar" => Ar,
        "Dmr" => Dmr,
        "Sr" => Sr,
        "Smg" => Smg,
        "Shotgun" => Shotgun,
        "Lmg" => Lmg,
        "Pistol" => Pistol,
        "Melee" => Melee,
        "Throwable" => Throwable,
        "Special" => Special,
        "Vehicle" => Vehicle,
        "Environment" => Environment,
        _ => Other,
    }
}
