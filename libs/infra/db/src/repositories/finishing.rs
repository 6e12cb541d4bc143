// [libs/infra/db/src/repositories/finishing.rs]
//! Knock lifecycle + per-(match, player) finishing summary (spec §4.9
//! "Knock lifecycle / finishing metrics").

use sqlx::PgPool;

use skirmish_domain_models::{KnockEvent, KnockOutcome, PlayerFinishingSummary};

use crate::errors::DbError;

pub struct FinishingRepository {
    pool: PgPool,
}

impl FinishingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn replace_knock_events(
        &self,
        match_id: &str,
        dbno_ids: &[i64],
        events: &[KnockEvent],
    ) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM player_knock_events WHERE match_id = $1")
            .bind(match_id)
            .execute(&mut *tx)
            .await?;

        for (event, dbno_id) in events.iter().zip(dbno_ids) {
            sqlx::query(
                r#"INSERT INTO player_knock_events (
                    match_id, dbno_id, attacker_name, victim_name, weapon_id,
                    attacker_location_x, attacker_location_y, attacker_location_z,
                    victim_location_x, victim_location_y, victim_location_z, distance,
                    outcome, finisher_name, finisher_is_self, finisher_is_teammate,
                    time_to_finish, nearest_teammate_distance, mean_teammate_distance,
                    teammates_within_50m, teammates_within_100m, teammates_within_200m,
                    team_spread_variance, alive_teammates, knocked_at
                ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16,$17,$18,$19,$20,$21,$22,$23,$24,$25)"#,
            )
            .bind(&event.match_id)
            .bind(dbno_id)
            .bind(&event.attacker_name)
            .bind(&event.victim_name)
            .bind(&event.weapon)
            .bind(event.attacker_location.map(|l| l.x))
            .bind(event.attacker_location.map(|l| l.y))
            .bind(event.attacker_location.map(|l| l.z))
            .bind(event.victim_location.x)
            .bind(event.victim_location.y)
            .bind(event.victim_location.z)
            .bind(event.distance)
            .bind(outcome_str(event.outcome))
            .bind(&event.finisher_name)
            .bind(event.finisher_is_self)
            .bind(event.finisher_is_teammate)
            .bind(event.time_to_finish)
            .bind(event.proximity.nearest_teammate_distance)
            .bind(event.proximity.mean_teammate_distance)
            .bind(event.proximity.within_50m)
            .bind(event.proximity.within_100m)
            .bind(event.proximity.within_200m)
            .bind(event.proximity.team_spread_variance)
            .bind(event.proximity.alive_teammates)
            .bind(event.knocked_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn replace_finishing_summaries(
        &self,
        match_id: &str,
        summaries: &[PlayerFinishingSummary],
    ) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM player_finishing_summary WHERE match_id = $1")
            .bind(match_id)
            .execute(&mut *tx)
            .await?;

        for s in summaries {
            sqlx::query(
                r#"INSERT INTO player_finishing_summary (
                    match_id, player_name, finishing_0_10m, finishing_10_50m,
                    finishing_50_100m, finishing_100_200m, finishing_200plus_m,
                    support_under_25m, support_25_50m, support_50_100m,
                    support_100_200m, support_200plus_m
                ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12)
                ON CONFLICT (match_id, player_name) DO NOTHING"#,
            )
            .bind(&s.match_id)
            .bind(&s.player_name)
            .bind(s.distance_histogram.bucket_0_10)
            .bind(s.distance_histogram.bucket_10_50)
            .bind(s.distance_histogram.bucket_50_100)
            .bind(s.distance_histogram.bucket_100_200)
            .bind(s.distance_histogram.bucket_200_plus)
            .bind(s.teammate_support_histogram.bucket_under_25)
            .bind(s.teammate_support_histogram.bucket_25_50)
            .bind(s.teammate_support_histogram.bucket_50_100)
            .bind(s.teammate_support_histogram.bucket_100_200)
            .bind(s.teammate_support_histogram.bucket_200_plus)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

fn outcome_str(outcome: KnockOutcome) -> &'static str {
    match outcome {
        KnockOutcome::Killed => "killed",
        KnockOutcome::Revived => "revived",
        KnockOutcome::Unknown => "unknown",
    }
}
