// [libs/infra/db/src/repositories/fights.rs]
//! Fight + participant persistence (spec §4.10 "Emission / persistence
//! (critical invariant)", §8 "Fight referential integrity"). Each fight and
//! its participants is one transaction; a failed insert rolls back both.

use sqlx::{PgPool, Row};

use skirmish_domain_models::{Fight, FightOutcome, FightReason, TeamOutcome};

use crate::errors::DbError;

pub struct FightRepository {
    pool: PgPool,
}

impl FightRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Deletes existing fights (and, via FK cascade semantics at the
    /// application layer, their participants) for `match_id` before a
    /// re-processing pass (spec §4.9 idempotency: "deleting existing child
    /// rows before re-inserting").
    pub async fn delete_for_match(&self, match_id: &str) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "DELETE FROM fight_participants WHERE fight_id IN (SELECT id FROM team_fights WHERE match_id = $1)",
        )
        .bind(match_id)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM team_fights WHERE match_id = $1")
            .bind(match_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    /// Inserts one fight and stamps the generated id into every participant
    /// before bulk-inserting them, all within a single transaction.
    pub async fn insert_fight(&self, fight: &mut Fight) -> Result<i64, DbError> {
        let mut tx = self.pool.begin().await?;

        let team_outcomes_json = serde_json::to_value(
            fight
                .team_outcomes
                .iter()
                .map(|(team_ref, outcome)| (team_ref.to_string(), team_outcome_str(*outcome)))
                .collect::<std::collections::HashMap<String, &str>>(),
        )
        .map_err(|e| DbError::MappingError(e.to_string()))?;

        let row = sqlx::query(
            r#"INSERT INTO team_fights (
                match_id, start_time, end_time, duration_seconds, team_refs,
                primary_team_a, primary_team_b, third_party_teams,
                center_x, center_y, spread_radius, total_knocks, total_kills,
                total_damage, total_damage_events, total_attack_events,
                outcome, winning_team, losing_team, team_outcomes, fight_reason
            ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16,$17,$18,$19,$20,$21)
            RETURNING id"#,
        )
        .bind(&fight.match_id)
        .bind(fight.start_time)
        .bind(fight.end_time)
        .bind(fight.duration_seconds())
        .bind(&fight.team_refs)
        .bind(fight.primary_pair.0)
        .bind(fight.primary_pair.1)
        .bind(&fight.third_party_team_refs)
        .bind(fight.center.x)
        .bind(fight.center.y)
        .bind(fight.spread_radius)
        .bind(fight.total_knocks)
        .bind(fight.total_kills)
        .bind(fight.total_damage)
        .bind(fight.total_damage_events)
        .bind(fight.total_attack_events)
        .bind(outcome_str(fight.outcome))
        .bind(fight.winning_team)
        .bind(fight.losing_team)
        .bind(team_outcomes_json)
        .bind(fight.fight_reason.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let fight_id: i64 = row.try_get("id")?;
        fight.fight_id = Some(fight_id);

        for participant in fight.participants.iter_mut() {
            participant.fight_id = Some(fight_id);
            sqlx::query(
                r#"INSERT INTO fight_participants (
                    fight_id, match_id, player_name, team_ref, knocks_dealt,
                    kills_dealt, damage_dealt, damage_taken, attacks_made,
                    mean_location_x, mean_location_y, was_knocked, was_killed,
                    survived, knocked_at, killed_at
                ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16)"#,
            )
            .bind(fight_id)
            .bind(&fight.match_id)
            .bind(&participant.player_name)
            .bind(participant.team_ref)
            .bind(participant.knocks_dealt)
            .bind(participant.kills_dealt)
            .bind(participant.damage_dealt)
            .bind(participant.damage_taken)
            .bind(participant.attacks_made)
            .bind(participant.mean_location.x)
            .bind(participant.mean_location.y)
            .bind(participant.was_knocked)
            .bind(participant.was_killed)
            .bind(participant.survived)
            .bind(participant.knocked_at)
            .bind(participant.killed_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::FightTransactionFailed(e.to_string()))?;

        Ok(fight_id)
    }
}

fn outcome_str(outcome: FightOutcome) -> &'static str {
    match outcome {
        FightOutcome::DecisiveWin => "DECISIVE_WIN",
        FightOutcome::MarginalWin => "MARGINAL_WIN",
        FightOutcome::Draw => "DRAW",
        FightOutcome::ThirdParty => "THIRD_PARTY",
    }
}

fn team_outcome_str(outcome: TeamOutcome) -> &'static str {
    match outcome {
        TeamOutcome::Won => "WON",
        TeamOutcome::Lost => "LOST",
        TeamOutcome::Draw => "DRAW",
    }
}
