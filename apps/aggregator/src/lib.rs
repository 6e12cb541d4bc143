// [apps/aggregator/src/lib.rs]
//! =================================================================
//! APARATO: CAREER STATS AGGREGATOR
//! RESPONSABILIDAD: VOLCADO DE PARTIDAS COMPLETADAS A TABLAS DE CARRERA
//! =================================================================
//!
//! Polls the ledger for matches with `status = complete` and
//! `stats_aggregated = false` rather than consuming a queue (spec §4.11):
//! there is no upstream event that means "a batch is ready," only a
//! condition to notice, so this runs on its own interval like the
//! tournament scout's schedule loop, not as a `Gateway` consumer.
//!
//! Backfill walks the same accumulation path: scheduling a player for
//! backfill only resets `stats_aggregated` on their past matches and lets
//! the regular run pick them back up (spec §4.11, §6 `player_backfill_status`).

use tracing::{info, warn};

use skirmish_infra_db::{CareerRepository, LedgerRepository, SummaryRepository, WeaponDistributionRepository};

/// Every match is counted twice: once under its own bucket, once under
/// `ALL_CLASS`, so a player's totals can be sliced by mode or read as a
/// whole without re-scanning every match (spec §3 "career aggregate rows
/// partitioned by match-type class").
pub const ALL_CLASS: &str = "all";
const RANKED_CLASS: &str = "ranked";
const NORMAL_CLASS: &str = "normal";

/// Upstream `game_type` values that count as ranked play. Everything else
/// observed in `matches.game_type` (`official`, `custom-esports`, and any
/// other public-match type the API reports) rolls up as `normal`.
fn classify_match_type(game_type: &str) -> &'static str {
    match game_type {
        "competitive" | "ranked" => RANKED_CLASS,
        _ => NORMAL_CLASS,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    pub matches_seen: usize,
    pub matches_aggregated: usize,
    pub matches_failed: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BackfillSummary {
    pub players_walked: usize,
    pub matches_reset: usize,
}

pub struct AggregationEngine {
    ledger: LedgerRepository,
    summaries: SummaryRepository,
    weapon_distribution: WeaponDistributionRepository,
    career: CareerRepository,
    batch_size: i64,
}

impl AggregationEngine {
    pub fn new(
        ledger: LedgerRepository,
        summaries: SummaryRepository,
        weapon_distribution: WeaponDistributionRepository,
        career: CareerRepository,
        batch_size: u32,
    ) -> Self {
        Self { ledger, summaries, weapon_distribution, career, batch_size: batch_size as i64 }
    }

    /// One aggregation pass: claims up to `batch_size` pending matches,
    /// folds each into the career tables, then refreshes the team
    /// combatability view once for the whole batch (spec §4.11).
    pub async fn run_once(&self) -> RunSummary {
        let match_ids = match self.ledger.fetch_pending_aggregation(self.batch_size).await {
            Ok(ids) => ids,
            Err(error) => {
                warn!(%error, "could not fetch pending aggregation batch");
                return RunSummary::default();
            }
        };

        let mut summary = RunSummary { matches_seen: match_ids.len(), ..RunSummary::default() };
        if match_ids.is_empty() {
            return summary;
        }

        for match_id in &match_ids {
            match self.aggregate_one(match_id).await {
                Ok(()) => summary.matches_aggregated += 1,
                Err(error) => {
                    warn!(%error, match_id, "match aggregation failed, leaving stats_aggregated unset");
                    summary.matches_failed += 1;
                }
            }
        }

        if summary.matches_aggregated > 0 {
            if let Err(error) = self.career.refresh_team_combatability_metrics().await {
                warn!(%error, "team combatability view refresh failed");
            }
        }

        info!(
            seen = summary.matches_seen,
            aggregated = summary.matches_aggregated,
            failed = summary.matches_failed,
            "aggregation run complete"
        );
        summary
    }

    async fn aggregate_one(&self, match_id: &str) -> anyhow::Result<()> {
        let match_row = self
            .ledger
            .find_by_id(match_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("match disappeared from ledger mid-aggregation"))?;
        let class = classify_match_type(&match_row.game_type);

        let participants = self.summaries.fetch_by_match(match_id).await?;
        for participant in &participants {
            for bucket in [class, ALL_CLASS] {
                self.career
                    .accumulate_damage_stats(
                        &participant.player_name,
                        bucket,
                        participant.damage_dealt,
                        participant.damage_received,
                        participant.throwable_damage,
                    )
                    .await?;
                self.career
                    .accumulate_advanced_career_stats(&participant.player_name, bucket, participant.killsteals)
                    .await?;
            }
        }

        let weapon_rows = self.weapon_distribution.fetch_for_match(match_id).await?;
        for row in &weapon_rows {
            let category = format!("{:?}", row.weapon_category);
            for bucket in [class, ALL_CLASS] {
                self.career
                    .accumulate_weapon_stats(&row.player_name, bucket, &category, row.kills, row.knocks, row.damage)
                    .await?;
            }
        }

        self.ledger.mark_stats_aggregated(match_id).await?;
        Ok(())
    }

    /// Walks every player scheduled for backfill, resets `stats_aggregated`
    /// on their matches inside the configured window, and marks the player
    /// backfilled once the reset is issued. The next regular `run_once`
    /// picks the reopened matches back up (spec §4.11).
    pub async fn run_backfill_once(&self) -> BackfillSummary {
        let pending = match self.career.fetch_pending_backfills().await {
            Ok(pending) => pending,
            Err(error) => {
                warn!(%error, "could not fetch pending backfills");
                return BackfillSummary::default();
            }
        };

        let mut summary = BackfillSummary::default();
        for (player_name, window_days) in pending {
            match self.ledger.fetch_match_ids_for_backfill(&player_name, window_days).await {
                Ok(match_ids) => {
                    for match_id in &match_ids {
                        if let Err(error) = self.ledger.reset_stats_aggregated(match_id).await {
                            warn!(%error, match_id, player_name, "backfill reset failed for match");
                            continue;
                        }
                        summary.matches_reset += 1;
                    }
                    if let Err(error) = self.career.mark_backfilled(&player_name).await {
                        warn!(%error, player_name, "could not mark player backfilled");
                        continue;
                    }
                    summary.players_walked += 1;
                }
                Err(error) => warn!(%error, player_name, "could not list matches for backfill"),
            }
        }

        if summary.players_walked > 0 {
            info!(
                players_walked = summary.players_walked,
                matches_reset = summary.matches_reset,
                "backfill sweep complete"
            );
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_competitive_and_ranked_as_ranked() {
        assert_eq!(classify_match_type("competitive"), RANKED_CLASS);
        assert_eq!(classify_match_type("ranked"), RANKED_CLASS);
    }

    #[test]
    fn classifies_everything_else_as_normal() {
        assert_eq!(classify_match_type("official"), NORMAL_CLASS);
        assert_eq!(classify_match_type("custom-esports"), NORMAL_CLASS);
        assert_eq!(classify_match_type("anything-unrecognized"), NORMAL_CLASS);
    }
}
