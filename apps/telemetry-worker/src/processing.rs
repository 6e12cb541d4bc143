// [apps/telemetry-worker/src/processing.rs]
//! Consumes `match.processing.telemetry`: runs the three-phase extraction
//! pipeline and persists everything it produces (spec §4.9). Every child
//! table is deleted-then-reinserted per match, so a redelivered message
//! never duplicates rows.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use skirmish_domain_models::{HandlerOutcome, MatchStatus, ProcessingReadyPayload};
use skirmish_infra_db::{
    FightRepository, FinishingRepository, LedgerRepository, SummaryRepository,
    TelemetryDetailRepository, WeaponDistributionRepository,
};
use skirmish_infra_broker::MessageHandler;
use skirmish_telemetry_engine::TelemetryPipeline;

pub struct TelemetryProcessingWorker {
    pipeline: TelemetryPipeline,
    ledger: LedgerRepository,
    summaries: SummaryRepository,
    telemetry_detail: TelemetryDetailRepository,
    finishing: FinishingRepository,
    fights: FightRepository,
    weapon_distribution: WeaponDistributionRepository,
}

impl TelemetryProcessingWorker {
    pub fn new(
        pipeline: TelemetryPipeline,
        ledger: LedgerRepository,
        summaries: SummaryRepository,
        telemetry_detail: TelemetryDetailRepository,
        finishing: FinishingRepository,
        fights: FightRepository,
        weapon_distribution: WeaponDistributionRepository,
    ) -> Self {
        Self { pipeline, ledger, summaries, telemetry_detail, finishing, fights, weapon_distribution }
    }

    pub async fn process(&self, match_id: &str, telemetry_file_path: &str) -> anyhow::Result<()> {
        let participants = self.summaries.fetch_by_match(match_id).await?;
        let output = self
            .pipeline
            .process_match_file(match_id, Path::new(telemetry_file_path), participants)
            .await?;

        self.telemetry_detail.replace_landings(match_id, &output.phase1.landings).await?;
        self.ledger.flip_landings_processed(match_id).await?;

        self.telemetry_detail.replace_kill_positions(match_id, &output.phase1.kill_positions).await?;
        self.ledger.flip_kills_processed(match_id).await?;

        self.telemetry_detail.replace_weapon_kill_events(match_id, &output.phase1.weapon_kills).await?;
        self.ledger.flip_weapons_processed(match_id).await?;

        self.telemetry_detail.replace_player_damage_events(match_id, &output.phase1.damage_events).await?;
        self.ledger.flip_damage_processed(match_id).await?;

        self.telemetry_detail.replace_circle_positions(match_id, &output.phase1.circle_positions).await?;
        self.ledger.flip_circles_processed(match_id).await?;

        let dbno_ids: Vec<i64> = output.phase2.knocks.iter().map(|knock| knock.dbno_id).collect();
        self.finishing.replace_knock_events(match_id, &dbno_ids, &output.phase2.knocks).await?;
        self.finishing.replace_finishing_summaries(match_id, &output.phase2.finishing_summaries).await?;
        self.ledger.flip_finishing_processed(match_id).await?;

        self.fights.delete_for_match(match_id).await?;
        for mut fight in output.phase2.fights {
            self.fights.insert_fight(&mut fight).await?;
        }
        self.ledger.flip_fights_processed(match_id).await?;

        self.weapon_distribution.replace_for_match(match_id, &output.weapon_distribution).await?;
        for participant in &output.participants {
            self.summaries
                .update_enhanced_columns(match_id, &participant.participant_id, participant)
                .await?;
        }

        self.ledger.set_status(match_id, MatchStatus::Complete).await?;
        Ok(())
    }
}

#[async_trait]
impl MessageHandler for TelemetryProcessingWorker {
    async fn handle(&self, payload: Value) -> HandlerOutcome {
        let ready: ProcessingReadyPayload = match serde_json::from_value(payload) {
            Ok(ready) => ready,
            Err(error) => return HandlerOutcome::Error(error.to_string()),
        };

        match self.process(&ready.match_id, &ready.telemetry_file_path).await {
            Ok(()) => {
                info!(match_id = %ready.match_id, "telemetry processing complete");
                HandlerOutcome::Ok
            }
            Err(error) => {
                warn!(match_id = %ready.match_id, %error, "telemetry processing failed");
                let _ = self.ledger.mark_failed(&ready.match_id, &error.to_string()).await;
                HandlerOutcome::Error(error.to_string())
            }
        }
    }
}
