// [apps/summary-worker/src/lib.rs]
//! =================================================================
//! APARATO: MATCH SUMMARY WORKER
//! RESPONSABILIDAD: EXTRACCION DE PARTICIPANTES Y CONTEXTO DE TORNEO
//! =================================================================
//!
//! Consumes `match.discovered`. Builds the per-participant summary rows
//! for a match, resolves tournament context when the match came from the
//! tournament scout, and republishes `match.telemetry` (spec §4.7). The
//! idempotent re-entry path (step 2) means a redelivered message never
//! duplicates participant rows: it just re-extracts the telemetry URL and
//! republishes.

mod tournament_context;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tracing::{info, instrument, warn};

use skirmish_domain_models::{
    extract_telemetry_url, parse_match_attributes, participant_rows, roster_placements,
    translate_map_name, DiscoveredBy, HandlerOutcome, MatchStatus, MessagePriority, QueueStep,
    TelemetryReadyPayload,
};
use skirmish_infra_api_client::ApiClient;
use skirmish_infra_broker::{Gateway, MessageHandler};
use skirmish_infra_db::{LedgerRepository, SummaryRepository, TournamentRepository};

pub use tournament_context::resolve_tournament_context;

#[derive(Debug, Default)]
pub struct WorkerCounters {
    pub processed: AtomicU64,
    pub errors: AtomicU64,
}

impl WorkerCounters {
    pub fn success_rate(&self) -> f64 {
        let processed = self.processed.load(Ordering::Relaxed) as f64;
        let errors = self.errors.load(Ordering::Relaxed) as f64;
        if processed == 0.0 {
            1.0
        } else {
            (processed - errors) / processed
        }
    }
}

pub struct SummaryWorker {
    api_client: ApiClient,
    ledger: LedgerRepository,
    summaries: SummaryRepository,
    tournaments: TournamentRepository,
    gateway: Arc<Gateway>,
    environment: String,
    worker_id: String,
    counters: WorkerCounters,
}

impl SummaryWorker {
    pub fn new(
        api_client: ApiClient,
        ledger: LedgerRepository,
        summaries: SummaryRepository,
        tournaments: TournamentRepository,
        gateway: Arc<Gateway>,
        environment: String,
        worker_id: String,
    ) -> Self {
        Self {
            api_client,
            ledger,
            summaries,
            tournaments,
            gateway,
            environment,
            worker_id,
            counters: WorkerCounters::default(),
        }
    }

    pub fn counters(&self) -> &WorkerCounters {
        &self.counters
    }

    #[instrument(skip(self))]
    pub async fn process(&self, match_id: &str) -> anyhow::Result<()> {
        self.ledger.set_status(match_id, MatchStatus::Processing).await?;

        let ledger_row = self
            .ledger
            .find_by_id(match_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("ledger row vanished for {match_id}"))?;

        if self.summaries.existing_count(match_id).await? > 0 {
            let document = self.api_client.get_match(match_id).await?;
            let telemetry_url = extract_telemetry_url(&document)
                .or(ledger_row.telemetry_url.clone())
                .ok_or_else(|| anyhow::anyhow!("no telemetry URL available for {match_id}"))?;
            self.publish_telemetry_ready(&ledger_row.match_id, &telemetry_url, &ledger_row.map_name, &ledger_row.game_mode, ledger_row.match_datetime, None)
                .await?;
            return Ok(());
        }

        let document = self.api_client.get_match(match_id).await?;
        let attributes = parse_match_attributes(&document)
            .ok_or_else(|| anyhow::anyhow!("match document missing expected attributes"))?;
        let telemetry_url = extract_telemetry_url(&document);
        if let Some(url) = &telemetry_url {
            self.ledger.set_telemetry_url(match_id, url).await?;
        }

        let placements = roster_placements(&document);
        let participants = participant_rows(&document, match_id, &placements);
        self.summaries.bulk_insert(match_id, &participants).await?;

        if ledger_row.discovered_by == DiscoveredBy::Tournament {
            let names: Vec<String> = participants.iter().map(|p| p.player_name.clone()).collect();
            let context = resolve_tournament_context(
                &self.tournaments,
                &names,
                attributes.match_datetime,
                &attributes.map_name,
            )
            .await?;
            self.ledger
                .set_tournament_context(
                    match_id,
                    context.is_tournament_match,
                    context.validation_status,
                    context.team_count,
                    context.unmatched_player_count,
                    context.round_ref.as_deref(),
                    context.schedule_slot_ref.as_deref(),
                )
                .await?;
        }

        let telemetry_url = telemetry_url.ok_or_else(|| anyhow::anyhow!("no telemetry URL found for {match_id}"))?;
        self.publish_telemetry_ready(
            match_id,
            &telemetry_url,
            &attributes.map_name,
            &attributes.game_mode,
            attributes.match_datetime,
            Some(participants.len() as i32),
        )
        .await?;

        self.ledger.flip_summaries_processed(match_id).await?;
        Ok(())
    }

    async fn publish_telemetry_ready(
        &self,
        match_id: &str,
        telemetry_url: &str,
        map_name: &str,
        game_mode: &str,
        match_datetime: chrono::DateTime<Utc>,
        participant_count: Option<i32>,
    ) -> anyhow::Result<()> {
        let participant_count = match participant_count {
            Some(count) => count,
            None => self.summaries.existing_count(match_id).await? as i32,
        };

        let payload = TelemetryReadyPayload {
            match_id: match_id.to_string(),
            telemetry_url: telemetry_url.to_string(),
            map_name: translate_map_name(map_name),
            game_mode: game_mode.to_string(),
            match_datetime,
            participant_count,
            worker_id: self.worker_id.clone(),
            environment: self.environment.clone(),
            queue_target: QueueStep::Telemetry.queue_name(&self.environment),
        };
        self.gateway.publish(QueueStep::Telemetry, &payload, MessagePriority::Normal).await?;
        Ok(())
    }
}

#[async_trait]
impl MessageHandler for SummaryWorker {
    async fn handle(&self, payload: Value) -> HandlerOutcome {
        let Some(match_id) = payload.get("match_id").and_then(Value::as_str) else {
            warn!("discovered message missing match_id");
            return HandlerOutcome::Error("missing match_id".to_string());
        };

        match self.process(match_id).await {
            Ok(()) => {
                self.counters.processed.fetch_add(1, Ordering::Relaxed);
                info!(match_id, success_rate = self.counters.success_rate(), "match summarized");
                HandlerOutcome::Ok
            }
            Err(error) => {
                self.counters.processed.fetch_add(1, Ordering::Relaxed);
                self.counters.errors.fetch_add(1, Ordering::Relaxed);
                warn!(match_id, %error, "summary worker failed to process match");
                let _ = self.ledger.mark_failed(match_id, &error.to_string()).await;
                HandlerOutcome::Error(error.to_string())
            }
        }
    }
}
