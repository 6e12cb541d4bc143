// [apps/telemetry-worker/src/download.rs]
//! Consumes `match.telemetry`: streams the raw telemetry body to the
//! local store and republishes `match.processing.telemetry` (spec §4.8).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use skirmish_domain_models::{MessagePriority, ProcessingReadyPayload, QueueStep, TelemetryReadyPayload};
use skirmish_infra_api_client::ApiClient;
use skirmish_infra_broker::{Gateway, MessageHandler};
use skirmish_infra_db::LedgerRepository;

/// `matchID={match_id}/raw.json.gz` under the configured store root (spec
/// §4.8 step 1's idempotency check path).
pub fn telemetry_path(store_dir: &Path, match_id: &str) -> PathBuf {
    store_dir.join(format!("matchID={match_id}")).join("raw.json.gz")
}

pub struct TelemetryDownloadWorker {
    api_client: ApiClient,
    ledger: LedgerRepository,
    gateway: Arc<Gateway>,
    environment: String,
    store_dir: PathBuf,
}

impl TelemetryDownloadWorker {
    pub fn new(
        api_client: ApiClient,
        ledger: LedgerRepository,
        gateway: Arc<Gateway>,
        environment: String,
        store_dir: PathBuf,
    ) -> Self {
        Self { api_client, ledger, gateway, environment, store_dir }
    }

    pub async fn process(&self, payload: &TelemetryReadyPayload) -> anyhow::Result<()> {
        let dest = telemetry_path(&self.store_dir, &payload.match_id);

        let file_size_bytes = if dest.exists() {
            std::fs::metadata(&dest)?.len()
        } else {
            self.api_client.download_telemetry(&payload.telemetry_url, &dest).await?
        };

        self.ledger.flip_telemetry_downloaded(&payload.match_id).await?;

        let out_payload = ProcessingReadyPayload {
            match_id: payload.match_id.clone(),
            telemetry_file_path: dest.to_string_lossy().into_owned(),
            file_size_bytes: file_size_bytes as i64,
            environment: self.environment.clone(),
            queue_target: QueueStep::ProcessingTelemetry.queue_name(&self.environment),
        };
        self.gateway.publish(QueueStep::ProcessingTelemetry, &out_payload, MessagePriority::Normal).await?;
        Ok(())
    }
}

#[async_trait]
impl MessageHandler for TelemetryDownloadWorker {
    async fn handle(&self, payload: Value) -> skirmish_domain_models::HandlerOutcome {
        let ready: TelemetryReadyPayload = match serde_json::from_value(payload) {
            Ok(ready) => ready,
            Err(error) => return skirmish_domain_models::HandlerOutcome::Error(error.to_string()),
        };

        match self.process(&ready).await {
            Ok(()) => {
                info!(match_id = %ready.match_id, "telemetry downloaded");
                skirmish_domain_models::HandlerOutcome::Ok
            }
            Err(error) => {
                warn!(match_id = %ready.match_id, %error, "telemetry download failed");
                let _ = self.ledger.mark_failed(&ready.match_id, &error.to_string()).await;
                skirmish_domain_models::HandlerOutcome::Error(error.to_string())
            }
        }
    }
}
