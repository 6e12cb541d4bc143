// [apps/telemetry-worker/src/bin/processing_worker.rs]
//! =================================================================
//! APARATO: PROCESSING WORKER SHELL
//! RESPONSABILIDAD: BOOTSTRAP Y CONSUMO DE match.processing.telemetry
//! =================================================================

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;

use skirmish_domain_models::QueueStep;
use skirmish_infra_broker::Gateway;
use skirmish_infra_db::{
    DbClient, FightRepository, FinishingRepository, LedgerRepository, PlayerRepository,
    SummaryRepository, TelemetryDetailRepository, WeaponDistributionRepository,
};
use skirmish_shared_config::{BrokerConfig, DatabaseConfig};
use skirmish_telemetry_engine::TelemetryPipeline;
use skirmish_telemetry_worker_lib::TelemetryProcessingWorker;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    skirmish_shared_config::load_dotenv();
    skirmish_shared_telemetry::init_tracing("skirmish_processing_worker");

    let db_config = DatabaseConfig::from_env()?;
    let broker_config = BrokerConfig::from_env()?;

    let db = DbClient::connect(&db_config.connection_string(), db_config.max_connections).await?;
    let gateway = Arc::new(Gateway::connect(&broker_config.amqp_uri(), broker_config.environment.clone()).await?);

    let players = PlayerRepository::new(db.pool().clone());
    let tracked_players: HashSet<String> = players
        .fetch_tracked(i64::MAX)
        .await?
        .into_iter()
        .map(|player| player.player_name)
        .collect();

    let worker = Arc::new(TelemetryProcessingWorker::new(
        TelemetryPipeline::new(tracked_players),
        LedgerRepository::new(db.pool().clone()),
        SummaryRepository::new(db.pool().clone()),
        TelemetryDetailRepository::new(db.pool().clone()),
        FinishingRepository::new(db.pool().clone()),
        FightRepository::new(db.pool().clone()),
        WeaponDistributionRepository::new(db.pool().clone()),
    ));

    info!("processing worker starting, consuming match.processing.telemetry");
    gateway.consume(QueueStep::ProcessingTelemetry, worker).await?;

    Ok(())
}
