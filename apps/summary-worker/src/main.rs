// [apps/summary-worker/src/main.rs]
//! =================================================================
//! APARATO: SUMMARY WORKER SHELL
//! RESPONSABILIDAD: BOOTSTRAP Y CONSUMO DE match.discovered
//! =================================================================

use std::sync::Arc;

use clap::Parser;
use tracing::info;
use uuid::Uuid;

use skirmish_domain_models::{CredentialSpec, QueueStep};
use skirmish_infra_api_client::{ApiClient, CredentialPool};
use skirmish_infra_broker::Gateway;
use skirmish_infra_db::{DbClient, LedgerRepository, SummaryRepository, TournamentRepository};
use skirmish_shared_config::{BrokerConfig, CredentialPoolsConfig, DatabaseConfig};
use skirmish_summary_worker_lib::SummaryWorker;

#[derive(Parser, Debug)]
#[command(about = "Builds per-participant match summaries and resolves tournament context.")]
struct Args {
    /// Base URL of the upstream match API.
    #[arg(long, env = "GAME_API_BASE_URL")]
    api_base_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    skirmish_shared_config::load_dotenv();
    skirmish_shared_telemetry::init_tracing("skirmish_summary_worker");

    let args = Args::parse();
    let db_config = DatabaseConfig::from_env()?;
    let broker_config = BrokerConfig::from_env()?;
    let credentials = CredentialPoolsConfig::from_env()?;

    let db = DbClient::connect(&db_config.connection_string(), db_config.max_connections).await?;
    let gateway = Arc::new(Gateway::connect(&broker_config.amqp_uri(), broker_config.environment.clone()).await?);

    let pool_specs: Vec<CredentialSpec> = credentials
        .main_keys
        .into_iter()
        .map(|(secret, rpm_limit)| CredentialSpec { secret, rpm_limit })
        .collect();
    let api_client = ApiClient::new(args.api_base_url, CredentialPool::new(pool_specs));

    let worker_id = Uuid::new_v4().to_string();
    let worker = Arc::new(SummaryWorker::new(
        api_client,
        LedgerRepository::new(db.pool().clone()),
        SummaryRepository::new(db.pool().clone()),
        TournamentRepository::new(db.pool().clone()),
        Arc::clone(&gateway),
        broker_config.environment,
        worker_id.clone(),
    ));

    info!(worker_id, "summary worker starting, consuming match.discovered");
    gateway.consume(QueueStep::Discovered, worker).await?;

    Ok(())
}
