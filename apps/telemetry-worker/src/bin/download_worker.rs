// [apps/telemetry-worker/src/bin/download_worker.rs]
//! =================================================================
//! APARATO: DOWNLOAD WORKER SHELL
//! RESPONSABILIDAD: BOOTSTRAP Y CONSUMO DE match.telemetry
//! =================================================================

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use skirmish_domain_models::{CredentialSpec, QueueStep};
use skirmish_infra_api_client::{ApiClient, CredentialPool};
use skirmish_infra_broker::Gateway;
use skirmish_infra_db::{DbClient, LedgerRepository};
use skirmish_shared_config::{BrokerConfig, CredentialPoolsConfig, DatabaseConfig};
use skirmish_telemetry_worker_lib::TelemetryDownloadWorker;

#[derive(Parser, Debug)]
#[command(about = "Streams raw match telemetry to local storage and hands it off for processing.")]
struct Args {
    /// Base URL of the upstream match API.
    #[arg(long, env = "GAME_API_BASE_URL")]
    api_base_url: String,

    /// Root directory telemetry files are stored under (spec §4.8 step 1).
    #[arg(long, env = "TELEMETRY_STORE_DIR", default_value = "./telemetry-store")]
    telemetry_store_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    skirmish_shared_config::load_dotenv();
    skirmish_shared_telemetry::init_tracing("skirmish_download_worker");

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

    let worker = Arc::new(TelemetryDownloadWorker::new(
        api_client,
        LedgerRepository::new(db.pool().clone()),
        Arc::clone(&gateway),
        broker_config.environment,
        args.telemetry_store_dir,
    ));

    info!("download worker starting, consuming match.telemetry");
    gateway.consume(QueueStep::Telemetry, worker).await?;

    Ok(())
}
