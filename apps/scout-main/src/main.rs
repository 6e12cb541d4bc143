// [apps/scout-main/src/main.rs]
//! =================================================================
//! APARATO: MAIN DISCOVERY SHELL
//! RESPONSABILIDAD: BOOTSTRAP DE ENTORNO Y BUCLE DE PROGRAMACION
//! =================================================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use skirmish_domain_models::CredentialSpec;
use skirmish_infra_api_client::{ApiClient, CredentialPool};
use skirmish_infra_broker::Gateway;
use skirmish_infra_db::{DbClient, LedgerRepository, PlayerRepository};
use skirmish_scout_main_lib::DiscoveryEngine;
use skirmish_shared_config::{BrokerConfig, CredentialPoolsConfig, DatabaseConfig};

#[derive(Parser, Debug)]
#[command(about = "Scheduled scan of tracked players for newly played matches.")]
struct Args {
    /// Seconds between discovery runs (spec §4.5 default: 10 minutes).
    #[arg(long, env = "SCOUT_MAIN_INTERVAL_SECONDS", default_value_t = 600)]
    interval_seconds: u64,

    /// Up to how many tracked players are sampled per run (spec §4.5 default K).
    #[arg(long, env = "SCOUT_MAIN_PLAYER_SAMPLE_SIZE", default_value_t = 500)]
    player_sample_size: i64,

    /// Base URL of the upstream match API.
    #[arg(long, env = "GAME_API_BASE_URL")]
    api_base_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    skirmish_shared_config::load_dotenv();
    skirmish_shared_telemetry::init_tracing("skirmish_scout_main");

    let args = Args::parse();
    let db_config = DatabaseConfig::from_env()?;
    let broker_config = BrokerConfig::from_env()?;
    let credentials = CredentialPoolsConfig::from_env()?;

    let db = DbClient::connect(&db_config.connection_string(), db_config.max_connections).await?;
    let gateway = Gateway::connect(&broker_config.amqp_uri(), broker_config.environment.clone()).await?;

    let pool_specs: Vec<CredentialSpec> = credentials
        .main_keys
        .into_iter()
        .map(|(secret, rpm_limit)| CredentialSpec { secret, rpm_limit })
        .collect();
    let api_client = ApiClient::new(args.api_base_url, CredentialPool::new(pool_specs));

    let engine = DiscoveryEngine::new(
        api_client,
        PlayerRepository::new(db.pool().clone()),
        LedgerRepository::new(db.pool().clone()),
        gateway,
        broker_config.environment,
    );

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_writer = Arc::clone(&shutdown);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested, finishing current run before exit");
            shutdown_writer.store(true, Ordering::SeqCst);
        }
    });

    info!(interval_seconds = args.interval_seconds, sample_size = args.player_sample_size, "main discovery service starting");

    while !shutdown.load(Ordering::SeqCst) {
        engine.run_once(args.player_sample_size).await;
        tokio::time::sleep(Duration::from_secs(args.interval_seconds)).await;
    }

    info!("main discovery service stopped");
    Ok(())
}
