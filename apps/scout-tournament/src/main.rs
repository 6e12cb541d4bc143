// [apps/scout-tournament/src/main.rs]
//! =================================================================
//! APARATO: TOURNAMENT DISCOVERY SHELL
//! RESPONSABILIDAD: BOOTSTRAP Y BUCLE DE VENTANA PROGRAMADA
//! =================================================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use tracing::info;

use skirmish_domain_models::CredentialSpec;
use skirmish_infra_api_client::{ApiClient, CredentialPool};
use skirmish_infra_broker::Gateway;
use skirmish_infra_db::{DbClient, LedgerRepository, TournamentRepository};
use skirmish_scout_tournament_lib::{within_schedule_window, TournamentDiscoveryEngine};
use skirmish_shared_config::{BrokerConfig, CredentialPoolsConfig, DatabaseConfig, ServiceScheduleConfig};

#[derive(Parser, Debug)]
#[command(about = "Fast-cadence, schedule-windowed scan of tournament rosters for newly played matches.")]
struct Args {
    /// Seconds between loop iterations while outside or inside the window
    /// (spec §4.6 default: every 60s).
    #[arg(long, env = "SCOUT_TOURNAMENT_INTERVAL_SECONDS", default_value_t = 60)]
    interval_seconds: u64,

    /// Path to the TOML schedule/sampling config (spec §6). Falls back to
    /// built-in defaults when omitted.
    #[arg(long, env = "SCOUT_TOURNAMENT_CONFIG_PATH")]
    config_path: Option<String>,

    /// Base URL of the upstream match API.
    #[arg(long, env = "GAME_API_BASE_URL")]
    api_base_url: String,

    /// Only matches at or after this ISO-8601 timestamp are candidates.
    #[arg(long, env = "SCOUT_TOURNAMENT_CUTOFF_DATE")]
    cutoff_date: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    skirmish_shared_config::load_dotenv();
    skirmish_shared_telemetry::init_tracing("skirmish_scout_tournament");

    let args = Args::parse();
    let db_config = DatabaseConfig::from_env()?;
    let broker_config = BrokerConfig::from_env()?;
    let credentials = CredentialPoolsConfig::from_env()?;
    let schedule = match &args.config_path {
        Some(path) => skirmish_shared_config::load_service_schedule(path)?,
        None => ServiceScheduleConfig::default(),
    };
    let cutoff_date = chrono::DateTime::parse_from_rfc3339(&args.cutoff_date)?.with_timezone(&Utc);

    let db = DbClient::connect(&db_config.connection_string(), db_config.max_connections).await?;
    let gateway = Gateway::connect(&broker_config.amqp_uri(), broker_config.environment.clone()).await?;

    let pool_specs: Vec<CredentialSpec> = credentials
        .tournament_keys
        .into_iter()
        .map(|(secret, rpm_limit)| CredentialSpec { secret, rpm_limit })
        .collect();
    let api_client = ApiClient::new(args.api_base_url, CredentialPool::new(pool_specs));

    let engine = TournamentDiscoveryEngine::new(
        api_client,
        TournamentRepository::new(db.pool().clone()),
        LedgerRepository::new(db.pool().clone()),
        gateway,
        broker_config.environment,
        schedule.match_type.clone(),
        cutoff_date,
        schedule.sample_size,
    );

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_writer = Arc::clone(&shutdown);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested, finishing current run before exit");
            shutdown_writer.store(true, Ordering::SeqCst);
        }
    });

    info!(interval_seconds = args.interval_seconds, "tournament discovery service starting");

    while !shutdown.load(Ordering::SeqCst) {
        if within_schedule_window(&schedule, Utc::now()) {
            engine.run_once().await;
        }
        tokio::time::sleep(Duration::from_secs(args.interval_seconds)).await;
    }

    info!("tournament discovery service stopped");
    Ok(())
}
