// [apps/aggregator/src/main.rs]
//! =================================================================
//! APARATO: AGGREGATOR SHELL
//! RESPONSABILIDAD: BOOTSTRAP Y BUCLE DE VOLCADO A CARRERA
//! =================================================================

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use skirmish_aggregator_lib::AggregationEngine;
use skirmish_infra_db::{CareerRepository, DbClient, LedgerRepository, SummaryRepository, WeaponDistributionRepository};
use skirmish_shared_config::{DatabaseConfig, ServiceScheduleConfig};

#[derive(Parser, Debug)]
#[command(about = "Rolls completed matches into career stat tables and sweeps scheduled backfills.")]
struct Args {
    /// Path to the TOML schedule config (spec §6). Falls back to built-in
    /// defaults (batch_size=100, aggregation_interval_seconds=300).
    #[arg(long, env = "AGGREGATOR_CONFIG_PATH")]
    config_path: Option<String>,

    /// How many backfill sweeps run for every aggregation run; the sweep
    /// is cheap when nothing is pending, so this defaults to every run.
    #[arg(long, env = "AGGREGATOR_BACKFILL_EVERY_N_RUNS", default_value_t = 1)]
    backfill_every_n_runs: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    skirmish_shared_config::load_dotenv();
    skirmish_shared_telemetry::init_tracing("skirmish_aggregator");

    let args = Args::parse();
    let db_config = DatabaseConfig::from_env()?;
    let schedule = match &args.config_path {
        Some(path) => skirmish_shared_config::load_service_schedule(path)?,
        None => ServiceScheduleConfig::default(),
    };

    let db = DbClient::connect(&db_config.connection_string(), db_config.max_connections).await?;
    let engine = AggregationEngine::new(
        LedgerRepository::new(db.pool().clone()),
        SummaryRepository::new(db.pool().clone()),
        WeaponDistributionRepository::new(db.pool().clone()),
        CareerRepository::new(db.pool().clone()),
        schedule.batch_size,
    );

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_writer = Arc::clone(&shutdown);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested, finishing current run before exit");
            shutdown_writer.store(true, Ordering::SeqCst);
        }
    });

    info!(
        interval_seconds = schedule.aggregation_interval_seconds,
        batch_size = schedule.batch_size,
        "aggregator starting"
    );

    let mut run_count: u32 = 0;
    while !shutdown.load(Ordering::SeqCst) {
        engine.run_once().await;
        if args.backfill_every_n_runs > 0 && run_count % args.backfill_every_n_runs == 0 {
            engine.run_backfill_once().await;
        }
        run_count = run_count.wrapping_add(1);
        tokio::time::sleep(Duration::from_secs(schedule.aggregation_interval_seconds)).await;
    }

    info!("aggregator stopped");
    Ok(())
}
