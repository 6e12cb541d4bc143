// [apps/migrator/src/main.rs]
//! =================================================================
//! APARATO: DB MIGRATOR CLI
//! RESPONSABILIDAD: NIVELACION IDEMPOTENTE DEL ESQUEMA RELACIONAL
//! =================================================================
//!
//! `DbClient::connect` already applies every `CREATE TABLE IF NOT EXISTS`
//! statement as part of establishing the pool; this binary exists so the
//! schema can be brought up (or re-verified) without starting any worker,
//! e.g. ahead of a deploy or in a one-shot init container.

use skirmish_infra_db::DbClient;
use skirmish_shared_config::DatabaseConfig;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    skirmish_shared_config::load_dotenv();
    skirmish_shared_telemetry::init_tracing("skirmish_migrator");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_stack_size(4 * 1024 * 1024)
        .build()?;

    runtime.block_on(async {
        info!("applying relational schema");

        let db_config = DatabaseConfig::from_env()?;
        match DbClient::connect(&db_config.connection_string(), db_config.max_connections).await {
            Ok(_) => {
                info!("schema applied, ledger is ready");
                Ok(())
            }
            Err(error) => {
                error!(%error, "schema application failed");
                std::process::exit(1);
            }
        }
    })
}
