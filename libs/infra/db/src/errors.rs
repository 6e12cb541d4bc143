// [libs/infra/db/src/errors.rs]
//! Database error catalogue (spec §7 "Operational" failure class).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("database connection failed: {0}")]
    ConnectionError(String),

    #[error("query execution failed: {0}")]
    QueryError(#[from] sqlx::Error),

    #[error("could not map a database row onto a domain type: {0}")]
    MappingError(String),

    #[error("match {0} was not found in the ledger")]
    MatchNotFound(String),

    #[error("fight insertion rolled back: {0}")]
    FightTransactionFailed(String),
}
