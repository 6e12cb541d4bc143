// [libs/infra/db/src/client.rs]
//! =================================================================
//! APARATO: DATABASE CONNECTION CLIENT
//! RESPONSABILIDAD: POOL DE CONEXIONES POSTGRESQL Y BOOTSTRAP DE ESQUEMA
//! =================================================================
//!
//! One pooled connection per worker (spec §5), no long-lived transactions.
//! `connect` both builds the pool and applies the schema, mirroring the
//! teacher's single entry point that returns a ready-to-use client.

use sqlx::postgres::{PgPoolOptions, PgPool};
use tracing::{info, instrument};

use crate::errors::DbError;
use crate::schema::SCHEMA_STATEMENTS;

#[derive(Clone)]
pub struct DbClient {
    pool: PgPool,
}

impl DbClient {
    #[instrument(skip(connection_string))]
    pub async fn connect(connection_string: &str, max_connections: u32) -> Result<Self, DbError> {
        info!("connecting to postgres");
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(connection_string)
            .await
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;

        Self::apply_schema(&pool).await?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn apply_schema(pool: &PgPool) -> Result<(), DbError> {
        for statement in SCHEMA_STATEMENTS {
            sqlx::query(statement).execute(pool).await?;
        }
        Ok(())
    }
}
