// [libs/shared/config/src/lib.rs]
//! =================================================================
//! APARATO: CONFIGURATION LOADER (V1.0)
//! RESPONSABILIDAD: CARGA TIPADA Y FAIL-FAST DE PERILLAS DE SERVICIO
//! =================================================================
//!
//! Two concerns live here: (1) environment-variable wiring for the
//! database, broker and credential pools (spec §6's `POSTGRES_*`,
//! `API_KEYS_MAIN`/`API_KEYS_TOURNAMENT`, broker host/port/credentials),
//! and (2) the per-service scheduling/sampling knob file, which must
//! reject unrecognized options at startup rather than silently ignore
//! them (spec §6: "Unrecognized options fail fast at start"). `serde`'s
//! `deny_unknown_fields` gives us that for free on the TOML side.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("environment variable {0} has an invalid value: {1}")]
    InvalidEnvVar(String, String),
    #[error("failed to read config file {0}: {1}")]
    ReadFailed(String, std::io::Error),
    #[error("config file {0} contains unrecognized or malformed options: {1}")]
    ParseFailed(String, toml::de::Error),
}

/// Loads `.env` (if present) once; safe to call multiple times per process.
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port_raw = env_or("POSTGRES_PORT", "5432");
        let port = port_raw
            .parse()
            .map_err(|_| ConfigError::InvalidEnvVar("POSTGRES_PORT".into(), port_raw))?;

        Ok(Self {
            host: require_env("POSTGRES_HOST")?,
            port,
            database: require_env("POSTGRES_DB")?,
            user: require_env("POSTGRES_USER")?,
            password: require_env("POSTGRES_PASSWORD")?,
            max_connections: env_or("POSTGRES_MAX_CONNECTIONS", "10")
                .parse()
                .unwrap_or(10),
        })
    }

    pub fn connection_string(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        )
    }
}

#[derive(Debug, Clone)]
pub struct BrokerConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub environment: String,
}

impl BrokerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_or("BROKER_HOST", "localhost"),
            port: env_or("BROKER_PORT", "5672")
                .parse()
                .map_err(|_| ConfigError::InvalidEnvVar("BROKER_PORT".into(), "not a u16".into()))?,
            user: env_or("BROKER_USER", "guest"),
            password: env_or("BROKER_PASSWORD", "guest"),
            environment: env_or("ENVIRONMENT", "dev"),
        })
    }

    pub fn amqp_uri(&self) -> String {
        format!(
            "amqp://{}:{}@{}:{}/%2f",
            self.user, self.password, self.host, self.port
        )
    }
}

/// `API_KEYS_MAIN` / `API_KEYS_TOURNAMENT` (spec §6), comma-separated
/// `secret:rpm_limit` pairs, or bare secrets defaulting to `rpm_limit`.
#[derive(Debug, Clone)]
pub struct CredentialPoolsConfig {
    pub main_keys: Vec<(String, u32)>,
    pub tournament_keys: Vec<(String, u32)>,
}

const DEFAULT_RPM_LIMIT: u32 = 10;

fn parse_key_list(raw: &str) -> Vec<(String, u32)> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|entry| match entry.split_once(':') {
            Some((secret, rpm)) => (
                secret.to_string(),
                rpm.parse().unwrap_or(DEFAULT_RPM_LIMIT),
            ),
            None => (entry.to_string(), DEFAULT_RPM_LIMIT),
        })
        .collect()
}

impl CredentialPoolsConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let main_raw = require_env("API_KEYS_MAIN")?;
        let tournament_raw = require_env("API_KEYS_TOURNAMENT")?;
        Ok(Self {
            main_keys: parse_key_list(&main_raw),
            tournament_keys: parse_key_list(&tournament_raw),
        })
    }
}

/// The per-service scheduling/sampling knobs named in spec §6. `#[serde(deny_unknown_fields)]`
/// makes an unrecognized TOML key a load-time error instead of a silently
/// dropped setting.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServiceScheduleConfig {
    pub sample_size: u32,
    pub interval_seconds: u64,
    pub match_type: Vec<String>,
    pub schedule_enabled: bool,
    pub schedule_days: Vec<u8>,
    pub schedule_start: String,
    pub schedule_end: String,
    pub adaptive_sampling: bool,
    pub batch_size: u32,
    pub aggregation_interval_seconds: u64,
    pub backfill_window_days: u32,
}

impl Default for ServiceScheduleConfig {
    fn default() -> Self {
        Self {
            sample_size: 6,
            interval_seconds: 60,
            match_type: vec!["competitive".into(), "official".into(), "custom-esports".into()],
            schedule_enabled: false,
            schedule_days: vec![0, 1, 2, 3, 4, 5, 6],
            schedule_start: "00:00".into(),
            schedule_end: "23:59".into(),
            adaptive_sampling: true,
            batch_size: 100,
            aggregation_interval_seconds: 300,
            backfill_window_days: 180,
        }
    }
}

/// Loads a `ServiceScheduleConfig` from a TOML file, failing fast on any
/// unrecognized key rather than starting the service half-configured.
pub fn load_service_schedule(path: &str) -> Result<ServiceScheduleConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ReadFailed(path.to_string(), e))?;
    toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(path.to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_matches_spec_defaults() {
        let cfg = ServiceScheduleConfig::default();
        assert_eq!(cfg.sample_size, 6);
        assert_eq!(cfg.backfill_window_days, 180);
    }

    #[test]
    fn parses_key_list_with_and_without_explicit_rpm() {
        let parsed = parse_key_list("abc:20, def");
        assert_eq!(parsed, vec![("abc".to_string(), 20), ("def".to_string(), DEFAULT_RPM_LIMIT)]);
    }
}
