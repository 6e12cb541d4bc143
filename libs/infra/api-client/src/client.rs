// [libs/infra/api-client/src/client.rs]
//! =================================================================
//! APARATO: CLIENTE TIPADO DEL API PUBLICO DE PARTIDAS
//! =================================================================
//!
//! Three operations sit on top of the credential pool: player lookup
//! (chunked in groups of 10), single-match fetch, and telemetry download
//! with atomic rename. Every call retries up to three times with
//! exponential backoff before surfacing the typed error.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use flate2::write::GzEncoder;
use flate2::Compression;
use futures_util::StreamExt;
use serde_json::Value;
use tracing::{instrument, warn};

use crate::credential_pool::CredentialPool;
use crate::errors::ClientError;

const MAX_NAMES_PER_CHUNK: usize = 10;
const MAX_ATTEMPTS: u32 = 3;
const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    pool: CredentialPool,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, pool: CredentialPool) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("building the reqwest client should never fail"),
            base_url: base_url.into(),
            pool,
        }
    }

    /// Accepts an unbounded list of player names and chunks it into groups
    /// of 10 internally (spec §4.2), returning the concatenation of every
    /// chunk's players array.
    #[instrument(skip(self, names))]
    pub async fn lookup_players(&self, names: &[String]) -> Result<Vec<Value>, ClientError> {
        let mut results = Vec::with_capacity(names.len());
        for chunk in names.chunks(MAX_NAMES_PER_CHUNK) {
            let filter = chunk.join(",");
            let url = format!(
                "{}/players?filter[playerNames]={}",
                self.base_url, filter
            );
            let body = self.get_json(&url).await?;
            let players = body
                .get("data")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            results.extend(players);
        }
        Ok(results)
    }

    #[instrument(skip(self))]
    pub async fn get_match(&self, match_id: &str) -> Result<Value, ClientError> {
        let url = format!("{}/matches/{}", self.base_url, match_id);
        self.get_json(&url).await
    }

    /// Streams `url` to a temp file beside `dest`, verifies/normalizes gzip
    /// framing, then renames atomically into place (spec §4.2, §4.8).
    #[instrument(skip(self))]
    pub async fn download_telemetry(&self, url: &str, dest: &Path) -> Result<u64, ClientError> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.download_once(url, dest).await {
                Ok(size) => return Ok(size),
                Err(err) if attempt < MAX_ATTEMPTS => {
                    warn!(attempt, error = %err, "telemetry download attempt failed, retrying");
                    tokio::time::sleep(backoff_delay(attempt)).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn download_once(&self, url: &str, dest: &Path) -> Result<u64, ClientError> {
        let lease = self.pool.lease().await;
        self.pool.record_request(&lease, Utc::now()).await;

        let response = self
            .http
            .get(url)
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {}", lease.secret))
            .timeout(Duration::from_secs(120))
            .send()
            .await?;

        if response.status().as_u16() == 429 {
            self.pool.record_throttled(&lease).await;
            return Err(ClientError::Throttled);
        }
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound);
        }
        if !response.status().is_success() {
            return Err(ClientError::MalformedResponse(format!(
                "unexpected status {}",
                response.status()
            )));
        }

        let parent = dest.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)?;
        let tmp_path = parent.join(format!(
            ".{}.part",
            dest.file_name().and_then(|n| n.to_str()).unwrap_or("download")
        ));

        let mut body = response.bytes_stream();
        let mut first_bytes: Vec<u8> = Vec::new();
        let mut raw_file = std::fs::File::create(&tmp_path)?;
        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            if first_bytes.len() < 2 {
                first_bytes.extend(chunk.iter().take(2 - first_bytes.len()));
            }
            raw_file.write_all(&chunk)?;
        }
        drop(raw_file);

        let is_gzip = first_bytes.len() >= 2 && first_bytes[..2] == GZIP_MAGIC;
        if !is_gzip {
            let raw = std::fs::read(&tmp_path)?;
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&raw)?;
            let compressed = encoder.finish()?;
            std::fs::write(&tmp_path, compressed)?;
        }

        let size = std::fs::metadata(&tmp_path)?.len();
        std::fs::rename(&tmp_path, dest)?;
        Ok(size)
    }

    async fn get_json(&self, url: &str) -> Result<Value, ClientError> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.get_json_once(url).await {
                Ok(value) => return Ok(value),
                Err(ClientError::Throttled) if attempt < MAX_ATTEMPTS => {
                    tokio::time::sleep(backoff_delay(attempt)).await;
                }
                Err(err) if attempt < MAX_ATTEMPTS && matches!(err, ClientError::TransportError(_)) => {
                    warn!(attempt, error = %err, "request attempt failed, retrying");
                    tokio::time::sleep(backoff_delay(attempt)).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn get_json_once(&self, url: &str) -> Result<Value, ClientError> {
        let lease = self.pool.lease().await;
        self.pool.record_request(&lease, Utc::now()).await;

        let response = self
            .http
            .get(url)
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {}", lease.secret))
            .send()
            .await?;

        if response.status().as_u16() == 429 {
            self.pool.record_throttled(&lease).await;
            return Err(ClientError::Throttled);
        }
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound);
        }
        if !response.status().is_success() {
            return Err(ClientError::MalformedResponse(format!(
                "unexpected status {}",
                response.status()
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ClientError::MalformedResponse(e.to_string()))
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(200u64 * 2u64.pow(attempt.min(5)))
}
