// [libs/domain/telemetry-engine/src/errors.rs]
//! Failure taxonomy for loading and processing a match's telemetry.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("could not read telemetry file: {0}")]
    Io(#[from] std::io::Error),

    #[error("telemetry body is not a valid event array: {0}")]
    MalformedTelemetry(#[from] serde_json::Error),
}
