// [libs/infra/api-client/src/errors.rs]
//! Error catalogue for the credential pool and upstream client (spec §4.2
//! "typed error {TransportError | NotFound | Throttled | MalformedResponse}").

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("transport error contacting upstream API: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("upstream resource not found")]
    NotFound,

    #[error("upstream rate-limited this request (HTTP 429)")]
    Throttled,

    #[error("upstream response did not match the expected shape: {0}")]
    MalformedResponse(String),

    #[error("filesystem error while handling telemetry: {0}")]
    Io(#[from] std::io::Error),
}
