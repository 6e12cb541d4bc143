// [libs/infra/broker/src/errors.rs]
//! Failure taxonomy for the broker gateway (spec §4.4).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("amqp transport failure: {0}")]
    Transport(#[from] lapin::Error),

    #[error("payload could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("queue topology declaration failed for {queue}: {source}")]
    Topology { queue: String, source: lapin::Error },
}
