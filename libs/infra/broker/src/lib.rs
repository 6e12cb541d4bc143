// [libs/infra/broker/src/lib.rs]
//! Topic-exchange gateway for the four `match.*` queues.

mod errors;
mod gateway;

pub use errors::BrokerError;
pub use gateway::{Gateway, MessageHandler};
pub use skirmish_domain_models::{
    DiscoveredPayload, HandlerOutcome, MessagePriority, ProcessingReadyPayload, QueueStep,
    TelemetryReadyPayload,
};
