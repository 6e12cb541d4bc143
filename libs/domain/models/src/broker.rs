// [libs/domain/models/src/broker.rs]
//! Wire shapes published/consumed through the broker gateway (spec §4.4, §6).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The fixed set of (type, step) pairs the gateway supports (spec §4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueStep {
    Discovered,
    Telemetry,
    ProcessingTelemetry,
    Stats,
}

impl QueueStep {
    pub fn topic_type(&self) -> &'static str {
        "match"
    }

    pub fn step_name(&self) -> &'static str {
        match self {
            QueueStep::Discovered => "discovered",
            QueueStep::Telemetry => "telemetry",
            QueueStep::ProcessingTelemetry => "processing.telemetry",
            QueueStep::Stats => "stats",
        }
    }

    /// `{type}.{step}.{env}` queue name (spec §4.4 naming).
    pub fn queue_name(&self, environment: &str) -> String {
        format!("{}.{}.{}", self.topic_type(), self.step_name(), environment)
    }

    /// `{type}.exchange.{env}` exchange name (spec §4.4 naming).
    pub fn exchange_name(environment: &str) -> String {
        format!("match.exchange.{environment}")
    }

    /// Topic routing key bound to the queue: mirrors the step name so a
    /// topic exchange with wildcard bindings still routes exact matches.
    pub fn routing_key(&self) -> String {
        format!("match.{}", self.step_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessagePriority {
    Normal,
    High,
}

impl MessagePriority {
    /// AMQP basic-properties priority value (0-9 scale, higher delivered
    /// first when the queue honors priority).
    pub fn as_amqp_priority(&self) -> u8 {
        match self {
            MessagePriority::Normal => 4,
            MessagePriority::High => 8,
        }
    }
}

/// `match.discovered` payload (spec §4.5, §4.6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveredPayload {
    pub match_id: String,
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub environment: String,
    pub queue_target: String,
}

/// `match.telemetry` payload (spec §4.7 step 9).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryReadyPayload {
    pub match_id: String,
    pub telemetry_url: String,
    pub map_name: String,
    pub game_mode: String,
    pub match_datetime: DateTime<Utc>,
    pub participant_count: i32,
    pub worker_id: String,
    pub environment: String,
    pub queue_target: String,
}

/// `match.processing.telemetry` payload (spec §4.8 step 5).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingReadyPayload {
    pub match_id: String,
    pub telemetry_file_path: String,
    pub file_size_bytes: i64,
    pub environment: String,
    pub queue_target: String,
}

/// Result a consumer handler hands back to the gateway (spec §4.4
/// "Consumption contract").
#[derive(Debug, Clone)]
pub enum HandlerOutcome {
    Ok,
    Error(String),
}
