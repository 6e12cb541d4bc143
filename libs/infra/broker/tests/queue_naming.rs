// [libs/infra/broker/tests/queue_naming.rs]
//! Topology naming coverage (spec §4.4). No live broker needed; a real
//! connection is exercised only by operators running against a local
//! RabbitMQ instance.

use chrono::Utc;
use skirmish_infra_broker::{DiscoveredPayload, MessagePriority, QueueStep};

#[test]
fn queue_and_exchange_names_follow_type_step_env() {
    assert_eq!(QueueStep::Discovered.queue_name("prod"), "match.discovered.prod");
    assert_eq!(
        QueueStep::ProcessingTelemetry.queue_name("staging"),
        "match.processing.telemetry.staging"
    );
    assert_eq!(QueueStep::exchange_name("prod"), "match.exchange.prod");
}

#[test]
fn routing_key_mirrors_step_name() {
    assert_eq!(QueueStep::Telemetry.routing_key(), "match.telemetry");
    assert_eq!(QueueStep::Stats.routing_key(), "match.stats");
}

#[test]
fn priority_maps_to_amqp_scale() {
    assert_eq!(MessagePriority::Normal.as_amqp_priority(), 4);
    assert_eq!(MessagePriority::High.as_amqp_priority(), 8);
    assert!(MessagePriority::High > MessagePriority::Normal);
}

#[test]
fn discovered_payload_round_trips_through_json() {
    let payload = DiscoveredPayload {
        match_id: "match-1".to_string(),
        timestamp: Utc::now(),
        source: "main".to_string(),
        environment: "prod".to_string(),
        queue_target: QueueStep::Discovered.queue_name("prod"),
    };
    let encoded = serde_json::to_vec(&payload).unwrap();
    let decoded: DiscoveredPayload = serde_json::from_slice(&encoded).unwrap();
    assert_eq!(decoded.match_id, payload.match_id);
    assert_eq!(decoded.queue_target, "match.discovered.prod");
}
