// [libs/domain/models/tests/serialization.rs]
//! Round-trip and fixed-table checks for the shared domain models.

use skirmish_domain_models::{
    categorize_weapon, is_npc, translate_map_name, DiscoveredPayload, MessagePriority, QueueStep,
    WeaponCategory,
};

#[test]
fn queue_step_names_follow_the_type_step_env_convention() {
    assert_eq!(QueueStep::Discovered.queue_name("prod"), "match.discovered.prod");
    assert_eq!(
        QueueStep::ProcessingTelemetry.queue_name("staging"),
        "match.processing.telemetry.staging"
    );
    assert_eq!(QueueStep::exchange_name("prod"), "match.exchange.prod");
}

#[test]
fn high_priority_outranks_normal() {
    assert!(MessagePriority::High > MessagePriority::Normal);
    assert!(MessagePriority::High.as_amqp_priority() > MessagePriority::Normal.as_amqp_priority());
}

#[test]
fn discovered_payload_round_trips_through_json() {
    let payload = DiscoveredPayload {
        match_id: "m1".into(),
        timestamp: chrono::Utc::now(),
        source: "main".into(),
        environment: "prod".into(),
        queue_target: "match.discovered.prod".into(),
    };
    let encoded = serde_json::to_string(&payload).unwrap();
    let decoded: DiscoveredPayload = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded.match_id, payload.match_id);
}

#[test]
fn npc_roster_is_excluded() {
    assert!(is_npc("Pillar"));
    assert!(is_npc("ZombieSoldier"));
    assert!(!is_npc("xXSniperXx"));
}

#[test]
fn map_translation_is_total_and_passthrough_on_unknown() {
    assert_eq!(translate_map_name("Savage_Main"), "Sanhok");
    assert_eq!(translate_map_name("Unreleased_Main"), "Unreleased_Main");
}

#[test]
fn weapon_category_covers_every_family() {
    assert_eq!(categorize_weapon("WeapM416_C"), WeaponCategory::Ar);
    assert_eq!(categorize_weapon("WeapS12K_C"), WeaponCategory::Shotgun);
    assert_eq!(categorize_weapon("WeapMachete_C"), WeaponCategory::Melee);
}
