// [libs/domain/telemetry-engine/src/phase1/landings.rs]
//! Parachute landing extractor (spec §4.9 "Landings").

use skirmish_domain_models::{LandingRow, TelemetryEvent};

pub fn extract_landings(match_id: &str, events: &[TelemetryEvent]) -> Vec<LandingRow> {
    events
        .iter()
        .filter_map(|event| match event {
            TelemetryEvent::LogParachuteLanding { timestamp, character } => Some(LandingRow {
                match_id: match_id.to_string(),
                player_name: character.name.clone(),
                team_id: character.team_id,
                location: character.location,
                timestamp: *timestamp,
                // A landing at the map origin is the bogus placeholder the
                // upstream telemetry emits when a character disconnects
                // mid-drop rather than a real touchdown.
                is_valid: character.location.x != 0.0 || character.location.y != 0.0,
            }),
            _ => None,
        })
        .collect()
}
