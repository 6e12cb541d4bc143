// [libs/domain/telemetry-engine/src/phase1/circle_positions.rs]
//! Circle-position sampler (spec §4.9 "Circle positions / positioning").
//! Detailed rows are written only for tracked players every `SAMPLE_EVERY`
//! periodic states; running per-player means are kept for *every* state so
//! Phase 3 can populate the per-match positional summary columns.

use std::collections::{HashMap, HashSet};

use skirmish_domain_models::{CirclePositionRow, TelemetryEvent};

use super::shared::PositionTracker;

/// Bounds sampling cost to roughly 10s of real time, assuming the upstream
/// telemetry emits a periodic game-state snapshot every ~2s.
const SAMPLE_EVERY: u32 = 5;

#[derive(Debug, Default, Clone)]
pub struct PositionalAccumulator {
    pub distance_from_center_sum: f64,
    pub distance_from_edge_sum: f64,
    pub in_zone_samples: u32,
    pub total_samples: u32,
}

impl PositionalAccumulator {
    pub fn mean_distance_from_center(&self) -> Option<f64> {
        (self.total_samples > 0).then(|| self.distance_from_center_sum / self.total_samples as f64)
    }

    pub fn mean_distance_from_edge(&self) -> Option<f64> {
        (self.total_samples > 0).then(|| self.distance_from_edge_sum / self.total_samples as f64)
    }

    pub fn mean_time_in_zone_fraction(&self) -> Option<f64> {
        (self.total_samples > 0).then(|| self.in_zone_samples as f64 / self.total_samples as f64)
    }
}

pub fn extract_circle_positions(
    match_id: &str,
    events: &[TelemetryEvent],
    tracked_players: &HashSet<String>,
) -> (Vec<CirclePositionRow>, HashMap<String, PositionalAccumulator>) {
    let mut tracker = PositionTracker::default();
    let mut rows = Vec::new();
    let mut running_means: HashMap<String, PositionalAccumulator> = HashMap::new();
    let mut state_count: u32 = 0;

    for event in events {
        match event {
            TelemetryEvent::LogPlayerPosition { character, .. } => tracker.observe(character),
            TelemetryEvent::LogGameStatePeriodic { timestamp, game_state } => {
                state_count += 1;
                let center = game_state.safety_zone_position;
                let radius = game_state.safety_zone_radius;

                let snapshot: Vec<_> = tracker.alive_players().cloned().collect();
                for character in &snapshot {
                    let distance_from_center = character.location.distance_2d(&center);
                    let distance_from_edge = radius - distance_from_center;
                    let in_zone = distance_from_center <= radius;

                    let accumulator = running_means.entry(character.name.clone()).or_default();
                    accumulator.distance_from_center_sum += distance_from_center;
                    accumulator.distance_from_edge_sum += distance_from_edge;
                    accumulator.in_zone_samples += in_zone as u32;
                    accumulator.total_samples += 1;

                    if state_count % SAMPLE_EVERY == 0 && tracked_players.contains(&character.name) {
                        rows.push(CirclePositionRow {
                            match_id: match_id.to_string(),
                            player_name: character.name.clone(),
                            phase: (state_count / SAMPLE_EVERY) as i32,
                            player_location: character.location,
                            circle_center: center,
                            circle_radius: radius,
                            distance_from_center,
                            distance_from_edge,
                            in_zone,
                            timestamp: *timestamp,
                        });
                    }
                }
            }
            _ => {}
        }
    }

    (rows, running_means)
}
