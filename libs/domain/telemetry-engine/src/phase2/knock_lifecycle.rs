// [libs/domain/telemetry-engine/src/phase2/knock_lifecycle.rs]
//! Knock lifecycle / finishing metrics (spec §4.9 Phase 2): resolves every
//! knock's outcome against later kill/revive events and samples teammate
//! proximity in a +/-5s window around the knock.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use skirmish_domain_models::{
    FinishingDistanceHistogram, KnockEvent, KnockOutcome, PlayerFinishingSummary, TeammateProximitySnapshot,
    TeammateSupportHistogram, TelemetryEvent,
};

/// Half-width of the teammate-position sampling window around a knock.
const PROXIMITY_WINDOW: i64 = 5;

struct PositionSample {
    name: String,
    team_id: i32,
    location: skirmish_domain_models::Location3D,
    timestamp: DateTime<Utc>,
    /// True when sourced from `LogPlayerTakeDamage`, the primary position
    /// source (spec §14(a)); `LogPlayerPosition` samples are the fallback.
    primary: bool,
}

pub fn extract_knock_events(match_id: &str, events: &[TelemetryEvent]) -> Vec<KnockEvent> {
    let positions = collect_positions(events);

    let mut kills_by_dbno: HashMap<i64, (DateTime<Utc>, Option<skirmish_domain_models::EventCharacter>)> =
        HashMap::new();
    let mut revives_by_dbno: HashMap<i64, ()> = HashMap::new();
    for event in events {
        match event {
            TelemetryEvent::LogPlayerKillV2 { timestamp, finisher, dbno_id, .. } => {
                kills_by_dbno.insert(*dbno_id, (*timestamp, finisher.clone()));
            }
            TelemetryEvent::LogPlayerRevive { dbno_id, .. } => {
                revives_by_dbno.insert(*dbno_id, ());
            }
            _ => {}
        }
    }

    events
        .iter()
        .filter_map(|event| match event {
            TelemetryEvent::LogPlayerMakeGroggy {
                timestamp,
                attacker,
                victim,
                dbno_id,
                damage_reason,
                damage_type_category,
                damage_causer_name,
                distance,
            } => {
                let (outcome, finisher_name, finisher_is_self, finisher_is_teammate, time_to_finish) =
                    match (kills_by_dbno.get(dbno_id), revives_by_dbno.get(dbno_id)) {
                        (Some((kill_time, finisher)), _) => {
                            let finisher_name = finisher.as_ref().map(|f| f.name.clone());
                            let is_self = match (attacker, finisher) {
                                (Some(attacker), Some(finisher)) => attacker.name == finisher.name,
                                _ => false,
                            };
                            let is_teammate = match (attacker, finisher) {
                                (Some(attacker), Some(finisher)) => !is_self && attacker.team_id == finisher.team_id,
                                _ => false,
                            };
                            let elapsed = (*kill_time - *timestamp).num_milliseconds() as f64 / 1000.0;
                            (KnockOutcome::Killed, finisher_name, is_self, is_teammate, Some(elapsed))
                        }
                        (None, Some(())) => (KnockOutcome::Revived, None, false, false, None),
                        (None, None) => (KnockOutcome::Unknown, None, false, false, None),
                    };

                let proximity = attacker
                    .as_ref()
                    .map(|a| proximity_snapshot(&positions, a, *timestamp))
                    .unwrap_or_default();

                Some(KnockEvent {
                    match_id: match_id.to_string(),
                    attacker_name: attacker.as_ref().map(|a| a.name.clone()),
                    victim_name: victim.name.clone(),
                    weapon: damage_causer_name.clone(),
                    attacker_location: attacker.as_ref().map(|a| a.location),
                    victim_location: victim.location,
                    distance: *distance,
                    damage_reason: damage_reason.clone(),
                    damage_type_category: damage_type_category.clone(),
                    dbno_id: *dbno_id,
                    knocked_at: *timestamp,
                    outcome,
                    finisher_name,
                    finisher_is_self,
                    finisher_is_teammate,
                    time_to_finish,
                    proximity,
                })
            }
            _ => None,
        })
        .collect()
}

/// Builds the teammate-position pool, `LogPlayerTakeDamage` attacker/victim
/// locations first, `LogPlayerPosition` samples as fallback (spec §14(a):
/// damage-event positions are the primary source within the proximity
/// window; idle-tick positions only cover teammates a damage event missed).
fn collect_positions(events: &[TelemetryEvent]) -> Vec<PositionSample> {
    let mut samples = Vec::new();
    for event in events {
        match event {
            TelemetryEvent::LogPlayerTakeDamage { timestamp, attacker, victim, .. } => {
                if let Some(attacker) = attacker {
                    samples.push(PositionSample {
                        name: attacker.name.clone(),
                        team_id: attacker.team_id,
                        location: attacker.location,
                        timestamp: *timestamp,
                        primary: true,
                    });
                }
                samples.push(PositionSample {
                    name: victim.name.clone(),
                    team_id: victim.team_id,
                    location: victim.location,
                    timestamp: *timestamp,
                    primary: true,
                });
            }
            TelemetryEvent::LogPlayerPosition { timestamp, character } => {
                samples.push(PositionSample {
                    name: character.name.clone(),
                    team_id: character.team_id,
                    location: character.location,
                    timestamp: *timestamp,
                    primary: false,
                });
            }
            _ => {}
        }
    }
    samples
}

fn proximity_snapshot(
    positions: &[PositionSample],
    knocker: &skirmish_domain_models::EventCharacter,
    at: DateTime<Utc>,
) -> TeammateProximitySnapshot {
    let window_start = at - Duration::seconds(PROXIMITY_WINDOW);
    let window_end = at + Duration::seconds(PROXIMITY_WINDOW);

    // Closest-in-time primary (damage-event) sample per teammate inside the
    // window; `LogPlayerPosition` only fills in teammates primary missed.
    let mut nearest_primary: HashMap<&str, &PositionSample> = HashMap::new();
    let mut nearest_fallback: HashMap<&str, &PositionSample> = HashMap::new();
    for sample in positions {
        if sample.team_id != knocker.team_id || sample.name == knocker.name {
            continue;
        }
        if sample.timestamp < window_start || sample.timestamp > window_end {
            continue;
        }
        let bucket = if sample.primary { &mut nearest_primary } else { &mut nearest_fallback };
        let gap = (sample.timestamp - at).num_milliseconds().abs();
        match bucket.get(sample.name.as_str()) {
            Some(existing) if (existing.timestamp - at).num_milliseconds().abs() <= gap => {}
            _ => {
                bucket.insert(sample.name.as_str(), sample);
            }
        }
    }

    let mut nearest_sample = nearest_fallback;
    nearest_sample.extend(nearest_primary);

    let distances: Vec<f64> = nearest_sample.values().map(|sample| knocker.location.distance_2d(&sample.location)).collect();

    if distances.is_empty() {
        return TeammateProximitySnapshot::default();
    }

    let mean = distances.iter().sum::<f64>() / distances.len() as f64;
    let variance = distances.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / distances.len() as f64;

    TeammateProximitySnapshot {
        nearest_teammate_distance: distances.iter().cloned().fold(None, |acc: Option<f64>, d| {
            Some(acc.map_or(d, |current| current.min(d)))
        }),
        mean_teammate_distance: Some(mean),
        within_50m: distances.iter().filter(|d| **d <= 50.0).count() as i32,
        within_100m: distances.iter().filter(|d| **d <= 100.0).count() as i32,
        within_200m: distances.iter().filter(|d| **d <= 200.0).count() as i32,
        team_spread_variance: Some(variance),
        alive_teammates: distances.len() as i32,
        per_teammate_distances: distances,
    }
}

/// Rolls per-knock rows up into the per-(match, player) finishing summary
/// (spec §4.9: distance and teammate-support histograms).
pub fn summarize_finishing(match_id: &str, knocks: &[KnockEvent]) -> Vec<PlayerFinishingSummary> {
    let mut per_player: HashMap<String, PlayerFinishingSummary> = HashMap::new();

    for knock in knocks {
        let Some(attacker_name) = &knock.attacker_name else { continue };
        let summary = per_player.entry(attacker_name.clone()).or_insert_with(|| PlayerFinishingSummary {
            match_id: match_id.to_string(),
            player_name: attacker_name.clone(),
            ..Default::default()
        });

        summary.knocks_dealt += 1;
        match knock.outcome {
            KnockOutcome::Killed if knock.finisher_name.as_deref() == Some(attacker_name.as_str()) => {
                summary.finishes_converted += 1;
            }
            KnockOutcome::Revived => summary.knocks_revived_against += 1,
            _ => {}
        }

        bucket_distance(&mut summary.distance_histogram, knock.distance);
        if let Some(nearest) = knock.proximity.nearest_teammate_distance {
            bucket_support(&mut summary.teammate_support_histogram, nearest);
        }
    }

    per_player.into_values().collect()
}

fn bucket_distance(histogram: &mut FinishingDistanceHistogram, distance: f64) {
    if distance <= 10.0 {
        histogram.bucket_0_10 += 1;
    } else if distance <= 50.0 {
        histogram.bucket_10_50 += 1;
    } else if distance <= 100.0 {
        histogram.bucket_50_100 += 1;
    } else if distance <= 200.0 {
        histogram.bucket_100_200 += 1;
    } else {
        histogram.bucket_200_plus += 1;
    }
}

fn bucket_support(histogram: &mut TeammateSupportHistogram, distance: f64) {
    if distance < 25.0 {
        histogram.bucket_under_25 += 1;
    } else if distance <= 50.0 {
        histogram.bucket_25_50 += 1;
    } else if distance <= 100.0 {
        histogram.bucket_50_100 += 1;
    } else if distance <= 200.0 {
        histogram.bucket_100_200 += 1;
    } else {
        histogram.bucket_200_plus += 1;
    }
}
