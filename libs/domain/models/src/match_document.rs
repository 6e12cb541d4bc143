// [libs/domain/models/src/match_document.rs]
//! Parsing helpers over the upstream match API's JSON:API documents (spec
//! §6 "data root plus an included array ... tagged by type in {roster,
//! participant, asset}"). Kept alongside the other small lookup-table
//! helpers in this crate (`maps::translate_map_name`,
//! `weapons::categorize_weapon`) since both discovery services and the
//! summary worker need the same document shape.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;

use crate::summary::{MatchParticipant, RosterPlacement};

/// The handful of top-level match attributes the discovery services and
/// the summary worker all need (spec §4.5, §4.7).
#[derive(Debug, Clone)]
pub struct MatchAttributes {
    pub map_name: String,
    pub game_mode: String,
    pub game_type: String,
    pub match_datetime: DateTime<Utc>,
    pub duration: i32,
}

/// Reads `data.attributes.{mapName, gameMode, matchType, duration,
/// createdAt}` off a match document. `map_name` here is still the raw
/// internal codename; callers translate it with `maps::translate_map_name`.
pub fn parse_match_attributes(document: &Value) -> Option<MatchAttributes> {
    let attributes = document.pointer("/data/attributes")?;
    Some(MatchAttributes {
        map_name: attributes.get("mapName")?.as_str()?.to_string(),
        game_mode: attributes.get("gameMode")?.as_str()?.to_string(),
        game_type: attributes.get("matchType")?.as_str().unwrap_or("unknown").to_string(),
        duration: attributes.get("duration").and_then(Value::as_i64).unwrap_or(0) as i32,
        match_datetime: attributes
            .get("createdAt")
            .and_then(Value::as_str)
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&Utc))?,
    })
}

/// Walks `data.relationships.assets.data[0].id` then finds the matching
/// `included` entry of type `asset` (spec §4.7 step 4, §6).
pub fn extract_telemetry_url(document: &Value) -> Option<String> {
    let asset_id = document
        .pointer("/data/relationships/assets/data/0/id")?
        .as_str()?;
    included_entries(document, "asset")
        .find(|entry| entry.get("id").and_then(Value::as_str) == Some(asset_id))
        .and_then(|entry| entry.pointer("/attributes/URL"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Builds the `participant_id -> {team_id, team_rank, won}` lookup from
/// `included[type=roster]` entries, each of which names its member
/// participant ids under `relationships.participants.data` (spec §4.7
/// step 5).
pub fn roster_placements(document: &Value) -> HashMap<String, RosterPlacement> {
    let mut placements = HashMap::new();
    for roster in included_entries(document, "roster") {
        let team_id = roster
            .pointer("/attributes/stats/teamId")
            .and_then(Value::as_i64)
            .unwrap_or(0) as i32;
        let team_rank = roster
            .pointer("/attributes/stats/rank")
            .and_then(Value::as_i64)
            .unwrap_or(0) as i32;
        let won = roster
            .pointer("/attributes/won")
            .and_then(Value::as_str)
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let Some(members) = roster.pointer("/relationships/participants/data").and_then(Value::as_array) else {
            continue;
        };
        for member in members {
            if let Some(participant_id) = member.get("id").and_then(Value::as_str) {
                placements.insert(participant_id.to_string(), RosterPlacement { team_id, team_rank, won });
            }
        }
    }
    placements
}

/// Emits one `MatchParticipant` per `included[type=participant]` entry,
/// joining the roster placement lookup and translating raw stat fields
/// (spec §4.7 step 6).
pub fn participant_rows(
    document: &Value,
    match_id: &str,
    placements: &HashMap<String, RosterPlacement>,
) -> Vec<MatchParticipant> {
    included_entries(document, "participant")
        .filter_map(|entry| {
            let participant_id = entry.get("id")?.as_str()?.to_string();
            let stats = entry.pointer("/attributes/stats")?;
            let placement = placements.get(&participant_id).copied().unwrap_or(RosterPlacement {
                team_id: 0,
                team_rank: 0,
                won: false,
            });

            Some(MatchParticipant {
                match_id: match_id.to_string(),
                participant_id,
                player_name: stat_str(stats, "name"),
                team_id: placement.team_id,
                team_rank: placement.team_rank,
                won: placement.won,
                kills: stat_i32(stats, "kills"),
                assists: stat_i32(stats, "assists"),
                dbnos: stat_i32(stats, "DBNOs"),
                damage_dealt: stat_f64(stats, "damageDealt"),
                headshot_kills: stat_i32(stats, "headshotKills"),
                longest_kill: stat_f64(stats, "longestKill"),
                ride_distance: stat_f64(stats, "rideDistance"),
                walk_distance: stat_f64(stats, "walkDistance"),
                swim_distance: stat_f64(stats, "swimDistance"),
                time_survived: stat_f64(stats, "timeSurvived"),
                revives: stat_i32(stats, "revives"),
                heals: stat_i32(stats, "heals"),
                boosts: stat_i32(stats, "boosts"),
                weapons_acquired: stat_i32(stats, "weaponsAcquired"),
                kill_place: stat_i32(stats, "killPlace"),
                win_place: stat_i32(stats, "winPlace"),
                ..Default::default()
            })
        })
        .collect()
}

/// Match ids from a single player resource's `relationships.matches.data`
/// (spec §4.5 "collects recent match ids").
pub fn player_match_ids(player: &Value) -> Vec<String> {
    player
        .pointer("/relationships/matches/data")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry.get("id").and_then(Value::as_str).map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn included_entries<'a>(document: &'a Value, kind: &'static str) -> impl Iterator<Item = &'a Value> {
    document
        .get("included")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter(move |entry| entry.get("type").and_then(Value::as_str) == Some(kind))
}

fn stat_str(stats: &Value, key: &str) -> String {
    stats.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
}

fn stat_i32(stats: &Value, key: &str) -> i32 {
    stats.get(key).and_then(Value::as_i64).unwrap_or(0) as i32
}

fn stat_f64(stats: &Value, key: &str) -> f64 {
    stats.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_document() -> Value {
        json!({
            "data": {
                "attributes": {
                    "mapName": "Baltic_Main",
                    "gameMode": "squad",
                    "matchType": "competitive",
                    "duration": 1800,
                    "createdAt": "2026-07-01T12:00:00Z"
                },
                "relationships": { "assets": { "data": [ { "id": "asset-1" } ] } }
            },
            "included": [
                { "type": "asset", "id": "asset-1", "attributes": { "URL": "https://cdn.example/telemetry.json" } },
                {
                    "type": "roster", "id": "roster-1",
                    "attributes": { "won": "true", "stats": { "rank": 1, "teamId": 3 } },
                    "relationships": { "participants": { "data": [ { "id": "participant-1" } ] } }
                },
                {
                    "type": "participant", "id": "participant-1",
                    "attributes": { "stats": { "name": "alpha", "kills": 4, "damageDealt": 321.5 } }
                }
            ]
        })
    }

    #[test]
    fn parses_top_level_attributes() {
        let attrs = parse_match_attributes(&sample_document()).unwrap();
        assert_eq!(attrs.map_name, "Baltic_Main");
        assert_eq!(attrs.game_type, "competitive");
        assert_eq!(attrs.duration, 1800);
    }

    #[test]
    fn resolves_telemetry_url_via_the_matching_asset() {
        assert_eq!(
            extract_telemetry_url(&sample_document()).as_deref(),
            Some("https://cdn.example/telemetry.json")
        );
    }

    #[test]
    fn joins_roster_placement_onto_the_participant_row() {
        let doc = sample_document();
        let placements = roster_placements(&doc);
        let rows = participant_rows(&doc, "m1", &placements);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].player_name, "alpha");
        assert_eq!(rows[0].team_id, 3);
        assert_eq!(rows[0].team_rank, 1);
        assert!(rows[0].won);
        assert_eq!(rows[0].kills, 4);
    }

    #[test]
    fn collects_match_ids_from_a_player_resource() {
        let player = json!({
            "relationships": { "matches": { "data": [ { "id": "m1" }, { "id": "m2" } ] } }
        });
        assert_eq!(player_match_ids(&player), vec!["m1".to_string(), "m2".to_string()]);
    }
}
