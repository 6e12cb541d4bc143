// [libs/infra/db/src/repositories/ledger/queries.rs]
//! SQL constants for the match ledger (spec §4.3, §6, §8 "Ledger uniqueness").

pub const INSERT_IF_NOT_EXISTS: &str = r#"
    INSERT INTO matches (
        match_id, map_name, game_mode, game_type, match_datetime, duration,
        telemetry_url, status, discovered_by, discovery_priority
    ) VALUES ($1, $2, $3, $4, $5, $6, $7, 'discovered', $8, $9)
    ON CONFLICT (match_id) DO NOTHING
"#;

pub const INSERT_FAILED_PLACEHOLDER: &str = r#"
    INSERT INTO matches (
        match_id, map_name, game_mode, game_type, match_datetime, duration,
        status, error_message, discovered_by, discovery_priority
    ) VALUES ($1, '', '', '', $2, 0, 'failed', $3, $4, $5)
    ON CONFLICT (match_id) DO NOTHING
"#;

pub const FIND_BY_ID: &str = r#"
    SELECT
        match_id, map_name, game_mode, game_type, match_datetime, duration,
        telemetry_url, status, error_message, is_tournament_match,
        discovered_by, discovery_priority, round_ref, schedule_slot_ref,
        validation_status, team_count, unmatched_player_count,
        summaries_processed, telemetry_downloaded, landings_processed,
        kills_processed, circles_processed, weapons_processed,
        damage_processed, finishing_processed, fights_processed,
        stats_aggregated, stats_aggregated_at
    FROM matches WHERE match_id = $1
"#;

pub const MARK_FAILED: &str = r#"
    UPDATE matches SET status = 'failed', error_message = $2 WHERE match_id = $1
"#;

pub const SET_STATUS: &str = "UPDATE matches SET status = $2 WHERE match_id = $1";

pub const SET_TELEMETRY_URL: &str =
    "UPDATE matches SET telemetry_url = $2 WHERE match_id = $1";

pub const FLIP_SUMMARIES_PROCESSED: &str =
    "UPDATE matches SET summaries_processed = TRUE WHERE match_id = $1 AND summaries_processed = FALSE";
pub const FLIP_TELEMETRY_DOWNLOADED: &str =
    "UPDATE matches SET telemetry_downloaded = TRUE WHERE match_id = $1 AND telemetry_downloaded = FALSE";
pub const FLIP_LANDINGS_PROCESSED: &str =
    "UPDATE matches SET landings_processed = TRUE WHERE match_id = $1 AND landings_processed = FALSE";
pub const FLIP_KILLS_PROCESSED: &str =
    "UPDATE matches SET kills_processed = TRUE WHERE match_id = $1 AND kills_processed = FALSE";
pub const FLIP_CIRCLES_PROCESSED: &str =
    "UPDATE matches SET circles_processed = TRUE WHERE match_id = $1 AND circles_processed = FALSE";
pub const FLIP_WEAPONS_PROCESSED: &str =
    "UPDATE matches SET weapons_processed = TRUE WHERE match_id = $1 AND weapons_processed = FALSE";
pub const FLIP_DAMAGE_PROCESSED: &str =
    "UPDATE matches SET damage_processed = TRUE WHERE match_id = $1 AND damage_processed = FALSE";
pub const FLIP_FINISHING_PROCESSED: &str =
    "UPDATE matches SET finishing_processed = TRUE WHERE match_id = $1 AND finishing_processed = FALSE";
pub const FLIP_FIGHTS_PROCESSED: &str =
    "UPDATE matches SET fights_processed = TRUE WHERE match_id = $1 AND fights_processed = FALSE";

pub const MARK_STATS_AGGREGATED: &str = r#"
    UPDATE matches SET stats_aggregated = TRUE, stats_aggregated_at = now()
    WHERE match_id = $1
"#;

pub const RESET_STATS_AGGREGATED_FOR_BACKFILL: &str = r#"
    UPDATE matches SET stats_aggregated = FALSE, stats_aggregated_at = NULL
    WHERE match_id = $1
"#;

pub const SET_TOURNAMENT_CONTEXT: &str = r#"
    UPDATE matches SET
        is_tournament_match = $2,
        validation_status = $3,
        team_count = $4,
        unmatched_player_count = $5,
        round_ref = $6,
        schedule_slot_ref = $7
    WHERE match_id = $1
"#;

pub const FETCH_PENDING_AGGREGATION: &str = r#"
    SELECT match_id FROM matches
    WHERE status = 'complete' AND stats_aggregated = FALSE
    ORDER BY match_datetime ASC
    LIMIT $1
"#;

pub const FETCH_MATCH_IDS_FOR_BACKFILL: &str = r#"
    SELECT DISTINCT m.match_id FROM matches m
    JOIN match_summaries s ON s.match_id = m.match_id
    WHERE s.player_name = $1
      AND m.status = 'complete'
      AND m.match_datetime >= now() - ($2::text || ' days')::interval
"#;
