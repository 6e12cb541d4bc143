// [libs/infra/db/src/schema.rs]
//! Schema bootstrap for the pipeline's relational surface (spec §6). Applied
//! idempotently (`CREATE TABLE IF NOT EXISTS`) by `DbClient::connect` and by
//! the `migrator` binary. Physical administration (backups, replication) is
//! out of scope (spec §1), this is just enough DDL for the application to
//! run against a fresh database.

pub const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS matches (
        match_id TEXT PRIMARY KEY,
        map_name TEXT NOT NULL,
        game_mode TEXT NOT NULL,
        game_type TEXT NOT NULL,
        match_datetime TIMESTAMPTZ NOT NULL,
        duration INTEGER NOT NULL,
        telemetry_url TEXT,
        status TEXT NOT NULL DEFAULT 'discovered',
        error_message TEXT,
        is_tournament_match BOOLEAN NOT NULL DEFAULT FALSE,
        discovered_by TEXT NOT NULL,
        discovery_priority TEXT NOT NULL DEFAULT 'normal',
        round_ref TEXT,
        schedule_slot_ref TEXT,
        validation_status TEXT NOT NULL DEFAULT 'not_tournament',
        team_count INTEGER NOT NULL DEFAULT 0,
        unmatched_player_count INTEGER NOT NULL DEFAULT 0,
        summaries_processed BOOLEAN NOT NULL DEFAULT FALSE,
        telemetry_downloaded BOOLEAN NOT NULL DEFAULT FALSE,
        landings_processed BOOLEAN NOT NULL DEFAULT FALSE,
        kills_processed BOOLEAN NOT NULL DEFAULT FALSE,
        circles_processed BOOLEAN NOT NULL DEFAULT FALSE,
        weapons_processed BOOLEAN NOT NULL DEFAULT FALSE,
        damage_processed BOOLEAN NOT NULL DEFAULT FALSE,
        finishing_processed BOOLEAN NOT NULL DEFAULT FALSE,
        fights_processed BOOLEAN NOT NULL DEFAULT FALSE,
        stats_aggregated BOOLEAN NOT NULL DEFAULT FALSE,
        stats_aggregated_at TIMESTAMPTZ
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_matches_datetime ON matches (match_datetime)",
    "CREATE INDEX IF NOT EXISTS idx_matches_status ON matches (status)",
    "CREATE INDEX IF NOT EXISTS idx_matches_map ON matches (map_name)",
    "CREATE INDEX IF NOT EXISTS idx_matches_game_mode ON matches (game_mode)",
    "CREATE INDEX IF NOT EXISTS idx_matches_pending_summaries ON matches (match_id) WHERE summaries_processed = FALSE",
    "CREATE INDEX IF NOT EXISTS idx_matches_pending_telemetry ON matches (match_id) WHERE telemetry_downloaded = FALSE",
    "CREATE INDEX IF NOT EXISTS idx_matches_pending_fights ON matches (match_id) WHERE fights_processed = FALSE",
    "CREATE INDEX IF NOT EXISTS idx_matches_pending_aggregation ON matches (match_id) WHERE stats_aggregated = FALSE",
    r#"
    CREATE TABLE IF NOT EXISTS players (
        player_id TEXT PRIMARY KEY,
        player_name TEXT NOT NULL,
        platform TEXT NOT NULL,
        tracking_enabled BOOLEAN NOT NULL DEFAULT TRUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS teams (
        team_ref TEXT PRIMARY KEY,
        team_name TEXT NOT NULL,
        division TEXT NOT NULL,
        group_name TEXT,
        team_number INTEGER NOT NULL,
        active BOOLEAN NOT NULL DEFAULT TRUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tournament_players (
        player_name TEXT NOT NULL,
        team_ref TEXT NOT NULL REFERENCES teams (team_ref),
        preferred_team BOOLEAN NOT NULL DEFAULT FALSE,
        primary_sample BOOLEAN NOT NULL DEFAULT FALSE,
        sample_priority INTEGER NOT NULL DEFAULT 1,
        active BOOLEAN NOT NULL DEFAULT TRUE,
        PRIMARY KEY (player_name, team_ref)
    )
    "#,
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS idx_tournament_players_one_preferred
    ON tournament_players (player_name) WHERE preferred_team = TRUE
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tournament_rounds (
        round_ref TEXT PRIMARY KEY,
        division TEXT NOT NULL,
        group_name TEXT,
        start_date TIMESTAMPTZ NOT NULL,
        end_date TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tournament_scheduled_matches (
        schedule_slot_ref TEXT PRIMARY KEY,
        round_ref TEXT NOT NULL REFERENCES tournament_rounds (round_ref),
        scheduled_datetime TIMESTAMPTZ NOT NULL,
        map_name TEXT NOT NULL,
        division TEXT NOT NULL,
        group_name TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tournament_match_overrides (
        match_id TEXT PRIMARY KEY REFERENCES matches (match_id),
        round_ref TEXT,
        schedule_slot_ref TEXT,
        validation_status TEXT,
        team_count INTEGER
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS match_summaries (
        match_id TEXT NOT NULL REFERENCES matches (match_id),
        participant_id TEXT NOT NULL,
        player_name TEXT NOT NULL,
        team_id INTEGER NOT NULL DEFAULT 0,
        team_rank INTEGER NOT NULL DEFAULT 0,
        won BOOLEAN NOT NULL DEFAULT FALSE,
        kills INTEGER NOT NULL DEFAULT 0,
        assists INTEGER NOT NULL DEFAULT 0,
        damage_dealt DOUBLE PRECISION NOT NULL DEFAULT 0,
        dbnos INTEGER NOT NULL DEFAULT 0,
        time_survived DOUBLE PRECISION NOT NULL DEFAULT 0,
        walk_distance DOUBLE PRECISION NOT NULL DEFAULT 0,
        ride_distance DOUBLE PRECISION NOT NULL DEFAULT 0,
        killsteals INTEGER NOT NULL DEFAULT 0,
        heals_used INTEGER NOT NULL DEFAULT 0,
        boosts_used INTEGER NOT NULL DEFAULT 0,
        throwables_used INTEGER NOT NULL DEFAULT 0,
        smokes_thrown INTEGER NOT NULL DEFAULT 0,
        throwable_damage DOUBLE PRECISION NOT NULL DEFAULT 0,
        damage_received DOUBLE PRECISION NOT NULL DEFAULT 0,
        mean_distance_from_circle_center DOUBLE PRECISION,
        mean_distance_from_circle_edge DOUBLE PRECISION,
        mean_time_in_zone_fraction DOUBLE PRECISION,
        PRIMARY KEY (match_id, participant_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS landings (
        id BIGSERIAL PRIMARY KEY,
        match_id TEXT NOT NULL REFERENCES matches (match_id),
        player_name TEXT NOT NULL,
        team_id TEXT,
        location_x DOUBLE PRECISION NOT NULL,
        location_y DOUBLE PRECISION NOT NULL,
        location_z DOUBLE PRECISION NOT NULL,
        is_valid BOOLEAN NOT NULL DEFAULT TRUE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_landings_match ON landings (match_id)",
    r#"
    CREATE TABLE IF NOT EXISTS kill_positions (
        id BIGSERIAL PRIMARY KEY,
        match_id TEXT NOT NULL REFERENCES matches (match_id),
        killer_name TEXT,
        victim_name TEXT NOT NULL,
        knocker_name TEXT,
        killer_location_x DOUBLE PRECISION,
        killer_location_y DOUBLE PRECISION,
        killer_location_z DOUBLE PRECISION,
        victim_location_x DOUBLE PRECISION NOT NULL,
        victim_location_y DOUBLE PRECISION NOT NULL,
        victim_location_z DOUBLE PRECISION NOT NULL,
        damage_reason TEXT,
        damage_category TEXT,
        damage_causer TEXT,
        distance DOUBLE PRECISION,
        killer_zone JSONB,
        victim_zone JSONB,
        event_time TIMESTAMPTZ NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_kill_positions_match ON kill_positions (match_id)",
    r#"
    CREATE TABLE IF NOT EXISTS weapon_kill_events (
        id BIGSERIAL PRIMARY KEY,
        match_id TEXT NOT NULL REFERENCES matches (match_id),
        attacker_name TEXT,
        victim_name TEXT NOT NULL,
        weapon_id TEXT,
        weapon_category TEXT NOT NULL,
        damage_type TEXT,
        distance DOUBLE PRECISION,
        is_knock BOOLEAN NOT NULL,
        zone_phase INTEGER,
        time_survived DOUBLE PRECISION,
        event_time TIMESTAMPTZ NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_weapon_kill_events_match ON weapon_kill_events (match_id)",
    r#"
    CREATE TABLE IF NOT EXISTS match_weapon_distribution (
        match_id TEXT NOT NULL REFERENCES matches (match_id),
        player_name TEXT NOT NULL,
        weapon_category TEXT NOT NULL,
        kills INTEGER NOT NULL DEFAULT 0,
        knocks INTEGER NOT NULL DEFAULT 0,
        damage DOUBLE PRECISION NOT NULL DEFAULT 0,
        PRIMARY KEY (match_id, player_name, weapon_category)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS player_damage_events (
        id BIGSERIAL PRIMARY KEY,
        match_id TEXT NOT NULL REFERENCES matches (match_id),
        attacker_name TEXT,
        victim_name TEXT NOT NULL,
        damage DOUBLE PRECISION NOT NULL,
        damage_type TEXT,
        weapon_id TEXT,
        event_time TIMESTAMPTZ NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_player_damage_events_match ON player_damage_events (match_id)",
    r#"
    CREATE TABLE IF NOT EXISTS circle_positions (
        id BIGSERIAL PRIMARY KEY,
        match_id TEXT NOT NULL REFERENCES matches (match_id),
        player_name TEXT NOT NULL,
        phase INTEGER NOT NULL,
        player_x DOUBLE PRECISION NOT NULL,
        player_y DOUBLE PRECISION NOT NULL,
        circle_center_x DOUBLE PRECISION NOT NULL,
        circle_center_y DOUBLE PRECISION NOT NULL,
        circle_radius DOUBLE PRECISION NOT NULL,
        distance_from_center DOUBLE PRECISION NOT NULL,
        distance_from_edge DOUBLE PRECISION NOT NULL,
        in_zone BOOLEAN NOT NULL,
        sampled_at TIMESTAMPTZ NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_circle_positions_match ON circle_positions (match_id)",
    r#"
    CREATE TABLE IF NOT EXISTS player_knock_events (
        id BIGSERIAL PRIMARY KEY,
        match_id TEXT NOT NULL REFERENCES matches (match_id),
        dbno_id BIGINT NOT NULL,
        attacker_name TEXT,
        victim_name TEXT NOT NULL,
        weapon_id TEXT,
        attacker_location_x DOUBLE PRECISION,
        attacker_location_y DOUBLE PRECISION,
        attacker_location_z DOUBLE PRECISION,
        victim_location_x DOUBLE PRECISION NOT NULL,
        victim_location_y DOUBLE PRECISION NOT NULL,
        victim_location_z DOUBLE PRECISION NOT NULL,
        distance DOUBLE PRECISION,
        outcome TEXT NOT NULL DEFAULT 'unknown',
        finisher_name TEXT,
        finisher_is_self BOOLEAN NOT NULL DEFAULT FALSE,
        finisher_is_teammate BOOLEAN NOT NULL DEFAULT FALSE,
        time_to_finish DOUBLE PRECISION,
        nearest_teammate_distance DOUBLE PRECISION,
        mean_teammate_distance DOUBLE PRECISION,
        teammates_within_50m INTEGER NOT NULL DEFAULT 0,
        teammates_within_100m INTEGER NOT NULL DEFAULT 0,
        teammates_within_200m INTEGER NOT NULL DEFAULT 0,
        team_spread_variance DOUBLE PRECISION,
        alive_teammates INTEGER NOT NULL DEFAULT 0,
        knocked_at TIMESTAMPTZ NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_player_knock_events_match ON player_knock_events (match_id)",
    r#"
    CREATE TABLE IF NOT EXISTS player_finishing_summary (
        match_id TEXT NOT NULL REFERENCES matches (match_id),
        player_name TEXT NOT NULL,
        finishing_0_10m INTEGER NOT NULL DEFAULT 0,
        finishing_10_50m INTEGER NOT NULL DEFAULT 0,
        finishing_50_100m INTEGER NOT NULL DEFAULT 0,
        finishing_100_200m INTEGER NOT NULL DEFAULT 0,
        finishing_200plus_m INTEGER NOT NULL DEFAULT 0,
        support_under_25m INTEGER NOT NULL DEFAULT 0,
        support_25_50m INTEGER NOT NULL DEFAULT 0,
        support_50_100m INTEGER NOT NULL DEFAULT 0,
        support_100_200m INTEGER NOT NULL DEFAULT 0,
        support_200plus_m INTEGER NOT NULL DEFAULT 0,
        PRIMARY KEY (match_id, player_name)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS team_fights (
        id BIGSERIAL PRIMARY KEY,
        match_id TEXT NOT NULL REFERENCES matches (match_id),
        start_time TIMESTAMPTZ NOT NULL,
        end_time TIMESTAMPTZ NOT NULL,
        duration_seconds DOUBLE PRECISION NOT NULL,
        team_refs INTEGER[] NOT NULL,
        primary_team_a INTEGER,
        primary_team_b INTEGER,
        third_party_teams INTEGER[] NOT NULL DEFAULT '{}',
        center_x DOUBLE PRECISION NOT NULL,
        center_y DOUBLE PRECISION NOT NULL,
        spread_radius DOUBLE PRECISION NOT NULL,
        total_knocks INTEGER NOT NULL DEFAULT 0,
        total_kills INTEGER NOT NULL DEFAULT 0,
        total_damage DOUBLE PRECISION NOT NULL DEFAULT 0,
        total_damage_events INTEGER NOT NULL DEFAULT 0,
        total_attack_events INTEGER NOT NULL DEFAULT 0,
        outcome TEXT NOT NULL,
        winning_team INTEGER,
        losing_team INTEGER,
        team_outcomes JSONB NOT NULL,
        fight_reason TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_team_fights_match ON team_fights (match_id)",
    r#"
    CREATE TABLE IF NOT EXISTS fight_participants (
        id BIGSERIAL PRIMARY KEY,
        fight_id BIGINT NOT NULL REFERENCES team_fights (id),
        match_id TEXT NOT NULL REFERENCES matches (match_id),
        player_name TEXT NOT NULL,
        team_ref INTEGER,
        knocks_dealt INTEGER NOT NULL DEFAULT 0,
        kills_dealt INTEGER NOT NULL DEFAULT 0,
        damage_dealt DOUBLE PRECISION NOT NULL DEFAULT 0,
        damage_taken DOUBLE PRECISION NOT NULL DEFAULT 0,
        attacks_made INTEGER NOT NULL DEFAULT 0,
        mean_location_x DOUBLE PRECISION NOT NULL,
        mean_location_y DOUBLE PRECISION NOT NULL,
        was_knocked BOOLEAN NOT NULL DEFAULT FALSE,
        was_killed BOOLEAN NOT NULL DEFAULT FALSE,
        survived BOOLEAN NOT NULL DEFAULT TRUE,
        knocked_at TIMESTAMPTZ,
        killed_at TIMESTAMPTZ
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_fight_participants_fight ON fight_participants (fight_id)",
    r#"
    CREATE TABLE IF NOT EXISTS player_damage_stats (
        player_name TEXT NOT NULL,
        match_type_class TEXT NOT NULL,
        total_damage_dealt DOUBLE PRECISION NOT NULL DEFAULT 0,
        total_damage_received DOUBLE PRECISION NOT NULL DEFAULT 0,
        total_throwable_damage DOUBLE PRECISION NOT NULL DEFAULT 0,
        matches_counted INTEGER NOT NULL DEFAULT 0,
        PRIMARY KEY (player_name, match_type_class)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS player_weapon_stats (
        player_name TEXT NOT NULL,
        match_type_class TEXT NOT NULL,
        weapon_category TEXT NOT NULL,
        kills INTEGER NOT NULL DEFAULT 0,
        knocks INTEGER NOT NULL DEFAULT 0,
        damage DOUBLE PRECISION NOT NULL DEFAULT 0,
        PRIMARY KEY (player_name, match_type_class, weapon_category)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS player_advanced_career_stats (
        player_name TEXT NOT NULL,
        match_type_class TEXT NOT NULL,
        killsteals INTEGER NOT NULL DEFAULT 0,
        matches_counted INTEGER NOT NULL DEFAULT 0,
        PRIMARY KEY (player_name, match_type_class)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS player_backfill_status (
        player_name TEXT PRIMARY KEY,
        requested_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        window_days INTEGER NOT NULL DEFAULT 180,
        backfilled BOOLEAN NOT NULL DEFAULT FALSE,
        backfilled_at TIMESTAMPTZ
    )
    "#,
    r#"
    CREATE MATERIALIZED VIEW IF NOT EXISTS team_combatability_metrics AS
    SELECT
        per_team.team_ref,
        count(*) AS fights_involved,
        sum(CASE WHEN lower(tf.team_outcomes ->> per_team.team_ref::text) = 'won' THEN 1 ELSE 0 END) AS fights_won,
        sum(CASE WHEN lower(tf.team_outcomes ->> per_team.team_ref::text) = 'lost' THEN 1 ELSE 0 END) AS fights_lost
    FROM team_fights tf
    CROSS JOIN LATERAL unnest(tf.team_refs) AS per_team (team_ref)
    GROUP BY per_team.team_ref
    "#,
];
