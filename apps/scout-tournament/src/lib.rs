// [apps/scout-tournament/src/lib.rs]
//! =================================================================
//! APARATO: TOURNAMENT DISCOVERY ENGINE
//! RESPONSABILIDAD: BARRIDO RAPIDO DE ROSTERS DE TORNEO
//! =================================================================
//!
//! Faster cadence than the main scout, narrower scope: only matches
//! whose `game_type` is in the tournament allowlist and whose
//! `match_datetime` is at or after a configured cutoff are candidates
//! (spec §4.6). Tournament context assignment itself is deliberately
//! not done here; it needs the full participant list and belongs to
//! the summary worker (spec §4.3, §4.7 step 8).

use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{DateTime, Datelike, NaiveTime, Utc, Weekday};
use tracing::{info, instrument, warn};

use skirmish_domain_models::{
    player_match_ids, DiscoveredBy, DiscoveredPayload, DiscoveryPriority, InsertOutcome,
    MessagePriority, NewMatch, QueueStep,
};
use skirmish_domain_models::{extract_telemetry_url, parse_match_attributes};
use skirmish_infra_api_client::ApiClient;
use skirmish_infra_broker::Gateway;
use skirmish_infra_db::{LedgerRepository, TournamentRepository};
use skirmish_shared_config::ServiceScheduleConfig;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    pub total: usize,
    pub processed: usize,
    pub failed: usize,
    pub queued: usize,
}

/// Adaptive sample-size: bump one step after 3 consecutive empty runs,
/// capped; reset to the configured base on any hit (spec §4.6).
struct AdaptiveSampleSize {
    base: u32,
    cap: u32,
    current: AtomicU32,
    consecutive_empty: AtomicU32,
}

impl AdaptiveSampleSize {
    fn new(base: u32) -> Self {
        Self { base, cap: base.saturating_mul(4).max(base + 1), current: AtomicU32::new(base), consecutive_empty: AtomicU32::new(0) }
    }

    fn current(&self) -> i32 {
        self.current.load(Ordering::Relaxed) as i32
    }

    fn record_run(&self, queued: usize) {
        if queued > 0 {
            self.consecutive_empty.store(0, Ordering::Relaxed);
            self.current.store(self.base, Ordering::Relaxed);
            return;
        }

        let empty = self.consecutive_empty.fetch_add(1, Ordering::Relaxed) + 1;
        if empty >= 3 {
            self.consecutive_empty.store(0, Ordering::Relaxed);
            let next = (self.current.load(Ordering::Relaxed) + 1).min(self.cap);
            self.current.store(next, Ordering::Relaxed);
        }
    }
}

/// True when `now` falls within the configured schedule window (spec
/// §4.6 "Scheduled every 60s with a schedule window"). `schedule_days` is
/// a weekday mask, 0=Mon..6=Sun (spec §6).
pub fn within_schedule_window(config: &ServiceScheduleConfig, now: DateTime<Utc>) -> bool {
    if !config.schedule_enabled {
        return true;
    }

    let weekday_index = match now.weekday() {
        Weekday::Mon => 0u8,
        Weekday::Tue => 1,
        Weekday::Wed => 2,
        Weekday::Thu => 3,
        Weekday::Fri => 4,
        Weekday::Sat => 5,
        Weekday::Sun => 6,
    };
    if !config.schedule_days.contains(&weekday_index) {
        return false;
    }

    let (Some(start), Some(end)) = (
        NaiveTime::parse_from_str(&config.schedule_start, "%H:%M").ok(),
        NaiveTime::parse_from_str(&config.schedule_end, "%H:%M").ok(),
    ) else {
        return true;
    };
    let current = now.time();
    current >= start && current <= end
}

pub struct TournamentDiscoveryEngine {
    api_client: ApiClient,
    tournaments: TournamentRepository,
    ledger: LedgerRepository,
    gateway: Gateway,
    environment: String,
    allowed_game_types: Vec<String>,
    cutoff_date: DateTime<Utc>,
    sample_size: AdaptiveSampleSize,
}

impl TournamentDiscoveryEngine {
    pub fn new(
        api_client: ApiClient,
        tournaments: TournamentRepository,
        ledger: LedgerRepository,
        gateway: Gateway,
        environment: String,
        allowed_game_types: Vec<String>,
        cutoff_date: DateTime<Utc>,
        base_sample_size: u32,
    ) -> Self {
        Self {
            api_client,
            tournaments,
            ledger,
            gateway,
            environment,
            allowed_game_types,
            cutoff_date,
            sample_size: AdaptiveSampleSize::new(base_sample_size),
        }
    }

    #[instrument(skip(self))]
    pub async fn run_once(&self) -> RunSummary {
        let lobbies = match self.tournaments.list_active_lobbies().await {
            Ok(lobbies) => lobbies,
            Err(error) => {
                warn!(%error, "could not list active lobbies, skipping run");
                return RunSummary::default();
            }
        };

        let mut summary = RunSummary::default();
        let sample_size = self.sample_size.current();

        for (division, group_name) in lobbies {
            let roster = match self
                .tournaments
                .stratified_sample(&division, group_name.as_deref(), sample_size)
                .await
            {
                Ok(roster) => roster,
                Err(error) => {
                    warn!(%error, division, "stratified sample failed, skipping lobby");
                    continue;
                }
            };
            if roster.is_empty() {
                continue;
            }

            let names: Vec<String> = roster.into_iter().map(|entry| entry.player_name).collect();
            let players = match self.api_client.lookup_players(&names).await {
                Ok(players) => players,
                Err(error) => {
                    warn!(%error, division, "player lookup failed, skipping lobby");
                    continue;
                }
            };

            let mut match_ids: Vec<String> = players.iter().flat_map(player_match_ids).collect();
            match_ids.sort();
            match_ids.dedup();
            summary.total += match_ids.len();

            for match_id in match_ids {
                match self.ledger.find_by_id(&match_id).await {
                    Ok(Some(_)) => continue,
                    Ok(None) => {}
                    Err(error) => {
                        warn!(%error, match_id, "ledger lookup failed, skipping candidate");
                        continue;
                    }
                }

                summary.processed += 1;
                match self.discover_one(&match_id).await {
                    Ok(true) => summary.queued += 1,
                    Ok(false) => {}
                    Err(error) => {
                        warn!(%error, match_id, "tournament match discovery failed");
                        let _ = self
                            .ledger
                            .insert_failed_placeholder(
                                &match_id,
                                Utc::now(),
                                &error.to_string(),
                                DiscoveredBy::Tournament,
                                DiscoveryPriority::High,
                            )
                            .await;
                        summary.failed += 1;
                    }
                }
            }
        }

        self.sample_size.record_run(summary.queued);
        info!(
            total = summary.total,
            processed = summary.processed,
            failed = summary.failed,
            queued = summary.queued,
            next_sample_size = self.sample_size.current(),
            "tournament discovery run complete"
        );
        summary
    }

    async fn discover_one(&self, match_id: &str) -> anyhow::Result<bool> {
        let document = self.api_client.get_match(match_id).await?;
        let attributes = parse_match_attributes(&document)
            .ok_or_else(|| anyhow::anyhow!("match document missing expected attributes"))?;

        if !self.allowed_game_types.iter().any(|t| t == &attributes.game_type) {
            return Ok(false);
        }
        if attributes.match_datetime < self.cutoff_date {
            return Ok(false);
        }

        let telemetry_url = extract_telemetry_url(&document);
        let new_match = NewMatch {
            match_id: match_id.to_string(),
            map_name: attributes.map_name,
            game_mode: attributes.game_mode,
            game_type: attributes.game_type,
            match_datetime: attributes.match_datetime,
            duration: attributes.duration,
            telemetry_url,
            discovered_by: DiscoveredBy::Tournament,
            discovery_priority: DiscoveryPriority::High,
        };

        if self.ledger.insert_if_not_exists(&new_match).await? != InsertOutcome::Inserted {
            return Ok(false);
        }

        let payload = DiscoveredPayload {
            match_id: match_id.to_string(),
            timestamp: Utc::now(),
            source: "tournament".to_string(),
            environment: self.environment.clone(),
            queue_target: QueueStep::Discovered.queue_name(&self.environment),
        };
        self.gateway.publish(QueueStep::Discovered, &payload, MessagePriority::High).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(enabled: bool, days: Vec<u8>, start: &str, end: &str) -> ServiceScheduleConfig {
        ServiceScheduleConfig {
            schedule_enabled: enabled,
            schedule_days: days,
            schedule_start: start.to_string(),
            schedule_end: end.to_string(),
            ..ServiceScheduleConfig::default()
        }
    }

    #[test]
    fn disabled_schedule_is_always_open() {
        let config = schedule(false, vec![], "00:00", "00:00");
        assert!(within_schedule_window(&config, Utc::now()));
    }

    #[test]
    fn rejects_days_outside_the_configured_set() {
        // 2026-08-03 is a Monday (weekday index 0).
        let now = DateTime::parse_from_rfc3339("2026-08-03T12:00:00Z").unwrap().with_timezone(&Utc);
        let tuesday_only = schedule(true, vec![1], "00:00", "23:59");
        assert!(!within_schedule_window(&tuesday_only, now));
    }

    #[test]
    fn rejects_times_outside_the_window() {
        let now = DateTime::parse_from_rfc3339("2026-08-03T23:00:00Z").unwrap().with_timezone(&Utc);
        let config = schedule(true, vec![0, 1, 2, 3, 4, 5, 6], "08:00", "20:00");
        assert!(!within_schedule_window(&config, now));
    }

    #[test]
    fn adaptive_sample_size_bumps_after_three_empty_runs_and_resets_on_a_hit() {
        let adaptive = AdaptiveSampleSize::new(6);
        adaptive.record_run(0);
        adaptive.record_run(0);
        assert_eq!(adaptive.current(), 6);
        adaptive.record_run(0);
        assert_eq!(adaptive.current(), 7);
        adaptive.record_run(2);
        assert_eq!(adaptive.current(), 6);
    }
}
