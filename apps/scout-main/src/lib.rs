// [apps/scout-main/src/lib.rs]
//! =================================================================
//! APARATO: MAIN DISCOVERY ENGINE
//! RESPONSABILIDAD: BARRIDO PERIODICO DE JUGADORES RASTREADOS
//! =================================================================
//!
//! One run: pull up to `sample_size` tracked players, look them up
//! upstream, diff the matches they've played against the ledger, and
//! insert + publish every genuinely new one (spec §4.5). A per-match
//! failure never aborts the run; it degrades to a `failed` placeholder
//! row and the loop continues (spec §7 "Upstream-absent").

use chrono::Utc;
use tracing::{info, instrument, warn};

use skirmish_domain_models::{
    extract_telemetry_url, parse_match_attributes, player_match_ids, DiscoveredBy,
    DiscoveredPayload, DiscoveryPriority, InsertOutcome, MessagePriority, NewMatch, QueueStep,
};
use skirmish_infra_api_client::ApiClient;
use skirmish_infra_broker::Gateway;
use skirmish_infra_db::{LedgerRepository, PlayerRepository};

#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    pub total: usize,
    pub processed: usize,
    pub failed: usize,
    pub queued: usize,
}

pub struct DiscoveryEngine {
    api_client: ApiClient,
    players: PlayerRepository,
    ledger: LedgerRepository,
    gateway: Gateway,
    environment: String,
}

impl DiscoveryEngine {
    pub fn new(
        api_client: ApiClient,
        players: PlayerRepository,
        ledger: LedgerRepository,
        gateway: Gateway,
        environment: String,
    ) -> Self {
        Self { api_client, players, ledger, gateway, environment }
    }

    #[instrument(skip(self))]
    pub async fn run_once(&self, sample_size: i64) -> RunSummary {
        let tracked = match self.players.fetch_tracked(sample_size).await {
            Ok(players) => players,
            Err(error) => {
                warn!(%error, "could not load tracked players, skipping run");
                return RunSummary::default();
            }
        };

        let names: Vec<String> = tracked.into_iter().map(|p| p.player_name).collect();
        if names.is_empty() {
            return RunSummary::default();
        }

        let players = match self.api_client.lookup_players(&names).await {
            Ok(players) => players,
            Err(error) => {
                warn!(%error, "player lookup failed, skipping run");
                return RunSummary::default();
            }
        };

        let mut match_ids: Vec<String> = players.iter().flat_map(player_match_ids).collect();
        match_ids.sort();
        match_ids.dedup();

        let mut summary = RunSummary { total: match_ids.len(), ..Default::default() };

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
                    warn!(%error, match_id, "match discovery failed");
                    let _ = self
                        .ledger
                        .insert_failed_placeholder(
                            &match_id,
                            Utc::now(),
                            &error.to_string(),
                            DiscoveredBy::Main,
                            DiscoveryPriority::Normal,
                        )
                        .await;
                    summary.failed += 1;
                }
            }
        }

        info!(
            total = summary.total,
            processed = summary.processed,
            failed = summary.failed,
            queued = summary.queued,
            "discovery run complete"
        );
        summary
    }

    async fn discover_one(&self, match_id: &str) -> anyhow::Result<bool> {
        let document = self.api_client.get_match(match_id).await?;
        let attributes = parse_match_attributes(&document)
            .ok_or_else(|| anyhow::anyhow!("match document missing expected attributes"))?;
        let telemetry_url = extract_telemetry_url(&document);

        let new_match = NewMatch {
            match_id: match_id.to_string(),
            map_name: attributes.map_name,
            game_mode: attributes.game_mode,
            game_type: attributes.game_type,
            match_datetime: attributes.match_datetime,
            duration: attributes.duration,
            telemetry_url,
            discovered_by: DiscoveredBy::Main,
            discovery_priority: DiscoveryPriority::Normal,
        };

        if self.ledger.insert_if_not_exists(&new_match).await? != InsertOutcome::Inserted {
            return Ok(false);
        }

        let payload = DiscoveredPayload {
            match_id: match_id.to_string(),
            timestamp: Utc::now(),
            source: "main".to_string(),
            environment: self.environment.clone(),
            queue_target: QueueStep::Discovered.queue_name(&self.environment),
        };
        self.gateway.publish(QueueStep::Discovered, &payload, MessagePriority::Normal).await?;
        Ok(true)
    }
}
