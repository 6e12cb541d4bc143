// [libs/domain/telemetry-engine/src/pipeline.rs]
//! =================================================================
//! APARATO: TELEMETRY PROCESSING PIPELINE
//! RESPONSABILIDAD: FAN-OUT DE EXTRACTORES Y ROLL-UP DE RESUMEN
//! =================================================================
//!
//! Runs the three-phase sequence: a bounded fan-out of independent Phase 1
//! extractors sharing one read-only event buffer, sequential Phase 2
//! (knock lifecycle and fight detection, each needing the full event
//! list), then Phase 3's summary roll-up. Phase 1 extractors here are
//! row-building work rather than CPU-bound hashing, so fan-out uses
//! `tokio::task::spawn_blocking` over a shared `Arc` buffer instead of a
//! rayon thread pool.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, instrument};

use skirmish_domain_models::{MatchParticipant, TelemetryEvent};

use crate::errors::EngineError;
use crate::phase1::{
    extract_advanced_stats, extract_circle_positions, extract_damage_events, extract_item_usage,
    extract_kill_positions, extract_landings, extract_weapon_kills, Phase1Output,
};
use crate::phase2::run_phase2;
use crate::phase3::{apply_rollup, extract_weapon_distribution};
use crate::raw::load_events;
use crate::ProcessingOutput;

pub struct TelemetryPipeline {
    tracked_players: Arc<HashSet<String>>,
}

impl TelemetryPipeline {
    pub fn new(tracked_players: HashSet<String>) -> Self {
        Self { tracked_players: Arc::new(tracked_players) }
    }

    /// Loads a match's raw telemetry and runs the full three-phase
    /// sequence, returning everything the caller persists. Idempotency
    /// (deleting prior child rows before re-running) is the caller's
    /// responsibility, since it owns the database transaction boundary
    /// (spec §4.9 "Idempotency").
    #[instrument(skip(self, participants), fields(match_id = %match_id))]
    pub async fn process_match_file(
        &self,
        match_id: &str,
        telemetry_path: &Path,
        participants: Vec<MatchParticipant>,
    ) -> Result<ProcessingOutput, EngineError> {
        let events = load_events(telemetry_path)?;
        Ok(self.process_events(match_id, events, participants).await)
    }

    pub async fn process_events(
        &self,
        match_id: &str,
        events: Vec<TelemetryEvent>,
        mut participants: Vec<MatchParticipant>,
    ) -> ProcessingOutput {
        let events = Arc::new(events);

        let phase1 = self.run_phase1(match_id, Arc::clone(&events)).await;
        info!(landings = phase1.landings.len(), weapon_kills = phase1.weapon_kills.len(), "phase 1 complete");

        let phase2 = run_phase2(match_id, &events);
        info!(knocks = phase2.knocks.len(), fights = phase2.fights.len(), "phase 2 complete");

        let weapon_distribution = extract_weapon_distribution(match_id, &events, &phase1.weapon_kills);
        apply_rollup(&mut participants, &phase1.advanced_stats, &phase1.item_usage, &phase1.positional_means);

        ProcessingOutput { phase1, phase2, participants, weapon_distribution }
    }

    async fn run_phase1(&self, match_id: &str, events: Arc<Vec<TelemetryEvent>>) -> Phase1Output {
        let tracked = Arc::clone(&self.tracked_players);

        let (landings, kill_positions, weapon_kills, advanced_stats, item_usage, damage_events, circle) = tokio::join!(
            spawn(match_id, Arc::clone(&events), |id, ev| extract_landings(id, &ev)),
            spawn(match_id, Arc::clone(&events), |id, ev| extract_kill_positions(id, &ev)),
            spawn(match_id, Arc::clone(&events), |id, ev| extract_weapon_kills(id, &ev)),
            spawn(match_id, Arc::clone(&events), |id, ev| extract_advanced_stats(id, &ev)),
            spawn(match_id, Arc::clone(&events), |id, ev| extract_item_usage(id, &ev)),
            spawn_with(match_id, Arc::clone(&events), Arc::clone(&tracked), |id, ev, tp| extract_damage_events(id, &ev, &tp)),
            spawn_with(match_id, events, tracked, |id, ev, tp| extract_circle_positions(id, &ev, &tp)),
        );

        let (circle_positions, positional_means) = circle;

        Phase1Output {
            landings,
            kill_positions,
            weapon_kills,
            damage_events,
            item_usage,
            advanced_stats,
            circle_positions,
            positional_means,
        }
    }
}

async fn spawn<T, F>(match_id: &str, events: Arc<Vec<TelemetryEvent>>, extractor: F) -> T
where
    T: Send + 'static,
    F: FnOnce(&str, Arc<Vec<TelemetryEvent>>) -> T + Send + 'static,
{
    let match_id = match_id.to_string();
    tokio::task::spawn_blocking(move || extractor(&match_id, events)).await.expect("extractor task panicked")
}

async fn spawn_with<T, P, F>(match_id: &str, events: Arc<Vec<TelemetryEvent>>, param: Arc<P>, extractor: F) -> T
where
    T: Send + 'static,
    P: Send + Sync + 'static,
    F: FnOnce(&str, Arc<Vec<TelemetryEvent>>, Arc<P>) -> T + Send + 'static,
{
    let match_id = match_id.to_string();
    tokio::task::spawn_blocking(move || extractor(&match_id, events, param)).await.expect("extractor task panicked")
}
