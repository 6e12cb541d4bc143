// [libs/domain/telemetry-engine/src/phase2/mod.rs]
//! Dependent extractors that run after Phase 1 (spec §4.9 Phase 2): knock
//! lifecycle resolution and team-fight detection, both of which need the
//! full event list rather than a single pass.

mod fight_input;
mod knock_lifecycle;

pub use fight_input::project_combat_events;
pub use knock_lifecycle::{extract_knock_events, summarize_finishing};

use skirmish_domain_models::{KnockEvent, PlayerFinishingSummary, TelemetryEvent};
use skirmish_domain_models::Fight;
use skirmish_fight_detector::detect_fights;

#[derive(Debug, Default)]
pub struct Phase2Output {
    pub knocks: Vec<KnockEvent>,
    pub finishing_summaries: Vec<PlayerFinishingSummary>,
    pub fights: Vec<Fight>,
}

pub fn run_phase2(match_id: &str, events: &[TelemetryEvent]) -> Phase2Output {
    let knocks = extract_knock_events(match_id, events);
    let finishing_summaries = summarize_finishing(match_id, &knocks);
    let combat_events = project_combat_events(events);
    let fights = detect_fights(match_id, combat_events);

    Phase2Output { knocks, finishing_summaries, fights }
}
