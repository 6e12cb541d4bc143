// [libs/domain/telemetry-engine/src/lib.rs]
//! Turns one match's raw telemetry event stream into every detail row,
//! knock/fight record and summary-column update the database layer
//! persists (spec §4.9).

mod errors;
pub mod phase1;
pub mod phase2;
pub mod phase3;
mod pipeline;
mod raw;

pub use errors::EngineError;
pub use phase1::Phase1Output;
pub use phase2::Phase2Output;
pub use pipeline::TelemetryPipeline;
pub use raw::load_events;

use skirmish_domain_models::{MatchParticipant, WeaponCategoryTally};

/// Everything one `process_events` run produces, ready for the caller to
/// persist behind its own transaction boundaries.
#[derive(Debug)]
pub struct ProcessingOutput {
    pub phase1: Phase1Output,
    pub phase2: Phase2Output,
    pub participants: Vec<MatchParticipant>,
    pub weapon_distribution: Vec<WeaponCategoryTally>,
}
