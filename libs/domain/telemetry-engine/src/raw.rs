// [libs/domain/telemetry-engine/src/raw.rs]
//! Loads the stored `raw.json.gz` telemetry body for a match into the
//! tagged event vector the extractors iterate over (spec §4.9 "opens the
//! stored telemetry, parses the event array").

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use flate2::read::GzDecoder;

use skirmish_domain_models::TelemetryEvent;

use crate::errors::EngineError;

pub fn load_events(path: &Path) -> Result<Vec<TelemetryEvent>, EngineError> {
    let file = File::open(path)?;
    let decoder = GzDecoder::new(BufReader::new(file));
    let events: Vec<TelemetryEvent> = serde_json::from_reader(decoder)?;
    Ok(events)
}
