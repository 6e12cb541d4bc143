// [apps/telemetry-worker/src/lib.rs]
//! =================================================================
//! APARATO: TELEMETRY DOWNLOAD Y PROCESAMIENTO
//! RESPONSABILIDAD: STREAMING DE ARCHIVOS CRUDOS Y PIPELINE DE TRES FASES
//! =================================================================
//!
//! Two independent consumers share this crate: the download worker
//! (spec §4.8, `match.telemetry` -> `match.processing.telemetry`) and the
//! processing worker (spec §4.9, `match.processing.telemetry` -> match
//! marked complete). They share nothing but the file-path convention.

mod download;
mod processing;

pub use download::{telemetry_path, TelemetryDownloadWorker};
pub use processing::TelemetryProcessingWorker;
