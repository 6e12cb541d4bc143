// [libs/infra/db/src/lib.rs]
//! The match ledger and every repository built on top of it: telemetry
//! detail tables, finishing tables, fight tables and career aggregates.

pub mod client;
pub mod errors;
pub mod schema;

pub mod repositories {
    pub mod career;
    pub mod finishing;
    pub mod fights;
    pub mod ledger;
    pub mod players;
    pub mod summaries;
    pub mod telemetry_detail;
    pub mod tournament;
    pub mod weapon_distribution;
}

pub use client::DbClient;
pub use errors::DbError;
pub use repositories::career::CareerRepository;
pub use repositories::finishing::FinishingRepository;
pub use repositories::fights::FightRepository;
pub use repositories::ledger::LedgerRepository;
pub use repositories::players::PlayerRepository;
pub use repositories::summaries::SummaryRepository;
pub use repositories::telemetry_detail::TelemetryDetailRepository;
pub use repositories::tournament::TournamentRepository;
pub use repositories::weapon_distribution::WeaponDistributionRepository;
