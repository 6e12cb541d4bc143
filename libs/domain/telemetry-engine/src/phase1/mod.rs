// [libs/domain/telemetry-engine/src/phase1/mod.rs]
//! Parallel independent extractors (spec §4.9 Phase 1).

pub mod advanced_stats;
pub mod circle_positions;
pub mod damage_events;
pub mod item_usage;
pub mod kill_positions;
pub mod landings;
mod shared;
pub mod weapon_kills;

pub use advanced_stats::extract_advanced_stats;
pub use circle_positions::{extract_circle_positions, PositionalAccumulator};
pub use damage_events::extract_damage_events;
pub use item_usage::extract_item_usage;
pub use kill_positions::extract_kill_positions;
pub use landings::extract_landings;
pub use weapon_kills::extract_weapon_kills;

/// Bundled outputs of one Phase 1 fan-out, ready for per-extractor bulk
/// persistence (spec §4.9 "written to the database in bulk, inside a
/// per-extractor transaction").
#[derive(Debug, Default)]
pub struct Phase1Output {
    pub landings: Vec<skirmish_domain_models::LandingRow>,
    pub kill_positions: Vec<skirmish_domain_models::KillPositionRow>,
    pub weapon_kills: Vec<skirmish_domain_models::WeaponKillEventRow>,
    pub damage_events: Vec<skirmish_domain_models::PlayerDamageEventRow>,
    pub item_usage: Vec<skirmish_domain_models::ItemUsageAggregate>,
    pub advanced_stats: Vec<skirmish_domain_models::AdvancedStatsAggregate>,
    pub circle_positions: Vec<skirmish_domain_models::CirclePositionRow>,
    pub positional_means: std::collections::HashMap<String, PositionalAccumulator>,
}
