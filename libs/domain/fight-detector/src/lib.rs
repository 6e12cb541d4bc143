// [libs/domain/fight-detector/src/lib.rs]
//! Engagement clustering and fight classification over a match's combat
//! event stream.

mod classifier;
mod clustering;
mod detector;
mod events;
mod outcome;
mod participants;

pub use classifier::classify;
pub use clustering::{
    cluster_engagements, Engagement, ENGAGEMENT_WINDOW_SECONDS, MAX_ENGAGEMENT_DISTANCE_METERS,
    MAX_FIGHT_DURATION_SECONDS,
};
pub use detector::detect_fights;
pub use events::{CombatEvent, CombatEventKind, Combatant};
pub use outcome::assign_outcome;
pub use participants::enrich_participants;
