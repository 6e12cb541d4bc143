// [libs/domain/fight-detector/src/events.rs]
//! The reduced combat-event shape the detector clusters over. The
//! telemetry engine projects `LogPlayerTakeDamage`/`LogPlayerMakeGroggy`/
//! `LogPlayerKillV2` records into these before handing them to
//! `detect_fights` (spec §4.10).

use chrono::{DateTime, Utc};

use skirmish_domain_models::Location3D;

/// Stable tie-break order for same-timestamp events: damage < knock < kill
/// (spec §5 "Ordering guarantees").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CombatEventKind {
    Damage,
    Knock,
    Kill,
}

#[derive(Debug, Clone)]
pub struct Combatant {
    pub name: String,
    pub team_ref: i32,
    pub location: Location3D,
}

#[derive(Debug, Clone)]
pub struct CombatEvent {
    pub kind: CombatEventKind,
    pub timestamp: DateTime<Utc>,
    /// Absent for environmental damage (falls, gas, vehicles without a
    /// driver), such events still count toward clustering but contribute
    /// no team-damage credit.
    pub attacker: Option<Combatant>,
    pub victim: Combatant,
    pub damage: f64,
    /// Links a `Knock` to its eventual `Kill`/`Revive`; `None` on `Damage`.
    pub dbno_id: Option<i64>,
}

impl CombatEvent {
    pub fn sort_key(&self) -> (DateTime<Utc>, CombatEventKind) {
        (self.timestamp, self.kind)
    }
}
