// [libs/domain/telemetry-engine/src/phase2/fight_input.rs]
//! Projects raw telemetry into the reduced combat-event shape the
//! team-fight detector clusters over (spec §4.9 Phase 2 / §4.10).

use skirmish_domain_models::TelemetryEvent;
use skirmish_fight_detector::{CombatEvent, CombatEventKind, Combatant};

pub fn project_combat_events(events: &[TelemetryEvent]) -> Vec<CombatEvent> {
    events
        .iter()
        .filter_map(|event| match event {
            TelemetryEvent::LogPlayerTakeDamage { timestamp, attacker, victim, damage, .. } => {
                Some(CombatEvent {
                    kind: CombatEventKind::Damage,
                    timestamp: *timestamp,
                    attacker: attacker.as_ref().map(to_combatant),
                    victim: to_combatant(victim),
                    damage: *damage,
                    dbno_id: None,
                })
            }
            TelemetryEvent::LogPlayerMakeGroggy { timestamp, attacker, victim, dbno_id, .. } => {
                Some(CombatEvent {
                    kind: CombatEventKind::Knock,
                    timestamp: *timestamp,
                    attacker: attacker.as_ref().map(to_combatant),
                    victim: to_combatant(victim),
                    damage: 0.0,
                    dbno_id: Some(*dbno_id),
                })
            }
            TelemetryEvent::LogPlayerKillV2 { timestamp, victim, finisher, dbno_id, .. } => {
                Some(CombatEvent {
                    kind: CombatEventKind::Kill,
                    timestamp: *timestamp,
                    attacker: finisher.as_ref().map(to_combatant),
                    victim: to_combatant(victim),
                    damage: 0.0,
                    dbno_id: Some(*dbno_id),
                })
            }
            _ => None,
        })
        .collect()
}

fn to_combatant(character: &skirmish_domain_models::EventCharacter) -> Combatant {
    Combatant { name: character.name.clone(), team_ref: character.team_id, location: character.location }
}
