// [libs/domain/fight-detector/src/participants.rs]
//! Per-player enrichment over an engagement's events (spec §4.10
//! "Participant enrichment").

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use skirmish_domain_models::{FightParticipant, Location3D};

use crate::clustering::Engagement;
use crate::events::CombatEventKind;

struct Accumulator {
    team_ref: i32,
    knocks_dealt: i32,
    kills_dealt: i32,
    damage_dealt: f64,
    damage_taken: f64,
    attacks_made: i32,
    location_sum: Location3D,
    location_samples: u32,
    was_knocked: bool,
    was_killed: bool,
    knocked_at: Option<DateTime<Utc>>,
    killed_at: Option<DateTime<Utc>>,
}

impl Accumulator {
    fn new(team_ref: i32) -> Self {
        Self {
            team_ref,
            knocks_dealt: 0,
            kills_dealt: 0,
            damage_dealt: 0.0,
            damage_taken: 0.0,
            attacks_made: 0,
            location_sum: Location3D::default(),
            location_samples: 0,
            was_knocked: false,
            was_killed: false,
            knocked_at: None,
            killed_at: None,
        }
    }

    fn note_location(&mut self, location: &Location3D) {
        self.location_sum.x += location.x;
        self.location_sum.y += location.y;
        self.location_sum.z += location.z;
        self.location_samples += 1;
    }

    fn mean_location(&self) -> Location3D {
        if self.location_samples == 0 {
            return Location3D::default();
        }
        let n = self.location_samples as f64;
        Location3D { x: self.location_sum.x / n, y: self.location_sum.y / n, z: self.location_sum.z / n }
    }
}

pub fn enrich_participants(engagement: &Engagement) -> Vec<FightParticipant> {
    let mut accumulators: HashMap<&str, Accumulator> = HashMap::new();

    for event in &engagement.events {
        let victim_acc = accumulators
            .entry(event.victim.name.as_str())
            .or_insert_with(|| Accumulator::new(event.victim.team_ref));
        victim_acc.note_location(&event.victim.location);
        match event.kind {
            CombatEventKind::Damage => victim_acc.damage_taken += event.damage,
            CombatEventKind::Knock => {
                victim_acc.was_knocked = true;
                victim_acc.knocked_at.get_or_insert(event.timestamp);
            }
            CombatEventKind::Kill => {
                victim_acc.was_killed = true;
                victim_acc.killed_at.get_or_insert(event.timestamp);
            }
        }

        if let Some(attacker) = &event.attacker {
            let attacker_acc = accumulators
                .entry(attacker.name.as_str())
                .or_insert_with(|| Accumulator::new(attacker.team_ref));
            attacker_acc.note_location(&attacker.location);
            match event.kind {
                CombatEventKind::Damage => {
                    attacker_acc.damage_dealt += event.damage;
                    attacker_acc.attacks_made += 1;
                }
                CombatEventKind::Knock => attacker_acc.knocks_dealt += 1,
                CombatEventKind::Kill => attacker_acc.kills_dealt += 1,
            }
        }
    }

    accumulators
        .into_iter()
        .map(|(name, acc)| FightParticipant {
            fight_id: None,
            player_name: name.to_string(),
            team_ref: acc.team_ref,
            knocks_dealt: acc.knocks_dealt,
            kills_dealt: acc.kills_dealt,
            damage_dealt: acc.damage_dealt,
            damage_taken: acc.damage_taken,
            attacks_made: acc.attacks_made,
            mean_location: acc.mean_location(),
            was_knocked: acc.was_knocked,
            was_killed: acc.was_killed,
            survived: !acc.was_killed,
            knocked_at: acc.knocked_at,
            killed_at: acc.killed_at,
        })
        .collect()
}
