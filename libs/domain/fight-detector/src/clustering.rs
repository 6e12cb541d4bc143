// [libs/domain/fight-detector/src/clustering.rs]
//! Time-and-space windowing over a match's combat events (spec §4.10
//! "Clustering").

use chrono::{DateTime, Utc};

use skirmish_domain_models::{is_npc, Location3D};

use crate::events::CombatEvent;

/// Rolling gap since the last combat event that still belongs to the
/// current engagement.
pub const ENGAGEMENT_WINDOW_SECONDS: i64 = 45;
/// Radius around the engagement's running center; an event farther than
/// this starts a new engagement.
pub const MAX_ENGAGEMENT_DISTANCE_METERS: f64 = 300.0;
/// An engagement never spans more than this from its first event.
pub const MAX_FIGHT_DURATION_SECONDS: i64 = 240;

/// One time-and-space cluster of combat events, not yet classified.
#[derive(Debug, Clone)]
pub struct Engagement {
    pub events: Vec<CombatEvent>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    center: Location3D,
    location_samples: u32,
}

impl Engagement {
    fn new(first: CombatEvent) -> Self {
        let mut center = Location3D::default();
        let mut samples = 0u32;
        accumulate_location(&mut center, &mut samples, &first);
        Self {
            start_time: first.timestamp,
            end_time: first.timestamp,
            center,
            location_samples: samples,
            events: vec![first],
        }
    }

    fn push(&mut self, event: CombatEvent) {
        accumulate_location(&mut self.center, &mut self.location_samples, &event);
        self.end_time = event.timestamp;
        self.events.push(event);
    }

    pub fn center(&self) -> Location3D {
        self.center
    }

    fn distance_to_center(&self, location: &Location3D) -> f64 {
        if self.location_samples == 0 {
            0.0
        } else {
            self.center.distance_2d(location)
        }
    }
}

fn accumulate_location(center: &mut Location3D, samples: &mut u32, event: &CombatEvent) {
    let mut fold = |location: &Location3D| {
        let n = (*samples + 1) as f64;
        center.x += (location.x - center.x) / n;
        center.y += (location.y - center.y) / n;
        center.z += (location.z - center.z) / n;
        *samples += 1;
    };
    if let Some(attacker) = &event.attacker {
        fold(&attacker.location);
    }
    fold(&event.victim.location);
}

/// Drops any event whose attacker or victim is an AI entity, sorts the
/// remainder, and splits it into engagements per spec §4.10.
pub fn cluster_engagements(mut events: Vec<CombatEvent>) -> Vec<Engagement> {
    events.retain(|event| {
        !is_npc(&event.victim.name)
            && event.attacker.as_ref().map(|a| !is_npc(&a.name)).unwrap_or(true)
    });
    events.sort_by_key(|event| event.sort_key());

    let mut engagements: Vec<Engagement> = Vec::new();
    let mut current: Option<Engagement> = None;

    for event in events {
        let should_split = match &current {
            None => false,
            Some(engagement) => {
                let gap = (event.timestamp - engagement.end_time).num_seconds();
                let too_far = engagement.distance_to_center(&event.victim.location)
                    > MAX_ENGAGEMENT_DISTANCE_METERS;
                let too_long = (event.timestamp - engagement.start_time).num_seconds()
                    > MAX_FIGHT_DURATION_SECONDS;
                gap > ENGAGEMENT_WINDOW_SECONDS || too_far || too_long
            }
        };

        if should_split {
            engagements.push(current.take().unwrap());
        }

        match &mut current {
            Some(engagement) => engagement.push(event),
            None => current = Some(Engagement::new(event)),
        }
    }

    if let Some(engagement) = current {
        engagements.push(engagement);
    }

    engagements
}
