use core::time::Duration;
use std::collections::HashMap;

use bevy::prelude::*;
use morfo_core::drag::ReleaseToken;

/// How a drop is judged against the box it landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropVerdict {
    Correct,
    Wrong,
    /// Released outside every box; the word just goes back.
    Missed,
}

pub fn judge_drop(word_key: &str, zone_key: Option<&str>) -> DropVerdict {
    match zone_key {
        None => DropVerdict::Missed,
        Some(zone_key) if zone_key == word_key => DropVerdict::Correct,
        Some(_) => DropVerdict::Wrong,
    }
}

/// Release tokens held back while drop feedback plays.
#[derive(Debug, Default)]
pub struct PendingReleases {
    pending: Vec<(ReleaseToken, Timer)>,
}

impl PendingReleases {
    pub fn schedule(&mut self, token: ReleaseToken, delay: Duration) {
        self.pending.push((token, Timer::new(delay, TimerMode::Once)));
    }

    /// Tokens whose delay ran out.
    pub fn tick(&mut self, delta: Duration) -> Vec<ReleaseToken> {
        let mut due = Vec::new();
        self.pending.retain_mut(|(token, timer)| {
            if timer.tick(delta).finished() {
                due.push(*token);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Where words go once they land in a box.
#[derive(Debug, Default)]
pub struct ZoneSlots {
    filled: HashMap<Entity, usize>,
}

impl ZoneSlots {
    /// Claims the next free slot in `zone`.
    pub fn claim(&mut self, zone: Entity) -> usize {
        let filled = self.filled.entry(zone).or_default();
        let slot = *filled;
        *filled += 1;
        slot
    }
}
