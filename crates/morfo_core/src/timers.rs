use core::time::Duration;

use bevy::prelude::*;
use strum::{EnumIter, IntoEnumIterator};

use crate::countdown::{Countdown, TickHandle, TickOutcome};

pub struct CountdownPlugin;

impl Plugin for CountdownPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Countdowns>()
            .add_event::<CountdownExpired>()
            .add_systems(PreUpdate, tick_countdowns);
    }
}

/// The independent countdowns the app runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum TimerSlot {
    /// Read-only memorisation window before a round becomes interactive.
    Preview,
    Round,
    Session,
}

/// Sent once when a running countdown reaches zero.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownExpired {
    pub slot: TimerSlot,
}

#[derive(Debug, Default)]
struct Slot {
    countdown: Countdown,
    tick: Option<TickHandle>,
}

#[derive(Resource, Debug, Default)]
pub struct Countdowns {
    preview: Slot,
    round: Slot,
    session: Slot,
}

impl Countdowns {
    fn slot(&self, slot: TimerSlot) -> &Slot {
        match slot {
            TimerSlot::Preview => &self.preview,
            TimerSlot::Round => &self.round,
            TimerSlot::Session => &self.session,
        }
    }

    fn slot_mut(&mut self, slot: TimerSlot) -> &mut Slot {
        match slot {
            TimerSlot::Preview => &mut self.preview,
            TimerSlot::Round => &mut self.round,
            TimerSlot::Session => &mut self.session,
        }
    }

    pub fn countdown(&self, slot: TimerSlot) -> &Countdown {
        &self.slot(slot).countdown
    }

    pub fn start(&mut self, slot: TimerSlot, now: Duration, duration: Duration) {
        let slot = self.slot_mut(slot);
        slot.tick = Some(slot.countdown.start(now, duration));
    }

    pub fn pause(&mut self, slot: TimerSlot, now: Duration) {
        let slot = self.slot_mut(slot);
        slot.countdown.pause(now);
        slot.tick = None;
    }

    pub fn resume(&mut self, slot: TimerSlot, now: Duration) {
        let slot = self.slot_mut(slot);
        if let Some(handle) = slot.countdown.resume(now) {
            slot.tick = Some(handle);
        }
    }

    pub fn stop(&mut self, slot: TimerSlot) {
        let slot = self.slot_mut(slot);
        slot.countdown.stop();
        slot.tick = None;
    }

    pub fn extend(&mut self, slot: TimerSlot, extra: Duration) {
        self.slot_mut(slot).countdown.extend(extra);
    }

    pub fn remaining(&self, slot: TimerSlot, now: Duration) -> Duration {
        self.slot(slot).countdown.remaining(now)
    }

    /// Pauses the countdowns owned by a round, leaving the session alone.
    pub fn pause_round(&mut self, now: Duration) {
        self.pause(TimerSlot::Preview, now);
        self.pause(TimerSlot::Round, now);
    }

    pub fn resume_round(&mut self, now: Duration) {
        self.resume(TimerSlot::Preview, now);
        self.resume(TimerSlot::Round, now);
    }

    pub fn stop_round(&mut self) {
        self.stop(TimerSlot::Preview);
        self.stop(TimerSlot::Round);
    }

    /// Advances every scheduled tick and returns the slots that expired.
    pub fn poll(&mut self, now: Duration) -> Vec<TimerSlot> {
        let mut expired = Vec::new();
        for kind in TimerSlot::iter() {
            let slot = self.slot_mut(kind);
            let Some(handle) = slot.tick else {
                continue;
            };
            match slot.countdown.tick(handle, now) {
                TickOutcome::Pending { .. } => {}
                TickOutcome::Expired => {
                    slot.tick = None;
                    expired.push(kind);
                }
                TickOutcome::Stale => slot.tick = None,
            }
        }
        expired
    }
}

/// Clock used by every countdown: real time, unaffected by virtual time
/// scaling or pausing.
pub fn clock_now(world: &World) -> Duration {
    world.resource::<Time<Real>>().elapsed()
}

fn tick_countdowns(
    time: Res<Time<Real>>,
    mut countdowns: ResMut<Countdowns>,
    mut expired: EventWriter<CountdownExpired>,
) {
    for slot in countdowns.poll(time.elapsed()) {
        debug!("{slot:?} countdown expired");
        expired.send(CountdownExpired { slot });
    }
}

/// `mm:ss`, used by the HUD.
pub fn format_clock(remaining: Duration) -> String {
    let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
