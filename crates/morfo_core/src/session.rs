use core::time::Duration;

use bevy::prelude::*;

use crate::timers::{Countdowns, TimerSlot};

#[derive(Resource, Debug, Clone)]
pub struct SessionConfig {
    /// Time budget of one login session.
    pub length: Duration,
    /// Grace period granted when the session runs out mid-round.
    pub extension: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            length: Duration::from_secs(15 * 60),
            extension: Duration::from_secs(2 * 60),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionVerdict {
    /// A round was in progress; the session countdown was re-armed.
    Extended { by: Duration },
    Expired,
}

/// Decides what a session expiry means. Each expiry is judged once: an
/// extension re-arms the countdown, and only its own expiry is judged next.
#[derive(Resource, Debug, Default)]
pub struct SessionClock {
    extensions_granted: u32,
}

impl SessionClock {
    pub fn begin(&mut self, countdowns: &mut Countdowns, config: &SessionConfig, now: Duration) {
        self.extensions_granted = 0;
        countdowns.start(TimerSlot::Session, now, config.length);
    }

    pub fn end(&mut self, countdowns: &mut Countdowns) {
        countdowns.stop(TimerSlot::Session);
    }

    pub fn on_expired(
        &mut self,
        countdowns: &mut Countdowns,
        config: &SessionConfig,
        round_active: bool,
        now: Duration,
    ) -> SessionVerdict {
        if round_active {
            self.extensions_granted += 1;
            countdowns.start(TimerSlot::Session, now, config.extension);
            SessionVerdict::Extended {
                by: config.extension,
            }
        } else {
            SessionVerdict::Expired
        }
    }

    pub fn extensions_granted(&self) -> u32 {
        self.extensions_granted
    }
}
