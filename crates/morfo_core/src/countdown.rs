//! Pausable countdown with stale-tick protection.
//!
//! Time is passed in explicitly as the elapsed [`Duration`] since some fixed
//! origin (the app's real clock in practice), so the countdown can be driven
//! from a Bevy system and from tests alike.

use core::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountdownState {
    #[default]
    Idle,
    Running {
        deadline: Duration,
    },
    Paused {
        remaining: Duration,
    },
    Expired,
}

/// Issued every time a tick is scheduled. A tick is only honoured while its
/// handle is the one most recently issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickHandle {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The handle was cancelled by a pause, stop or restart.
    Stale,
    Pending { remaining: Duration },
    /// Reported exactly once per start.
    Expired,
}

#[derive(Debug, Clone, Default)]
pub struct Countdown {
    state: CountdownState,
    generation: u64,
}

impl Countdown {
    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, CountdownState::Running { .. })
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.state, CountdownState::Paused { .. })
    }

    pub fn is_expired(&self) -> bool {
        self.state == CountdownState::Expired
    }

    /// Cancels whatever was counting and starts over.
    pub fn start(&mut self, now: Duration, duration: Duration) -> TickHandle {
        self.state = CountdownState::Running {
            deadline: now + duration,
        };
        self.schedule()
    }

    /// Freezes the remaining time. Ignored unless running.
    pub fn pause(&mut self, now: Duration) {
        if let CountdownState::Running { deadline } = self.state {
            self.state = CountdownState::Paused {
                remaining: deadline.saturating_sub(now),
            };
            self.cancel();
        }
    }

    /// Picks up where `pause` left off. Ignored unless paused.
    pub fn resume(&mut self, now: Duration) -> Option<TickHandle> {
        let CountdownState::Paused { remaining } = self.state else {
            return None;
        };
        self.state = CountdownState::Running {
            deadline: now + remaining,
        };
        Some(self.schedule())
    }

    pub fn stop(&mut self) {
        self.state = CountdownState::Idle;
        self.cancel();
    }

    /// Moves a running deadline (or a paused remainder) later by `extra`.
    pub fn extend(&mut self, extra: Duration) {
        match &mut self.state {
            CountdownState::Running { deadline } => *deadline += extra,
            CountdownState::Paused { remaining } => *remaining += extra,
            CountdownState::Idle | CountdownState::Expired => {}
        }
    }

    pub fn remaining(&self, now: Duration) -> Duration {
        match self.state {
            CountdownState::Running { deadline } => deadline.saturating_sub(now),
            CountdownState::Paused { remaining } => remaining,
            CountdownState::Idle | CountdownState::Expired => Duration::ZERO,
        }
    }

    pub fn tick(&mut self, handle: TickHandle, now: Duration) -> TickOutcome {
        if handle.generation != self.generation {
            return TickOutcome::Stale;
        }
        let CountdownState::Running { deadline } = self.state else {
            return TickOutcome::Stale;
        };
        if now >= deadline {
            self.state = CountdownState::Expired;
            self.cancel();
            TickOutcome::Expired
        } else {
            TickOutcome::Pending {
                remaining: deadline - now,
            }
        }
    }

    fn schedule(&mut self) -> TickHandle {
        self.generation += 1;
        TickHandle {
            generation: self.generation,
        }
    }

    fn cancel(&mut self) {
        self.generation += 1;
    }
}
