//! Login attempt guard.
//!
//! Flow Overview:
//! 1) Every failed submission is recorded with `record_failure`.
//! 2) When the counter reaches `max_attempts` the guard locks until `now + lockout`.
//! 3) While locked, `check` rejects with the remaining wait and the counter is frozen.
//! 4) `expire` reopens the guard and zeroes the counter once the deadline passes.
//!
//! All transitions take an explicit `now` so the state machine stays pure. The
//! owner is expected to arm a [`timer::LockoutTimer`] on [`Transition::Locked`];
//! `check` also expires lazily, so a late timer can never extend a lockout.

pub mod timer;

use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_LOCKOUT: Duration = Duration::from_millis(300_000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuardConfig {
    pub max_attempts: u32,
    pub lockout: Duration,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            lockout: DEFAULT_LOCKOUT,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardState {
    Open,
    Locked { until: Instant },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LockState {
    Open,
    Locked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Reject { retry_after: Duration },
}

/// Result of recording a failed attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Counted { attempts: u32, remaining: u32 },
    Locked { until: Instant },
}

#[derive(Debug)]
pub struct AttemptGuard {
    config: GuardConfig,
    attempts: u32,
    state: GuardState,
}

impl AttemptGuard {
    #[must_use]
    pub fn new(config: GuardConfig) -> Self {
        Self {
            config,
            attempts: 0,
            state: GuardState::Open,
        }
    }

    #[must_use]
    pub const fn config(&self) -> GuardConfig {
        self.config
    }

    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub const fn state(&self) -> GuardState {
        self.state
    }

    #[must_use]
    pub fn is_locked(&self, now: Instant) -> bool {
        matches!(self.state, GuardState::Locked { until } if now < until)
    }

    #[must_use]
    pub fn lock_state(&self, now: Instant) -> LockState {
        if self.is_locked(now) {
            LockState::Locked
        } else {
            LockState::Open
        }
    }

    /// Remaining lockout, `None` while open.
    #[must_use]
    pub fn retry_after(&self, now: Instant) -> Option<Duration> {
        match self.state {
            GuardState::Locked { until } if now < until => Some(until - now),
            _ => None,
        }
    }

    /// Decide whether a submission may proceed. Never changes the counter.
    pub fn check(&mut self, now: Instant) -> GuardDecision {
        self.expire(now);

        match self.retry_after(now) {
            Some(retry_after) => {
                debug!(
                    retry_after_ms = retry_after.as_millis(),
                    "submission rejected while locked"
                );
                GuardDecision::Reject { retry_after }
            }
            None => GuardDecision::Allow,
        }
    }

    /// Count a failed submission, locking once the threshold is reached.
    ///
    /// While locked the counter is left untouched and the current deadline is
    /// returned.
    pub fn record_failure(&mut self, now: Instant) -> Transition {
        self.expire(now);

        if let GuardState::Locked { until } = self.state {
            return Transition::Locked { until };
        }

        self.attempts = self.attempts.saturating_add(1);

        if self.attempts >= self.config.max_attempts {
            let until = now + self.config.lockout;
            self.state = GuardState::Locked { until };

            warn!(
                attempts = self.attempts,
                lockout_ms = self.config.lockout.as_millis(),
                "too many failed attempts, locking"
            );

            return Transition::Locked { until };
        }

        let remaining = self.config.max_attempts - self.attempts;
        debug!(attempts = self.attempts, remaining, "failed attempt recorded");

        Transition::Counted {
            attempts: self.attempts,
            remaining,
        }
    }

    /// Clear the counter after a successful sign-in. Has no effect while locked.
    pub fn record_success(&mut self) {
        if matches!(self.state, GuardState::Open) {
            self.attempts = 0;
        }
    }

    /// Reopen the guard if the lockout deadline has passed. Returns `true` on
    /// the `Locked -> Open` transition.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.state {
            GuardState::Locked { until } if now >= until => {
                self.state = GuardState::Open;
                self.attempts = 0;
                info!("lockout expired, guard reopened");
                true
            }
            _ => false,
        }
    }
}

impl Default for AttemptGuard {
    fn default() -> Self {
        Self::new(GuardConfig::default())
    }
}
