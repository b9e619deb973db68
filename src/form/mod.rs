//! Sign-in form state and submission flow.
//!
//! Flow Overview:
//! 1) Reject if a submission is already in flight.
//! 2) Ask the guard; while locked, reject with the remaining wait.
//! 3) Validate; malformed credentials count as a failed attempt.
//! 4) Authenticate; failures are logged, counted and reported generically.
//!
//! The form lock is never held across the authentication call.

pub mod auth;
pub mod error;
pub mod validator;

pub use self::auth::{AuthError, Authenticator, SimulatedAuthenticator};
pub use self::error::{ErrorKind, SubmitError};
pub use self::validator::{validate, Credentials, ValidationError};

use crate::guard::{
    timer::LockoutTimer, AttemptGuard, GuardConfig, GuardDecision, LockState, Transition,
};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::time::Instant;
use tracing::{debug, error, info, instrument};
use ulid::Ulid;

#[derive(Debug)]
struct FormState {
    guard: AttemptGuard,
    is_submitting: bool,
    error_message: Option<String>,
    timer: Option<LockoutTimer>,
}

/// Snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormStatus {
    pub lock_state: LockState,
    pub attempts: u32,
    pub retry_after_ms: Option<u64>,
    pub is_submitting: bool,
    pub error_message: Option<String>,
}

/// A successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub email: String,
    pub remember_me: bool,
}

#[derive(Debug)]
pub struct LoginForm<A> {
    authenticator: A,
    state: Arc<Mutex<FormState>>,
}

impl<A: Authenticator> LoginForm<A> {
    #[must_use]
    pub fn new(config: GuardConfig, authenticator: A) -> Self {
        Self {
            authenticator,
            state: Arc::new(Mutex::new(FormState {
                guard: AttemptGuard::new(config),
                is_submitting: false,
                error_message: None,
                timer: None,
            })),
        }
    }

    #[must_use]
    pub fn status(&self) -> FormStatus {
        let now = Instant::now();
        let state = lock(&self.state);

        FormStatus {
            lock_state: state.guard.lock_state(now),
            attempts: state.guard.attempts(),
            retry_after_ms: state
                .guard
                .retry_after(now)
                .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
            is_submitting: state.is_submitting,
            error_message: state.error_message.clone(),
        }
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        lock(&self.state).guard.attempts()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        lock(&self.state).is_submitting
    }

    /// Run one submission through the guard, the validator and the
    /// authenticator.
    ///
    /// # Errors
    /// Returns a [`SubmitError`] describing why the user is not signed in. The
    /// same message is kept in the form state until the next submission.
    #[instrument(skip_all, fields(attempt = %Ulid::new()))]
    pub async fn submit(&self, credentials: Credentials) -> Result<Session, SubmitError> {
        let in_flight = self.begin(&credentials)?;

        let result = self.authenticator.authenticate(&credentials).await;

        let mut state = in_flight.finish();

        match result {
            Ok(()) => {
                state.guard.record_success();
                info!(remember_me = credentials.remember_me, "sign in succeeded");

                Ok(Session {
                    email: credentials.email().to_string(),
                    remember_me: credentials.remember_me,
                })
            }

            Err(e) => {
                error!("Login error: {e}");

                Err(self.fail(&mut state, SubmitError::AuthenticationFailure, true))
            }
        }
    }

    /// Checks that run before the authenticator. Marks the form as submitting
    /// when they pass.
    fn begin(&self, credentials: &Credentials) -> Result<InFlight<'_>, SubmitError> {
        let mut state = lock(&self.state);

        if state.is_submitting {
            debug!("submission already in flight");
            return Err(SubmitError::SubmissionInProgress);
        }

        state.error_message = None;

        if let GuardDecision::Reject { retry_after } = state.guard.check(Instant::now()) {
            return Err(self.fail(&mut state, SubmitError::RateLimited { retry_after }, false));
        }

        if let Err(e) = validate(credentials) {
            debug!("credentials rejected: {e}");
            return Err(self.fail(&mut state, SubmitError::from(e), true));
        }

        state.is_submitting = true;

        Ok(InFlight {
            state: &self.state,
            finished: false,
        })
    }

    /// Store the user-facing message and, when `count` is set, record a failed
    /// attempt, arming the lockout timer if the guard just locked.
    fn fail(&self, state: &mut FormState, err: SubmitError, count: bool) -> SubmitError {
        if count {
            if let Transition::Locked { until } = state.guard.record_failure(Instant::now()) {
                let armed = state
                    .timer
                    .as_ref()
                    .is_some_and(|timer| timer.deadline() == until);
                if !armed {
                    state.timer = Some(schedule_expiry(Arc::downgrade(&self.state), until));
                }
            }
        }

        state.error_message = Some(err.to_string());

        err
    }
}

impl<A> Drop for LoginForm<A> {
    fn drop(&mut self) {
        if let Some(timer) = lock(&self.state).timer.take() {
            timer.cancel();
        }
    }
}

fn schedule_expiry(state: Weak<Mutex<FormState>>, until: Instant) -> LockoutTimer {
    LockoutTimer::schedule(until, move || {
        if let Some(state) = state.upgrade() {
            lock(&state).guard.expire(Instant::now());
        }
    })
}

/// Clears `is_submitting` when dropped, so a cancelled submit future does not
/// leave the form disabled.
struct InFlight<'a> {
    state: &'a Mutex<FormState>,
    finished: bool,
}

impl<'a> InFlight<'a> {
    fn finish(mut self) -> MutexGuard<'a, FormState> {
        self.finished = true;
        let mut state = lock(self.state);
        state.is_submitting = false;
        state
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.finished {
            lock(self.state).is_submitting = false;
        }
    }
}

fn lock(state: &Mutex<FormState>) -> MutexGuard<'_, FormState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
