use crate::form::validator::ValidationError;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Why a submission did not sign the user in. `Display` is the message shown
/// next to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("Too many attempts. Please try again in {}", wait_message(.retry_after))]
    RateLimited { retry_after: Duration },
    #[error("An error occurred during sign in. Please try again.")]
    AuthenticationFailure,
    #[error("A sign in is already in progress")]
    SubmissionInProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidEmailFormat,
    InvalidPassword,
    RateLimited,
    AuthenticationFailure,
    SubmissionInProgress,
}

impl SubmitError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Invalid(ValidationError::InvalidEmailFormat) => ErrorKind::InvalidEmailFormat,
            Self::Invalid(_) => ErrorKind::InvalidPassword,
            Self::RateLimited { .. } => ErrorKind::RateLimited,
            Self::AuthenticationFailure => ErrorKind::AuthenticationFailure,
            Self::SubmissionInProgress => ErrorKind::SubmissionInProgress,
        }
    }

    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

/// Remaining wait rounded up to whole minutes.
fn wait_message(retry_after: &Duration) -> String {
    let minutes = retry_after.as_millis().div_ceil(60_000).max(1);

    if minutes == 1 {
        "1 minute".to_string()
    } else {
        format!("{minutes} minutes")
    }
}
