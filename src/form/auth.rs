//! Authentication seam. The simulated implementation stands in for a remote
//! sign-in request until one exists.

use crate::form::validator::Credentials;
use std::{future::Future, time::Duration};
use thiserror::Error;
use tracing::{debug, instrument};

pub const DEFAULT_AUTH_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("credentials rejected")]
    Rejected,
    #[error("authentication backend unavailable: {0}")]
    Unavailable(String),
}

pub trait Authenticator: Send + Sync {
    /// Verify the credentials.
    ///
    /// # Errors
    /// Returns an [`AuthError`] when sign-in did not succeed for any reason.
    fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<(), AuthError>> + Send;
}

/// Accepts every well-formed submission after a fixed delay.
#[derive(Clone, Copy, Debug)]
pub struct SimulatedAuthenticator {
    delay: Duration,
}

impl SimulatedAuthenticator {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedAuthenticator {
    fn default() -> Self {
        Self::new(DEFAULT_AUTH_DELAY)
    }
}

impl Authenticator for SimulatedAuthenticator {
    #[instrument(skip_all, fields(email = %credentials.email()))]
    async fn authenticate(&self, credentials: &Credentials) -> Result<(), AuthError> {
        debug!(delay_ms = self.delay.as_millis(), "simulating sign-in request");
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}
