use crate::guard::GuardConfig;
use clap::{Arg, ArgMatches, Command};
use std::time::Duration;

pub const ARG_MAX_ATTEMPTS: &str = "max-attempts";
pub const ARG_LOCKOUT_MS: &str = "lockout-ms";

#[derive(Debug, Clone, Copy)]
pub struct Options {
    pub max_attempts: u32,
    pub lockout_ms: u64,
}

impl Options {
    /// Parse lockout arguments from matches.
    ///
    /// # Errors
    /// Returns an error if an argument is missing.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let max_attempts = matches
            .get_one::<u32>(ARG_MAX_ATTEMPTS)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --{ARG_MAX_ATTEMPTS}"))?;
        let lockout_ms = matches
            .get_one::<u64>(ARG_LOCKOUT_MS)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --{ARG_LOCKOUT_MS}"))?;

        Ok(Self {
            max_attempts,
            lockout_ms,
        })
    }

    #[must_use]
    pub const fn config(&self) -> GuardConfig {
        GuardConfig {
            max_attempts: self.max_attempts,
            lockout: Duration::from_millis(self.lockout_ms),
        }
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_MAX_ATTEMPTS)
                .long(ARG_MAX_ATTEMPTS)
                .help("Failed attempts allowed before the form locks")
                .env("LOGINGUARD_MAX_ATTEMPTS")
                .default_value("5")
                .value_parser(clap::value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new(ARG_LOCKOUT_MS)
                .long(ARG_LOCKOUT_MS)
                .help("Lockout duration in milliseconds")
                .env("LOGINGUARD_LOCKOUT_MS")
                .default_value("300000")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}
