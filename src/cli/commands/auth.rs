use clap::{Arg, ArgMatches, Command};
use std::time::Duration;

pub const ARG_AUTH_DELAY_MS: &str = "auth-delay-ms";

#[derive(Debug, Clone, Copy)]
pub struct Options {
    pub delay: Duration,
}

impl Options {
    /// Parse authentication arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the delay is missing.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let delay_ms = matches
            .get_one::<u64>(ARG_AUTH_DELAY_MS)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --{ARG_AUTH_DELAY_MS}"))?;

        Ok(Self {
            delay: Duration::from_millis(delay_ms),
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_AUTH_DELAY_MS)
            .long(ARG_AUTH_DELAY_MS)
            .help("Delay of the simulated sign-in request in milliseconds")
            .env("LOGINGUARD_AUTH_DELAY_MS")
            .default_value("1000")
            .value_parser(clap::value_parser!(u64)),
    )
}
