use clap::{Arg, ArgAction, ArgMatches, Command};

pub const ARG_REMEMBER_ME: &str = "remember-me";
pub const ARG_JSON: &str = "json";

#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub remember_me: bool,
    pub json: bool,
}

impl Options {
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        Self {
            remember_me: matches.get_flag(ARG_REMEMBER_ME),
            json: matches.get_flag(ARG_JSON),
        }
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_REMEMBER_ME)
                .long(ARG_REMEMBER_ME)
                .help("Keep the session after sign in")
                .env("LOGINGUARD_REMEMBER_ME")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(ARG_JSON)
                .long(ARG_JSON)
                .help("Print one JSON object per attempt instead of text")
                .env("LOGINGUARD_JSON")
                .action(ArgAction::SetTrue),
        )
}
