//! Maps parsed CLI arguments to the action to run.

use crate::cli::actions::{prompt::Args, Action};
use crate::cli::commands::{auth, guard, prompt};
use anyhow::Result;

/// Map validated CLI matches to the prompt action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let guard_opts = guard::Options::parse(matches)?;
    let auth_opts = auth::Options::parse(matches)?;
    let prompt_opts = prompt::Options::parse(matches);

    Ok(Action::Prompt(Args {
        guard: guard_opts.config(),
        auth_delay: auth_opts.delay,
        remember_me: prompt_opts.remember_me,
        json: prompt_opts.json,
    }))
}
