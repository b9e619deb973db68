//! # loginguard
//!
//! Core logic behind a sign-in form: credential validation, a placeholder
//! authentication call and a login attempt guard that locks the form after
//! too many failed submissions.
//!
//! ## Lockout
//!
//! Every submission that fails, either because the credentials are malformed
//! or because authentication failed, counts as an attempt. Once the counter
//! reaches the configured maximum (5 by default) the guard locks for a fixed
//! duration (5 minutes by default). While locked, submissions are rejected
//! with the remaining wait time and the counter is frozen. When the lockout
//! elapses the guard reopens with the counter back at zero.
//!
//! ## Layers
//!
//! - [`guard`] holds the pure state machine and the cancellable lockout timer.
//! - [`form`] owns the per-form state and runs a submission end to end.
//! - [`cli`] is a terminal front end that feeds credentials into a form.

pub mod cli;
pub mod form;
pub mod guard;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }
}
