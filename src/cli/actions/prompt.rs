//! Terminal front end: reads an email line then a password line, submits the
//! pair and prints the outcome. EOF ends the session.

use crate::form::{
    Authenticator, Credentials, ErrorKind, FormStatus, LoginForm, Session, SimulatedAuthenticator,
    SubmitError,
};
use crate::guard::{GuardConfig, LockState};
use anyhow::{Context, Result};
use serde::Serialize;
use std::{io::IsTerminal, time::Duration};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct Args {
    pub guard: GuardConfig,
    pub auth_delay: Duration,
    pub remember_me: bool,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    session: Option<&'a Session>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    retry_after_ms: Option<u64>,
    status: FormStatus,
}

impl<'a> Report<'a> {
    fn new(result: &'a Result<Session, SubmitError>, status: FormStatus) -> Self {
        match result {
            Ok(session) => Self {
                outcome: "signed_in",
                session: Some(session),
                error: None,
                message: None,
                retry_after_ms: None,
                status,
            },
            Err(e) => Self {
                outcome: "rejected",
                session: None,
                error: Some(e.kind()),
                message: Some(e.to_string()),
                retry_after_ms: e
                    .retry_after()
                    .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
                status,
            },
        }
    }

    fn to_text(&self) -> String {
        let mut text = match (self.session, &self.message) {
            (Some(session), _) if session.remember_me => {
                format!("signed in as {} (remembered)", session.email)
            }
            (Some(session), _) => format!("signed in as {}", session.email),
            (None, Some(message)) => message.clone(),
            (None, None) => String::new(),
        };

        if self.status.lock_state == LockState::Locked {
            if let Some(ms) = self.status.retry_after_ms {
                text.push_str(&format!("\nlocked: {}s remaining", ms.div_ceil(1000)));
            }
        }

        text
    }
}

/// Execute the prompt action on stdin/stdout.
///
/// # Errors
/// Returns an error if reading stdin or writing stdout fails.
pub async fn execute(args: Args) -> Result<()> {
    let form = LoginForm::new(args.guard, SimulatedAuthenticator::new(args.auth_delay));
    let interactive = !args.json && std::io::stdin().is_terminal();

    debug!(
        max_attempts = args.guard.max_attempts,
        lockout_ms = args.guard.lockout.as_millis(),
        "starting sign-in prompt"
    );

    run(
        &form,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        &args,
        interactive,
    )
    .await
}

/// Drive `form` from `reader`, writing one result per attempt to `writer`.
///
/// # Errors
/// Returns an error on I/O failure or if a report cannot be serialized.
pub async fn run<A, R, W>(
    form: &LoginForm<A>,
    reader: R,
    mut writer: W,
    args: &Args,
    interactive: bool,
) -> Result<()>
where
    A: Authenticator,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    loop {
        if interactive {
            writer.write_all(b"email: ").await?;
            writer.flush().await?;
        }
        let Some(email) = lines.next_line().await.context("failed to read email")? else {
            break;
        };

        if interactive {
            writer.write_all(b"password: ").await?;
            writer.flush().await?;
        }
        let Some(password) = lines
            .next_line()
            .await
            .context("failed to read password")?
        else {
            debug!("input ended before a password was given");
            break;
        };

        let credentials = Credentials::new(email, password).remember_me(args.remember_me);
        let result = form.submit(credentials).await;
        let report = Report::new(&result, form.status());

        let mut line = if args.json {
            serde_json::to_string(&report)?
        } else {
            report.to_text()
        };
        line.push('\n');

        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;
    }

    Ok(())
}
