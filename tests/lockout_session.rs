use anyhow::Result;
use loginguard::cli::actions::prompt::{run, Args};
use loginguard::form::{Credentials, LoginForm, SimulatedAuthenticator, SubmitError};
use loginguard::guard::{GuardConfig, LockState};
use std::time::Duration;

fn args(max_attempts: u32, lockout: Duration) -> Args {
    Args {
        guard: GuardConfig {
            max_attempts,
            lockout,
        },
        auth_delay: Duration::from_millis(1000),
        remember_me: true,
        json: false,
    }
}

#[tokio::test(start_paused = true)]
async fn lockout_then_recovery_over_prompt() -> Result<()> {
    let args = args(2, Duration::from_secs(60));
    let form = LoginForm::new(args.guard, SimulatedAuthenticator::new(args.auth_delay));

    let input = "nope\nwhatever1\nuser@example.com\nshort\nuser@example.com\npassword1\n";
    let mut output = Vec::new();
    run(&form, input.as_bytes(), &mut output, &args, false).await?;

    let output = String::from_utf8(output)?;
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Please enter a valid email address",
            "Password must be at least 8 characters",
            "locked: 60s remaining",
            "Too many attempts. Please try again in 1 minute",
            "locked: 60s remaining",
        ]
    );

    tokio::time::sleep(Duration::from_secs(61)).await;
    assert_eq!(form.status().lock_state, LockState::Open);
    assert_eq!(form.attempts(), 0);

    let mut output = Vec::new();
    run(
        &form,
        "user@example.com\npassword1\n".as_bytes(),
        &mut output,
        &args,
        false,
    )
    .await?;
    assert_eq!(
        String::from_utf8(output)?,
        "signed in as user@example.com (remembered)\n"
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn five_invalid_then_rate_limited() {
    let form = LoginForm::new(GuardConfig::default(), SimulatedAuthenticator::default());

    for _ in 0..5 {
        let result = form
            .submit(Credentials::new("bad-email", "whatever1"))
            .await;
        assert!(matches!(result, Err(SubmitError::Invalid(_))));
    }

    let result = form
        .submit(Credentials::new("user@example.com", "password1"))
        .await;
    assert_eq!(
        result,
        Err(SubmitError::RateLimited {
            retry_after: Duration::from_millis(300_000)
        })
    );
}
