use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 128;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

/// Values typed into the form. Never persisted.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
    pub remember_me: bool,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
            remember_me: false,
        }
    }

    #[must_use]
    pub const fn remember_me(mut self, remember_me: bool) -> Self {
        self.remember_me = remember_me;
        self
    }

    /// Email with surrounding whitespace removed. Validation runs on the raw
    /// field, so this only differs from it for input that fails validation.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.trim()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid email address")]
    InvalidEmailFormat,
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("Password must be at most {max} characters")]
    PasswordTooLong { max: usize },
}

#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(EMAIL_PATTERN).is_ok_and(|re| re.is_match(email))
}

/// Check credentials before they reach the authenticator.
///
/// # Errors
/// Returns the first rule the credentials break, email first.
pub fn validate(credentials: &Credentials) -> Result<(), ValidationError> {
    if !valid_email(&credentials.email) {
        return Err(ValidationError::InvalidEmailFormat);
    }

    let length = credentials.password.expose_secret().chars().count();
    if length < PASSWORD_MIN_LENGTH {
        return Err(ValidationError::PasswordTooShort {
            min: PASSWORD_MIN_LENGTH,
        });
    }
    if length > PASSWORD_MAX_LENGTH {
        return Err(ValidationError::PasswordTooLong {
            max: PASSWORD_MAX_LENGTH,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        for email in [
            "user@example.com",
            "first.last@example.co.uk",
            "user+tag@sub.example.org",
            "a_b%c-d@x-y.io",
            "UPPER@EXAMPLE.COM",
        ] {
            assert!(valid_email(email), "{email} should be valid");
        }
    }

    #[test]
    fn rejects_non_matching_addresses() {
        for email in [
            "",
            "bad-email",
            "@example.com",
            "user@",
            "user@example",
            "user@example.c",
            "user@example.c0m",
            "user name@example.com",
            "user@exa mple.com",
            "user@@example.com",
            "ünïcode@example.com",
            "user@example.com.",
        ] {
            assert!(!valid_email(email), "{email} should be invalid");
        }
    }

    #[test]
    fn bad_email_is_rejected_before_password() {
        let credentials = Credentials::new("bad-email", "whatever1");
        assert_eq!(
            validate(&credentials),
            Err(ValidationError::InvalidEmailFormat)
        );

        let credentials = Credentials::new("bad-email", "short");
        assert_eq!(
            validate(&credentials),
            Err(ValidationError::InvalidEmailFormat)
        );
    }

    #[test]
    fn padded_email_is_rejected() {
        for email in ["  user@example.com\t", " user@example.com", "user@example.com\n"] {
            let credentials = Credentials::new(email, "password1");
            assert_eq!(
                validate(&credentials),
                Err(ValidationError::InvalidEmailFormat),
                "{email:?} should be invalid"
            );
        }
    }

    #[test]
    fn password_length_bounds() {
        let at_min = Credentials::new("user@example.com", "x".repeat(PASSWORD_MIN_LENGTH));
        assert_eq!(validate(&at_min), Ok(()));

        let at_max = Credentials::new("user@example.com", "x".repeat(PASSWORD_MAX_LENGTH));
        assert_eq!(validate(&at_max), Ok(()));

        let short = Credentials::new("user@example.com", "x".repeat(PASSWORD_MIN_LENGTH - 1));
        assert_eq!(
            validate(&short),
            Err(ValidationError::PasswordTooShort { min: 8 })
        );

        let long = Credentials::new("user@example.com", "x".repeat(PASSWORD_MAX_LENGTH + 1));
        assert_eq!(
            validate(&long),
            Err(ValidationError::PasswordTooLong { max: 128 })
        );
    }

    #[test]
    fn password_length_counts_characters() {
        // 8 characters, 16 bytes
        let credentials = Credentials::new("user@example.com", "ññññññññ");
        assert_eq!(validate(&credentials), Ok(()));
    }

    #[test]
    fn debug_output_hides_password() {
        let credentials = Credentials::new("user@example.com", "hunter2hunter2");
        let debug = format!("{credentials:?}");
        assert!(!debug.contains("hunter2hunter2"));
    }

    #[test]
    fn messages() {
        assert_eq!(
            ValidationError::InvalidEmailFormat.to_string(),
            "Please enter a valid email address"
        );
        assert_eq!(
            ValidationError::PasswordTooShort { min: 8 }.to_string(),
            "Password must be at least 8 characters"
        );
    }
}
