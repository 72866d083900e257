// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Input validation: chirp bodies, emails and passwords.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Maximum chirp length, counted in characters
pub const MAX_CHIRP_LENGTH: usize = 140;
const MAX_PASSWORD_LENGTH: usize = 128;
const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321 SMTP limit

/// Replacement for every redacted word
pub const REDACTION_MASK: &str = "****";

/// Words that are masked out of chirp bodies (compared lower-cased)
const PROFANE_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// Possible validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Chirp is too long")]
    ChirpTooLong,

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a chirp body and return it with profanity redacted.
///
/// The length check runs on the raw body, before redaction.
pub fn validate_chirp(body: &str) -> ValidationResult<String> {
    if body.chars().count() > MAX_CHIRP_LENGTH {
        return Err(ValidationError::ChirpTooLong);
    }

    Ok(redact_profanity(body))
}

/// Replace denylisted words with [`REDACTION_MASK`].
///
/// Only whole space-separated tokens match, case-insensitively.
/// `"Sharbert!"` is left alone.
pub fn redact_profanity(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            let lowered = word.to_lowercase();
            if PROFANE_WORDS.contains(&lowered.as_str()) {
                REDACTION_MASK
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Validate an email address
pub fn validate_email(email: &str) -> ValidationResult<&str> {
    if email.is_empty() {
        return Err(ValidationError::InvalidEmail(
            "Email address cannot be empty".to_string(),
        ));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::InvalidEmail(format!(
            "Email address cannot exceed {MAX_EMAIL_LENGTH} characters"
        )));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail(
            "Invalid email address format".to_string(),
        ));
    }

    Ok(email)
}

/// Validate a password before it is hashed
pub fn validate_password(password: &str) -> ValidationResult<&str> {
    if password.is_empty() {
        return Err(ValidationError::InvalidPassword(
            "Password must not be empty".to_string(),
        ));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::InvalidPassword(format!(
            "Password cannot exceed {MAX_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(password)
}
