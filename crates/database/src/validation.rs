//! Input validation for user-supplied fields.

use std::fmt;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Empty value where one is required.
    Empty(String),
    /// Value too long.
    TooLong { field: String, max: usize, actual: usize },
    /// Invalid email format.
    InvalidEmail(String),
    /// Invalid URL.
    InvalidUrl(String),
    /// Invalid phone number.
    InvalidPhone(String),
    /// Value outside the allowed set.
    Unknown { field: String, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Empty(field) => write!(f, "{} cannot be empty", field),
            ValidationError::TooLong { field, max, actual } => {
                write!(f, "{} is too long ({} chars, max {})", field, actual, max)
            }
            ValidationError::InvalidEmail(msg) => write!(f, "Invalid email: {}", msg),
            ValidationError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            ValidationError::InvalidPhone(msg) => write!(f, "Invalid phone number: {}", msg),
            ValidationError::Unknown { field, value } => {
                write!(f, "Unknown {}: {}", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Maximum allowed length for email addresses.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum allowed length for URLs.
pub const MAX_URL_LENGTH: usize = 2048;

/// Maximum allowed length for names and titles.
pub const MAX_NAME_LENGTH: usize = 120;

/// Maximum allowed length for long text (descriptions, answers).
pub const MAX_TEXT_LENGTH: usize = 10_000;

/// Check that a value is present and within `max` chars.
///
/// Returns the trimmed value.
pub fn validate_required<'a>(
    field: &str,
    value: &'a str,
    max: usize,
) -> Result<&'a str, ValidationError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Empty(field.to_string()));
    }

    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
            actual,
        });
    }

    Ok(value)
}

/// Validate an email address (basic RFC 5322 format check).
///
/// This is a basic validation that checks:
/// - Contains exactly one @
/// - Has at least one character on each side of the @
/// - Has a dotted domain that does not start or end with a dot
/// - Is not too long
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = validate_required("email", email, MAX_EMAIL_LENGTH)?;

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ValidationError::InvalidEmail(
            "must contain exactly one @ symbol".to_string(),
        ));
    }

    let (local, domain) = (parts[0], parts[1]);

    if local.is_empty() {
        return Err(ValidationError::InvalidEmail(
            "missing local part (before @)".to_string(),
        ));
    }

    if domain.is_empty() {
        return Err(ValidationError::InvalidEmail(
            "missing domain (after @)".to_string(),
        ));
    }

    if !domain.contains('.') {
        return Err(ValidationError::InvalidEmail(
            "domain must contain at least one dot".to_string(),
        ));
    }

    if domain.starts_with('.') || domain.ends_with('.') {
        return Err(ValidationError::InvalidEmail(
            "domain cannot start or end with a dot".to_string(),
        ));
    }

    if domain.contains("..") {
        return Err(ValidationError::InvalidEmail(
            "domain cannot contain consecutive dots".to_string(),
        ));
    }

    Ok(())
}

/// Validate an http(s) URL with a host.
pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    let url = validate_required("URL", url, MAX_URL_LENGTH)?;

    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| ValidationError::InvalidUrl("must start with http:// or https://".to_string()))?;

    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() {
        return Err(ValidationError::InvalidUrl("missing host".to_string()));
    }

    if host.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidUrl(
            "host cannot contain whitespace".to_string(),
        ));
    }

    Ok(())
}

/// Validate a phone number: optional leading +, then 7 to 15 digits.
///
/// Spaces, dashes, dots and parentheses are allowed as separators.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let phone = validate_required("phone number", phone, 32)?;

    let body = phone.strip_prefix('+').unwrap_or(phone);
    let mut digits = 0;
    for c in body.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' | '.' | '(' | ')' => {}
            other => {
                return Err(ValidationError::InvalidPhone(format!(
                    "invalid character '{}'",
                    other
                )))
            }
        }
    }

    if !(7..=15).contains(&digits) {
        return Err(ValidationError::InvalidPhone(
            "must contain between 7 and 15 digits".to_string(),
        ));
    }

    Ok(())
}
