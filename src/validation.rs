//! Pure checks on contact submissions, run before any I/O.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::persistence::NewContact;

/// Longest accepted name or email, in characters. Matches the column width.
pub const MAX_NAME_CHARS: usize = 255;

/// `local@domain.tld` with no whitespace and exactly one `@` per part.
/// Deliberately loose; not RFC 5322.
#[allow(clippy::expect_used)]
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid literal")
});

/// Returns `true` if `email` has the `local@domain.tld` shape.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Checks the three contact fields and returns them trimmed.
///
/// Fields are checked in the order name, email, message; the first
/// absent or blank one is reported. Name and email are limited to
/// [`MAX_NAME_CHARS`]; the message has no limit.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] for an absent or blank field,
/// [`ValidationError::TooLong`] for an over-long name or email and
/// [`ValidationError::InvalidEmail`] for a malformed address.
pub fn validate_contact_input(
    name: Option<&str>,
    email: Option<&str>,
    message: Option<&str>,
) -> Result<NewContact, ValidationError> {
    let name = required("name", name)?;
    let email = required("email", email)?;
    let message = required("message", message)?;

    within_limit("name", name)?;
    within_limit("email", email)?;

    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(NewContact {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    })
}

fn required<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, ValidationError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn within_limit(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.chars().count() > MAX_NAME_CHARS {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_NAME_CHARS,
        });
    }
    Ok(())
}
