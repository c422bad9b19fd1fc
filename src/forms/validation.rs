//! Local validation for the auth forms.
//!
//! Runs before any store call; a form that fails here never reaches the
//! backend.

use regex::Regex;

use auth::{LoginData, SignupData};

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$";

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters";
pub const PASSWORD_TOO_WEAK: &str =
    "Password must contain at least one lowercase letter, one uppercase letter, and one number";

const MIN_PASSWORD_CHARS: usize = 8;

/// Per-field validation messages. `None` means the field is valid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl FieldErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

/// Validate signup input.
///
/// # Errors
///
/// Returns the per-field messages when any field is invalid.
pub fn validate_signup(email: &str, password: &str) -> Result<SignupData, FieldErrors> {
    let errors = FieldErrors { email: check_email(email), password: check_new_password(password) };
    if errors.is_empty() {
        Ok(SignupData { email: email.to_owned(), password: password.to_owned() })
    } else {
        Err(errors)
    }
}

/// Validate login input.
///
/// # Errors
///
/// Returns the per-field messages when any field is invalid.
pub fn validate_login(email: &str, password: &str, remember_me: bool) -> Result<LoginData, FieldErrors> {
    let errors = FieldErrors {
        email: check_email(email),
        password: password.is_empty().then_some(PASSWORD_REQUIRED),
    };
    if errors.is_empty() {
        Ok(LoginData { email: email.to_owned(), password: password.to_owned(), remember_me })
    } else {
        Err(errors)
    }
}

fn check_email(email: &str) -> Option<&'static str> {
    if email.is_empty() {
        return Some(EMAIL_REQUIRED);
    }
    let well_formed = !email.starts_with('.')
        && !email.contains("..")
        && Regex::new(EMAIL_PATTERN).is_ok_and(|re| re.is_match(email));
    (!well_formed).then_some(EMAIL_INVALID)
}

fn check_new_password(password: &str) -> Option<&'static str> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Some(PASSWORD_TOO_SHORT);
    }
    let has_lowercase = password.chars().any(|c| c.is_ascii_lowercase());
    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    (!(has_lowercase && has_uppercase && has_digit)).then_some(PASSWORD_TOO_WEAK)
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;
