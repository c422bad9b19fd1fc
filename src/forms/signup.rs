//! Signup form: email and password.

use auth::{AuthHandle, SignupOutcome};

use super::validation::{FieldErrors, validate_signup};
use super::{Submission, on_input};

#[derive(Clone, Debug, Default)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub errors: FieldErrors,
}

impl SignupForm {
    pub fn set_email(&mut self, handle: &AuthHandle, email: &str) {
        email.clone_into(&mut self.email);
        on_input(handle);
    }

    pub fn set_password(&mut self, handle: &AuthHandle, password: &str) {
        password.clone_into(&mut self.password);
        on_input(handle);
    }

    pub async fn submit(&mut self, handle: &AuthHandle) -> Submission {
        let data = match validate_signup(&self.email, &self.password) {
            Ok(data) => data,
            Err(errors) => {
                self.errors = errors;
                return Submission::Invalid;
            }
        };
        self.errors = FieldErrors::default();

        match handle.signup(&data).await {
            Ok(SignupOutcome::SignedIn) => {
                self.password.clear();
                Submission::Accepted
            }
            Ok(SignupOutcome::ConfirmationRequired) => {
                self.password.clear();
                Submission::PendingConfirmation
            }
            Err(e) => {
                tracing::error!(error = %e, email = %data.email, "signup failed");
                Submission::Rejected
            }
        }
    }
}

#[cfg(test)]
#[path = "signup_test.rs"]
mod tests;
