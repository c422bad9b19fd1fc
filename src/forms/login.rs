//! Login form: email, password and a remember-me flag.

use auth::AuthHandle;

use super::validation::{FieldErrors, validate_login};
use super::{Submission, on_input};

#[derive(Clone, Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
    pub errors: FieldErrors,
}

impl LoginForm {
    pub fn set_email(&mut self, handle: &AuthHandle, email: &str) {
        email.clone_into(&mut self.email);
        on_input(handle);
    }

    pub fn set_password(&mut self, handle: &AuthHandle, password: &str) {
        password.clone_into(&mut self.password);
        on_input(handle);
    }

    pub fn set_remember_me(&mut self, remember_me: bool) {
        self.remember_me = remember_me;
    }

    pub async fn submit(&mut self, handle: &AuthHandle) -> Submission {
        let data = match validate_login(&self.email, &self.password, self.remember_me) {
            Ok(data) => data,
            Err(errors) => {
                self.errors = errors;
                return Submission::Invalid;
            }
        };
        self.errors = FieldErrors::default();

        match handle.login(&data).await {
            Ok(()) if handle.is_authenticated() => {
                self.password.clear();
                Submission::Accepted
            }
            Ok(()) => Submission::Rejected,
            Err(e) => {
                tracing::error!(error = %e, email = %data.email, "login failed");
                Submission::Rejected
            }
        }
    }
}

#[cfg(test)]
#[path = "login_test.rs"]
mod tests;
