//! Signup page.

use auth::AuthState;

use super::{push_alert, push_field};
use crate::forms::signup::SignupForm;

#[must_use]
pub fn render(state: &AuthState, form: &SignupForm, notice: Option<&str>) -> String {
    let mut out = String::from("Create Account\nEnter your email and a password to get started\n\n");
    push_alert(&mut out, state);
    if let Some(notice) = notice {
        out.push_str(&format!("{notice}\n\n"));
    }
    push_field(&mut out, "Email", &form.email, form.errors.email);
    push_field(&mut out, "Password", &"*".repeat(form.password.chars().count()), form.errors.password);
    out.push('\n');

    if state.loading {
        out.push_str("Signing up...\n");
    } else {
        out.push_str("> signup <email> <password>\n");
    }
    out.push_str("Already have an account? Sign in: `go /login`\n");
    out
}
