//! Login page.

use auth::AuthState;

use super::{push_alert, push_field};
use crate::forms::login::LoginForm;

#[must_use]
pub fn render(state: &AuthState, form: &LoginForm) -> String {
    let mut out = String::from("Sign In\nEnter your email and password to access your account\n\n");
    push_alert(&mut out, state);
    push_field(&mut out, "Email", &form.email, form.errors.email);
    push_field(&mut out, "Password", &"*".repeat(form.password.chars().count()), form.errors.password);
    out.push_str(&format!("Remember me: {}\n\n", if form.remember_me { "yes" } else { "no" }));

    if state.loading {
        out.push_str("Signing in...\n");
    } else {
        out.push_str("> login <email> <password> [--remember]\n");
    }
    out.push_str("Don't have an account? Sign up: `go /signup`\n");
    out
}
