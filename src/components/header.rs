//! Top bar shown on authenticated screens.

use auth::AuthState;

/// Render the header, or nothing when the user is not authenticated.
#[must_use]
pub fn render(state: &AuthState) -> Option<String> {
    if !state.is_authenticated() {
        return None;
    }
    let email = state.user.as_ref().map_or("", |u| u.email.as_str());
    let action = if state.loading { "Signing out..." } else { "Sign out: `logout`" };
    Some(format!("Expense Tracker | {email} | {action}"))
}
