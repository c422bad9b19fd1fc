//! Login and signup form controllers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Forms validate locally, then hand credentials to the [`AuthHandle`].
//! Backend failures are logged here and displayed from the auth state's
//! `error` field; the forms never keep their own copy of the message.

pub mod login;
pub mod signup;
pub mod validation;

use auth::{AuthHandle, AuthState, Navigator};

use crate::router::Route;

/// Result of submitting a form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    /// Local validation failed; the store was not called.
    Invalid,
    /// The backend rejected the request; see the auth state's `error`.
    Rejected,
    /// The request succeeded and the user is signed in.
    Accepted,
    /// Signup succeeded but the account must be confirmed first.
    PendingConfirmation,
}

/// Editing a field dismisses a displayed backend error.
pub(crate) fn on_input(handle: &AuthHandle) {
    if handle.error().is_some() {
        handle.clear_error();
    }
}

/// Auth pages send signed-in users to the dashboard.
pub fn redirect_if_authenticated(state: &AuthState, navigator: &mut impl Navigator) -> bool {
    if state.is_authenticated() {
        navigator.navigate(Route::Dashboard.path());
        true
    } else {
        false
    }
}
