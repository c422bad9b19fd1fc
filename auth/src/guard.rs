//! Route guard: maps auth state to a render decision and login redirects.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guarded routes must behave identically: show a loading indicator until
//! auth settles, render content when authenticated, and otherwise send the
//! user to the login route.
//!
//! The decision is recomputed on every state change. Nothing is latched, so a
//! login that lands before the next evaluation simply renders content.

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;

use crate::types::AuthState;

/// Where unauthenticated users are sent unless overridden.
pub const DEFAULT_REDIRECT: &str = "/login";

/// Render decision for a guarded route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardState {
    /// Auth has not settled; render a loading indicator and do not navigate.
    Loading,
    /// Render the guarded content.
    Authenticated,
    /// Render nothing; a redirect has been issued.
    Unauthenticated,
}

impl GuardState {
    #[must_use]
    pub fn from_state(state: &AuthState) -> Self {
        if state.loading {
            Self::Loading
        } else if state.is_authenticated() {
            Self::Authenticated
        } else {
            Self::Unauthenticated
        }
    }
}

/// Host-provided navigation.
pub trait Navigator {
    fn navigate(&mut self, to: &str);
}

#[derive(Debug, Clone)]
pub struct AuthGuard {
    redirect_to: String,
    last: Option<GuardState>,
}

impl Default for AuthGuard {
    fn default() -> Self {
        Self::new(DEFAULT_REDIRECT)
    }
}

impl AuthGuard {
    #[must_use]
    pub fn new(redirect_to: impl Into<String>) -> Self {
        Self { redirect_to: redirect_to.into(), last: None }
    }

    #[must_use]
    pub fn redirect_to(&self) -> &str {
        &self.redirect_to
    }

    /// Re-evaluate against `state`. Navigates once on each entry into
    /// [`GuardState::Unauthenticated`].
    pub fn evaluate(&mut self, state: &AuthState, navigator: &mut impl Navigator) -> GuardState {
        let next = GuardState::from_state(state);
        if next == GuardState::Unauthenticated && self.last != Some(GuardState::Unauthenticated) {
            tracing::debug!(to = %self.redirect_to, "unauthenticated; redirecting");
            navigator.navigate(&self.redirect_to);
        }
        self.last = Some(next);
        next
    }

    /// Forget the previous decision, e.g. when the guarded route is left.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
