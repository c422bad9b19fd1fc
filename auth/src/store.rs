//! Session store: single source of truth for authentication state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every screen of the shell reads `AuthState` from here. The store is the
//! only owner of the backend handle; it delegates each action to the backend
//! and normalizes the outcome into state.
//!
//! ERROR HANDLING
//! ==============
//! Failures are reported on two channels at once: the `error` field (for
//! display) and the returned `Err` (for control flow). `initialize` is the
//! exception: its failure lands in `error` only and degrades to an
//! unauthenticated state.
//!
//! CONCURRENCY
//! ===========
//! Overlapping actions are not serialized; the last state write wins. Backend
//! notifications may overwrite state written by an in-flight action.

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

use std::sync::Arc;

use tokio::sync::watch;

use crate::backend::{AuthBackend, AuthResponse, BackendError, Subscription};
use crate::types::{AuthState, Session, SignupOutcome, User};

/// User-facing replacement for the backend's bad-credentials message.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

const BACKEND_INVALID_CREDENTIALS: &str = "Invalid login credentials";

#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn AuthBackend>,
    state: Arc<watch::Sender<AuthState>>,
}

impl SessionStore {
    /// Create a store in the process-start state (`loading = true`).
    #[must_use]
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self { backend, state: Arc::new(state) }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every subsequent state write.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    // =========================================================================
    // ACTIONS
    // =========================================================================

    /// Load the current session and start following backend changes.
    ///
    /// Returns the change subscription, or `None` when the session could not
    /// be loaded (the failure is recorded in `error`). Call once per consumer;
    /// every call registers a new listener.
    pub async fn initialize(&self) -> Option<Subscription> {
        self.begin();

        match self.backend.get_session().await {
            Ok(session) => self.apply_session(session),
            Err(e) => {
                tracing::error!(error = %e, "auth initialization failed");
                self.state.send_modify(|s| {
                    s.user = None;
                    s.session = None;
                    s.loading = false;
                    s.error = Some(e.to_string());
                });
                return None;
            }
        }

        let store = self.clone();
        let subscription = self.backend.on_auth_state_change(Arc::new(move |event, session| {
            tracing::debug!(?event, has_session = session.is_some(), "auth state change");
            store.apply_session(session);
        }));
        Some(subscription)
    }

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns the backend error after recording its message in `error`.
    pub async fn signup(&self, email: &str, password: &str) -> Result<SignupOutcome, BackendError> {
        self.begin();

        match self.backend.sign_up(email, password).await {
            Ok(response) => {
                if self.apply_response(response) {
                    Ok(SignupOutcome::SignedIn)
                } else {
                    tracing::debug!(%email, "signup pending confirmation");
                    Ok(SignupOutcome::ConfirmationRequired)
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "signup failed");
                self.fail(e.to_string());
                Err(e)
            }
        }
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged; `error` holds the user-facing
    /// message (bad credentials are reworded).
    pub async fn login(&self, email: &str, password: &str) -> Result<(), BackendError> {
        self.begin();

        match self.backend.sign_in_with_password(email, password).await {
            Ok(response) => {
                if !self.apply_response(response) {
                    tracing::warn!(%email, "sign-in succeeded without a session");
                }
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "login failed");
                self.fail(login_error_message(&e));
                Err(e)
            }
        }
    }

    /// End the current session.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the previous user and session are kept.
    pub async fn logout(&self) -> Result<(), BackendError> {
        self.begin();

        match self.backend.sign_out().await {
            Ok(()) => {
                self.state.send_replace(AuthState { user: None, session: None, loading: false, error: None });
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "logout failed");
                self.fail(e.to_string());
                Err(e)
            }
        }
    }

    /// Drop any displayed error.
    pub fn clear_error(&self) {
        self.state.send_modify(|s| s.error = None);
    }

    // =========================================================================
    // TRANSITIONS
    // =========================================================================

    fn begin(&self) {
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
    }

    fn fail(&self, message: String) {
        self.state.send_modify(|s| {
            s.loading = false;
            s.error = Some(message);
        });
    }

    /// Replace user and session from a backend session. An absent session is
    /// a sign-out, never an error.
    fn apply_session(&self, session: Option<Session>) {
        let next = match session {
            Some(session) => {
                AuthState { user: Some(User::from_identity(&session.user)), session: Some(session), loading: false, error: None }
            }
            None => AuthState { user: None, session: None, loading: false, error: None },
        };
        self.state.send_replace(next);
    }

    /// Adopt a sign-up / sign-in response. Returns `true` when it carried both
    /// a user and a session; otherwise user and session are left untouched.
    fn apply_response(&self, response: AuthResponse) -> bool {
        match response {
            AuthResponse { user: Some(identity), session: Some(session) } => {
                self.state.send_replace(AuthState {
                    user: Some(User::from_identity(&identity)),
                    session: Some(session),
                    loading: false,
                    error: None,
                });
                true
            }
            _ => {
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.error = None;
                });
                false
            }
        }
    }
}

/// Message stored in `error` after a failed login.
fn login_error_message(error: &BackendError) -> String {
    let message = error.to_string();
    if message.contains(BACKEND_INVALID_CREDENTIALS) {
        INVALID_CREDENTIALS_MESSAGE.to_string()
    } else {
        message
    }
}
