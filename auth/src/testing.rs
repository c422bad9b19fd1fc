//! Scripted in-memory backend for tests.
//!
//! Results are queued per operation; an empty queue yields a sensible
//! default. Every call is recorded so tests can assert on what the store sent.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::backend::{AuthBackend, AuthEvent, AuthResponse, AuthStateHandler, BackendError, Listeners, Subscription};
use crate::types::{Identity, Session};

/// A backend call observed by [`MockBackend`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    GetSession,
    SignUp { email: String, password: String },
    SignIn { email: String, password: String },
    SignOut,
}

#[derive(Default)]
struct Script {
    get_session: VecDeque<Result<Option<Session>, BackendError>>,
    sign_up: VecDeque<Result<AuthResponse, BackendError>>,
    sign_in: VecDeque<Result<AuthResponse, BackendError>>,
    sign_out: VecDeque<Result<(), BackendError>>,
    calls: Vec<Call>,
}

#[derive(Clone, Default)]
pub struct MockBackend {
    script: Arc<Mutex<Script>>,
    listeners: Listeners,
}

impl MockBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push_get_session(&self, result: Result<Option<Session>, BackendError>) -> &Self {
        self.script().get_session.push_back(result);
        self
    }

    pub fn push_sign_up(&self, result: Result<AuthResponse, BackendError>) -> &Self {
        self.script().sign_up.push_back(result);
        self
    }

    pub fn push_sign_in(&self, result: Result<AuthResponse, BackendError>) -> &Self {
        self.script().sign_in.push_back(result);
        self
    }

    pub fn push_sign_out(&self, result: Result<(), BackendError>) -> &Self {
        self.script().sign_out.push_back(result);
        self
    }

    /// Calls received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.script().calls.clone()
    }

    /// Number of live change listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver a change notification as the hosted backend would.
    pub fn emit(&self, event: AuthEvent, session: Option<&Session>) {
        self.listeners.emit(event, session);
    }
}

#[async_trait::async_trait]
impl AuthBackend for MockBackend {
    async fn get_session(&self) -> Result<Option<Session>, BackendError> {
        let mut script = self.script();
        script.calls.push(Call::GetSession);
        script.get_session.pop_front().unwrap_or(Ok(None))
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthResponse, BackendError> {
        let mut script = self.script();
        script.calls.push(Call::SignUp { email: email.to_owned(), password: password.to_owned() });
        script.sign_up.pop_front().unwrap_or_else(|| Ok(AuthResponse::default()))
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthResponse, BackendError> {
        let mut script = self.script();
        script.calls.push(Call::SignIn { email: email.to_owned(), password: password.to_owned() });
        script.sign_in.pop_front().unwrap_or_else(|| {
            Err(BackendError::Api { status: 400, message: "Invalid login credentials".to_owned() })
        })
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        let mut script = self.script();
        script.calls.push(Call::SignOut);
        script.sign_out.pop_front().unwrap_or(Ok(()))
    }

    fn on_auth_state_change(&self, handler: AuthStateHandler) -> Subscription {
        self.listeners.register(handler)
    }
}

// =============================================================================
// FIXTURES
// =============================================================================

/// Identity fixture with a stable email derived from `id`.
#[must_use]
pub fn identity(id: &str) -> Identity {
    Identity {
        id: id.to_owned(),
        email: Some(format!("{id}@example.com")),
        created_at: "2025-01-01T00:00:00Z".to_owned(),
        updated_at: Some("2025-01-01T00:00:00Z".to_owned()),
    }
}

/// Session fixture for the identity `id`.
#[must_use]
pub fn session(id: &str) -> Session {
    Session {
        access_token: format!("access-{id}"),
        refresh_token: format!("refresh-{id}"),
        token_type: "bearer".to_owned(),
        expires_in: 3600,
        expires_at: Some(1_700_000_000),
        user: identity(id),
    }
}

/// Sign-in response carrying both a user and a session for `id`.
#[must_use]
pub fn signed_in(id: &str) -> AuthResponse {
    let session = session(id);
    AuthResponse { user: Some(session.user.clone()), session: Some(session) }
}

/// Backend rejection with the given message.
#[must_use]
pub fn api_error(message: &str) -> BackendError {
    BackendError::Api { status: 400, message: message.to_owned() }
}
