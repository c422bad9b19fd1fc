//! Auth data model shared by the store, the guard and the shell.
//!
//! SYSTEM CONTEXT
//! ==============
//! `Session` and `Identity` mirror the backend's wire shapes. `User` is the
//! projection the UI reads; it is rebuilt from the session's identity on every
//! transition rather than patched.

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

// =============================================================================
// BACKEND SHAPES
// =============================================================================

/// Raw identity record as returned by the backend. Unknown fields are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Backend user identifier (UUID string).
    pub id: String,
    /// Primary email, absent for phone-only identities.
    #[serde(default)]
    pub email: Option<String>,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
    /// ISO 8601 last-update timestamp, if the backend reports one.
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Backend-issued token bundle. Opaque to this crate apart from `user`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Lifetime of `access_token` in seconds.
    pub expires_in: i64,
    /// Unix timestamp at which `access_token` expires.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: Identity,
}

// =============================================================================
// USER
// =============================================================================

/// Application-facing user projection.
///
/// Two users are equal when their ids match; the remaining fields are a
/// snapshot of the identity at the time the session was observed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl User {
    /// Project a backend identity into a [`User`].
    #[must_use]
    pub fn from_identity(identity: &Identity) -> Self {
        Self {
            id: identity.id.clone(),
            email: identity.email.clone().unwrap_or_default(),
            created_at: identity.created_at.clone(),
            updated_at: identity.updated_at.clone().unwrap_or_default(),
        }
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

// =============================================================================
// AUTH STATE
// =============================================================================

/// Current authentication state as observed by the UI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub session: Option<Session>,
    /// While `true`, consumers must not decide between authenticated and
    /// unauthenticated rendering.
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    /// `true` only when both a user and a session are present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.session.is_some()
    }
}

impl Default for AuthState {
    /// Process-start state: nothing known yet, loading.
    fn default() -> Self {
        Self { user: None, session: None, loading: true, error: None }
    }
}

// =============================================================================
// CREDENTIALS / OUTCOMES
// =============================================================================

/// Credentials submitted by the signup form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignupData {
    pub email: String,
    pub password: String,
}

/// Credentials submitted by the login form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginData {
    pub email: String,
    pub password: String,
    /// Collected by the form; does not change session persistence.
    pub remember_me: bool,
}

/// Successful signup result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignupOutcome {
    /// The backend returned a user and a session; the user is now logged in.
    SignedIn,
    /// The account exists but no session was issued (e.g. email confirmation
    /// pending). The user is still unauthenticated.
    ConfirmationRequired,
}
