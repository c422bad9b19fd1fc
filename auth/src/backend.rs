//! Identity backend contract consumed by the session store.
//!
//! DESIGN
//! ======
//! The backend is external; this crate only needs four request operations
//! plus a change-notification channel. `AuthBackend` is the seam, so the store
//! can run against Supabase in production and a scripted mock in tests.
//! Change notifications are delivered through a [`Listeners`] registry that
//! hands out [`Subscription`] disposers.

#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::types::{Identity, Session};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by backend operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The backend rejected the request. `message` is the backend's own text.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The HTTP request could not be completed.
    #[error("request failed: {0}")]
    Request(String),

    /// The backend response body could not be deserialized.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// EVENTS / RESPONSES
// =============================================================================

/// Kind of session change reported by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

/// Result of a sign-up or sign-in call. Either field may be absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthResponse {
    pub user: Option<Identity>,
    pub session: Option<Session>,
}

/// Callback invoked for each backend session change.
pub type AuthStateHandler = Arc<dyn Fn(AuthEvent, Option<Session>) + Send + Sync>;

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// Disposer for a change-notification listener.
///
/// Cancelling happens exactly once: either through [`Subscription::unsubscribe`]
/// or when the handle is dropped.
#[must_use = "dropping a Subscription cancels it immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }

    /// Stop receiving notifications.
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("active", &self.cancel.is_some()).finish()
    }
}

// =============================================================================
// LISTENER REGISTRY
// =============================================================================

/// Registry of change handlers shared by backend implementations.
#[derive(Clone, Default)]
pub struct Listeners {
    inner: Arc<Mutex<HashMap<u64, AuthStateHandler>>>,
    next_id: Arc<AtomicU64>,
}

impl Listeners {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler`; the returned subscription removes it.
    pub fn register(&self, handler: AuthStateHandler) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, handler);

        let weak = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .remove(&id);
            }
        })
    }

    /// Invoke every registered handler. Handlers run outside the registry lock
    /// so they may register or cancel listeners themselves.
    pub fn emit(&self, event: AuthEvent, session: Option<&Session>) {
        let handlers: Vec<AuthStateHandler> = self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        tracing::debug!(?event, listeners = handlers.len(), "emitting auth state change");
        for handler in handlers {
            handler(event, session.cloned());
        }
    }

    /// Number of live listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// TRAIT
// =============================================================================

/// Operations the session store needs from a hosted identity service.
#[async_trait::async_trait]
pub trait AuthBackend: Send + Sync {
    /// Current session, if any.
    async fn get_session(&self) -> Result<Option<Session>, BackendError>;

    /// Create an account. A session is only returned when the backend logs the
    /// new user in immediately.
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthResponse, BackendError>;

    /// Email + password sign-in.
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthResponse, BackendError>;

    /// End the current session.
    async fn sign_out(&self) -> Result<(), BackendError>;

    /// Register `handler` for session changes until the subscription is
    /// cancelled.
    fn on_auth_state_change(&self, handler: AuthStateHandler) -> Subscription;
}
