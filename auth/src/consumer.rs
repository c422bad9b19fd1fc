//! UI-facing adapter over [`SessionStore`].
//!
//! SYSTEM CONTEXT
//! ==============
//! Screens hold an `AuthHandle` instead of the store. The handle initializes
//! the store once, keeps the change subscription alive for as long as the
//! consuming context exists, and cancels it on teardown.

#[cfg(test)]
#[path = "consumer_test.rs"]
mod tests;

use std::sync::{Mutex, PoisonError};

use tokio::sync::{OnceCell, watch};

use crate::backend::{BackendError, Subscription};
use crate::store::SessionStore;
use crate::types::{AuthState, LoginData, Session, SignupData, SignupOutcome, User};

pub struct AuthHandle {
    store: SessionStore,
    mounted: OnceCell<()>,
    subscription: Mutex<Option<Subscription>>,
}

impl AuthHandle {
    #[must_use]
    pub fn new(store: SessionStore) -> Self {
        Self { store, mounted: OnceCell::new(), subscription: Mutex::new(None) }
    }

    /// Initialize the store on first use. Later calls return immediately.
    pub async fn mount(&self) {
        self.mounted
            .get_or_init(|| async {
                let subscription = self.store.initialize().await;
                if subscription.is_none() {
                    tracing::warn!("auth initialized without change subscription");
                }
                *self.subscription.lock().unwrap_or_else(PoisonError::into_inner) = subscription;
            })
            .await;
    }

    /// Cancel the change subscription. Also runs on drop.
    pub fn dispose(&self) {
        let subscription = self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(subscription) = subscription {
            subscription.unsubscribe();
        }
    }

    // =========================================================================
    // STATE
    // =========================================================================

    #[must_use]
    pub fn state(&self) -> AuthState {
        self.store.state()
    }

    #[must_use]
    pub fn watch(&self) -> watch::Receiver<AuthState> {
        self.store.subscribe()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.store.state().user
    }

    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.store.state().session
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.store.state().loading
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.store.state().error
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.store.state().is_authenticated()
    }

    // =========================================================================
    // ACTIONS
    // =========================================================================

    /// # Errors
    ///
    /// Propagates the store's error; `error()` already holds its message.
    pub async fn signup(&self, data: &SignupData) -> Result<SignupOutcome, BackendError> {
        self.store.signup(&data.email, &data.password).await
    }

    /// `remember_me` is accepted for the login form but does not change how
    /// long the session lives.
    ///
    /// # Errors
    ///
    /// Propagates the store's error; `error()` already holds its message.
    pub async fn login(&self, data: &LoginData) -> Result<(), BackendError> {
        tracing::debug!(remember_me = data.remember_me, "login requested");
        self.store.login(&data.email, &data.password).await
    }

    /// # Errors
    ///
    /// Propagates the store's error; `error()` already holds its message.
    pub async fn logout(&self) -> Result<(), BackendError> {
        self.store.logout().await
    }

    pub fn clear_error(&self) {
        self.store.clear_error();
    }
}

impl Drop for AuthHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}
