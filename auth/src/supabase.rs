//! Supabase GoTrue client implementing [`AuthBackend`].
//!
//! Thin HTTP wrapper over `/auth/v1`. The current session lives in memory
//! only; nothing is written to disk. Pure parsing lives in free functions for
//! testability.

#[cfg(test)]
#[path = "supabase_test.rs"]
mod tests;

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use serde_json::Value;

use crate::backend::{AuthBackend, AuthEvent, AuthResponse, AuthStateHandler, BackendError, Listeners, Subscription};
use crate::config::SupabaseConfig;
use crate::types::{Identity, Session};

const SIGNUP_PATH: &str = "/auth/v1/signup";
const PASSWORD_GRANT_PATH: &str = "/auth/v1/token?grant_type=password";
const LOGOUT_PATH: &str = "/auth/v1/logout";

// =============================================================================
// CLIENT
// =============================================================================

pub struct SupabaseAuth {
    http: reqwest::Client,
    url: String,
    anon_key: String,
    current: RwLock<Option<Session>>,
    listeners: Listeners,
}

impl SupabaseAuth {
    /// Build a client from parsed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: SupabaseConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| BackendError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, url: config.url, anon_key: config.anon_key, current: RwLock::new(None), listeners: Listeners::new() })
    }

    fn current_session(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace_session(&self, session: Option<Session>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = session;
    }

    async fn post(&self, path: &str, bearer: Option<&str>, body: Option<&Value>) -> Result<String, BackendError> {
        let url = format!("{}{path}", self.url);
        tracing::debug!(%url, "supabase request");

        let mut request = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer.unwrap_or(&self.anon_key));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(BackendError::Api { status, message: parse_error_message(status, &text) });
        }
        Ok(text)
    }

    fn adopt(&self, response: &AuthResponse) {
        if let Some(session) = &response.session {
            self.replace_session(Some(session.clone()));
            self.listeners.emit(AuthEvent::SignedIn, Some(session));
        }
    }
}

#[async_trait::async_trait]
impl AuthBackend for SupabaseAuth {
    async fn get_session(&self) -> Result<Option<Session>, BackendError> {
        Ok(self.current_session())
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthResponse, BackendError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let text = self.post(SIGNUP_PATH, None, Some(&body)).await?;
        let response = parse_auth_response(&text)?;
        self.adopt(&response);
        Ok(response)
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthResponse, BackendError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let text = self.post(PASSWORD_GRANT_PATH, None, Some(&body)).await?;
        let response = parse_auth_response(&text)?;
        self.adopt(&response);
        Ok(response)
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        if let Some(session) = self.current_session() {
            match self.post(LOGOUT_PATH, Some(&session.access_token), None).await {
                Ok(_) => {}
                // Token already revoked or expired server-side: the session is gone either way.
                Err(BackendError::Api { status: 401 | 403 | 404, .. }) => {
                    tracing::debug!("logout rejected for stale session; clearing locally");
                }
                Err(e) => return Err(e),
            }
        }
        self.replace_session(None);
        self.listeners.emit(AuthEvent::SignedOut, None);
        Ok(())
    }

    fn on_auth_state_change(&self, handler: AuthStateHandler) -> Subscription {
        self.listeners.register(handler)
    }
}

// =============================================================================
// PARSING
// =============================================================================

/// Parse a signup / token response. A body with `access_token` is a session;
/// otherwise it is a bare user (signup awaiting confirmation).
fn parse_auth_response(json: &str) -> Result<AuthResponse, BackendError> {
    let value: Value = serde_json::from_str(json).map_err(|e| BackendError::Parse(e.to_string()))?;

    if value.get("access_token").is_some_and(|v| !v.is_null()) {
        let session: Session = serde_json::from_value(value).map_err(|e| BackendError::Parse(e.to_string()))?;
        return Ok(AuthResponse { user: Some(session.user.clone()), session: Some(session) });
    }

    let user_value = match value.get("user") {
        Some(user) if !user.is_null() => user.clone(),
        _ => value,
    };
    if user_value.get("id").is_none() {
        return Ok(AuthResponse::default());
    }
    let user: Identity = serde_json::from_value(user_value).map_err(|e| BackendError::Parse(e.to_string()))?;
    Ok(AuthResponse { user: Some(user), session: None })
}

/// Extract a human-readable message from a GoTrue error body.
fn parse_error_message(status: u16, body: &str) -> String {
    let fallback = || format!("request failed with status {status}");
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return fallback();
    };
    ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map_or_else(fallback, str::to_string)
}
