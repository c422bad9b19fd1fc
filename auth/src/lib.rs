//! Client-side authentication session lifecycle for spendlog.
//!
//! This crate owns the auth state shared by every screen of the dashboard
//! shell. A [`SessionStore`] wraps a hosted identity backend (Supabase GoTrue
//! in production, [`testing::MockBackend`] in tests) and normalizes its
//! responses into a single [`AuthState`]. [`AuthHandle`] is the UI-facing
//! adapter and [`AuthGuard`] turns state into render/redirect decisions.

pub mod backend;
pub mod config;
pub mod consumer;
pub mod guard;
pub mod store;
pub mod supabase;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;
pub mod types;

pub use backend::{AuthBackend, AuthEvent, AuthResponse, BackendError, Subscription};
pub use config::{ConfigError, SupabaseConfig};
pub use consumer::AuthHandle;
pub use guard::{AuthGuard, DEFAULT_REDIRECT, GuardState, Navigator};
pub use store::{INVALID_CREDENTIALS_MESSAGE, SessionStore};
pub use supabase::SupabaseAuth;
pub use types::{AuthState, Identity, LoginData, Session, SignupData, SignupOutcome, User};
