//! Text renderings of the shell's routes.

pub mod dashboard;
pub mod login;
pub mod signup;

use auth::AuthState;

/// Shown by guarded routes until auth settles.
pub const LOADING: &str = "Loading...";

fn push_alert(out: &mut String, state: &AuthState) {
    if let Some(error) = &state.error {
        out.push_str(&format!("! {error}\n\n"));
    }
}

fn push_field(out: &mut String, label: &str, value: &str, error: Option<&str>) {
    out.push_str(&format!("{label}: {value}\n"));
    if let Some(error) = error {
        out.push_str(&format!("  ! {error}\n"));
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
