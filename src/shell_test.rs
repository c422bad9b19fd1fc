use std::sync::Arc;

use auth::testing::{Call, MockBackend, api_error, session, signed_in};
use auth::{AuthEvent, SessionStore};
use tokio::io::{AsyncWriteExt, BufReader};

use super::*;
use crate::forms::validation::{EMAIL_INVALID, PASSWORD_REQUIRED};

fn shell_with(backend: &MockBackend, start: Route) -> Shell<Vec<u8>> {
    let handle = AuthHandle::new(SessionStore::new(Arc::new(backend.clone())));
    Shell::new(handle, start, Route::Login, Vec::new())
}

async fn run_script(shell: &mut Shell<Vec<u8>>, script: &str) -> String {
    shell
        .run(BufReader::new(script.as_bytes()))
        .await
        .expect("shell run");
    String::from_utf8_lossy(shell.output()).into_owned()
}

// =============================================================================
// COMMAND PARSING
// =============================================================================

#[test]
fn parses_login_with_remember_flag_anywhere() {
    let command: Command = "login --remember a@b.com Passw0rd".parse().unwrap();
    assert_eq!(
        command,
        Command::Login { email: "a@b.com".into(), password: "Passw0rd".into(), remember_me: true }
    );
}

#[test]
fn missing_arguments_become_empty_fields() {
    let command: Command = "signup a@b.com".parse().unwrap();
    assert_eq!(command, Command::Signup { email: "a@b.com".into(), password: String::new() });
}

#[test]
fn rejects_extra_arguments_and_unknown_commands() {
    assert!("signup a b c".parse::<Command>().unwrap_err().starts_with("usage: signup"));
    assert!("login a b c".parse::<Command>().unwrap_err().starts_with("usage: login"));
    assert!("dance".parse::<Command>().unwrap_err().contains("unknown command: dance"));
    assert!("go".parse::<Command>().is_err());
    assert!("go /settings".parse::<Command>().unwrap_err().contains("unknown route"));
}

#[test]
fn parses_navigation_and_aliases() {
    assert_eq!("go /signup".parse::<Command>().unwrap(), Command::Go(Route::Signup));
    assert_eq!("signout".parse::<Command>().unwrap(), Command::Logout);
    assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
    assert_eq!("   ".parse::<Command>().unwrap_err(), "");
}

// =============================================================================
// SESSION FLOWS
// =============================================================================

#[tokio::test]
async fn unauthenticated_start_redirects_to_login() {
    let backend = MockBackend::new();
    let mut shell = shell_with(&backend, Route::Dashboard);

    let out = run_script(&mut shell, "quit\n").await;

    assert_eq!(shell.route(), Route::Login);
    assert!(out.contains("== /login =="));
    assert!(out.contains("Sign In"));
    assert!(!out.contains("Welcome to your expense tracker"));
    assert_eq!(backend.calls(), vec![Call::GetSession]);
}

#[tokio::test]
async fn restored_session_renders_dashboard() {
    let backend = MockBackend::new();
    backend.push_get_session(Ok(Some(session("u1"))));
    let mut shell = shell_with(&backend, Route::Dashboard);

    let out = run_script(&mut shell, "").await;

    assert_eq!(shell.route(), Route::Dashboard);
    assert!(out.contains("Expense Tracker | u1@example.com"));
    assert!(out.contains("Total Balance"));
}

#[tokio::test]
async fn login_lands_on_dashboard() {
    let backend = MockBackend::new();
    backend.push_sign_in(Ok(signed_in("u1")));
    let mut shell = shell_with(&backend, Route::Dashboard);

    let out = run_script(&mut shell, "login u1@example.com Passw0rd\nwhoami\n").await;

    assert_eq!(shell.route(), Route::Dashboard);
    assert!(out.contains("Welcome to your expense tracker"));
    assert!(out.contains("u1@example.com (id u1"));
}

#[tokio::test]
async fn rejected_login_stays_on_login_with_message() {
    let backend = MockBackend::new();
    backend.push_sign_in(Err(api_error("Invalid login credentials")));
    let mut shell = shell_with(&backend, Route::Login);

    let out = run_script(&mut shell, "login u1@example.com wrong-pass\n").await;

    assert_eq!(shell.route(), Route::Login);
    assert!(out.contains("! Invalid email or password"));
}

#[tokio::test]
async fn invalid_input_never_calls_backend() {
    let backend = MockBackend::new();
    let mut shell = shell_with(&backend, Route::Login);

    let out = run_script(&mut shell, "login nope\n").await;

    assert!(out.contains(EMAIL_INVALID));
    assert!(out.contains(PASSWORD_REQUIRED));
    assert_eq!(backend.calls(), vec![Call::GetSession]);
}

#[tokio::test]
async fn logout_returns_to_login() {
    let backend = MockBackend::new();
    backend.push_get_session(Ok(Some(session("u1"))));
    let mut shell = shell_with(&backend, Route::Dashboard);

    let out = run_script(&mut shell, "logout\nwhoami\n").await;

    assert_eq!(shell.route(), Route::Login);
    assert!(backend.calls().contains(&Call::SignOut));
    assert!(out.contains("not signed in"));
}

#[tokio::test]
async fn signup_requiring_confirmation_shows_notice() {
    let backend = MockBackend::new();
    let mut shell = shell_with(&backend, Route::Login);

    let out = run_script(&mut shell, "signup new@example.com Passw0rd\n").await;

    assert_eq!(shell.route(), Route::Signup);
    assert!(out.contains(CONFIRMATION_NOTICE));
}

#[tokio::test]
async fn auth_pages_redirect_when_signed_in() {
    let backend = MockBackend::new();
    backend.push_get_session(Ok(Some(session("u1"))));
    let mut shell = shell_with(&backend, Route::Signup);

    let out = run_script(&mut shell, "go /login\n").await;

    assert_eq!(shell.route(), Route::Dashboard);
    assert!(!out.contains("== /login =="));
    assert!(!out.contains("== /signup =="));
}

#[tokio::test]
async fn listener_is_released_when_run_ends() {
    let backend = MockBackend::new();
    let mut shell = shell_with(&backend, Route::Login);

    run_script(&mut shell, "help\n").await;

    assert_eq!(backend.listener_count(), 0);
}

#[tokio::test]
async fn backend_notification_rerenders_current_route() {
    let backend = MockBackend::new();
    let mut shell = shell_with(&backend, Route::Dashboard);
    let (mut client, server) = tokio::io::duplex(64);

    let driver = async move {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
        backend.emit(AuthEvent::SignedIn, Some(&session("u2")));
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
        client.write_all(b"quit\n").await.expect("write");
        drop(client);
    };
    let (result, ()) = tokio::join!(shell.run(BufReader::new(server)), driver);
    result.expect("shell run");

    let out = String::from_utf8_lossy(shell.output()).into_owned();
    assert_eq!(shell.route(), Route::Dashboard);
    assert!(out.contains("== /login =="));
    assert!(out.contains("Expense Tracker | u2@example.com"));
}
