use super::*;
use crate::testing::session;
use crate::types::User;

#[derive(Default)]
struct RecordingNavigator {
    visits: Vec<String>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, to: &str) {
        self.visits.push(to.to_owned());
    }
}

fn state(loading: bool, authenticated: bool) -> AuthState {
    if authenticated {
        let session = session("u1");
        AuthState { user: Some(User::from_identity(&session.user)), session: Some(session), loading, error: None }
    } else {
        AuthState { user: None, session: None, loading, error: None }
    }
}

#[test]
fn loading_wins_regardless_of_user_and_session() {
    let mut guard = AuthGuard::default();
    let mut nav = RecordingNavigator::default();

    assert_eq!(guard.evaluate(&state(true, true), &mut nav), GuardState::Loading);
    assert_eq!(guard.evaluate(&state(true, false), &mut nav), GuardState::Loading);
    assert!(nav.visits.is_empty());
}

#[test]
fn authenticated_renders_content_without_navigation() {
    let mut guard = AuthGuard::default();
    let mut nav = RecordingNavigator::default();

    assert_eq!(guard.evaluate(&state(false, true), &mut nav), GuardState::Authenticated);
    assert!(nav.visits.is_empty());
}

#[test]
fn unauthenticated_redirects_to_login_by_default() {
    let mut guard = AuthGuard::default();
    let mut nav = RecordingNavigator::default();

    assert_eq!(guard.evaluate(&state(false, false), &mut nav), GuardState::Unauthenticated);
    assert_eq!(nav.visits, vec![DEFAULT_REDIRECT.to_owned()]);
}

#[test]
fn redirect_target_is_overridable() {
    let mut guard = AuthGuard::new("/welcome");
    let mut nav = RecordingNavigator::default();

    guard.evaluate(&state(false, false), &mut nav);
    assert_eq!(guard.redirect_to(), "/welcome");
    assert_eq!(nav.visits, vec!["/welcome".to_owned()]);
}

#[test]
fn redirect_is_issued_once_per_entry() {
    let mut guard = AuthGuard::default();
    let mut nav = RecordingNavigator::default();

    guard.evaluate(&state(false, false), &mut nav);
    guard.evaluate(&state(false, false), &mut nav);
    assert_eq!(nav.visits.len(), 1);
}

#[test]
fn login_after_redirect_renders_content() {
    let mut guard = AuthGuard::default();
    let mut nav = RecordingNavigator::default();

    guard.evaluate(&state(false, false), &mut nav);
    assert_eq!(guard.evaluate(&state(false, true), &mut nav), GuardState::Authenticated);
    assert_eq!(nav.visits.len(), 1);
}

#[test]
fn re_entering_unauthenticated_redirects_again() {
    let mut guard = AuthGuard::default();
    let mut nav = RecordingNavigator::default();

    guard.evaluate(&state(false, false), &mut nav);
    guard.evaluate(&state(true, false), &mut nav);
    guard.evaluate(&state(false, false), &mut nav);
    assert_eq!(nav.visits.len(), 2);
}

#[test]
fn reset_forgets_previous_redirect() {
    let mut guard = AuthGuard::default();
    let mut nav = RecordingNavigator::default();

    guard.evaluate(&state(false, false), &mut nav);
    guard.reset();
    guard.evaluate(&state(false, false), &mut nav);
    assert_eq!(nav.visits.len(), 2);
}

#[test]
fn from_state_matches_invariant() {
    assert_eq!(GuardState::from_state(&AuthState::default()), GuardState::Loading);
    assert_eq!(GuardState::from_state(&state(false, true)), GuardState::Authenticated);

    let mut half = state(false, true);
    half.session = None;
    assert_eq!(GuardState::from_state(&half), GuardState::Unauthenticated);
}
