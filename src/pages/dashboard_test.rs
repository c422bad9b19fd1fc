use super::*;
use auth::User;
use auth::testing::session;

fn signed_in() -> AuthState {
    let session = session("u1");
    AuthState { user: Some(User::from_identity(&session.user)), session: Some(session), loading: false, error: None }
}

#[test]
fn renders_header_and_every_card() {
    let page = render(&signed_in());
    assert!(page.starts_with("Expense Tracker | u1@example.com"));
    for card in SUMMARY_CARDS.iter().chain(DETAIL_PANELS.iter()) {
        assert!(page.contains(card.title), "{}", card.title);
        assert!(page.contains(card.empty), "{}", card.empty);
    }
}

#[test]
fn cards_keep_display_order() {
    let page = render(&signed_in());
    let balance = page.find("Total Balance").unwrap();
    let goals = page.find("Active Goals").unwrap();
    let overview = page.find("Spending Overview").unwrap();
    assert!(balance < goals && goals < overview);
}
