//! Dashboard page: the authenticated landing route.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered only after the guard reports an authenticated state. Financial
//! records are not loaded yet, so every card shows its empty-state copy.

use auth::AuthState;

use crate::components::header;

/// A titled card with its empty-state message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Card {
    pub title: &'static str,
    pub empty: &'static str,
}

pub const SUMMARY_CARDS: [Card; 4] = [
    Card { title: "Total Balance", empty: "No transactions yet" },
    Card { title: "This Month's Income", empty: "No income recorded" },
    Card { title: "This Month's Expenses", empty: "No expenses recorded" },
    Card { title: "Active Goals", empty: "No goals set" },
];

pub const DETAIL_PANELS: [Card; 2] = [
    Card {
        title: "Recent Transactions",
        empty: "No transactions yet. Start by adding your first expense or income.",
    },
    Card { title: "Spending Overview", empty: "Charts will appear here once you have transaction data." },
];

#[must_use]
pub fn render(state: &AuthState) -> String {
    let mut out = String::new();
    if let Some(header) = header::render(state) {
        out.push_str(&header);
        out.push('\n');
    }
    out.push_str("\nDashboard\nWelcome to your expense tracker\n\n");
    for card in SUMMARY_CARDS.iter().chain(DETAIL_PANELS.iter()) {
        out.push_str(&format!("[{}]\n  {}\n", card.title, card.empty));
    }
    out
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
