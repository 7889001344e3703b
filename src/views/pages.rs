//! Login, dashboard and the admin shell around protected pages.

#[cfg(test)]
#[path = "pages_test.rs"]
mod pages_test;

use gate::{AdminPage, Identity};

use super::Card;

pub const LOGIN_TITLE: &str = "Sign in";
pub const LOGIN_DESCRIPTION: &str = "Access the admin area to manage backend resources.";
pub const LOGIN_SUCCESS: &str = "Login successful.";

/// Outcome of the dashboard's admin ping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingStatus {
    Online,
    /// The backend answered but reported `false`.
    Silent,
    Unavailable,
}

#[must_use]
pub fn login() -> Card {
    Card::new(LOGIN_TITLE).describe(LOGIN_DESCRIPTION)
}

#[must_use]
pub fn dashboard(identity: Option<&Identity>, ping: PingStatus) -> Card {
    let user = match identity {
        Some(identity) => format!("{} | {} | {}", identity.name, identity.email, identity.role),
        None => "Unknown | No email | No role".to_owned(),
    };
    let ping = match ping {
        PingStatus::Online => "Online",
        PingStatus::Silent => "-",
        PingStatus::Unavailable => "Access denied or unavailable",
    };

    Card::new("Admin dashboard")
        .describe("Overview of current authentication and backend connectivity.")
        .line(format!("Current user: {user}"))
        .line(format!("Admin ping: {ping}"))
}

/// Sidebar plus header for a page under `/admin`.
#[must_use]
pub fn shell(identity: Option<&Identity>, active: AdminPage) -> String {
    let mut out = String::from("Admin Console\nBackend management starter\n");
    for page in AdminPage::ALL {
        let marker = if page == active { '>' } else { ' ' };
        out.push_str(&format!("{marker} {:<11} {}\n", page.label(), page.path()));
    }

    let name = identity.map_or("Admin", |identity| identity.name.as_str());
    let email = identity.map_or("", |identity| identity.email.as_str());
    out.push_str(&format!("\n{name} <{email}>  [logout]\n"));
    out
}
