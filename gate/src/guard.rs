//! Route guards consulted on every navigation.
//!
//! Both guards are pure functions of a [`SessionState`] snapshot. The
//! "initializing" case is always checked first so no redirect is decided
//! before the initial identity fetch has settled.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::route::{AdminPage, Route};
use crate::store::SessionState;

pub const LOADING_ACCOUNT_STATE: &str = "Loading account state...";
pub const CHECKING_SESSION: &str = "Checking your session...";
pub const INSUFFICIENT_PRIVILEGES: &str = "Your account does not have admin permissions.";

/// What a guarded route should do for the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Show a neutral placeholder and nothing else.
    Loading(&'static str),
    /// Navigate elsewhere. `replace` overwrites the current history entry.
    Redirect { to: Route, replace: bool },
    /// Stay on the route but show a fixed message instead of the content.
    Blocked(&'static str),
    /// Show the wrapped content.
    Render,
}

/// Guard for pages only anonymous users may see, e.g. the login screen.
#[must_use]
pub fn guard_public_only(state: &SessionState) -> GuardDecision {
    if state.initializing {
        return GuardDecision::Loading(LOADING_ACCOUNT_STATE);
    }

    if state.is_authenticated() {
        return GuardDecision::Redirect { to: Route::Admin(AdminPage::Dashboard), replace: true };
    }

    GuardDecision::Render
}

/// Guard for pages that need a session, optionally with the admin role.
#[must_use]
pub fn guard_protected(state: &SessionState, require_admin: bool) -> GuardDecision {
    if state.initializing {
        return GuardDecision::Loading(CHECKING_SESSION);
    }

    if !state.is_authenticated() {
        return GuardDecision::Redirect { to: Route::Login, replace: true };
    }

    if require_admin && !state.is_admin() {
        return GuardDecision::Blocked(INSUFFICIENT_PRIVILEGES);
    }

    GuardDecision::Render
}
