//! Navigation resolution: route table + guards + redirect following.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

use crate::guard::{GuardDecision, guard_protected, guard_public_only};
use crate::route::{Access, AdminPage, Route};
use crate::store::SessionState;

/// Upper bound on redirect hops for a single navigation.
pub const MAX_REDIRECTS: usize = 4;

/// What the shell should display once navigation settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Loading(&'static str),
    Blocked(&'static str),
    Page(Route),
    NotFound(String),
    RedirectLoop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Location the navigation settled on.
    pub route: Route,
    pub view: View,
    /// True when a hop asked to replace the current history entry.
    pub replace: bool,
}

fn decide(route: &Route, state: &SessionState) -> GuardDecision {
    match route.access() {
        Access::Open if *route == Route::Root => {
            GuardDecision::Redirect { to: Route::Admin(AdminPage::Dashboard), replace: true }
        }
        Access::Open => GuardDecision::Render,
        Access::PublicOnly => guard_public_only(state),
        Access::Protected { require_admin } => guard_protected(state, require_admin),
    }
}

/// Resolve a location against a session snapshot.
#[must_use]
pub fn resolve(location: &str, state: &SessionState) -> Resolution {
    follow(location, state, decide)
}

fn follow(
    location: &str,
    state: &SessionState,
    decide: impl Fn(&Route, &SessionState) -> GuardDecision,
) -> Resolution {
    let mut route = Route::parse(location);
    let mut replace = false;

    for _ in 0..=MAX_REDIRECTS {
        let view = match decide(&route, state) {
            GuardDecision::Loading(message) => View::Loading(message),
            GuardDecision::Blocked(message) => View::Blocked(message),
            GuardDecision::Render => match &route {
                Route::NotFound(path) => View::NotFound(path.clone()),
                other => View::Page(other.clone()),
            },
            GuardDecision::Redirect { to, replace: hop_replace } => {
                tracing::debug!(from = %route, to = %to, "redirect");
                replace |= hop_replace;
                route = to;
                continue;
            }
        };
        return Resolution { route, view, replace };
    }

    tracing::warn!(%location, "redirect limit exceeded");
    Resolution { route, view: View::RedirectLoop, replace }
}
