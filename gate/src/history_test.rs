use super::*;
use crate::route::AdminPage;

#[test]
fn starts_at_initial_route() {
    let history = History::new(Route::Login);
    assert_eq!(history.current(), &Route::Login);
    assert_eq!(history.len(), 1);
}

#[test]
fn push_then_back() {
    let mut history = History::new(Route::Admin(AdminPage::Dashboard));
    history.push(Route::Admin(AdminPage::Books));
    assert_eq!(history.current(), &Route::Admin(AdminPage::Books));
    assert_eq!(history.back(), Some(&Route::Admin(AdminPage::Dashboard)));
    assert_eq!(history.back(), None);
}

#[test]
fn replaced_entry_is_unreachable_by_back() {
    let mut history = History::new(Route::Root);
    history.push(Route::Login);
    history.replace(Route::Admin(AdminPage::Dashboard));

    assert_eq!(history.current(), &Route::Admin(AdminPage::Dashboard));
    assert_eq!(history.back(), Some(&Route::Root));
    assert_eq!(history.len(), 2);
}

#[test]
fn push_after_back_drops_forward_entries() {
    let mut history = History::new(Route::Root);
    history.push(Route::Admin(AdminPage::Authors));
    history.push(Route::Admin(AdminPage::Books));
    history.back();
    history.push(Route::Admin(AdminPage::Publishers));

    assert_eq!(history.len(), 3);
    assert_eq!(history.back(), Some(&Route::Admin(AdminPage::Authors)));
}

#[test]
fn default_starts_at_root() {
    assert_eq!(History::default().current(), &Route::Root);
}
