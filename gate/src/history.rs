//! Navigation history with push/replace semantics.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::route::Route;

/// Linear history stack. Pushing discards any forward entries.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Route>,
    cursor: usize,
}

impl History {
    #[must_use]
    pub fn new(initial: Route) -> Self {
        Self { entries: vec![initial], cursor: 0 }
    }

    #[must_use]
    pub fn current(&self) -> &Route {
        &self.entries[self.cursor]
    }

    pub fn push(&mut self, route: Route) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(route);
        self.cursor = self.entries.len() - 1;
    }

    /// Overwrite the current entry so "back" can never reach it again.
    pub fn replace(&mut self, route: Route) {
        self.entries[self.cursor] = route;
    }

    /// Step back one entry. Returns `None` at the start of history.
    pub fn back(&mut self) -> Option<&Route> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Route::Root)
    }
}
