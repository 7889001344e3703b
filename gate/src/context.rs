//! Explicit provision of the session store to the console tree.
//!
//! The shell constructs one [`SessionStore`] and wraps it in a
//! [`SessionContext`]; everything below reads the session through the
//! context. Reading from an empty context is a wiring defect and surfaces as
//! [`GateError::MissingSessionStore`] when the consumer is composed.

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use std::sync::Arc;

use crate::store::SessionStore;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    #[error("session store was read before being provided to the console")]
    MissingSessionStore,
}

#[derive(Clone, Default)]
pub struct SessionContext {
    store: Option<Arc<SessionStore>>,
}

impl SessionContext {
    #[must_use]
    pub fn provide(store: Arc<SessionStore>) -> Self {
        Self { store: Some(store) }
    }

    /// # Errors
    ///
    /// Returns [`GateError::MissingSessionStore`] when nothing was provided.
    pub fn session(&self) -> Result<&Arc<SessionStore>, GateError> {
        self.store.as_ref().ok_or(GateError::MissingSessionStore)
    }
}
