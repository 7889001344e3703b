//! Session store: the single owner of "who is signed in".
//!
//! ARCHITECTURE
//! ============
//! State lives in a `tokio::sync::watch` channel owned by the store. Readers
//! take cheap snapshots or subscribe for change notification; the only
//! writers are [`SessionStore::login`], [`SessionStore::logout`] and the
//! one-time initial identity fetch spawned by [`SessionStore::start`].
//!
//! ERROR HANDLING
//! ==============
//! No collaborator failure escapes this module. Identity-fetch and logout
//! failures collapse to "anonymous"; login failures become an
//! [`AuthOutcome::Failure`] carrying a classified message.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::Arc;

use tokio::sync::watch;

use crate::identity::Identity;
use crate::normalize::normalize_auth_error;

// =============================================================================
// COLLABORATOR
// =============================================================================

/// Failure reported by the identity backend. Carries free text only.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The request never produced a usable response.
    #[error("{0}")]
    Transport(String),
    /// The backend answered with an error message.
    #[error("{0}")]
    Server(String),
    #[error("request timed out")]
    Timeout,
}

/// Identity backend consumed by the session store.
#[async_trait::async_trait]
pub trait IdentityService: Send + Sync {
    /// Resolve the current session. `Ok(None)` means "no session" and is not an error.
    async fn who_am_i(&self) -> Result<Option<Identity>, ServiceError>;

    /// Exchange credentials for a session.
    async fn authenticate(&self, email: &str, password: &str) -> Result<Identity, ServiceError>;

    /// End the server-side session.
    async fn end_session(&self) -> Result<(), ServiceError>;

    /// Drop every cached read held by the transport.
    async fn clear_cache(&self);
}

// =============================================================================
// STATE
// =============================================================================

/// Snapshot of the session as seen by guards and views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub identity: Option<Identity>,
    /// True until the first identity fetch settles. Never returns to true.
    pub initializing: bool,
}

/// Mutually exclusive description of a [`SessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Initializing,
    Authenticated,
    Anonymous,
}

impl SessionState {
    #[must_use]
    pub fn initializing() -> Self {
        Self { identity: None, initializing: true }
    }

    #[must_use]
    pub fn settled(identity: Option<Identity>) -> Self {
        Self { identity, initializing: false }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.identity.as_ref().is_some_and(Identity::is_admin)
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.initializing {
            SessionPhase::Initializing
        } else if self.is_authenticated() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        }
    }
}

/// Result of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Success,
    Failure { message: String },
}

impl AuthOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Failure { message } => Some(message),
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

pub struct SessionStore {
    service: Arc<dyn IdentityService>,
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    /// Build the store and spawn the initial identity fetch.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(service: Arc<dyn IdentityService>) -> Arc<Self> {
        let (state, _) = watch::channel(SessionState::initializing());
        let store = Arc::new(Self { service, state });

        let initializer = Arc::clone(&store);
        tokio::spawn(async move {
            initializer.initialize().await;
        });

        store
    }

    async fn initialize(&self) {
        let identity = match self.service.who_am_i().await {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!(error = %e, "initial identity fetch failed; session is anonymous");
                None
            }
        };

        // A login or logout that finished first already settled the session.
        let applied = self.state.send_if_modified(|state| {
            if !state.initializing {
                return false;
            }
            state.identity = identity;
            state.initializing = false;
            true
        });

        if applied {
            let state = self.state.borrow();
            tracing::debug!(authenticated = state.is_authenticated(), "session initialized");
        } else {
            tracing::debug!("initial identity fetch superseded; result discarded");
        }
    }

    // -------------------------------------------------------------------------
    // Read surface
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.state.borrow().identity.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.state.borrow().is_admin()
    }

    #[must_use]
    pub fn is_initializing(&self) -> bool {
        self.state.borrow().initializing
    }

    /// Receive a notification on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Wait until the initial identity fetch has settled.
    pub async fn initialized(&self) -> SessionState {
        let mut rx = self.state.subscribe();
        match rx.wait_for(|state| !state.initializing).await {
            Ok(state) => state.clone(),
            // The sender lives in `self`, so the channel cannot close here.
            Err(_) => self.snapshot(),
        }
    }

    // -------------------------------------------------------------------------
    // Mutators
    // -------------------------------------------------------------------------

    /// Authenticate, then re-resolve and adopt the current identity.
    ///
    /// The session is untouched unless both calls succeed.
    pub async fn login(&self, email: &str, password: &str) -> AuthOutcome {
        let resolved = async {
            self.service.authenticate(email, password).await?;
            self.service.who_am_i().await
        }
        .await;

        match resolved {
            Ok(identity) => {
                self.state.send_modify(|state| {
                    state.identity = identity;
                    state.initializing = false;
                });
                tracing::debug!(%email, "login succeeded");
                AuthOutcome::Success
            }
            Err(e) => {
                let message = normalize_auth_error(&e.to_string());
                tracing::debug!(%email, error = %e, classified = message, "login failed");
                AuthOutcome::Failure { message: message.to_owned() }
            }
        }
    }

    /// End the session. The local session is cleared whatever the backend says.
    pub async fn logout(&self) {
        if let Err(e) = self.service.end_session().await {
            tracing::warn!(error = %e, "logout request failed; clearing local session anyway");
        }

        self.state.send_modify(|state| {
            state.identity = None;
            state.initializing = false;
        });
        self.service.clear_cache().await;
        tracing::debug!("session cleared");
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
