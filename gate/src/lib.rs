//! Session and route gate for the catalog admin console.
//!
//! SYSTEM CONTEXT
//! ==============
//! The console shell owns exactly one [`SessionStore`] for its lifetime and
//! hands it to views through a [`SessionContext`]. Every navigation is
//! resolved by [`router::resolve`], which consults the route guards against a
//! snapshot of the session.
//!
//! The crate has no network dependency: the identity backend is reached
//! through the [`IdentityService`] trait so tests and alternate transports can
//! stand in for the GraphQL client.

pub mod context;
pub mod guard;
pub mod history;
pub mod identity;
pub mod normalize;
pub mod route;
pub mod router;
pub mod store;

pub use context::{GateError, SessionContext};
pub use guard::{GuardDecision, guard_protected, guard_public_only};
pub use history::History;
pub use identity::{Identity, Role};
pub use normalize::normalize_auth_error;
pub use route::{Access, AdminPage, Route};
pub use router::{Resolution, View, resolve};
pub use store::{AuthOutcome, IdentityService, ServiceError, SessionPhase, SessionState, SessionStore};
