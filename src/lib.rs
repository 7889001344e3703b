//! Catalog admin console.
//!
//! SYSTEM CONTEXT
//! ==============
//! Talks to the catalog backend's GraphQL endpoint over a cookie session.
//! Session state, route guards and navigation live in the `gate` crate; this
//! crate supplies the transport ([`net`]), form handling ([`forms`]), text
//! rendering ([`views`]) and the [`console::Console`] that ties them together.

pub mod cli;
pub mod config;
pub mod console;
pub mod format;
pub mod forms;
pub mod net;
pub mod views;
