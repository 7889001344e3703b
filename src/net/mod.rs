//! GraphQL transport for the catalog backend.
//!
//! DESIGN
//! ======
//! `graphql` owns documents and the pure request/response envelope, `client`
//! owns the HTTP session (cookie jar + read cache), and `identity` / `catalog`
//! are thin typed facades over the client. Everything that touches the wire
//! reports a [`NetError`].

pub mod catalog;
pub mod client;
pub mod graphql;
pub mod identity;
pub mod types;

use gate::ServiceError;

pub use catalog::{Catalog, GraphqlCatalog};
pub use client::{FetchPolicy, GraphqlClient};
pub use identity::GraphqlIdentityService;

/// Errors produced by the GraphQL transport.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),

    /// The request failed before a response arrived.
    #[error("{0}")]
    Request(String),

    #[error("request timed out")]
    Timeout,

    /// Non-2xx response without GraphQL errors in the body.
    #[error("Response not successful: Received status code {0}")]
    Status(u16),

    /// GraphQL `errors[]` messages, newline-joined.
    #[error("{0}")]
    Graphql(String),

    #[error("response parse failed: {0}")]
    Parse(String),

    #[error("response contained no data")]
    MissingData,
}

impl From<reqwest::Error> for NetError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() { Self::Timeout } else { Self::Request(e.to_string()) }
    }
}

impl From<NetError> for ServiceError {
    fn from(e: NetError) -> Self {
        match e {
            NetError::Timeout => Self::Timeout,
            NetError::Graphql(_) | NetError::Status(_) => Self::Server(e.to_string()),
            other => Self::Transport(other.to_string()),
        }
    }
}
