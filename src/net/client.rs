//! HTTP GraphQL client with a cookie-backed session and a read cache.
//!
//! ARCHITECTURE
//! ============
//! The backend keeps the login session in a cookie, so one `reqwest::Client`
//! with a cookie store is shared by every facade. Query results are cached by
//! operation name + variables; any mutation drops the cached reads, and
//! [`GraphqlClient::clear_cache`] drops everything on logout.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use serde_json::Value;

use super::NetError;
use super::graphql::{GraphqlRequest, Operation, OperationKind, parse_response};
use crate::config::ConsoleConfig;

/// How a query consults the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Serve from cache when present, otherwise fetch and store.
    CacheFirst,
    /// Always fetch; the fresh result replaces the cached one.
    NetworkOnly,
}

pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
    cache: Mutex<HashMap<String, Value>>,
}

impl GraphqlClient {
    /// # Errors
    ///
    /// Returns [`NetError::ClientBuild`] if the HTTP client cannot be constructed.
    pub fn new(config: &ConsoleConfig) -> Result<Self, NetError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| NetError::ClientBuild(e.to_string()))?;

        Ok(Self { http, endpoint: config.graphql_uri.clone(), cache: Mutex::new(HashMap::new()) })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run an operation and return its `data` object.
    ///
    /// # Errors
    ///
    /// Propagates transport, HTTP status and GraphQL errors as [`NetError`].
    pub async fn execute(&self, operation: &Operation, variables: Value, policy: FetchPolicy) -> Result<Value, NetError> {
        let key = cache_key(operation, &variables);

        if operation.kind == OperationKind::Query && policy == FetchPolicy::CacheFirst {
            if let Some(hit) = self.cache().get(&key).cloned() {
                tracing::trace!(operation = operation.name, "cache hit");
                return Ok(hit);
            }
        }

        let data = self.send(operation, &variables).await?;

        match operation.kind {
            OperationKind::Query => {
                self.cache().insert(key, data.clone());
            }
            OperationKind::Mutation => {
                self.cache().clear();
            }
        }

        Ok(data)
    }

    async fn send(&self, operation: &Operation, variables: &Value) -> Result<Value, NetError> {
        let body = GraphqlRequest::new(operation, variables);
        let response = self.http.post(&self.endpoint).json(&body).send().await?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        tracing::debug!(operation = operation.name, status, "graphql response");

        parse_response(status, &text)
    }

    /// Drop every cached read.
    pub fn clear_cache(&self) {
        self.cache().clear();
    }

    #[must_use]
    pub fn cached_entries(&self) -> usize {
        self.cache().len()
    }

    fn cache(&self) -> std::sync::MutexGuard<'_, HashMap<String, Value>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn cache_key(operation: &Operation, variables: &Value) -> String {
    format!("{}:{variables}", operation.name)
}
