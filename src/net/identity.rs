//! [`IdentityService`] backed by the GraphQL `me` / `login` / `logout` operations.

use std::sync::Arc;

use gate::{Identity, IdentityService, ServiceError};
use serde_json::json;

use super::client::{FetchPolicy, GraphqlClient};
use super::graphql::{self, LOGIN, LOGOUT, ME};

pub struct GraphqlIdentityService {
    client: Arc<GraphqlClient>,
}

impl GraphqlIdentityService {
    #[must_use]
    pub fn new(client: Arc<GraphqlClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl IdentityService for GraphqlIdentityService {
    async fn who_am_i(&self) -> Result<Option<Identity>, ServiceError> {
        let data = self.client.execute(&ME, json!({}), FetchPolicy::NetworkOnly).await?;
        Ok(graphql::decode_field(&data, ME.field)?)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<Identity, ServiceError> {
        let variables = json!({ "email": email, "password": password });
        let data = self.client.execute(&LOGIN, variables, FetchPolicy::NetworkOnly).await?;
        Ok(graphql::decode_field(&data, LOGIN.field)?)
    }

    async fn end_session(&self) -> Result<(), ServiceError> {
        let data = self.client.execute(&LOGOUT, json!({}), FetchPolicy::NetworkOnly).await?;
        let ended: bool = graphql::decode_field(&data, LOGOUT.field)?;
        if !ended {
            tracing::debug!("backend reported no session to end");
        }
        Ok(())
    }

    async fn clear_cache(&self) {
        self.client.clear_cache();
    }
}
