//! Catalog reads and writes for authors, categories, publishers and books.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::NetError;
use super::client::{FetchPolicy, GraphqlClient};
use super::graphql::{self, Operation};
use super::types::{Author, AuthorInput, Book, BookInput, Category, CategoryInput, Publisher, PublisherInput};

/// Catalog backend used by the console screens. Enables mocking in tests.
#[async_trait::async_trait]
pub trait Catalog: Send + Sync {
    /// Admin-only liveness probe.
    async fn ping(&self) -> Result<bool, NetError>;

    async fn authors(&self, policy: FetchPolicy) -> Result<Vec<Author>, NetError>;
    async fn create_author(&self, input: &AuthorInput) -> Result<Author, NetError>;
    async fn update_author(&self, id: &str, input: &AuthorInput) -> Result<Author, NetError>;

    async fn categories(&self, policy: FetchPolicy) -> Result<Vec<Category>, NetError>;
    async fn create_category(&self, input: &CategoryInput) -> Result<Category, NetError>;
    async fn update_category(&self, id: &str, input: &CategoryInput) -> Result<Category, NetError>;

    async fn publishers(&self, policy: FetchPolicy) -> Result<Vec<Publisher>, NetError>;
    async fn create_publisher(&self, input: &PublisherInput) -> Result<Publisher, NetError>;
    async fn update_publisher(&self, id: &str, input: &PublisherInput) -> Result<Publisher, NetError>;

    async fn books(&self, policy: FetchPolicy) -> Result<Vec<Book>, NetError>;
    async fn create_book(&self, input: &BookInput) -> Result<Book, NetError>;
    async fn update_book(&self, id: &str, input: &BookInput) -> Result<Book, NetError>;
}

pub struct GraphqlCatalog {
    client: Arc<GraphqlClient>,
}

impl GraphqlCatalog {
    #[must_use]
    pub fn new(client: Arc<GraphqlClient>) -> Self {
        Self { client }
    }

    async fn read<T: DeserializeOwned>(&self, operation: &Operation, policy: FetchPolicy) -> Result<T, NetError> {
        let data = self.client.execute(operation, json!({}), policy).await?;
        graphql::decode_field(&data, operation.field)
    }

    async fn create<T, I>(&self, operation: &Operation, input: &I) -> Result<T, NetError>
    where
        T: DeserializeOwned,
        I: Serialize + Sync,
    {
        self.write(operation, json!({ "input": input })).await
    }

    async fn update<T, I>(&self, operation: &Operation, id: &str, input: &I) -> Result<T, NetError>
    where
        T: DeserializeOwned,
        I: Serialize + Sync,
    {
        self.write(operation, json!({ "id": id, "input": input })).await
    }

    async fn write<T: DeserializeOwned>(&self, operation: &Operation, variables: Value) -> Result<T, NetError> {
        let data = self.client.execute(operation, variables, FetchPolicy::NetworkOnly).await?;
        graphql::decode_field(&data, operation.field)
    }
}

#[async_trait::async_trait]
impl Catalog for GraphqlCatalog {
    async fn ping(&self) -> Result<bool, NetError> {
        self.read(&graphql::PING, FetchPolicy::NetworkOnly).await
    }

    async fn authors(&self, policy: FetchPolicy) -> Result<Vec<Author>, NetError> {
        self.read(&graphql::AUTHORS, policy).await
    }

    async fn create_author(&self, input: &AuthorInput) -> Result<Author, NetError> {
        self.create(&graphql::CREATE_AUTHOR, input).await
    }

    async fn update_author(&self, id: &str, input: &AuthorInput) -> Result<Author, NetError> {
        self.update(&graphql::UPDATE_AUTHOR, id, input).await
    }

    async fn categories(&self, policy: FetchPolicy) -> Result<Vec<Category>, NetError> {
        self.read(&graphql::CATEGORIES, policy).await
    }

    async fn create_category(&self, input: &CategoryInput) -> Result<Category, NetError> {
        self.create(&graphql::CREATE_CATEGORY, input).await
    }

    async fn update_category(&self, id: &str, input: &CategoryInput) -> Result<Category, NetError> {
        self.update(&graphql::UPDATE_CATEGORY, id, input).await
    }

    async fn publishers(&self, policy: FetchPolicy) -> Result<Vec<Publisher>, NetError> {
        self.read(&graphql::PUBLISHERS, policy).await
    }

    async fn create_publisher(&self, input: &PublisherInput) -> Result<Publisher, NetError> {
        self.create(&graphql::CREATE_PUBLISHER, input).await
    }

    async fn update_publisher(&self, id: &str, input: &PublisherInput) -> Result<Publisher, NetError> {
        self.update(&graphql::UPDATE_PUBLISHER, id, input).await
    }

    async fn books(&self, policy: FetchPolicy) -> Result<Vec<Book>, NetError> {
        self.read(&graphql::BOOKS, policy).await
    }

    async fn create_book(&self, input: &BookInput) -> Result<Book, NetError> {
        self.create(&graphql::CREATE_BOOK, input).await
    }

    async fn update_book(&self, id: &str, input: &BookInput) -> Result<Book, NetError> {
        self.update(&graphql::UPDATE_BOOK, id, input).await
    }
}
