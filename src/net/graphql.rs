//! GraphQL operations and the request/response envelope.
//!
//! Pure parsing lives in [`parse_response`] so wire handling can be tested
//! without a server.

#[cfg(test)]
#[path = "graphql_test.rs"]
mod graphql_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::NetError;

// =============================================================================
// OPERATIONS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

/// A named GraphQL document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    /// Top-level field the response data is read from.
    pub field: &'static str,
    pub kind: OperationKind,
    pub document: &'static str,
}

const fn query(name: &'static str, field: &'static str, document: &'static str) -> Operation {
    Operation { name, field, kind: OperationKind::Query, document }
}

const fn mutation(name: &'static str, field: &'static str, document: &'static str) -> Operation {
    Operation { name, field, kind: OperationKind::Mutation, document }
}

pub const ME: Operation = query("Me", "me", "query Me { me { id email name role } }");

pub const PING: Operation = query("Ping", "ping", "query Ping { ping }");

pub const AUTHORS: Operation = query(
    "Authors",
    "authors",
    "query Authors { authors { id firstName lastName birthDate biography nationality createdAt updatedAt } }",
);

pub const CATEGORIES: Operation = query(
    "Categories",
    "categories",
    "query Categories { categories { id name description createdAt updatedAt } }",
);

pub const PUBLISHERS: Operation = query(
    "Publishers",
    "publishers",
    "query Publishers { publishers { id name address city country website createdAt updatedAt } }",
);

pub const BOOKS: Operation = query(
    "Books",
    "books",
    "query Books { books { id title isbn publicationDate price description pageCount language publisherId \
     createdAt updatedAt publisher { id name } authors { id firstName lastName } categories { id name } } }",
);

pub const LOGIN: Operation = mutation(
    "Login",
    "login",
    "mutation Login($email: String!, $password: String!) { login(email: $email, password: $password) \
     { id email name role } }",
);

pub const LOGOUT: Operation = mutation("Logout", "logout", "mutation Logout { logout }");

pub const CREATE_AUTHOR: Operation = mutation(
    "CreateAuthor",
    "createAuthor",
    "mutation CreateAuthor($input: CreateAuthorInput!) { createAuthor(input: $input) \
     { id firstName lastName birthDate biography nationality createdAt updatedAt } }",
);

pub const UPDATE_AUTHOR: Operation = mutation(
    "UpdateAuthor",
    "updateAuthor",
    "mutation UpdateAuthor($id: ID!, $input: UpdateAuthorInput!) { updateAuthor(id: $id, input: $input) \
     { id firstName lastName birthDate biography nationality createdAt updatedAt } }",
);

pub const CREATE_CATEGORY: Operation = mutation(
    "CreateCategory",
    "createCategory",
    "mutation CreateCategory($input: CreateCategoryInput!) { createCategory(input: $input) \
     { id name description createdAt updatedAt } }",
);

pub const UPDATE_CATEGORY: Operation = mutation(
    "UpdateCategory",
    "updateCategory",
    "mutation UpdateCategory($id: ID!, $input: UpdateCategoryInput!) { updateCategory(id: $id, input: $input) \
     { id name description createdAt updatedAt } }",
);

pub const CREATE_PUBLISHER: Operation = mutation(
    "CreatePublisher",
    "createPublisher",
    "mutation CreatePublisher($input: CreatePublisherInput!) { createPublisher(input: $input) \
     { id name address city country website createdAt updatedAt } }",
);

pub const UPDATE_PUBLISHER: Operation = mutation(
    "UpdatePublisher",
    "updatePublisher",
    "mutation UpdatePublisher($id: ID!, $input: UpdatePublisherInput!) { updatePublisher(id: $id, input: $input) \
     { id name address city country website createdAt updatedAt } }",
);

pub const CREATE_BOOK: Operation = mutation(
    "CreateBook",
    "createBook",
    "mutation CreateBook($input: CreateBookInput!) { createBook(input: $input) \
     { id title isbn publicationDate price description pageCount language publisherId createdAt updatedAt } }",
);

pub const UPDATE_BOOK: Operation = mutation(
    "UpdateBook",
    "updateBook",
    "mutation UpdateBook($id: ID!, $input: UpdateBookInput!) { updateBook(id: $id, input: $input) \
     { id title isbn publicationDate price description pageCount language publisherId createdAt updatedAt } }",
);

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Serialize)]
pub struct GraphqlRequest<'a> {
    pub query: &'a str,
    #[serde(rename = "operationName")]
    pub operation_name: &'a str,
    pub variables: &'a Value,
}

impl<'a> GraphqlRequest<'a> {
    #[must_use]
    pub fn new(operation: &'a Operation, variables: &'a Value) -> Self {
        Self { query: operation.document, operation_name: operation.name, variables }
    }
}

#[derive(Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorItem>,
}

#[derive(Deserialize)]
struct GraphqlErrorItem {
    message: String,
}

// =============================================================================
// PARSING
// =============================================================================

/// Turn an HTTP status and body into the response `data` object.
///
/// # Errors
///
/// [`NetError::Graphql`] when the body carries `errors[]`, [`NetError::Status`]
/// for other non-2xx replies, [`NetError::Parse`] for malformed 2xx bodies and
/// [`NetError::MissingData`] when `data` is absent or null.
pub fn parse_response(status: u16, body: &str) -> Result<Value, NetError> {
    let success = (200..300).contains(&status);

    let response: GraphqlResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(_) if !success => return Err(NetError::Status(status)),
        Err(e) => return Err(NetError::Parse(e.to_string())),
    };

    if !response.errors.is_empty() {
        let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(NetError::Graphql(messages.join("\n")));
    }

    if !success {
        return Err(NetError::Status(status));
    }

    match response.data {
        Some(Value::Null) | None => Err(NetError::MissingData),
        Some(data) => Ok(data),
    }
}

/// Deserialize one top-level field out of response data. A missing field reads as `null`.
///
/// # Errors
///
/// Returns [`NetError::Parse`] when the field does not match `T`.
pub fn decode_field<T: DeserializeOwned>(data: &Value, field: &str) -> Result<T, NetError> {
    let value = data.get(field).cloned().unwrap_or(Value::Null);
    serde_json::from_value(value).map_err(|e| NetError::Parse(format!("{field}: {e}")))
}
