//! Catalog record types and mutation inputs as they appear on the wire.

use serde::{Deserialize, Serialize};

// =============================================================================
// RECORDS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<String>,
    pub biography: Option<String>,
    pub nationality: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Author {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publisher {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Publisher reference embedded in a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRef {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub isbn: Option<String>,
    pub publication_date: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub page_count: Option<i64>,
    pub language: Option<String>,
    pub publisher_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
    /// Nested relations are only present on list reads.
    #[serde(default)]
    pub publisher: Option<PublisherRef>,
    #[serde(default)]
    pub authors: Vec<AuthorRef>,
    #[serde(default)]
    pub categories: Vec<CategoryRef>,
}

// =============================================================================
// INPUTS
// =============================================================================

/// Create and update share one shape; the console always sends every field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorInput {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<String>,
    pub biography: Option<String>,
    pub nationality: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryInput {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PublisherInput {
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookInput {
    pub title: String,
    pub isbn: Option<String>,
    pub publication_date: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub page_count: Option<i64>,
    pub language: Option<String>,
    pub publisher_id: Option<i64>,
    pub author_ids: Vec<i64>,
    pub category_ids: Vec<i64>,
}
