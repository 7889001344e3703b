//! Edit-form state for the console screens and its conversion to mutation inputs.
//!
//! Forms hold raw text as typed. Validation trims required fields, turns empty
//! optional fields into `null` and parses numeric fields.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use crate::net::types::{
    Author, AuthorInput, Book, BookInput, Category, CategoryInput, Publisher, PublisherInput,
};

pub const LOGIN_REQUIRED: &str = "Email and password are required.";
pub const AUTHOR_REQUIRED: &str = "First name and last name are required.";
pub const CATEGORY_REQUIRED: &str = "Category name is required.";
pub const PUBLISHER_REQUIRED: &str = "Publisher name is required.";
pub const BOOK_REQUIRED: &str = "Book title is required.";
pub const BOOK_PAGE_COUNT: &str = "Page count must be a whole number.";
pub const BOOK_PUBLISHER: &str = "Publisher id must be a whole number.";

/// A form that cannot be submitted as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct FormError(pub &'static str);

fn optional(value: &str) -> Option<String> {
    if value.is_empty() { None } else { Some(value.to_owned()) }
}

fn parse_id_list<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<i64> {
    ids.filter_map(|id| id.parse().ok()).collect()
}

// =============================================================================
// LOGIN
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// # Errors
    ///
    /// Returns [`LOGIN_REQUIRED`] when either field is empty.
    pub fn validate(&self) -> Result<(&str, &str), FormError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(FormError(LOGIN_REQUIRED));
        }
        Ok((&self.email, &self.password))
    }
}

// =============================================================================
// AUTHOR
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorForm {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub biography: String,
    pub nationality: String,
}

impl AuthorForm {
    #[must_use]
    pub fn from_record(author: &Author) -> Self {
        Self {
            first_name: author.first_name.clone(),
            last_name: author.last_name.clone(),
            birth_date: author.birth_date.clone().unwrap_or_default(),
            biography: author.biography.clone().unwrap_or_default(),
            nationality: author.nationality.clone().unwrap_or_default(),
        }
    }

    /// # Errors
    ///
    /// Returns [`AUTHOR_REQUIRED`] when either name is blank.
    pub fn validate(&self) -> Result<AuthorInput, FormError> {
        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();
        if first_name.is_empty() || last_name.is_empty() {
            return Err(FormError(AUTHOR_REQUIRED));
        }
        Ok(AuthorInput {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            birth_date: optional(&self.birth_date),
            biography: optional(&self.biography),
            nationality: optional(&self.nationality),
        })
    }
}

// =============================================================================
// CATEGORY
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
}

impl CategoryForm {
    #[must_use]
    pub fn from_record(category: &Category) -> Self {
        Self { name: category.name.clone(), description: category.description.clone().unwrap_or_default() }
    }

    /// # Errors
    ///
    /// Returns [`CATEGORY_REQUIRED`] when the name is blank.
    pub fn validate(&self) -> Result<CategoryInput, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError(CATEGORY_REQUIRED));
        }
        Ok(CategoryInput { name: name.to_owned(), description: optional(&self.description) })
    }
}

// =============================================================================
// PUBLISHER
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublisherForm {
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub website: String,
}

impl PublisherForm {
    #[must_use]
    pub fn from_record(publisher: &Publisher) -> Self {
        Self {
            name: publisher.name.clone(),
            address: publisher.address.clone().unwrap_or_default(),
            city: publisher.city.clone().unwrap_or_default(),
            country: publisher.country.clone().unwrap_or_default(),
            website: publisher.website.clone().unwrap_or_default(),
        }
    }

    /// # Errors
    ///
    /// Returns [`PUBLISHER_REQUIRED`] when the name is blank.
    pub fn validate(&self) -> Result<PublisherInput, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError(PUBLISHER_REQUIRED));
        }
        Ok(PublisherInput {
            name: name.to_owned(),
            address: optional(&self.address),
            city: optional(&self.city),
            country: optional(&self.country),
            website: optional(&self.website),
        })
    }
}

// =============================================================================
// BOOK
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookForm {
    pub title: String,
    pub isbn: String,
    pub publication_date: String,
    pub price: String,
    pub description: String,
    pub page_count: String,
    pub language: String,
    /// `None` means "no publisher".
    pub publisher_id: Option<String>,
    pub author_ids: Vec<i64>,
    pub category_ids: Vec<i64>,
}

impl BookForm {
    #[must_use]
    pub fn from_record(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            isbn: book.isbn.clone().unwrap_or_default(),
            publication_date: book
                .publication_date
                .as_deref()
                .map(|date| date.chars().take(10).collect())
                .unwrap_or_default(),
            price: book.price.clone().unwrap_or_default(),
            description: book.description.clone().unwrap_or_default(),
            page_count: book.page_count.map(|count| count.to_string()).unwrap_or_default(),
            language: book.language.clone().unwrap_or_default(),
            publisher_id: book.publisher.as_ref().map(|publisher| publisher.id.clone()),
            author_ids: parse_id_list(book.authors.iter().map(|author| author.id.as_str())),
            category_ids: parse_id_list(book.categories.iter().map(|category| category.id.as_str())),
        }
    }

    pub fn toggle_author(&mut self, id: i64) {
        toggle(&mut self.author_ids, id);
    }

    pub fn toggle_category(&mut self, id: i64) {
        toggle(&mut self.category_ids, id);
    }

    /// # Errors
    ///
    /// Returns [`BOOK_REQUIRED`] for a blank title, or a parse message when the
    /// page count or publisher id is not a whole number.
    pub fn validate(&self) -> Result<BookInput, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError(BOOK_REQUIRED));
        }

        let page_count = match self.page_count.trim() {
            "" => None,
            raw => Some(raw.parse::<i64>().map_err(|_| FormError(BOOK_PAGE_COUNT))?),
        };
        let publisher_id = match self.publisher_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<i64>().map_err(|_| FormError(BOOK_PUBLISHER))?),
        };

        Ok(BookInput {
            title: title.to_owned(),
            isbn: optional(&self.isbn),
            publication_date: optional(&self.publication_date),
            price: optional(&self.price),
            description: optional(&self.description),
            page_count,
            language: optional(&self.language),
            publisher_id,
            author_ids: self.author_ids.clone(),
            category_ids: self.category_ids.clone(),
        })
    }
}

fn toggle(values: &mut Vec<i64>, value: i64) {
    if let Some(index) = values.iter().position(|v| *v == value) {
        values.remove(index);
    } else {
        values.push(value);
    }
}
