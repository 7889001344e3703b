//! List and form-heading cards for the four catalog record types.

#[cfg(test)]
#[path = "records_test.rs"]
mod records_test;

use std::fmt;

use gate::AdminPage;

use super::{Card, states};
use crate::format::format_date;
use crate::net::types::{Author, Book, Category, Publisher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Author,
    Book,
    Category,
    Publisher,
}

impl RecordKind {
    #[must_use]
    pub fn singular(self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Book => "book",
            Self::Category => "category",
            Self::Publisher => "publisher",
        }
    }

    #[must_use]
    pub fn plural(self) -> &'static str {
        match self {
            Self::Author => "authors",
            Self::Book => "books",
            Self::Category => "categories",
            Self::Publisher => "publishers",
        }
    }

    #[must_use]
    pub fn page(self) -> AdminPage {
        match self {
            Self::Author => AdminPage::Authors,
            Self::Book => AdminPage::Books,
            Self::Category => AdminPage::Categories,
            Self::Publisher => AdminPage::Publishers,
        }
    }

    /// Toast text after a successful save, e.g. `Author created successfully.`
    #[must_use]
    pub fn saved_message(self, updated: bool) -> String {
        let verb = if updated { "updated" } else { "created" };
        format!("{self} {verb} successfully.")
    }

    #[must_use]
    pub fn loading_title(self) -> String {
        format!("Loading {}", self.plural())
    }

    #[must_use]
    pub fn load_failed_title(self) -> String {
        format!("Unable to load {}", self.plural())
    }

    fn empty_card(self) -> Card {
        let description = match self {
            Self::Author => "Create your first author to get started.",
            Self::Book => "Create your first book to start managing your catalog.",
            Self::Category => "Create your first category.",
            Self::Publisher => "Create your first publisher.",
        };
        states::empty(&format!("No {} found", self.plural()), description)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.singular();
        let mut chars = name.chars();
        if let Some(first) = chars.next() {
            write!(f, "{}{}", first.to_ascii_uppercase(), chars.as_str())?;
        }
        Ok(())
    }
}

/// Heading of the create/edit form beside a list.
#[must_use]
pub fn form_heading(kind: RecordKind, editing: bool) -> Card {
    if editing {
        return Card::new(format!("Edit {}", kind.singular()))
            .describe(format!("Update selected {} details.", kind.singular()));
    }
    let description = match kind {
        RecordKind::Author | RecordKind::Book => format!("Create a new {} record.", kind.singular()),
        RecordKind::Category | RecordKind::Publisher => format!("Create a new {}.", kind.singular()),
    };
    Card::new(format!("New {}", kind.singular())).describe(description)
}

fn or_text<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.filter(|v| !v.is_empty()).unwrap_or(fallback)
}

fn titled(name: &str, id: &str) -> String {
    format!("{name} (#{id})")
}

fn list<T>(kind: RecordKind, records: &[T], card: impl Fn(&T) -> Card) -> Vec<Card> {
    if records.is_empty() {
        return vec![kind.empty_card()];
    }
    records.iter().map(card).collect()
}

#[must_use]
pub fn authors(records: &[Author]) -> Vec<Card> {
    list(RecordKind::Author, records, |author| {
        Card::new(titled(&author.full_name(), &author.id))
            .describe(format!(
                "Nationality: {} • Birth date: {}",
                author.nationality.as_deref().unwrap_or("-"),
                format_date(author.birth_date.as_deref())
            ))
            .line(or_text(author.biography.as_deref(), "No biography provided."))
            .line(format!("Updated at: {}", format_date(Some(&author.updated_at))))
    })
}

#[must_use]
pub fn categories(records: &[Category]) -> Vec<Card> {
    list(RecordKind::Category, records, |category| {
        Card::new(titled(&category.name, &category.id))
            .describe(format!("Updated at: {}", format_date(Some(&category.updated_at))))
            .line(or_text(category.description.as_deref(), "No description provided."))
    })
}

#[must_use]
pub fn publishers(records: &[Publisher]) -> Vec<Card> {
    list(RecordKind::Publisher, records, |publisher| {
        let location = [publisher.city.as_deref(), publisher.country.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        Card::new(titled(&publisher.name, &publisher.id))
            .describe(format!(
                "{} • Updated at: {}",
                or_text(Some(location.as_str()), "No location"),
                format_date(Some(&publisher.updated_at))
            ))
            .line(or_text(publisher.address.as_deref(), "No address provided."))
            .line(or_text(publisher.website.as_deref(), "No website provided."))
    })
}

#[must_use]
pub fn books(records: &[Book]) -> Vec<Card> {
    list(RecordKind::Book, records, |book| {
        let publisher = book.publisher.as_ref().map_or("No publisher", |publisher| publisher.name.as_str());
        let mut card = Card::new(titled(&book.title, &book.id))
            .describe(format!("{publisher} • Updated at {}", format_date(Some(&book.updated_at))));
        if !book.authors.is_empty() {
            let names: Vec<String> =
                book.authors.iter().map(|author| format!("{} {}", author.first_name, author.last_name)).collect();
            card = card.line(format!("Authors: {}", names.join(", ")));
        }
        if !book.categories.is_empty() {
            let names: Vec<&str> = book.categories.iter().map(|category| category.name.as_str()).collect();
            card = card.line(format!("Categories: {}", names.join(", ")));
        }
        card.line(or_text(book.description.as_deref(), "No description provided."))
    })
}
