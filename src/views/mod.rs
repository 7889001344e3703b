//! Plain-text rendering of console screens.
//!
//! Every screen is built from [`Card`]s: a title, an optional description and
//! body lines. Renderers are pure; fetching happens in the console.

pub mod pages;
pub mod records;
pub mod states;

use std::fmt;

pub use records::RecordKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub description: Option<String>,
    pub lines: Vec<String>,
}

impl Card {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), description: None, lines: Vec::new() }
    }

    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[ {} ]", self.title)?;
        if let Some(description) = &self.description {
            writeln!(f, "{description}")?;
        }
        for line in &self.lines {
            writeln!(f, "  {line}")?;
        }
        Ok(())
    }
}

/// Join cards with a blank line between them.
#[must_use]
pub fn stack(cards: &[Card]) -> String {
    cards.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
}
