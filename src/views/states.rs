//! Loading, error, empty and routing-state cards.

use super::Card;

#[must_use]
pub fn loading(title: &str) -> Card {
    Card::new(title).describe("Please wait while data is loading.").line("Fetching data from the API.")
}

/// Failed read. `retry` names how to run the read again, if anything can.
#[must_use]
pub fn error(title: &str, message: &str, retry: Option<&str>) -> Card {
    let card = Card::new(format!("! {title}")).describe(message);
    match retry {
        Some(hint) => card.line(format!("Retry: {hint}")),
        None => card,
    }
}

#[must_use]
pub fn empty(title: &str, description: &str) -> Card {
    Card::new(title).describe(description)
}

/// Guard placeholder while the session is unresolved.
#[must_use]
pub fn pending(message: &str) -> Card {
    Card::new(message)
}

#[must_use]
pub fn blocked(message: &str) -> Card {
    Card::new("Access denied").describe(message)
}

#[must_use]
pub fn not_found(path: &str) -> Card {
    Card::new("Page not found")
        .describe("The requested route does not exist.")
        .line(format!("Requested: {path}"))
        .line("Go to dashboard: /admin")
}

#[must_use]
pub fn redirect_loop(path: &str) -> Card {
    Card::new("! Navigation failed").describe(format!("Too many redirects while opening {path}."))
}
