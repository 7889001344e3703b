//! Command-line surface shared by one-shot invocations and the interactive shell.
//!
//! DESIGN
//! ======
//! The same [`Command`] set is parsed from process arguments ([`Cli`]) and
//! from shell lines ([`ShellLine`] over [`split_words`]). [`execute`] runs one
//! command against a [`Console`] and returns the text to print.

#[cfg(test)]
#[path = "cli_test.rs"]
mod cli_test;

use clap::{Args, Parser, Subcommand};

use crate::config::ConfigError;
use crate::console::{Console, ConsoleError};
use crate::forms::{AuthorForm, BookForm, CategoryForm, LoginForm, PublisherForm};
use crate::net::NetError;
use crate::views::Card;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("transport setup failed: {0}")]
    Net(#[from] NetError),
    #[error(transparent)]
    Console(#[from] ConsoleError),
    #[error("unterminated quote in input")]
    UnclosedQuote,
    #[error("--{0} is required when --{1} is given")]
    MissingCredential(&'static str, &'static str),
    #[error("stdin read failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "libris", about = "Catalog admin console over GraphQL")]
pub struct Cli {
    /// Full GraphQL endpoint; overrides LIBRIS_GRAPHQL_URI / LIBRIS_API_URL.
    #[arg(long)]
    pub graphql_uri: Option<String>,

    /// Sign in before running the command.
    #[arg(long, env = "LIBRIS_EMAIL")]
    pub email: Option<String>,

    #[arg(long, env = "LIBRIS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Omit to start the interactive shell.
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Sign-in credentials from `--email` and `--password`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::MissingCredential`] when only one of the two is set.
    pub fn credentials(&self) -> Result<Option<LoginForm>, CliError> {
        match (&self.email, &self.password) {
            (Some(email), Some(password)) => {
                Ok(Some(LoginForm { email: email.clone(), password: password.clone() }))
            }
            (Some(_), None) => Err(CliError::MissingCredential("password", "email")),
            (None, Some(_)) => Err(CliError::MissingCredential("email", "password")),
            (None, None) => Ok(None),
        }
    }
}

/// One line typed into the interactive shell.
#[derive(Parser, Debug)]
#[command(name = "libris", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Navigate to a console path, e.g. /admin/books
    Open { path: String },
    /// Go back one history entry
    Back,
    /// Render the current page again
    Reload,
    Login { email: String, password: String },
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Create an author, or update one with --id
    SaveAuthor(AuthorArgs),
    SaveCategory(CategoryArgs),
    SavePublisher(PublisherArgs),
    SaveBook(BookArgs),
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorArgs {
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub birth_date: Option<String>,
    #[arg(long)]
    pub biography: Option<String>,
    #[arg(long)]
    pub nationality: Option<String>,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryArgs {
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct PublisherArgs {
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub website: Option<String>,
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct BookArgs {
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub isbn: Option<String>,
    #[arg(long)]
    pub publication_date: Option<String>,
    #[arg(long)]
    pub price: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub page_count: Option<String>,
    #[arg(long)]
    pub language: Option<String>,
    /// Publisher id, or `none` to clear it.
    #[arg(long)]
    pub publisher: Option<String>,
    /// Add or remove an author id; repeatable.
    #[arg(long = "toggle-author")]
    pub toggle_authors: Vec<i64>,
    /// Add or remove a category id; repeatable.
    #[arg(long = "toggle-category")]
    pub toggle_categories: Vec<i64>,
}

fn overlay(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}

impl AuthorArgs {
    fn apply(self, form: &mut AuthorForm) {
        overlay(&mut form.first_name, self.first_name);
        overlay(&mut form.last_name, self.last_name);
        overlay(&mut form.birth_date, self.birth_date);
        overlay(&mut form.biography, self.biography);
        overlay(&mut form.nationality, self.nationality);
    }
}

impl CategoryArgs {
    fn apply(self, form: &mut CategoryForm) {
        overlay(&mut form.name, self.name);
        overlay(&mut form.description, self.description);
    }
}

impl PublisherArgs {
    fn apply(self, form: &mut PublisherForm) {
        overlay(&mut form.name, self.name);
        overlay(&mut form.address, self.address);
        overlay(&mut form.city, self.city);
        overlay(&mut form.country, self.country);
        overlay(&mut form.website, self.website);
    }
}

impl BookArgs {
    fn apply(self, form: &mut BookForm) {
        overlay(&mut form.title, self.title);
        overlay(&mut form.isbn, self.isbn);
        overlay(&mut form.publication_date, self.publication_date);
        overlay(&mut form.price, self.price);
        overlay(&mut form.description, self.description);
        overlay(&mut form.page_count, self.page_count);
        overlay(&mut form.language, self.language);
        if let Some(publisher) = self.publisher {
            form.publisher_id = if publisher == "none" { None } else { Some(publisher) };
        }
        for id in self.toggle_authors {
            form.toggle_author(id);
        }
        for id in self.toggle_categories {
            form.toggle_category(id);
        }
    }
}

/// Split a shell line into words. Single and double quotes group words;
/// a backslash escapes the next character outside single quotes.
///
/// # Errors
///
/// Returns [`CliError::UnclosedQuote`] when a quote is left open.
pub fn split_words(line: &str) -> Result<Vec<String>, CliError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('\''), c) => current.push(c),
            (_, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                in_word = true;
            }
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(CliError::UnclosedQuote);
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

async fn render_page(console: &Console, progress: &mut dyn FnMut(&Card)) -> String {
    if let Some(card) = console.loading_card() {
        progress(&card);
    }
    console.render().await
}

/// Run one command. `progress` receives the loading card before a page fetch.
///
/// # Errors
///
/// Returns the [`ConsoleError`] of a failed login or save.
pub async fn execute(
    console: &mut Console,
    command: Command,
    progress: &mut dyn FnMut(&Card),
) -> Result<String, ConsoleError> {
    match command {
        Command::Open { path } => {
            console.open(&path);
            Ok(render_page(console, progress).await)
        }
        Command::Back => {
            if console.back().is_none() {
                return Ok("Already at the start of history.".to_owned());
            }
            Ok(render_page(console, progress).await)
        }
        Command::Reload => {
            console.refresh();
            Ok(render_page(console, progress).await)
        }
        Command::Login { email, password } => {
            let message = console.login(&LoginForm { email, password }).await?;
            Ok(format!("{message}\n{}", render_page(console, progress).await))
        }
        Command::Logout => {
            console.logout().await;
            Ok(render_page(console, progress).await)
        }
        Command::Whoami => Ok(match console.session().identity() {
            Some(identity) => format!("{} <{}> ({})", identity.name, identity.email, identity.role),
            None => "Not signed in.".to_owned(),
        }),
        Command::SaveAuthor(mut args) => {
            let id = args.id.take();
            let mut form = match &id {
                Some(id) => console.author_form(id).await?,
                None => AuthorForm::default(),
            };
            args.apply(&mut form);
            console.save_author(id.as_deref(), &form).await
        }
        Command::SaveCategory(mut args) => {
            let id = args.id.take();
            let mut form = match &id {
                Some(id) => console.category_form(id).await?,
                None => CategoryForm::default(),
            };
            args.apply(&mut form);
            console.save_category(id.as_deref(), &form).await
        }
        Command::SavePublisher(mut args) => {
            let id = args.id.take();
            let mut form = match &id {
                Some(id) => console.publisher_form(id).await?,
                None => PublisherForm::default(),
            };
            args.apply(&mut form);
            console.save_publisher(id.as_deref(), &form).await
        }
        Command::SaveBook(mut args) => {
            let id = args.id.take();
            let mut form = match &id {
                Some(id) => console.book_form(id).await?,
                None => BookForm::default(),
            };
            args.apply(&mut form);
            console.save_book(id.as_deref(), &form).await
        }
    }
}
