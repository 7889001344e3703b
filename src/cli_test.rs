use std::sync::Arc;

use super::*;
use crate::console::test_helpers::{Accounts, MemoryCatalog, console_with};

fn parse(line: &str) -> Command {
    ShellLine::try_parse_from(split_words(line).unwrap()).unwrap().command
}

// =============================================================================
// split_words
// =============================================================================

#[test]
fn splits_on_whitespace() {
    assert_eq!(split_words("  open   /admin ").unwrap(), vec!["open", "/admin"]);
    assert!(split_words("   ").unwrap().is_empty());
}

#[test]
fn quotes_group_words() {
    assert_eq!(
        split_words(r#"save-author --last-name "Le Guin" --biography 'said "hi"'"#).unwrap(),
        vec!["save-author", "--last-name", "Le Guin", "--biography", r#"said "hi""#]
    );
    assert_eq!(split_words(r#"x "" y"#).unwrap(), vec!["x", "", "y"]);
}

#[test]
fn backslash_escapes_outside_single_quotes() {
    assert_eq!(split_words(r"a\ b").unwrap(), vec!["a b"]);
    assert_eq!(split_words(r"'a\b'").unwrap(), vec![r"a\b"]);
}

#[test]
fn unclosed_quote_is_an_error() {
    assert!(matches!(split_words(r#"open "/admin"#), Err(CliError::UnclosedQuote)));
}

// =============================================================================
// Command parsing
// =============================================================================

#[test]
fn shell_lines_parse_without_binary_name() {
    assert_eq!(parse("open /admin/books"), Command::Open { path: "/admin/books".into() });
    assert_eq!(parse("back"), Command::Back);
    assert_eq!(
        parse("login admin@example.com secret"),
        Command::Login { email: "admin@example.com".into(), password: "secret".into() }
    );
}

#[test]
fn book_flags_parse() {
    let Command::SaveBook(args) = parse("save-book --title X --publisher none --toggle-author 1 --toggle-author 2")
    else {
        panic!("expected save-book");
    };
    assert_eq!(args.title.as_deref(), Some("X"));
    assert_eq!(args.publisher.as_deref(), Some("none"));
    assert_eq!(args.toggle_authors, vec![1, 2]);
}

#[test]
fn top_level_without_subcommand_starts_shell() {
    let cli = Cli::try_parse_from(["libris", "--graphql-uri", "http://api/graphql"]).unwrap();
    assert!(cli.command.is_none());
    assert_eq!(cli.graphql_uri.as_deref(), Some("http://api/graphql"));
}

#[test]
fn half_given_credentials_are_reported() {
    let cli = Cli::try_parse_from(["libris", "--email", "admin@example.com", "whoami"]).unwrap();
    let err = cli.credentials().unwrap_err();
    assert_eq!(err.to_string(), "--password is required when --email is given");

    let cli = Cli::try_parse_from(["libris", "--password", "secret", "whoami"]).unwrap();
    assert!(matches!(cli.credentials(), Err(CliError::MissingCredential("email", "password"))));

    let cli = Cli::try_parse_from(["libris", "--email", "a@b.c", "--password", "secret"]).unwrap();
    let form = cli.credentials().unwrap().unwrap();
    assert_eq!((form.email.as_str(), form.password.as_str()), ("a@b.c", "secret"));
}

#[test]
fn book_args_overlay_form() {
    let mut form = BookForm { title: "Old".into(), publisher_id: Some("3".into()), author_ids: vec![1], ..BookForm::default() };
    let args = BookArgs {
        page_count: Some("200".into()),
        publisher: Some("none".into()),
        toggle_authors: vec![1, 2],
        ..BookArgs::default()
    };
    args.apply(&mut form);
    assert_eq!(form.title, "Old");
    assert_eq!(form.page_count, "200");
    assert_eq!(form.publisher_id, None);
    assert_eq!(form.author_ids, vec![2]);
}

// =============================================================================
// execute
// =============================================================================

#[tokio::test]
async fn login_then_save_then_list() {
    let catalog = Arc::new(MemoryCatalog::default());
    let mut console = console_with(Accounts::signed_out("admin"), catalog.clone()).await;
    let mut loading = Vec::new();
    let mut progress = |card: &Card| loading.push(card.title.clone());

    let out = execute(&mut console, parse("login admin@example.com secret"), &mut progress).await.unwrap();
    assert!(out.starts_with("Login successful.\n"));
    assert!(out.contains("Admin dashboard"));

    let out = execute(&mut console, parse(r#"save-author --first-name Ursula --last-name "Le Guin""#), &mut progress)
        .await
        .unwrap();
    assert_eq!(out, "Author created successfully.");

    let out = execute(&mut console, parse("save-author --id 1 --nationality American"), &mut progress).await.unwrap();
    assert_eq!(out, "Author updated successfully.");

    let out = execute(&mut console, parse("open /admin/authors"), &mut progress).await.unwrap();
    assert!(out.contains("Nationality: American"));
    assert_eq!(loading, vec!["Loading dashboard", "Loading authors"]);
}

#[tokio::test]
async fn whoami_and_back_at_start() {
    let mut console = console_with(Accounts::signed_out("admin"), Arc::new(MemoryCatalog::default())).await;
    let mut progress = |_: &Card| {};

    assert_eq!(execute(&mut console, Command::Whoami, &mut progress).await.unwrap(), "Not signed in.");
    assert_eq!(
        execute(&mut console, Command::Back, &mut progress).await.unwrap(),
        "Already at the start of history."
    );
}

#[tokio::test]
async fn failed_save_is_an_error() {
    let mut console = console_with(Accounts::signed_in("admin"), Arc::new(MemoryCatalog::default())).await;
    let mut progress = |_: &Card| {};

    let err = execute(&mut console, parse("save-publisher --name Tor"), &mut progress).await.unwrap_err();
    assert_eq!(err.to_string(), "Response not successful: Received status code 500");
}
