use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use gate::{SessionContext, SessionStore};
use libris::cli::{Cli, CliError, ShellLine, execute, split_words};
use libris::config::{ConsoleConfig, resolve_graphql_uri};
use libris::console::Console;
use libris::net::{GraphqlCatalog, GraphqlClient, GraphqlIdentityService};
use libris::views::Card;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const PROMPT: &str = "libris> ";

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let credentials = cli.credentials()?;

    let mut config = ConsoleConfig::from_env()?;
    if let Some(uri) = cli.graphql_uri.as_deref() {
        config = ConsoleConfig::new(resolve_graphql_uri(Some(uri), None), config.timeouts)?;
    }
    tracing::info!(endpoint = %config.graphql_uri, "starting console");

    let client = Arc::new(GraphqlClient::new(&config)?);
    let store = SessionStore::start(Arc::new(GraphqlIdentityService::new(Arc::clone(&client))));
    let catalog = Arc::new(GraphqlCatalog::new(client));
    let mut console = Console::new(&SessionContext::provide(store), catalog)?;

    console.session().initialized().await;
    console.refresh();

    if let Some(form) = credentials {
        let message = console.login(&form).await?;
        eprintln!("{message}");
    }

    let mut progress = |card: &Card| eprint!("{card}");
    match cli.command {
        Some(command) => {
            let output = execute(&mut console, command, &mut progress).await?;
            println!("{output}");
        }
        None => shell(&mut console, &mut progress).await?,
    }
    Ok(())
}

async fn shell(console: &mut Console, progress: &mut dyn FnMut(&Card)) -> Result<(), CliError> {
    println!("{}", console.render().await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{PROMPT}");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let words = match split_words(&line) {
            Ok(words) if words.is_empty() => continue,
            Ok(words) => words,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        if matches!(words[0].as_str(), "exit" | "quit") {
            break;
        }

        let command = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        match execute(console, command, progress).await {
            Ok(output) => println!("{output}"),
            Err(e) => eprintln!("error: {e}"),
        }
    }
    Ok(())
}
