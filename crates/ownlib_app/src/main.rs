use std::sync::Arc;

use anyhow::{bail, Context};
use ownlib_app::platform::logging::{self, LogDestination};
use ownlib_app::{page_loaded, AppConfig, ConsoleSurface, FileCredentialStore, PageEvent};
use ownlib_client::SessionClient;
use ownlib_logging::ownlib_info;

const USAGE: &str = "usage: ownlib_app [-v] login <username> <password>\n\
                     \x20      ownlib_app [-v] logout\n\
                     \x20      ownlib_app [-v] open [page-path] [search-query]";

const DEFAULT_PAGE: &str = "/static/dashboard.html";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.first().is_some_and(|arg| arg == "-v");
    if verbose {
        args.remove(0);
    }
    logging::initialize(LogDestination::Both, verbose);

    let cwd = std::env::current_dir().context("resolve working directory")?;
    let config = AppConfig::load(&cwd);
    let store = Arc::new(FileCredentialStore::new(config.state_dir.clone()));
    let client = SessionClient::with_settings(&config.client_settings(), store)
        .context("build HTTP client")?;

    match args.first().map(String::as_str) {
        Some("login") => {
            let (Some(username), Some(password)) = (args.get(1), args.get(2)) else {
                bail!(USAGE);
            };
            client.login(username, password).await?;
            println!("Logged in as {username}");
        }
        Some("logout") => {
            client.clear_credential();
            println!("Logged out");
        }
        Some("open") | None => {
            let path = args.get(1).map_or(DEFAULT_PAGE, String::as_str);
            let Some(mut controller) =
                page_loaded(path, client, ConsoleSurface::new(false), config.page_timing())
            else {
                println!("{path} is the landing page; nothing to do");
                return Ok(());
            };
            controller.settle().await;

            if let Some(query) = args.get(2) {
                controller.handle_event(PageEvent::SearchSubmitted {
                    query: query.clone(),
                });
                controller.settle().await;
            }

            let view = controller.view();
            ownlib_info!("Page settled in phase {:?}", view.phase);
            match view.visibility.user_name {
                Some(name) => println!("Signed in as {name}"),
                None => println!("Not signed in"),
            }
            if let Some(cards) = &view.collection {
                println!("Collection: {} books", cards.len());
            }
            if let Some(search) = &view.search {
                println!("Search: {} results", search.count);
            }
            for notice in &view.messages {
                println!("[{}] {}", notice.kind.as_str(), notice.text);
            }
        }
        Some(other) => bail!("unknown command {other:?}\n{USAGE}"),
    }
    Ok(())
}
