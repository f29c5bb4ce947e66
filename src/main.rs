use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod api;
mod app;
mod config;
mod handler;
mod jump;
mod location;
mod search;
mod tui;
mod ui;

use api::SurahClient;
use app::App;
use config::Config;

#[derive(Parser)]
#[command(name = "quran")]
#[command(about = "TUI for reading the Qur'an with surah search and ayat jump")]
struct Cli {
    /// Start location, e.g. "#/" or "#/chapter/36"
    location: Option<String>,

    /// Override the equran.id API base URL
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let config = Config::load().unwrap_or_else(|_| Config::default());
    let base_url = cli
        .base_url
        .or(config.base_url)
        .unwrap_or_else(|| api::DEFAULT_BASE_URL.to_string());

    let client = SurahClient::new(&base_url);
    let start_location = cli.location.unwrap_or_default();
    let mut app = App::new(client, &start_location);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new(Duration::from_millis(100));

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        if let Some(event) = events.next().await {
            handler::handle_event(&mut app, event);
        }
        app.poll_fetches().await;
    }

    tui::restore()?;
    Ok(())
}

/// Log to a file under the config directory; the alternate screen owns the
/// terminal, so nothing may write to stderr while the app runs.
fn init_logging() -> Result<()> {
    let path = Config::log_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
