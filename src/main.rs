mod action;
mod api;
mod app;
mod config;
mod error;
mod event;
mod github;
mod route;
mod tui;
mod types;
mod ui;
mod view;

use std::panic;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::action::Action;
use crate::api::RepositoryApi;
use crate::app::App;
use crate::config::Config;
use crate::event::Event;
use crate::github::GitHub;
use crate::route::{Location, DASHBOARD_PATH};
use crate::tui::EventHandler;

/// Browse a GitHub repository and its open issues
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Repository to open, as owner/name. Starts on the dashboard when omitted.
    repository: Option<String>,

    /// API base URL (overrides the config file)
    #[arg(long)]
    api_url: Option<String>,

    /// Alternative config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let base_url = cli.api_url.as_deref().unwrap_or(&config.api.base_url);
    let api: Arc<dyn RepositoryApi> = Arc::new(GitHub::new(base_url, &config.api.user_agent));
    info!(api = api.name(), base_url, "starting");

    let location = match cli.repository.as_deref().map(str::trim) {
        Some(identifier) if !identifier.is_empty() => Location::repository(identifier),
        _ => Location::new(DASHBOARD_PATH),
    };

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let result = run(api, location, &config).await;

    tui::restore()?;

    result
}

async fn run(
    api: Arc<dyn RepositoryApi>,
    location: Location,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut terminal = tui::init()?;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let mut app = App::new(api, location, action_tx.clone());
    let mut events = EventHandler::new(config.ui.render_rate());

    loop {
        tokio::select! {
            Some(event) = events.next() => {
                if event.is_quit() {
                    break;
                }

                match event {
                    Event::Render => {
                        terminal.draw(|frame| ui::render(frame, &app))?;
                    }
                    _ => {
                        let action = app.handle_event(event);
                        if !matches!(action, Action::None) {
                            action_tx.send(action)?;
                        }
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                app.update(action);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
