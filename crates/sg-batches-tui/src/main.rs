use std::io;
use std::sync::{mpsc, Arc};

use anyhow::{bail, Context};
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use sg_batches_config::AppConfig;
use sg_client::HttpBatchChangesClient;

mod app;
mod browser;
mod events;
mod fetch;
mod logger;
mod notifier;
mod relative_time;
mod remote;
mod state;
mod view_models;
mod views;

use app::App;
use events::Dispatcher;
use remote::RemoteOps;
use state::AppState;

fn main() -> anyhow::Result<()> {
    let log_file = logger::init();
    log::info!("Starting sg-batches-tui, logging to {}", log_file.display());

    // .env is only consulted when the token is not already in the environment
    if std::env::var("SRC_ACCESS_TOKEN").is_err() {
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("Loaded .env file from: {:?}", path),
            Err(_) => log::debug!(".env file not found, relying on environment variables"),
        }
    }

    let config = AppConfig::load();
    let instance_url =
        std::env::var("SRC_ENDPOINT").unwrap_or_else(|_| config.instance_url.clone());
    let access_token = match std::env::var("SRC_ACCESS_TOKEN")
        .ok()
        .or_else(|| config.access_token.clone())
    {
        Some(token) => token,
        None => bail!(
            "Sourcegraph access token not set. Export SRC_ACCESS_TOKEN, add it to a .env file, \
             or set access_token in .sg-batches.toml"
        ),
    };

    log::info!("Using Sourcegraph instance {}", instance_url);
    let client = HttpBatchChangesClient::new(&instance_url, &access_token)
        .context("Failed to build Sourcegraph client")?;

    let (event_tx, event_rx) = mpsc::channel();
    let remote = RemoteOps::new(
        Arc::new(client),
        Dispatcher::new(event_tx),
        config.publish_refresh_delay(),
    )?;

    let mut app = App::new(AppState::new(instance_url), remote, event_rx);
    app.load_batch_changes();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main event loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    log::info!("Exiting sg-batches-tui");
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        // Apply completions that arrived since the last frame
        app.drain_events();

        // Render
        terminal.draw(|frame| views::render(&app.state, frame))?;

        // Check if we should quit
        if !app.state.running {
            break;
        }

        // Handle events
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }

    Ok(())
}
