//! Interactive console for the Employee Performance Management backend
//!
//! Run: cargo run -p perf-console
//!
//! Environment:
//! - PERF_API_URL: backend base URL (default http://localhost:8080)
//! - PERF_DATA_DIR: directory for the persisted session (default ./.perf-console)

mod app;
mod cmd;
mod msg;
mod ui;
mod views;

use anyhow::Result;
use app::App;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use perf_client::{ClientConfig, HttpClient, SessionContext, SessionStorage};
use ratatui::prelude::*;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Route tracing into the in-app log pane
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(tui_logger::tracing_subscriber_layer())
        .with(env_filter)
        .init();
    tui_logger::init_logger(log::LevelFilter::Info).ok();
    tui_logger::set_default_level(log::LevelFilter::Info);

    let base_url =
        std::env::var("PERF_API_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let data_dir =
        std::env::var("PERF_DATA_DIR").unwrap_or_else(|_| "./.perf-console".to_string());

    let client = ClientConfig::new(&base_url).build_http_client();

    // Restore a stored identity, if any; it is trusted until a request fails
    let mut session = SessionContext::new(SessionStorage::new(&data_dir));
    if session.restore() {
        tracing::info!("Restored session from {}", data_dir);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session);
    let result = run_app(&mut terminal, &mut app, client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    client: HttpClient,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    for command in app.initial_cmds() {
        cmd::execute(command, &client, &tx);
    }

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if app.should_quit {
            return Ok(());
        }

        // Input is never locked while a request is pending; further
        // actions may be triggered mid-flight.
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    for command in app.on_key(key) {
                        cmd::execute(command, &client, &tx);
                    }
                }
            }
        }

        // Apply every completion that arrived while we were drawing
        while let Ok(net) = rx.try_recv() {
            for command in app.on_net(net) {
                cmd::execute(command, &client, &tx);
            }
        }

        app.tick(Instant::now());
    }
}
