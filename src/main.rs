//! Biométricos TUI - Terminal User Interface for biometric document verification
//!
//! A Ratatui-based verification page: folios, document images, question
//! groups and the response form, with a persisted draft and a confirmation
//! flow before submission.

mod app;
mod config;
mod mock_data;
mod platform;
mod state;
mod submission;
mod ui;

use anyhow::Result;
use app::App;
use config::{TuiConfig, STORE_PATH_ENV};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use state::{FormStorage, FormStore, JsonFileStorage, MemoryStorage};
use std::io;
use std::time::{Duration, Instant};
use submission::LogSubmissionSink;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = match TuiConfig::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "invalid config, using defaults");
            TuiConfig::default()
        }
    };
    let config_path = config::config_file();
    let store = FormStore::new(open_storage(&config));
    let sink = match &config.outbox_path {
        Some(path) => LogSubmissionSink::with_outbox(path),
        None => LogSubmissionSink::new(),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(config, config_path, store, Box::new(sink));
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

/// Log to a file in the data dir; stderr only when that fails
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "biometricos_tui=info".into());

    let log_file = config::log_file().and_then(|path| {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok()?;
        }
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });

    match log_file {
        Some(file) => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(file)),
            )
            .init(),
        None => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }
}

/// Persisted draft when a location is available, memory otherwise
fn open_storage(config: &TuiConfig) -> Box<dyn FormStorage> {
    let override_path = std::env::var(STORE_PATH_ENV).ok();
    let storage = match config.resolve_store_path(override_path) {
        Some(path) => Ok(JsonFileStorage::new(path)),
        None => JsonFileStorage::default_location(),
    };
    match storage {
        Ok(storage) => {
            tracing::info!(path = %storage.path().display(), "form store");
            Box::new(storage)
        }
        Err(err) => {
            tracing::warn!(error = %err, "no store location, draft will not persist");
            Box::new(MemoryStorage::default())
        }
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        let term_size = terminal.size()?;
        app.resize(term_size.width, term_size.height);

        let now = Instant::now();
        app.tick(now);

        // Draw the UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Faster polling while the tab cursor glides (16ms = ~60fps)
        let poll_duration = if app.is_animating(Instant::now()) {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };

        // Handle crossterm events
        if event::poll(poll_duration)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    // Global quit: Ctrl+C
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        return Ok(());
                    }
                    app.handle_key(key).await?;
                }
                Event::Mouse(mouse) => {
                    app.handle_mouse(mouse).await?;
                }
                Event::Resize(width, height) => {
                    app.resize(width, height);
                }
                _ => {}
            }
        }

        // Check if app wants to quit
        if app.should_quit() {
            return Ok(());
        }
    }
}
