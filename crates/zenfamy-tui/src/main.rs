//! Zenfamy TUI - a terminal client for the Zenfamy account service.
//!
//! Signs a user in, keeps the session across restarts and shows the
//! account profile with inline editing of the personal fields.

mod app;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use zenfamy_core::utils::mask_token;
use zenfamy_core::{Config, Route};

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file written while the TUI owns the terminal
const LOG_FILE_NAME: &str = "zenfamy.log";

const USAGE: &str = "\
Usage: zenfamy [OPTION]

With no option, starts the terminal interface.

Options:
  --status   Show whether a session is stored
  --login    Log in on the terminal
  --logout   Clear the stored session
  --whoami   Fetch the current user and print it as JSON
  --help     Show this message";

fn env_filter() -> EnvFilter {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Log to stderr; used by the one-shot CLI commands
fn init_tracing_stderr() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter())
        .init();
}

/// Log to a file in the data directory so output does not corrupt the screen.
///
/// The returned guard flushes the writer on drop and must outlive the UI.
fn init_tracing_file() -> Option<WorkerGuard> {
    let dir = Config::default().data_dir().ok()?;
    if std::fs::create_dir_all(&dir).is_err() {
        return None;
    }

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(env_filter())
        .init();
    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    // Check for CLI commands
    let args: Vec<String> = std::env::args().collect();
    if let Some(flag) = args.get(1) {
        init_tracing_stderr();
        return run_command(flag).await;
    }

    // Initialize logging
    let _log_guard = init_tracing_file();
    info!("Zenfamy TUI starting");

    // Create app before touching the terminal so setup errors print normally
    let mut app = App::new()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // A stored session goes straight to the profile
    if app.route == Route::Profile {
        app.navigate(Route::Profile).await;
    } else {
        app.start_login();
    }

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("Zenfamy TUI shutting down");
    Ok(())
}

/// Run a one-shot command given on the command line
async fn run_command(flag: &str) -> Result<()> {
    match flag {
        "--help" | "-h" => {
            println!("{}", USAGE);
            Ok(())
        }
        "--status" => {
            let app = App::new()?;
            match app.session.check_session() {
                Some(session) => {
                    println!(
                        "Signed in as {}",
                        session.identity.as_deref().unwrap_or("unknown user")
                    );
                    println!("Token: {}", mask_token(&session.access_token));
                }
                None => println!("Not signed in"),
            }
            Ok(())
        }
        "--login" => {
            let mut app = App::new()?;
            app.login_interactive().await
        }
        "--logout" => {
            let mut app = App::new()?;
            app.session.logout();
            println!("Logged out");
            Ok(())
        }
        "--whoami" => {
            let app = App::new()?;
            if !app.session.is_authenticated() {
                anyhow::bail!("Not signed in. Run `zenfamy --login` first.");
            }
            let profile = zenfamy_core::profile::load_profile(&app.session).await?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
            Ok(())
        }
        other => {
            eprintln!("Unknown option: {}\n", other);
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                // Handle input
                if handle_input(app, key).await? {
                    return Ok(());
                }
            }
        }

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
