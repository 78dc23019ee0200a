mod app;
mod config;
mod domain;
mod input;
mod notifications;
mod persistence;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use config::OrganiserConfig;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{schedule_lines, validate_sleep_hours, PhaseTimer, PlannerDocument};
use persistence::{ensure_data_dir, init_local_data_dir, load_document};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. ORGANISER_LOG=debug
const LOG_ENV: &str = "ORGANISER_LOG";

#[derive(Parser)]
#[command(name = "organiser")]
#[command(about = "A terminal planner: deadline countdown, module to-do lists, timetable, daily routine and Pomodoro", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .organiser directory in the current directory
    Init,
    /// Print the daily routine for a wake time
    Schedule {
        /// Wake time (HH:MM, 24-hour). Defaults to the stored wake time.
        #[arg(short, long)]
        wake: Option<String>,
        /// Hours of sleep, in [0, 24). Defaults to the configured value (7.5).
        #[arg(short, long, value_parser = parse_sleep_hours)]
        sleep_hours: Option<f64>,
    },
    /// Print the number of days left until the target date
    Countdown,
}

fn parse_sleep_hours(s: &str) -> Result<f64, String> {
    let hours: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    validate_sleep_hours(hours).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = OrganiserConfig::load()?;

    match cli.command {
        Some(Commands::Init) => {
            init_stderr_logging();
            let data_dir = init_local_data_dir()?;
            println!("Initialized organiser directory: {}", data_dir.display());
            println!();
            println!("Organiser will now use this local directory for its data.");
            println!("Run 'organiser' to start planning.");
            Ok(())
        }
        Some(Commands::Schedule { wake, sleep_hours }) => {
            init_stderr_logging();
            let wake = match wake {
                Some(wake) => wake,
                None => load_document(config.data_file_path()?)?.wake_time,
            };
            for line in schedule_lines(&wake, sleep_hours.unwrap_or(config.sleep_hours)) {
                println!("{}", line);
            }
            Ok(())
        }
        Some(Commands::Countdown) => {
            init_stderr_logging();
            let document = load_document(config.data_file_path()?)?;
            println!("{}", document.countdown_line(chrono::Local::now().naive_local()));
            Ok(())
        }
        None => run_tui(config),
    }
}

/// CLI subcommands log warnings to stderr
fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

/// The TUI owns the terminal, so logs go to organiser.log in the data directory
fn init_file_logging() -> Result<()> {
    let log_dir = ensure_data_dir()?;
    let appender = tracing_appender::rolling::never(&log_dir, "organiser.log");
    tracing_subscriber::fmt()
        .with_writer(appender)
        .with_ansi(false)
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    Ok(())
}

fn build_timer(config: &OrganiserConfig) -> PhaseTimer {
    match config.pomodoro.durations() {
        Ok(durations) => PhaseTimer::with_durations(durations),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring [pomodoro] config, using default durations");
            PhaseTimer::new()
        }
    }
}

fn load_planner(config: &OrganiserConfig) -> Result<(PlannerDocument, std::path::PathBuf)> {
    let data_path = config.data_file_path()?;
    let document = load_document(&data_path)
        .with_context(|| format!("Failed to load planner data from {}", data_path.display()))?;
    Ok((document, data_path))
}

fn run_tui(config: OrganiserConfig) -> Result<()> {
    init_file_logging()?;

    let (document, data_path) = load_planner(&config)?;
    eprintln!("Using planner data: {}", data_path.display());
    tracing::info!(path = %data_path.display(), "organiser starting");

    // Create app state
    let mut app = AppState::new(document, data_path, build_timer(&config), config.sleep_hours);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app, &config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Save on exit
    if let Err(e) = app.save() {
        tracing::error!(error = %e, "final save failed");
        eprintln!("Error saving planner data: {}", e);
    }

    if let Err(err) = result {
        tracing::error!(error = %err, "organiser exited with error");
        eprintln!("Error: {}", err);
    }

    tracing::info!("organiser shut down");
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    config: &OrganiserConfig,
) -> Result<()> {
    let tick_rate = config.tick_duration();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        // Drive the Pomodoro countdown
        app.tick(Instant::now());

        // Every mutation rewrites the document
        if app.needs_save {
            app.save()?;
        }
    }
}
