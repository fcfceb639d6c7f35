mod app;
mod domain;
mod input;
mod logging;
mod persistence;
mod report;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::{AppState, Clock};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, DisableFocusChange, EnableFocusChange, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{AppActivity, CategoryList, Period};
use logging::{init_logging, LogTarget};
use persistence::{
    get_data_dir, init_local_dir, load_settings, log_file, save_settings, settings_file, FileStore,
    CATEGORIES, SESSIONS,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use report::{format_duration, saturating_sum, CategoryFilter, ReportView};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "odak")]
#[command(about = "A terminal focus timer that tracks distractions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .odak directory in the current directory
    Init,
    /// Write a markdown report of recent focus sessions
    Report {
        /// Report window: weekly or monthly
        #[arg(short, long, default_value = "weekly")]
        period: String,
        /// Last day of the window (YYYY-MM-DD format). Defaults to today.
        #[arg(short, long)]
        date: Option<String>,
        /// Output file path. Defaults to <data dir>/report-YYYY-MM-DD.md
        #[arg(short, long)]
        output: Option<String>,
    },
    /// List recorded sessions, newest first
    Sessions {
        /// Only show sessions in this category
        #[arg(short, long)]
        category: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            init_logging(LogTarget::Stderr)?;
            let data_dir = init_local_dir()?;
            println!("Initialized odak directory: {}", data_dir.display());
            println!();
            println!("Sessions, tasks and settings will now be stored here.");
            println!("Run 'odak' to start a focus session.");
            Ok(())
        }
        Some(Commands::Report { period, date, output }) => {
            init_logging(LogTarget::Stderr)?;
            let period = Period::from_tag(&period)
                .with_context(|| format!("Unknown period '{}'. Use weekly or monthly", period))?;

            let report_date = match date {
                Some(date_str) => Some(
                    chrono::NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                        .map_err(|e| anyhow::anyhow!("Invalid date format. Use YYYY-MM-DD: {}", e))?,
                ),
                None => None,
            };

            let store = FileStore::open_default()?;
            let report_path =
                report::generate_report(&store, period, report_date, output.map(PathBuf::from))?;
            println!("Report generated: {}", report_path.display());
            Ok(())
        }
        Some(Commands::Sessions { category }) => {
            init_logging(LogTarget::Stderr)?;
            print_sessions(category)
        }
        None => run_tui(),
    }
}

fn print_sessions(category: Option<String>) -> Result<()> {
    let store = FileStore::open_default()?;
    let records = SESSIONS.load(&store)?;
    let categories = CategoryList::from_stored(CATEGORIES.load(&store)?);

    let mut view = ReportView::default();
    if let Some(name) = category {
        if !categories.contains(&name) {
            log::warn!("'{}' is not a known category", name);
        }
        view.set_category_filter(CategoryFilter::Only(name));
    }
    let report = view.build(&records, &categories, chrono::Local::now().date_naive());

    if report.sessions.is_empty() {
        println!("No sessions recorded.");
        return Ok(());
    }

    for record in &report.sessions {
        let task = record
            .linked_task_name
            .as_deref()
            .map(|name| format!(" → {}", name))
            .unwrap_or_default();
        let time = record
            .ended_at()
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".to_string());
        println!(
            "{} {}  {}{}  {} / {}  {}  {} distractions",
            record.date,
            time,
            record.category,
            task,
            format_duration(record.actual_seconds),
            format_duration(record.target_seconds),
            record.end_reason.to_tag(),
            record.distraction_count
        );
    }
    println!();
    println!(
        "{} sessions, {} total",
        report.sessions.len(),
        format_duration(saturating_sum(report.sessions.iter().map(|r| r.actual_seconds)))
    );
    Ok(())
}

fn run_tui() -> Result<()> {
    let log_path = log_file()?;
    init_logging(LogTarget::File(&log_path))?;

    // Show which directory we're using
    let data_dir = get_data_dir()?;
    eprintln!("Using odak directory: {}", data_dir.display());
    log::info!("Starting odak in {}", data_dir.display());

    let settings_path = settings_file()?;
    let settings = load_settings(&settings_path);
    let store = FileStore::open_default()?;
    let mut app = AppState::new(Box::new(store), &settings);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableFocusChange, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Quitting mid-session drops the session without a record
    app.shutdown();

    if let Err(e) = save_settings(&settings_path, &app.settings()) {
        log::error!("Error saving settings: {:#}", e);
        eprintln!("Error saving settings: {}", e);
    }

    // Print any errors
    if let Err(err) = result {
        log::error!("{:#}", err);
        eprintln!("Error: {}", err);
    }

    log::info!("odak stopped");
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            match event::read()? {
                // Only process key press events (ignore key release)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if input::handle_key(app, key)? {
                        return Ok(());
                    }
                }
                Event::FocusLost => app.set_activity(AppActivity::Background),
                Event::FocusGained => app.set_activity(AppActivity::Active),
                _ => {}
            }
        }

        // Deliver countdown ticks
        app.poll(Clock::now());
    }
}
