//! Known persons dossier terminal.
//!
//! A menu-driven terminal interface for searching a case's person records.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line-oriented interface suitable for scripts
//! and automated testing:
//!
//! ```bash
//! echo "smith" | cargo run -p dossier -- --headless case.json
//! ```

mod app;
mod details;
mod events;
mod headless;
mod logging;
mod ui;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dossier_core::{Dataset, DatasetLoader, DossierConfig, SearchEngine};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info};

use app::{App, SessionInfo};
use events::{handle_event, EventResult};
use ui::render;

#[derive(Parser, Debug)]
#[command(name = "dossier", version, about = "Known persons dossier terminal")]
struct Cli {
    /// Datafiles to load; the first one sets the stage. Defaults to the
    /// configured default source.
    sources: Vec<PathBuf>,

    /// Run in headless mode (line protocol on stdin/stdout, no TUI)
    #[arg(long)]
    headless: bool,

    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match DossierConfig::discover(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init(config.log_file.as_deref(), cli.headless)?;

    let Some(dataset) = load_dataset(&config, &cli.sources, &mut io::stderr()) else {
        std::process::exit(1);
    };

    let session = SessionInfo {
        stage: dataset.stage(),
        stage_caption: dataset.stage_caption().map(str::to_string),
        legacy_cutoff: config.legacy_cutoff().map(str::to_string),
    };
    info!(
        stage = session.stage,
        caption = session.stage_caption.as_deref().unwrap_or(""),
        records = dataset.len(),
        "dataset ready"
    );
    let engine = SearchEngine::new(dataset.into_records(), config.search.clone());

    if cli.headless {
        let stdin = io::stdin();
        return headless::run_headless(&engine, &session, stdin.lock(), io::stdout())
            .map_err(|e| e.into());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!(records = engine.len(), "session started");

    // Run app
    let result = run_app(&mut terminal, App::new(&engine, session));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    info!("session ended");

    if let Err(e) = result {
        error!("{e}");
        eprintln!("Error: {e}");
    }

    Ok(())
}

/// Load the dataset, writing a one-line diagnostic to `err` on failure.
fn load_dataset<W: Write>(config: &DossierConfig, sources: &[PathBuf], err: &mut W) -> Option<Dataset> {
    match DatasetLoader::new(config).load(sources) {
        Ok(dataset) => Some(dataset),
        Err(e) => {
            // stderr may also carry the log in headless mode
            debug!(path = %e.path().display(), "{e}");
            writeln!(err, "{e}").ok();
            None
        }
    }
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App<'_>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, &app))?;

        // Poll with a timeout so message boxes can expire
        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            if handle_event(&mut app, ev) == EventResult::Quit {
                return Ok(());
            }
        } else {
            app.tick();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
