//! Coincast TUI — type a coin symbol, press Enter, read the 1-24 hour tables.
//!
//! Usage: `coincast-tui [CONFIG.toml]`. Set `COINCAST_LOG=<file>` to write
//! logs to a file (the terminal itself is owned by the UI).

use std::fs::File;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use coincast_core::{CoincastConfig, Pipeline};
use coincast_tui::{input, ui, AppState};

fn main() -> Result<()> {
    init_logging()?;

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => CoincastConfig::from_file(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => CoincastConfig::default(),
    };
    let pipeline = Pipeline::from_config(&config)?;

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut app = AppState::new(PathBuf::from("."));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app, &pipeline);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os("COINCAST_LOG") else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("failed to open log file {}", PathBuf::from(&path).display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    pipeline: &Pipeline,
) -> Result<()> {
    loop {
        // 1. Render (shows "Fetching..." before a queued run blocks)
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Run a queued forecast, then redraw with its result
        if app.pending_run.is_some() {
            app.run_pending(pipeline);
            continue;
        }

        // 3. Poll for input events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
