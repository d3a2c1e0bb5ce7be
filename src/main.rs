use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use miette::{IntoDiagnostic, WrapErr};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use gasify::config::AppConfig;
use gasify::tui::app::AppState;
use gasify::tui::services::Services;

#[tokio::main]
async fn main() -> miette::Result<()> {
    let loaded = AppConfig::load();

    // Initialize logging
    let _log_guard = gasify::core::logging::init_tui(&loaded.config.log_dir());
    log::info!("{} v{} starting", gasify::NAME, gasify::VERSION);
    loaded.report();
    let config = loaded.config;

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let services = Services::init(&config, event_tx)
        .into_diagnostic()
        .wrap_err("failed to build the analytics client")?;

    // Setup terminal
    enable_raw_mode().into_diagnostic()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).into_diagnostic()?;
    if config.tui.mouse_enabled {
        execute!(stdout, EnableMouseCapture).into_diagnostic()?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).into_diagnostic()?;

    let mut app = AppState::new(event_rx, services);
    let result = app.run(&mut terminal, config.tick_rate()).await;

    // Restore terminal
    disable_raw_mode().into_diagnostic()?;
    if config.tui.mouse_enabled {
        execute!(terminal.backend_mut(), DisableMouseCapture).into_diagnostic()?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen).into_diagnostic()?;
    terminal.show_cursor().into_diagnostic()?;

    log::info!("{} exiting", gasify::NAME);
    result.into_diagnostic().wrap_err("terminal I/O failed")
}
