//! ARC Assessment terminal site.
//!
//! Renders the Strachwitz Consulting ARC Assessment pages with the cookie
//! consent banner and settings panel in a terminal.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line-oriented interface suitable for scripted checks:
//!
//! ```bash
//! printf 'accept-all\ngo /Cookies\nstatus\n' | arc-site --headless --ephemeral
//! ```

mod app;
mod args;
mod events;
mod headless;
mod logging;
mod ui;

use anyhow::Context;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, stdout};
use std::time::Duration;

use site_core::{HeadlessConfig, SiteConfig};

use app::App;
use args::{parse_args, print_help};
use events::{handle_event, EventResult};
use ui::render::render;

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    let cli = parse_args(&args, SiteConfig::from_env())?;

    if cli.help {
        print_help();
        return Ok(());
    }

    if cli.headless {
        logging::init_stderr_logging()?;
        return headless::run_headless(HeadlessConfig::from(cli.config));
    }

    // The screen belongs to the UI; logs go to a file.
    let log_dir = if cli.config.ephemeral {
        std::env::temp_dir()
    } else {
        cli.config.storage_dir.clone()
    };
    let log_path = logging::init_file_logging(&log_dir)?;

    let shell = cli.config.build_shell().context("building site")?;
    tracing::info!(log = %log_path.display(), "starting terminal UI");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, App::new(shell));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        tracing::error!(error = %e, "terminal UI failed");
        eprintln!("Error: {e}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    loop {
        let size = terminal.size()?;
        app.resize(Rect::new(0, 0, size.width, size.height));

        // Render
        terminal.draw(|f| render(f, &app))?;

        // Poll for events with timeout for animations
        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            match handle_event(&mut app, ev) {
                EventResult::Quit => return Ok(()),
                EventResult::NeedsRedraw | EventResult::Continue => {}
            }
        } else {
            // Tick animations
            app.tick();
        }
    }
}
