//! Headless mode for the site.
//!
//! This module provides a line-oriented interface for running the site
//! without a TUI. It's designed for scripted checks and automation.

use std::io::{self, BufRead, Write};

use site_core::headless::{HeadlessConfig, HeadlessSite};

/// Run the site in headless mode.
///
/// One command per input line; `help` lists them. Output lines are tagged
/// (`[ROUTE]`, `[CONSENT]`, `[BANNER]`, `[SETTINGS]`, `[ERROR]`, ...).
pub fn run_headless(config: HeadlessConfig) -> anyhow::Result<()> {
    let mut site = HeadlessSite::new(config)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    writeln!(stdout, "=== ARC Assessment Headless Mode ===")?;
    for line in site.execute_line("status").lines {
        writeln!(stdout, "{line}")?;
    }
    writeln!(stdout)?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = site.execute_line(line);
        for out in &reply.lines {
            writeln!(stdout, "{out}")?;
        }
        stdout.flush()?;

        if reply.quit {
            writeln!(stdout, "Auf Wiedersehen!")?;
            break;
        }
    }

    Ok(())
}
