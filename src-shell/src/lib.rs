//! Guacagui - headless front end
//!
//! Reads one command per line on stdin and answers each with a JSON line on
//! stdout. Diagnostics go to stderr.

mod commands;
mod state;

use std::io::{self, BufRead, Write};

use commands::Outcome;
use state::AppState;

pub fn run(debug: bool) -> anyhow::Result<()> {
    guacagui_core::init_logging(debug);

    let mut state = AppState::new();
    state.initialize();

    tracing::info!("Guacagui started");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match commands::handle_line(&mut state, &line) {
            Outcome::Reply(reply) => {
                writeln!(stdout, "{}", reply)?;
                stdout.flush()?;
            }
            Outcome::Quit => break,
        }
    }

    tracing::info!("Guacagui stopped");

    Ok(())
}
