// ghpm: GitHub branch pruning TUI
// Picks owner -> repository -> branch, then deletes the branch or runs it
// through PR create/merge, all via the gh and git CLIs.

mod action;
mod app;
mod config;
mod event;
mod gh;
mod git;
mod logger;
mod model;
mod pipeline;
mod runner;
mod tui;
mod ui;
mod workspace;

use anyhow::{Context, Result};
use app::App;

fn main() -> Result<()> {
    if let Some(path) = logger::init(&workspace::default_cache_root()) {
        log::info!("ghpm {} starting, logging to {}", env!("CARGO_PKG_VERSION"), path.display());
    }

    let mut terminal = tui::init().context("terminal init failed")?;

    let result = run(&mut terminal);

    // Always restore terminal, even on error
    let _ = tui::restore(&mut terminal);

    if let Err(e) = &result {
        log::error!("exiting with error: {:#}", e);
    }
    result
}

fn run(terminal: &mut tui::Tui) -> Result<()> {
    let mut app = App::new();
    app.run(terminal)
}
