//! sprintboard - a terminal daily-work board.
//!
//! This is the main binary that launches the TUI application.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{Context, anyhow};
use sprintboard_client::{BacklogLookup, HttpBacklogSource, StaticBacklogSource};
use sprintboard_config::{Config, LogConfig};
use sprintboard_protocol::dummy::dummy_daily_work;
use sprintboard_tui::{App, terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Sends log events to the configured file; `RUST_LOG` overrides the level.
fn init_logging(log: &LogConfig) -> anyhow::Result<()> {
    let path = log.file_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log.level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;
    init_logging(&config.log)?;

    let lookup = if config.has_server() {
        let source = HttpBacklogSource::from_config(&config.server)?;
        info!(url = source.products_url(), "using backlog server");
        BacklogLookup::new(source, config.cache.ttl())
    } else {
        info!("no backlog server configured, using demo data");
        BacklogLookup::new(StaticBacklogSource::demo(), config.cache.ttl())
    };
    let work = dummy_daily_work().with_view_type(config.daily_work.view_type);

    // Install panic hook to restore terminal on panic
    terminal::install_panic_hook();
    let mut terminal = terminal::setup_terminal()?;

    let mut app = App::new(work, &config, lookup);
    let result = app.run(&mut terminal).await;

    // Always restore terminal, even if app.run() failed
    terminal::restore_terminal(&mut terminal)?;

    result
}
