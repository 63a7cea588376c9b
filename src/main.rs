//! Focus Timer - a task-tagged countdown timer for the terminal
//!
//! This is the main entry point for the focus-timer application.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use focus_timer::{app::App, config::Config, state::AppState, tasks::countdown_timer_task};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    init_logging(&config)?;

    info!("Starting focus-timer v0.1.0");
    info!(
        "Configuration: suggestions={:?}, log_file={:?}",
        config.suggestions, config.log_file
    );

    // Create application state shared by the UI loop and the tick task
    let state = Arc::new(AppState::new());

    // Start the countdown tick background task
    let timer_state = Arc::clone(&state);
    tokio::spawn(async move {
        countdown_timer_task(timer_state).await;
    });

    // Run the terminal UI until quit, interrupt signal, or error
    let mut app = App::new(state, &config);
    app.run().await?;

    info!("focus-timer shutdown complete");
    Ok(())
}

/// Route tracing to the configured log file; without one, logging stays off
/// because the terminal itself is owned by the UI.
fn init_logging(config: &Config) -> anyhow::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(format!("focus_timer={}", config.log_level()))
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
