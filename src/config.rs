//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "focus-timer")]
#[command(about = "A task-tagged focus countdown timer for the terminal")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Task suggestion offered under the task field (repeatable)
    #[arg(
        long = "suggest",
        value_name = "TASK",
        default_values_t = [
            "Project 1".to_string(),
            "Project 2".to_string(),
            "Project 3".to_string(),
        ]
    )]
    pub suggestions: Vec<String>,

    /// Write tracing output to this file (the terminal itself is owned by the UI)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
