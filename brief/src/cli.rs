//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Mode;

/// brief - today's task, one command away
#[derive(Parser)]
#[command(
    name = "brief",
    about = "Show today's brief, mark it done or skip it",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Address resolution mode, overrides the config file
    #[arg(short, long, global = true, value_parser = parse_mode)]
    pub mode: Option<Mode>,

    /// Subcommand to execute (defaults to `show`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

fn parse_mode(s: &str) -> Result<Mode, String> {
    s.parse()
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show today's brief and streak
    Show,

    /// Mark today's brief done
    Done,

    /// Skip today's brief and show the next one
    Skip,

    /// Use a backend on a specific local port (verified before use)
    Connect {
        /// Port the backend listens on
        port: u16,
    },

    /// Forget the current backend and auto-detect again
    Detect,

    /// Check the backend connection
    Status,
}
