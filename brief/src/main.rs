//! brief - daily brief CLI
//!
//! Thin presentation layer over the dailybrief controller.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use dailybrief::cli::{Cli, Command};
use dailybrief::{
    BriefController, Config, ConnectionReport, ConnectionResolver, ControllerState, Difficulty, Phase,
    ReqwestTransport, RequestClient,
};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dailybrief")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level).map(|s| s.to_uppercase()) {
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("brief.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    info!(mode = %config.mode, "brief loaded config");

    let transport = Arc::new(ReqwestTransport::new(config.request_timeout())?);
    let resolver = Arc::new(
        ConnectionResolver::new(config.resolver_settings(), transport.clone())
            .context("Failed to start the connection layer")?,
    );
    let client = RequestClient::new(resolver, transport);

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command.unwrap_or(Command::Show) {
        Command::Show => cmd_show(client, &config).await,
        Command::Done => cmd_done(client, &config).await,
        Command::Skip => cmd_skip(client, &config).await,
        Command::Connect { port } => {
            print_report(&client.connect_port(port).await);
            Ok(())
        }
        Command::Detect => {
            print_report(&client.auto_detect().await);
            Ok(())
        }
        Command::Status => {
            print_report(&client.test_connection().await);
            Ok(())
        }
    }
}

async fn cmd_show(client: RequestClient, config: &Config) -> Result<()> {
    let controller = BriefController::new(client, config.skip_reload_delay());
    controller.load().await.context("Failed to load task")?;
    render(&controller.snapshot().await);
    Ok(())
}

async fn cmd_done(client: RequestClient, config: &Config) -> Result<()> {
    let controller = BriefController::new(client, config.skip_reload_delay());
    controller.load().await.context("Failed to load task")?;

    let outcome = controller.mark_done().await.context("Failed to mark as done")?;
    if outcome.applied {
        println!("{} Task completed! Streak: {}", "✓".green(), outcome.streak.to_string().yellow());
    } else {
        println!("Already done today. Streak: {}", outcome.streak.to_string().yellow());
    }
    render(&controller.snapshot().await);
    Ok(())
}

async fn cmd_skip(client: RequestClient, config: &Config) -> Result<()> {
    let controller = BriefController::new(client, config.skip_reload_delay());
    controller.load().await.context("Failed to load task")?;

    let outcome = controller.skip().await.context("Failed to skip task")?;
    if outcome.applied {
        println!("{} Task skipped, loading new task...", "⏭".cyan());
        controller.settle().await;
    } else {
        println!("Already done today, nothing to skip.");
    }
    render(&controller.snapshot().await);
    controller.dispose().await;
    Ok(())
}

fn render(state: &ControllerState) {
    if let Some(error) = &state.error {
        println!("{} {}", "Error:".red().bold(), error);
    }

    match &state.brief {
        Some(brief) => {
            let badge = match brief.difficulty {
                Difficulty::Easy => brief.difficulty.to_string().green(),
                Difficulty::Normal => brief.difficulty.to_string().yellow(),
                Difficulty::Hard => brief.difficulty.to_string().red(),
            };
            let text = if state.is_done() {
                brief.text.strikethrough().dimmed()
            } else {
                brief.text.bold()
            };
            println!("[{}] {}", badge, text);
        }
        None => println!("No task available"),
    }

    let status = match state.phase {
        Phase::DoneTerminal => "Completed".green(),
        Phase::Failed => "Unavailable".red(),
        _ => "Open".normal(),
    };
    println!("Streak: {}  Status: {}", state.streak.to_string().yellow(), status);
}

fn print_report(report: &ConnectionReport) {
    match (report.success, &report.url, &report.error) {
        (true, Some(url), _) => println!("{} Connected to {}", "✓".green(), url.cyan()),
        (_, _, Some(error)) => println!("{} {}", "✗".red(), error),
        _ => println!("{} Connection state unknown", "?".yellow()),
    }
}
