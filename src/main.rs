// Copyright (c) 2025 TrustLock. All rights reserved.

mod auditor;
mod backend;
mod config;
mod consts;
mod environment;
mod logging;
mod models;
mod poller;
mod severity;
mod ui;
mod updates;

use crate::backend::{AnalysisBackend, BackendClient};
use crate::config::{Config, get_config_path, load_or_create};
use crate::consts::cli_consts::UPDATE_QUEUE_SIZE;
use crate::environment::Environment;
use crate::models::AuditReport;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::{error::Error, io};
use tokio::sync::{broadcast, mpsc};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Launch the interactive security-operations dashboard.
    Start {
        /// Backend origin override, e.g. http://localhost:8000
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,

        /// Disable the dashboard background fill (for light terminals).
        #[arg(long)]
        no_background_color: bool,
    },
    /// Analyze a source snippet without launching the dashboard.
    Analyze {
        /// File to read the snippet from; reads stdin when omitted.
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,

        /// Backend origin override, e.g. http://localhost:8000
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,
    },
    /// Check that the analysis backend is reachable.
    Health {
        /// Backend origin override, e.g. http://localhost:8000
        #[arg(long, value_name = "URL")]
        api_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config_path = get_config_path()?;
    let config = load_or_create(&config_path)?;

    match args.command {
        Command::Start {
            api_url,
            no_background_color,
        } => {
            let environment = resolve_environment(api_url, &config);
            let client = BackendClient::new(environment, config.client_id.clone())?;
            start(client, !no_background_color).await
        }
        Command::Analyze { file, api_url } => {
            let environment = resolve_environment(api_url, &config);
            let client = BackendClient::new(environment, config.client_id.clone())?;
            analyze(&client, file).await
        }
        Command::Health { api_url } => {
            let environment = resolve_environment(api_url, &config);
            let client = BackendClient::new(environment.clone(), config.client_id.clone())?;
            match client.health().await {
                Ok(health) => {
                    println!(
                        "Backend {} is {} ({} mode: {})",
                        environment.api_base_url(),
                        health.status,
                        health.system,
                        health.mode
                    );
                    Ok(())
                }
                Err(e) => {
                    eprintln!(
                        "Backend {} is unreachable: {}",
                        environment.api_base_url(),
                        e
                    );
                    Err(e.into())
                }
            }
        }
    }
}

/// Pick the backend to talk to: `--api-url` wins, then `TRUSTLOCK_ENVIRONMENT`,
/// then the environment stored in the config file.
fn resolve_environment(api_url: Option<String>, config: &Config) -> Environment {
    if let Some(api_base_url) = api_url {
        return Environment::Custom { api_base_url };
    }
    if let Ok(name) = std::env::var("TRUSTLOCK_ENVIRONMENT") {
        if let Ok(environment) = name.parse::<Environment>() {
            return environment;
        }
    }
    config.stored_environment().unwrap_or_default()
}

/// Starts the interactive dashboard.
///
/// # Arguments
/// * `client` - HTTP client for the analysis service.
/// * `with_background_color` - Whether to paint the dashboard background.
async fn start(client: BackendClient, with_background_color: bool) -> Result<(), Box<dyn Error>> {
    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Initialize the terminal with Crossterm backend.
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    // Channels between the poller/auditor tasks and the UI loop.
    let (update_sender, update_receiver) = mpsc::channel(UPDATE_QUEUE_SIZE);
    let (shutdown_sender, _) = broadcast::channel(1);

    let backend: Arc<dyn AnalysisBackend> = Arc::new(client);
    let _join_handles =
        poller::start_pollers(backend.clone(), update_sender.clone(), &shutdown_sender);

    let app = ui::App::new(
        backend,
        update_receiver,
        update_sender,
        shutdown_sender.clone(),
        with_background_color,
    );
    let res = ui::run(&mut terminal, app).await;

    // Clean up the terminal after running the application.
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Stop the pollers even if the UI loop exited on an error path.
    let _ = shutdown_sender.send(());

    res?;
    Ok(())
}

/// Run one headless analysis round-trip and print the report.
async fn analyze(client: &BackendClient, file: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let code = match file {
        Some(path) => std::fs::read_to_string(&path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    if code.trim().is_empty() {
        return Err(Box::from(
            "No code provided. Pass --file or pipe a snippet on stdin.",
        ));
    }

    let report = client.analyze_code(&code).await?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &AuditReport) {
    let verdict = if severity::audit_is_danger(report.vulnerability_score) {
        "DANGER"
    } else {
        "SAFE"
    };
    println!(
        "Vulnerability score: {}/100 [{}]",
        report.vulnerability_score, verdict
    );
    println!(
        "Files analyzed: {} | Vulnerabilities found: {}",
        report.files_analyzed, report.vulnerabilities_found
    );

    if report.owasp_top_10.is_empty() {
        println!("Code passed all security checks.");
    } else {
        println!("Findings:");
        for finding in &report.owasp_top_10 {
            println!("  - {finding}");
        }
    }

    if let Some(rewrite) = &report.secure_rewrite_suggestion {
        println!();
        println!("Suggested rewrite:");
        println!("{rewrite}");
    }
}
