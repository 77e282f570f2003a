use anyhow::{Context, Result};
use kube_query::{config, server};
use std::{
    fs::{File, OpenOptions},
    path::Path,
    sync::Arc,
};
use tracing::{Subscriber, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Accepts a bare level ("debug") or full directives ("kube_query=debug,tower_http=info").
fn log_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).with_context(|| {
        format!(
            "Invalid log filter: '{}'. Use a level (error, warn, info, debug, trace) or target=level directives",
            directives
        )
    })
}

/// JSON lines on stdout and in `file`.
fn subscriber(filter: EnvFilter, file: File) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json())
        .with(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(Arc::new(file)),
        )
}

/// Logs go to stdout and are appended to `log_file`.
fn init_tracing(filter: EnvFilter, log_file: &str) -> Result<()> {
    let path = Path::new(log_file);
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    subscriber(filter, file).init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Determine log level: environment variable overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.server.logs.level.clone());

    let filter = match log_filter(&log_level) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    };

    init_tracing(filter, &config.server.logs.file)?;

    info!("Starting kube-query server with log level: {}", log_level);
    info!("Configuration loaded successfully");

    server::run(config).await?;

    Ok(())
}
