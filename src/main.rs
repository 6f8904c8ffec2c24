// Veil - PII Anonymization Service
// Copyright (c) 2025 Veil Contributors
// Licensed under the MIT License

use std::process;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use veil::anonymization::EngineContext;
use veil::config::{load_config, load_default_config, VeilConfig};
use veil::logging::init_logging;
use veil::server::build_app;

/// PII anonymization HTTP service
#[derive(Parser)]
#[command(name = "veil", version, about)]
struct Cli {
    /// Path to the TOML configuration file (defaults apply when omitted)
    #[arg(short, long, env = "VEIL_CONFIG")]
    config: Option<String>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match load_configuration(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(2);
        }
    };

    let log_level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    let _logging_guard = match init_logging(log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Veil - PII Anonymization Service"
    );

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server exited with error");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn load_configuration(cli: &Cli) -> veil::domain::Result<VeilConfig> {
    match cli.config.as_deref() {
        Some(path) => load_config(path),
        None => load_default_config(),
    }
}

async fn run(config: VeilConfig) -> anyhow::Result<()> {
    let engines = Arc::new(EngineContext::initialize(&config.anonymization)?);
    let app = build_app(&config, engines);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves when SIGINT or SIGTERM arrives; in-flight requests drain before
/// the server exits
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create SIGTERM handler");
                return;
            }
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received SIGINT (Ctrl+C), initiating graceful shutdown...");
            }
            _ = sigterm.recv() => {
                tracing::info!("Received SIGTERM, initiating graceful shutdown...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        } else {
            tracing::info!("Received SIGINT (Ctrl+C), initiating graceful shutdown...");
        }
    }
}
