//! Running the CLI

// Allow exits because in this file we ideally handle all errors with known exit codes
#![allow(clippy::exit)]

use crate::config::Config;
use crate::server::app::serve;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Savepoint serves guestbook entries and projects from Notion.
/// Credentials are read from the environment or a `.env` file.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Port on which to serve the API.
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    port: u16,
    /// Address to bind to.
    #[arg(short, long, default_value_t = String::from("0.0.0.0"))]
    bind: String,
}

/// Log filter used when the filter variable is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "info";

/// Read the log filter from the environment variable `var`.
fn env_filter(var: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Log to stdout, filtered by `RUST_LOG` and defaulting to `info`.
///
/// Must run after `.env` is loaded so a `RUST_LOG` set there applies.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(EnvFilter::DEFAULT_ENV))
        .init();
}

/// Main entrypoint to application
///
/// # Errors
/// Errors if the server cannot bind or stops with an IO error.
pub fn run() -> std::io::Result<()> {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    init_tracing();
    tracing::debug!("Starting application");
    if !dotenv_loaded {
        tracing::warn!(".env file not found, using environment variables");
    }
    let cli = Cli::parse();
    let config = Config::from_env().unwrap_or_else(|err| {
        tracing::error!("error: {err}");
        std::process::exit(1);
    });
    serve(config, &cli.bind, cli.port)
}
