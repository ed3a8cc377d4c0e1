//! status-responder entry point.
//!
//! Parses command line flags, loads the optional TOML configuration, initializes
//! tracing, builds the Axum router around the responder, and starts the HTTP
//! server.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use status_responder::config::{AppConfig, ReadErrorPolicy, DEFAULT_LOG_FILTER, RESULT_FILE_HELP};
use status_responder::http::start_server;
use status_responder::routes::create_router;
use status_responder::state::AppState;

/// Serves a result file as a response to queries. Useful for assembling a
/// custom healthcheck as a sidecar.
#[derive(Parser, Debug)]
#[command(name = "status-responder", version, about)]
struct Args {
    /// Address to bind the healthcheck response to (default: ":8080")
    #[arg(long, alias = "bindAddr", value_name = "ADDR")]
    bind_addr: Option<String>,

    #[arg(long, alias = "resultFile", value_name = "PATH", help = RESULT_FILE_HELP)]
    result_file: Option<String>,

    /// What to do when the result file cannot be read
    #[arg(long, value_enum, value_name = "POLICY")]
    on_read_error: Option<ReadErrorPolicy>,

    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Log level filter (e.g., "status_responder=debug")
    #[arg(short, long)]
    log_level: Option<String>,
}

impl Args {
    /// Load the configuration file (if any) and apply flag overrides.
    fn into_config(self) -> Result<(AppConfig, Option<String>), Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        if let Some(bind_addr) = self.bind_addr {
            config.http.bind_addr = bind_addr;
        }
        if let Some(result_file) = self.result_file {
            config.result.path = result_file;
        }
        if let Some(policy) = self.on_read_error {
            config.result.on_read_error = policy;
        }
        config.validate()?;

        Ok((config, self.log_level))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let (config, log_level) = args.into_config()?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::debug!(?config, "Loaded configuration");

    let state = AppState::new(&config.result);
    let app = create_router(state);

    start_server(app, &config).await?;

    Ok(())
}
