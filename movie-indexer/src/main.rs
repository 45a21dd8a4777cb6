//! Movie Indexer Main Entry Point
//!
//! Serves the reindex and search endpoints over HTTP.

use dotenv::dotenv;
use movie_indexer::{create_app, run_server, telemetry, Dependencies, IndexingError, Settings};
use std::env;
use std::net::SocketAddr;
use std::path::Path;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str =
    "movie_indexer=info,movie_indexer_repository=info,movie_source=info,tower_http=info";

/// Initialize tracing/logging.
///
/// The returned guard keeps the optional log file writer alive.
fn init_tracing() -> Result<Option<WorkerGuard>, IndexingError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let json_logs = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let (file_layer, guard) = match env::var(telemetry::LOG_FILE_ENV) {
        Ok(path) if !path.trim().is_empty() => {
            let (writer, guard) = telemetry::file_writer(Path::new(path.trim()))?;
            (Some(telemetry::file_layer(writer)), Some(guard))
        }
        _ => (None, None),
    };
    let logging_to_file = guard.is_some();

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .init();

        info!(
            service_name = "movie-indexer",
            service_version = env!("CARGO_PKG_VERSION"),
            log_file = logging_to_file,
            "Tracing initialized with JSON format"
        );
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .init();

        info!(
            service_name = "movie-indexer",
            service_version = env!("CARGO_PKG_VERSION"),
            log_file = logging_to_file,
            "Tracing initialized with console output"
        );
    }

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<(), IndexingError> {
    // Load environment variables from .env file
    dotenv().ok();

    let _log_guard = init_tracing()?;

    info!("Starting Movie Indexer");

    let settings = Settings::from_env().map_err(|e| {
        error!(error = %e, "Invalid configuration");
        e
    })?;

    let deps = match Dependencies::new(&settings).await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    let app = create_app(deps.app_state());
    let addr = SocketAddr::new(settings.server_host, settings.server_port);

    match run_server(app, addr).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!(error = %e, "Movie indexer failed");
            Err(e)
        }
    }
}
