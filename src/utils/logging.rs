//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the BookHotel client. Logs go to stderr so stdout stays free for views.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{BookHotelError, ErrorSeverity, Result};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the program.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| BookHotelError::Config(format!("Invalid log filter: {}", e)))?;

    let stderr_layer = if config.json {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer().with_writer(std::io::stderr).boxed()
    };

    let (file_layer, guard) = match &config.file_path {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "bookhotel.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| BookHotelError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a completed API call
pub fn log_api_call(method: &str, path: &str, status: u16, duration_ms: u64, request_id: &str) {
    if status >= 400 {
        warn!(
            method = method,
            path = path,
            status = status,
            duration_ms = duration_ms,
            request_id = request_id,
            "API call failed"
        );
    } else {
        debug!(
            method = method,
            path = path,
            status = status,
            duration_ms = duration_ms,
            request_id = request_id,
            "API call completed"
        );
    }
}

/// Log user actions with structured data
pub fn log_user_action(username: Option<&str>, action: &str, details: Option<&str>) {
    info!(
        username = username,
        action = action,
        details = details,
        "User action performed"
    );
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}

/// Log a failed API response at the level its severity calls for
pub fn log_failure(path: &str, err: &BookHotelError) {
    let recoverable = err.is_recoverable();
    match err.severity() {
        ErrorSeverity::Info => debug!(path = path, recoverable = recoverable, "Request rejected: {}", err),
        ErrorSeverity::Warning => warn!(path = path, recoverable = recoverable, "Request failed: {}", err),
        ErrorSeverity::Error | ErrorSeverity::Critical => {
            error!(path = path, recoverable = recoverable, "Request failed: {}", err)
        }
    }
}

/// Log geocoding results
pub fn log_geocode(address: &str, found: bool) {
    if found {
        debug!(address = address, "Geocoding: address located");
    } else {
        warn!(address = address, "Geocoding: address not found");
    }
}
