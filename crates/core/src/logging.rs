//! Logging infrastructure for promptpush.
//!
//! Logs go to stderr; stdout is reserved for the human-readable status lines
//! the commands print.

use std::io::IsTerminal;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{AppError, AppResult};

/// Fallback filter when neither a level nor `RUST_LOG` is given.
const DEFAULT_FILTER: &str = "info";

/// Initialize the tracing subscriber with stderr output.
///
/// # Arguments
/// * `log_level` - Optional filter override (e.g., "debug", "promptpush_hub=trace")
/// * `no_color` - Disable ANSI colors
///
/// # Example
/// ```no_run
/// use promptpush_core::logging::init_logging;
///
/// init_logging(Some("debug"), false).expect("Failed to initialize logging");
/// ```
pub fn init_logging(log_level: Option<&str>, no_color: bool) -> AppResult<()> {
    let env_filter = build_filter(log_level)?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(!no_color && supports_color());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| AppError::Config(format!("Failed to init logging: {}", e)))?;

    Ok(())
}

/// Resolve the filter from the explicit level, then `RUST_LOG`, then the default.
fn build_filter(log_level: Option<&str>) -> AppResult<EnvFilter> {
    let from_env = std::env::var("RUST_LOG").ok();
    let filter_str = log_level
        .or(from_env.as_deref())
        .unwrap_or(DEFAULT_FILTER);

    EnvFilter::try_new(filter_str)
        .map_err(|e| AppError::Config(format!("Invalid log filter '{}': {}", filter_str, e)))
}

/// Colors only when stderr is a terminal and `NO_COLOR` is unset.
fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    std::io::stderr().is_terminal()
}
