//! # Structured Logging Module
//!
//! Environment-aware structured logging for tracing optimistic updates,
//! rollbacks, and gateway failures through the synchronization engine.

use std::env;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration.
///
/// Idempotent: repeated calls (or an already-installed global subscriber,
/// e.g. from a host application) are tolerated rather than panicking.
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = crate::config::detect_environment();
        let filter = env::var("TASKBOARD_LOG").unwrap_or_else(|_| default_level(&environment).to_string());
        let json_output = env::var("TASKBOARD_LOG_FORMAT")
            .map(|format| format.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let base = fmt::layer().with_target(true).with_level(true);
        let layer = if json_output {
            base.json().with_filter(EnvFilter::new(&filter)).boxed()
        } else {
            base.with_filter(EnvFilter::new(&filter)).boxed()
        };

        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            // A global subscriber is already set; continue with it.
            tracing::debug!("global tracing subscriber already initialized");
        } else {
            tracing::debug!(environment = %environment, filter = %filter, "structured logging initialized");
        }
    });
}

fn default_level(environment: &str) -> &'static str {
    match environment {
        "test" => "warn",
        "development" => "debug",
        _ => "info",
    }
}
