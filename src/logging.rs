//! # Structured Logging Module
//!
//! Environment-aware structured logging for the dispatch path. Hosts that
//! already installed a global subscriber (language bindings usually do) keep
//! theirs; initialisation here is then a no-op.

use crate::config::{FatalAction, LoggingConfig};
use crate::constants::env;
use crate::errhandler::Convention;
use crate::types::{ErrorCode, ObjectKind};
use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration
pub fn init_structured_logging(config: &LoggingConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = config
            .level
            .clone()
            .unwrap_or_else(|| get_log_level(&environment));

        let console = if config.json {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .json()
                .with_filter(EnvFilter::new(log_level.clone()))
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_filter(EnvFilter::new(log_level.clone()))
                .boxed()
        };

        if tracing_subscriber::registry().with(console).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(
            pid = std::process::id(),
            environment = %environment,
            level = %log_level,
            json = config.json,
            "Structured logging initialized"
        );
    });
}

/// Get current environment from environment variables
fn get_environment() -> String {
    std::env::var(env::ENVIRONMENT)
        .or_else(|_| std::env::var(env::FALLBACK_ENVIRONMENT))
        .unwrap_or_else(|_| "development".to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> String {
    match environment {
        "production" => "info".to_string(),
        "test" | "development" => "debug".to_string(),
        _ => "debug".to_string(),
    }
}

/// Log a handler invocation
pub fn log_dispatch(
    handler: &str,
    convention: Convention,
    object_kind: ObjectKind,
    object_name: &str,
    error_code: ErrorCode,
    message: &str,
) {
    tracing::debug!(
        handler = %handler,
        convention = %convention,
        object_kind = %object_kind,
        object_name = %object_name,
        error_code = error_code.value(),
        diagnostic = %message,
        timestamp = %Utc::now().to_rfc3339(),
        "ERRHANDLER_DISPATCH"
    );
}

/// Log entry into the fatal fallback
pub fn log_fatal(
    object_kind: Option<ObjectKind>,
    object_name: Option<&str>,
    message: &str,
    action: FatalAction,
) {
    tracing::error!(
        object_kind = ?object_kind,
        object_name = object_name,
        diagnostic = %message,
        action = ?action,
        timestamp = %Utc::now().to_rfc3339(),
        "ERRHANDLER_FATAL"
    );
}
