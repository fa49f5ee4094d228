//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging token
//! additions, removals and redraws.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=tokenfield::tokenizer=trace` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/tokenfield/logs/tokenfield.log` with daily
//! rotation. File logging uses debug level by default.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::tokenizer::TokenStore;

/// Initialize tracing subscriber with console and file logging
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "tokenfield.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of the token set for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSnapshot {
    pub keys: Vec<String>,
    pub text_len: usize,
}

impl TokenSnapshot {
    pub fn capture(store: &TokenStore, text: &str) -> Self {
        Self {
            keys: store.keys().map(str::to_string).collect(),
            text_len: text.chars().count(),
        }
    }

    /// Describe what changed between two snapshots, e.g. `+alice; -bob`
    pub fn diff(&self, other: &TokenSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        for key in &other.keys {
            if !self.keys.contains(key) {
                changes.push(format!("+{}", key));
            }
        }
        for key in &self.keys {
            if !other.keys.contains(key) {
                changes.push(format!("-{}", key));
            }
        }
        if self.text_len != other.text_len {
            changes.push(format!("text: {} → {} chars", self.text_len, other.text_len));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
