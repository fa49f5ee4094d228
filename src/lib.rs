//! tokenfield - multi-value tokenizing text input
//!
//! This crate provides a headless tokenizer control (keyed tokens chosen from a
//! pluggable suggestion source) implementing the Elm Architecture pattern, and
//! a structured URI value.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod keymap;
pub mod messages;
pub mod metrics;
pub mod scheduler;
pub mod script;
pub mod tokenizer;
pub mod tracing;
pub mod uri;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::TokenizerConfig;
pub use messages::{InputEvent, SourceMsg};
pub use tokenizer::{Tokenizer, TokenizerError};
pub use uri::Uri;
