//! Command-line argument parsing
//!
//! Supports:
//! - Replaying an interaction script against a tokenizer
//! - Inspecting how a URI splits into parts

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// A multi-value tokenizing input, driven from the terminal
#[derive(Parser, Debug)]
#[command(name = "tokenfield", version, about = "Tokenizer input playground")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Replay a YAML interaction script and print the resulting tokens as JSON
    Run {
        /// Script file
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Maximum number of tokens typing may reach
        #[arg(long, value_name = "N")]
        limit: Option<usize>,

        /// Token present before any input (repeatable)
        #[arg(long, value_name = "KEY=LABEL", value_parser = parse_pair)]
        initial: Vec<(String, String)>,

        /// Suggestion offered while typing (repeatable)
        #[arg(long, value_name = "KEY=LABEL", value_parser = parse_pair)]
        suggest: Vec<(String, String)>,

        /// Form field name tokens are submitted under
        #[arg(long, value_name = "NAME")]
        field: Option<String>,

        /// Element focused after Tab
        #[arg(long, value_name = "ID")]
        next: Option<String>,

        /// Config file (defaults to the user config)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Split a URI into its parts and print them as JSON
    Uri {
        #[arg(value_name = "URI")]
        text: String,
    },
}

/// Parse `key=label`. A missing `=` uses the key as its own label.
pub fn parse_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some(("", _)) => Err(format!("Empty key in '{}'", s)),
        Some((key, label)) => Ok((key.to_string(), label.to_string())),
        None if s.is_empty() => Err("Empty pair".to_string()),
        None => Ok((s.to_string(), s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        assert_eq!(
            parse_pair("1=Alice Liddell"),
            Ok(("1".to_string(), "Alice Liddell".to_string()))
        );
        assert_eq!(parse_pair("bob"), Ok(("bob".to_string(), "bob".to_string())));
        assert!(parse_pair("=x").is_err());
        assert!(parse_pair("").is_err());
    }

    #[test]
    fn test_run_args() {
        let args = CliArgs::parse_from([
            "tokenfield",
            "run",
            "script.yaml",
            "--limit",
            "2",
            "--initial",
            "1=Alice",
            "--suggest",
            "2=Bob",
            "--suggest",
            "3=Carol",
        ]);
        match args.command {
            CliCommand::Run {
                limit,
                initial,
                suggest,
                ..
            } => {
                assert_eq!(limit, Some(2));
                assert_eq!(initial.len(), 1);
                assert_eq!(suggest.len(), 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
