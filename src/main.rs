use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

use tokenfield::cli::{CliArgs, CliCommand};
use tokenfield::config::TokenizerConfig;
use tokenfield::script::{run_script, Script};
use tokenfield::tokenizer::{Container, ElementId, FormField, ListSource, Suggestion, Tokenizer};
use tokenfield::uri::Uri;

fn main() -> Result<()> {
    tokenfield::tracing::init();

    let args = CliArgs::parse();
    match args.command {
        CliCommand::Run {
            script,
            limit,
            initial,
            suggest,
            field,
            next,
            config,
        } => {
            let config = match config {
                Some(path) => TokenizerConfig::load_from(&path),
                None => TokenizerConfig::load(),
            };
            let script = Script::load(&script)
                .with_context(|| format!("Failed to load script {}", script.display()))?;

            let name = field.unwrap_or_else(|| config.field_name.clone());
            let container = Container::new(FormField::new(name.clone(), name));

            let suggestions = suggest
                .into_iter()
                .map(|(key, label)| Suggestion::new(key, label))
                .collect();

            let mut tokenizer = Tokenizer::with_config(container, &config);
            tokenizer
                .set_typeahead(ListSource::new(suggestions))
                .set_initial_value(initial)
                .set_next_input(next.map(ElementId::new));
            if limit.is_some() {
                tokenizer.set_limit(limit);
            }
            tokenizer.start().context("Failed to start tokenizer")?;

            let report = run_script(&mut tokenizer, &script).context("Script replay failed")?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        CliCommand::Uri { text } => {
            let uri = Uri::parse(&text);
            let parts = json!({
                "protocol": uri.protocol(),
                "domain": uri.domain(),
                "port": uri.port(),
                "path": uri.path(),
                "query": uri.query_params(),
                "fragment": uri.fragment(),
                "string": uri.to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&parts)?);
        }
    }

    Ok(())
}
