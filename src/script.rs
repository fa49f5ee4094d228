//! Replayable interaction scripts
//!
//! A script is a YAML list of steps fed to a started tokenizer, one host turn
//! per step:
//!
//! ```yaml
//! steps:
//!   - type: "ali"
//!   - key: tab
//!   - click: root
//!   - click: { remove: "1" }
//!   - paste: "bob"
//!   - blur
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::commands::{Cmd, FocusTarget};
use crate::keymap::{parse_key_string, KeyParseError, Keystroke};
use crate::messages::{ClickTarget, InputEvent};
use crate::tokenizer::{SuggestionSource, Tokenizer};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Script {
    #[serde(
        default,
        deserialize_with = "serde_yaml::with::singleton_map_recursive::deserialize"
    )]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Type each character as its own keystroke
    Type(String),
    /// A single key, e.g. "tab", "backspace", "shift+a"
    Key(String),
    Paste(String),
    Click(ClickStep),
    Focus,
    Blur,
    /// Force a redraw
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickStep {
    Root,
    Token(String),
    Remove(String),
    Suggestion(String),
}

impl From<ClickStep> for ClickTarget {
    fn from(step: ClickStep) -> Self {
        match step {
            ClickStep::Root => ClickTarget::Root,
            ClickStep::Token(key) => ClickTarget::Token(key),
            ClickStep::Remove(key) => ClickTarget::RemoveToken(key),
            ClickStep::Suggestion(key) => ClickTarget::Suggestion(key),
        }
    }
}

impl Script {
    pub fn from_yaml(yaml: &str) -> Result<Self, ScriptError> {
        serde_yaml::from_str(yaml).map_err(|e| ScriptError::Parse(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ScriptError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }
}

/// Outcome of replaying a script
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScriptReport {
    pub tokens: BTreeMap<String, String>,
    pub fields: Vec<FieldReport>,
    pub text: String,
    /// Events whose default action was prevented
    pub prevented: usize,
    /// Host commands emitted, in order
    pub commands: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldReport {
    pub name: String,
    pub value: String,
}

/// Replay `script` against a started tokenizer, ticking after every step.
pub fn run_script<S: SuggestionSource>(
    tokenizer: &mut Tokenizer<S>,
    script: &Script,
) -> Result<ScriptReport, ScriptError> {
    let mut report = ScriptReport::default();
    record_commands(&mut report, tokenizer.tick());

    for step in &script.steps {
        let events = match step {
            Step::Type(text) => text
                .chars()
                .map(|ch| InputEvent::key(Keystroke::char(ch)))
                .collect(),
            Step::Key(key) => {
                let stroke = parse_key_string(key).map_err(ScriptError::Key)?;
                vec![InputEvent::key(stroke)]
            }
            Step::Paste(text) => vec![InputEvent::paste(text.clone())],
            Step::Click(target) => vec![InputEvent::click(target.clone().into())],
            Step::Focus => vec![InputEvent::focus()],
            Step::Blur => vec![InputEvent::blur()],
            Step::Refresh => {
                tokenizer.refresh();
                Vec::new()
            }
        };

        for mut event in events {
            tokenizer.handle_event(&mut event);
            if event.is_prevented() {
                report.prevented += 1;
            }
            record_commands(&mut report, tokenizer.tick());
        }
        if matches!(step, Step::Refresh) {
            record_commands(&mut report, tokenizer.tick());
        }
    }

    report.tokens = tokenizer.get_tokens().into_iter().collect();
    report.fields = tokenizer
        .form_fields()
        .into_iter()
        .map(|field| FieldReport {
            name: field.name,
            value: field.value,
        })
        .collect();
    report.text = tokenizer.text().to_string();
    Ok(report)
}

fn record_commands(report: &mut ScriptReport, cmds: Vec<Cmd>) {
    for cmd in cmds {
        let line = match cmd {
            Cmd::Focus(FocusTarget::Input(id)) => format!("focus {}", id),
            Cmd::Focus(FocusTarget::Next(id)) => format!("focus-next {}", id),
            Cmd::Resize { width } => format!("resize {}", width),
        };
        report.commands.push(line);
    }
}

/// Errors loading or replaying a script
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptError {
    Io(String),
    Parse(String),
    Key(KeyParseError),
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptError::Io(e) => write!(f, "IO error: {}", e),
            ScriptError::Parse(e) => write!(f, "Parse error: {}", e),
            ScriptError::Key(e) => write!(f, "Key error: {}", e),
        }
    }
}

impl std::error::Error for ScriptError {}
