//! Message types flowing into the tokenizer
//!
//! Hosts deliver [`InputEvent`]s; suggestion sources deliver [`SourceMsg`]s
//! through the channel the controller hands them when they are bound.

use crate::keymap::Keystroke;
use crate::tokenizer::Suggestion;

/// What was clicked inside the tokenizer's container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    /// The container background (not a token, not the input)
    Root,
    /// The body of a token
    Token(String),
    /// A token's removal affordance
    RemoveToken(String),
    /// A row in the suggestion list, by suggestion key
    Suggestion(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Click(ClickTarget),
    Focus,
    Blur,
    KeyDown(Keystroke),
    /// Text pasted into the composing input
    Paste(String),
}

/// A host UI event. Handlers may prevent its default action (entering a
/// character, submitting the enclosing form, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    pub kind: EventKind,
    prevented: bool,
}

impl InputEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            prevented: false,
        }
    }

    pub fn key(stroke: Keystroke) -> Self {
        Self::new(EventKind::KeyDown(stroke))
    }

    pub fn click(target: ClickTarget) -> Self {
        Self::new(EventKind::Click(target))
    }

    pub fn focus() -> Self {
        Self::new(EventKind::Focus)
    }

    pub fn blur() -> Self {
        Self::new(EventKind::Blur)
    }

    pub fn paste(text: impl Into<String>) -> Self {
        Self::new(EventKind::Paste(text.into()))
    }

    pub fn prevent(&mut self) {
        self.prevented = true;
    }

    pub fn is_prevented(&self) -> bool {
        self.prevented
    }

    pub fn keystroke(&self) -> Option<&Keystroke> {
        match &self.kind {
            EventKind::KeyDown(stroke) => Some(stroke),
            _ => None,
        }
    }
}

/// Notifications emitted by a suggestion source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceMsg {
    /// The typed query changed or was submitted without a selection
    Query(String),
    /// The user picked a suggestion
    Choose(Suggestion),
}
