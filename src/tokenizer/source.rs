//! The suggestion source contract
//!
//! A tokenizer delegates autocompletion to a [`SuggestionSource`]. The source
//! watches the composing text, gets first refusal on every input event, and
//! reports back through a [`SourceMsg`] channel:
//!
//! - [`SourceMsg::Query`] when the typed text changes (or is submitted with
//!   nothing highlighted)
//! - [`SourceMsg::Choose`] when the user picks a suggestion
//!
//! Binding a source to a tokenizer replaces every listener it had before.

use std::sync::mpsc::Sender;

use crate::messages::{InputEvent, SourceMsg};

use super::view::ElementId;

/// A selectable suggestion
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Suggestion {
    pub key: String,
    pub label: String,
}

impl Suggestion {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

pub trait SuggestionSource {
    /// Whether "no suggestion highlighted" is a valid state
    fn set_allow_null_selection(&mut self, allow: bool);

    /// Drop every registered listener
    fn remove_listeners(&mut self);

    /// Register a listener for query/choose notifications
    fn listen(&mut self, listener: Sender<SourceMsg>);

    /// Bind the input element whose text this source observes
    fn set_input(&mut self, input: &ElementId);

    /// Begin observing the bound input
    fn start(&mut self);

    /// First refusal on an input event. Prevent `event` to stop the
    /// tokenizer from acting on it. `text` is the current composing text.
    fn handle_event(&mut self, event: &mut InputEvent, text: &str);

    /// The composing text changed
    fn observe_text(&mut self, _text: &str) {}

    /// Force-accept the highlighted suggestion. True if one was chosen.
    fn submit(&mut self) -> bool;

    /// Hide the suggestion list
    fn hide(&mut self);
}
