//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::mpsc::Sender;

use tokenfield::keymap::{KeyCode, Keystroke};
use tokenfield::messages::{EventKind, InputEvent, SourceMsg};
use tokenfield::tokenizer::{
    Container, ElementId, FormField, Suggestion, SuggestionSource, Tokenizer,
};

/// Scriptable suggestion source that records what the controller asks of it
#[derive(Debug, Default)]
pub struct FakeSource {
    pub listeners: Vec<Sender<SourceMsg>>,
    pub allow_null_selection: Option<bool>,
    pub input: Option<ElementId>,
    pub started: bool,
    pub hide_calls: usize,
    pub remove_listener_calls: usize,
    pub observed: Vec<String>,
    pub seen: Vec<EventKind>,
    /// Chosen by the next `submit()`
    pub submit_with: Option<Suggestion>,
    /// Emitted while handling the next event
    pub on_next_event: VecDeque<SourceMsg>,
    /// Prevent the next event (first refusal)
    pub prevent_next: bool,
}

impl FakeSource {
    pub fn emit(&mut self, msg: SourceMsg) {
        for listener in &self.listeners {
            let _ = listener.send(msg.clone());
        }
    }
}

impl SuggestionSource for FakeSource {
    fn set_allow_null_selection(&mut self, allow: bool) {
        self.allow_null_selection = Some(allow);
    }

    fn remove_listeners(&mut self) {
        self.remove_listener_calls += 1;
        self.listeners.clear();
    }

    fn listen(&mut self, listener: Sender<SourceMsg>) {
        self.listeners.push(listener);
    }

    fn set_input(&mut self, input: &ElementId) {
        self.input = Some(input.clone());
    }

    fn start(&mut self) {
        self.started = true;
    }

    fn handle_event(&mut self, event: &mut InputEvent, _text: &str) {
        self.seen.push(event.kind.clone());
        if let Some(msg) = self.on_next_event.pop_front() {
            self.emit(msg);
        }
        if std::mem::take(&mut self.prevent_next) {
            event.prevent();
        }
    }

    fn observe_text(&mut self, text: &str) {
        self.observed.push(text.to_string());
    }

    fn submit(&mut self) -> bool {
        match self.submit_with.take() {
            Some(choice) => {
                self.emit(SourceMsg::Choose(choice));
                true
            }
            None => false,
        }
    }

    fn hide(&mut self) {
        self.hide_calls += 1;
    }
}

pub fn test_container() -> Container {
    Container::new(FormField::new("to", "to"))
}

/// A started, ticked tokenizer seeded with `initial`
pub fn test_tokenizer(initial: &[(&str, &str)]) -> Tokenizer<FakeSource> {
    let mut tokenizer = Tokenizer::new(test_container());
    tokenizer
        .set_typeahead(FakeSource::default())
        .set_initial_value(initial.iter().copied());
    tokenizer.start().expect("tokenizer should start");
    tokenizer.tick();
    tokenizer
}

pub fn source(tokenizer: &mut Tokenizer<FakeSource>) -> &mut FakeSource {
    tokenizer.typeahead_mut().expect("source is bound")
}

/// Deliver a keystroke and return the handled event
pub fn press(tokenizer: &mut Tokenizer<FakeSource>, key: KeyCode) -> InputEvent {
    let mut event = InputEvent::key(Keystroke::key(key));
    tokenizer.handle_event(&mut event);
    event
}

/// Type each character of `text` as its own keystroke
pub fn type_text(tokenizer: &mut Tokenizer<FakeSource>, text: &str) {
    for ch in text.chars() {
        let mut event = InputEvent::key(Keystroke::char(ch));
        tokenizer.handle_event(&mut event);
    }
}

/// Token keys in insertion order
pub fn token_keys(tokenizer: &Tokenizer<FakeSource>) -> Vec<String> {
    tokenizer.tokens().keys().map(str::to_string).collect()
}
