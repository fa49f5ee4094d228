//! In-memory suggestion source
//!
//! Matches the composing text against a fixed list of suggestions: a label
//! matches when it, or any word in it, starts with the query (ignoring case).
//! Up/Down move the highlight, Escape hides the list, Return picks the
//! highlighted row.

use std::sync::mpsc::Sender;

use crate::keymap::SpecialKey;
use crate::messages::{ClickTarget, EventKind, InputEvent, SourceMsg};

use super::source::{Suggestion, SuggestionSource};
use super::view::ElementId;

#[derive(Debug, Default)]
pub struct ListSource {
    items: Vec<Suggestion>,
    results: Vec<Suggestion>,
    highlighted: Option<usize>,
    visible: bool,
    allow_null_selection: bool,
    listeners: Vec<Sender<SourceMsg>>,
    input: Option<ElementId>,
    started: bool,
    query: String,
}

impl ListSource {
    pub fn new(items: Vec<Suggestion>) -> Self {
        Self {
            items,
            allow_null_selection: true,
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[Suggestion] {
        &self.items
    }

    /// Suggestions matching the current query
    pub fn results(&self) -> &[Suggestion] {
        &self.results
    }

    pub fn highlighted(&self) -> Option<&Suggestion> {
        self.highlighted.and_then(|i| self.results.get(i))
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn allows_null_selection(&self) -> bool {
        self.allow_null_selection
    }

    pub fn input(&self) -> Option<&ElementId> {
        self.input.as_ref()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn emit(&mut self, msg: SourceMsg) {
        // Listeners whose receiver is gone are dropped
        self.listeners.retain(|tx| tx.send(msg.clone()).is_ok());
    }

    fn refilter(&mut self) {
        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            self.hide();
            return;
        }

        self.results = self
            .items
            .iter()
            .filter(|item| label_matches(&item.label, &query))
            .cloned()
            .collect();

        if self.results.is_empty() {
            self.hide();
        } else {
            self.visible = true;
            self.highlighted = if self.allow_null_selection {
                None
            } else {
                Some(0)
            };
        }
    }

    fn move_highlight(&mut self, forward: bool) {
        let count = self.results.len();
        if count == 0 {
            return;
        }
        self.highlighted = Some(match (self.highlighted, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        });
    }

    fn choose_highlighted(&mut self) -> bool {
        if !self.visible {
            return false;
        }
        let Some(choice) = self.highlighted().cloned() else {
            return false;
        };
        self.emit(SourceMsg::Choose(choice));
        true
    }
}

fn label_matches(label: &str, query: &str) -> bool {
    let label = label.to_lowercase();
    label.starts_with(query) || label.split_whitespace().any(|word| word.starts_with(query))
}

impl SuggestionSource for ListSource {
    fn set_allow_null_selection(&mut self, allow: bool) {
        self.allow_null_selection = allow;
    }

    fn remove_listeners(&mut self) {
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

    fn handle_event(&mut self, event: &mut InputEvent, text: &str) {
        match &event.kind {
            EventKind::KeyDown(stroke) => match stroke.special_key() {
                Some(SpecialKey::Up) if self.visible => {
                    self.move_highlight(false);
                    event.prevent();
                }
                Some(SpecialKey::Down) if self.visible => {
                    self.move_highlight(true);
                    event.prevent();
                }
                Some(SpecialKey::Escape) if self.visible => {
                    self.hide();
                    event.prevent();
                }
                Some(SpecialKey::Return) => {
                    if !self.choose_highlighted() {
                        self.emit(SourceMsg::Query(text.to_string()));
                    }
                }
                _ => {}
            },
            EventKind::Click(ClickTarget::Suggestion(key)) => {
                if let Some(choice) = self.results.iter().find(|s| &s.key == key).cloned() {
                    self.emit(SourceMsg::Choose(choice));
                }
            }
            EventKind::Blur => self.hide(),
            _ => {}
        }
    }

    fn observe_text(&mut self, text: &str) {
        if !self.started || text == self.query {
            return;
        }
        self.query = text.to_string();
        self.refilter();
        self.emit(SourceMsg::Query(text.to_string()));
    }

    fn submit(&mut self) -> bool {
        self.choose_highlighted()
    }

    fn hide(&mut self) {
        self.visible = false;
        self.highlighted = None;
        self.results.clear();
    }
}
