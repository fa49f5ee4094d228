//! The tokenizer controller
//!
//! Wires host input events, the [`TokenStore`] and a [`SuggestionSource`]
//! together. The source always sees an event first; the controller only acts on
//! events the source left unprevented.
//!
//! Keydown dispatch:
//!
//! | key              | action                                                |
//! |------------------|-------------------------------------------------------|
//! | Tab              | submit, else clear the text; move on to next input    |
//! | Delete/Backspace | on empty text, remove the most recently added token   |
//! | Return           | nothing (never subject to the token limit)            |
//! | anything else    | suppressed at the limit, otherwise redraw next tick   |
//!
//! Token limits are only enforced here, at keystroke time, so seeding and
//! programmatic additions are never limited.

use std::collections::HashMap;
use std::fmt;
use std::sync::mpsc::{self, Receiver};

use crate::commands::{Cmd, FocusTarget};
use crate::config::{TokenizerConfig, DEFAULT_WIDTH_PADDING};
use crate::keymap::{KeyCode, Keystroke, SpecialKey};
use crate::messages::{ClickTarget, EventKind, InputEvent, SourceMsg};
use crate::metrics::{MonospaceMetrics, TextMetrics};
use crate::scheduler::{Scheduler, Task};

#[cfg(debug_assertions)]
use crate::tracing::TokenSnapshot;

use super::source::{Suggestion, SuggestionSource};
use super::store::{Token, TokenStore};
use super::view::{Container, ElementId, HiddenField, InputNode, Root, TokenNode};

/// Configuration errors raised by [`Tokenizer::start`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizerError {
    /// `start()` was called before `set_typeahead()`
    NoSuggestionSource,
    /// `start()` was called twice
    AlreadyStarted,
}

impl fmt::Display for TokenizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizerError::NoSuggestionSource => write!(
                f,
                "No suggestion source configured; call set_typeahead() before start()"
            ),
            TokenizerError::AlreadyStarted => write!(f, "Tokenizer already started"),
        }
    }
}

impl std::error::Error for TokenizerError {}

/// A multi-value text input holding keyed tokens.
pub struct Tokenizer<S: SuggestionSource> {
    container: Container,
    root: Option<Root>,
    input: InputNode,
    typeahead: Option<S>,
    inbox: Option<Receiver<SourceMsg>>,
    tokens: TokenStore,
    initial_value: Option<Vec<(String, String)>>,
    /// Next hidden-field index; never reused
    seq: usize,
    /// Text at the last redraw
    last_value: Option<String>,
    limit: Option<usize>,
    next_input: Option<ElementId>,
    hide_results_on_choose: bool,
    width_padding: f32,
    metrics: Box<dyn TextMetrics>,
    scheduler: Scheduler,
    outbox: Vec<Cmd>,
    started: bool,
    focused: bool,
    redraws: usize,
}

impl<S: SuggestionSource> Tokenizer<S> {
    pub fn new(container: Container) -> Self {
        let input_id = ElementId::new(format!("{}-input", container.field.id));
        Self {
            input: InputNode::new(input_id, ""),
            container,
            root: None,
            typeahead: None,
            inbox: None,
            tokens: TokenStore::new(),
            initial_value: None,
            seq: 0,
            last_value: None,
            limit: None,
            next_input: None,
            hide_results_on_choose: true,
            width_padding: DEFAULT_WIDTH_PADDING,
            metrics: Box::new(MonospaceMetrics::default()),
            scheduler: Scheduler::new(),
            outbox: Vec::new(),
            started: false,
            focused: false,
            redraws: 0,
        }
    }

    /// Build a tokenizer with limit, padding, metrics and choose policy taken
    /// from `config`
    pub fn with_config(container: Container, config: &TokenizerConfig) -> Self {
        let mut tokenizer = Self::new(container);
        tokenizer.limit = config.limit;
        tokenizer.width_padding = config.width_padding;
        tokenizer.hide_results_on_choose = config.hide_results_on_choose;
        tokenizer.metrics = Box::new(MonospaceMetrics::new(config.char_width));
        tokenizer
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Bind the suggestion source. Null selection is disabled and every
    /// listener the source had is replaced. May be called at any time.
    pub fn set_typeahead(&mut self, mut source: S) -> &mut Self {
        let (tx, rx) = mpsc::channel();
        source.set_allow_null_selection(false);
        source.remove_listeners();
        source.listen(tx);

        if self.started {
            source.set_input(&self.input.id);
            source.start();
        }
        tracing::debug!(started = self.started, "suggestion source bound");

        self.typeahead = Some(source);
        self.inbox = Some(rx);
        self
    }

    pub fn typeahead(&self) -> Option<&S> {
        self.typeahead.as_ref()
    }

    pub fn typeahead_mut(&mut self) -> Option<&mut S> {
        self.typeahead.as_mut()
    }

    /// Tokens added (unlimited) when the tokenizer attaches
    pub fn set_initial_value<I, K, V>(&mut self, map: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.initial_value = Some(
            map.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Maximum tokens live typing may reach. `None` or `Some(0)` is unlimited.
    pub fn set_limit(&mut self, limit: Option<usize>) -> &mut Self {
        self.limit = limit;
        self
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Element to focus after Tab
    pub fn set_next_input(&mut self, next: Option<ElementId>) -> &mut Self {
        self.next_input = next;
        self
    }

    pub fn next_input(&self) -> Option<&ElementId> {
        self.next_input.as_ref()
    }

    pub fn set_metrics(&mut self, metrics: impl TextMetrics + 'static) -> &mut Self {
        self.metrics = Box::new(metrics);
        self
    }

    pub fn set_hide_results_on_choose(&mut self, hide: bool) -> &mut Self {
        self.hide_results_on_choose = hide;
        self
    }

    pub fn should_hide_results_on_choose(&self) -> bool {
        self.hide_results_on_choose
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Take over the container: build the input from the original field's
    /// value, bind the source to it, and defer seeding until the host has
    /// attached the root.
    pub fn start(&mut self) -> Result<(), TokenizerError> {
        if self.started {
            return Err(TokenizerError::AlreadyStarted);
        }
        let Some(source) = self.typeahead.as_mut() else {
            return Err(TokenizerError::NoSuggestionSource);
        };

        self.input.value = self.container.field.value.clone();
        self.root = Some(Root::new(self.container.field.id.clone()));

        source.set_input(&self.input.id);
        source.start();

        self.started = true;
        self.scheduler.defer(Task::SeedInitialValue);
        tracing::debug!(field = %self.container.field.name, "tokenizer started");
        Ok(())
    }

    /// Abandon the controller. Queued tasks still run; nothing new is queued.
    pub fn detach(&mut self) {
        self.scheduler.close();
        tracing::debug!(pending = self.scheduler.len(), "tokenizer detached");
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Run every deferred task (the host's "next tick") and hand back the
    /// commands produced since the last tick.
    pub fn tick(&mut self) -> Vec<Cmd> {
        while let Some(task) = self.scheduler.pop() {
            self.run_task(task);
        }
        std::mem::take(&mut self.outbox)
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::SeedInitialValue => {
                if let Some(root) = self.root.as_mut() {
                    root.attached = true;
                }
                for (key, value) in self.initial_value.take().unwrap_or_default() {
                    self.add_token(&key, &value);
                }
                self.redraw(false);
            }
            Task::FocusInput => {
                self.outbox
                    .push(Cmd::Focus(FocusTarget::Input(self.input.id.clone())));
            }
            Task::FocusNext => {
                if let Some(next) = self.next_input.clone() {
                    self.outbox.push(Cmd::Focus(FocusTarget::Next(next)));
                }
            }
            Task::Redraw => self.redraw(false),
        }
    }

    // =========================================================================
    // Event handling
    // =========================================================================

    /// Dispatch a host event. The source gets first refusal; if it prevents the
    /// event the controller does nothing further.
    #[inline]
    pub fn handle_event(&mut self, event: &mut InputEvent) {
        #[cfg(debug_assertions)]
        {
            self.handle_event_traced(event)
        }
        #[cfg(not(debug_assertions))]
        {
            self.handle_event_inner(event)
        }
    }

    #[cfg(debug_assertions)]
    fn handle_event_traced(&mut self, event: &mut InputEvent) {
        let span = tracing::span!(tracing::Level::DEBUG, "tokenizer_event", kind = ?event.kind);
        let _guard = span.enter();

        let before = TokenSnapshot::capture(&self.tokens, &self.input.value);
        self.handle_event_inner(event);
        let after = TokenSnapshot::capture(&self.tokens, &self.input.value);

        if let Some(diff) = before.diff(&after) {
            tracing::debug!(prevented = event.is_prevented(), "{}", diff);
        }
    }

    fn handle_event_inner(&mut self, event: &mut InputEvent) {
        let text = self.input.value.clone();
        if let Some(source) = self.typeahead.as_mut() {
            source.handle_event(event, &text);
        }
        self.drain_source(Some(&mut *event));
        if event.is_prevented() {
            return;
        }

        match event.kind.clone() {
            EventKind::Click(target) => self.on_click(&target, event),
            EventKind::KeyDown(stroke) => self.on_keydown(&stroke, event),
            EventKind::Focus => self.focused = true,
            EventKind::Blur => {
                self.focused = false;
                self.redraw(true);
            }
            EventKind::Paste(_) => {
                if self.is_at_limit() {
                    tracing::debug!(limit = ?self.limit, "token limit reached, suppressing paste");
                    event.prevent();
                }
            }
        }

        if !event.is_prevented() {
            self.apply_default_action(&event.kind);
        }
    }

    /// Process notifications the source sent outside of an input event (for
    /// example after an asynchronous fetch completed)
    pub fn poll_suggestions(&mut self) {
        self.drain_source(None);
    }

    fn drain_source(&mut self, mut event: Option<&mut InputEvent>) {
        loop {
            let batch: Vec<SourceMsg> = match self.inbox.as_ref() {
                Some(rx) => rx.try_iter().collect(),
                None => return,
            };
            if batch.is_empty() {
                return;
            }
            for msg in batch {
                match msg {
                    SourceMsg::Choose(choice) => self.on_choose(choice, event.as_deref_mut()),
                    SourceMsg::Query(query) => self.on_query(&query, event.as_deref_mut()),
                }
            }
        }
    }

    fn on_choose(&mut self, choice: Suggestion, event: Option<&mut InputEvent>) {
        if let Some(event) = event {
            event.prevent();
        }
        if !self.add_token(&choice.key, &choice.label) {
            return;
        }
        if self.hide_results_on_choose {
            if let Some(source) = self.typeahead.as_mut() {
                source.hide();
            }
        }
        self.set_text(String::new());
        self.redraw(false);
        self.focus();
    }

    fn on_query(&mut self, query: &str, event: Option<&mut InputEvent>) {
        // With text typed, Enter must not submit the enclosing form. On an
        // empty field it may.
        if !query.is_empty() {
            if let Some(event) = event {
                event.prevent();
            }
        }
    }

    fn on_click(&mut self, target: &ClickTarget, event: &mut InputEvent) {
        match target {
            ClickTarget::RemoveToken(key) => {
                self.remove_token(key);
            }
            ClickTarget::Root => {
                self.focus();
                event.prevent();
            }
            _ => {}
        }
    }

    fn on_keydown(&mut self, stroke: &Keystroke, event: &mut InputEvent) {
        match stroke.special_key() {
            // Uncompleted text is cleared even without a next input
            Some(SpecialKey::Tab) => {
                let completed = self.typeahead.as_mut().is_some_and(|source| source.submit());
                self.drain_source(Some(&mut *event));
                if !completed {
                    self.set_text(String::new());
                }
                if self.next_input.is_some() {
                    self.scheduler.defer(Task::FocusNext);
                }
            }
            Some(SpecialKey::Delete) => {
                if self.input.value.is_empty() {
                    if let Some(key) = self.tokens.remove_last() {
                        self.after_removal(&key);
                    }
                }
            }
            Some(SpecialKey::Return) => {}
            _ => {
                if self.is_at_limit() {
                    tracing::debug!(limit = ?self.limit, "token limit reached, suppressing key");
                    event.prevent();
                }
                self.scheduler.defer(Task::Redraw);
            }
        }
    }

    /// What the host does with an event nobody prevented
    fn apply_default_action(&mut self, kind: &EventKind) {
        match kind {
            EventKind::KeyDown(stroke) => {
                if let Some(ch) = stroke.text() {
                    let mut text = self.input.value.clone();
                    text.push(ch);
                    self.set_text(text);
                } else if stroke.key == KeyCode::Backspace && !self.input.value.is_empty() {
                    let mut text = self.input.value.clone();
                    text.pop();
                    self.set_text(text);
                }
            }
            EventKind::Paste(pasted) if !pasted.is_empty() => {
                let text = format!("{}{}", self.input.value, pasted);
                self.set_text(text);
                self.scheduler.defer(Task::Redraw);
            }
            _ => return,
        }
        self.drain_source(None);
    }

    fn set_text(&mut self, text: String) {
        if self.input.value == text {
            return;
        }
        self.input.value = text;
        if let Some(source) = self.typeahead.as_mut() {
            source.observe_text(&self.input.value);
        }
    }

    // =========================================================================
    // Tokens
    // =========================================================================

    /// Add a token. False (nothing changes) if the key is already present.
    pub fn add_token(&mut self, key: &str, value: &str) -> bool {
        if self.tokens.contains(key) {
            tracing::debug!(key, "duplicate token rejected");
            return false;
        }

        let node = self.build_token(key, value);
        self.tokens.insert(Token::new(key, value).with_node(node));
        tracing::debug!(key, count = self.tokens.len(), "token added");
        true
    }

    /// Remove a token by key, then redraw and refocus. False if absent.
    pub fn remove_token(&mut self, key: &str) -> bool {
        if !self.tokens.remove(key) {
            return false;
        }
        self.after_removal(key);
        true
    }

    fn after_removal(&mut self, key: &str) {
        tracing::debug!(key, count = self.tokens.len(), "token removed");
        self.redraw(true);
        self.focus();
    }

    fn build_token(&mut self, key: &str, value: &str) -> TokenNode {
        let node = TokenNode::build(&self.container.field.name, self.seq, key, value);
        self.seq += 1;
        node
    }

    /// Snapshot of key -> value
    pub fn get_tokens(&self) -> HashMap<String, String> {
        self.tokens.values()
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Hidden fields a form submission would serialize, in render order
    pub fn form_fields(&self) -> Vec<HiddenField> {
        self.tokens
            .iter()
            .filter_map(|token| token.node().map(|node| node.field.clone()))
            .collect()
    }

    pub fn is_at_limit(&self) -> bool {
        match self.limit {
            Some(limit) if limit > 0 => self.tokens.len() == limit,
            _ => false,
        }
    }

    // =========================================================================
    // Rendering and focus
    // =========================================================================

    /// Show the input and focus it on the next tick
    pub fn focus(&mut self) {
        self.input.visible = true;
        self.scheduler.defer(Task::FocusInput);
    }

    /// Force a redraw
    pub fn refresh(&mut self) -> &mut Self {
        self.redraw(true);
        self
    }

    /// Resize the input to fit its text. Skipped when the text hasn't changed
    /// since the last redraw unless `force` is set.
    fn redraw(&mut self, force: bool) {
        if !force && self.last_value.as_deref() == Some(self.input.value.as_str()) {
            return;
        }
        self.last_value = Some(self.input.value.clone());

        let width = self.metrics.text_width(&self.input.value) + self.width_padding;
        self.input.width = Some(width);
        self.redraws += 1;

        // Reassign the value so hosts that skip repainting after a paste
        // still repaint
        self.input.repaints += 1;
        self.outbox.push(Cmd::Resize { width });

        tracing::trace!(width, force, "redraw");
    }

    /// How many redraws actually did layout work
    pub fn redraw_count(&self) -> usize {
        self.redraws
    }

    pub fn text(&self) -> &str {
        &self.input.value
    }

    pub fn input(&self) -> &InputNode {
        &self.input
    }

    pub fn root(&self) -> Option<&Root> {
        self.root.as_ref()
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }
}

impl<S: SuggestionSource + fmt::Debug> fmt::Debug for Tokenizer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("field", &self.container.field)
            .field("tokens", &self.tokens)
            .field("text", &self.input.value)
            .field("limit", &self.limit)
            .field("next_input", &self.next_input)
            .field("typeahead", &self.typeahead)
            .field("started", &self.started)
            .finish()
    }
}
