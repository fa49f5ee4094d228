//! Deferred task queue
//!
//! Work that must wait for the host to settle (layout, attachment, focus) is
//! queued here instead of running inside the current event handler. The host
//! drains the queue on its next turn via [`crate::tokenizer::Tokenizer::tick`].
//!
//! Tasks run strictly after the handler that scheduled them, in the order they
//! were scheduled. Nothing is ever cancelled: a task observes whatever state the
//! controller is in when its turn comes.

use std::collections::VecDeque;

/// A unit of deferred controller work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Attach the root and add the initial tokens
    SeedInitialValue,
    /// Focus the composing input
    FocusInput,
    /// Focus the configured next input (after Tab)
    FocusNext,
    /// Redraw once the typed character has landed
    Redraw,
}

/// FIFO queue of deferred tasks
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: VecDeque<Task>,
    closed: bool,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a task. Returns false (and drops the task) once the scheduler is
    /// closed.
    pub fn defer(&mut self, task: Task) -> bool {
        if self.closed {
            tracing::debug!(?task, "scheduler closed, dropping task");
            return false;
        }
        self.queue.push_back(task);
        true
    }

    /// Next task in scheduling order
    pub fn pop(&mut self) -> Option<Task> {
        self.queue.pop_front()
    }

    /// Refuse new work. Tasks already queued still run.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
