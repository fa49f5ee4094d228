//! Command types for the Elm-style architecture
//!
//! Commands are side effects the tokenizer asks its host to perform. They are
//! produced when deferred tasks run (see [`crate::scheduler`]) and handed out
//! by [`crate::tokenizer::Tokenizer::tick`].

use crate::tokenizer::ElementId;

/// Where focus should move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusTarget {
    /// The tokenizer's composing input
    Input(ElementId),
    /// The configured "next input" after Tab
    Next(ElementId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Move keyboard focus
    Focus(FocusTarget),
    /// The composing input was resized; repaint it with the given width
    Resize { width: f32 },
}
