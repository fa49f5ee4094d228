//! Rendered-output model
//!
//! The host draws these nodes; the controller only keeps them up to date. Each
//! token renders as a label, a hidden form field named
//! `<original-field-name>[<sequence>]` carrying the key, and a removal glyph.

use std::fmt;

/// Glyph shown on a token's removal affordance (U+00D7 multiplication sign)
pub const REMOVE_GLYPH: char = '\u{00d7}';

pub const ROOT_CLASS: &str = "tokenizer";
pub const TOKEN_CLASS: &str = "tokenizer-token";
pub const REMOVE_CLASS: &str = "tokenizer-x";
pub const INPUT_CLASS: &str = "tokenizer-input";

/// Identifies a host element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// The hidden input a tokenizer is built around
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub id: String,
    pub name: String,
    /// Raw text the composing input starts with
    pub value: String,
}

impl FormField {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value: String::new(),
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}

/// The pre-existing host container a tokenizer attaches to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub field: FormField,
}

impl Container {
    pub fn new(field: FormField) -> Self {
        Self { field }
    }
}

/// A `(name, value)` pair a form submission would serialize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenField {
    pub name: String,
    pub value: String,
}

/// A rendered token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenNode {
    pub label: String,
    pub field: HiddenField,
}

impl TokenNode {
    /// Build the node for the `seq`-th token rendered under `field_name`
    pub fn build(field_name: &str, seq: usize, key: &str, label: &str) -> Self {
        Self {
            label: label.to_string(),
            field: HiddenField {
                name: format!("{}[{}]", field_name, seq),
                value: key.to_string(),
            },
        }
    }
}

/// The composing text input
#[derive(Debug, Clone, PartialEq)]
pub struct InputNode {
    pub id: ElementId,
    pub value: String,
    /// Width set by the last redraw
    pub width: Option<f32>,
    pub visible: bool,
    /// Bumped whenever the value is reassigned to force a repaint
    pub repaints: u64,
}

impl InputNode {
    pub fn new(id: ElementId, value: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
            width: None,
            visible: true,
            repaints: 0,
        }
    }
}

/// The element that replaces the original field once the tokenizer starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root {
    /// Takes over the original field's id
    pub id: String,
    pub class: &'static str,
    pub cursor: &'static str,
    /// Whether the root has replaced the original field in the host
    pub attached: bool,
}

impl Root {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            class: ROOT_CLASS,
            cursor: "text",
            attached: false,
        }
    }
}
