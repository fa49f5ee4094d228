//! Keyboard input vocabulary for the tokenizer
//!
//! Hosts translate their native key events into [`Keystroke`]s. The
//! controller only cares about a handful of keys, classified by
//! [`SpecialKey`]; everything else is "any other key".
//!
//! # Parsing
//!
//! ```ignore
//! let stroke = parse_key_string("shift+tab")?;
//! assert_eq!(stroke.special_key(), Some(SpecialKey::Tab));
//! ```

mod parse;
mod types;

pub use parse::{parse_key_string, KeyParseError};
pub use types::{KeyCode, Keystroke, Modifiers, SpecialKey};
