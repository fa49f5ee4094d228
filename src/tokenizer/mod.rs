//! Multi-value tokenizing input
//!
//! A tokenizer behaves like a text field but collects a set of discrete,
//! keyed tokens (think of the "To:" field of a mail client), delegating
//! autocompletion to a [`SuggestionSource`].
//!
//! # Architecture
//!
//! - [`TokenStore`]: ordered, keyed token collection with duplicate rejection
//! - [`SuggestionSource`]: the contract an autocompleter fulfils
//! - [`ListSource`]: a simple in-memory suggestion source
//! - [`Tokenizer`]: the controller tying host events, store and source together
//! - [`view`]: what the host renders
//!
//! # Example
//!
//! ```ignore
//! let field = FormField::new("to", "to").with_value("");
//! let mut tokenizer = Tokenizer::new(Container::new(field));
//! tokenizer
//!     .set_typeahead(ListSource::new(people))
//!     .set_initial_value([("1", "Alice")])
//!     .set_limit(Some(5));
//! tokenizer.start()?;
//! for cmd in tokenizer.tick() {
//!     host.perform(cmd);
//! }
//! ```

mod controller;
mod list_source;
mod source;
mod store;
pub mod view;

pub use controller::{Tokenizer, TokenizerError};
pub use list_source::ListSource;
pub use source::{Suggestion, SuggestionSource};
pub use store::{Token, TokenStore};
pub use view::{Container, ElementId, FormField, HiddenField, InputNode, Root, TokenNode};
