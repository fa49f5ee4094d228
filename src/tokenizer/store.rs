//! Ordered, keyed token collection

use std::collections::{HashMap, HashSet};

use super::view::TokenNode;

/// One chosen item. Never mutated in place: remove and re-add to change it.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    key: String,
    value: String,
    /// Rendered representation, owned by whoever rendered the token
    node: Option<TokenNode>,
}

impl Token {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            node: None,
        }
    }

    pub fn with_node(mut self, node: TokenNode) -> Self {
        self.node = Some(node);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn node(&self) -> Option<&TokenNode> {
        self.node.as_ref()
    }
}

/// Tokens in insertion order, keyed by identity.
///
/// `order` drives "remove most recent"; `map` owns the tokens. The two are kept
/// in step by every mutation here, but [`TokenStore::remove_last`] still
/// tolerates order entries whose token is already gone.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    order: Vec<String>,
    map: HashMap<String, Token>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a token without a rendered node. False if the key is taken.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        self.insert(Token::new(key, value))
    }

    /// Append `token`. False (store unchanged) if its key is already present.
    pub fn insert(&mut self, token: Token) -> bool {
        if self.map.contains_key(&token.key) {
            return false;
        }
        self.order.push(token.key.clone());
        self.map.insert(token.key.clone(), token);
        true
    }

    /// Remove a token by key. False if it wasn't there.
    pub fn remove(&mut self, key: &str) -> bool {
        if self.map.remove(key).is_none() {
            return false;
        }
        self.order.retain(|k| k != key);
        true
    }

    /// Pop keys off the end of the order until one actually removes a token.
    pub fn remove_last(&mut self) -> Option<String> {
        while let Some(key) = self.order.pop() {
            if self.map.remove(&key).is_some() {
                return Some(key);
            }
            tracing::debug!(key = %key, "skipping stale token key");
        }
        None
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Token> {
        self.map.get(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Tokens in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.order.iter().filter_map(|key| self.map.get(key))
    }

    /// Snapshot of key -> value
    pub fn values(&self) -> HashMap<String, String> {
        self.map
            .iter()
            .map(|(key, token)| (key.clone(), token.value.clone()))
            .collect()
    }

    /// True when the order and the map hold exactly the same keys
    pub fn is_consistent(&self) -> bool {
        let ordered: HashSet<&str> = self.order.iter().map(String::as_str).collect();
        ordered.len() == self.order.len()
            && ordered.len() == self.map.len()
            && ordered.iter().all(|key| self.map.contains_key(*key))
    }
}
