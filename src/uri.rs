//! Structured URI values
//!
//! Splits a URI string into protocol, domain, port, path, query parameters and
//! fragment, lets each part be changed independently, and serializes back on
//! demand (nothing is cached).
//!
//! ```ignore
//! use tokenfield::uri::Uri;
//!
//! let mut uri = Uri::parse("http://www.example.com/asdf.php?a=b&c=d#anchor123");
//! assert_eq!(uri.domain(), Some("www.example.com"));
//! assert_eq!(uri.query_param("c"), Some("d"));
//!
//! uri.set_fragment(Some("clowntown"));
//! assert_eq!(uri.to_string(), "http://www.example.com/asdf.php?a=b&c=d#clowntown");
//! ```
//!
//! Parsing is best-effort: malformed input yields empty parts, never an error.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// Query parameters, keyed by decoded name
pub type QueryParams = BTreeMap<String, String>;

/// Replacement for the default `key=value&...` query serializer
pub type QuerySerializer = fn(&QueryParams) -> String;

/// Captures protocol, domain, port, path, query and fragment.
///
/// `Regex::captures` keeps no scanning state between calls, so concurrent or
/// reentrant parses cannot interfere with each other.
static URI_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:([^:/?#]+):)?(?://([^:/?#]*)(?::(\d*))?)?([^?#]*)(?:\?([^#]*))?(?:#(.*))?")
        .expect("URI pattern is valid")
});

/// A mutable, structured URI.
#[derive(Clone, Default)]
pub struct Uri {
    protocol: Option<String>,
    domain: Option<String>,
    port: Option<String>,
    path: Option<String>,
    query: QueryParams,
    fragment: Option<String>,
    serializer: Option<QuerySerializer>,
}

impl Uri {
    /// An empty, relative URI (serializes to "")
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse absolute or relative URI text. Relative URIs leave protocol and
    /// domain unset.
    pub fn parse(text: &str) -> Self {
        let mut uri = Self::new();
        if text.is_empty() {
            return uri;
        }

        let Some(caps) = URI_PATTERN.captures(text) else {
            return uri;
        };
        let group = |i: usize| caps.get(i).map(|m| m.as_str().to_string());

        uri.protocol = group(1);
        uri.domain = group(2);
        uri.port = group(3);
        uri.fragment = group(6);

        if let Some(path) = group(4).filter(|p| !p.is_empty()) {
            uri.set_path(Some(&path));
        }

        if let Some(query) = group(5).filter(|q| !q.is_empty()) {
            uri.query = parse_query(&query);
        }

        uri
    }

    pub fn protocol(&self) -> Option<&str> {
        self.protocol.as_deref()
    }

    pub fn set_protocol(&mut self, protocol: Option<&str>) -> &mut Self {
        self.protocol = protocol.map(str::to_string);
        self
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn set_domain(&mut self, domain: Option<&str>) -> &mut Self {
        self.domain = domain.map(str::to_string);
        self
    }

    pub fn port(&self) -> Option<&str> {
        self.port.as_deref()
    }

    pub fn set_port(&mut self, port: Option<&str>) -> &mut Self {
        self.port = port.map(str::to_string);
        self
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Set the path, prefixing `/` when it is missing. An empty path clears it.
    pub fn set_path(&mut self, path: Option<&str>) -> &mut Self {
        self.path = match path {
            None | Some("") => None,
            Some(p) if p.starts_with('/') => Some(p.to_string()),
            Some(p) => Some(format!("/{}", p)),
        };
        self
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn set_fragment(&mut self, fragment: Option<&str>) -> &mut Self {
        self.fragment = fragment.map(str::to_string);
        self
    }

    pub fn query_params(&self) -> &QueryParams {
        &self.query
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Replace all query parameters
    pub fn set_query_params(&mut self, params: QueryParams) -> &mut Self {
        self.query = params;
        self
    }

    /// Merge parameters into the query. `None` removes the key, anything else
    /// overwrites the previous value.
    pub fn add_query_params<I, K, V>(&mut self, params: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in params {
            let key = key.into();
            match value {
                Some(value) => {
                    self.query.insert(key, value.into());
                }
                None => {
                    self.query.remove(&key);
                }
            }
        }
        self
    }

    /// Set (or with `None`, remove) a single query parameter
    pub fn set_query_param(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        self.add_query_params([(key, value)])
    }

    pub fn remove_query_param(&mut self, key: &str) -> &mut Self {
        self.query.remove(key);
        self
    }

    /// Install a serializer that fully replaces the default one
    pub fn set_query_serializer(&mut self, serializer: Option<QuerySerializer>) -> &mut Self {
        self.serializer = serializer;
        self
    }

    /// Serialized query with its leading `?`, or "" when there is nothing to emit
    pub fn query_string(&self) -> String {
        let serialize = self.serializer.unwrap_or(default_query_serializer);
        let query = serialize(&self.query);
        if query.is_empty() {
            query
        } else {
            format!("?{}", query)
        }
    }

    /// Navigate the host to this URI, or reload when it serializes to "".
    ///
    /// Observers registered on `dispatcher` see a `go` event first and may
    /// cancel it.
    pub fn go(&self, dispatcher: &mut GoDispatcher, navigator: &mut dyn Navigator) -> Navigation {
        let uri = self.to_string();
        if dispatcher.invoke(&uri).is_prevented() {
            tracing::debug!(uri = %uri, "navigation cancelled by observer");
            return Navigation::Cancelled;
        }

        if uri.is_empty() {
            navigator.reload();
            Navigation::Reloaded
        } else {
            navigator.assign(&uri);
            Navigation::Assigned(uri)
        }
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_assert!(
            self.path.as_deref().is_none_or(|p| p.starts_with('/')),
            "URI path does not begin with '/'"
        );

        let mut out = String::new();
        if let Some(protocol) = self.protocol.as_deref().filter(|p| !p.is_empty()) {
            out.push_str(protocol);
            out.push_str("://");
        }
        out.push_str(self.domain.as_deref().unwrap_or(""));
        if let Some(port) = self.port.as_deref().filter(|p| !p.is_empty()) {
            out.push(':');
            out.push_str(port);
        }

        // With a protocol or domain the path can't be omitted; without either
        // a missing path keeps "?query" / "#fragment" / "" partial URIs intact.
        match self.path.as_deref() {
            Some(path) => out.push_str(path),
            None if !out.is_empty() => out.push('/'),
            None => {}
        }

        out.push_str(&self.query_string());
        if let Some(fragment) = self.fragment.as_deref().filter(|f| !f.is_empty()) {
            out.push('#');
            out.push_str(fragment);
        }

        f.write_str(&out)
    }
}

impl fmt::Debug for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Uri")
            .field("protocol", &self.protocol)
            .field("domain", &self.domain)
            .field("port", &self.port)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("fragment", &self.fragment)
            .field("custom_serializer", &self.serializer.is_some())
            .finish()
    }
}

impl FromStr for Uri {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Parse `key=value&...`, translating `+` to space before percent-decoding.
pub fn parse_query(query: &str) -> QueryParams {
    let mut params = QueryParams::new();
    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.insert(form_decode(key), form_decode(value));
    }
    params
}

/// Percent-encode keys and values, dropping `=` for values that encode to "".
pub fn default_query_serializer(params: &QueryParams) -> String {
    params
        .iter()
        .map(|(key, value)| {
            let key = urlencoding::encode(key);
            let value = urlencoding::encode(value);
            if value.is_empty() {
                key.into_owned()
            } else {
                format!("{}={}", key, value)
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn form_decode(text: &str) -> String {
    let spaced = text.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        // Escapes that don't form valid UTF-8: keep what we can
        Err(_) => match urlencoding::decode_binary(spaced.as_bytes()) {
            Cow::Borrowed(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            Cow::Owned(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        },
    }
}

// =============================================================================
// Navigation
// =============================================================================

/// Host navigation service (the browser's `location`, a webview, ...)
pub trait Navigator {
    /// Point the host at a new location
    fn assign(&mut self, uri: &str);

    /// Reload the current location
    fn reload(&mut self);
}

/// What `Uri::go` ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Cancelled,
    Assigned(String),
    Reloaded,
}

/// Cancellable notification sent to observers before navigating
#[derive(Debug, Clone)]
pub struct GoEvent {
    uri: String,
    prevented: bool,
}

impl GoEvent {
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn prevent(&mut self) {
        self.prevented = true;
    }

    pub fn is_prevented(&self) -> bool {
        self.prevented
    }
}

type GoObserver = Box<dyn FnMut(&mut GoEvent)>;

/// Registry of `go` observers, invoked in subscription order
#[derive(Default)]
pub struct GoDispatcher {
    observers: Vec<GoObserver>,
}

impl GoDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&mut GoEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver a `go` event to every observer and return it
    pub fn invoke(&mut self, uri: &str) -> GoEvent {
        let mut event = GoEvent {
            uri: uri.to_string(),
            prevented: false,
        };
        for observer in &mut self.observers {
            observer(&mut event);
        }
        event
    }
}

impl fmt::Debug for GoDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoDispatcher")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_absolute() {
        let uri = Uri::parse("http://www.example.com:8080/asdf.php?a=b&c=d#anchor123");
        assert_eq!(uri.protocol(), Some("http"));
        assert_eq!(uri.domain(), Some("www.example.com"));
        assert_eq!(uri.port(), Some("8080"));
        assert_eq!(uri.path(), Some("/asdf.php"));
        assert_eq!(uri.query_param("a"), Some("b"));
        assert_eq!(uri.query_param("c"), Some("d"));
        assert_eq!(uri.fragment(), Some("anchor123"));
    }

    #[test]
    fn test_parse_relative_has_no_protocol_or_domain() {
        let uri = Uri::parse("/relative/path");
        assert_eq!(uri.protocol(), None);
        assert_eq!(uri.domain(), None);
        assert_eq!(uri.path(), Some("/relative/path"));
    }

    #[test]
    fn test_path_without_slash_is_normalized() {
        let uri = Uri::parse("relative/path");
        assert_eq!(uri.path(), Some("/relative/path"));

        let mut uri = Uri::new();
        uri.set_path(Some("x/y"));
        assert_eq!(uri.path(), Some("/x/y"));
    }

    #[test]
    fn test_domain_without_path_gets_slash() {
        assert_eq!(Uri::parse("http://example.com").to_string(), "http://example.com/");
    }

    #[test]
    fn test_query_decoding() {
        let params = parse_query("a=1+2&b=%26");
        assert_eq!(params.get("a").map(String::as_str), Some("1 2"));
        assert_eq!(params.get("b").map(String::as_str), Some("&"));
    }

    #[test]
    fn test_query_value_may_contain_equals() {
        let params = parse_query("expr=a=b");
        assert_eq!(params.get("expr").map(String::as_str), Some("a=b"));
    }

    #[test]
    fn test_malformed_escape_is_permissive() {
        let params = parse_query("a=%zz");
        assert_eq!(params.get("a").map(String::as_str), Some("%zz"));
    }

    #[test]
    fn test_serializer_omits_equals_for_empty_value() {
        let mut params = QueryParams::new();
        params.insert("flag".into(), String::new());
        params.insert("a".into(), "x y".into());
        assert_eq!(default_query_serializer(&params), "a=x%20y&flag");
    }

    #[test]
    fn test_custom_serializer_replaces_default() {
        fn shout(params: &QueryParams) -> String {
            params.keys().map(|k| k.to_uppercase()).collect::<Vec<_>>().join(";")
        }

        let mut uri = Uri::parse("/p?a=1&b=2");
        uri.set_query_serializer(Some(shout));
        assert_eq!(uri.to_string(), "/p?A;B");
    }

    #[test]
    fn test_set_query_param_none_removes() {
        let mut uri = Uri::parse("/p?a=1&b=2");
        uri.set_query_param("a", None).set_query_param("b", Some("3"));
        assert_eq!(uri.to_string(), "/p?b=3");
    }

    #[test]
    fn test_from_str() {
        let uri: Uri = "#frag".parse().unwrap();
        assert_eq!(uri.fragment(), Some("frag"));
    }
}
