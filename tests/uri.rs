//! URI parsing, serialization and navigation

use std::cell::RefCell;
use std::rc::Rc;

use tokenfield::uri::{parse_query, GoDispatcher, Navigation, Navigator, QueryParams, Uri};

#[derive(Debug, Default)]
struct RecordingNavigator {
    assigned: Vec<String>,
    reloads: usize,
}

impl Navigator for RecordingNavigator {
    fn assign(&mut self, uri: &str) {
        self.assigned.push(uri.to_string());
    }

    fn reload(&mut self) {
        self.reloads += 1;
    }
}

#[test]
fn test_round_trips() {
    for text in [
        "http://example.com/a/b?c=1&d=2#e",
        "https://example.com:8443/x",
        "/relative/path",
        "?x=y",
        "#frag",
        "",
    ] {
        assert_eq!(Uri::parse(text).to_string(), text, "round trip of {:?}", text);
    }
}

#[test]
fn test_relative_uri_has_no_protocol_or_domain() {
    let uri = Uri::parse("/relative/path?q=1");
    assert_eq!(uri.protocol(), None);
    assert_eq!(uri.domain(), None);
    assert_eq!(uri.path(), Some("/relative/path"));
    assert_eq!(uri.query_param("q"), Some("1"));
}

#[test]
fn test_domain_without_path_gets_root_path() {
    assert_eq!(Uri::parse("http://example.com").to_string(), "http://example.com/");
}

#[test]
fn test_query_decoding() {
    let params = parse_query("a=1+2&b=%26");
    assert_eq!(params.get("a").map(String::as_str), Some("1 2"));
    assert_eq!(params.get("b").map(String::as_str), Some("&"));
}

#[test]
fn test_query_key_without_value() {
    let params = parse_query("flag&x=1");
    assert_eq!(params.get("flag").map(String::as_str), Some(""));

    let mut uri = Uri::new();
    uri.set_query_params(params);
    assert_eq!(uri.to_string(), "?flag&x=1");
}

#[test]
fn test_none_removes_query_param() {
    let mut uri = Uri::new();
    uri.add_query_params([("a", Some("x y")), ("k 1", None)]);
    assert_eq!(uri.to_string(), "?a=x%20y");

    uri.add_query_params([("k 1", Some("v")), ("a", None)]);
    assert_eq!(uri.query_string(), "?k%201=v");

    uri.remove_query_param("k 1");
    assert_eq!(uri.query_string(), "");
}

#[test]
fn test_setters_build_uri() {
    let mut uri = Uri::new();
    uri.set_protocol(Some("https"))
        .set_domain(Some("example.org"))
        .set_path(Some("search"))
        .set_query_param("q", Some("tokens"))
        .set_fragment(Some("top"));
    assert_eq!(uri.path(), Some("/search"));
    assert_eq!(uri.to_string(), "https://example.org/search?q=tokens#top");

    uri.set_path(None);
    assert_eq!(uri.to_string(), "https://example.org/?q=tokens#top");
}

fn pipe_serializer(params: &QueryParams) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}:{}", k, v))
        .collect::<Vec<_>>()
        .join("|")
}

#[test]
fn test_custom_serializer_replaces_default() {
    let mut uri = Uri::parse("/p?b=2&a=1");
    uri.set_query_serializer(Some(pipe_serializer));
    assert_eq!(uri.to_string(), "/p?a:1|b:2");

    uri.set_query_serializer(None);
    assert_eq!(uri.to_string(), "/p?a=1&b=2");
}

#[test]
fn test_from_str() {
    let uri: Uri = "ftp://files.example.com/pub".parse().unwrap();
    assert_eq!(uri.protocol(), Some("ftp"));
    assert_eq!(uri.path(), Some("/pub"));
}

#[test]
fn test_go_assigns_serialized_uri() {
    let mut dispatcher = GoDispatcher::new();
    let mut navigator = RecordingNavigator::default();

    let outcome = Uri::parse("/next?page=2").go(&mut dispatcher, &mut navigator);
    assert_eq!(outcome, Navigation::Assigned("/next?page=2".to_string()));
    assert_eq!(navigator.assigned, vec!["/next?page=2"]);
}

#[test]
fn test_go_with_empty_uri_reloads() {
    let mut dispatcher = GoDispatcher::new();
    let mut navigator = RecordingNavigator::default();

    assert_eq!(Uri::new().go(&mut dispatcher, &mut navigator), Navigation::Reloaded);
    assert_eq!(navigator.reloads, 1);
    assert!(navigator.assigned.is_empty());
}

#[test]
fn test_go_can_be_cancelled() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut dispatcher = GoDispatcher::new();
    {
        let seen = Rc::clone(&seen);
        dispatcher.subscribe(move |event| seen.borrow_mut().push(event.uri().to_string()));
    }
    dispatcher.subscribe(|event| event.prevent());

    let mut navigator = RecordingNavigator::default();
    let outcome = Uri::parse("/away").go(&mut dispatcher, &mut navigator);

    assert_eq!(outcome, Navigation::Cancelled);
    assert_eq!(*seen.borrow(), vec!["/away".to_string()]);
    assert!(navigator.assigned.is_empty());
    assert_eq!(navigator.reloads, 0);
}
