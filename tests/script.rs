//! Script replay against the in-memory suggestion source

use tokenfield::script::{run_script, Script, ScriptError};
use tokenfield::tokenizer::{
    Container, ElementId, FormField, ListSource, Suggestion, Tokenizer,
};

fn tokenizer(initial: &[(&str, &str)]) -> Tokenizer<ListSource> {
    let mut tokenizer = Tokenizer::new(Container::new(FormField::new("to", "to")));
    tokenizer
        .set_typeahead(ListSource::new(vec![
            Suggestion::new("1", "Alice Liddell"),
            Suggestion::new("2", "Bob Dobbs"),
            Suggestion::new("3", "Alan Turing"),
        ]))
        .set_initial_value(initial.iter().copied())
        .set_next_input(Some(ElementId::new("subject")));
    tokenizer.start().unwrap();
    tokenizer
}

#[test]
fn test_type_and_tab_completes_first_match() {
    let script = Script::from_yaml(
        r#"
steps:
  - type: "al"
  - key: tab
"#,
    )
    .unwrap();

    let mut tokenizer = tokenizer(&[]);
    let report = run_script(&mut tokenizer, &script).unwrap();

    assert_eq!(report.tokens.get("1").map(String::as_str), Some("Alice Liddell"));
    assert_eq!(report.fields.len(), 1);
    assert_eq!(report.fields[0].name, "to[0]");
    assert_eq!(report.fields[0].value, "1");
    assert_eq!(report.text, "");
    assert_eq!(report.prevented, 1);
    assert!(report.commands.contains(&"focus-next subject".to_string()));
}

#[test]
fn test_remove_click_and_backspace() {
    let script = Script::from_yaml(
        r#"
steps:
  - click:
      remove: "a"
  - key: backspace
  - key: backspace
"#,
    )
    .unwrap();

    let mut tokenizer = tokenizer(&[("a", "A"), ("b", "B"), ("c", "C")]);
    let report = run_script(&mut tokenizer, &script).unwrap();

    assert!(report.tokens.is_empty());
    assert!(report.commands.contains(&"focus to-input".to_string()));
}

#[test]
fn test_report_serializes_to_json() {
    let script = Script::from_yaml("steps:\n  - paste: \"bob\"\n").unwrap();
    let mut tokenizer = tokenizer(&[]);
    let report = run_script(&mut tokenizer, &script).unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["text"], "bob");
    assert_eq!(json["tokens"], serde_json::json!({}));
}

#[test]
fn test_unknown_key_is_an_error() {
    let script = Script::from_yaml("steps:\n  - key: \"hyper+q\"\n").unwrap();
    let mut tokenizer = tokenizer(&[]);
    assert!(matches!(
        run_script(&mut tokenizer, &script),
        Err(ScriptError::Key(_))
    ));
}

#[test]
fn test_load_reads_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("script.yaml");
    std::fs::write(&path, "steps:\n  - type: \"bo\"\n  - key: enter\n").unwrap();

    let script = Script::load(&path).unwrap();
    let mut tokenizer = tokenizer(&[]);
    let report = run_script(&mut tokenizer, &script).unwrap();
    assert_eq!(report.tokens.get("2").map(String::as_str), Some("Bob Dobbs"));

    assert!(matches!(
        Script::load(&dir.path().join("missing.yaml")),
        Err(ScriptError::Io(_))
    ));
}
