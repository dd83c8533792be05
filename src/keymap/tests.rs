//! Integration tests for the keymap system

use super::*;
use crate::commands::{Command, ExecutionPolicy};

fn default_keymap() -> Keymap {
    Keymap::with_bindings(default_bindings())
}

fn executed_template(action: KeyAction) -> Option<String> {
    match action {
        KeyAction::Execute(command) => command.template().map(str::to_string),
        _ => None,
    }
}

#[test]
fn test_embedded_yaml_parses() {
    let bindings = parse_keymap_yaml(get_default_keymap_yaml())
        .expect("Embedded keymap.yaml should parse successfully");

    assert!(!bindings.is_empty(), "Should have bindings");
    assert!(bindings
        .iter()
        .all(|b| b.command.policy() == Some(ExecutionPolicy::Alias)));
}

#[test]
fn test_load_default_keymap() {
    let bindings = load_default_keymap();
    assert!(!bindings.is_empty(), "Default keymap should not be empty");
}

#[test]
fn test_keymap_lookup_quit_and_select() {
    let keymap = default_keymap();

    assert_eq!(
        keymap.lookup(&Keystroke::char('q')).and_then(Command::template),
        Some("quit")
    );
    assert_eq!(
        keymap
            .lookup(&Keystroke::key(KeyCode::Enter))
            .and_then(Command::template),
        Some("select")
    );
}

#[test]
fn test_keymap_preview_scroll_is_case_sensitive() {
    let keymap = default_keymap();

    assert_eq!(
        keymap.lookup(&Keystroke::char('J')).and_then(Command::template),
        Some("scroll-down")
    );
    assert_eq!(
        keymap.lookup(&Keystroke::char('j')).and_then(Command::template),
        Some("down")
    );
}

#[test]
fn test_keymap_gg_chord_goes_to_first() {
    let mut keymap = default_keymap();

    assert!(matches!(
        keymap.handle_keystroke(Keystroke::char('g')),
        KeyAction::AwaitMore
    ));
    assert_eq!(
        executed_template(keymap.handle_keystroke(Keystroke::char('g'))).as_deref(),
        Some("first")
    );
}

#[test]
fn test_keymap_space_and_tab() {
    let mut keymap = default_keymap();

    assert_eq!(
        executed_template(keymap.handle_keystroke(Keystroke::char(' '))).as_deref(),
        Some("toggle-next")
    );
    assert_eq!(
        executed_template(keymap.handle_keystroke(Keystroke::key(KeyCode::Tab))).as_deref(),
        Some("toggle")
    );
}

#[test]
fn test_bind_overrides_default() {
    let mut keymap = default_keymap();
    let before = keymap.len();

    keymap.bind(
        parse_key_string("o").unwrap(),
        Command::templated("xdg-open {0}", ExecutionPolicy::Silent),
    );

    assert_eq!(keymap.len(), before);
    let command = keymap.lookup(&Keystroke::char('o')).unwrap();
    assert_eq!(command.template(), Some("xdg-open {0}"));
    assert_eq!(command.policy(), Some(ExecutionPolicy::Silent));
}

#[test]
fn test_unbound_key_is_no_match() {
    let mut keymap = default_keymap();
    assert!(matches!(
        keymap.handle_keystroke(Keystroke::char('z')),
        KeyAction::NoMatch
    ));
}
