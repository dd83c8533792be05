//! Filter and selection tests
//!
//! Drive the picker through the app the way the keyboard does

mod common;

use common::{displayed, test_app};

use rowscope::app::Mode;
use rowscope::keymap::{KeyCode, Keystroke};
use rowscope::App;

fn type_keys(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(Keystroke::char(c));
    }
}

fn press(app: &mut App, key: KeyCode) {
    app.handle_key(Keystroke::key(key));
}

// ========================================================================
// Search
// ========================================================================

#[test]
fn test_search_ranks_best_match_first() {
    let mut app = test_app(&["alpha", "beta", "gamma"]);

    type_keys(&mut app, "/bet");
    assert_eq!(app.ui.mode, Mode::Search);
    assert_eq!(app.picker.query(), "bet");
    assert_eq!(displayed(&app)[0], "beta");
    assert_eq!(app.picker.len(), 3, "ranking never hides rows");
    assert_eq!(app.picker.cursor(), 0);
}

#[test]
fn test_search_backspace_and_enter() {
    let mut app = test_app(&["alpha", "beta", "gamma"]);

    type_keys(&mut app, "/gx");
    press(&mut app, KeyCode::Backspace);
    assert_eq!(app.picker.query(), "g");

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.ui.mode, Mode::Normal);
    assert_eq!(app.picker.query(), "g", "enter keeps the query");
}

#[test]
fn test_escape_in_search_clears_query() {
    let mut app = test_app(&["alpha", "beta"]);

    type_keys(&mut app, "/be");
    press(&mut app, KeyCode::Escape);
    assert_eq!(app.ui.mode, Mode::Normal);
    assert_eq!(app.picker.query(), "");
    assert_eq!(displayed(&app), vec!["alpha", "beta"]);
}

#[test]
fn test_escape_in_normal_mode_closes_query() {
    let mut app = test_app(&["alpha", "beta"]);
    app.set_query("beta");

    press(&mut app, KeyCode::Escape);
    assert_eq!(app.picker.query(), "");
    assert_eq!(displayed(&app), vec!["alpha", "beta"]);
}

#[test]
fn test_smart_case_query() {
    let mut app = test_app(&["readme", "README"]);

    app.set_query("READ");
    assert_eq!(displayed(&app)[0], "README");

    app.set_query("read");
    assert_eq!(displayed(&app)[0], "readme", "ties keep original order");
}

// ========================================================================
// Cursor movement
// ========================================================================

#[test]
fn test_cursor_keys_clamp() {
    let mut app = test_app(&["a", "b", "c"]);

    type_keys(&mut app, "jjjj");
    assert_eq!(app.picker.cursor(), 2);

    type_keys(&mut app, "gg");
    assert_eq!(app.picker.cursor(), 0);

    type_keys(&mut app, "G");
    assert_eq!(app.picker.cursor(), 2);

    type_keys(&mut app, "k");
    assert_eq!(app.picker.cursor(), 1);
}

// ========================================================================
// Selection output
// ========================================================================

#[test]
fn test_enter_without_selection_outputs_focused_row() {
    let mut app = test_app(&["a|1", "b|2"]);
    app.execute_line("view {1}");

    type_keys(&mut app, "j");
    press(&mut app, KeyCode::Enter);

    assert!(app.exit_requested());
    assert_eq!(app.final_output(), Some("2"));
}

#[test]
fn test_selection_output_uses_original_order() {
    let mut app = test_app(&["first", "second", "third"]);

    // Select bottom-up so toggle order differs from row order
    type_keys(&mut app, "G");
    press(&mut app, KeyCode::Tab);
    type_keys(&mut app, "gg");
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.final_output(), Some("first\nthird"));
}

#[test]
fn test_selection_output_after_reranking() {
    let mut app = test_app(&["apple", "banana", "cherry"]);
    app.set_query("cherry");
    app.execute_line("toggle");
    app.set_query("banana");
    app.execute_line("toggle");

    app.execute_line("select");
    assert_eq!(app.final_output(), Some("banana\ncherry"));
}

#[test]
fn test_space_toggles_and_advances() {
    let mut app = test_app(&["a", "b", "c"]);

    press(&mut app, KeyCode::Space);
    press(&mut app, KeyCode::Space);
    assert_eq!(app.picker.cursor(), 2);
    assert!(app.picker.is_selected(0));
    assert!(app.picker.is_selected(1));
    assert!(!app.picker.is_selected(2));
}

#[test]
fn test_invert_then_clear() {
    let mut app = test_app(&["a", "b", "c"]);
    app.execute_line("toggle");

    assert!(app.execute_line("toggle-all"));
    assert_eq!(
        app.picker.selections().iter().copied().collect::<Vec<_>>(),
        vec![1, 2]
    );

    assert!(app.execute_line("clear-selections"));
    assert!(app.picker.selections().is_empty());
}

#[test]
fn test_select_on_empty_list_fails() {
    let mut app = test_app(&[]);
    assert!(!app.execute_line("select"));
    assert!(!app.exit_requested());
}

// ========================================================================
// View templates
// ========================================================================

#[test]
fn test_digit_keys_show_field() {
    let mut app = test_app(&["id1|Alice|admin", "id2|Bob|user"]);

    type_keys(&mut app, "1");
    assert_eq!(displayed(&app), vec!["Alice", "Bob"]);

    type_keys(&mut app, "=");
    assert_eq!(displayed(&app), vec!["id1 | Alice | admin", "id2 | Bob | user"]);
}

#[test]
fn test_view_template_reranks_active_query() {
    let mut app = test_app(&["x|zebra", "y|apple"]);
    app.set_query("apple");
    assert_eq!(displayed(&app)[0], "y | apple");

    app.execute_line("view {0}");
    assert_eq!(app.picker.len(), 2);
    assert_eq!(displayed(&app), vec!["x", "y"]);
}

// ========================================================================
// Deletion
// ========================================================================

#[test]
fn test_delete_under_query_keeps_indices_consistent() {
    let mut app = test_app(&["alpha", "beta", "gamma", "delta"]);
    app.picker.select_all();
    app.set_query("gamma");
    assert_eq!(displayed(&app)[0], "gamma");

    assert!(app.execute_line("delete"));

    assert_eq!(app.picker.rows().len(), 3);
    assert_eq!(app.picker.len(), 3);
    assert!(!displayed(&app).contains(&"gamma".to_string()));
    assert_eq!(
        app.picker.selections().iter().copied().collect::<Vec<_>>(),
        vec![0, 1, 2]
    );

    app.set_query("");
    app.execute_line("select");
    assert_eq!(app.final_output(), Some("alpha\nbeta\ndelta"));
}

#[test]
fn test_delete_until_empty() {
    let mut app = test_app(&["a", "b"]);
    assert!(app.execute_line("delete"));
    assert!(app.execute_line("delete"));
    assert!(!app.execute_line("delete"));
    assert!(app.picker.is_empty());
    assert!(app.picker.focused().is_none());
}
