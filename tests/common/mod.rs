//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::io::Write;
use std::path::Path;

use rowscope::rows::RowStore;
use rowscope::App;

/// Create an app over `lines`, split on '|'
pub fn test_app(lines: &[&str]) -> App {
    App::new(test_rows(lines))
}

pub fn test_rows(lines: &[&str]) -> RowStore {
    let mut rows = RowStore::new();
    for line in lines {
        rows.add_line(line, '|');
    }
    rows
}

/// Labels in display order
pub fn displayed(app: &App) -> Vec<String> {
    app.picker
        .display_labels()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Write `content` to `name` inside `dir` and return its path as a string
pub fn write_file(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path.display().to_string()
}

/// Numbered lines "line 1".."line n"
pub fn numbered_lines(n: usize) -> String {
    (1..=n).map(|i| format!("line {}\n", i)).collect()
}
