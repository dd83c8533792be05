//! Default keybindings
//!
//! The defaults ship as `keymap.yaml` embedded at compile time; the user's
//! `~/.config/rowscope/keymap.yaml` is layered on top.

use std::path::Path;

use super::binding::Keybinding;
use super::config::{load_keymap_file, parse_keymap_yaml};
use super::types::{KeyCode, Keystroke};
use crate::commands::Command;

/// Default keymap YAML embedded at compile time
const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

pub fn get_default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Embedded defaults, or the hardcoded set if the embedded file is broken
pub fn load_default_keymap() -> Vec<Keybinding> {
    match parse_keymap_yaml(DEFAULT_KEYMAP_YAML) {
        Ok(bindings) => {
            tracing::debug!("Loaded embedded default keymap ({} bindings)", bindings.len());
            bindings
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse embedded keymap: {}, using hardcoded defaults",
                e
            );
            default_bindings()
        }
    }
}

/// Defaults merged with the user keymap at `user_path`, if it exists.
///
/// A broken user file is skipped as a whole.
pub fn load_keymap_with_user(user_path: Option<&Path>) -> Vec<Keybinding> {
    let bindings = load_default_keymap();

    let Some(user_path) = user_path.filter(|p| p.exists()) else {
        return bindings;
    };

    match load_keymap_file(user_path) {
        Ok(user_bindings) => {
            tracing::info!(
                "Merging user keymap from {} ({} bindings)",
                user_path.display(),
                user_bindings.len()
            );
            merge_bindings(bindings, user_bindings)
        }
        Err(e) => {
            tracing::warn!("Failed to load user keymap from {}: {}", user_path.display(), e);
            bindings
        }
    }
}

/// Merge user bindings into base bindings
///
/// A user binding with the same keystrokes replaces the base binding,
/// otherwise it is added.
pub fn merge_bindings(base: Vec<Keybinding>, user: Vec<Keybinding>) -> Vec<Keybinding> {
    let mut result = base;

    for user_binding in user {
        match result
            .iter()
            .position(|b| b.keystrokes == user_binding.keystrokes)
        {
            Some(idx) => result[idx] = user_binding,
            None => result.push(user_binding),
        }
    }

    result
}

/// Hardcoded copy of the embedded keymap
pub fn default_bindings() -> Vec<Keybinding> {
    let mut bindings = vec![
        // Session
        bind(Keystroke::char('q'), "quit"),
        bind(Keystroke::key(KeyCode::Enter), "select"),
        bind(Keystroke::char(':'), "prompt"),
        bind(Keystroke::char('/'), "search"),
        bind(Keystroke::key(KeyCode::Escape), "close"),
        bind(Keystroke::char('='), "show"),
        // Selection
        bind(Keystroke::key(KeyCode::Tab), "toggle"),
        bind(Keystroke::key(KeyCode::Space), "toggle-next"),
        // Navigation
        bind(Keystroke::char('j'), "down"),
        bind(Keystroke::key(KeyCode::Down), "down"),
        bind(Keystroke::char('k'), "up"),
        bind(Keystroke::key(KeyCode::Up), "up"),
        bind(Keystroke::char('G'), "last"),
        Keybinding::chord(
            vec![Keystroke::char('g'), Keystroke::char('g')],
            Command::alias("first"),
        ),
        // Actions
        bind(Keystroke::char('o'), "open"),
        // Preview pane
        bind(Keystroke::char('p'), "preview"),
        bind(Keystroke::char('J'), "scroll-down"),
        bind(Keystroke::char('K'), "scroll-up"),
    ];

    for digit in '0'..='9' {
        bindings.push(bind(Keystroke::char(digit), &format!("show {}", digit)));
    }

    bindings
}

fn bind(keystroke: Keystroke, line: &str) -> Keybinding {
    Keybinding::new(keystroke, Command::alias(line))
}
