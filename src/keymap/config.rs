//! YAML configuration parsing for keymaps
//!
//! Parses keymap.yaml files into Keybinding structs, and key strings like
//! `ctrl+x`, `J` or `g g` into keystroke sequences.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::binding::Keybinding;
use super::types::{KeyCode, Keystroke, Modifiers};
use crate::commands::{Command, ExecutionPolicy};

/// Root structure of a keymap YAML file
#[derive(Debug, Deserialize)]
pub struct KeymapConfig {
    pub bindings: Vec<BindingConfig>,
}

/// A single binding entry from YAML
#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    pub key: String,
    /// `alias`, `silent` or `modal`; anything else is `alias`
    #[serde(default)]
    pub policy: Option<String>,
    pub command: String,
}

/// Errors that can occur when parsing keymaps
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeymapError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    #[error("Invalid command for key {0}: command text is empty")]
    InvalidCommand(String),
}

/// Load keybindings from a YAML file
pub fn load_keymap_file(path: &Path) -> Result<Vec<Keybinding>, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::Io(e.to_string()))?;

    parse_keymap_yaml(&content)
}

/// Parse keybindings from a YAML string
pub fn parse_keymap_yaml(yaml: &str) -> Result<Vec<Keybinding>, KeymapError> {
    let config: KeymapConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::Parse(e.to_string()))?;

    config
        .bindings
        .into_iter()
        .map(|entry| {
            let keystrokes = parse_key_sequence(&entry.key)?;
            if entry.command.trim().is_empty() {
                return Err(KeymapError::InvalidCommand(entry.key));
            }
            let policy = entry
                .policy
                .as_deref()
                .map(ExecutionPolicy::from_word)
                .unwrap_or_default();
            Ok(Keybinding::chord(
                keystrokes,
                Command::templated(entry.command, policy),
            ))
        })
        .collect()
}

/// Parse a whitespace-separated keystroke sequence like `g g`
pub fn parse_key_sequence(sequence: &str) -> Result<Vec<Keystroke>, KeymapError> {
    // A lone space is the space key, not an empty sequence
    if sequence == " " {
        return Ok(vec![Keystroke::key(KeyCode::Space)]);
    }

    let strokes = sequence
        .split_whitespace()
        .map(parse_key_string)
        .collect::<Result<Vec<_>, _>>()?;

    if strokes.is_empty() {
        return Err(KeymapError::InvalidKey(sequence.to_string()));
    }
    Ok(strokes)
}

/// Parse a key string like `ctrl+shift+s` into a Keystroke.
///
/// Modifier and named-key words are case-insensitive; a single character is
/// taken exactly as written.
pub fn parse_key_string(key_str: &str) -> Result<Keystroke, KeymapError> {
    // "+" on its own (or as the final part, as in "ctrl++") is the plus key
    let (mods_part, key_part) = match key_str.strip_suffix("++") {
        Some(prefix) => (Some(prefix), "+"),
        None if key_str == "+" => (None, "+"),
        None => match key_str.rsplit_once('+') {
            Some((prefix, key)) => (Some(prefix), key),
            None => (None, key_str),
        },
    };

    let mut mods = Modifiers::NONE;
    if let Some(prefix) = mods_part {
        for part in prefix.split('+') {
            mods = mods
                | match part.to_lowercase().as_str() {
                    "ctrl" | "control" => Modifiers::CTRL,
                    "shift" => Modifiers::SHIFT,
                    "alt" | "option" | "opt" => Modifiers::ALT,
                    "meta" | "super" | "cmd" | "win" => Modifiers::META,
                    _ => {
                        return Err(KeymapError::InvalidKey(format!(
                            "Unknown modifier '{}' in {}",
                            part, key_str
                        )))
                    }
                };
        }
    }

    let key = parse_key_code(key_part)
        .ok_or_else(|| KeymapError::InvalidKey(key_str.to_string()))?;

    Ok(Keystroke::new(key, mods))
}

/// Parse a key code from string
fn parse_key_code(key: &str) -> Option<KeyCode> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }

    let code = match key.to_lowercase().as_str() {
        "enter" | "return" => KeyCode::Enter,
        "escape" | "esc" => KeyCode::Escape,
        "tab" => KeyCode::Tab,
        "backspace" | "back" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "space" => KeyCode::Space,

        "up" | "arrowup" => KeyCode::Up,
        "down" | "arrowdown" => KeyCode::Down,
        "left" | "arrowleft" => KeyCode::Left,
        "right" | "arrowright" => KeyCode::Right,

        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdown" | "pgdn" => KeyCode::PageDown,
        "insert" | "ins" => KeyCode::Insert,

        other => {
            let n = other.strip_prefix('f')?.parse::<u8>().ok()?;
            if (1..=24).contains(&n) {
                KeyCode::F(n)
            } else {
                return None;
            }
        }
    };
    Some(code)
}
