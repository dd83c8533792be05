//! Keybinding struct representing a mapping from keystroke(s) to command

use super::types::Keystroke;
use crate::commands::Command;

/// A single keybinding mapping one or more keystrokes to a command
#[derive(Debug, Clone)]
pub struct Keybinding {
    /// The keystroke sequence (usually 1, 2 for chords like `g g`)
    pub keystrokes: Vec<Keystroke>,
    pub command: Command,
}

impl Keybinding {
    /// Create a single-keystroke binding
    pub fn new(keystroke: Keystroke, command: Command) -> Self {
        Self {
            keystrokes: vec![keystroke],
            command,
        }
    }

    /// Create a chord binding (multi-keystroke sequence)
    pub fn chord(keystrokes: Vec<Keystroke>, command: Command) -> Self {
        Self {
            keystrokes,
            command,
        }
    }

    pub fn matches_single(&self, keystroke: &Keystroke) -> bool {
        self.keystrokes.len() == 1 && self.keystrokes[0] == *keystroke
    }

    pub fn starts_with(&self, keystroke: &Keystroke) -> bool {
        self.keystrokes.first() == Some(keystroke)
    }

    pub fn is_chord(&self) -> bool {
        self.keystrokes.len() > 1
    }

    /// Key-string form, e.g. `g g` or `ctrl+x`
    pub fn display_string(&self) -> String {
        self.keystrokes
            .iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
