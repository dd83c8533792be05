//! Keymap struct for storing and looking up keybindings

use std::collections::HashMap;

use super::binding::Keybinding;
use super::types::Keystroke;
use crate::commands::Command;

/// Result of handling a keystroke
#[derive(Debug, Clone)]
pub enum KeyAction {
    /// Execute this command
    Execute(Command),
    /// Keystroke is part of a chord, await more input
    AwaitMore,
    /// No binding matches this keystroke
    NoMatch,
}

/// Key event → Command registry.
///
/// Binding the same keystroke sequence again replaces the earlier binding.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<Keybinding>,
    /// Single keystroke → index into bindings
    single_lookup: HashMap<Keystroke, usize>,
    /// First keystroke of a chord → indices into bindings
    chord_prefixes: HashMap<Keystroke, Vec<usize>>,
    pending_chord: Vec<Keystroke>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bindings(bindings: Vec<Keybinding>) -> Self {
        let mut keymap = Self::new();
        for binding in bindings {
            keymap.add_binding(binding);
        }
        keymap
    }

    /// Add a binding, replacing any binding for the same keystrokes
    pub fn add_binding(&mut self, binding: Keybinding) {
        let Some(&first_stroke) = binding.keystrokes.first() else {
            return;
        };

        if let Some(idx) = self
            .bindings
            .iter()
            .position(|b| b.keystrokes == binding.keystrokes)
        {
            tracing::debug!(key = %binding.display_string(), "Rebinding key");
            self.bindings[idx] = binding;
            return;
        }

        let idx = self.bindings.len();
        if binding.is_chord() {
            self.chord_prefixes
                .entry(first_stroke)
                .or_default()
                .push(idx);
        } else {
            self.single_lookup.insert(first_stroke, idx);
        }
        self.bindings.push(binding);
    }

    /// Bind a single keystroke
    pub fn bind(&mut self, keystroke: Keystroke, command: Command) {
        self.add_binding(Keybinding::new(keystroke, command));
    }

    /// Clear pending chord state
    pub fn reset(&mut self) {
        self.pending_chord.clear();
    }

    /// Handle a keystroke, tracking chord state across calls.
    ///
    /// Single-keystroke bindings win over chord prefixes.
    pub fn handle_keystroke(&mut self, keystroke: Keystroke) -> KeyAction {
        if !self.pending_chord.is_empty() {
            self.pending_chord.push(keystroke);
            return self.try_complete_chord();
        }

        if let Some(command) = self.lookup(&keystroke) {
            return KeyAction::Execute(command.clone());
        }

        if self.chord_prefixes.contains_key(&keystroke) {
            self.pending_chord.push(keystroke);
            return KeyAction::AwaitMore;
        }

        KeyAction::NoMatch
    }

    fn try_complete_chord(&mut self) -> KeyAction {
        let first = self.pending_chord[0];

        let Some(indices) = self.chord_prefixes.get(&first) else {
            self.reset();
            return KeyAction::NoMatch;
        };

        if let Some(binding) = indices
            .iter()
            .map(|&idx| &self.bindings[idx])
            .find(|b| b.keystrokes == self.pending_chord)
        {
            let command = binding.command.clone();
            self.reset();
            return KeyAction::Execute(command);
        }

        let could_match = indices.iter().any(|&idx| {
            let binding = &self.bindings[idx];
            binding.keystrokes.len() > self.pending_chord.len()
                && binding.keystrokes[..self.pending_chord.len()] == self.pending_chord
        });

        if could_match {
            KeyAction::AwaitMore
        } else {
            self.reset();
            KeyAction::NoMatch
        }
    }

    /// Look up a single keystroke without chord handling
    pub fn lookup(&self, keystroke: &Keystroke) -> Option<&Command> {
        let idx = *self.single_lookup.get(keystroke)?;
        self.bindings.get(idx).map(|b| &b.command)
    }

    pub fn bindings(&self) -> &[Keybinding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn has_pending_chord(&self) -> bool {
        !self.pending_chord.is_empty()
    }

    /// Pending chord keystrokes for the status line
    pub fn pending_chord_display(&self) -> Option<String> {
        if self.pending_chord.is_empty() {
            None
        } else {
            Some(
                self.pending_chord
                    .iter()
                    .map(|k| k.to_string())
                    .collect::<Vec<_>>()
                    .join(" "),
            )
        }
    }
}
