//! Configurable keyboard mapping
//!
//! Maps keystrokes (and short chords like `g g`) to commands. Every default
//! binding is an alias to a named command line, so users can rebind keys to
//! any command, or to external tools through the `silent`/`modal` policies.
//!
//! ```text
//! crossterm::KeyEvent → Keystroke → Keymap::handle_keystroke() → Command
//! ```

mod binding;
mod config;
mod crossterm_adapter;
mod defaults;
#[allow(clippy::module_inception)]
mod keymap;
mod types;

pub use binding::Keybinding;
pub use config::{
    load_keymap_file, parse_key_sequence, parse_key_string, parse_keymap_yaml, KeymapError,
};
pub use crossterm_adapter::keystroke_from_crossterm;
pub use defaults::{
    default_bindings, get_default_keymap_yaml, load_default_keymap, load_keymap_with_user,
    merge_bindings,
};
pub use keymap::{KeyAction, Keymap};
pub use types::{KeyCode, Keystroke, Modifiers};

#[cfg(test)]
mod tests;
