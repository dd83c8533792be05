//! rowscope - scriptable terminal picker
//!
//! This crate provides the core types and logic for a picker over delimited
//! records: a row store with field templates, fuzzy filtering, a command
//! registry driven by keybindings, and a content-aware preview pane.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod fuzzy;
pub mod keymap;
pub mod picker;
pub mod preview;
pub mod rows;
pub mod scope;
pub mod tracing;
pub mod tui;

// Re-export commonly used types
pub use app::App;
pub use commands::{Command, CommandRegistry, ExecutionPolicy};
pub use config::PickerConfig;
pub use picker::Picker;
pub use preview::PreviewController;
pub use rows::RowStore;
pub use scope::Scope;
