//! Application context
//!
//! One `App` value owns all picker state and is passed by `&mut` to every
//! command. The front-end reads it back to draw.

use crate::commands::{register_defaults, Command, CommandRegistry};
use crate::config::PickerConfig;
use crate::keymap::{load_default_keymap, KeyAction, KeyCode, Keymap, Keystroke};
use crate::picker::Picker;
use crate::preview::PreviewController;
use crate::rows::{template, RowStore, RowStoreError};
use crate::scope::Scope;

use std::path::Path;

/// Alias commands may call each other; this bounds runaway recursion
pub const MAX_ALIAS_DEPTH: usize = 64;

/// Which input the keyboard is driving
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Keys go through the keymap
    #[default]
    Normal,
    /// Keys edit the search query
    Search,
    /// Keys edit the command dialog line
    Command,
}

/// Captured output of a modal command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalDisplay {
    pub text: String,
    pub scroll: usize,
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub mode: Mode,
    pub query: String,
    pub command_line: String,
    pub display: Option<ModalDisplay>,
}

#[derive(Debug)]
pub struct App {
    pub picker: Picker,
    pub commands: CommandRegistry,
    pub keymap: Keymap,
    pub scope: Scope,
    pub preview: PreviewController,
    pub ui: UiState,
    status: Option<String>,
    exit_requested: bool,
    final_output: Option<String>,
    interactive: bool,
    full_redraw: bool,
    alias_depth: usize,
}

impl App {
    /// App over `rows` with the default commands and embedded keymap
    pub fn new(rows: RowStore) -> Self {
        Self::with_keymap(rows, Keymap::with_bindings(load_default_keymap()))
    }

    pub fn with_keymap(rows: RowStore, keymap: Keymap) -> Self {
        let mut commands = CommandRegistry::new();
        register_defaults(&mut commands);

        Self {
            picker: Picker::new(rows),
            commands,
            keymap,
            scope: Scope::default(),
            preview: PreviewController::new(),
            ui: UiState::default(),
            status: None,
            exit_requested: false,
            final_output: None,
            interactive: false,
            full_redraw: false,
            alias_depth: 0,
        }
    }

    /// Apply view, preview and cache settings, then run startup lines
    pub fn apply_config(&mut self, config: &PickerConfig) {
        self.scope = Scope::new(config.cache_capacity);
        self.picker.set_view_template(&config.view);
        self.preview.set_visible(config.preview);

        for line in &config.startup {
            if !self.execute_line(line) {
                tracing::warn!(%line, "Startup command failed");
            }
        }
        self.refresh_preview_if_needed();
    }

    // ========================================================================
    // Command dispatch
    // ========================================================================

    /// Run a command line typed by the user or read from config.
    ///
    /// Failures are reported through the status line, never propagated.
    pub fn execute_line(&mut self, line: &str) -> bool {
        let Some((name, _)) = CommandRegistry::split_line(line) else {
            return false;
        };
        if !self.commands.contains(name) {
            tracing::warn!(%name, "Unknown command");
            self.status = Some(format!("unknown command: {}", name));
            return false;
        }

        self.alias_depth = 0;
        self.status = None;
        let ok = CommandRegistry::execute(self, line);
        self.report(line, ok);
        ok
    }

    /// Re-enter the registry on behalf of an alias command
    pub fn execute_alias(&mut self, line: &str) -> bool {
        if self.alias_depth >= MAX_ALIAS_DEPTH {
            tracing::warn!(%line, depth = self.alias_depth, "Alias recursion limit reached");
            return false;
        }

        self.alias_depth += 1;
        let ok = CommandRegistry::execute(self, line);
        self.alias_depth -= 1;
        ok
    }

    /// Run a bound command with no extra arguments
    pub fn run_command(&mut self, command: &Command) -> bool {
        self.alias_depth = 0;
        self.status = None;
        let ok = command.execute(self, "");
        if !ok {
            let label = command.template().unwrap_or("<native>").to_string();
            self.report(&label, ok);
        }
        ok
    }

    /// A failing command that set its own status keeps it
    fn report(&mut self, line: &str, ok: bool) {
        if ok {
            self.status = Some(format!("ok: {}", line));
        } else {
            tracing::warn!(%line, "Command failed");
            if self.status.is_none() {
                self.status = Some(format!("failed: {}", line));
            }
        }
    }

    /// Substitute `text` against the focused row, or an empty row if none
    pub fn substitute_focused(&self, text: &str) -> String {
        match self.picker.focused() {
            Some(original) => self.picker.rows().substitute(text, original),
            None => template::substitute::<&str>(text, &[]),
        }
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Handle one key press. Returns whether it was consumed.
    pub fn handle_key(&mut self, keystroke: Keystroke) -> bool {
        let handled = match self.ui.mode {
            Mode::Normal => self.handle_normal_key(keystroke),
            Mode::Search => self.handle_search_key(keystroke),
            Mode::Command => self.handle_command_key(keystroke),
        };
        self.refresh_preview_if_needed();
        handled
    }

    fn handle_normal_key(&mut self, keystroke: Keystroke) -> bool {
        match self.keymap.handle_keystroke(keystroke) {
            KeyAction::Execute(command) => {
                self.run_command(&command);
                true
            }
            KeyAction::AwaitMore => true,
            KeyAction::NoMatch => false,
        }
    }

    fn handle_search_key(&mut self, keystroke: Keystroke) -> bool {
        match keystroke.key {
            KeyCode::Escape => {
                self.set_query("");
                self.ui.mode = Mode::Normal;
            }
            KeyCode::Enter => self.ui.mode = Mode::Normal,
            KeyCode::Backspace => {
                let mut query = self.ui.query.clone();
                query.pop();
                self.set_query(&query);
            }
            KeyCode::Up => self.picker.move_cursor(-1),
            KeyCode::Down => self.picker.move_cursor(1),
            _ => match keystroke.typed_char() {
                Some(c) => {
                    let query = format!("{}{}", self.ui.query, c);
                    self.set_query(&query);
                }
                None => return false,
            },
        }
        true
    }

    fn handle_command_key(&mut self, keystroke: Keystroke) -> bool {
        match keystroke.key {
            KeyCode::Escape => {
                self.ui.command_line.clear();
                self.ui.mode = Mode::Normal;
            }
            KeyCode::Enter => {
                let line = std::mem::take(&mut self.ui.command_line);
                self.ui.mode = Mode::Normal;
                self.execute_line(&line);
            }
            KeyCode::Backspace => {
                if self.ui.command_line.pop().is_none() {
                    self.ui.mode = Mode::Normal;
                }
            }
            _ => match keystroke.typed_char() {
                Some(c) => self.ui.command_line.push(c),
                None => return false,
            },
        }
        true
    }

    /// Replace the search query and re-rank
    pub fn set_query(&mut self, query: &str) {
        self.ui.query = query.to_string();
        self.picker.apply_query(query);
    }

    pub fn open_command_dialog(&mut self) {
        self.ui.command_line.clear();
        self.ui.mode = Mode::Command;
    }

    pub fn focus_search(&mut self) {
        self.ui.mode = Mode::Search;
    }

    /// Dismiss whatever is on top: modal output first, then the query
    pub fn close(&mut self) -> bool {
        if self.ui.display.take().is_some() {
            return true;
        }
        if !self.ui.query.is_empty() {
            self.set_query("");
            return true;
        }
        false
    }

    // ========================================================================
    // Rows and view
    // ========================================================================

    /// Reload rows from `path`; query, selections and cursor reset
    pub fn load(&mut self, path: &Path, delimiter: char) -> Result<usize, RowStoreError> {
        let result = self.picker.load(path, delimiter);
        self.ui.query.clear();
        self.preview.invalidate();
        self.refresh_preview_if_needed();
        result
    }

    pub fn set_view_template(&mut self, template: &str) {
        self.picker.set_view_template(template);
    }

    /// Delete the row under the cursor
    pub fn delete_focused(&mut self) -> bool {
        let deleted = self.picker.delete_at(self.picker.cursor()).is_some();
        if deleted {
            self.preview.invalidate();
        }
        deleted
    }

    // ========================================================================
    // Preview and modal output
    // ========================================================================

    pub fn toggle_preview(&mut self) {
        let visible = !self.preview.is_visible();
        self.preview.set_visible(visible);
        if visible {
            self.preview.update(&self.picker, &mut self.scope);
        }
    }

    /// Drop cached renders and render the focused row again
    pub fn force_preview_refresh(&mut self) {
        self.scope.clear_cache();
        self.preview.invalidate();
        self.preview.update(&self.picker, &mut self.scope);
    }

    pub fn refresh_preview_if_needed(&mut self) {
        self.preview.update_if_needed(&self.picker, &mut self.scope);
    }

    /// Apply finished background renders. Returns whether anything changed.
    pub fn poll_preview(&mut self) -> bool {
        self.preview.poll(&mut self.scope)
    }

    pub fn show_display(&mut self, text: String) {
        self.ui.display = Some(ModalDisplay { text, scroll: 0 });
    }

    pub fn display(&self) -> Option<&ModalDisplay> {
        self.ui.display.as_ref()
    }

    /// Scroll modal output if shown, else the preview pane if visible
    pub fn scroll(&mut self, delta: isize) -> bool {
        if let Some(display) = self.ui.display.as_mut() {
            let max = display.text.lines().count().saturating_sub(1);
            display.scroll = if delta.is_negative() {
                display.scroll.saturating_sub(delta.unsigned_abs())
            } else {
                display.scroll.saturating_add(delta as usize).min(max)
            };
            return true;
        }

        if !self.preview.is_visible() {
            return false;
        }
        if delta.is_negative() {
            self.preview.scroll_up(delta.unsigned_abs());
        } else {
            self.preview.scroll_down(delta as usize);
        }
        true
    }

    // ========================================================================
    // Session state read by the front-end
    // ========================================================================

    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    /// End the session with `output` to print
    pub fn finish_with(&mut self, output: String) {
        self.final_output = Some(output);
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn final_output(&self) -> Option<&str> {
        self.final_output.as_deref()
    }

    pub fn take_final_output(&mut self) -> Option<String> {
        self.final_output.take()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    /// Whether a terminal front-end currently owns the screen
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    pub fn request_full_redraw(&mut self) {
        if self.interactive {
            self.full_redraw = true;
        }
    }

    pub fn take_full_redraw(&mut self) -> bool {
        std::mem::take(&mut self.full_redraw)
    }
}
