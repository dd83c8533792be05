//! Named command table

use std::collections::HashMap;

use super::command::Command;
use crate::app::App;

/// Name → Command. Registering an existing name replaces it.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, command: Command) {
        let name = name.into();
        if self.commands.insert(name.clone(), command).is_some() {
            tracing::debug!(%name, "Replaced command");
        }
    }

    /// Point `alias` at whatever `target` currently is.
    ///
    /// Returns false when `target` is not registered.
    pub fn register_alias(&mut self, alias: impl Into<String>, target: &str) -> bool {
        match self.commands.get(target).cloned() {
            Some(command) => {
                self.register(alias, command);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Run one command line against `app`.
    ///
    /// Unknown names and empty lines return false without side effects.
    pub fn execute(app: &mut App, line: &str) -> bool {
        let Some((name, args)) = Self::split_line(line) else {
            return false;
        };
        let Some(command) = app.commands.get(name).cloned() else {
            tracing::debug!(%name, "Unknown command");
            return false;
        };

        tracing::debug!(%name, %args, "Dispatching command");
        command.execute(app, args)
    }

    /// Split a command line into its name and the rest as one args string
    pub fn split_line(line: &str) -> Option<(&str, &str)> {
        let line = line.trim_start();
        if line.is_empty() {
            return None;
        }
        match line.split_once(char::is_whitespace) {
            Some((name, rest)) => Some((name, rest.trim_start())),
            None => Some((line, "")),
        }
    }
}
