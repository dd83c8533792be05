//! Command sum type, execution policies and the shell-like tokenizer

use std::fmt;
use std::str::FromStr;

use crate::app::App;

use super::process;

/// In-process command callback. Receives the tokenized arguments.
pub type NativeFn = fn(&mut App, &[String]) -> bool;

/// How a templated command's resolved text is carried out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExecutionPolicy {
    /// Re-enter the command registry with the resolved line
    #[default]
    Alias,
    /// Run the resolved tokens as a process, no shell
    Silent,
    /// Run through `sh -c` and show the captured output
    Modal,
}

impl ExecutionPolicy {
    /// Parse a policy word; anything unrecognised is `Alias`
    pub fn from_word(word: &str) -> Self {
        match word.trim() {
            "silent" => ExecutionPolicy::Silent,
            "modal" => ExecutionPolicy::Modal,
            _ => ExecutionPolicy::Alias,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExecutionPolicy::Alias => "alias",
            ExecutionPolicy::Silent => "silent",
            ExecutionPolicy::Modal => "modal",
        }
    }
}

impl FromStr for ExecutionPolicy {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_word(s))
    }
}

impl fmt::Display for ExecutionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something that can be bound to a name or a key
#[derive(Debug, Clone)]
pub enum Command {
    Native(NativeFn),
    Templated {
        template: String,
        policy: ExecutionPolicy,
    },
}

impl Command {
    pub fn templated(template: impl Into<String>, policy: ExecutionPolicy) -> Self {
        Command::Templated {
            template: template.into(),
            policy,
        }
    }

    /// Shorthand for an alias to another command line
    pub fn alias(line: impl Into<String>) -> Self {
        Self::templated(line, ExecutionPolicy::Alias)
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Command::Native(_))
    }

    /// Template text, `None` for native commands
    pub fn template(&self) -> Option<&str> {
        match self {
            Command::Native(_) => None,
            Command::Templated { template, .. } => Some(template),
        }
    }

    pub fn policy(&self) -> Option<ExecutionPolicy> {
        match self {
            Command::Native(_) => None,
            Command::Templated { policy, .. } => Some(*policy),
        }
    }

    /// Run the command with `args` appended.
    ///
    /// Native commands receive raw tokens with no field substitution.
    /// Templated commands are substituted against the focused row first.
    pub fn execute(&self, app: &mut App, args: &str) -> bool {
        match self {
            Command::Native(callback) => {
                let tokens = tokenize(args);
                callback(app, &tokens)
            }
            Command::Templated { template, policy } => {
                let full = join_args(template, args);
                let resolved = app.substitute_focused(&full);
                tracing::debug!(policy = %policy, %resolved, "Executing templated command");

                match policy {
                    ExecutionPolicy::Alias => app.execute_alias(&resolved),
                    ExecutionPolicy::Silent => {
                        let argv = tokenize(&resolved);
                        let interactive = app.is_interactive();
                        let result =
                            process::with_terminal_released(interactive, || process::run_silent(&argv));
                        app.request_full_redraw();
                        match result {
                            Ok(()) => true,
                            Err(e) => {
                                tracing::warn!("Silent command failed: {}", e);
                                false
                            }
                        }
                    }
                    ExecutionPolicy::Modal => {
                        let output = process::run_shell_capture(&resolved);
                        app.show_display(output);
                        true
                    }
                }
            }
        }
    }
}

fn join_args(template: &str, args: &str) -> String {
    if args.is_empty() {
        template.to_string()
    } else if template.is_empty() {
        args.to_string()
    } else {
        format!("{} {}", template, args)
    }
}

/// Split a line into words the way a POSIX shell would, minus expansion.
///
/// Single quotes are literal, double quotes allow `\"` and `\\`, a bare
/// backslash escapes the next character. An unterminated quote closes at the
/// end of the input. Quoted empty strings produce empty tokens.
pub fn tokenize(line: &str) -> Vec<String> {
    #[derive(Clone, Copy, PartialEq)]
    enum Quote {
        None,
        Single,
        Double,
    }

    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote = Quote::None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match quote {
            Quote::Single => {
                if c == '\'' {
                    quote = Quote::None;
                } else {
                    current.push(c);
                }
            }
            Quote::Double => match c {
                '"' => quote = Quote::None,
                '\\' => match chars.next() {
                    Some(next @ ('"' | '\\')) => current.push(next),
                    Some(next) => {
                        current.push('\\');
                        current.push(next);
                    }
                    None => current.push('\\'),
                },
                _ => current.push(c),
            },
            Quote::None => match c {
                '\'' => {
                    quote = Quote::Single;
                    in_token = true;
                }
                '"' => {
                    quote = Quote::Double;
                    in_token = true;
                }
                '\\' => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                    in_token = true;
                }
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                _ => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }

    if in_token {
        tokens.push(current);
    }
    tokens
}
