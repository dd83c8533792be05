//! Command-line argument parsing for the picker
//!
//! Supports:
//! - Reading rows from a file or from piped stdin
//! - Overriding the delimiter and view template
//! - Starting with the preview pane open
//! - Ignoring the user config directory

use clap::Parser;
use std::path::PathBuf;

use crate::config::PickerConfig;

/// A scriptable terminal picker for delimited records
#[derive(Parser, Debug)]
#[command(
    name = "rowscope",
    version,
    about = "A scriptable terminal picker for delimited records"
)]
pub struct CliArgs {
    /// File to read rows from (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Field delimiter (a single character)
    #[arg(short = 'd', long, value_name = "CHAR", value_parser = parse_delimiter)]
    pub delimiter: Option<char>,

    /// View template used to label rows, e.g. "{1} ({0})"
    #[arg(long, value_name = "TEMPLATE")]
    pub view: Option<String>,

    /// Start with the preview pane visible
    #[arg(long)]
    pub preview: bool,

    /// Ignore config.yaml and keymap.yaml in the config directory
    #[arg(long)]
    pub no_config: bool,
}

fn parse_delimiter(value: &str) -> Result<char, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!(
            "delimiter must be exactly one character, got {:?}",
            value
        )),
    }
}

/// Where rows come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub input: InputSource,
    pub delimiter: Option<char>,
    pub view: Option<String>,
    pub preview: bool,
    pub use_config_dir: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into startup configuration.
    ///
    /// Without a file, rows must be piped in; an interactive stdin is an error.
    pub fn into_config(self, stdin_is_tty: bool) -> Result<StartupConfig, String> {
        let input = match self.file {
            Some(path) => InputSource::File(path),
            None if stdin_is_tty => {
                return Err("no input: pass a file or pipe data on stdin".to_string())
            }
            None => InputSource::Stdin,
        };

        Ok(StartupConfig {
            input,
            delimiter: self.delimiter,
            view: self.view,
            preview: self.preview,
            use_config_dir: !self.no_config,
        })
    }
}

impl StartupConfig {
    /// Flags given on the command line win over config.yaml
    pub fn apply_overrides(&self, config: &mut PickerConfig) {
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        if let Some(view) = &self.view {
            config.view = view.clone();
        }
        if self.preview {
            config.preview = true;
        }
    }
}
