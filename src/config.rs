//! Picker configuration
//!
//! Reads user preferences from `~/.config/rowscope/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::picker::DEFAULT_VIEW_TEMPLATE;
use crate::scope::DEFAULT_CACHE_CAPACITY;

/// Picker configuration, every key optional
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Field delimiter used when `--delimiter` is not given
    pub delimiter: char,
    /// Initial view template
    pub view: String,
    /// Whether the preview pane starts visible
    pub preview: bool,
    /// Rendered previews kept in memory
    pub cache_capacity: usize,
    /// Command lines run once after the rows are loaded
    pub startup: Vec<String>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            delimiter: '|',
            view: DEFAULT_VIEW_TEMPLATE.to_string(),
            preview: false,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            startup: Vec::new(),
        }
    }
}

impl PickerConfig {
    /// Load config from the user config dir, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<PickerConfig>(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config.normalized()
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn normalized(mut self) -> Self {
        if self.cache_capacity == 0 {
            tracing::warn!("cache_capacity must be at least 1, using 1");
            self.cache_capacity = 1;
        }
        self
    }
}
