//! Tokenizer configuration persistence
//!
//! Stores defaults in `~/.config/tokenfield/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Caret allowance added to the measured text width on redraw
pub const DEFAULT_WIDTH_PADDING: f32 = 24.0;

/// Tokenizer configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// Maximum number of tokens live typing may reach (None = unlimited)
    #[serde(default)]
    pub limit: Option<usize>,

    /// Pixels added to the measured input width for the caret
    #[serde(default = "default_width_padding")]
    pub width_padding: f32,

    /// Glyph advance used by the monospace metrics
    #[serde(default = "default_char_width")]
    pub char_width: f32,

    /// Hide the suggestion list after a suggestion becomes a token
    #[serde(default = "default_true")]
    pub hide_results_on_choose: bool,

    /// Form field name tokens are submitted under
    #[serde(default = "default_field_name")]
    pub field_name: String,
}

fn default_width_padding() -> f32 {
    DEFAULT_WIDTH_PADDING
}

fn default_char_width() -> f32 {
    8.0
}

fn default_true() -> bool {
    true
}

fn default_field_name() -> String {
    "tokens".to_string()
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            limit: None,
            width_padding: default_width_padding(),
            char_width: default_char_width(),
            hide_results_on_choose: default_true(),
            field_name: default_field_name(),
        }
    }
}

impl TokenizerConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
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

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific file, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: TokenizerConfig = serde_yaml::from_str("limit: 3\n").unwrap();
        assert_eq!(config.limit, Some(3));
        assert_eq!(config.width_padding, DEFAULT_WIDTH_PADDING);
        assert!(config.hide_results_on_choose);
        assert_eq!(config.field_name, "tokens");
    }
}
