//! Application configuration
//!
//! Every field has a default, so an empty (or absent) YAML file yields the
//! stock setup. Fields omitted from a file keep their defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "KGRAPH_CONFIG";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub render: RenderConfig,
    pub shell: ShellConfig,
}

impl AppConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml(text: &str) -> ConfigResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Self::from_yaml(&text)
    }

    /// Load from `path` if given, otherwise fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

/// Graphviz rendering options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output path without extension
    pub output: PathBuf,
    /// Image format passed to `dot -T`
    pub format: String,
    /// Graphviz executable
    pub dot_binary: String,
    /// Layout direction (LR, TB, ...)
    pub rankdir: String,
    /// Fill colour per node label
    pub label_colors: BTreeMap<String, String>,
    /// Fill colour for labels without an entry
    pub default_color: String,
    pub node_font_color: String,
    pub edge_color: String,
    pub edge_font_color: String,
    /// Property keys shown only when their value is short
    pub hidden_when_long: Vec<String>,
    /// Length at which a hidden-when-long value is dropped
    pub long_value_threshold: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let label_colors = [
            ("Team", "#FFD700"),
            ("Player", "#3CB371"),
            ("Tournament", "#00BFFF"),
            ("Game", "#FF6347"),
        ]
        .into_iter()
        .map(|(label, color)| (label.to_string(), color.to_string()))
        .collect();

        Self {
            output: PathBuf::from("knowledge_graph"),
            format: "png".to_string(),
            dot_binary: "dot".to_string(),
            rankdir: "LR".to_string(),
            label_colors,
            default_color: "#E0E0E0".to_string(),
            node_font_color: "black".to_string(),
            edge_color: "#A9A9A9".to_string(),
            edge_font_color: "#696969".to_string(),
            hidden_when_long: vec!["id".to_string(), "city".to_string(), "year".to_string()],
            long_value_threshold: 20,
        }
    }
}

impl RenderConfig {
    /// Fill colour for a node label
    pub fn color_for(&self, label: &str) -> &str {
        self.label_colors
            .get(label)
            .map(String::as_str)
            .unwrap_or(&self.default_color)
    }
}

/// Interactive shell options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Teams required before the championship setup may stop
    pub min_teams: usize,
    /// Games required before the championship setup may stop
    pub min_games: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            min_teams: 4,
            min_games: 2,
        }
    }
}
