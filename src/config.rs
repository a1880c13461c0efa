use crate::index::{DEFAULT_CHUNK_SIZE, DEFAULT_CONTEXT_SIZE, DEFAULT_MAX_CONTEXTS};
use crate::search::{ContextLimits, TruncationPolicy};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "quarry";
const CONFIG_FILE: &str = "config.json";

/// Query tuning stored in the app data directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Backward scan window when resolving document IDs
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Bytes of context on each side of a match
    #[serde(default = "default_context_size")]
    pub context_size: usize,

    /// Occurrences considered by a context request
    #[serde(default = "default_max_contexts")]
    pub max_contexts: usize,

    /// Comparison of suffixes cut short by the corpus end
    #[serde(default)]
    pub truncation: TruncationPolicy,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_context_size() -> usize {
    DEFAULT_CONTEXT_SIZE
}

fn default_max_contexts() -> usize {
    DEFAULT_MAX_CONTEXTS
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            context_size: default_context_size(),
            max_contexts: default_max_contexts(),
            truncation: TruncationPolicy::default(),
        }
    }
}

impl QueryConfig {
    /// Load config from the app data directory, or return default if not found
    pub fn load() -> Result<Self> {
        match get_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: QueryConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn context_limits(&self) -> ContextLimits {
        ContextLimits {
            window: self.context_size,
            max_occurrences: self.max_contexts,
        }
    }
}

/// Path of the config file, if the platform has a data directory
pub fn get_config_path() -> Option<PathBuf> {
    get_app_data_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Application data directory (not created)
pub fn get_app_data_dir() -> Option<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: use XDG_DATA_HOME or ~/.local/share
        dirs::data_dir()
    };
    base.map(|b| b.join(APP_NAME))
}
