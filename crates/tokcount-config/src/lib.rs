use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User configuration for tokcount (`config.toml`)
///
/// Every field has a default; command-line flags override these values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Tokenizer encoding name
    #[serde(default = "default_encoding")]
    pub encoding: String,

    /// Worker count for directory scans (defaults to available cores)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_workers: Option<usize>,

    #[serde(default)]
    pub scan: ScanDefaults,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanDefaults {
    /// Exclude patterns applied to every directory scan
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Skip directories whose name matches an exclude pattern
    #[serde(default)]
    pub prune_excluded_dirs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            encoding: default_encoding(),
            max_workers: None,
            scan: ScanDefaults::default(),
        }
    }
}

fn default_encoding() -> String {
    "cl100k_base".to_string()
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            // Create default config file
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(&path, content)?;
            Ok(config)
        }
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "tokcount", "tokcount") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.tokcount/config.toml")
        }
    }
}
