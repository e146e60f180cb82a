use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wordtemplate::ParseOptions;

pub const DEFAULT_CONFIG_NAME: &str = "wordtemplate.config.json";

/// Wordtemplate configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Scan page headers for markers
    #[serde(default = "enabled")]
    pub headers: bool,

    /// Scan page footers for markers
    #[serde(default = "enabled")]
    pub footers: bool,

    /// Abort a render on the first failing marker; otherwise failed markers
    /// keep their text and are reported
    #[serde(default = "enabled")]
    pub strict: bool,

    /// Pretty-print JSON output
    #[serde(default = "enabled")]
    pub pretty: bool,
}

fn enabled() -> bool {
    true
}

impl Config {
    /// Load config from a directory, falling back to defaults
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            Self::load_file(&config_path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load an explicitly named config file, which must exist
    pub fn load_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            headers: self.headers,
            footers: self.footers,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            headers: true,
            footers: true,
            strict: true,
            pretty: true,
        }
    }
}
