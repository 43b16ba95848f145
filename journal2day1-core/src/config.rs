use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::warn;

pub const DEFAULT_JOURNAL_NAME: &str = "Journal";
pub const DEFAULT_TIME_ZONE: &str = "Europe/Sofia";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Name of the Day One journal; also names the JSON file inside the archive.
    pub journal_name: String,
    /// Zone label written on every entry (e.g. `Europe/Sofia`). Stored as-is, not validated.
    pub time_zone: String,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    journal_name: Option<String>,
    time_zone: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            journal_name: DEFAULT_JOURNAL_NAME.to_string(),
            time_zone: DEFAULT_TIME_ZONE.to_string(),
        }
    }
}

impl Config {
    /// Loads the first config file found (XDG path, then the platform config dir) and fills
    /// anything missing with defaults. A broken file is ignored rather than fatal.
    pub fn load() -> Self {
        let file_config = Self::read_file_config().unwrap_or_else(|err| {
            warn!(error = %format!("{err:#}"), "ignoring config file");
            FileConfig::default()
        });
        Self::from_file_config(file_config)
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        let defaults = Self::default();
        Self {
            journal_name: file_config
                .journal_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(defaults.journal_name),
            time_zone: file_config
                .time_zone
                .filter(|zone| !zone.trim().is_empty())
                .unwrap_or(defaults.time_zone),
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b
                .home_dir()
                .join(".config")
                .join("journal2day1")
                .join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("journal2day1").join("config.toml");
            if !v.contains(&native) {
                v.push(native);
            }
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }
}
