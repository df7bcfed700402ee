//! User configuration: `<config dir>/kedit/config.toml`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Columns per tab stop when rendering.
    pub tab_stop: usize,
    /// Extra Ctrl-Q presses needed to quit with unsaved changes.
    pub quit_times: u32,
    /// How long a status message stays on the message line.
    pub message_timeout_secs: u64,
    /// Longest wait for one input byte before the screen is refreshed anyway.
    pub read_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_stop: 4,
            quit_times: 2,
            message_timeout_secs: 5,
            read_timeout_ms: 100,
        }
    }
}

impl Config {
    pub fn message_timeout(&self) -> Duration {
        Duration::from_secs(self.message_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Parse a config file body. Missing keys fall back to their defaults.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let mut cfg: Config = toml::from_str(raw)?;
        cfg.tab_stop = cfg.tab_stop.max(1);
        Ok(cfg)
    }
}

/// Where the config file lives, if the platform has a config directory.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join("kedit").join("config.toml"))
}

/// Load the user config. A missing file means defaults; a broken one is an error.
pub fn load_config() -> Result<Config> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => Ok(Config::default()),
    }
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Config::from_toml(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = Config::from_toml("tab_stop = 8\nquit_times = 0\n").unwrap();
        assert_eq!(cfg.tab_stop, 8);
        assert_eq!(cfg.quit_times, 0);
        assert_eq!(cfg.message_timeout(), Duration::from_secs(5));
        assert_eq!(cfg.read_timeout(), Duration::from_millis(100));
    }

    #[test]
    fn zero_tab_stop_is_raised_to_one() {
        let cfg = Config::from_toml("tab_stop = 0").unwrap();
        assert_eq!(cfg.tab_stop, 1);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(Config::from_toml("tab_stop = \"wide\"").is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "message_timeout_secs = 2\n").unwrap();
        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.message_timeout_secs, 2);
        assert_eq!(cfg.tab_stop, 4);
    }
}
