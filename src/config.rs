//! Configuration - backend credentials and log settings
//!
//! Read from `~/.motiv/config.yaml`; `SUPABASE_URL`, `SUPABASE_ANON_KEY` and
//! `MOTIV_TABLE` override the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_LOG_FILE, DEFAULT_LOG_LEVEL, DEFAULT_TABLE};

const CONFIG_FILE: &str = "config.yaml";

/// Everything the binary needs before it starts the actors
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub table: Option<String>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Resolved remote backend settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
    pub table: String,
}

impl Config {
    /// `~/.motiv`, or `./.motiv` without a home directory
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".motiv")
    }

    /// Load the config file and apply environment overrides
    pub fn load() -> Result<Self> {
        let config = Self::load_from(&Self::config_dir().join(CONFIG_FILE))?;
        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Load from a path; a missing file is an empty config
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Apply environment-style overrides from a lookup function
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("SUPABASE_URL") {
            self.supabase_url = Some(url);
        }
        if let Some(key) = lookup("SUPABASE_ANON_KEY") {
            self.supabase_anon_key = Some(key);
        }
        if let Some(table) = lookup("MOTIV_TABLE") {
            self.table = Some(table);
        }
        self
    }

    /// Remote backend, when both URL and key are set
    pub fn backend(&self) -> Option<BackendConfig> {
        let url = non_empty(self.supabase_url.as_deref())?;
        let anon_key = non_empty(self.supabase_anon_key.as_deref())?;
        Some(BackendConfig {
            url,
            anon_key,
            table: self.table(),
        })
    }

    pub fn table(&self) -> String {
        non_empty(self.table.as_deref()).unwrap_or_else(|| DEFAULT_TABLE.to_string())
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| Self::config_dir().join(DEFAULT_LOG_FILE))
    }

    /// Tracing filter directive
    pub fn log_filter(&self) -> String {
        non_empty(self.log_level.as_deref()).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.yaml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.backend().is_none());
        assert_eq!(config.table(), "quotes");
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn test_load_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "supabase_url: https://abc.supabase.co\nsupabase_anon_key: anon\nlog_level: debug\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        let backend = config.backend().unwrap();
        assert_eq!(backend.url, "https://abc.supabase.co");
        assert_eq!(backend.anon_key, "anon");
        assert_eq!(backend.table, "quotes");
        assert_eq!(config.log_filter(), "debug");
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "supabase_url: [unclosed").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_table_and_log_file_from_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "table: famous_quotes\nlog_file: /tmp/motiv-test.log\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.table(), "famous_quotes");
        assert_eq!(config.log_path(), PathBuf::from("/tmp/motiv-test.log"));
    }

    #[test]
    fn test_environment_overrides_file() {
        let env: HashMap<&str, &str> = [
            ("SUPABASE_URL", "https://env.supabase.co"),
            ("SUPABASE_ANON_KEY", "env-key"),
            ("MOTIV_TABLE", "quotes_dev"),
        ]
        .into_iter()
        .collect();
        let config = Config {
            supabase_url: Some("https://file.supabase.co".into()),
            ..Config::default()
        }
        .with_overrides(|key| env.get(key).map(|v| v.to_string()));

        let backend = config.backend().unwrap();
        assert_eq!(backend.url, "https://env.supabase.co");
        assert_eq!(backend.anon_key, "env-key");
        assert_eq!(backend.table, "quotes_dev");
    }

    #[test]
    fn test_blank_key_means_no_backend() {
        let config = Config {
            supabase_url: Some("https://abc.supabase.co".into()),
            supabase_anon_key: Some("   ".into()),
            ..Config::default()
        };
        assert!(config.backend().is_none());
    }
}
