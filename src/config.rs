//! Configuration file loading

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use crate::filter::FilterSelection;

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default filters, overridden by command-line flags
    pub filters: FilterSelection,
    pub dashboard: DashboardConfig,
    pub logging: LoggingConfig,
    /// File the config was read from, `None` for built-in defaults
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Rebuild the dashboard every N seconds; disabled when unset or zero
    pub refresh_interval_secs: Option<u64>,
}

impl DashboardConfig {
    pub fn refresh_interval(&self) -> Option<Duration> {
        self.refresh_interval_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive, e.g. "info" or "drom_dashboard=debug"
    pub level: String,
    /// Write logs to this file instead of stderr
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Platform config location, e.g. `~/.config/drom-dashboard/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "drom-dashboard").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid configuration")
    }

    /// Load a config file. A missing file at the default location yields the
    /// defaults; a missing explicitly requested file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let mut config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config.source = Some(path);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FocusArea;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.dashboard.refresh_interval(), None);
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(
            r#"
[filters]
from = 2010
to = 2020
territories = ["Guadeloupe", "mayotte"]
focus = ["consumption", "territories"]
show_projections = false

[dashboard]
refresh_interval_secs = 300

[logging]
level = "debug"
file = "/tmp/drom-dashboard.log"
"#,
        )
        .unwrap();

        assert_eq!(config.filters.from, Some(2010));
        assert_eq!(config.filters.to, Some(2020));
        assert_eq!(
            config.filters.territories,
            Some(vec!["Guadeloupe".to_string(), "mayotte".to_string()])
        );
        assert_eq!(
            config.filters.focus,
            Some(vec![FocusArea::Consumption, FocusArea::Territories])
        );
        assert_eq!(config.filters.show_projections, Some(false));
        assert_eq!(
            config.dashboard.refresh_interval(),
            Some(Duration::from_secs(300))
        );
        assert_eq!(
            config.logging.file,
            Some(PathBuf::from("/tmp/drom-dashboard.log"))
        );
    }

    #[test]
    fn test_zero_refresh_disables_timer() {
        let config = Config::from_toml("[dashboard]\nrefresh_interval_secs = 0\n").unwrap();
        assert_eq!(config.dashboard.refresh_interval(), None);
    }

    #[test]
    fn test_unknown_focus_rejected() {
        assert!(Config::from_toml("[filters]\nfocus = [\"weather\"]\n").is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[filters]\nfrom = 2012").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.filters.from, Some(2012));
        assert_eq!(config.filters.to, None);
        assert_eq!(config.source.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_source_not_read_from_file() {
        let config = Config::from_toml("source = \"/etc/elsewhere.toml\"\n").unwrap();
        assert_eq!(config.source, None);
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
