//! Configuration loaded from `employees.toml`.
//!
//! ```toml
//! [database]
//! path = "employees.db"
//!
//! [logging]
//! filter = "employees=debug"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EmployeeError, Result};

pub const CONFIG_FILE: &str = "employees.toml";

/// Environment variable that overrides `[database] path`.
pub const DATABASE_ENV: &str = "EMPLOYEES_DB";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Relative paths resolve against the directory holding the config file.
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("employees.db"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive; `RUST_LOG` wins when set.
    pub filter: Option<String>,
}

impl AppConfig {
    /// Load from `path`. A missing file yields defaults. An unreadable or
    /// malformed one also yields defaults, together with the error so the
    /// caller can report it once logging is installed.
    pub fn load(path: &Path) -> (Self, Option<EmployeeError>) {
        if !path.exists() {
            return (Self::default(), None);
        }
        match fs::read_to_string(path)
            .map_err(EmployeeError::from)
            .and_then(|text| Self::parse(&text))
        {
            Ok(mut config) => {
                let base = path.parent().unwrap_or_else(|| Path::new(""));
                config.database.path = resolve(base, &config.database.path);
                (config, None)
            }
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| EmployeeError::Config(e.to_string()))
    }

    /// Apply the environment value and then the command-line flag, in rising priority.
    pub fn with_overrides(mut self, env_path: Option<String>, cli_path: Option<PathBuf>) -> Self {
        if let Some(path) = env_path.filter(|p| !p.trim().is_empty()) {
            self.database.path = PathBuf::from(path);
        }
        if let Some(path) = cli_path {
            self.database.path = path;
        }
        self
    }

    pub fn log_filter<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.logging.filter.as_deref().unwrap_or(fallback)
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() || base.as_os_str().is_empty() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let (config, problem) = AppConfig::load(&dir.path().join(CONFIG_FILE));
        assert!(problem.is_none());
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.database.path, PathBuf::from("employees.db"));
    }

    #[test]
    fn test_relative_path_resolves_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "[database]\npath = \"data/staff.db\"\n\n[logging]\nfilter = \"debug\"\n",
        )
        .unwrap();

        let (config, problem) = AppConfig::load(&path);
        assert!(problem.is_none());
        assert_eq!(config.database.path, dir.path().join("data/staff.db"));
        assert_eq!(config.log_filter("warn"), "debug");
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[database\npath = 3").unwrap();
        let (config, problem) = AppConfig::load(&path);
        assert_eq!(config, AppConfig::default());
        assert!(matches!(problem, Some(EmployeeError::Config(_))));
    }

    #[test]
    fn test_parse_reports_type_errors() {
        let err = AppConfig::parse("[database]\npath = 3\n").unwrap_err();
        assert!(matches!(err, EmployeeError::Config(_)));
    }

    #[test]
    fn test_overrides_priority() {
        let config = AppConfig::default()
            .with_overrides(Some("env.db".to_string()), None);
        assert_eq!(config.database.path, PathBuf::from("env.db"));

        let config = config.with_overrides(Some("env.db".to_string()), Some("cli.db".into()));
        assert_eq!(config.database.path, PathBuf::from("cli.db"));

        let config = AppConfig::default().with_overrides(Some("  ".to_string()), None);
        assert_eq!(config.database.path, PathBuf::from("employees.db"));
        assert_eq!(config.log_filter("warn"), "warn");
    }
}
