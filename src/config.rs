// ⚙️ Import Configuration
//
// Where to read the feed, where the store lives, where to put the report.
// Built by the CLI; everything has a default.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT: &str = "employees.csv";
pub const DEFAULT_DATABASE: &str = "employees.db";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Employee feed to read
    pub input: PathBuf,

    /// SQLite store: managers are looked up here, records are inserted here
    pub database: PathBuf,

    /// Optional CSV file receiving the rejected lines
    #[serde(default)]
    pub report: Option<PathBuf>,

    /// Validate and resolve, but do not insert anything
    #[serde(default)]
    pub dry_run: bool,

    /// Default tracing filter when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for ImportConfig {
    fn default() -> Self {
        ImportConfig {
            input: PathBuf::from(DEFAULT_INPUT),
            database: PathBuf::from(DEFAULT_DATABASE),
            report: None,
            dry_run: false,
            log_filter: default_log_filter(),
        }
    }
}

impl ImportConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        ImportConfig {
            input: input.into(),
            ..ImportConfig::default()
        }
    }

    pub fn with_database(mut self, database: impl Into<PathBuf>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_report(mut self, report: impl Into<PathBuf>) -> Self {
        self.report = Some(report.into());
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Load from a JSON file; missing optional keys take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Reject settings that would clobber the input or make no sense
    pub fn validate(&self) -> Result<()> {
        if self.input.as_os_str().is_empty() {
            bail!("input path is empty");
        }
        if self.database.as_os_str().is_empty() {
            bail!("database path is empty");
        }
        if let Some(report) = &self.report {
            if report == &self.input {
                bail!(
                    "report path {} would overwrite the input feed",
                    report.display()
                );
            }
            if report == &self.database {
                bail!(
                    "report path {} would overwrite the database",
                    report.display()
                );
            }
        }
        if self.log_filter.trim().is_empty() {
            bail!("log filter is empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ImportConfig::default();
        assert_eq!(config.input, PathBuf::from("employees.csv"));
        assert_eq!(config.database, PathBuf::from("employees.db"));
        assert_eq!(config.report, None);
        assert!(!config.dry_run);
        assert_eq!(config.log_filter, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ImportConfig::new("feed.csv")
            .with_database("store.db")
            .with_report("rejected.csv")
            .with_dry_run(true)
            .with_log_filter("debug");

        assert_eq!(config.input, PathBuf::from("feed.csv"));
        assert_eq!(config.database, PathBuf::from("store.db"));
        assert_eq!(config.report, Some(PathBuf::from("rejected.csv")));
        assert!(config.dry_run);
        assert_eq!(config.log_filter, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_report_cannot_overwrite_input() {
        let config = ImportConfig::new("feed.csv").with_report("feed.csv");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("overwrite the input"));
    }

    #[test]
    fn test_empty_paths_rejected() {
        assert!(ImportConfig::new("").validate().is_err());
        assert!(ImportConfig::default().with_database("").validate().is_err());
        assert!(ImportConfig::default().with_log_filter(" ").validate().is_err());
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("import.json");
        std::fs::write(
            &path,
            r#"{"input": "feed.csv", "database": "store.db", "dry_run": true}"#,
        )
        .unwrap();

        let config = ImportConfig::from_json_file(&path).unwrap();
        assert_eq!(config.input, PathBuf::from("feed.csv"));
        assert!(config.dry_run);

        assert!(ImportConfig::from_json_file(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: ImportConfig =
            serde_json::from_str(r#"{"input": "feed.csv", "database": "store.db"}"#).unwrap();

        assert_eq!(config.report, None);
        assert!(!config.dry_run);
        assert_eq!(config.log_filter, "info");
    }
}
