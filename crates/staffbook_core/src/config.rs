//! Application configuration.
//!
//! Resolution order, last wins: built-in defaults, optional TOML file,
//! `STAFFBOOK_*` environment variables, then command-line flags (applied by
//! the binary).
//!
//! ```toml
//! db_path = "employees.db"
//! export_path = "export_employees.xlsx"
//! log_level = "info"
//! log_dir = "/var/log/staffbook"
//!
//! [import.aliases]
//! telephone = ["Tel", "Mobile"]
//! ```

use crate::import::{AliasTable, ImportNormalizer};
use crate::logging::default_log_level;
use crate::model::employee::EmployeeField;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_DB_PATH: &str = "employees.db";
pub const DEFAULT_EXPORT_PATH: &str = "export_employees.xlsx";

pub const ENV_CONFIG_PATH: &str = "STAFFBOOK_CONFIG";
pub const ENV_DB_PATH: &str = "STAFFBOOK_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "STAFFBOOK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "STAFFBOOK_LOG_DIR";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("unknown field `{0}` in [import.aliases]")]
    UnknownAliasField(String),
}

/// Runtime settings shared by the CLI and embedding callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// SQLite store file.
    pub db_path: PathBuf,
    /// Default export target when none is given.
    pub export_path: PathBuf,
    /// Log level; build-mode default for file logs when unset.
    pub log_level: Option<String>,
    /// Rotating log directory; stderr logging when unset.
    pub log_dir: Option<PathBuf>,
    pub import: ImportConfig,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportConfig {
    /// Extra source labels per canonical field, tried after the built-ins.
    pub aliases: BTreeMap<String, Vec<String>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
            log_level: None,
            log_dir: None,
            import: ImportConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads defaults, the config file (explicit `path`, else
    /// `STAFFBOOK_CONFIG` when set) and environment overrides.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let env_path = std::env::var_os(ENV_CONFIG_PATH).map(PathBuf::from);
        let mut config = match path.map(Path::to_path_buf).or(env_path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `STAFFBOOK_*` overrides through `lookup`; blank values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(db_path) = value(ENV_DB_PATH) {
            self.db_path = PathBuf::from(db_path);
        }
        if let Some(level) = value(ENV_LOG_LEVEL) {
            self.log_level = Some(level);
        }
        if let Some(dir) = value(ENV_LOG_DIR) {
            self.log_dir = Some(PathBuf::from(dir));
        }
    }

    /// Configured level, else the build-mode default.
    pub fn effective_log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }

    /// Built-in aliases extended with the configured ones.
    pub fn alias_table(&self) -> ConfigResult<AliasTable> {
        let mut aliases = AliasTable::default();
        for (field_name, labels) in &self.import.aliases {
            let field = field_name
                .parse::<EmployeeField>()
                .map_err(|_| ConfigError::UnknownAliasField(field_name.clone()))?;
            for label in labels {
                aliases.add_alias(field, label.clone());
            }
        }
        Ok(aliases)
    }

    pub fn normalizer(&self) -> ConfigResult<ImportNormalizer> {
        Ok(ImportNormalizer::new(self.alias_table()?))
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, ENV_DB_PATH, ENV_LOG_DIR};
    use crate::model::employee::EmployeeField;
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn defaults_point_at_local_files() {
        let config = AppConfig::default();
        assert_eq!(config.db_path, PathBuf::from("employees.db"));
        assert_eq!(config.export_path, PathBuf::from("export_employees.xlsx"));
        assert!(config.log_dir.is_none());
        assert_eq!(config.effective_log_level(), crate::logging::default_log_level());
    }

    #[test]
    fn file_values_and_aliases_are_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "db_path = \"/data/staff.db\"\n[import.aliases]\ntelephone = [\"Tel\"]"
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.db_path, PathBuf::from("/data/staff.db"));
        assert_eq!(config.export_path, PathBuf::from("export_employees.xlsx"));

        let aliases = config.alias_table().unwrap();
        assert_eq!(
            aliases.labels(EmployeeField::Telephone).last().map(String::as_str),
            Some("Tel")
        );
    }

    #[test]
    fn unknown_keys_and_alias_fields_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "database = \"x.db\"").unwrap();
        assert!(matches!(
            AppConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));

        let mut config = AppConfig::default();
        config
            .import
            .aliases
            .insert("id".to_string(), vec!["ID".to_string()]);
        assert!(matches!(
            config.alias_table(),
            Err(ConfigError::UnknownAliasField(field)) if field == "id"
        ));
    }

    #[test]
    fn environment_overrides_win_over_file_values() {
        let env: HashMap<&str, &str> =
            HashMap::from([(ENV_DB_PATH, "/tmp/override.db"), (ENV_LOG_DIR, "  ")]);
        let mut config = AppConfig::default();
        config.apply_overrides(|key| env.get(key).map(|value| value.to_string()));

        assert_eq!(config.db_path, PathBuf::from("/tmp/override.db"));
        assert!(config.log_dir.is_none());
    }
}
