//! Configuration loading from YAML or TOML files with environment overrides.

use crate::schema::Config;
use cgraph_common::{parse_iso_date, CGraphError, Result as CGraphResult};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "CGRAPH_CONFIG_PATH";

/// Files looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILES: [&str; 3] =
    ["contrib-graph.yaml", "contrib-graph.yml", "contrib-graph.toml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file '{path}': {source}")]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// File extension is neither YAML nor TOML
    #[error("Unsupported configuration format: '{0}'")]
    UnsupportedFormat(PathBuf),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        /// Offending variable
        var: String,
        /// Underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for CGraphError {
    fn from(err: ConfigError) -> Self {
        CGraphError::config_with_source("Failed to load configuration", err)
    }
}

/// Serialization format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.toml`
    Toml,
}

impl ConfigFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("toml") => Ok(Self::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Parses configuration text in the given format.
    pub fn parse_str(content: &str, format: ConfigFormat) -> Result<Config, ConfigError> {
        match format {
            ConfigFormat::Yaml => Ok(serde_yaml::from_str(content)?),
            ConfigFormat::Toml => Ok(toml::from_str(content)?),
        }
    }

    /// Reads and parses a configuration file without overrides or validation.
    pub fn read_file(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_str(&content, format)
    }

    /// Loads a configuration file, applies environment overrides and validates.
    pub fn load_from_file(path: impl AsRef<Path>) -> CGraphResult<Config> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading configuration");
        let mut config = Self::read_file(path)?;
        Self::apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from the discovered file, or defaults when none exists.
    ///
    /// Validation is left to the caller so that command-line arguments can
    /// still be applied on top.
    pub fn load_unvalidated(explicit: Option<&Path>) -> CGraphResult<Config> {
        let mut config = match Self::discover(explicit) {
            Some(path) => {
                info!(path = %path.display(), "Loading configuration");
                Self::read_file(&path)?
            }
            None => {
                debug!("No configuration file found, using defaults");
                Config::default()
            }
        };
        Self::apply_env_overrides(&mut config)?;
        Ok(config)
    }

    /// Loads and validates configuration using the discovery order.
    pub fn load() -> CGraphResult<Config> {
        let config = Self::load_unvalidated(None)?;
        config.validate()?;
        Ok(config)
    }

    /// Finds the configuration file to read.
    ///
    /// An explicit path wins, then `CGRAPH_CONFIG_PATH`, then the first of
    /// [`DEFAULT_CONFIG_FILES`] present in the working directory.
    pub fn discover(explicit: Option<&Path>) -> Option<PathBuf> {
        Self::discover_in(explicit, Path::new("."), |key| env::var(key).ok())
    }

    /// [`ConfigLoader::discover`] relative to `dir` with an injectable environment.
    pub fn discover_in<F>(explicit: Option<&Path>, dir: &Path, lookup: F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Some(path) = lookup(CONFIG_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            return Some(PathBuf::from(path));
        }
        DEFAULT_CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Applies overrides from the process environment.
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides_from(config, |key| env::var(key).ok())
    }

    /// Applies overrides using `lookup` to read variables.
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(user) = lookup("GITHUB_USER") {
            config.github.user = user;
        }
        if let Some(token) = lookup("GITHUB_TOKEN") {
            config.github.token = token;
        }
        if let Some(user) = lookup("GITLAB_USER") {
            config.gitlab.user = user;
        }
        if let Some(token) = lookup("GITLAB_TOKEN") {
            config.gitlab.token = token;
        }

        if let Some(since) = lookup("CGRAPH_SINCE") {
            let date = parse_iso_date(since.trim())
                .map_err(|e| ConfigError::EnvParse {
                    var: "CGRAPH_SINCE".to_string(),
                    source: Box::new(e),
                })?;
            config.data.since = Some(date);
        }

        if let Some(output) = lookup("CGRAPH_OUTPUT") {
            config.chart.output = PathBuf::from(output);
        }

        if let Some(level) = lookup("CGRAPH_LOG") {
            config.logging.level = level;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("a.yaml")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("a.YML")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("a.toml")).unwrap(),
            ConfigFormat::Toml
        );
        assert!(matches!(
            ConfigFormat::from_path(Path::new("a.json")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        let lookup = env_of(&[
            ("GITHUB_USER", "octocat"),
            ("GITLAB_TOKEN", "glpat"),
            ("CGRAPH_SINCE", "2022-03-01"),
            ("CGRAPH_OUTPUT", "chart.svg"),
            ("CGRAPH_LOG", "trace"),
        ]);
        ConfigLoader::apply_overrides_from(&mut config, lookup).unwrap();

        assert_eq!(config.github.user, "octocat");
        assert_eq!(config.gitlab.token, "glpat");
        assert_eq!(config.data.since, NaiveDate::from_ymd_opt(2022, 3, 1));
        assert_eq!(config.chart.output, PathBuf::from("chart.svg"));
        assert_eq!(config.logging.level, "trace");
    }

    #[test]
    fn test_env_override_bad_date() {
        let mut config = Config::default();
        let err = ConfigLoader::apply_overrides_from(&mut config, env_of(&[("CGRAPH_SINCE", "March")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvParse { ref var, .. } if var == "CGRAPH_SINCE"));
    }

    #[test]
    fn test_env_override_rejects_unpadded_date() {
        let mut config = Config::default();
        let err =
            ConfigLoader::apply_overrides_from(&mut config, env_of(&[("CGRAPH_SINCE", "2022-3-1")]))
                .unwrap_err();
        assert!(matches!(err, ConfigError::EnvParse { ref var, .. } if var == "CGRAPH_SINCE"));
        assert_eq!(config.data.since, None);
    }

    #[test]
    fn test_discover_prefers_explicit_then_env() {
        let dir = Path::new("/nonexistent");
        let explicit = Path::new("custom.toml");
        assert_eq!(
            ConfigLoader::discover_in(Some(explicit), dir, env_of(&[(CONFIG_PATH_ENV, "env.yaml")])),
            Some(PathBuf::from("custom.toml"))
        );
        assert_eq!(
            ConfigLoader::discover_in(None, dir, env_of(&[(CONFIG_PATH_ENV, "env.yaml")])),
            Some(PathBuf::from("env.yaml"))
        );
        assert_eq!(ConfigLoader::discover_in(None, dir, env_of(&[])), None);
    }

    #[test]
    fn test_config_error_converts() {
        let err: CGraphError = ConfigError::UnsupportedFormat(PathBuf::from("x.ini")).into();
        assert!(matches!(err, CGraphError::Config { .. }));
    }
}
