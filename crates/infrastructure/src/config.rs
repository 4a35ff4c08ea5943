//! Runtime configuration.
//!
//! Read from environment variables:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `RESTPAD_DATA_DIR` | `<config dir>/restpad`; `--data-dir` overrides it |
//! | `RESTPAD_HISTORY_LIMIT` | `500` |
//! | `RESTPAD_LOG` | `warn` |

use std::path::PathBuf;

use crate::persistence::DEFAULT_HISTORY_LIMIT;

/// Environment variable overriding the data directory.
pub const DATA_DIR_VAR: &str = "RESTPAD_DATA_DIR";
/// Environment variable overriding the history size cap.
pub const HISTORY_LIMIT_VAR: &str = "RESTPAD_HISTORY_LIMIT";
/// Environment variable holding the default log filter.
pub const LOG_VAR: &str = "RESTPAD_LOG";

const DEFAULT_LOG_FILTER: &str = "warn";

/// Errors raised while building the configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable holds a value that cannot be used.
    #[error("invalid value '{value}' for {key}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Offending value.
        value: String,
    },

    /// No data directory was given and the platform has no config dir.
    #[error("could not determine a data directory; set RESTPAD_DATA_DIR")]
    NoDataDir,
}

/// Locations and limits used by the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the key-value files.
    pub data_dir: PathBuf,
    /// Request history document.
    pub history_file: PathBuf,
    /// Maximum number of history records kept.
    pub history_limit: usize,
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl AppConfig {
    /// Builds the configuration from the process environment.
    ///
    /// `data_dir` (from the command line) takes precedence over
    /// `RESTPAD_DATA_DIR`; the platform config dir is only consulted when
    /// neither is given.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is invalid or no data directory can be found.
    pub fn from_env(data_dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok(), data_dir)
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is invalid or no data directory can be found.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        data_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => match lookup(DATA_DIR_VAR).filter(|v| !v.is_empty()) {
                Some(dir) => PathBuf::from(dir),
                None => dirs::config_dir()
                    .map(|p| p.join("restpad"))
                    .ok_or(ConfigError::NoDataDir)?,
            },
        };

        let history_limit = match lookup(HISTORY_LIMIT_VAR) {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: HISTORY_LIMIT_VAR.to_string(),
                    value,
                })?,
            None => DEFAULT_HISTORY_LIMIT,
        };

        let log_filter = lookup(LOG_VAR)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            history_file: data_dir.join("history.json"),
            data_dir,
            history_limit,
            log_filter,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_explicit_values() {
        let config = AppConfig::from_lookup(
            lookup(&[
                (DATA_DIR_VAR, "/tmp/restpad"),
                (HISTORY_LIMIT_VAR, " 25 "),
                (LOG_VAR, "debug"),
            ]),
            None,
        )
        .unwrap();

        assert_eq!(
            config,
            AppConfig {
                data_dir: PathBuf::from("/tmp/restpad"),
                history_file: PathBuf::from("/tmp/restpad/history.json"),
                history_limit: 25,
                log_filter: "debug".to_string(),
            }
        );
    }

    #[test]
    fn test_defaults() {
        let Ok(config) = AppConfig::from_lookup(lookup(&[]), None) else {
            // No platform config dir in this environment.
            return;
        };
        assert!(config.data_dir.ends_with("restpad"));
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_invalid_history_limit() {
        for bad in ["0", "-3", "lots"] {
            let result = AppConfig::from_lookup(
                lookup(&[(DATA_DIR_VAR, "/tmp/restpad"), (HISTORY_LIMIT_VAR, bad)]),
                None,
            );
            assert_eq!(
                result,
                Err(ConfigError::InvalidValue {
                    key: HISTORY_LIMIT_VAR.to_string(),
                    value: bad.to_string(),
                })
            );
        }
    }

    #[test]
    fn test_command_line_dir_wins_over_variable() {
        let config =
            AppConfig::from_lookup(lookup(&[(DATA_DIR_VAR, "/a")]), Some(PathBuf::from("/b")))
                .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/b"));
        assert_eq!(config.history_file, PathBuf::from("/b/history.json"));
    }

    #[test]
    fn test_command_line_dir_needs_no_platform_dir() {
        // Nothing in the environment: the override alone must be enough.
        let config = AppConfig::from_lookup(lookup(&[]), Some(PathBuf::from("/data"))).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/data"));
    }
}
