//! Runtime configuration for the ingestor.
//!
//! Every field has a default, so the job runs without any config file. A TOML
//! file can be pointed to with the `BLOCKCHAIN_INGESTOR_CONFIG` environment
//! variable to override individual values:
//!
//! ```toml
//! output_dir = "/data/alternative/blockchain/bitcoinmetadata"
//! max_attempts = 3
//! retry_delay_ms = 250
//! column_policy = "placeholder"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use shared_utils::env::get_optional_env_var;
use thiserror::Error;
use tracing::{debug, error};

use crate::merge::ColumnPolicy;
use crate::requests::retry::RetryPolicy;

/// Environment variable holding the path of an optional TOML config file.
pub const CONFIG_ENV_VAR: &str = "BLOCKCHAIN_INGESTOR_CONFIG";

pub const DEFAULT_BASE_URL: &str = "https://data.nasdaq.com/api/v3/datatables/QDL/BCHAIN";
pub const DEFAULT_API_KEY_ENV: &str = "QUANDL_API_KEY";
pub const DEFAULT_OUTPUT_DIR: &str =
    "/temp-output-directory/alternative/blockchain/bitcoinmetadata";
pub const DEFAULT_FILE_NAME: &str = "btcusd.csv";
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Errors related to loading the ingestor configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IngestorConfig {
    /// Datatable endpoint queried once per metric.
    pub base_url: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Directory the CSV is written to. Created if missing.
    pub output_dir: PathBuf,
    pub file_name: String,
    /// Total attempts per metric, including the first one.
    pub max_attempts: u32,
    /// Pause between attempts. Zero retries immediately.
    pub retry_delay_ms: u64,
    /// Per-request timeout. `None` keeps the HTTP client's default.
    pub request_timeout_secs: Option<u64>,
    pub column_policy: ColumnPolicy,
}

impl Default for IngestorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            file_name: DEFAULT_FILE_NAME.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_ms: 0,
            request_timeout_secs: None,
            column_policy: ColumnPolicy::default(),
        }
    }
}

impl IngestorConfig {
    /// Loads the config file named by [`CONFIG_ENV_VAR`], or the defaults when
    /// the variable is unset.
    pub fn load() -> Result<Self, ConfigError> {
        match get_optional_env_var(CONFIG_ENV_VAR) {
            Some(path) => Self::from_file(path),
            None => {
                debug!("{CONFIG_ENV_VAR} not set, using default configuration");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| {
            error!(path = %path.display(), error = %source, "Failed to read config file");
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|source| {
            error!(path = %path.display(), error = %source, "Failed to parse config file");
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid("max_attempts must be at least 1".into()));
        }
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url must not be empty".into()));
        }
        if self.file_name.trim().is_empty() {
            return Err(ConfigError::Invalid("file_name must not be empty".into()));
        }
        Ok(())
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            delay: Duration::from_millis(self.retry_delay_ms),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn defaults_match_the_bitcoin_metadata_job() {
        let config = IngestorConfig::default();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.retry_policy().delay, Duration::ZERO);
        assert_eq!(config.api_key_env, "QUANDL_API_KEY");
        assert_eq!(
            config.output_path(),
            PathBuf::from(DEFAULT_OUTPUT_DIR).join("btcusd.csv")
        );
        assert_eq!(config.column_policy, ColumnPolicy::SkipLeading);
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            output_dir = "/tmp/out"
            max_attempts = 3
            retry_delay_ms = 250
            column_policy = "placeholder"
            "#
        )
        .unwrap();

        let config = IngestorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.retry_policy().delay, Duration::from_millis(250));
        assert_eq!(config.column_policy, ColumnPolicy::Placeholder);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.file_name, DEFAULT_FILE_NAME);
    }

    #[test]
    fn zero_attempts_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "max_attempts = 0").unwrap();

        let err = IngestorConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "max_retries = 3").unwrap();

        let err = IngestorConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = IngestorConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
