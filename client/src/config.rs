//! Client configuration.
//!
//! All tunables live in an explicit [`Config`] struct that is handed to each
//! component at construction; there is no ambient global state. Defaults
//! mirror the deployed backend's limits. In development they can be
//! overridden from the environment (a `.env` file is honored via dotenvy):
//!
//! - `GRADEDROP_UPLOAD_ENDPOINT` / `GRADEDROP_GRADES_ENDPOINT`
//! - `GRADEDROP_MAX_FILE_SIZE_MB`
//! - `GRADEDROP_TIMEOUT_SECS`
//! - `GRADEDROP_MAX_RETRIES`
//! - `GRADEDROP_RETRY_DELAY_MS`

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// The only MIME type accepted for upload.
pub const ALLOWED_FILE_TYPE: &str = "application/pdf";

/// Maximum file size in MiB.
pub const MAX_FILE_SIZE_MB: u64 = 10;

/// Per-file transfer timeout.
pub const UPLOAD_TIMEOUT_SECS: u64 = 60;

/// Retries for transport-level send failures.
pub const MAX_RETRIES: u32 = 2;

/// Delay between retry attempts.
pub const RETRY_DELAY_MS: u64 = 2000;

/// API endpoint configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Presign endpoint: POST metadata, receive one URL per file.
    pub upload_endpoint: String,
    /// Grades query endpoint.
    pub grades_endpoint: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            upload_endpoint: "http://localhost:3000/uploadpdf".to_string(),
            grades_endpoint: "http://localhost:3000/getgrades".to_string(),
        }
    }
}

/// Upload behavior configuration.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Maximum accepted file size in bytes.
    pub max_file_size: u64,
    /// MIME types accepted into the selection set.
    pub allowed_types: Vec<String>,
    /// Per-attempt transfer timeout.
    pub timeout: Duration,
    /// Retries for transport-level send failures only.
    pub max_retries: u32,
    /// Sleep between retry attempts.
    pub retry_delay: Duration,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE_MB * 1024 * 1024,
            allowed_types: vec![ALLOWED_FILE_TYPE.to_string()],
            timeout: Duration::from_secs(UPLOAD_TIMEOUT_SECS),
            max_retries: MAX_RETRIES,
            retry_delay: Duration::from_millis(RETRY_DELAY_MS),
        }
    }
}

impl UploadConfig {
    /// Size limit expressed in whole MiB, for user-facing messages.
    pub fn max_file_size_mb(&self) -> u64 {
        self.max_file_size / (1024 * 1024)
    }
}

/// Full client configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub api: ApiConfig,
    pub upload: UploadConfig,
}

impl Config {
    /// Build a configuration from the environment, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        // Load .env file (if present)
        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Ok(endpoint) = env::var("GRADEDROP_UPLOAD_ENDPOINT") {
            config.api.upload_endpoint = endpoint;
        }
        if let Ok(endpoint) = env::var("GRADEDROP_GRADES_ENDPOINT") {
            config.api.grades_endpoint = endpoint;
        }
        if let Some(mb) = env_parse::<u64>("GRADEDROP_MAX_FILE_SIZE_MB") {
            config.upload.max_file_size = mb * 1024 * 1024;
        }
        if let Some(secs) = env_parse::<u64>("GRADEDROP_TIMEOUT_SECS") {
            config.upload.timeout = Duration::from_secs(secs);
        }
        if let Some(retries) = env_parse::<u32>("GRADEDROP_MAX_RETRIES") {
            config.upload.max_retries = retries;
        }
        if let Some(ms) = env_parse::<u64>("GRADEDROP_RETRY_DELAY_MS") {
            config.upload.retry_delay = Duration::from_millis(ms);
        }

        config
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_backend_limits() {
        let config = Config::default();
        assert_eq!(config.upload.max_file_size, 10 * 1024 * 1024);
        assert_eq!(config.upload.allowed_types, vec!["application/pdf"]);
        assert_eq!(config.upload.timeout, Duration::from_secs(60));
        assert_eq!(config.upload.max_retries, 2);
        assert_eq!(config.upload.retry_delay, Duration::from_millis(2000));
    }

    #[test]
    fn test_size_limit_in_mb() {
        let config = UploadConfig::default();
        assert_eq!(config.max_file_size_mb(), 10);
    }
}
