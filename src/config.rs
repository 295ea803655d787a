use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{credentials::ServiceAccountKey, retry::RetryOverrides, LanguageError, Result};

/// Default service endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://language.googleapis.com";
/// Default per-attempt HTTP timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 600_000;

/// Enables or disables client construction. Defaults to enabled.
pub const KEY_ENABLED: &str = "GCP_LANGUAGE_ENABLED";
/// Service-specific credentials file; wins over every other source.
pub const KEY_CREDENTIALS_FILE: &str = "GCP_LANGUAGE_CREDENTIALS_FILE";
/// Shared credentials file used when no service-specific one is set.
pub const KEY_SHARED_CREDENTIALS_FILE: &str = "GCP_CREDENTIALS_FILE";
/// Ambient application-default credentials file, the last fallback.
pub const KEY_AMBIENT_CREDENTIALS: &str = "GOOGLE_APPLICATION_CREDENTIALS";
/// Service endpoint override, e.g. for an emulator.
pub const KEY_ENDPOINT: &str = "GCP_LANGUAGE_ENDPOINT";
/// API key sent as `x-goog-api-key` on every request.
pub const KEY_API_KEY: &str = "GCP_LANGUAGE_API_KEY";
/// OAuth access token sent as `Authorization: Bearer …` on every request.
pub const KEY_ACCESS_TOKEN: &str = "GCP_LANGUAGE_ACCESS_TOKEN";
/// Per-attempt HTTP timeout in milliseconds.
pub const KEY_TIMEOUT_MS: &str = "GCP_LANGUAGE_TIMEOUT_MS";
/// Retry property: delay before the first retry, milliseconds.
pub const KEY_RETRY_INITIAL_DELAY_MS: &str = "GCP_LANGUAGE_RETRY_INITIAL_DELAY_MS";
/// Retry property: cap on the delay between retries, milliseconds.
pub const KEY_RETRY_MAX_DELAY_MS: &str = "GCP_LANGUAGE_RETRY_MAX_DELAY_MS";
/// Retry property: factor applied to the delay after each retry.
pub const KEY_RETRY_DELAY_MULTIPLIER: &str = "GCP_LANGUAGE_RETRY_DELAY_MULTIPLIER";
/// Retry property: attempt bound, `0` defers to the total timeout.
pub const KEY_RETRY_MAX_ATTEMPTS: &str = "GCP_LANGUAGE_RETRY_MAX_ATTEMPTS";
/// Retry property: overall budget for one call, milliseconds.
pub const KEY_RETRY_TOTAL_TIMEOUT_MS: &str = "GCP_LANGUAGE_RETRY_TOTAL_TIMEOUT_MS";

/// Typed configuration record for [`LanguageClient`](crate::LanguageClient)
/// construction.
///
/// Bound from the process environment with [`LanguageConfig::from_env`], or
/// from any explicit key/value source with [`LanguageConfig::from_pairs`].
/// Unrecognized keys are ignored; blank values leave the field unset;
/// malformed values fail the binding with
/// [`LanguageError::Config`](crate::LanguageError::Config) naming the key.
#[derive(Clone, Debug, PartialEq)]
pub struct LanguageConfig {
    /// Whether client construction is allowed. Defaults to `true`.
    pub enabled: bool,
    /// Service-specific credentials file path.
    pub credentials_file: Option<PathBuf>,
    /// Shared credentials file path, used when no service-specific one is
    /// configured.
    pub shared_credentials_file: Option<PathBuf>,
    /// Ambient application-default credentials path, the last fallback.
    pub ambient_credentials_file: Option<PathBuf>,
    /// Service endpoint. Defaults to [`DEFAULT_ENDPOINT`].
    pub endpoint: String,
    /// API key attached to every request when set.
    pub api_key: Option<String>,
    /// OAuth access token attached to every request when set.
    pub access_token: Option<String>,
    /// Per-attempt HTTP timeout in milliseconds.
    pub timeout_ms: u64,
    /// Retry overrides bound from properties. `None` when no retry key was
    /// present in the source.
    pub retry: Option<RetryOverrides>,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            credentials_file: None,
            shared_credentials_file: None,
            ambient_credentials_file: None,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            api_key: None,
            access_token: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retry: None,
        }
    }
}

impl LanguageConfig {
    /// Binds configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_pairs(std::env::vars())
    }

    /// Binds configuration from explicit key/value pairs.
    ///
    /// This is the same binding `from_env` performs, usable with any
    /// property source:
    ///
    /// ```
    /// use gcp_language_http::LanguageConfig;
    ///
    /// let config = LanguageConfig::from_pairs([
    ///     ("GCP_LANGUAGE_API_KEY", "my-key"),
    ///     ("GCP_LANGUAGE_RETRY_MAX_ATTEMPTS", "5"),
    /// ])
    /// .expect("valid configuration");
    /// assert_eq!(config.api_key.as_deref(), Some("my-key"));
    /// ```
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();

        for (key, value) in pairs {
            let key = key.as_ref();
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }

            match key {
                KEY_ENABLED => config.enabled = parse_bool(key, value)?,
                KEY_CREDENTIALS_FILE => config.credentials_file = Some(PathBuf::from(value)),
                KEY_SHARED_CREDENTIALS_FILE => {
                    config.shared_credentials_file = Some(PathBuf::from(value));
                }
                KEY_AMBIENT_CREDENTIALS => {
                    config.ambient_credentials_file = Some(PathBuf::from(value));
                }
                KEY_ENDPOINT => config.endpoint = value.trim_end_matches('/').to_owned(),
                KEY_API_KEY => config.api_key = Some(value.to_owned()),
                KEY_ACCESS_TOKEN => config.access_token = Some(value.to_owned()),
                KEY_TIMEOUT_MS => config.timeout_ms = parse_u64(key, value)?,
                KEY_RETRY_INITIAL_DELAY_MS => {
                    config.retry_slot().initial_retry_delay =
                        Some(Duration::from_millis(parse_u64(key, value)?));
                }
                KEY_RETRY_MAX_DELAY_MS => {
                    config.retry_slot().max_retry_delay =
                        Some(Duration::from_millis(parse_u64(key, value)?));
                }
                KEY_RETRY_DELAY_MULTIPLIER => {
                    config.retry_slot().retry_delay_multiplier =
                        Some(parse_multiplier(key, value)?);
                }
                KEY_RETRY_MAX_ATTEMPTS => {
                    config.retry_slot().max_attempts = Some(parse_u32(key, value)?);
                }
                KEY_RETRY_TOTAL_TIMEOUT_MS => {
                    config.retry_slot().total_timeout =
                        Some(Duration::from_millis(parse_u64(key, value)?));
                }
                _ => {}
            }
        }

        Ok(config)
    }

    /// Credentials file the resolution chain settles on, if any.
    ///
    /// Precedence: service-specific file, then the shared file, then the
    /// ambient application-default path.
    pub fn resolved_credentials_path(&self) -> Option<&Path> {
        self.credentials_file
            .as_deref()
            .or(self.shared_credentials_file.as_deref())
            .or(self.ambient_credentials_file.as_deref())
    }

    /// Loads and parses the resolved credentials file.
    ///
    /// Returns `Ok(None)` when no file is configured at any level.
    pub fn load_credentials(&self) -> Result<Option<ServiceAccountKey>> {
        match self.resolved_credentials_path() {
            Some(path) => ServiceAccountKey::load(path).map(Some),
            None => Ok(None),
        }
    }

    /// Per-attempt HTTP timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    fn retry_slot(&mut self) -> &mut RetryOverrides {
        self.retry.get_or_insert_with(RetryOverrides::default)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(LanguageError::config(
            key,
            format!("expected true or false, got '{value}'"),
        )),
    }
}

fn parse_u64(key: &str, value: &str) -> Result<u64> {
    value
        .parse::<u64>()
        .map_err(|err| LanguageError::config(key, format!("invalid integer '{value}': {err}")))
}

fn parse_u32(key: &str, value: &str) -> Result<u32> {
    value
        .parse::<u32>()
        .map_err(|err| LanguageError::config(key, format!("invalid integer '{value}': {err}")))
}

fn parse_multiplier(key: &str, value: &str) -> Result<f64> {
    let parsed = value
        .parse::<f64>()
        .map_err(|err| LanguageError::config(key, format!("invalid number '{value}': {err}")))?;
    if !parsed.is_finite() || parsed < 1.0 {
        return Err(LanguageError::config(
            key,
            format!("multiplier must be a finite number >= 1.0, got '{value}'"),
        ));
    }
    Ok(parsed)
}
