use std::path::PathBuf;

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum LanguageError {
    /// Construction was requested while the client is disabled by
    /// configuration (`GCP_LANGUAGE_ENABLED=false`).
    #[error("language client is disabled by configuration")]
    Disabled,
    /// A recognized configuration key carried a value that does not parse.
    #[error("invalid value for configuration key {key}: {message}")]
    Config {
        /// Offending configuration key.
        key: String,
        /// Parse failure description.
        message: String,
    },
    /// A resolved credentials file could not be read.
    #[error("cannot read credentials file {}: {source}", path.display())]
    CredentialsIo {
        /// Path the resolution chain settled on.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// A resolved credentials file is not a valid service-account key.
    #[error("cannot parse credentials file {}: {message}", path.display())]
    CredentialsFormat {
        /// Path the resolution chain settled on.
        path: PathBuf,
        /// Parse or shape failure description.
        message: String,
    },
    /// Network or request execution error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Non-success HTTP status whose body did not carry a decodable
    /// service error envelope.
    #[error("http error {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
    /// Structured error returned by the Natural Language service.
    #[error("api error {code} ({status}): {message}")]
    Api {
        /// Numeric code from the error envelope (mirrors the HTTP status).
        code: u16,
        /// Canonical status string, e.g. `INVALID_ARGUMENT`.
        status: String,
        /// Human-readable message from the service.
        message: String,
    },
    /// Response decoding or shape validation error.
    #[error("decode error: {0}")]
    Decode(String),
}

impl LanguageError {
    pub(crate) fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            key: key.into(),
            message: message.into(),
        }
    }
}
