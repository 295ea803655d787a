//! `gcp-language-http` is an async HTTP client for the Google Cloud Natural
//! Language API, with configuration-driven construction.
//!
//! The crate wraps the `/v1/documents:*` endpoints with ergonomic methods:
//! - [`LanguageClient::analyze_sentiment`]
//! - [`LanguageClient::analyze_entities`]
//! - [`LanguageClient::classify_text`]
//! - [`LanguageClient::moderate_text`]
//! - [`LanguageClient::annotate_text`]
//!
//! Construction follows the configuration: [`LanguageClient::from_env`] binds
//! a [`LanguageConfig`] from environment variables, resolves the credentials
//! file (service-specific over shared over ambient) and layers retry
//! properties over the service retry policy. An explicit [`RetryOverrides`]
//! record passed to [`LanguageClient::with_retry`] wins over both, field by
//! field.

mod client;
mod config;
mod credentials;
mod error;
mod retry;
mod types;

pub use client::LanguageClient;
pub use config::{LanguageConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_MS};
pub use config::{
    KEY_ACCESS_TOKEN, KEY_AMBIENT_CREDENTIALS, KEY_API_KEY, KEY_CREDENTIALS_FILE, KEY_ENABLED,
    KEY_ENDPOINT, KEY_RETRY_DELAY_MULTIPLIER, KEY_RETRY_INITIAL_DELAY_MS, KEY_RETRY_MAX_ATTEMPTS,
    KEY_RETRY_MAX_DELAY_MS, KEY_RETRY_TOTAL_TIMEOUT_MS, KEY_SHARED_CREDENTIALS_FILE,
    KEY_TIMEOUT_MS,
};
pub use credentials::ServiceAccountKey;
pub use error::LanguageError;
pub use retry::{
    RetryOverrides, RetrySettings, DEFAULT_INITIAL_RETRY_DELAY_MS, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_MAX_RETRY_DELAY_MS, DEFAULT_RETRY_DELAY_MULTIPLIER, DEFAULT_TOTAL_TIMEOUT_MS,
};
pub use types::{
    AnalyzeEntitiesResponse, AnalyzeSentimentResponse, AnnotateTextFeatures, AnnotateTextRequest,
    AnnotateTextResponse, ClassificationCategory, ClassifyTextResponse, Document, DocumentType,
    EncodingType, Entity, EntityMention, EntityType, MentionType, ModerateTextResponse,
    Sentence, Sentiment, TextSpan,
};

pub type Result<T> = std::result::Result<T, LanguageError>;
