use std::fmt;
use std::time::{Duration, Instant};

use reqwest::{header, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use crate::{
    config::DEFAULT_TIMEOUT_MS,
    types::{
        AnalyzeEntitiesResponse, AnalyzeSentimentResponse, AnnotateTextRequest,
        AnnotateTextResponse, ClassifyTextResponse, Document, DocumentRequest, EncodingType,
        ModerateTextResponse,
    },
    LanguageConfig, LanguageError, Result, RetryOverrides, RetrySettings, ServiceAccountKey,
};

/// Header carrying an API key, the simplest request authentication.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Request authentication attached to every call.
#[derive(Clone)]
enum Auth {
    /// No authentication header. Useful against emulators.
    None,
    /// API key sent as `x-goog-api-key`.
    ApiKey(String),
    /// Full `Authorization` header value, e.g. `Bearer <token>`.
    Bearer(String),
}

#[derive(Clone)]
/// HTTP client for the Cloud Natural Language `documents:*` endpoints.
pub struct LanguageClient {
    http: reqwest::Client,
    endpoint: String,
    auth: Auth,
    credentials: Option<ServiceAccountKey>,
    retry: RetrySettings,
    timeout: Duration,
}

impl fmt::Debug for LanguageClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let auth = match &self.auth {
            Auth::None => "none",
            Auth::ApiKey(_) => "api-key <redacted>",
            Auth::Bearer(_) => "bearer <redacted>",
        };
        f.debug_struct("LanguageClient")
            .field("endpoint", &self.endpoint)
            .field("auth", &auth)
            .field("credentials", &self.credentials)
            .field("retry", &self.retry)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl LanguageClient {
    /// Creates an unauthenticated client against the given endpoint.
    ///
    /// A trailing slash on the endpoint is ignored. Authentication can be
    /// added with [`LanguageClient::with_api_key`] or
    /// [`LanguageClient::with_bearer_token`].
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint: String = endpoint.into();
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_owned(),
            auth: Auth::None,
            credentials: None,
            retry: RetrySettings::default(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    /// Creates a client from a bound [`LanguageConfig`].
    ///
    /// Fails with [`LanguageError::Disabled`] when the configuration turned
    /// the client off, and with a credentials error when a configured key
    /// file cannot be read or parsed. When both an API key and an access
    /// token are configured, the API key is used.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gcp_language_http::{LanguageClient, LanguageConfig};
    ///
    /// let config = LanguageConfig::from_pairs([
    ///     ("GCP_LANGUAGE_API_KEY", "my-key"),
    /// ])?;
    /// let client = LanguageClient::from_config(&config)?;
    /// # Ok::<(), gcp_language_http::LanguageError>(())
    /// ```
    pub fn from_config(config: &LanguageConfig) -> Result<Self> {
        if !config.enabled {
            return Err(LanguageError::Disabled);
        }

        #[cfg(feature = "tracing")]
        if let Some(path) = config.resolved_credentials_path() {
            tracing::debug!("loading credentials from {}", path.display());
        }

        let credentials = config.load_credentials()?;

        let mut retry = RetrySettings::default();
        if let Some(overrides) = &config.retry {
            retry = retry.with_overrides(overrides);
        }

        let auth = match (&config.api_key, &config.access_token) {
            (Some(key), _) => Auth::ApiKey(key.clone()),
            (None, Some(token)) => Auth::Bearer(normalize_bearer_authorization(token)),
            (None, None) => Auth::None,
        };

        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_owned(),
            auth,
            credentials,
            retry,
            timeout: config.timeout(),
        })
    }

    /// Creates a client from environment variables.
    ///
    /// Binds a [`LanguageConfig`] with [`LanguageConfig::from_env`] and
    /// builds the client from it; the `KEY_*` constants at the crate root
    /// ([`KEY_ENABLED`](crate::KEY_ENABLED) and onward) list the variables
    /// read.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gcp_language_http::LanguageClient;
    ///
    /// let client = LanguageClient::from_env().expect("language configuration");
    /// ```
    pub fn from_env() -> Result<Self> {
        Self::from_config(&LanguageConfig::from_env()?)
    }

    /// Authenticates every request with an API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.auth = Auth::ApiKey(key.into());
        self
    }

    /// Authenticates every request with an OAuth access token.
    ///
    /// If the token is missing the `Bearer ` prefix, it is added
    /// automatically.
    pub fn with_bearer_token(mut self, token: impl AsRef<str>) -> Self {
        self.auth = Auth::Bearer(normalize_bearer_authorization(token.as_ref()));
        self
    }

    /// Attaches a parsed service-account key as client identity.
    pub fn with_credentials(mut self, key: ServiceAccountKey) -> Self {
        self.credentials = Some(key);
        self
    }

    /// Applies an explicit retry override record on top of the current
    /// settings.
    ///
    /// Fields left unset keep whatever the configuration or the service
    /// defaults already resolved, so an override record carrying only one
    /// field changes only that field.
    pub fn with_retry(mut self, overrides: &RetryOverrides) -> Self {
        self.retry = self.retry.with_overrides(overrides);
        self
    }

    /// Sets the per-attempt HTTP timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Effective retry schedule after all override layers.
    pub fn retry_settings(&self) -> &RetrySettings {
        &self.retry
    }

    /// Identity loaded from the resolved credentials file, if any.
    pub fn credentials(&self) -> Option<&ServiceAccountKey> {
        self.credentials.as_ref()
    }

    /// Project id recorded in the loaded credentials, if any.
    pub fn project_id(&self) -> Option<&str> {
        self.credentials
            .as_ref()
            .and_then(|key| key.project_id.as_deref())
    }

    /// Analyzes the sentiment of a document.
    pub async fn analyze_sentiment(
        &self,
        document: &Document,
        encoding: EncodingType,
    ) -> Result<AnalyzeSentimentResponse> {
        let body = DocumentRequest {
            document,
            encoding_type: Some(encoding),
        };
        self.post_json("analyzeSentiment", &body).await
    }

    /// Extracts named entities from a document.
    pub async fn analyze_entities(
        &self,
        document: &Document,
        encoding: EncodingType,
    ) -> Result<AnalyzeEntitiesResponse> {
        let body = DocumentRequest {
            document,
            encoding_type: Some(encoding),
        };
        self.post_json("analyzeEntities", &body).await
    }

    /// Classifies a document into content categories.
    pub async fn classify_text(&self, document: &Document) -> Result<ClassifyTextResponse> {
        let body = DocumentRequest {
            document,
            encoding_type: None,
        };
        self.post_json("classifyText", &body).await
    }

    /// Scores a document against harmful-content categories.
    pub async fn moderate_text(&self, document: &Document) -> Result<ModerateTextResponse> {
        let body = DocumentRequest {
            document,
            encoding_type: None,
        };
        self.post_json("moderateText", &body).await
    }

    /// Runs several analyses over one document in a single call.
    pub async fn annotate_text(
        &self,
        request: &AnnotateTextRequest,
    ) -> Result<AnnotateTextResponse> {
        self.post_json("annotateText", request).await
    }

    async fn post_json<B, T>(&self, method: &str, body: &B) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = format!("{}/v1/documents:{method}", self.endpoint);
        let started = Instant::now();
        let mut attempt = 0u32;

        loop {
            let mut request = self
                .http
                .post(&url)
                .header(header::CONTENT_TYPE, "application/json")
                .timeout(self.timeout)
                .json(body);
            request = match &self.auth {
                Auth::None => request,
                Auth::ApiKey(key) => request.header(API_KEY_HEADER, key),
                Auth::Bearer(value) => request.header(header::AUTHORIZATION, value),
            };
            let response = request.send().await;

            match response {
                Ok(response) => {
                    let status = response.status();
                    let body = response.text().await.map_err(LanguageError::Transport)?;

                    if !status.is_success() {
                        if self.should_retry_status(status) {
                            if let Some(delay) = self.next_retry_delay(attempt, started.elapsed())
                            {
                                self.wait_before_retry(method, delay).await;
                                attempt += 1;
                                continue;
                            }
                        }

                        return Err(decode_error_body(status, body));
                    }

                    return serde_json::from_str::<T>(&body).map_err(|err| {
                        LanguageError::Decode(format!(
                            "invalid documents:{method} response JSON: {err}; body: {body}"
                        ))
                    });
                }
                Err(err) => {
                    if self.should_retry_transport(&err) {
                        if let Some(delay) = self.next_retry_delay(attempt, started.elapsed()) {
                            self.wait_before_retry(method, delay).await;
                            attempt += 1;
                            continue;
                        }
                    }
                    return Err(LanguageError::Transport(err));
                }
            }
        }
    }

    /// Delay before the next retry, or `None` when the schedule is
    /// exhausted. `retries_made` counts completed retries, so the initial
    /// attempt is number `retries_made + 1`.
    fn next_retry_delay(&self, retries_made: u32, elapsed: Duration) -> Option<Duration> {
        let delay = self.retry.retry_delay(retries_made);
        self.retry
            .allows_retry(retries_made + 1, elapsed, delay)
            .then_some(delay)
    }

    fn should_retry_status(&self, status: StatusCode) -> bool {
        matches!(
            status,
            StatusCode::TOO_MANY_REQUESTS
                | StatusCode::INTERNAL_SERVER_ERROR
                | StatusCode::BAD_GATEWAY
                | StatusCode::SERVICE_UNAVAILABLE
                | StatusCode::GATEWAY_TIMEOUT
        )
    }

    fn should_retry_transport(&self, err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_request() || err.is_body() || err.is_connect()
    }

    async fn wait_before_retry(&self, method: &str, delay: Duration) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            "retrying documents:{} after {} ms",
            method,
            delay.as_millis()
        );

        #[cfg(not(feature = "tracing"))]
        let _ = method;

        sleep(delay).await;
    }
}

/// Error envelope the service wraps non-success responses in.
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorStatus,
}

#[derive(Deserialize)]
struct ErrorStatus {
    #[serde(default)]
    code: u16,
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

fn decode_error_body(status: StatusCode, body: String) -> LanguageError {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&body) {
        let code = if envelope.error.code == 0 {
            status.as_u16()
        } else {
            envelope.error.code
        };
        return LanguageError::Api {
            code,
            status: envelope.error.status,
            message: envelope.error.message,
        };
    }
    LanguageError::Http {
        status: status.as_u16(),
        body,
    }
}

fn normalize_bearer_authorization(token: &str) -> String {
    let trimmed = token.trim();
    let prefix = trimmed.get(..7);
    if prefix.is_some_and(|value| value.eq_ignore_ascii_case("bearer ")) {
        trimmed.to_owned()
    } else {
        format!("Bearer {trimmed}")
    }
}
