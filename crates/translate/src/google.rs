//! HTTP client for the public Google Translate endpoint.
//!
//! Uses the keyless `translate_a/single` API. The response is a nested JSON
//! array whose first element lists translated segments; each segment's
//! first element is the translated text.

use std::time::Duration;

use async_trait::async_trait;
use kankotri_core::{Translator, TranslatorError};

/// Public endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://translate.googleapis.com";

/// Transport-level timeout for a single request. The resolver applies its
/// own, shorter deadline on top of this.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from the Google Translate HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum GoogleTranslateError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint returned a non-2xx status code.
    #[error("Translate API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body did not have the expected shape.
    #[error("Malformed translate response: {0}")]
    Malformed(String),
}

impl From<GoogleTranslateError> for TranslatorError {
    fn from(err: GoogleTranslateError) -> Self {
        TranslatorError::Service(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for the Google Translate endpoint.
#[derive(Debug, Clone)]
pub struct GoogleTranslateApi {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslateApi {
    /// Create a client for `base_url`, e.g. [`DEFAULT_BASE_URL`].
    pub fn new(base_url: impl Into<String>) -> Result<Self, GoogleTranslateError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Translate `text` from `source` to `dest`.
    ///
    /// Sends `GET /translate_a/single` and joins the translated segments.
    pub async fn translate_text(
        &self,
        text: &str,
        source: &str,
        dest: &str,
    ) -> Result<String, GoogleTranslateError> {
        let response = self
            .client
            .get(format!("{}/translate_a/single", self.base_url))
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", dest),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let body: serde_json::Value = response.json().await?;
        parse_translation(&body)
    }

    /// Map a non-2xx response to [`GoogleTranslateError::ApiError`].
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GoogleTranslateError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GoogleTranslateError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl Translator for GoogleTranslateApi {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        dest: &str,
    ) -> Result<String, TranslatorError> {
        tracing::debug!(
            source,
            dest,
            chars = text.chars().count(),
            "Calling Google Translate",
        );
        let translated = self.translate_text(text, source, dest).await?;
        if translated.trim().is_empty() {
            return Err(TranslatorError::EmptyResult);
        }
        Ok(translated)
    }
}

/// Join the translated segments of a `translate_a/single` response.
///
/// Expected shape: `[[["translated", "original", ...], ...], ...]`.
pub fn parse_translation(body: &serde_json::Value) -> Result<String, GoogleTranslateError> {
    let segments = body
        .get(0)
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| GoogleTranslateError::Malformed("missing segment list".into()))?;

    segments
        .iter()
        .map(|segment| {
            segment
                .get(0)
                .and_then(serde_json::Value::as_str)
                .ok_or_else(|| GoogleTranslateError::Malformed(format!("bad segment: {segment}")))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
