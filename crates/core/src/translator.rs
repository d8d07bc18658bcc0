//! Remote translation seam.
//!
//! The resolver only depends on [`Translator`]; the HTTP implementation
//! lives in `kankotri-translate` and tests supply their own stubs.

use async_trait::async_trait;

/// Language tag of guest names as typed.
pub const SOURCE_LANG: &str = "en";
/// Language tag of the invitation text.
pub const TARGET_LANG: &str = "gu";

/// Failure reported by a [`Translator`].
#[derive(Debug, thiserror::Error)]
pub enum TranslatorError {
    /// The service could not be reached or answered with an error.
    #[error("Translation service error: {0}")]
    Service(String),

    /// The service answered but produced no text.
    #[error("Translation service returned no text")]
    EmptyResult,
}

/// A long-lived handle to a remote translation service.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from language `source` to language `dest`.
    async fn translate(&self, text: &str, source: &str, dest: &str)
        -> Result<String, TranslatorError>;
}
