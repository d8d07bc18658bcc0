//! Guest-name resolution: remote translation first, dictionary second.
//!
//! [`Resolver::resolve`] never fails. Resolution proceeds in order and the
//! first step that produces text wins:
//!
//! 1. Blank input resolves to the empty string.
//! 2. Input that already contains Gujarati is returned unchanged.
//! 3. With a translator configured, the override token is masked and the
//!    text is translated under a per-call deadline. The placeholder is then
//!    replaced by the canonical override target.
//! 4. Otherwise, or when the remote step fails for any reason, every known
//!    word of the lowercased input is replaced from the dictionary.
//! 5. If the dictionary produced no Gujarati at all, the input is returned
//!    verbatim.
//!
//! Each call owns its own deadline (`tokio::time::timeout`), so concurrent
//! callers never share a timer and no process-wide lock is taken.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::dictionary::TranslationDictionary;
use crate::entry::NameEntry;
use crate::error::CoreError;
use crate::override_rule::OverrideRule;
use crate::script::{contains_gujarati, is_blank};
use crate::translator::{Translator, TranslatorError, SOURCE_LANG, TARGET_LANG};

/// Upper bound on a single remote translation call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Tunables for [`Resolver`].
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Wall-clock bound on the remote translation call.
    pub timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Why a resolution step was skipped. Logged, never returned to callers.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Remote translation timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },

    #[error("Remote translation failed: {0}")]
    TranslationService(#[from] TranslatorError),

    #[error("Remote translation lost the override placeholder")]
    OverrideLost,

    #[error("No dictionary entry matched")]
    NoDictionaryMatch,
}

/// Resolves English guest names to Gujarati script.
#[derive(Clone)]
pub struct Resolver {
    dictionary: Arc<TranslationDictionary>,
    rule: OverrideRule,
    translator: Option<Arc<dyn Translator>>,
    config: ResolverConfig,
}

impl Resolver {
    /// A dictionary-only resolver using the default override rule.
    pub fn new(dictionary: TranslationDictionary) -> Result<Self, CoreError> {
        Self::with_rule(dictionary, OverrideRule::default())
    }

    /// A dictionary-only resolver with a custom override rule.
    ///
    /// The rule's token is added to the dictionary if missing, so the
    /// fallback path alone already honours the override.
    pub fn with_rule(
        mut dictionary: TranslationDictionary,
        rule: OverrideRule,
    ) -> Result<Self, CoreError> {
        dictionary.insert_override(&rule)?;
        Ok(Self {
            dictionary: Arc::new(dictionary),
            rule,
            translator: None,
            config: ResolverConfig::default(),
        })
    }

    /// Attach a remote translator.
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn has_translator(&self) -> bool {
        self.translator.is_some()
    }

    pub fn dictionary(&self) -> &TranslationDictionary {
        &self.dictionary
    }

    pub fn override_rule(&self) -> &OverrideRule {
        &self.rule
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve `input` to Gujarati, falling back as far as necessary.
    pub async fn resolve(&self, input: &str) -> String {
        if is_blank(input) {
            return String::new();
        }
        if contains_gujarati(input) {
            tracing::debug!(
                input,
                "Input already contains Gujarati, passing through",
            );
            return input.to_string();
        }

        if let Some(translator) = &self.translator {
            match self.translate_remote(translator.as_ref(), input).await {
                Ok(translated) => {
                    tracing::debug!(
                        input,
                        resolved = %translated,
                        "Resolved via remote translation",
                    );
                    return translated;
                }
                Err(err @ ResolveError::Timeout { .. }) => {
                    tracing::warn!(
                        input,
                        error = %err,
                        "Remote translation timed out, using dictionary fallback",
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        input,
                        error = %err,
                        "Remote translation failed, using dictionary fallback",
                    );
                }
            }
        }

        self.fallback(input)
    }

    /// [`Self::resolve`] wrapped into a [`NameEntry`].
    pub async fn resolve_entry(&self, input: &str) -> NameEntry {
        let resolved = self.resolve(input).await;
        NameEntry::new(input, resolved, &self.rule)
    }

    /// Resolve without contacting the translator, even if one is attached.
    pub fn resolve_offline(&self, input: &str) -> String {
        if is_blank(input) {
            return String::new();
        }
        if contains_gujarati(input) {
            return input.to_string();
        }
        self.fallback(input)
    }

    fn fallback(&self, input: &str) -> String {
        match self.dictionary_lookup(input) {
            Ok(resolved) => {
                tracing::debug!(
                    input,
                    resolved = %resolved,
                    "Resolved via dictionary",
                );
                resolved
            }
            Err(err) => {
                tracing::info!(
                    input,
                    error = %err,
                    "Leaving name untranslated",
                );
                input.to_string()
            }
        }
    }

    fn dictionary_lookup(&self, input: &str) -> Result<String, ResolveError> {
        let cleaned = input.trim().to_lowercase();
        let substituted = self.dictionary.substitute(&cleaned);
        if contains_gujarati(&substituted) {
            Ok(substituted)
        } else {
            Err(ResolveError::NoDictionaryMatch)
        }
    }

    async fn translate_remote(
        &self,
        translator: &dyn Translator,
        input: &str,
    ) -> Result<String, ResolveError> {
        let masked = self.rule.mask(input);
        let outgoing = masked.as_deref().unwrap_or(input);

        let started = Instant::now();
        let translated = tokio::time::timeout(
            self.config.timeout,
            translator.translate(outgoing, SOURCE_LANG, TARGET_LANG),
        )
        .await
        .map_err(|_elapsed| ResolveError::Timeout {
            after_ms: started.elapsed().as_millis() as u64,
        })??;

        if is_blank(&translated) {
            return Err(TranslatorError::EmptyResult.into());
        }
        if masked.is_none() {
            return Ok(translated);
        }

        let restored = self.rule.restore(&translated);
        if !restored.contains(self.rule.target()) {
            return Err(ResolveError::OverrideLost);
        }
        Ok(restored)
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("dictionary_entries", &self.dictionary.len())
            .field("override_token", &self.rule.token())
            .field("has_translator", &self.translator.is_some())
            .field("config", &self.config)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
