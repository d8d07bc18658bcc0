//! The single hard-coded name exception.
//!
//! The family surname `vadhel` must always render as `વઢેળ`, whatever a
//! remote translator or the dictionary would produce. Before a name is sent
//! to the translator the token is swapped for a placeholder the translator
//! leaves alone; [`OverrideRule::restore`] then writes the canonical target
//! back into the translated text.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::error::CoreError;
use crate::script::contains_gujarati;

pub const OVERRIDE_TOKEN: &str = "vadhel";
pub const OVERRIDE_TARGET: &str = "વઢેળ";

/// Sent to the translator in place of the override token.
pub const PLACEHOLDER: &str = "XXX999XXX";

/// Spellings the translator has produced for `vadhel` when it was not masked.
const NEAR_MISSES: [&str; 2] = ["વાધેલ", "વધેલ"];

static DEFAULT_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bvadhel\b").expect("valid regex"));

// Translators occasionally re-case the placeholder.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)xxx999xxx").expect("valid regex"));

// Left behind by an earlier masking scheme that sent the word "placeholder".
static ARTIFACT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("_?પ્લેસહોલ્ડર").expect("valid regex"));

/// A source token that always resolves to a fixed target, matched
/// case-insensitively on word boundaries.
#[derive(Debug, Clone)]
pub struct OverrideRule {
    token: String,
    target: String,
    pattern: Regex,
    near_misses: Vec<String>,
}

impl OverrideRule {
    /// Build a rule for an arbitrary token.
    ///
    /// The token must be a single ASCII word and the target must contain
    /// Gujarati text.
    pub fn new(token: &str, target: &str) -> Result<Self, CoreError> {
        let token = token.trim().to_lowercase();
        if token.is_empty() || !token.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CoreError::Validation(format!(
                "override token must be a single ASCII word, got {token:?}"
            )));
        }
        if !contains_gujarati(target) {
            return Err(CoreError::Validation(format!(
                "override target must be Gujarati, got {target:?}"
            )));
        }

        let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&token)))
            .map_err(|e| CoreError::Validation(format!("invalid override token: {e}")))?;

        Ok(Self {
            token,
            target: target.to_string(),
            pattern,
            near_misses: Vec::new(),
        })
    }

    /// Additional mistranslations of the token to correct in remote output.
    pub fn with_near_misses<I, S>(mut self, near_misses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.near_misses = near_misses.into_iter().map(Into::into).collect();
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn placeholder(&self) -> &str {
        PLACEHOLDER
    }

    /// Whether `text` contains the token as a whole word.
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Replace every occurrence of the token with [`PLACEHOLDER`].
    ///
    /// Returns `None` when the token does not occur.
    pub fn mask(&self, text: &str) -> Option<String> {
        if !self.matches(text) {
            return None;
        }
        Some(self.pattern.replace_all(text, NoExpand(PLACEHOLDER)).into_owned())
    }

    /// Write the canonical target back into translator output produced
    /// from masked text.
    pub fn restore(&self, translated: &str) -> String {
        let mut restored = PLACEHOLDER_RE
            .replace_all(translated, NoExpand(&self.target))
            .into_owned();
        for near_miss in &self.near_misses {
            restored = restored.replace(near_miss.as_str(), &self.target);
        }
        ARTIFACT_RE.replace_all(&restored, "").into_owned()
    }
}

impl Default for OverrideRule {
    fn default() -> Self {
        Self {
            token: OVERRIDE_TOKEN.to_string(),
            target: OVERRIDE_TARGET.to_string(),
            pattern: DEFAULT_TOKEN_RE.clone(),
            near_misses: Vec::new(),
        }
        .with_near_misses(NEAR_MISSES)
    }
}
