//! Bilingual English-to-Gujarati name dictionary.
//!
//! The bundled table lives in `data/en_gu.json` and is compiled into the
//! crate. It is parsed once, on first use, and is read-only afterwards.
//! Lookups are whole-word and case-insensitive.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Deserialize;

use crate::error::CoreError;
use crate::override_rule::OverrideRule;
use crate::script::contains_gujarati;

const BUILTIN_JSON: &str = include_str!("../data/en_gu.json");

static BUILTIN: LazyLock<TranslationDictionary> = LazyLock::new(|| {
    TranslationDictionary::from_json(BUILTIN_JSON).expect("bundled dictionary is valid")
});

/// On-disk shape of a dictionary file.
#[derive(Debug, Deserialize)]
struct DictionaryDocument {
    version: u32,
    entries: BTreeMap<String, String>,
}

/// Immutable mapping from lowercase English words to Gujarati words.
#[derive(Debug, Clone)]
pub struct TranslationDictionary {
    version: u32,
    entries: BTreeMap<String, String>,
    /// One alternation over every key, `None` when the dictionary is empty.
    pattern: Option<Regex>,
}

impl TranslationDictionary {
    /// The dictionary bundled with the crate.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Parse a `{"version": N, "entries": {...}}` document.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let document: DictionaryDocument = serde_json::from_str(json)?;
        let mut dictionary = Self::from_entries(document.entries)?;
        dictionary.version = document.version;
        Ok(dictionary)
    }

    /// Read and parse a dictionary file.
    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Build an unversioned dictionary from `(english, gujarati)` pairs.
    ///
    /// Keys are lowercased. Every key must be a single ASCII word and every
    /// value must contain Gujarati text.
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (key, value) in entries {
            let (key, value) = validate_entry(key.as_ref(), value.into())?;
            map.insert(key, value);
        }
        let pattern = compile_pattern(&map)?;
        Ok(Self {
            version: 0,
            entries: map,
            pattern,
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive lookup of a single word.
    pub fn get(&self, word: &str) -> Option<&str> {
        self.entries.get(&word.to_lowercase()).map(String::as_str)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    /// Overlay `other` on top of this dictionary; `other` wins on conflicts.
    pub fn merge(&mut self, other: &TranslationDictionary) -> Result<(), CoreError> {
        self.entries
            .extend(other.entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.version = self.version.max(other.version);
        self.pattern = compile_pattern(&self.entries)?;
        Ok(())
    }

    /// Make sure the override token maps to its canonical target.
    pub fn insert_override(&mut self, rule: &OverrideRule) -> Result<(), CoreError> {
        if self.get(rule.token()) == Some(rule.target()) {
            return Ok(());
        }
        self.entries
            .insert(rule.token().to_string(), rule.target().to_string());
        self.pattern = compile_pattern(&self.entries)?;
        Ok(())
    }

    /// Replace every whole-word, case-insensitive key occurrence in `text`
    /// with its Gujarati value.
    ///
    /// All keys are matched in a single left-to-right pass, so replaced text
    /// is never scanned again.
    pub fn substitute(&self, text: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return text.to_string();
        };
        pattern
            .replace_all(text, |caps: &Captures| {
                let word = &caps[0];
                self.get(word).unwrap_or(word).to_string()
            })
            .into_owned()
    }
}

fn validate_entry(key: &str, value: String) -> Result<(String, String), CoreError> {
    let key = key.trim().to_lowercase();
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CoreError::Validation(format!(
            "dictionary key must be a single ASCII word, got {key:?}"
        )));
    }
    if !contains_gujarati(&value) {
        return Err(CoreError::Validation(format!(
            "dictionary value for {key:?} must be Gujarati, got {value:?}"
        )));
    }
    Ok((key, value))
}

fn compile_pattern(entries: &BTreeMap<String, String>) -> Result<Option<Regex>, CoreError> {
    if entries.is_empty() {
        return Ok(None);
    }
    let alternation = entries
        .keys()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))
        .map(Some)
        .map_err(|e| CoreError::Validation(format!("dictionary pattern: {e}")))
}
