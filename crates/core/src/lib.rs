//! Guest-name resolution for personalised wedding invitations.
//!
//! Turns an English guest name into Gujarati script using a remote
//! translator when one is available and a bundled bilingual dictionary
//! otherwise, and describes where the resolved name is drawn on the
//! invitation template.

pub mod dictionary;
pub mod entry;
pub mod error;
pub mod layout;
pub mod override_rule;
pub mod resolver;
pub mod script;
pub mod translator;

pub use dictionary::TranslationDictionary;
pub use entry::NameEntry;
pub use error::CoreError;
pub use override_rule::OverrideRule;
pub use resolver::{Resolver, ResolverConfig};
pub use translator::{Translator, TranslatorError};
