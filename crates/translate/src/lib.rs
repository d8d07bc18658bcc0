//! Remote translation clients for `kankotri-core`.
//!
//! Provides [`google::GoogleTranslateApi`], an HTTP client for the public
//! Google Translate endpoint that implements the core
//! [`Translator`](kankotri_core::Translator) trait.

pub mod google;

pub use google::{GoogleTranslateApi, GoogleTranslateError};
