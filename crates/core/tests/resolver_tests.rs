//! Integration tests for guest-name resolution.
//!
//! Exercise the remote-first path with stub translators (succeeding,
//! failing, hanging, empty, mangling) and check that every failure lands on
//! exactly the dictionary-only result.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use kankotri_core::translator::{SOURCE_LANG, TARGET_LANG};
use kankotri_core::{
    Resolver, ResolverConfig, TranslationDictionary, Translator, TranslatorError,
};

// ---------------------------------------------------------------------------
// Stub translators
// ---------------------------------------------------------------------------

/// Word-by-word translator that leaves unknown tokens (and the placeholder)
/// alone, and records what it was asked to translate.
#[derive(Default)]
struct WordTranslator {
    seen: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl Translator for WordTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        dest: &str,
    ) -> Result<String, TranslatorError> {
        self.seen
            .lock()
            .expect("lock")
            .push((text.to_string(), source.to_string(), dest.to_string()));
        let words: Vec<&str> = text
            .split_whitespace()
            .map(|w| match w.to_lowercase().as_str() {
                "sarthak" => "સાર્થક",
                "ramesh" => "રમેશ",
                "mahesh" => "મહેશ",
                "random" => "રેન્ડમ",
                _ => w,
            })
            .collect();
        Ok(words.join(" "))
    }
}

struct FailingTranslator;

#[async_trait]
impl Translator for FailingTranslator {
    async fn translate(&self, _: &str, _: &str, _: &str) -> Result<String, TranslatorError> {
        Err(TranslatorError::Service("connection reset".into()))
    }
}

struct EmptyTranslator;

#[async_trait]
impl Translator for EmptyTranslator {
    async fn translate(&self, _: &str, _: &str, _: &str) -> Result<String, TranslatorError> {
        Ok(String::new())
    }
}

/// Sleeps before answering with a fixed reply.
struct SlowTranslator {
    delay: Duration,
    reply: &'static str,
}

#[async_trait]
impl Translator for SlowTranslator {
    async fn translate(&self, _: &str, _: &str, _: &str) -> Result<String, TranslatorError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.reply.to_string())
    }
}

/// Sleeps only for inputs containing "slow", otherwise echoes a tagged reply.
struct SelectiveTranslator {
    delay: Duration,
}

#[async_trait]
impl Translator for SelectiveTranslator {
    async fn translate(&self, text: &str, _: &str, _: &str) -> Result<String, TranslatorError> {
        if text.to_lowercase().contains("slow") {
            tokio::time::sleep(self.delay).await;
        }
        Ok(format!("અનુવાદ:{text}"))
    }
}

/// Always answers with a fixed string, whatever it was sent.
struct FixedTranslator(&'static str);

#[async_trait]
impl Translator for FixedTranslator {
    async fn translate(&self, _: &str, _: &str, _: &str) -> Result<String, TranslatorError> {
        Ok(self.0.to_string())
    }
}

fn offline() -> Resolver {
    Resolver::new(TranslationDictionary::builtin()).expect("builtin resolver")
}

fn remote(translator: Arc<dyn Translator>) -> Resolver {
    offline().with_translator(translator)
}

fn remote_with_timeout(translator: Arc<dyn Translator>, timeout: Duration) -> Resolver {
    remote(translator).with_config(ResolverConfig { timeout })
}

// ---------------------------------------------------------------------------
// Concrete scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn vadhel_sarthak_without_remote() {
    let resolved = offline().resolve("Vadhel Sarthak").await;
    assert!(resolved.contains("વઢેળ"), "got {resolved}");
    assert!(resolved.contains("સાર્થક"), "got {resolved}");
}

#[tokio::test]
async fn lone_vadhel_is_exact() {
    assert_eq!(offline().resolve("vadhel").await, "વઢેળ");
}

#[tokio::test]
async fn unknown_name_passes_through_verbatim() {
    assert_eq!(
        offline().resolve("Random Unknown Name").await,
        "Random Unknown Name"
    );
}

#[tokio::test]
async fn gujarati_input_is_unchanged() {
    assert_eq!(offline().resolve("વઢેળ").await, "વઢેળ");
}

#[tokio::test]
async fn empty_input_is_empty() {
    assert_eq!(offline().resolve("").await, "");
}

// ---------------------------------------------------------------------------
// Guards
// ---------------------------------------------------------------------------

#[tokio::test]
async fn whitespace_input_is_empty_even_with_remote() {
    let translator = Arc::new(WordTranslator::default());
    let resolver = remote(translator.clone());
    assert_eq!(resolver.resolve(" \t ").await, "");
    assert!(translator.seen.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn gujarati_input_skips_remote() {
    let translator = Arc::new(WordTranslator::default());
    let resolver = remote(translator.clone());
    assert_eq!(resolver.resolve("વઢેળ સાર્થક").await, "વઢેળ સાર્થક");
    assert!(translator.seen.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn mixed_script_input_is_treated_as_resolved() {
    let resolver = remote(Arc::new(WordTranslator::default()));
    assert_eq!(resolver.resolve("Ramesh વઢેળ").await, "Ramesh વઢેળ");
}

// ---------------------------------------------------------------------------
// Remote path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn remote_receives_masked_text_and_language_tags() {
    let translator = Arc::new(WordTranslator::default());
    let resolver = remote(translator.clone());

    let resolved = resolver.resolve("Vadhel Sarthak").await;

    assert_eq!(resolved, "વઢેળ સાર્થક");
    let seen = translator.seen.lock().expect("lock");
    assert_eq!(
        seen.as_slice(),
        &[(
            "XXX999XXX Sarthak".to_string(),
            SOURCE_LANG.to_string(),
            TARGET_LANG.to_string()
        )]
    );
}

#[tokio::test]
async fn remote_result_without_override_is_returned_as_is() {
    let resolver = remote(Arc::new(WordTranslator::default()));
    assert_eq!(resolver.resolve("Ramesh Random").await, "રમેશ રેન્ડમ");
}

#[tokio::test]
async fn remote_near_miss_is_corrected() {
    let resolver = remote(Arc::new(FixedTranslator("વાધેલ સાર્થક")));
    assert_eq!(resolver.resolve("Vadhel Sarthak").await, "વઢેળ સાર્થક");
}

#[tokio::test]
async fn remote_placeholder_artifact_is_stripped() {
    let resolver = remote(Arc::new(FixedTranslator("XXX999XXX_પ્લેસહોલ્ડર સાર્થક")));
    assert_eq!(resolver.resolve("Vadhel Sarthak").await, "વઢેળ સાર્થક");
}

#[tokio::test]
async fn remote_that_drops_placeholder_falls_back() {
    let resolver = remote(Arc::new(FixedTranslator("સાર્થક")));
    assert_eq!(resolver.resolve("Vadhel Sarthak").await, "વઢેળ સાર્થક");
}

// ---------------------------------------------------------------------------
// Failure paths equal the dictionary-only computation
// ---------------------------------------------------------------------------

const SAMPLE_NAMES: [&str; 6] = [
    "Vadhel Sarthak",
    "Shri Ramesh Patel",
    "  Kalpana ben Desai ",
    "Random Unknown Name",
    "VADHEL",
    "Dr. Mahesh Shah",
];

#[tokio::test]
async fn failing_remote_equals_offline() {
    let reference = offline();
    let resolver = remote(Arc::new(FailingTranslator));
    for name in SAMPLE_NAMES {
        assert_eq!(
            resolver.resolve(name).await,
            reference.resolve_offline(name),
            "name: {name}"
        );
    }
}

#[tokio::test]
async fn empty_remote_equals_offline() {
    let reference = offline();
    let resolver = remote(Arc::new(EmptyTranslator));
    for name in SAMPLE_NAMES {
        assert_eq!(
            resolver.resolve(name).await,
            reference.resolve_offline(name),
            "name: {name}"
        );
    }
}

#[tokio::test]
async fn timed_out_remote_equals_offline() {
    let reference = offline();
    let resolver = remote_with_timeout(
        Arc::new(SlowTranslator {
            delay: Duration::from_secs(5),
            reply: "ignored",
        }),
        Duration::from_millis(50),
    );
    for name in ["Vadhel Sarthak", "Random Unknown Name"] {
        assert_eq!(
            resolver.resolve(name).await,
            reference.resolve_offline(name),
            "name: {name}"
        );
    }
}

#[tokio::test]
async fn slow_remote_within_deadline_is_used() {
    let resolver = remote_with_timeout(
        Arc::new(SlowTranslator {
            delay: Duration::from_millis(20),
            reply: "રમેશ",
        }),
        Duration::from_secs(2),
    );
    assert_eq!(resolver.resolve("Ramesh").await, "રમેશ");
}

#[tokio::test]
async fn dictionary_fallback_output_is_lowercased_and_trimmed() {
    let resolver = remote(Arc::new(FailingTranslator));
    assert_eq!(
        resolver.resolve("  Kalpana ben Desai ").await,
        "કલ્પના બેન દેસાઈ"
    );
    assert_eq!(resolver.resolve("Dr. Mahesh Shah").await, "dr. મહેશ શાહ");
}

// ---------------------------------------------------------------------------
// Override guarantee
// ---------------------------------------------------------------------------

#[tokio::test]
async fn override_survives_every_path() {
    let inputs = ["vadhel", "VADHEL ramesh", "Shri Vadhel, Sarthak", "zed vadhel qux"];
    let resolvers = [
        offline(),
        remote(Arc::new(WordTranslator::default())),
        remote(Arc::new(FailingTranslator)),
        remote(Arc::new(EmptyTranslator)),
        remote(Arc::new(FixedTranslator("garbled"))),
        remote_with_timeout(
            Arc::new(SlowTranslator {
                delay: Duration::from_secs(5),
                reply: "ignored",
            }),
            Duration::from_millis(20),
        ),
    ];
    for resolver in &resolvers {
        for input in inputs {
            let resolved = resolver.resolve(input).await;
            assert!(resolved.contains("વઢેળ"), "{resolver:?} on {input:?} gave {resolved:?}");
        }
    }
}

#[tokio::test]
async fn resolve_entry_reports_override() {
    let entry = offline().resolve_entry("Vadhel Sarthak").await;
    assert_eq!(entry.original_text, "Vadhel Sarthak");
    assert_eq!(entry.resolved_text, "વઢેળ સાર્થક");
    assert!(entry.override_applied);

    let entry = offline().resolve_entry("Ramesh").await;
    assert!(!entry.override_applied);
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[tokio::test]
async fn concurrent_calls_keep_their_own_results() {
    let resolver = remote_with_timeout(
        Arc::new(SelectiveTranslator {
            delay: Duration::from_millis(100),
        }),
        Duration::from_secs(2),
    );

    let (a, b) = tokio::join!(resolver.resolve("Ramesh slow"), resolver.resolve("Mahesh"));

    assert_eq!(a, "અનુવાદ:Ramesh slow");
    assert_eq!(b, "અનુવાદ:Mahesh");
}

#[tokio::test]
async fn one_timeout_does_not_affect_a_concurrent_call() {
    let resolver = remote_with_timeout(
        Arc::new(SelectiveTranslator {
            delay: Duration::from_secs(5),
        }),
        Duration::from_millis(150),
    );

    let (slow, fast) = tokio::join!(resolver.resolve("Ramesh slow"), resolver.resolve("Mahesh"));

    assert_eq!(slow, "રમેશ slow");
    assert_eq!(fast, "અનુવાદ:Mahesh");
}

#[tokio::test]
async fn concurrent_timeouts_run_in_parallel() {
    let timeout = Duration::from_millis(200);
    let resolver = remote_with_timeout(
        Arc::new(SlowTranslator {
            delay: Duration::from_secs(5),
            reply: "ignored",
        }),
        timeout,
    );

    let started = Instant::now();
    let (a, b) = tokio::join!(resolver.resolve("Vadhel"), resolver.resolve("Sarthak"));
    let elapsed = started.elapsed();

    assert_eq!(a, "વઢેળ");
    assert_eq!(b, "સાર્થક");
    assert!(
        elapsed < timeout * 2,
        "deadlines should overlap, took {elapsed:?}"
    );
}

#[tokio::test]
async fn resolver_is_shareable_across_tasks() {
    let resolver = Arc::new(remote(Arc::new(WordTranslator::default())));
    let handles: Vec<_> = ["Ramesh", "Mahesh", "Vadhel Sarthak"]
        .into_iter()
        .map(|name| {
            let resolver = Arc::clone(&resolver);
            tokio::spawn(async move { resolver.resolve(name).await })
        })
        .collect();

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.expect("task"));
    }
    assert_eq!(results, vec!["રમેશ", "મહેશ", "વઢેળ સાર્થક"]);
}
