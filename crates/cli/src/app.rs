//! Command execution, kept apart from `main` so it can run against
//! in-memory input and output in tests.

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use kankotri_core::layout::{InvitationLayout, OverlayPlan};
use kankotri_core::{NameEntry, Resolver, ResolverConfig, TranslationDictionary};
use kankotri_translate::GoogleTranslateApi;
use serde::Serialize;

use crate::cli::Command;
use crate::config::CliConfig;

/// Output of the `layout` command.
#[derive(Debug, Serialize)]
pub struct LayoutReport {
    pub entry: NameEntry,
    pub output_filename: String,
    pub plan: OverlayPlan,
}

/// Build the resolver described by `config`.
pub fn build_resolver(config: &CliConfig) -> anyhow::Result<Resolver> {
    let mut dictionary = TranslationDictionary::builtin();
    if let Some(path) = &config.extra_dictionary {
        let extra = TranslationDictionary::from_path(path)
            .with_context(|| format!("loading dictionary {}", path.display()))?;
        dictionary.merge(&extra)?;
        tracing::info!(
            path = %path.display(),
            entries = extra.len(),
            version = extra.version(),
            "Merged extra dictionary",
        );
    }

    let resolver = Resolver::new(dictionary)?.with_config(ResolverConfig {
        timeout: config.timeout,
    });
    tracing::debug!(
        entries = resolver.dictionary().len(),
        override_token = resolver.override_rule().token(),
        "Dictionary ready",
    );

    if config.offline {
        tracing::info!("Remote translation disabled, using dictionary only");
        return Ok(resolver);
    }

    let api = GoogleTranslateApi::new(config.translate_url.clone())
        .context("building translate client")?;
    tracing::info!(
        url = %api.base_url(),
        timeout_ms = resolver.config().timeout.as_millis() as u64,
        "Remote translation enabled",
    );
    Ok(resolver.with_translator(Arc::new(api)))
}

/// Execute `command`, reading names from `input` when none were given on
/// the command line and writing results to `output`.
pub async fn run<R, W>(
    command: &Command,
    config: &CliConfig,
    input: R,
    mut output: W,
) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    let resolver = build_resolver(config)?;

    match command {
        Command::Resolve { names, plain } => {
            let names = if names.is_empty() {
                read_names(input)?
            } else {
                names.clone()
            };
            for name in &names {
                let entry = resolver.resolve_entry(name).await;
                if *plain {
                    writeln!(output, "{}", entry.resolved_text)?;
                } else {
                    writeln!(output, "{}", serde_json::to_string(&entry)?)?;
                }
            }
            tracing::info!(count = names.len(), "Resolved guest names");
        }
        Command::Layout { name, page_heights } => {
            let layout = InvitationLayout {
                color: config.name_color,
                ..InvitationLayout::default()
            }
            .with_font_path(&config.font_path);
            let (entry, plan) = layout.plan_for(&resolver, name, page_heights).await?;
            let report = LayoutReport {
                entry,
                output_filename: layout.output_filename.clone(),
                plan,
            };
            writeln!(output, "{}", serde_json::to_string_pretty(&report)?)?;
        }
    }

    output.flush()?;
    Ok(())
}

/// Non-blank lines of `input`, trimmed.
fn read_names<R: BufRead>(input: R) -> anyhow::Result<Vec<String>> {
    let mut names = Vec::new();
    for line in input.lines() {
        let line = line.context("reading names from stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            names.push(line.to_string());
        }
    }
    Ok(names)
}
