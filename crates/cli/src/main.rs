//! `kankotri` -- resolve wedding guest names to Gujarati.
//!
//! Translates each name through Google Translate with a short deadline,
//! falling back to the bundled English-Gujarati name dictionary, and can
//! print where the name is stamped on the invitation card.
//!
//! # Environment variables
//!
//! | Variable                          | Required | Default | Description                         |
//! |-----------------------------------|----------|---------|-------------------------------------|
//! | `KANKOTRI_TRANSLATE_URL`          | no       | `https://translate.googleapis.com` | Translate endpoint base URL |
//! | `KANKOTRI_TRANSLATE_TIMEOUT_SECS` | no       | `3`     | Deadline for one translation call   |
//! | `KANKOTRI_OFFLINE`                | no       | `false` | Dictionary-only resolution          |
//! | `KANKOTRI_EXTRA_DICTIONARY`       | no       | --      | JSON dictionary merged over the bundled one |
//! | `KANKOTRI_FONT_PATH`              | no       | `fonts/NotoSansGujarati-Regular.ttf` | Gujarati font for rendering |
//! | `KANKOTRI_NAME_COLOR`             | no       | `#DC143C` | Colour of the printed name          |

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kankotri_cli::app;
use kankotri_cli::cli::Cli;
use kankotri_cli::config::CliConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "kankotri_cli=info,kankotri_core=info,kankotri_translate=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = CliConfig::from_env()?;
    config.apply_overrides(&cli);

    tracing::debug!(?config, "Configuration loaded");

    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    app::run(&cli.command, &config, stdin, stdout).await
}
