use std::path::PathBuf;
use std::time::Duration;

use kankotri_core::layout::{Rgb, BUNDLED_FONT_PATH};
use kankotri_core::resolver::DEFAULT_TIMEOUT;
use kankotri_translate::google::DEFAULT_BASE_URL;

use crate::cli::Cli;

/// A configuration variable held a value that could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("{var} must be {expected}, got {value:?}")]
pub struct ConfigError {
    pub var: &'static str,
    pub expected: &'static str,
    pub value: String,
}

/// Tool configuration loaded from environment variables.
///
/// All fields have defaults suitable for running from the project root.
/// Command-line flags take precedence, see [`CliConfig::apply_overrides`].
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// Base URL of the translate endpoint.
    pub translate_url: String,
    /// Deadline for one remote translation call.
    pub timeout: Duration,
    /// Skip the remote translator entirely.
    pub offline: bool,
    /// Dictionary file merged over the bundled one.
    pub extra_dictionary: Option<PathBuf>,
    /// Gujarati TrueType font used for rendering.
    pub font_path: PathBuf,
    /// Colour the name is drawn in.
    pub name_color: Rgb,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            translate_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            offline: false,
            extra_dictionary: None,
            font_path: PathBuf::from(BUNDLED_FONT_PATH),
            name_color: Rgb::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                          | Default                              |
    /// |----------------------------------|--------------------------------------|
    /// | `KANKOTRI_TRANSLATE_URL`         | `https://translate.googleapis.com`   |
    /// | `KANKOTRI_TRANSLATE_TIMEOUT_SECS`| `3`                                  |
    /// | `KANKOTRI_OFFLINE`               | `false`                              |
    /// | `KANKOTRI_EXTRA_DICTIONARY`      | unset                                |
    /// | `KANKOTRI_FONT_PATH`             | `fonts/NotoSansGujarati-Regular.ttf` |
    /// | `KANKOTRI_NAME_COLOR`            | `#DC143C`                            |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`Self::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let translate_url = get("KANKOTRI_TRANSLATE_URL").unwrap_or(defaults.translate_url);

        let timeout = match get("KANKOTRI_TRANSLATE_TIMEOUT_SECS") {
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError {
                        var: "KANKOTRI_TRANSLATE_TIMEOUT_SECS",
                        expected: "a positive integer",
                        value,
                    })
                }
            },
            None => defaults.timeout,
        };

        let offline = match get("KANKOTRI_OFFLINE") {
            Some(value) => parse_bool(&value).ok_or(ConfigError {
                var: "KANKOTRI_OFFLINE",
                expected: "a boolean",
                value,
            })?,
            None => defaults.offline,
        };

        let extra_dictionary = get("KANKOTRI_EXTRA_DICTIONARY").map(PathBuf::from);

        let font_path = get("KANKOTRI_FONT_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.font_path);

        let name_color = match get("KANKOTRI_NAME_COLOR") {
            Some(value) => Rgb::from_hex(&value).map_err(|_| ConfigError {
                var: "KANKOTRI_NAME_COLOR",
                expected: "a #RRGGBB colour",
                value,
            })?,
            None => defaults.name_color,
        };

        Ok(Self {
            translate_url,
            timeout,
            offline,
            extra_dictionary,
            font_path,
            name_color,
        })
    }

    /// Let command-line flags win over the environment.
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if cli.offline {
            self.offline = true;
        }
        if let Some(secs) = cli.timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(path) = &cli.dictionary {
            self.extra_dictionary = Some(path.clone());
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
