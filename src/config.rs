//! Configuration for ftl-extract.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration loaded from `ftl-extract.json`, with defaults matching
/// the layout the consuming application expects.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Output directory for translation files, relative to the project root
    #[serde(default = "default_output")]
    pub output: String,

    /// Locale written without transformation
    #[serde(default = "default_plain_locale")]
    pub plain_locale: String,

    /// Locale written with pseudolocalized values
    #[serde(default = "default_pseudo_locale")]
    pub pseudo_locale: String,

    /// Invocation marker for singular strings
    #[serde(default = "default_singular_marker")]
    pub singular_marker: String,

    /// Invocation marker for pluralized strings
    #[serde(default = "default_plural_marker")]
    pub plural_marker: String,

    /// Directory names pruned from the source walk
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,

    /// Extra glob patterns for files to exclude from extraction
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Path suffix of the file that defines the plural macro itself;
    /// excluded so the definition is never extracted as a call
    #[serde(default = "default_macro_definition_file")]
    pub macro_definition_file: String,
}

fn default_output() -> String {
    "assets/translations".to_string()
}

fn default_plain_locale() -> String {
    "en-US".to_string()
}

fn default_pseudo_locale() -> String {
    "en-XA".to_string()
}

fn default_singular_marker() -> String {
    "tr!".to_string()
}

fn default_plural_marker() -> String {
    "tr_plural!".to_string()
}

fn default_skip_dirs() -> Vec<String> {
    vec![
        "target".to_string(),
        ".git".to_string(),
        ".cargo".to_string(),
    ]
}

fn default_macro_definition_file() -> String {
    "i18n/mod.rs".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: default_output(),
            plain_locale: default_plain_locale(),
            pseudo_locale: default_pseudo_locale(),
            singular_marker: default_singular_marker(),
            plural_marker: default_plural_marker(),
            skip_dirs: default_skip_dirs(),
            exclude: Vec::new(),
            macro_definition_file: default_macro_definition_file(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load from the default config file, or return default config
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default_path = Path::new("ftl-extract.json");
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Both output locales, plain first.
    pub fn locales(&self) -> [&str; 2] {
        [&self.plain_locale, &self.pseudo_locale]
    }
}
