//! Configuration file loading and parsing.
//!
//! Settings are read from `.intlintrc.json`, discovered by walking up from
//! the working directory. Every field is optional; defaults match the
//! conventional `Text` / `MarkupText` component names. Raw config is
//! compiled once into [`Settings`] (regexes and glob patterns pre-built);
//! compiled settings are read-only for the engine's lifetime.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::dictionary::LanguageSpec;
use crate::engine::classify::ComponentPattern;

pub const CONFIG_FILE_NAME: &str = ".intlintrc.json";

/// A matching rule for i18n components, as written in the config file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentPatternConfig {
    /// Regex matched against the element name. First match wins.
    pub name_regex: String,
    /// Attribute holding the translation key (default "id").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Attribute declaring plurality (default "plural").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
    /// Attribute carrying template field data (default "fields").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}

impl ComponentPatternConfig {
    pub fn named(name_regex: &str) -> Self {
        Self {
            name_regex: name_regex.to_string(),
            id: None,
            plural: None,
            fields: None,
        }
    }
}

/// A configured language dictionary source.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageFileConfig {
    /// Display name of the language (e.g., "en").
    pub name: String,
    /// Dictionary path, relative to the project root.
    pub path: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Translation dictionaries checked for every referenced key.
    #[serde(default)]
    pub language_files: Vec<LanguageFileConfig>,
    /// Ordered key-path prefixes tried when resolving a key.
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
    /// Components whose fallback children must not contain markup.
    #[serde(default = "default_text_components")]
    pub text_components: Vec<ComponentPatternConfig>,
    /// Components whose fallback children may contain nested markup.
    #[serde(default = "default_markup_text_components")]
    pub markup_text_components: Vec<ComponentPatternConfig>,
    /// Regex for call-style i18n helpers whose first argument lists keys.
    #[serde(default = "default_with_text_regex")]
    pub with_text_regex: String,
    /// Dictionary cache TTL in milliseconds.
    #[serde(default = "default_cache_ttl")]
    pub translations_cache_ttl: u64,
    /// Bypass the dictionary cache entirely.
    #[serde(default)]
    pub disable_cache: bool,
    /// Skip key-form catalog checking for pluralized mappings.
    #[serde(default)]
    pub ignore_plural_format: bool,
    /// Attribute names scanned for untranslated text.
    #[serde(default = "default_checked_attributes")]
    pub attributes: Vec<String>,
    /// Text matching this regex is never reported as untranslated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_text_regex: Option<String>,
    /// Glob patterns for files excluded from validation.
    #[serde(default)]
    pub ignore_files: Vec<String>,
    /// Source roots scanned for markup files.
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
}

fn default_scopes() -> Vec<String> {
    vec![String::new()]
}

fn default_text_components() -> Vec<ComponentPatternConfig> {
    vec![ComponentPatternConfig::named("^Text$")]
}

fn default_markup_text_components() -> Vec<ComponentPatternConfig> {
    vec![ComponentPatternConfig::named("^MarkupText$")]
}

fn default_with_text_regex() -> String {
    "^withText$".to_string()
}

fn default_cache_ttl() -> u64 {
    500
}

fn default_checked_attributes() -> Vec<String> {
    ["alt", "aria-label", "placeholder", "title"]
        .map(String::from)
        .to_vec()
}

fn default_includes() -> Vec<String> {
    ["src", "app", "components"].map(String::from).to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language_files: Vec::new(),
            scopes: default_scopes(),
            text_components: default_text_components(),
            markup_text_components: default_markup_text_components(),
            with_text_regex: default_with_text_regex(),
            translations_cache_ttl: default_cache_ttl(),
            disable_cache: false,
            ignore_plural_format: false,
            attributes: default_checked_attributes(),
            ignore_text_regex: None,
            ignore_files: Vec::new(),
            includes: default_includes(),
        }
    }
}

/// Compiled, engine-ready settings.
///
/// All regexes and glob patterns are built eagerly so invalid configuration
/// fails the run up front rather than mid-traversal.
#[derive(Debug)]
pub struct Settings {
    pub language_files: Vec<LanguageSpec>,
    pub scopes: Vec<String>,
    pub text_components: Vec<ComponentPattern>,
    pub markup_text_components: Vec<ComponentPattern>,
    pub with_text: Regex,
    pub cache_ttl_ms: u64,
    pub disable_cache: bool,
    pub ignore_plural_format: bool,
    pub checked_attributes: Vec<String>,
    pub ignore_text: Option<Regex>,
    pub ignore_files: Vec<Pattern>,
    pub includes: Vec<String>,
}

fn compile_patterns(
    configs: &[ComponentPatternConfig],
    field: &str,
) -> Result<Vec<ComponentPattern>> {
    configs
        .iter()
        .map(|c| {
            let name_regex = Regex::new(&c.name_regex)
                .with_context(|| format!("Invalid regex in '{}': \"{}\"", field, c.name_regex))?;
            Ok(ComponentPattern {
                name_regex,
                id: c.id.clone(),
                plural: c.plural.clone(),
                fields: c.fields.clone(),
            })
        })
        .collect()
}

impl Config {
    /// Compile the raw configuration into engine-ready settings.
    pub fn compile(&self) -> Result<Settings> {
        let with_text = Regex::new(&self.with_text_regex).with_context(|| {
            format!(
                "Invalid regex in 'withTextRegex': \"{}\"",
                self.with_text_regex
            )
        })?;

        let ignore_text = self
            .ignore_text_regex
            .as_deref()
            .map(|re| {
                Regex::new(re)
                    .with_context(|| format!("Invalid regex in 'ignoreTextRegex': \"{}\"", re))
            })
            .transpose()?;

        let ignore_files = self
            .ignore_files
            .iter()
            .map(|p| {
                Pattern::new(p)
                    .with_context(|| format!("Invalid glob pattern in 'ignoreFiles': \"{}\"", p))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Settings {
            language_files: self
                .language_files
                .iter()
                .map(|l| LanguageSpec::new(&l.name, &l.path))
                .collect(),
            scopes: self.scopes.clone(),
            text_components: compile_patterns(&self.text_components, "textComponents")?,
            markup_text_components: compile_patterns(
                &self.markup_text_components,
                "markupTextComponents",
            )?,
            with_text,
            cache_ttl_ms: self.translations_cache_ttl,
            disable_cache: self.disable_cache,
            ignore_plural_format: self.ignore_plural_format,
            checked_attributes: self.attributes.clone(),
            ignore_text,
            ignore_files,
            includes: self.includes.clone(),
        })
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.compile()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
