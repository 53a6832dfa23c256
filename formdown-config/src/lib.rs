//! Shared configuration loader for the formdown toolchain.
//!
//! `defaults/formdown.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`FormdownConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use formdown_core::{DefaultForm, FormdownOptions, MarkdownOptions};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/formdown.default.toml");

/// Top-level configuration consumed by formdown applications.
#[derive(Debug, Clone, Deserialize)]
pub struct FormdownConfig {
    pub markdown: MarkdownConfig,
    pub forms: FormsConfig,
    pub output: OutputConfig,
}

/// GitHub-flavored markdown extensions.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub table: bool,
    pub strikethrough: bool,
    pub autolink: bool,
    pub tasklist: bool,
}

impl From<&MarkdownConfig> for MarkdownOptions {
    fn from(config: &MarkdownConfig) -> Self {
        MarkdownOptions {
            table: config.table,
            strikethrough: config.strikethrough,
            autolink: config.autolink,
            tasklist: config.tasklist,
        }
    }
}

/// Attributes of the implicit form.
#[derive(Debug, Clone, Deserialize)]
pub struct FormsConfig {
    pub default_action: String,
    pub default_method: String,
}

impl From<&FormsConfig> for DefaultForm {
    fn from(config: &FormsConfig) -> Self {
        DefaultForm {
            action: config.default_action.clone(),
            method: config.default_method.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub document: DocumentMode,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum DocumentMode {
    #[serde(rename = "fragment")]
    Fragment,
    #[serde(rename = "page")]
    Page,
}

impl From<&FormdownConfig> for FormdownOptions {
    fn from(config: &FormdownConfig) -> Self {
        FormdownOptions {
            markdown: (&config.markdown).into(),
            default_form: (&config.forms).into(),
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (CLI flags end up here).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<FormdownConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<FormdownConfig, ConfigError> {
    Loader::new().build()
}
