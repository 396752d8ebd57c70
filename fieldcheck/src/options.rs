//! Configuration surface: raw user options and the resolved per-field form.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use regex::Regex;
use serde::Deserialize;

use formdom::{Field, Form};

/// Default debounce delay.
pub const DEFAULT_TIMEOUT_MS: u64 = 700;

pub const DEFAULT_REQUIRED_MESSAGE: &str = "This field is required.";
pub const DEFAULT_PATTERN_MESSAGE: &str = "Please enter a valid value.";
/// `{target}` is replaced with the target field's human name.
pub const DEFAULT_EQUALS_MESSAGE: &str = "Must match {target}.";

/// Placeholder substituted in the equals message.
pub const EQUALS_PLACEHOLDER: &str = "{target}";

/// A custom validation rule, called with the field, its current value, its
/// required flag, the owning form, and the activation options. A returned
/// non-empty string is the failure message.
pub type CustomValidator =
    Arc<dyn Fn(&Field, &str, bool, &Form, &ValidationOptions) -> Option<String> + Send + Sync>;

/// Per-field overrides, also the shape of the `all` layer. Every member is
/// optional; unset members fall through to the layer below.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct FieldOverrides {
    pub live_validation: Option<bool>,
    /// Pattern name from the registry, or an inline regex source.
    pub pattern: Option<String>,
    /// Target field reference: a name, or `#id`.
    pub equals: Option<String>,
    pub required_message: Option<String>,
    pub pattern_message: Option<String>,
    pub equals_message: Option<String>,
    #[serde(skip)]
    pub validator: Option<CustomValidator>,
}

impl FieldOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_validation(mut self, live: bool) -> Self {
        self.live_validation = Some(live);
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn equals(mut self, target: impl Into<String>) -> Self {
        self.equals = Some(target.into());
        self
    }

    pub fn required_message(mut self, msg: impl Into<String>) -> Self {
        self.required_message = Some(msg.into());
        self
    }

    pub fn pattern_message(mut self, msg: impl Into<String>) -> Self {
        self.pattern_message = Some(msg.into());
        self
    }

    pub fn equals_message(mut self, msg: impl Into<String>) -> Self {
        self.equals_message = Some(msg.into());
        self
    }

    pub fn validator<F>(mut self, f: F) -> Self
    where
        F: Fn(&Field, &str, bool, &Form, &ValidationOptions) -> Option<String>
            + Send
            + Sync
            + 'static,
    {
        self.validator = Some(Arc::new(f));
        self
    }
}

impl std::fmt::Debug for FieldOverrides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldOverrides")
            .field("live_validation", &self.live_validation)
            .field("pattern", &self.pattern)
            .field("equals", &self.equals)
            .field("required_message", &self.required_message)
            .field("pattern_message", &self.pattern_message)
            .field("equals_message", &self.equals_message)
            .field("validator", &self.validator.as_ref().map(|_| "..."))
            .finish()
    }
}

/// The user-facing options accepted by `Engine::activate`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawOptions {
    /// Debounce delay in milliseconds. Defaults to [`DEFAULT_TIMEOUT_MS`].
    pub timeout: Option<u64>,
    /// Defaults applied to every field.
    pub all: FieldOverrides,
    /// Explicit per-field overrides, by field name.
    pub fields: HashMap<String, FieldOverrides>,
    /// Extra pattern sources; may shadow built-in names.
    pub patterns: HashMap<String, String>,
}

impl RawOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.timeout = Some(ms);
        self
    }

    pub fn all(mut self, overrides: FieldOverrides) -> Self {
        self.all = overrides;
        self
    }

    pub fn field(mut self, name: impl Into<String>, overrides: FieldOverrides) -> Self {
        self.fields.insert(name.into(), overrides);
        self
    }

    pub fn pattern(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.patterns.insert(name.into(), source.into());
        self
    }
}

/// A cross-field equality target, parsed at resolve time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EqualsTarget {
    /// Same-named field within the form.
    ByName(String),
    /// Unique field by element id (written `#id` in configuration).
    ById(String),
}

impl EqualsTarget {
    /// The raw name the reference points at, for message substitution when
    /// the target field does not exist.
    pub fn reference(&self) -> &str {
        match self {
            EqualsTarget::ByName(name) | EqualsTarget::ById(name) => name,
        }
    }
}

/// A pattern resolved to a compiled, anchored regex.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Registry name, or the inline source itself.
    pub name: String,
    pub regex: Regex,
}

/// Fully-resolved per-field configuration. Immutable for the lifetime of
/// one activation; validation performs no further lookups.
#[derive(Clone)]
pub struct FieldConfig {
    pub live_validation: bool,
    pub pattern: Option<CompiledPattern>,
    pub equals: Option<EqualsTarget>,
    pub required_message: String,
    pub pattern_message: String,
    pub equals_message: String,
    pub validator: Option<CustomValidator>,
}

impl std::fmt::Debug for FieldConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldConfig")
            .field("live_validation", &self.live_validation)
            .field("pattern", &self.pattern)
            .field("equals", &self.equals)
            .field("required_message", &self.required_message)
            .field("pattern_message", &self.pattern_message)
            .field("equals_message", &self.equals_message)
            .field("validator", &self.validator.as_ref().map(|_| "..."))
            .finish()
    }
}

/// Per-activation configuration: one resolved config per selected field,
/// the merged pattern registry, and the shared debounce delay.
#[derive(Debug, Clone)]
pub struct ValidationOptions {
    pub timeout: Duration,
    pub fields: HashMap<String, FieldConfig>,
    pub patterns: HashMap<String, Regex>,
}
