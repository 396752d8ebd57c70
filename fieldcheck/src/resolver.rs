//! Option resolution: raw layered options in, immutable per-field configs out.
//!
//! Layering, in increasing priority: built-in defaults, the `all` block,
//! the per-field block, and finally markup-declared `pattern`/`equals`
//! attributes (which win for those two properties only). Resolution runs
//! exactly once per activation; later field or attribute mutations are not
//! observed.

use std::collections::HashMap;
use std::time::Duration;

use log::debug;
use regex::Regex;

use formdom::Form;

use crate::error::ConfigError;
use crate::options::{
    CompiledPattern, DEFAULT_EQUALS_MESSAGE, DEFAULT_PATTERN_MESSAGE, DEFAULT_REQUIRED_MESSAGE,
    DEFAULT_TIMEOUT_MS, EqualsTarget, FieldConfig, FieldOverrides, RawOptions, ValidationOptions,
};
use crate::patterns;

/// Markup attribute declaring a pattern on a field.
pub const PATTERN_ATTR: &str = "pattern";
/// Markup attribute declaring a cross-field equality target.
pub const EQUALS_ATTR: &str = "equals";

/// Resolve raw options against a form into a per-activation config.
///
/// Unknown pattern names and malformed inline patterns fail here, eagerly,
/// rather than being silently skipped at validation time.
pub fn resolve(form: &Form, raw: &RawOptions) -> Result<ValidationOptions, ConfigError> {
    let registry = patterns::registry(&raw.patterns)?;

    let mut fields = HashMap::new();
    for field in form.validation_fields() {
        let per_field = raw.fields.get(&field.name);

        // Markup wins for pattern and equals only.
        let pattern_source = field
            .data
            .get(PATTERN_ATTR)
            .cloned()
            .or_else(|| layered(per_field, &raw.all, |o| o.pattern.clone()));
        let pattern = pattern_source
            .map(|src| compile_pattern(&field.name, &src, &registry))
            .transpose()?;

        let equals_reference = field
            .data
            .get(EQUALS_ATTR)
            .cloned()
            .or_else(|| layered(per_field, &raw.all, |o| o.equals.clone()));
        let equals = equals_reference
            .map(|reference| parse_equals(&field.name, &reference))
            .transpose()?;

        let config = FieldConfig {
            live_validation: layered(per_field, &raw.all, |o| o.live_validation).unwrap_or(true),
            pattern,
            equals,
            required_message: layered(per_field, &raw.all, |o| o.required_message.clone())
                .unwrap_or_else(|| DEFAULT_REQUIRED_MESSAGE.to_string()),
            pattern_message: layered(per_field, &raw.all, |o| o.pattern_message.clone())
                .unwrap_or_else(|| DEFAULT_PATTERN_MESSAGE.to_string()),
            equals_message: layered(per_field, &raw.all, |o| o.equals_message.clone())
                .unwrap_or_else(|| DEFAULT_EQUALS_MESSAGE.to_string()),
            validator: layered(per_field, &raw.all, |o| o.validator.clone()),
        };
        fields.insert(field.name.clone(), config);
    }

    debug!(
        "resolved options for form {:?}: {} field(s), {} pattern(s)",
        form.id,
        fields.len(),
        registry.len()
    );

    Ok(ValidationOptions {
        timeout: Duration::from_millis(raw.timeout.unwrap_or(DEFAULT_TIMEOUT_MS)),
        fields,
        patterns: registry,
    })
}

/// Pick a property from the per-field layer, falling back to `all`.
fn layered<T>(
    per_field: Option<&FieldOverrides>,
    all: &FieldOverrides,
    get: impl Fn(&FieldOverrides) -> Option<T>,
) -> Option<T> {
    per_field.and_then(&get).or_else(|| get(all))
}

/// Look a pattern up by name; a miss must compile as an inline regex.
fn compile_pattern(
    field: &str,
    source: &str,
    registry: &HashMap<String, Regex>,
) -> Result<CompiledPattern, ConfigError> {
    if let Some(regex) = registry.get(source) {
        return Ok(CompiledPattern {
            name: source.to_string(),
            regex: regex.clone(),
        });
    }
    match patterns::compile(source) {
        Ok(regex) => Ok(CompiledPattern {
            name: source.to_string(),
            regex,
        }),
        Err(e) => Err(ConfigError::UnknownPattern {
            field: field.to_string(),
            pattern: source.to_string(),
            source_error: e.to_string(),
        }),
    }
}

/// Parse an equals reference: `#`-prefixed means by element id.
fn parse_equals(field: &str, reference: &str) -> Result<EqualsTarget, ConfigError> {
    match reference.strip_prefix('#') {
        Some("") => Err(ConfigError::EmptyEqualsTarget {
            field: field.to_string(),
        }),
        Some(id) => Ok(EqualsTarget::ById(id.to_string())),
        None if reference.is_empty() => Err(ConfigError::EmptyEqualsTarget {
            field: field.to_string(),
        }),
        None => Ok(EqualsTarget::ByName(reference.to_string())),
    }
}
