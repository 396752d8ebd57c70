//! The validation decision pipeline: an ordered rule chain that
//! short-circuits on the first failing rule. A configured rule that passes
//! falls through to the next one.

use log::trace;

use formdom::{FieldEvent, Form};

use crate::options::{EQUALS_PLACEHOLDER, EqualsTarget, FieldConfig, ValidationOptions};

/// Which rule produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Custom,
    Equals,
    Pattern,
    Required,
}

/// A single failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
    /// Whether the triggering event was the continuous/typing kind.
    pub live: bool,
}

/// The result of one validation run. Produced fresh per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Valid {
        /// Whether the triggering event was the continuous/typing kind.
        live: bool,
    },
    Invalid(Failure),
}

impl Outcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Outcome::Valid { .. })
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    pub fn is_live(&self) -> bool {
        match self {
            Outcome::Valid { live } => *live,
            Outcome::Invalid(failure) => failure.live,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Valid { .. } => None,
            Outcome::Invalid(failure) => Some(failure),
        }
    }
}

/// Run the rule chain for one field.
///
/// Returns `None` when nothing is to be validated at all: an unknown field,
/// or a typing event on a field with live validation disabled. A `None` is
/// a deliberate no-op, distinct from `Valid`: nothing gets reported.
pub fn validate(event: &FieldEvent, form: &Form, options: &ValidationOptions) -> Option<Outcome> {
    let config = options.fields.get(&event.field)?;
    let live = event.kind.is_live();

    // Live-validation gate.
    if live && !config.live_validation {
        trace!("live validation disabled for {:?}, skipping", event.field);
        return None;
    }

    let field = form.field_by_name(&event.field)?;
    let value = field.value.as_str();

    let failure = |kind, message| Some(Outcome::Invalid(Failure { kind, message, live }));

    // Custom validator first; its failure suppresses every later rule.
    if let Some(validator) = &config.validator
        && let Some(message) = validator(field, value, field.required, form, options)
        && !message.is_empty()
    {
        return failure(FailureKind::Custom, message);
    }

    // Cross-field equality.
    if let Some(target) = &config.equals {
        let (target_value, target_name) = resolve_target(form, target);
        if value != target_value {
            let message = config
                .equals_message
                .replace(EQUALS_PLACEHOLDER, &target_name);
            return failure(FailureKind::Equals, message);
        }
    }

    // Pattern match (full-value, the regex is anchored at compile time).
    if let Some(pattern) = &config.pattern
        && !pattern.regex.is_match(value)
    {
        return failure(FailureKind::Pattern, config.pattern_message.clone());
    }

    // Required-ness. Skipped while typing: a user is not flagged "empty"
    // for having not yet typed anything.
    if !live && field.required && value.is_empty() {
        return failure(FailureKind::Required, config.required_message.clone());
    }

    Some(Outcome::Valid { live })
}

/// Current value and human name of an equality target. A missing target
/// contributes the empty string, so the comparison stays deterministic.
fn resolve_target(form: &Form, target: &EqualsTarget) -> (String, String) {
    let field = match target {
        EqualsTarget::ByName(name) => form.field_by_name(name),
        EqualsTarget::ById(id) => form.field_by_id(id),
    };
    match field {
        Some(f) => (f.value.clone(), f.human_name().to_string()),
        None => (String::new(), target.reference().to_string()),
    }
}
