use std::collections::HashMap;

use log::trace;

use crate::field::Field;

/// Marker key in a field's `data` map that excludes it from validation.
pub const OPT_OUT_MARKER: &str = "novalidate";

/// Marker key in a form's `data` map requesting auto-activation.
pub const AUTO_ACTIVATE_MARKER: &str = "validate";

/// A form: an id, a flat collection of fields, and a few form-level flags.
#[derive(Debug, Clone, Default)]
pub struct Form {
    pub id: String,

    /// Form-level declarative attributes (e.g. the auto-activation marker).
    pub data: HashMap<String, String>,

    /// When true, native validation is suppressed. Set by the engine on
    /// activation.
    pub novalidate: bool,

    fields: Vec<Field>,
}

impl Form {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Set a form-level declarative attribute.
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// First field with the given submission name.
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field with the given element id, unique within the form.
    pub fn field_by_id(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Update a field's value by name. Returns false if no field matches.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => {
                trace!("set_value: no field named {name:?} in form {:?}", self.id);
                false
            }
        }
    }

    /// Fields under consideration for validation: every field of the form
    /// except hidden ones and those carrying the opt-out marker.
    pub fn validation_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| !f.hidden && !f.opted_out())
    }

    /// Whether the form carries the auto-activation marker.
    pub fn wants_auto_activation(&self) -> bool {
        self.data.contains_key(AUTO_ACTIVATE_MARKER)
    }
}
