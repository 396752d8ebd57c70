use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// The markup kind of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Input,
    TextArea,
    Select,
}

/// A single form field.
///
/// Fields are plain data: the engine never mutates them during validation,
/// it only reads `value` at fire time. Declarative per-field markup
/// (pattern, equals target, opt-out marker) lives in the `data` map.
#[derive(Debug, Clone)]
pub struct Field {
    /// Unique element id (auto-generated unless set via `id()`).
    pub id: String,

    /// Submission name. Fields are addressed by name within a form.
    pub name: String,

    pub kind: FieldKind,

    /// Current value as entered by the user.
    pub value: String,

    /// Human-readable label, used in cross-field messages.
    pub label: Option<String>,

    /// Whether the field carries the "required" marker.
    pub required: bool,

    /// Hidden fields are excluded from validation.
    pub hidden: bool,

    /// Declarative attributes (`pattern`, `equals`, `novalidate`, ...).
    pub data: HashMap<String, String>,
}

impl Field {
    fn new(name: impl Into<String>, kind: FieldKind, prefix: &str) -> Self {
        Self {
            id: generate_id(prefix),
            name: name.into(),
            kind,
            value: String::new(),
            label: None,
            required: false,
            hidden: false,
            data: HashMap::new(),
        }
    }

    pub fn input(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Input, "input")
    }

    pub fn text_area(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::TextArea, "textarea")
    }

    pub fn select(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Select, "select")
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Set a declarative attribute.
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Name to show a human: the label when set, the submission name otherwise.
    pub fn human_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Whether this field opted out of validation via the marker attribute.
    pub fn opted_out(&self) -> bool {
        self.data.contains_key(crate::form::OPT_OUT_MARKER)
    }
}
