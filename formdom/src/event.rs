/// Interaction kinds that can trigger validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Field lost focus.
    Blur,
    /// Committed value change.
    Change,
    /// Continuous typing. The only "live" kind: required-ness is never
    /// checked for it, and fields may opt out of it entirely.
    Input,
}

impl EventKind {
    /// Whether this is the continuous/typing kind.
    pub fn is_live(self) -> bool {
        matches!(self, EventKind::Input)
    }
}

/// An interaction event, targeted at a field by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEvent {
    pub field: String,
    pub kind: EventKind,
}

impl FieldEvent {
    pub fn new(field: impl Into<String>, kind: EventKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    pub fn blur(field: impl Into<String>) -> Self {
        Self::new(field, EventKind::Blur)
    }

    pub fn change(field: impl Into<String>) -> Self {
        Self::new(field, EventKind::Change)
    }

    pub fn input(field: impl Into<String>) -> Self {
        Self::new(field, EventKind::Input)
    }
}
