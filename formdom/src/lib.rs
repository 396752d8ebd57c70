pub mod event;
pub mod field;
pub mod form;

pub use event::{EventKind, FieldEvent};
pub use field::{Field, FieldKind};
pub use form::Form;
