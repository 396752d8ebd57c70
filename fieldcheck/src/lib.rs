pub mod engine;
pub mod error;
pub mod options;
pub mod patterns;
pub mod pipeline;
pub mod report;
pub mod resolver;
pub mod scheduler;

pub use engine::{Activation, Engine};
pub use error::ConfigError;
pub use options::{
    CustomValidator, EqualsTarget, FieldConfig, FieldOverrides, RawOptions, ValidationOptions,
};
pub use pipeline::{Failure, FailureKind, Outcome, validate};
pub use report::{LogReporter, Observers, Reporter, SubscriberId};
pub use resolver::resolve;

pub mod prelude {
    pub use crate::engine::{Activation, Engine};
    pub use crate::error::ConfigError;
    pub use crate::options::{FieldOverrides, RawOptions};
    pub use crate::pipeline::{Failure, FailureKind, Outcome};
    pub use crate::report::{LogReporter, Reporter, SubscriberId};

    pub use formdom::{EventKind, Field, FieldEvent, Form};
}
