//! Configuration error types.
//!
//! The pipeline itself has no failure mode: every rule either produces a
//! message or passes. Misconfiguration is caught eagerly, when options are
//! resolved at activation time.

/// Error raised while resolving raw options into a validation config.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// A configured pattern is neither a known pattern name nor a valid
    /// inline regex.
    #[error("field {field:?}: unknown pattern {pattern:?} ({source_error})")]
    UnknownPattern {
        field: String,
        pattern: String,
        /// Compile error from the inline-regex fallback.
        source_error: String,
    },

    /// A pattern supplied via `RawOptions::patterns` failed to compile.
    #[error("pattern {name:?} failed to compile: {source_error}")]
    InvalidPattern { name: String, source_error: String },

    /// An equals reference was empty (`""` or a bare `#`).
    #[error("field {field:?}: empty equals reference")]
    EmptyEqualsTarget { field: String },
}
