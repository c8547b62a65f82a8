use std::fmt::Display;

use thiserror::Error;

#[derive(Error, Debug)]
/// Row formatting error
pub enum RowError {
    /// A required input was absent or malformed (mismatched escape tables,
    /// a `None` record, input that is not properly quoted).
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending parameter.
        name: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// An established field list names a field the row's type does not declare.
    #[error("field `{field}` not found on type `{type_name}`")]
    FieldNotFound {
        /// The field that could not be resolved.
        field: String,
        /// The type it was resolved against.
        type_name: String,
    },

    /// A value's shape cannot be written as a delimited row.
    #[error("unsupported row shape: {0}")]
    TypeMismatch(String),

    /// The value's own `Serialize` implementation reported an error.
    #[error("serialization failed: {0}")]
    Serialize(String),

    /// The underlying sink failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl serde::ser::Error for RowError {
    fn custom<T: Display>(msg: T) -> Self {
        RowError::Serialize(msg.to_string())
    }
}
