use thiserror::Error;

use crate::value::Value;

/// Result type for the `safe_traverse` library
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by caller-supplied functions or by the engine itself.
///
/// A missing property is never an `Error`: it becomes a terminal state with
/// a descriptive path. Errors only flow out of user callbacks, rejected
/// pending values, and construction of non-constructible values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// An error raised with a message
    #[error("{0}")]
    Message(String),

    /// An arbitrary value raised as an error
    #[error("Thrown value: {0}")]
    Thrown(Value),

    /// `new` attempted against a value that cannot be constructed
    #[error("Not a constructor: {path}")]
    NotConstructor {
        /// Breadcrumb of the value that was instantiated
        path: String,
    },
}

impl Error {
    /// Create an error carrying a message
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Raise an arbitrary value
    pub fn thrown(value: impl Into<Value>) -> Self {
        Self::Thrown(value.into())
    }

    /// The message, when this error was raised with one
    #[must_use]
    pub fn as_message(&self) -> Option<&str> {
        match self {
            Self::Message(message) => Some(message.as_str()),
            Self::Thrown(_) | Self::NotConstructor { .. } => None,
        }
    }

    /// The thrown value, when this error was raised with one
    #[must_use]
    pub const fn as_thrown(&self) -> Option<&Value> {
        match self {
            Self::Thrown(value) => Some(value),
            Self::Message(_) | Self::NotConstructor { .. } => None,
        }
    }
}
