//! Dynamic subject model
//!
//! A traversal walks a graph of [`Value`]s. Containers (`Array`, `Object`) and
//! callables (`Function`, `Pending`) are reference types: cloning a `Value`
//! clones the handle and never the underlying data, so the engine only ever
//! holds references to the caller's structure.

mod array;
mod function;
mod object;
mod pending;

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub use array::Array;
pub use function::Function;
pub use object::Object;
pub use pending::Pending;
use serde::{Deserialize, Deserializer};

/// Property name that reports the size of arrays and strings
const LENGTH: &str = "length";

/// Property name that reports the name of a function
const NAME: &str = "name";

/// A dynamically typed value reachable from a traversal subject
#[derive(Clone, Default)]
pub enum Value {
    /// Absence of a value; a state holding it is terminal
    #[default]
    Undefined,
    /// Explicit null
    Null,
    /// Boolean scalar
    Bool(bool),
    /// Numeric scalar
    Number(f64),
    /// Immutable string
    String(Arc<str>),
    /// Shared list
    Array(Array),
    /// Shared insertion-ordered map
    Object(Object),
    /// Callable, optionally constructible
    Function(Function),
    /// A value that will be resolved or rejected later
    Pending(Pending),
}

impl Value {
    /// Whether this is [`Value::Undefined`]
    #[must_use]
    pub const fn is_undefined(&self) -> bool { matches!(self, Self::Undefined) }

    /// Truthiness: `undefined`, `null`, `false`, `0`, `NaN` and `""` are falsy
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::Array(_) | Self::Object(_) | Self::Function(_) | Self::Pending(_) => true,
        }
    }

    /// Read the member `name`, yielding [`Value::Undefined`] when it does not exist
    ///
    /// Objects resolve by key, arrays and strings by index or `length`, and
    /// functions expose their `name`.
    #[must_use]
    pub fn member(&self, name: &str) -> Self {
        match self {
            Self::Object(object) => object.get(name).unwrap_or_default(),
            Self::Array(array) => {
                if name == LENGTH {
                    Self::from(array.len())
                } else {
                    index_of(name)
                        .and_then(|index| array.get(index))
                        .unwrap_or_default()
                }
            }
            Self::String(s) => {
                if name == LENGTH {
                    Self::from(s.chars().count())
                } else {
                    index_of(name)
                        .and_then(|index| s.chars().nth(index))
                        .map_or(Self::Undefined, |c| Self::from(c.to_string()))
                }
            }
            Self::Function(function) if name == NAME => Self::from(function.name()),
            _ => Self::Undefined,
        }
    }

    /// Numeric content
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Boolean content
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// String content
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(&**s),
            _ => None,
        }
    }

    /// Array handle
    #[must_use]
    pub const fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Object handle
    #[must_use]
    pub const fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Function handle
    #[must_use]
    pub const fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Pending handle
    #[must_use]
    pub const fn as_pending(&self) -> Option<&Pending> {
        match self {
            Self::Pending(pending) => Some(pending),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => a.ptr_eq(b),
            (Self::Pending(a), Self::Pending(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("Undefined"),
            Self::Null => f.write_str("Null"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Self::String(s) => f.debug_tuple("String").field(s).finish(),
            Self::Array(array) => fmt::Debug::fmt(array, f),
            Self::Object(object) => fmt::Debug::fmt(object, f),
            Self::Function(function) => fmt::Debug::fmt(function, f),
            Self::Pending(pending) => fmt::Debug::fmt(pending, f),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) if n.is_infinite() => {
                f.write_str(if n.is_sign_positive() { "Infinity" } else { "-Infinity" })
            }
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::Array(array) => {
                for (index, item) in array.to_vec().iter().enumerate() {
                    if index > 0 {
                        f.write_str(",")?;
                    }
                    if !matches!(item, Self::Undefined | Self::Null) {
                        write!(f, "{item}")?;
                    }
                }
                Ok(())
            }
            Self::Object(_) => f.write_str("[object Object]"),
            Self::Function(function) => write!(f, "function {}", function.name()),
            Self::Pending(_) => f.write_str("[object Promise]"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self { Self::Bool(value) }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self { Self::Number(value) }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self { Self::Number(f64::from(value)) }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self { Self::Number(f64::from(value)) }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss, reason = "numbers are f64 like the values they model")]
    fn from(value: i64) -> Self { Self::Number(value as f64) }
}

impl From<u64> for Value {
    #[allow(clippy::cast_precision_loss, reason = "numbers are f64 like the values they model")]
    fn from(value: u64) -> Self { Self::Number(value as f64) }
}

impl From<usize> for Value {
    #[allow(clippy::cast_precision_loss, reason = "numbers are f64 like the values they model")]
    fn from(value: usize) -> Self { Self::Number(value as f64) }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self { Self::String(Arc::from(value)) }
}

impl From<String> for Value {
    fn from(value: String) -> Self { Self::String(Arc::from(value)) }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self { Self::Array(value) }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self { Self::Object(value) }
}

impl From<Function> for Value {
    fn from(value: Function) -> Self { Self::Function(value) }
}

impl From<Pending> for Value {
    fn from(value: Pending) -> Self { Self::Pending(value) }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self { Self::Array(value.into_iter().collect()) }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self { value.map_or(Self::Undefined, Into::into) }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Undefined, Self::Number),
            serde_json::Value::String(s) => Self::from(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(fields) => {
                Self::Object(fields.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Canonical index form of `name`; `"01"` and `"+1"` are plain names
fn index_of(name: &str) -> Option<usize> {
    name.parse::<usize>()
        .ok()
        .filter(|index| index.to_string() == name)
}
