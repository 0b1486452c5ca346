//! # Safe Traverse
//!
//! Safe navigation through dynamic value graphs. A traversal wraps a subject
//! at the root path `$` and walks it with property reads, method calls,
//! projections and validations. A missing or undefined intermediate value
//! never fails the chain: it turns into a terminal state that records where
//! navigation stopped and keeps answering the same operations.
//!
//! ```
//! use safe_traverse::{Value, traverse};
//!
//! let subject = Value::from(serde_json::json!({"a": {"b": {"c": 42}}}));
//!
//! let found = traverse(subject.clone()).get("a").get("b").get("c");
//! assert_eq!(found.value(), &Value::from(42));
//! assert_eq!(found.path(), "$.a.b.c");
//!
//! let missing = traverse(subject).get("a").get("b").get("d").get("e");
//! assert!(missing.value().is_undefined());
//! assert_eq!(missing.path(), "$.a.b.d");
//! ```
//!
//! The chain can also be driven through a natural-accessor [`Proxy`] (see
//! [`TraversalState::expect`] and the `natural!` macro) and adapted into an
//! asynchronous [`AsyncState`] when values are pending.

mod asynchronous;
mod error;
mod natural;
mod path;
mod state;
mod value;

pub use asynchronous::AsyncState;
pub use error::{Error, Result};
pub use natural::Proxy;
pub use path::ROOT;
#[cfg(feature = "macros")]
pub use safe_traverse_macros::natural;
pub use state::{Lookup, TraversalState, traverse, traverse as from};
pub use value::{Array, Function, Object, Pending, Value};
