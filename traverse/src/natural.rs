//! Natural-accessor wrapper
//!
//! A [`Proxy`] stands in for the current value of a chain so it can be driven
//! with member reads, invocations and construction instead of named
//! operations. Every access is delegated back to the [`TraversalState`]
//! engine. The `natural!` macro lowers ordinary member and call syntax onto
//! these primitives:
//!
//! ```
//! use safe_traverse::{Value, natural, traverse};
//!
//! let subject = Value::from(serde_json::json!({"a": {"b": {"c": 42}}}));
//! let state = traverse(subject).expect(|p| Ok(natural!(p.a.b.c)))?;
//!
//! assert_eq!(state.value(), &Value::from(42));
//! assert_eq!(state.path(), "$.a.b.c");
//! # Ok::<(), safe_traverse::Error>(())
//! ```

use crate::error::Result;
use crate::state::TraversalState;
use crate::value::Value;

/// Stand-in for the current value of a natural-mode chain
#[derive(Debug, Clone)]
pub struct Proxy {
    state:    TraversalState,
    /// Value this proxy was read from; bound as receiver on invocation
    receiver: Value,
    safe:     bool,
}

impl Proxy {
    pub(crate) const fn new(state: TraversalState, safe: bool) -> Self {
        Self {
            state,
            receiver: Value::Undefined,
            safe,
        }
    }

    /// Read the member `name`
    #[must_use]
    pub fn field(&self, name: &str) -> Self {
        Self {
            state:    self.state.get_property(name),
            receiver: self.state.value().clone(),
            safe:     self.safe,
        }
    }

    /// Invoke the current value as a function, bound to the value it was
    /// read from
    ///
    /// Invoking a missing member leaves the path where navigation stopped;
    /// invoking a present value that is not callable records `.call`.
    ///
    /// # Errors
    ///
    /// Returns the function's error unchanged, unless this proxy was created
    /// by [`TraversalState::safe_expect`], in which case the chain ends with
    /// the error captured under `.#call(fail)`.
    pub fn invoke(&self, args: &[Value]) -> Result<Self> {
        let state = self.state.invoke_as_function(&self.receiver, args, self.safe)?;
        Ok(Self::new(state, self.safe))
    }

    /// Instantiate the current value
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotConstructor`] when the current value is
    /// present but cannot be constructed, or the constructor's own error.
    pub fn construct(&self, args: &[Value]) -> Result<Self> {
        Ok(Self::new(self.state.construct(args)?, self.safe))
    }

    /// The wrapped traversal state
    #[must_use]
    pub const fn state(&self) -> &TraversalState { &self.state }

    /// Unwrap into the wrapped traversal state
    #[must_use]
    pub fn into_state(self) -> TraversalState { self.state }

    /// Current value
    #[must_use]
    pub fn value(&self) -> &Value { self.state.value() }

    /// Current breadcrumb
    #[must_use]
    pub fn path(&self) -> String { self.state.path() }

    /// Whether invocations through this proxy capture errors
    #[must_use]
    pub const fn is_safe(&self) -> bool { self.safe }
}
