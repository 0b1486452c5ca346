//! Traversal state engine
//!
//! A [`TraversalState`] pairs the current value of a chain with the breadcrumb
//! that produced it. Every operation returns a new state; once the value is
//! gone the chain lands on the shared terminal state of its root traversal
//! and keeps answering the same operations without growing further.

mod introspection;
mod sentinel;

use std::fmt;
use std::sync::Arc;

use introspection::Introspection;
pub(crate) use sentinel::AccessMode;
use sentinel::{Sentinel, SentinelCache};

use crate::asynchronous::AsyncState;
use crate::error::{Error, Result};
use crate::natural::Proxy;
use crate::path::{ROOT, Segment};
use crate::value::Value;

/// Method name used when a natural-accessor proxy is invoked directly
const CALL: &str = "call";

static UNDEFINED: Value = Value::Undefined;

/// Start a traversal at `subject`
///
/// Each call owns its own terminal-state cache, so independent traversals
/// never observe each other's failures.
pub fn traverse(subject: impl Into<Value>) -> TraversalState { TraversalState::from_subject(subject) }

#[derive(Clone)]
enum Node {
    Live { value: Value, path: Arc<str> },
    Terminal(Arc<Sentinel>),
}

/// One step of a traversal chain
#[derive(Clone)]
pub struct TraversalState {
    node:  Node,
    mode:  AccessMode,
    cache: Arc<SentinelCache>,
}

/// Outcome of [`TraversalState::get_all`]
#[derive(Debug, Clone)]
pub enum Lookup {
    /// Exactly one name was given and was navigated
    State(TraversalState),
    /// Zero or several names were given; navigation was skipped
    Raw(Value),
}

impl Lookup {
    /// The navigated state, if navigation happened
    #[must_use]
    pub fn into_state(self) -> Option<TraversalState> {
        match self {
            Self::State(state) => Some(state),
            Self::Raw(_) => None,
        }
    }

    /// The value, whether navigated or raw
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::State(state) => state.value().clone(),
            Self::Raw(value) => value,
        }
    }
}

impl TraversalState {
    /// Wrap `subject` at the root path `$`
    pub fn from_subject(subject: impl Into<Value>) -> Self {
        let cache = Arc::new(SentinelCache::default());
        Self::create(subject.into(), ROOT.to_owned(), AccessMode::Plain, cache)
    }

    fn create(value: Value, path: String, mode: AccessMode, cache: Arc<SentinelCache>) -> Self {
        let node = if value.is_undefined() {
            Node::Terminal(cache.terminal(mode, path, None))
        } else {
            Node::Live {
                value,
                path: Arc::from(path),
            }
        };
        Self { node, mode, cache }
    }

    /// A state in `mode` sharing this state's root
    pub(crate) fn derive_in(&self, mode: AccessMode, value: Value, path: String) -> Self {
        Self::create(value, path, mode, Arc::clone(&self.cache))
    }

    fn derive(&self, value: Value, path: String) -> Self { self.derive_in(self.mode, value, path) }

    /// The terminal state of `mode`, refreshed with `path` and `error`
    pub(crate) fn dead_end_in(&self, mode: AccessMode, path: String, error: Option<Error>) -> Self {
        Self {
            node: Node::Terminal(self.cache.terminal(mode, path, error)),
            mode,
            cache: Arc::clone(&self.cache),
        }
    }

    fn dead_end(&self, path: String, error: Option<Error>) -> Self {
        self.dead_end_in(self.mode, path, error)
    }

    /// Dead chains keep their path as is
    fn stay(&self) -> Self { self.dead_end(self.path(), None) }

    /// The same value and path in `mode`, carrying over any captured error
    pub(crate) fn with_mode(&self, mode: AccessMode) -> Self {
        match &self.node {
            Node::Live { value, path } => Self {
                node: Node::Live {
                    value: value.clone(),
                    path:  Arc::clone(path),
                },
                mode,
                cache: Arc::clone(&self.cache),
            },
            Node::Terminal(sentinel) => self.dead_end_in(mode, sentinel.path(), sentinel.error()),
        }
    }

    /// A fresh plain state with the same value and path and no error
    pub(crate) fn restate(&self) -> Self {
        self.derive_in(AccessMode::Plain, self.value().clone(), self.path())
    }

    /// The value is only navigable when truthy
    fn present(&self) -> Option<&Value> {
        match &self.node {
            Node::Live { value, .. } if value.is_truthy() => Some(value),
            Node::Live { .. } | Node::Terminal(_) => None,
        }
    }

    /// Current value; [`Value::Undefined`] once the chain is dead
    #[must_use]
    pub fn value(&self) -> &Value {
        match &self.node {
            Node::Live { value, .. } => value,
            Node::Terminal(_) => &UNDEFINED,
        }
    }

    /// Breadcrumb that produced the current value
    #[must_use]
    pub fn path(&self) -> String {
        match &self.node {
            Node::Live { path, .. } => path.to_string(),
            Node::Terminal(sentinel) => sentinel.path(),
        }
    }

    /// Error captured by the safe operation that ended the chain
    #[must_use]
    pub fn error(&self) -> Option<Error> {
        match &self.node {
            Node::Live { .. } => None,
            Node::Terminal(sentinel) => sentinel.error(),
        }
    }

    /// Whether the chain has fallen off the edge
    #[must_use]
    pub const fn is_terminal(&self) -> bool { matches!(self.node, Node::Terminal(_)) }

    /// Navigate to the member `name`
    ///
    /// A missing member ends the chain with the attempted step recorded; a
    /// chain that is already dead keeps its path unchanged.
    #[must_use]
    pub fn get_property(&self, name: &str) -> Self {
        let Some(value) = self.present() else {
            return self.stay();
        };
        self.derive(value.member(name), Segment::Property(name).extend(&self.path()))
    }

    /// Single-name form of [`TraversalState::get_all`]
    #[must_use]
    pub fn get(&self, name: &str) -> Self { self.get_property(name) }

    /// Navigate when given exactly one name; otherwise return the raw value
    ///
    /// Several names do not chain: anything other than a single name falls
    /// through to the current value.
    #[must_use]
    pub fn get_all<N: AsRef<str>>(&self, names: &[N]) -> Lookup {
        match names {
            [name] => Lookup::State(self.get_property(name.as_ref())),
            _ => Lookup::Raw(self.value().clone()),
        }
    }

    /// Project the current value through `selector`
    ///
    /// The selector is never invoked on a dead chain. Falsy results end the
    /// chain.
    #[must_use]
    pub fn select<F, R>(&self, selector: F) -> Self
    where
        F: FnOnce(&Value) -> R,
        R: Into<Value>,
    {
        let Some(value) = self.present() else {
            return self.stay();
        };
        let selected = selector(value).into();
        let selected = if selected.is_truthy() {
            selected
        } else {
            Value::Undefined
        };
        self.derive(selected, Segment::Selector.extend(&self.path()))
    }

    /// Invoke the method `name` with the current value as receiver
    ///
    /// # Errors
    ///
    /// Returns the method's error unchanged.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Self> {
        let Some(value) = self.present() else {
            return Ok(self.stay());
        };
        let path = Segment::Method(name).extend(&self.path());
        match value.member(name) {
            Value::Function(function) => {
                let result = function.invoke(value, args)?;
                Ok(self.derive(result, path))
            }
            _ => Ok(self.dead_end(path, None)),
        }
    }

    /// [`TraversalState::call`] that ends the chain instead of failing
    #[must_use]
    pub fn safe_call(&self, name: &str, args: &[Value]) -> Self {
        self.call(name, args).unwrap_or_else(|error| {
            tracing::debug!(method = name, error = %error, "safe call caught an error");
            self.dead_end(Segment::MethodFailed(name).extend(&self.path()), Some(error))
        })
    }

    /// Run `action` on the current value, even when it is undefined, and pass
    /// this state through
    #[must_use]
    pub fn action<F>(&self, action: F) -> Self
    where
        F: FnOnce(&Value),
    {
        action(self.value());
        self.clone()
    }

    /// Fallible form of [`TraversalState::action`]
    ///
    /// # Errors
    ///
    /// Returns the action's error unchanged.
    pub fn try_action<F>(&self, action: F) -> Result<Self>
    where
        F: FnOnce(&Value) -> Result<()>,
    {
        action(self.value())?;
        Ok(self.clone())
    }

    /// Keep this state when `validator` accepts the current value
    #[must_use]
    pub fn validate<F>(&self, validator: F) -> Self
    where
        F: FnOnce(&Value) -> bool,
    {
        if validator(self.value()) {
            self.clone()
        } else {
            self.dead_end(Segment::Validator.extend(&self.path()), None)
        }
    }

    /// Fallible form of [`TraversalState::validate`]
    ///
    /// # Errors
    ///
    /// Returns the validator's error unchanged.
    pub fn try_validate<F>(&self, validator: F) -> Result<Self>
    where
        F: FnOnce(&Value) -> Result<bool>,
    {
        let accepted = validator(self.value())?;
        Ok(self.validate(|_| accepted))
    }

    /// Own member names of the current value
    #[must_use]
    pub fn keys(&self) -> Self { self.introspect(Introspection::Keys) }

    /// Own member values of the current value
    #[must_use]
    pub fn values(&self) -> Self { self.introspect(Introspection::Values) }

    /// Own `[name, value]` pairs of the current value
    #[must_use]
    pub fn entries(&self) -> Self { self.introspect(Introspection::Entries) }

    fn introspect(&self, introspection: Introspection) -> Self {
        let Some(value) = self.present() else {
            return self.stay();
        };
        let helper = Segment::Helper(Introspection::HELPER).extend(&self.path());
        let name: &'static str = introspection.into();
        let path = Segment::Method(name).extend(&helper);
        self.derive_in(AccessMode::Plain, introspection.apply(value), path)
    }

    /// Drive the chain through a natural-accessor [`Proxy`]
    ///
    /// # Errors
    ///
    /// Returns any error raised inside `invoke`, including failed invocations
    /// made through the proxy.
    pub fn expect<F>(&self, invoke: F) -> Result<Self>
    where
        F: FnOnce(Proxy) -> Result<Proxy>,
    {
        self.expect_with(invoke, false)
    }

    /// [`TraversalState::expect`] whose proxy invocations end the chain
    /// instead of failing
    ///
    /// # Errors
    ///
    /// Returns errors raised by `invoke` itself rather than by an invocation
    /// made through the proxy.
    pub fn safe_expect<F>(&self, invoke: F) -> Result<Self>
    where
        F: FnOnce(Proxy) -> Result<Proxy>,
    {
        self.expect_with(invoke, true)
    }

    fn expect_with<F>(&self, invoke: F, safe: bool) -> Result<Self>
    where
        F: FnOnce(Proxy) -> Result<Proxy>,
    {
        let proxy = Proxy::new(self.with_mode(AccessMode::Natural), safe);
        let outcome = invoke(proxy)?;
        Ok(outcome.into_state().with_mode(AccessMode::Plain))
    }

    /// Adapt into the asynchronous protocol
    ///
    /// A pending current value is awaited and the path gains `.(await)`. With
    /// `fail_safe` a rejection ends the chain with the error captured;
    /// otherwise it is returned to whoever awaits the result.
    #[must_use]
    pub fn into_async(self, fail_safe: bool) -> AsyncState { AsyncState::adapt(self, fail_safe) }

    /// Invoke the current value as a function bound to `receiver`
    pub(crate) fn invoke_as_function(
        &self,
        receiver: &Value,
        args: &[Value],
        safe: bool,
    ) -> Result<Self> {
        let Some(value) = self.present() else {
            return Ok(self.stay());
        };
        let Value::Function(function) = value else {
            return Ok(self.dead_end(Segment::NotCallable.extend(&self.path()), None));
        };
        match function.invoke(receiver, args) {
            Ok(result) => Ok(self.derive(result, Segment::Method(CALL).extend(&self.path()))),
            Err(error) if safe => {
                tracing::debug!(path = %self.path(), error = %error, "safe invocation caught an error");
                Ok(self.dead_end(Segment::MethodFailed(CALL).extend(&self.path()), Some(error)))
            }
            Err(error) => Err(error),
        }
    }

    /// Instantiate the current value
    pub(crate) fn construct(&self, args: &[Value]) -> Result<Self> {
        let Some(value) = self.present() else {
            return Ok(self.stay());
        };
        match value.as_function().and_then(|function| function.construct(args)) {
            Some(instance) => Ok(self.derive(instance?, Segment::Constructor.extend(&self.path()))),
            None => Err(Error::NotConstructor { path: self.path() }),
        }
    }
}

impl fmt::Debug for TraversalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraversalState")
            .field("value", self.value())
            .field("path", &self.path())
            .field("error", &self.error())
            .finish()
    }
}
