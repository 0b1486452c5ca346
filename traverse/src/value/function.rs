use std::fmt;
use std::sync::Arc;

use super::Value;
use crate::error::{Error, Result};

type Invoke = dyn Fn(&Value, &[Value]) -> Result<Value> + Send + Sync;
type Construct = dyn Fn(&[Value]) -> Result<Value> + Send + Sync;

/// A callable member
///
/// Invocation receives the receiver (the value the function was read from)
/// and the argument list. Errors returned by the body are what the safe
/// operations capture and the plain operations propagate.
#[derive(Clone)]
pub struct Function {
    name:      Arc<str>,
    invoke:    Arc<Invoke>,
    construct: Option<Arc<Construct>>,
}

impl Function {
    /// Create a callable from a body taking `(receiver, args)`
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name:      Arc::from(name.into()),
            invoke:    Arc::new(body),
            construct: None,
        }
    }

    /// Create a constructor that fails when invoked without `new`
    pub fn class<C>(name: impl Into<String>, constructor: C) -> Self
    where
        C: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        let name = name.into();
        let message = format!("Class constructor {name} cannot be invoked without 'new'");
        Self::new(name, move |_, _| Err(Error::message(message.clone())))
            .with_constructor(constructor)
    }

    /// Make this function constructible
    #[must_use]
    pub fn with_constructor<C>(mut self, constructor: C) -> Self
    where
        C: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.construct = Some(Arc::new(constructor));
        self
    }

    /// Function name
    #[must_use]
    pub fn name(&self) -> &str { &self.name }

    /// Call the function with `receiver` bound as its receiver
    ///
    /// # Errors
    ///
    /// Returns whatever error the function body raises, unchanged.
    pub fn invoke(&self, receiver: &Value, args: &[Value]) -> Result<Value> {
        (self.invoke)(receiver, args)
    }

    /// Whether the function can be instantiated
    #[must_use]
    pub const fn is_constructible(&self) -> bool { self.construct.is_some() }

    /// Instantiate, or `None` when the function is not constructible
    #[must_use]
    pub fn construct(&self, args: &[Value]) -> Option<Result<Value>> {
        self.construct.as_ref().map(|construct| construct(args))
    }

    /// Whether both handles refer to the same function
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool { Arc::ptr_eq(&self.invoke, &other.invoke) }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("constructible", &self.is_constructible())
            .finish()
    }
}
