use std::fmt;
use std::future::Future;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};

use super::Value;
use crate::error::{Error, Result};

/// A value that settles later, either resolved to a [`Value`] or rejected
/// with an [`Error`]
///
/// The underlying future is shared, so every clone observes the same
/// settlement and the work behind it runs once.
#[derive(Clone)]
pub struct Pending {
    future: Shared<BoxFuture<'static, Result<Value>>>,
}

impl Pending {
    /// Wrap a future
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<Value>> + Send + 'static,
    {
        Self {
            future: future.boxed().shared(),
        }
    }

    /// An already resolved value
    pub fn resolved(value: impl Into<Value>) -> Self {
        let value = value.into();
        Self::new(async move { Ok(value) })
    }

    /// An already rejected value
    #[must_use]
    pub fn rejected(error: Error) -> Self { Self::new(async move { Err(error) }) }

    /// Wait for the value to settle, following resolutions that are
    /// themselves pending
    ///
    /// # Errors
    ///
    /// Returns the rejection of this value or of any value it resolved to.
    pub async fn settle(self) -> Result<Value> {
        let mut current = self;
        loop {
            match current.future.await? {
                Value::Pending(next) => current = next,
                value => return Ok(value),
            }
        }
    }

    /// Whether both handles share the same settlement
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool { self.future.ptr_eq(&other.future) }
}

impl fmt::Debug for Pending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pending")
            .field("settled", &self.future.peek().is_some())
            .finish()
    }
}
