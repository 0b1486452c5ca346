//! Asynchronous adaptation layer
//!
//! [`AsyncState`] is a future of a [`TraversalState`] that exposes the same
//! operations under `then_` names. Each step waits for the previous one,
//! applies the synchronous operation, and awaits the result again when it is
//! itself pending, so chains can run across suspension points.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::FutureExt;
use futures::future::{self, BoxFuture};

use crate::error::Result;
use crate::natural::Proxy;
use crate::path::Segment;
use crate::state::{AccessMode, TraversalState};
use crate::value::Value;

/// A traversal state that becomes available later
#[must_use = "an AsyncState does nothing unless awaited"]
pub struct AsyncState {
    future: BoxFuture<'static, Result<TraversalState>>,
}

impl AsyncState {
    fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<TraversalState>> + Send + 'static,
    {
        Self {
            future: future.boxed(),
        }
    }

    pub(crate) fn adapt(state: TraversalState, fail_safe: bool) -> Self {
        let Some(pending) = state.value().as_pending().cloned() else {
            return Self::new(future::ready(Ok(state)));
        };
        let path = Segment::Await.extend(&state.path());
        Self::new(async move {
            match pending.settle().await {
                Ok(value) => Ok(state.derive_in(AccessMode::Plain, value, path)),
                Err(error) if fail_safe => {
                    tracing::debug!(path = %path, error = %error, "pending value rejected");
                    Ok(state.dead_end_in(AccessMode::Plain, path, Some(error)))
                }
                Err(error) => Err(error),
            }
        })
    }

    /// Navigate to the member `name` once settled
    pub fn then_get_property(self, name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(async move {
            let state = self.await?;
            let next = state.get_property(&name).into_async(false).await?;
            Ok(next.restate())
        })
    }

    /// Single-name form of `get`; use [`AsyncState::then_value`] for the raw value
    pub fn then_get(self, name: impl Into<String>) -> Self { self.then_get_property(name) }

    /// Invoke the method `name` once settled; its error is returned to
    /// whoever awaits the chain
    pub fn then_call(self, name: impl Into<String>, args: Vec<Value>) -> Self {
        let name = name.into();
        Self::new(async move {
            let state = self.await?;
            let next = state.call(&name, &args)?.into_async(false).await?;
            Ok(next.restate())
        })
    }

    /// Invoke the method `name` once settled, ending the chain on failure or
    /// rejection with the error captured
    pub fn then_safe_call(self, name: impl Into<String>, args: Vec<Value>) -> Self {
        let name = name.into();
        Self::new(async move {
            let state = self.await?;
            let next = state.safe_call(&name, &args).into_async(true).await?;
            Ok(if next.error().is_some() {
                next
            } else {
                next.restate()
            })
        })
    }

    /// Project the settled value through `selector`
    pub fn then_select<F, R>(self, selector: F) -> Self
    where
        F: FnOnce(&Value) -> R + Send + 'static,
        R: Into<Value> + 'static,
    {
        Self::new(async move {
            let state = self.await?;
            let next = state.select(selector).into_async(false).await?;
            Ok(next.restate())
        })
    }

    /// Keep the settled state when `validator` accepts its value
    pub fn then_validate<F>(self, validator: F) -> Self
    where
        F: FnOnce(&Value) -> bool + Send + 'static,
    {
        Self::new(async move { Ok(self.await?.validate(validator).restate()) })
    }

    /// Run `action` on the settled value and pass the state through
    pub fn then_action<F>(self, action: F) -> Self
    where
        F: FnOnce(&Value) + Send + 'static,
    {
        Self::new(async move { Ok(self.await?.action(action)) })
    }

    /// [`TraversalState::expect`] once settled
    pub fn then_expect<F>(self, invoke: F) -> Self
    where
        F: FnOnce(Proxy) -> Result<Proxy> + Send + 'static,
    {
        Self::new(async move {
            let state = self.await?;
            let next = state.expect(invoke)?.into_async(false).await?;
            Ok(next.restate())
        })
    }

    /// [`TraversalState::safe_expect`] once settled; a rejection of the
    /// resulting value is captured as well
    pub fn then_safe_expect<F>(self, invoke: F) -> Self
    where
        F: FnOnce(Proxy) -> Result<Proxy> + Send + 'static,
    {
        Self::new(async move {
            let state = self.await?;
            let next = state.safe_expect(invoke)?.into_async(true).await?;
            Ok(if next.error().is_some() {
                next
            } else {
                next.restate()
            })
        })
    }

    /// The settled value
    pub fn then_value(self) -> BoxFuture<'static, Result<Value>> {
        async move { Ok(self.await?.value().clone()) }.boxed()
    }
}

impl Future for AsyncState {
    type Output = Result<TraversalState>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.future.poll_unpin(cx)
    }
}

impl fmt::Debug for AsyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncState").finish_non_exhaustive()
    }
}
