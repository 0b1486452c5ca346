//! Per-traversal cache of the shared terminal states
//!
//! Once a chain falls off the edge it lands on one terminal record per
//! access mode. The record is reused and only its path and error are
//! refreshed, so every handle to the dead end observes the latest failure.
//! The cache is owned by a single root traversal and never shared between
//! independent traversals.

use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use strum::Display;

use crate::error::Error;

/// Which flavor of the chain a state belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub(crate) enum AccessMode {
    /// Explicit operation calls
    Plain,
    /// Driven through a [`crate::Proxy`]
    Natural,
}

#[derive(Debug, Default)]
struct Record {
    path:  String,
    error: Option<Error>,
}

/// The shared terminal state of one access mode
#[derive(Debug, Default)]
pub(crate) struct Sentinel {
    record: RwLock<Record>,
}

impl Sentinel {
    pub(crate) fn path(&self) -> String {
        self.record
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .path
            .clone()
    }

    pub(crate) fn error(&self) -> Option<Error> {
        self.record
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .error
            .clone()
    }

    fn refresh(&self, path: String, error: Option<Error>) {
        let mut record = self.record.write().unwrap_or_else(PoisonError::into_inner);
        record.path = path;
        record.error = error;
    }
}

/// The two lazily created terminal states of one root traversal
#[derive(Debug, Default)]
pub(crate) struct SentinelCache {
    plain:   OnceLock<Arc<Sentinel>>,
    natural: OnceLock<Arc<Sentinel>>,
}

impl SentinelCache {
    /// Hand out the terminal state for `mode`, refreshed with `path` and `error`
    pub(crate) fn terminal(
        &self,
        mode: AccessMode,
        path: String,
        error: Option<Error>,
    ) -> Arc<Sentinel> {
        let cell = match mode {
            AccessMode::Plain => &self.plain,
            AccessMode::Natural => &self.natural,
        };
        let sentinel = cell.get_or_init(Arc::default);
        tracing::trace!(
            mode = %mode,
            path = %path,
            caught = error.is_some(),
            "traversal reached a dead end"
        );
        sentinel.refresh(path, error);
        Arc::clone(sentinel)
    }
}
