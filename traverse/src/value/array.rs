use std::fmt;
use std::sync::{Arc, RwLock};

use super::{Value, read, write};

/// Shared list of values
#[derive(Clone, Default)]
pub struct Array {
    items: Arc<RwLock<Vec<Value>>>,
}

impl Array {
    /// Create an empty array
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Element at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Value> { read(&self.items).get(index).cloned() }

    /// Append an element
    pub fn push(&self, value: impl Into<Value>) { write(&self.items).push(value.into()); }

    /// Number of elements
    #[must_use]
    pub fn len(&self) -> usize { read(&self.items).len() }

    /// Whether the array has no elements
    #[must_use]
    pub fn is_empty(&self) -> bool { read(&self.items).is_empty() }

    /// Snapshot of the element handles
    #[must_use]
    pub fn to_vec(&self) -> Vec<Value> { read(&self.items).clone() }

    /// First element matching `predicate`
    ///
    /// Searches a snapshot, so `predicate` may modify this array.
    #[must_use]
    pub fn find(&self, predicate: impl Fn(&Value) -> bool) -> Option<Value> {
        self.to_vec().into_iter().find(|item| predicate(item))
    }

    /// Whether both handles point at the same storage
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool { Arc::ptr_eq(&self.items, &other.items) }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *read(&self.items) == *read(&other.items)
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(read(&self.items).iter()).finish()
    }
}

impl<V: Into<Value>> FromIterator<V> for Array {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            items: Arc::new(RwLock::new(iter.into_iter().map(Into::into).collect())),
        }
    }
}
