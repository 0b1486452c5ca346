use std::fmt;
use std::sync::{Arc, RwLock};

use indexmap::IndexMap;

use super::{Value, read, write};

/// Shared, insertion-ordered map of named members
///
/// Clones share the same storage, so a mutation made through one handle is
/// visible through every other handle (including those held by traversal
/// states).
#[derive(Clone, Default)]
pub struct Object {
    fields: Arc<RwLock<IndexMap<String, Value>>>,
}

impl Object {
    /// Create an empty object
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Builder form of [`Object::insert`]
    #[must_use]
    pub fn with(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a member by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> { read(&self.fields).get(key).cloned() }

    /// Insert or replace a member, returning the previous value
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        write(&self.fields).insert(key.into(), value.into())
    }

    /// Remove a member, preserving the order of the rest
    pub fn remove(&self, key: &str) -> Option<Value> { write(&self.fields).shift_remove(key) }

    /// Number of members
    #[must_use]
    pub fn len(&self) -> usize { read(&self.fields).len() }

    /// Whether the object has no members
    #[must_use]
    pub fn is_empty(&self) -> bool { read(&self.fields).is_empty() }

    /// Member names in insertion order
    #[must_use]
    pub fn keys(&self) -> Vec<String> { read(&self.fields).keys().cloned().collect() }

    /// Member values in insertion order
    #[must_use]
    pub fn values(&self) -> Vec<Value> { read(&self.fields).values().cloned().collect() }

    /// Members in insertion order
    #[must_use]
    pub fn entries(&self) -> Vec<(String, Value)> {
        read(&self.fields)
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Whether both handles point at the same storage
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool { Arc::ptr_eq(&self.fields, &other.fields) }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *read(&self.fields) == *read(&other.fields)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(read(&self.fields).iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for Object
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let fields = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect::<IndexMap<_, _>>();
        Self {
            fields: Arc::new(RwLock::new(fields)),
        }
    }
}
