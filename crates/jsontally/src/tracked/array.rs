//! Tracked JSON array

use std::fmt;

use serde_json::Value as Json;

use super::{index_path, Entry, TrackedObject};
use crate::coerce::{ensure_scalar_request, FromValue};
use crate::error::Result;
use crate::value::{Value, ValueKind};

/// A JSON array whose elements remember how often they were read.
///
/// Indices are 0-based in the API; diagnostics paths use 1-based `[n]`.
#[derive(Clone, Default)]
pub struct TrackedArray {
    path: String,
    entries: Vec<Entry>,
}

impl TrackedArray {
    /// Create an empty root array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from serde_json elements. Every counter starts at zero.
    pub fn from_json(items: &[Json]) -> Self {
        Self::from_json_at(items, "")
    }

    pub(crate) fn from_json_at(items: &[Json], path: &str) -> Self {
        let entries = items
            .iter()
            .enumerate()
            .map(|(index, json)| Entry::new(Value::from_json_at(json, &index_path(path, index))))
            .collect();
        Self {
            path: path.to_string(),
            entries,
        }
    }

    pub(crate) fn with_path(path: String) -> Self {
        Self {
            path,
            entries: Vec::new(),
        }
    }

    /// Convert to a serde_json array without counting reads.
    pub fn to_json(&self) -> Json {
        Json::Array(self.entries.iter().map(|entry| entry.value.to_json()).collect())
    }

    /// Location of this array inside its root document; empty for a root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw elements in order, without counting reads.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|entry| &entry.value)
    }

    /// Kind of the element at `index`, without counting a read.
    pub fn kind_of(&self, index: usize) -> Option<ValueKind> {
        self.entries.get(index).map(|entry| entry.value.kind())
    }

    /// Read the element at `index` as `T`.
    ///
    /// Out-of-range indices and `null` elements yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` if the element cannot coerce to `T`.
    pub fn get<T: FromValue>(&self, index: usize) -> Result<Option<T>> {
        match self.entries.get(index) {
            Some(entry) => entry.read(&self.child_path(index)),
            None => Ok(None),
        }
    }

    /// Read the element at `index` as `T`, substituting `default` when absent or `null`.
    pub fn get_or<T: FromValue>(&self, index: usize, default: T) -> Result<T> {
        Ok(self.get(index)?.unwrap_or(default))
    }

    /// Read the element at `index` coerced to a runtime-chosen scalar kind.
    pub fn get_kind(&self, kind: ValueKind, index: usize) -> Result<Option<Value>> {
        ensure_scalar_request(kind)?;
        match self.entries.get(index) {
            Some(entry) => entry.read_kind(kind, &self.child_path(index)),
            None => Ok(None),
        }
    }

    /// Handle to the nested object at `index`; the same instance on every call.
    pub fn get_object(&self, index: usize) -> Result<Option<&TrackedObject>> {
        match self.entries.get(index) {
            Some(entry) => entry.fetch_object(&self.child_path(index)),
            None => Ok(None),
        }
    }

    /// Handle to the nested array at `index`; the same instance on every call.
    pub fn get_array(&self, index: usize) -> Result<Option<&TrackedArray>> {
        match self.entries.get(index) {
            Some(entry) => entry.fetch_array(&self.child_path(index)),
            None => Ok(None),
        }
    }

    /// Append `value` with a fresh counter.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.push_entry(Entry::new(value.into()));
    }

    /// An independent deep copy, counters included.
    pub fn copy(&self) -> TrackedArray {
        self.clone()
    }

    pub(crate) fn push_entry(&mut self, mut entry: Entry) {
        entry.value.rebase(index_path(&self.path, self.entries.len()));
        self.entries.push(entry);
    }

    pub(crate) fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub(crate) fn rebase(&mut self, path: String) {
        for (index, entry) in self.entries.iter_mut().enumerate() {
            entry.value.rebase(index_path(&path, index));
        }
        self.path = path;
    }

    fn child_path(&self, index: usize) -> String {
        index_path(&self.path, index)
    }
}

impl fmt::Debug for TrackedArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for TrackedArray {
    /// Compact JSON text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_json(), f)
    }
}
