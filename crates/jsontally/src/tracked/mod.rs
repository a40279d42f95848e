//! Tracked containers: objects and arrays that count typed reads per entry

mod array;
mod object;

pub use array::TrackedArray;
pub use object::TrackedObject;

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::trace;

use crate::coerce::{coerce, FromValue};
use crate::error::{JsonTallyError, Result};
use crate::value::{Value, ValueKind};

/// A stored value together with the number of successful typed reads.
///
/// Counters use relaxed atomics so reads can go through `&self`; the count is
/// bookkeeping only and orders nothing else.
pub(crate) struct Entry {
    pub(crate) value: Value,
    reads: AtomicUsize,
}

impl Entry {
    pub(crate) fn new(value: Value) -> Self {
        Self {
            value,
            reads: AtomicUsize::new(0),
        }
    }

    pub(crate) fn reads(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }

    fn count_read(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    /// First fetch of a container handle is recorded once; later fetches are free.
    fn mark_fetched(&self) {
        self.reads.fetch_max(1, Ordering::Relaxed);
    }

    /// Coerce to `kind` and count the read. Null reads count and yield `None`.
    pub(crate) fn read_kind(&self, kind: ValueKind, path: &str) -> Result<Option<Value>> {
        let value = coerce(&self.value, kind, path)?;
        self.count_read();
        trace!(path, reads = self.reads(), "counted read");
        Ok((!value.is_null()).then_some(value))
    }

    pub(crate) fn read<T: FromValue>(&self, path: &str) -> Result<Option<T>> {
        Ok(self.read_kind(T::KIND, path)?.and_then(T::from_value))
    }

    pub(crate) fn fetch_object(&self, path: &str) -> Result<Option<&TrackedObject>> {
        match &self.value {
            Value::Object(o) => {
                self.mark_fetched();
                Ok(Some(o))
            }
            Value::Null => {
                self.count_read();
                Ok(None)
            }
            other => Err(JsonTallyError::type_mismatch(path, ValueKind::Object, other)),
        }
    }

    pub(crate) fn fetch_array(&self, path: &str) -> Result<Option<&TrackedArray>> {
        match &self.value {
            Value::Array(a) => {
                self.mark_fetched();
                Ok(Some(a))
            }
            Value::Null => {
                self.count_read();
                Ok(None)
            }
            other => Err(JsonTallyError::type_mismatch(path, ValueKind::Array, other)),
        }
    }
}

impl Clone for Entry {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            reads: AtomicUsize::new(self.reads()),
        }
    }
}

impl Value {
    /// Re-root nested containers so their diagnostics paths start at `path`.
    pub(crate) fn rebase(&mut self, path: String) {
        match self {
            Value::Object(o) => o.rebase(path),
            Value::Array(a) => a.rebase(path),
            _ => {}
        }
    }
}

/// `parent.key`, or just `key` at the root.
pub(crate) fn key_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// `parent[n]` with a 1-based `n`, for human-facing messages.
pub(crate) fn index_path(parent: &str, index: usize) -> String {
    format!("{}[{}]", parent, index + 1)
}
