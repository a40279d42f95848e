//! Reporting of declared values that were never read

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::{JsonTallyError, Result};
use crate::report::ValidationReport;
use crate::tracked::{key_path, index_path, Entry, TrackedArray, TrackedObject};
use crate::value::Value;

/// Containers that can report which of their values were never read.
///
/// A scalar entry (including `null`) is unvisited while its counter is zero.
/// Containers are not leaves: the sweep descends into them whether or not
/// their handle was ever fetched, and an empty container contributes nothing.
pub trait Visited {
    /// Add the unvisited paths under this container to `out`.
    fn collect_never_visited(&self, out: &mut BTreeSet<String>);

    /// Sorted set of unvisited paths.
    fn never_visited(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_never_visited(&mut out);
        out
    }

    /// Fail with an [`Invalid`](JsonTallyError::Invalid) report if any path is unvisited.
    fn ensure_all_visited(&self) -> Result<()> {
        let unread = self.never_visited();
        if unread.is_empty() {
            return Ok(());
        }
        debug!(count = unread.len(), "document has unread attributes");
        let mut report = ValidationReport::new();
        report.record_unread(None, unread);
        Err(JsonTallyError::Invalid(report))
    }
}

impl Visited for TrackedObject {
    fn collect_never_visited(&self, out: &mut BTreeSet<String>) {
        for (key, entry) in self.entries() {
            sweep(entry, || key_path(self.path(), key), out);
        }
    }
}

impl Visited for TrackedArray {
    fn collect_never_visited(&self, out: &mut BTreeSet<String>) {
        for (index, entry) in self.entries().iter().enumerate() {
            sweep(entry, || index_path(self.path(), index), out);
        }
    }
}

fn sweep(entry: &Entry, path: impl FnOnce() -> String, out: &mut BTreeSet<String>) {
    match &entry.value {
        Value::Object(o) => o.collect_never_visited(out),
        Value::Array(a) => a.collect_never_visited(out),
        _ => {
            if entry.reads() == 0 {
                out.insert(path());
            }
        }
    }
}
