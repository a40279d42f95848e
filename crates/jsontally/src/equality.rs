//! Structural equality that ignores read counters and diagnostics paths
//!
//! Scalars compare by stored representation: `Integer(5)`, `Long(5)` and
//! `Double(5.0)` are three different values. Objects compare by key set and
//! per-key value regardless of key order; arrays compare element-wise in order.

use crate::tracked::{Entry, TrackedArray, TrackedObject};
use crate::value::Value;

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,

            // Different kinds are never equal
            _ => false,
        }
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialEq for TrackedObject {
    fn eq(&self, other: &Self) -> bool {
        // IndexMap equality is order-independent and requires equal key sets
        self.entries() == other.entries()
    }
}

impl PartialEq for TrackedArray {
    fn eq(&self, other: &Self) -> bool {
        self.entries() == other.entries()
    }
}

/// Compare two optional objects. Two absent objects are equal; absent never equals present.
pub fn structurally_equal(a: Option<&TrackedObject>, b: Option<&TrackedObject>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        (None, None) => true,
        _ => false,
    }
}
